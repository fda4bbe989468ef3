use serde::{Deserialize, Serialize};

/// 1-based position of a question within a session.
pub type QuestionNumber = u32;

/// Read-only reference data for one exam question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question_number: QuestionNumber,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub exam_type: String,
    pub exam_num: String,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        question_number: QuestionNumber,
        content: impl Into<String>,
        exam_type: impl Into<String>,
        exam_num: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question_number,
            content: content.into(),
            condition: None,
            images: Vec::new(),
            exam_type: exam_type.into(),
            exam_num: exam_num.into(),
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}
