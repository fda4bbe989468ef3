use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::question::{Question, QuestionNumber};

/// One timed attempt of a student at a specific exam.
///
/// Built once at exam start and never mutated afterwards; the cache is
/// rooted at it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExamSession {
    pub exam_type: String,
    pub exam_num: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub start_time: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
    pub questions: Vec<Question>,
    pub timer_enabled: bool,
}

impl ExamSession {
    pub fn new(
        exam_type: impl Into<String>,
        exam_num: impl Into<String>,
        duration: u32,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            exam_type: exam_type.into(),
            exam_num: exam_num.into(),
            student_id: None,
            start_time: Utc::now(),
            duration,
            questions,
            timer_enabled: true,
        }
    }

    pub fn with_student(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }

    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_timer(mut self, enabled: bool) -> Self {
        self.timer_enabled = enabled;
        self
    }

    pub fn duration_secs(&self) -> u64 {
        u64::from(self.duration) * 60
    }

    pub fn question_count(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn question(&self, number: QuestionNumber) -> Option<&Question> {
        self.questions.iter().find(|q| q.question_number == number)
    }

    /// Short hex fingerprint of this attempt, stable across reloads.
    pub fn attempt_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.exam_type.as_bytes());
        hasher.update(b"|");
        hasher.update(self.exam_num.as_bytes());
        hasher.update(b"|");
        hasher.update(self.student_id.as_deref().unwrap_or("").as_bytes());
        hasher.update(b"|");
        hasher.update(self.start_time.to_rfc3339().as_bytes());
        let result = hasher.finalize();

        hex::encode(&result[..4])
    }
}

/// A student's response to one question. Last write wins per question number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnswer {
    pub question_id: String,
    pub question_number: QuestionNumber,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

impl StudentAnswer {
    pub fn new(
        question_id: impl Into<String>,
        question_number: QuestionNumber,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question_number,
            answer: answer.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.answer.trim().is_empty()
    }
}
