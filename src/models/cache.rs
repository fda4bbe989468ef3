use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::question::QuestionNumber;
use super::session::{ExamSession, StudentAnswer};

/// The persisted aggregate of an in-progress exam attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExamCache {
    pub exam_session: ExamSession,
    #[serde(default)]
    pub answers: BTreeMap<QuestionNumber, StudentAnswer>,
    pub current_question: QuestionNumber,
    pub last_saved: DateTime<Utc>,
}

impl ExamCache {
    pub fn new(exam_session: ExamSession) -> Self {
        Self {
            exam_session,
            answers: BTreeMap::new(),
            current_question: 1,
            last_saved: Utc::now(),
        }
    }

    pub fn put_answer(&mut self, question_number: QuestionNumber, answer: StudentAnswer) {
        self.answers.insert(question_number, answer);
        self.touch();
    }

    pub fn set_current_question(&mut self, question_number: QuestionNumber) {
        self.current_question = question_number;
        self.touch();
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| !a.is_blank()).count()
    }

    fn touch(&mut self) {
        self.last_saved = Utc::now();
    }
}
