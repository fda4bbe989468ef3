use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::question::QuestionNumber;
use super::session::StudentAnswer;

/// Derived completeness of one question, shown before submission.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatus {
    pub question_number: QuestionNumber,
    pub completed: bool,
    pub marked: bool,
}

impl QuestionStatus {
    pub fn symbol(&self) -> &'static str {
        match (self.completed, self.marked) {
            (true, false) => "●",
            (true, true) => "◆",
            (false, true) => "◇",
            (false, false) => "○",
        }
    }
}

/// Statuses for questions `1..=count`.
pub fn question_statuses(
    count: u32,
    answers: &BTreeMap<QuestionNumber, StudentAnswer>,
    marked: &BTreeSet<QuestionNumber>,
) -> Vec<QuestionStatus> {
    (1..=count)
        .map(|n| QuestionStatus {
            question_number: n,
            completed: answers.get(&n).is_some_and(|a| !a.is_blank()),
            marked: marked.contains(&n),
        })
        .collect()
}
