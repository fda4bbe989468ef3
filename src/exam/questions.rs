use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

use crate::models::Question;

#[derive(Debug, Error)]
pub enum QuestionSourceError {
    #[error("Failed to read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse question file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Question set is empty")]
    Empty,

    #[error("Question numbers must run 1..={expected} without gaps or duplicates, got {found:?}")]
    BadNumbering { expected: u32, found: Vec<u32> },
}

/// Load the ordered question list for one exam from a JSON array.
///
/// Records belonging to another exam type/number are skipped so a single
/// bank file can serve several exams.
pub fn load_questions(
    path: &Path,
    exam_type: &str,
    exam_num: &str,
) -> Result<Vec<Question>, QuestionSourceError> {
    let content = std::fs::read_to_string(path)?;
    let all: Vec<Question> = serde_json::from_str(&content)?;
    select_questions(all, exam_type, exam_num)
}

pub fn select_questions(
    all: Vec<Question>,
    exam_type: &str,
    exam_num: &str,
) -> Result<Vec<Question>, QuestionSourceError> {
    let mut questions: Vec<Question> = all
        .into_iter()
        .filter(|q| q.exam_type == exam_type && q.exam_num == exam_num)
        .collect();

    if questions.is_empty() {
        return Err(QuestionSourceError::Empty);
    }

    questions.sort_by_key(|q| q.question_number);

    let expected = questions.len() as u32;
    let numbers: Vec<u32> = questions.iter().map(|q| q.question_number).collect();
    let unique: BTreeSet<u32> = numbers.iter().copied().collect();
    if unique.len() != numbers.len() || numbers.first() != Some(&1) || numbers.last() != Some(&expected)
    {
        return Err(QuestionSourceError::BadNumbering {
            expected,
            found: numbers,
        });
    }

    Ok(questions)
}
