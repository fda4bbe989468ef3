mod cache;
mod question;
mod session;
mod status;

pub use cache::ExamCache;
pub use question::{Question, QuestionNumber};
pub use session::{ExamSession, StudentAnswer};
pub use status::{question_statuses, QuestionStatus};
