mod controller;
mod questions;
mod submission;

#[allow(unused_imports)]
pub use controller::{
    ControllerError, ExamController, ExamPhase, SubmitCheck, SubmitFailurePolicy,
    DEFAULT_SUBMIT_TIMEOUT,
};
pub use questions::{load_questions, QuestionSourceError};
#[allow(unused_imports)]
pub use submission::{
    Beacon, OutboxBeacon, OutboxSubmitter, PayloadKind, SubmissionClient, SubmissionError,
    SubmissionPayload, SubmissionReceipt,
};
