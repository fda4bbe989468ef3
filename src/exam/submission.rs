use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::models::StudentAnswer;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Submission transport failed: {0}")]
    Transport(String),

    #[error("Submission timed out after {0}s")]
    Timeout(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Explicit or timed-out submission awaiting acknowledgement.
    Submit,
    /// Page left while the exam was still in progress.
    Abandon,
    /// Page left while a submission was in flight.
    LastResort,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Submit => "submit",
            PayloadKind::Abandon => "abandon",
            PayloadKind::LastResort => "last_resort",
        }
    }
}

/// The final answer set plus the identifiers of the attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub kind: PayloadKind,
    pub attempt_key: String,
    pub exam_type: String,
    pub exam_num: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub answers: Vec<StudentAnswer>,
    /// Submitted by the timer rather than the student.
    pub forced: bool,
    pub elapsed_secs: u64,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub reference: String,
    pub accepted_at: DateTime<Utc>,
}

/// Acknowledged submission of a finished attempt.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Unacknowledged send at teardown. Must return immediately; delivery is
/// not guaranteed and failures are never reported.
pub trait Beacon: Send + Sync {
    fn send(&self, payload: SubmissionPayload);
}

fn payload_file(dir: &Path, payload: &SubmissionPayload) -> PathBuf {
    dir.join(format!(
        "{}-{}-{}.json",
        payload.attempt_key,
        payload.kind.as_str(),
        payload.submitted_at.format("%Y%m%dT%H%M%S")
    ))
}

/// Submits by writing the payload into an outbox directory; a completed
/// write is the acknowledgement.
#[derive(Debug, Clone)]
pub struct OutboxSubmitter {
    dir: PathBuf,
}

impl OutboxSubmitter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl SubmissionClient for OutboxSubmitter {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SubmissionError::Transport(format!("outbox unavailable: {e}")))?;

        let content = serde_json::to_string_pretty(payload)
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        let path = payload_file(&self.dir, payload);
        fs::write(&path, content)
            .await
            .map_err(|e| SubmissionError::Transport(format!("{}: {e}", path.display())))?;

        Ok(SubmissionReceipt {
            reference: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            accepted_at: Utc::now(),
        })
    }
}

/// Fire-and-forget outbox write on a detached thread.
#[derive(Debug, Clone)]
pub struct OutboxBeacon {
    dir: PathBuf,
}

impl OutboxBeacon {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Beacon for OutboxBeacon {
    fn send(&self, payload: SubmissionPayload) {
        let dir = self.dir.clone();
        std::thread::spawn(move || {
            let path = payload_file(&dir, &payload);
            let result = std::fs::create_dir_all(&dir)
                .map_err(|e| e.to_string())
                .and_then(|_| serde_json::to_string(&payload).map_err(|e| e.to_string()))
                .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
            if let Err(e) = result {
                tracing::debug!("Beacon to {} lost: {}", path.display(), e);
            }
        });
    }
}
