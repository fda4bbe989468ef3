use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{AnswerCache, CacheStore};
use crate::models::{question_statuses, ExamSession, QuestionNumber, QuestionStatus, StudentAnswer};
use crate::timer::Countdown;

use super::submission::{
    Beacon, PayloadKind, SubmissionClient, SubmissionError, SubmissionPayload, SubmissionReceipt,
};

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    NotStarted,
    InProgress,
    Submitting,
    Completed,
    Abandoned,
}

impl ExamPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExamPhase::Completed | ExamPhase::Abandoned)
    }
}

impl std::fmt::Display for ExamPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExamPhase::NotStarted => "not started",
            ExamPhase::InProgress => "in progress",
            ExamPhase::Submitting => "submitting",
            ExamPhase::Completed => "completed",
            ExamPhase::Abandoned => "abandoned",
        };
        write!(f, "{}", s)
    }
}

/// Where a failed submission leaves the attempt.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitFailurePolicy {
    /// Stay in `Submitting` so the caller can retry.
    #[default]
    Stay,
    /// Go back to `InProgress` so the student can keep editing. Ignored for
    /// timed-out attempts.
    Revert,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Cannot {op} while the exam is {phase}")]
    InvalidPhase { op: &'static str, phase: ExamPhase },

    #[error("Question {0} is not part of this exam")]
    UnknownQuestion(QuestionNumber),

    #[error("No cached exam to resume")]
    NoCachedSession,

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Outcome of [`ExamController::request_submit`].
#[derive(Debug, Clone)]
pub struct SubmitCheck {
    pub statuses: Vec<QuestionStatus>,
    pub completed: usize,
    pub outstanding: usize,
    /// The student must confirm before [`ExamController::confirm_submit`].
    pub needs_confirmation: bool,
}

/// Runs one exam attempt: start, answer loop, submission.
///
/// Answers are mirrored in memory and written through to the cache, so a
/// storage fault never loses what the student typed during this run.
pub struct ExamController<S: CacheStore, C: SubmissionClient, B: Beacon> {
    cache: AnswerCache<S>,
    client: C,
    beacon: B,
    phase: ExamPhase,
    session: Option<ExamSession>,
    answers: BTreeMap<QuestionNumber, StudentAnswer>,
    current_question: QuestionNumber,
    marked: BTreeSet<QuestionNumber>,
    forced: bool,
    failure_policy: SubmitFailurePolicy,
    submit_timeout: Duration,
}

impl<S: CacheStore, C: SubmissionClient, B: Beacon> ExamController<S, C, B> {
    pub fn new(cache: AnswerCache<S>, client: C, beacon: B) -> Self {
        Self {
            cache,
            client,
            beacon,
            phase: ExamPhase::NotStarted,
            session: None,
            answers: BTreeMap::new(),
            current_question: 1,
            marked: BTreeSet::new(),
            forced: false,
            failure_policy: SubmitFailurePolicy::default(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    pub fn with_failure_policy(mut self, policy: SubmitFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn phase(&self) -> ExamPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&ExamSession> {
        self.session.as_ref()
    }

    pub fn current_question(&self) -> QuestionNumber {
        self.current_question
    }

    pub fn answer(&self, question_number: QuestionNumber) -> Option<&StudentAnswer> {
        self.answers.get(&question_number)
    }

    #[allow(dead_code)]
    pub fn cache(&self) -> &AnswerCache<S> {
        &self.cache
    }

    /// Begin a new attempt, discarding any cached one.
    pub fn start(&mut self, session: ExamSession) -> Result<(), ControllerError> {
        self.require(ExamPhase::NotStarted, "start")?;

        self.cache.initialize_cache(&session);
        info!(
            "Exam {} {} started ({} questions, {} min)",
            session.exam_type,
            session.exam_num,
            session.question_count(),
            session.duration
        );
        self.session = Some(session);
        self.answers.clear();
        self.current_question = 1;
        self.phase = ExamPhase::InProgress;
        Ok(())
    }

    /// Pick up the cached attempt after a restart.
    pub fn resume(&mut self) -> Result<(), ControllerError> {
        self.require(ExamPhase::NotStarted, "resume")?;

        let cache = self
            .cache
            .load_cache()
            .ok_or(ControllerError::NoCachedSession)?;

        info!(
            "Resuming exam {} {} at question {} ({} answers cached)",
            cache.exam_session.exam_type,
            cache.exam_session.exam_num,
            cache.current_question,
            cache.answers.len()
        );
        self.session = Some(cache.exam_session);
        self.answers = cache.answers;
        self.current_question = cache.current_question;
        self.phase = ExamPhase::InProgress;
        Ok(())
    }

    /// Replace the answer to `question_number`. Last write wins.
    pub fn record_answer(
        &mut self,
        question_number: QuestionNumber,
        text: &str,
    ) -> Result<(), ControllerError> {
        self.require(ExamPhase::InProgress, "record an answer")?;

        let question_id = self
            .session
            .as_ref()
            .and_then(|s| s.question(question_number))
            .map(|q| q.id.clone())
            .ok_or(ControllerError::UnknownQuestion(question_number))?;

        let answer = StudentAnswer::new(question_id, question_number, text);
        self.cache.save_answer(question_number, answer.clone());
        self.answers.insert(question_number, answer);
        Ok(())
    }

    /// Move to `question_number`, clamped to the exam's range.
    pub fn set_current_question(
        &mut self,
        question_number: QuestionNumber,
    ) -> Result<QuestionNumber, ControllerError> {
        self.require(ExamPhase::InProgress, "change question")?;

        let clamped = question_number.clamp(1, self.question_count().max(1));
        self.current_question = clamped;
        self.cache.set_current_question(clamped);
        Ok(clamped)
    }

    pub fn next_question(&mut self) -> Result<QuestionNumber, ControllerError> {
        self.set_current_question(self.current_question.saturating_add(1))
    }

    pub fn previous_question(&mut self) -> Result<QuestionNumber, ControllerError> {
        self.set_current_question(self.current_question.saturating_sub(1))
    }

    /// Flag or unflag a question for review. Returns the new flag.
    pub fn toggle_mark(&mut self, question_number: QuestionNumber) -> Result<bool, ControllerError> {
        self.require(ExamPhase::InProgress, "mark a question")?;
        if question_number == 0 || question_number > self.question_count() {
            return Err(ControllerError::UnknownQuestion(question_number));
        }

        if self.marked.remove(&question_number) {
            Ok(false)
        } else {
            self.marked.insert(question_number);
            Ok(true)
        }
    }

    pub fn question_statuses(&self) -> Vec<QuestionStatus> {
        question_statuses(self.question_count(), &self.answers, &self.marked)
    }

    /// Tally completeness. With nothing outstanding the exam moves straight
    /// to `Submitting`; otherwise it waits for [`Self::confirm_submit`].
    pub fn request_submit(&mut self) -> Result<SubmitCheck, ControllerError> {
        self.require(ExamPhase::InProgress, "request submission")?;

        let statuses = self.question_statuses();
        let completed = statuses.iter().filter(|s| s.completed).count();
        let outstanding = statuses.len() - completed;
        let needs_confirmation = outstanding > 0;

        if !needs_confirmation {
            self.enter_submitting(false);
        }

        Ok(SubmitCheck {
            statuses,
            completed,
            outstanding,
            needs_confirmation,
        })
    }

    /// The student confirmed submitting with unanswered questions.
    pub fn confirm_submit(&mut self) -> Result<(), ControllerError> {
        self.require(ExamPhase::InProgress, "confirm submission")?;
        self.enter_submitting(false);
        Ok(())
    }

    /// The timer ran out. Submits regardless of completeness.
    pub fn on_time_up(&mut self) -> Result<(), ControllerError> {
        self.require(ExamPhase::InProgress, "time out")?;
        warn!("Time is up, submitting exam");
        self.enter_submitting(true);
        Ok(())
    }

    /// Hand the answers to the submission client. The cache is cleared only
    /// once the client acknowledges.
    pub async fn submit(&mut self) -> Result<SubmissionReceipt, ControllerError> {
        self.require(ExamPhase::Submitting, "submit")?;

        let payload = self.build_payload(PayloadKind::Submit);
        let result = match tokio::time::timeout(self.submit_timeout, self.client.submit(&payload))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::Timeout(self.submit_timeout.as_secs())),
        };

        match result {
            Ok(receipt) => {
                info!(
                    "Exam submitted ({} answers, reference {})",
                    payload.answers.len(),
                    receipt.reference
                );
                self.phase = ExamPhase::Completed;
                self.cache.clear_cache();
                Ok(receipt)
            }
            Err(e) => {
                warn!("Submission failed, answers kept in cache: {}", e);
                if self.failure_policy == SubmitFailurePolicy::Revert && !self.forced {
                    self.phase = ExamPhase::InProgress;
                }
                Err(e.into())
            }
        }
    }

    /// The host is going away. Sends a beacon and never blocks.
    pub fn on_unload(&mut self) {
        match self.phase {
            ExamPhase::InProgress => {
                info!("Exam abandoned before submission");
                self.beacon.send(self.build_payload(PayloadKind::Abandon));
                self.phase = ExamPhase::Abandoned;
            }
            ExamPhase::Submitting => {
                self.beacon.send(self.build_payload(PayloadKind::LastResort));
            }
            _ => {}
        }
    }

    /// Countdown for the running attempt, resumed relative to its start time.
    pub fn countdown(&self, now: DateTime<Utc>) -> Option<Countdown> {
        self.session.as_ref().map(|s| {
            Countdown::resume_from(s.duration_secs(), s.timer_enabled, s.start_time, now)
        })
    }

    fn question_count(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.question_count())
    }

    fn enter_submitting(&mut self, forced: bool) {
        self.forced = forced;
        self.phase = ExamPhase::Submitting;
        info!("Exam entering submission (forced: {})", forced);
    }

    fn build_payload(&self, kind: PayloadKind) -> SubmissionPayload {
        let now = Utc::now();
        let (attempt_key, exam_type, exam_num, student_id, elapsed_secs) = match &self.session {
            Some(s) => (
                s.attempt_key(),
                s.exam_type.clone(),
                s.exam_num.clone(),
                s.student_id.clone(),
                (now - s.start_time).num_seconds().max(0) as u64,
            ),
            None => Default::default(),
        };

        SubmissionPayload {
            kind,
            attempt_key,
            exam_type,
            exam_num,
            student_id,
            answers: self.answers.values().cloned().collect(),
            forced: self.forced,
            elapsed_secs,
            submitted_at: now,
        }
    }

    fn require(&self, expected: ExamPhase, op: &'static str) -> Result<(), ControllerError> {
        if self.phase == expected {
            Ok(())
        } else {
            warn!("Rejected '{}' in phase {}", op, self.phase);
            Err(ControllerError::InvalidPhase {
                op,
                phase: self.phase,
            })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock_collaborators::{MockBeacon, MockSubmissionClient};
    use super::*;
    use crate::cache::MemoryStore;
    use crate::models::Question;

    type TestController = ExamController<MemoryStore, MockSubmissionClient, MockBeacon>;

    fn session(count: u32, minutes: u32) -> ExamSession {
        let questions = (1..=count)
            .map(|n| Question::new(format!("q-{n}"), n, format!("question {n}"), "mock", "07"))
            .collect();
        ExamSession::new("mock", "07", minutes, questions).with_student("s-42")
    }

    fn create_test_controller() -> (TestController, MemoryStore, MockSubmissionClient, MockBeacon) {
        let store = MemoryStore::new();
        let client = MockSubmissionClient::default();
        let beacon = MockBeacon::default();
        let controller =
            ExamController::new(AnswerCache::new(store.clone()), client.clone(), beacon.clone());
        (controller, store, client, beacon)
    }

    fn cached_answers(store: &MemoryStore) -> Option<BTreeMap<QuestionNumber, StudentAnswer>> {
        AnswerCache::new(store.clone()).load_cache().map(|c| c.answers)
    }

    #[test]
    fn controller_start_initializes_cache_and_enters_in_progress() {
        let (mut controller, store, _, _) = create_test_controller();
        let s = session(3, 30);

        controller.start(s.clone()).unwrap();

        assert_eq!(controller.phase(), ExamPhase::InProgress);
        let cache = AnswerCache::new(store).load_cache().unwrap();
        assert_eq!(cache.exam_session, s);
        assert!(cache.answers.is_empty());
    }

    #[test]
    fn controller_start_twice_is_rejected() {
        let (mut controller, _, _, _) = create_test_controller();
        controller.start(session(1, 30)).unwrap();

        let result = controller.start(session(1, 30));
        assert!(matches!(
            result,
            Err(ControllerError::InvalidPhase {
                phase: ExamPhase::InProgress,
                ..
            })
        ));
    }

    #[test]
    fn controller_record_answer_replaces_previous() {
        let (mut controller, store, _, _) = create_test_controller();
        controller.start(session(2, 30)).unwrap();

        controller.record_answer(1, "4").unwrap();
        controller.record_answer(1, "5").unwrap();

        assert_eq!(controller.answer(1).unwrap().answer, "5");
        let answers = cached_answers(&store).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[&1].answer, "5");
        assert_eq!(answers[&1].question_id, "q-1");
    }

    #[test]
    fn controller_record_answer_before_start_is_rejected() {
        let (mut controller, store, _, _) = create_test_controller();
        assert!(controller.record_answer(1, "5").is_err());
        assert!(cached_answers(&store).is_none());
    }

    #[test]
    fn controller_record_answer_unknown_question_is_rejected() {
        let (mut controller, _, _, _) = create_test_controller();
        controller.start(session(2, 30)).unwrap();

        assert!(matches!(
            controller.record_answer(3, "x"),
            Err(ControllerError::UnknownQuestion(3))
        ));
    }

    #[test]
    fn controller_record_answer_while_submitting_is_rejected() {
        let (mut controller, store, _, _) = create_test_controller();
        controller.start(session(1, 30)).unwrap();
        controller.record_answer(1, "5").unwrap();
        controller.request_submit().unwrap();
        assert_eq!(controller.phase(), ExamPhase::Submitting);

        assert!(controller.record_answer(1, "6").is_err());
        assert_eq!(cached_answers(&store).unwrap()[&1].answer, "5");
    }

    #[test]
    fn controller_navigation_clamps_and_persists() {
        let (mut controller, store, _, _) = create_test_controller();
        controller.start(session(3, 30)).unwrap();

        assert_eq!(controller.previous_question().unwrap(), 1);
        assert_eq!(controller.set_current_question(10).unwrap(), 3);
        assert_eq!(controller.next_question().unwrap(), 3);
        assert_eq!(controller.previous_question().unwrap(), 2);

        let cache = AnswerCache::new(store).load_cache().unwrap();
        assert_eq!(cache.current_question, 2);
    }

    #[test]
    fn controller_resume_restores_answers_and_position() {
        let (mut first, store, _, _) = create_test_controller();
        first.start(session(3, 30)).unwrap();
        first.record_answer(2, "x").unwrap();
        first.set_current_question(3).unwrap();

        let mut second = ExamController::new(
            AnswerCache::new(store),
            MockSubmissionClient::default(),
            MockBeacon::default(),
        );
        second.resume().unwrap();

        assert_eq!(second.phase(), ExamPhase::InProgress);
        assert_eq!(second.current_question(), 3);
        assert_eq!(second.answer(2).unwrap().answer, "x");
    }

    #[test]
    fn controller_resume_without_cache_fails() {
        let (mut controller, _, _, _) = create_test_controller();
        assert!(matches!(
            controller.resume(),
            Err(ControllerError::NoCachedSession)
        ));
        assert_eq!(controller.phase(), ExamPhase::NotStarted);
    }

    #[test]
    fn controller_toggle_mark_shows_in_statuses() {
        let (mut controller, _, _, _) = create_test_controller();
        controller.start(session(2, 30)).unwrap();

        assert!(controller.toggle_mark(2).unwrap());
        assert!(controller.question_statuses()[1].marked);
        assert!(!controller.toggle_mark(2).unwrap());
        assert!(!controller.question_statuses()[1].marked);
        assert!(controller.toggle_mark(5).is_err());
    }

    #[test]
    fn controller_request_submit_all_complete_enters_submitting() {
        let (mut controller, _, _, _) = create_test_controller();
        controller.start(session(2, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.record_answer(2, "b").unwrap();

        let check = controller.request_submit().unwrap();

        assert!(!check.needs_confirmation);
        assert_eq!(check.completed, 2);
        assert_eq!(controller.phase(), ExamPhase::Submitting);
    }

    #[test]
    fn controller_request_submit_incomplete_requires_confirmation() {
        let (mut controller, _, _, _) = create_test_controller();
        controller.start(session(3, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.record_answer(2, "   ").unwrap();

        let check = controller.request_submit().unwrap();

        assert!(check.needs_confirmation);
        assert_eq!(check.completed, 1);
        assert_eq!(check.outstanding, 2);
        assert_eq!(
            controller.phase(),
            ExamPhase::InProgress,
            "request_submit: incomplete exam must wait for confirmation"
        );

        controller.confirm_submit().unwrap();
        assert_eq!(controller.phase(), ExamPhase::Submitting);
    }

    #[test]
    fn controller_time_up_submits_without_confirmation() {
        let (mut controller, _, _, _) = create_test_controller();
        controller.start(session(3, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();

        controller.on_time_up().unwrap();

        assert_eq!(controller.phase(), ExamPhase::Submitting);
    }

    #[tokio::test]
    async fn controller_submission_failure_preserves_cache() {
        let (mut controller, store, client, _) = create_test_controller();
        controller.start(session(2, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.record_answer(2, "b").unwrap();
        let before = cached_answers(&store).unwrap();

        controller.request_submit().unwrap();
        client.set_failing(true);
        let result = controller.submit().await;

        assert!(matches!(result, Err(ControllerError::Submission(_))));
        assert_eq!(controller.phase(), ExamPhase::Submitting);
        assert_eq!(cached_answers(&store).unwrap(), before);

        client.set_failing(false);
        controller.submit().await.unwrap();
        assert_eq!(controller.phase(), ExamPhase::Completed);
        assert!(cached_answers(&store).is_none());
    }

    #[tokio::test]
    async fn controller_revert_policy_returns_to_in_progress() {
        let (controller, store, client, _) = create_test_controller();
        let mut controller = controller.with_failure_policy(SubmitFailurePolicy::Revert);
        controller.start(session(1, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.request_submit().unwrap();
        client.set_failing(true);

        assert!(controller.submit().await.is_err());

        assert_eq!(controller.phase(), ExamPhase::InProgress);
        controller.record_answer(1, "b").unwrap();
        assert_eq!(cached_answers(&store).unwrap()[&1].answer, "b");
    }

    #[tokio::test]
    async fn controller_revert_policy_ignored_after_time_up() {
        let (controller, _, client, _) = create_test_controller();
        let mut controller = controller.with_failure_policy(SubmitFailurePolicy::Revert);
        controller.start(session(1, 30)).unwrap();
        controller.on_time_up().unwrap();
        client.set_failing(true);

        assert!(controller.submit().await.is_err());
        assert_eq!(controller.phase(), ExamPhase::Submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn controller_submit_times_out() {
        let store = MemoryStore::new();
        let client = MockSubmissionClient {
            hang: true,
            ..Default::default()
        };
        let mut controller =
            ExamController::new(AnswerCache::new(store.clone()), client, MockBeacon::default())
                .with_submit_timeout(Duration::from_secs(5));
        controller.start(session(1, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.request_submit().unwrap();

        let result = controller.submit().await;

        assert!(matches!(
            result,
            Err(ControllerError::Submission(SubmissionError::Timeout(5)))
        ));
        assert!(cached_answers(&store).is_some());
    }

    #[tokio::test]
    async fn controller_forced_submission_includes_partial_answers() {
        let (mut controller, _, client, _) = create_test_controller();
        controller.start(session(3, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.on_time_up().unwrap();

        controller.submit().await.unwrap();

        let submitted = client.submitted();
        assert_eq!(submitted.len(), 1);
        assert!(submitted[0].forced);
        assert_eq!(submitted[0].kind, PayloadKind::Submit);
        assert_eq!(submitted[0].answers.len(), 1);
        assert_eq!(submitted[0].student_id.as_deref(), Some("s-42"));
    }

    #[tokio::test]
    async fn controller_completed_is_terminal() {
        let (mut controller, _, _, beacon) = create_test_controller();
        controller.start(session(1, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.request_submit().unwrap();
        controller.submit().await.unwrap();

        assert!(controller.record_answer(1, "b").is_err());
        assert!(controller.on_time_up().is_err());
        assert!(controller.request_submit().is_err());
        assert!(controller.submit().await.is_err());

        controller.on_unload();
        assert!(beacon.sent().is_empty());
        assert!(controller.phase().is_terminal());
    }

    #[test]
    fn controller_unload_in_progress_abandons_with_beacon() {
        let (mut controller, store, _, beacon) = create_test_controller();
        controller.start(session(2, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();

        controller.on_unload();

        assert_eq!(controller.phase(), ExamPhase::Abandoned);
        let sent = beacon.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, PayloadKind::Abandon);
        assert!(
            cached_answers(&store).is_some(),
            "on_unload: abandoning keeps the cache for a later resume"
        );
        assert!(controller.record_answer(2, "b").is_err());
    }

    #[test]
    fn controller_unload_while_submitting_sends_last_resort() {
        let (mut controller, _, _, beacon) = create_test_controller();
        controller.start(session(1, 30)).unwrap();
        controller.record_answer(1, "a").unwrap();
        controller.on_time_up().unwrap();

        controller.on_unload();

        assert_eq!(controller.phase(), ExamPhase::Submitting);
        let sent = beacon.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, PayloadKind::LastResort);
        assert!(sent[0].forced);
        assert_eq!(sent[0].answers[0].answer, "a");
    }

    #[test]
    fn controller_storage_failure_does_not_lose_answers() {
        let (mut controller, store, _, _) = create_test_controller();
        controller.start(session(2, 30)).unwrap();
        store.set_failing(true);

        controller.record_answer(1, "a").unwrap();
        controller.record_answer(2, "b").unwrap();
        let check = controller.request_submit().unwrap();

        assert_eq!(check.completed, 2);
        assert_eq!(controller.phase(), ExamPhase::Submitting);
    }

    #[test]
    fn controller_countdown_resumes_from_session_start() {
        let (mut controller, _, _, _) = create_test_controller();
        let now = Utc::now();
        let s = session(1, 90).with_start_time(now - chrono::Duration::seconds(1800));
        controller.start(s).unwrap();

        let countdown = controller.countdown(now).unwrap();
        assert_eq!(countdown.remaining(), 3600);
    }

    #[tokio::test]
    async fn controller_thirty_minute_two_question_scenario() {
        let (mut controller, store, client, _) = create_test_controller();
        controller.start(session(2, 30)).unwrap();
        assert_eq!(
            controller.countdown(Utc::now()).unwrap().initial(),
            1800
        );

        controller.record_answer(1, "5").unwrap();

        let check = controller.request_submit().unwrap();
        let completed: Vec<bool> = check.statuses.iter().map(|s| s.completed).collect();
        assert_eq!(completed, vec![true, false]);
        assert!(check.needs_confirmation);

        controller.confirm_submit().unwrap();
        controller.submit().await.unwrap();

        assert_eq!(controller.phase(), ExamPhase::Completed);
        assert!(AnswerCache::new(store).load_cache().is_none());
        assert_eq!(client.submitted()[0].answers[0].answer, "5");
    }
}
