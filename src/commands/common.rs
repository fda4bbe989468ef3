use anyhow::{bail, Result};
use chrono::Utc;
use std::io::Write;

use crate::cache::{AnswerCache, FileStore};
use crate::config::Config;
use crate::exam::{
    ControllerError, ExamController, OutboxBeacon, OutboxSubmitter, SubmitCheck,
};
use crate::models::QuestionStatus;
use crate::timer::format_remaining;

pub type CliController = ExamController<FileStore, OutboxSubmitter, OutboxBeacon>;

pub fn answer_cache(config: &Config) -> AnswerCache<FileStore> {
    AnswerCache::new(FileStore::new(config.cache.path.clone()))
}

pub fn build_controller(config: &Config) -> CliController {
    ExamController::new(
        answer_cache(config),
        OutboxSubmitter::new(config.outbox_path.clone()),
        OutboxBeacon::new(config.outbox_path.clone()),
    )
    .with_failure_policy(config.submit.failure_policy)
    .with_submit_timeout(config.submit_timeout())
}

/// Controller for the cached exam, as after a page reload.
pub fn resume_controller(config: &Config) -> Result<CliController> {
    let mut controller = build_controller(config);
    match controller.resume() {
        Ok(()) => Ok(controller),
        Err(ControllerError::NoCachedSession) => {
            bail!("No exam in progress. Run 'examdesk start' first.")
        }
        Err(e) => Err(e.into()),
    }
}

/// True when the cached exam has a timer and it has run out.
pub fn time_is_up(controller: &CliController) -> bool {
    let timed = controller.session().is_some_and(|s| s.timer_enabled);
    timed
        && controller
            .countdown(Utc::now())
            .is_some_and(|c| c.remaining() == 0)
}

pub fn remaining_text(controller: &CliController) -> String {
    match (controller.session(), controller.countdown(Utc::now())) {
        (Some(s), Some(c)) if s.timer_enabled => format_remaining(c.remaining()),
        _ => "untimed".to_string(),
    }
}

pub fn print_statuses(statuses: &[QuestionStatus], current: u32) {
    let line: Vec<String> = statuses
        .iter()
        .map(|s| {
            if s.question_number == current {
                format!("[{}{}]", s.question_number, s.symbol())
            } else {
                format!("{}{}", s.question_number, s.symbol())
            }
        })
        .collect();
    println!("  {}", line.join(" "));
}

pub fn print_submit_check(check: &SubmitCheck) {
    println!(
        "Answered {} of {} questions.",
        check.completed,
        check.statuses.len()
    );
    if check.outstanding > 0 {
        let missing: Vec<String> = check
            .statuses
            .iter()
            .filter(|s| !s.completed)
            .map(|s| s.question_number.to_string())
            .collect();
        println!("Unanswered: {}", missing.join(", "));
    }
}

/// Ask a yes/no question on stdin. Anything but y/yes is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExamSession, Question};
    use tempfile::TempDir;

    fn test_config(temp: &TempDir) -> Config {
        Config::default()
            .with_cache_path(Some(temp.path().join("cache.json")))
            .with_outbox_path(Some(temp.path().join("outbox")))
    }

    fn session(minutes: u32) -> ExamSession {
        ExamSession::new(
            "mock",
            "07",
            minutes,
            vec![Question::new("q-1", 1, "first", "mock", "07")],
        )
    }

    #[test]
    fn is_yes_accepts_only_affirmatives() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn resume_controller_without_cache_explains() {
        let temp = TempDir::new().unwrap();
        let err = resume_controller(&test_config(&temp)).err().unwrap();
        assert!(err.to_string().contains("examdesk start"));
    }

    #[test]
    fn resume_controller_picks_up_started_exam() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        build_controller(&config).start(session(30)).unwrap();

        let controller = resume_controller(&config).unwrap();
        assert_eq!(controller.session().unwrap().exam_num, "07");
        assert!(!time_is_up(&controller));
    }

    #[test]
    fn time_is_up_for_expired_timed_exam_only() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp);
        let past = Utc::now() - chrono::Duration::hours(2);

        build_controller(&config)
            .start(session(30).with_start_time(past))
            .unwrap();
        assert!(time_is_up(&resume_controller(&config).unwrap()));

        let mut untimed = build_controller(&config);
        untimed
            .start(session(30).with_start_time(past).with_timer(false))
            .unwrap();
        assert!(!time_is_up(&untimed));
        assert_eq!(remaining_text(&untimed), "untimed");
    }
}
