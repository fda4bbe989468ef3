use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use std::path::PathBuf;

use crate::commands::common;
use crate::config::Config;
use crate::exam::load_questions;
use crate::models::ExamSession;

#[derive(ClapArgs)]
pub struct Args {
    /// JSON file with the question bank
    #[arg(short, long)]
    pub questions: PathBuf,

    /// Exam type to select from the bank
    #[arg(short = 't', long)]
    pub exam_type: String,

    /// Exam number to select from the bank
    #[arg(short = 'n', long)]
    pub exam_num: String,

    /// Student identifier sent with the submission
    #[arg(short, long)]
    pub student: Option<String>,

    /// Exam duration in minutes
    #[arg(short, long, default_value_t = 60)]
    pub duration: u32,

    /// Run without a countdown
    #[arg(long)]
    pub no_timer: bool,
}

pub async fn execute(args: Args, config: Config) -> Result<()> {
    let questions = load_questions(&args.questions, &args.exam_type, &args.exam_num)
        .with_context(|| format!("Failed to load questions from {}", args.questions.display()))?;

    let mut session = ExamSession::new(args.exam_type, args.exam_num, args.duration, questions)
        .with_timer(!args.no_timer);
    if let Some(student) = args.student {
        session = session.with_student(student);
    }

    if common::answer_cache(&config).load_cache().is_some() {
        println!("Replacing the exam that was in progress.");
    }

    let mut controller = common::build_controller(&config);
    controller.start(session)?;

    if let Some(session) = controller.session() {
        println!(
            "Started exam {} {} ({} questions)",
            session.exam_type,
            session.exam_num,
            session.question_count()
        );
        if session.timer_enabled {
            println!("Time limit: {} minutes", session.duration);
        }
        println!("Attempt: {}", session.attempt_key());
    }
    println!("\nRun 'examdesk take' to begin answering");

    Ok(())
}
