use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{answer, goto, start, submit, take};

#[derive(Parser)]
#[command(name = "examdesk")]
#[command(about = "Exam desk - Take timed exams with a crash-tolerant answer cache")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Exam cache file (overrides config)
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Submission outbox directory (overrides config)
    #[arg(long, global = true)]
    pub outbox: Option<PathBuf>,

    /// Also print info-level logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Begin a new exam attempt, replacing any cached one
    Start(start::Args),

    /// Take the cached exam interactively with a running timer
    Take(take::Args),

    /// Answer a question of the cached exam
    Answer(answer::Args),

    /// Move to a question of the cached exam
    Goto(goto::Args),

    /// Show progress and remaining time of the cached exam
    Status,

    /// Submit the cached exam
    Submit(submit::Args),

    /// Abandon the cached exam and remove it
    Clear,
}
