use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args as ClapArgs;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{self, CliController};
use crate::config::Config;
use crate::exam::ExamPhase;
use crate::timer::{TimerDriver, TimerEvent, TimerHandle, TICK_PERIOD};

#[derive(ClapArgs)]
pub struct Args {
    /// Start with the clock hidden
    #[arg(long)]
    pub hide_clock: bool,
}

const HELP: &str = "\
Type an answer and press Enter to save it for the current question.
  :n / :p      next / previous question
  :g <num>     go to question
  :m           flag current question for review
  :s           show progress
  :pause       pause or resume the clock
  :hide        hide or show the clock
  :submit      submit the exam
  :q           leave without submitting
  :clear       blank the current answer
  :h           this help";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Next,
    Previous,
    Goto(u32),
    Mark,
    Status,
    Pause,
    Hide,
    Submit,
    Quit,
    Help,
    Blank,
    Answer(String),
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Blank;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Answer(line.trim_end_matches(&['\r', '\n'][..]).to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("n"), None) => Input::Next,
        (Some("p"), None) => Input::Previous,
        (Some("g"), Some(num)) => num
            .parse()
            .map(Input::Goto)
            .unwrap_or_else(|_| Input::Invalid(format!("not a question number: {num}"))),
        (Some("m"), None) => Input::Mark,
        (Some("s"), None) => Input::Status,
        (Some("pause"), None) => Input::Pause,
        (Some("hide"), None) => Input::Hide,
        (Some("submit"), None) => Input::Submit,
        (Some("q"), None) => Input::Quit,
        (Some("h"), None) => Input::Help,
        (Some("clear"), None) => Input::Answer(String::new()),
        _ => Input::Invalid(format!("unknown command: {trimmed}")),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The interactive exam page: one controller, one running timer.
struct TakeSession {
    controller: CliController,
    timer: TimerHandle,
    awaiting_confirmation: bool,
}

impl TakeSession {
    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if self.awaiting_confirmation {
            self.awaiting_confirmation = false;
            if !common::is_yes(line) {
                println!("Submission cancelled.");
                return Ok(Flow::Continue);
            }
            self.controller.confirm_submit()?;
            return Ok(self.finish().await);
        }

        match parse_input(line) {
            Input::Next => {
                self.controller.next_question()?;
                self.show_question();
            }
            Input::Previous => {
                self.controller.previous_question()?;
                self.show_question();
            }
            Input::Goto(n) => {
                self.controller.set_current_question(n)?;
                self.show_question();
            }
            Input::Mark => {
                let current = self.controller.current_question();
                let marked = self.controller.toggle_mark(current)?;
                println!(
                    "Question {} {}",
                    current,
                    if marked { "flagged" } else { "unflagged" }
                );
            }
            Input::Status => {
                println!("Time left: {}", self.timer.display());
                common::print_statuses(
                    &self.controller.question_statuses(),
                    self.controller.current_question(),
                );
            }
            Input::Pause => {
                let state = self.timer.toggle_pause();
                println!("Clock {:?}", state);
            }
            Input::Hide => {
                let visible = self.timer.toggle_visibility();
                println!("Clock {}", if visible { "shown" } else { "hidden" });
            }
            Input::Submit => return self.submit().await,
            Input::Quit => {
                self.controller.on_unload();
                println!("Left the exam. Run 'examdesk take' to continue later.");
                return Ok(Flow::Exit);
            }
            Input::Help => println!("{}", HELP),
            Input::Blank => {}
            Input::Answer(text) => {
                if self.controller.phase() == ExamPhase::Submitting {
                    println!("Submission pending; type :submit to retry.");
                } else {
                    let current = self.controller.current_question();
                    self.controller.record_answer(current, &text)?;
                    println!("Saved answer for question {}.", current);
                }
            }
            Input::Invalid(message) => println!("{} (:h for help)", message),
        }

        Ok(Flow::Continue)
    }

    async fn handle_event(&mut self, event: TimerEvent) -> Result<Flow> {
        match event {
            TimerEvent::Warning {
                severity,
                remaining_text,
            } => {
                println!("[{}] {} remaining", severity.label(), remaining_text);
                Ok(Flow::Continue)
            }
            TimerEvent::TimeUp => {
                println!("Time is up! Submitting your exam.");
                self.awaiting_confirmation = false;
                if self.controller.phase() == ExamPhase::InProgress {
                    self.controller.on_time_up()?;
                }
                Ok(self.finish().await)
            }
        }
    }

    /// Submit straight away when the attempt is already past its deadline.
    async fn submit_if_expired(&mut self) -> Result<Flow> {
        if !common::time_is_up(&self.controller) {
            return Ok(Flow::Continue);
        }
        self.handle_event(TimerEvent::TimeUp).await
    }

    async fn submit(&mut self) -> Result<Flow> {
        if self.controller.phase() == ExamPhase::InProgress {
            let check = self.controller.request_submit()?;
            common::print_submit_check(&check);
            if check.needs_confirmation {
                print!("Submit with unanswered questions? [y/N] ");
                std::io::stdout().flush()?;
                self.awaiting_confirmation = true;
                return Ok(Flow::Continue);
            }
        }
        Ok(self.finish().await)
    }

    async fn finish(&mut self) -> Flow {
        match self.controller.submit().await {
            Ok(receipt) => {
                println!("Exam submitted. Reference: {}", receipt.reference);
                Flow::Exit
            }
            Err(e) => {
                println!("{}", e);
                println!("Your answers are still saved; type :submit to retry.");
                Flow::Continue
            }
        }
    }

    fn unload(&mut self) {
        self.controller.on_unload();
    }

    fn show_question(&self) {
        let current = self.controller.current_question();
        let Some(session) = self.controller.session() else {
            return;
        };
        let Some(question) = session.question(current) else {
            return;
        };

        println!(
            "\n[{}] Question {}/{}",
            self.timer.display(),
            current,
            session.question_count()
        );
        println!("{}", question.content);
        if let Some(condition) = &question.condition {
            println!("  Condition: {}", condition);
        }
        for image in &question.images {
            println!("  Image: {}", image);
        }
        if let Some(answer) = self.controller.answer(current) {
            println!("  Your answer: {}", answer.answer);
        }
    }
}

pub async fn execute(args: Args, config: Config) -> Result<()> {
    let controller = common::resume_controller(&config)?;
    let countdown = controller
        .countdown(Utc::now())
        .context("Cached exam has no session")?;

    let (timer, mut events) = TimerDriver::spawn(countdown, TICK_PERIOD);
    if args.hide_clock {
        timer.toggle_visibility();
    }

    let mut page = TakeSession {
        controller,
        timer,
        awaiting_confirmation: false,
    };

    if page.submit_if_expired().await? == Flow::Exit {
        return Ok(());
    }

    println!("{}", HELP);
    page.show_question();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let flow = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => page.handle_line(&line).await,
                None => {
                    page.unload();
                    Ok(Flow::Exit)
                }
            },
            Some(event) = events.recv() => page.handle_event(event).await,
            _ = tokio::signal::ctrl_c() => {
                page.unload();
                println!();
                Ok(Flow::Exit)
            }
        };

        match flow {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}
