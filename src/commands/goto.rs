use anyhow::Result;
use clap::Args as ClapArgs;

use crate::commands::common;
use crate::config::Config;

#[derive(ClapArgs)]
pub struct Args {
    /// Question number (1-based); out-of-range values are clamped
    pub question: u32,
}

pub async fn execute(args: Args, config: Config) -> Result<()> {
    let mut controller = common::resume_controller(&config)?;
    let current = controller.set_current_question(args.question)?;

    if let Some(question) = controller.session().and_then(|s| s.question(current)) {
        println!("Question {}: {}", current, question.content);
        if let Some(condition) = &question.condition {
            println!("  Condition: {}", condition);
        }
        for image in &question.images {
            println!("  Image: {}", image);
        }
    }
    if let Some(answer) = controller.answer(current) {
        println!("  Your answer: {}", answer.answer);
    }
    Ok(())
}
