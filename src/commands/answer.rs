use anyhow::{bail, Result};
use clap::Args as ClapArgs;

use crate::commands::common;
use crate::config::Config;

#[derive(ClapArgs)]
pub struct Args {
    /// Question number (1-based)
    pub question: u32,

    /// Answer text; an empty string clears the answer
    pub text: String,
}

pub async fn execute(args: Args, config: Config) -> Result<()> {
    let mut controller = common::resume_controller(&config)?;

    if common::time_is_up(&controller) {
        bail!("Time is up. Run 'examdesk submit' to hand in the exam.");
    }

    controller.record_answer(args.question, &args.text)?;
    controller.set_current_question(args.question)?;

    println!(
        "Saved answer for question {} ({} left)",
        args.question,
        common::remaining_text(&controller)
    );
    Ok(())
}
