use anyhow::{bail, Result};
use clap::Args as ClapArgs;

use crate::commands::common;
use crate::config::Config;

#[derive(ClapArgs)]
pub struct Args {
    /// Submit without asking, even with unanswered questions
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn execute(args: Args, config: Config) -> Result<()> {
    let mut controller = common::resume_controller(&config)?;

    if common::time_is_up(&controller) {
        println!("Time is up, submitting the exam as it stands.");
        controller.on_time_up()?;
    } else {
        let check = controller.request_submit()?;
        common::print_submit_check(&check);

        if check.needs_confirmation {
            if !(args.yes || common::confirm("Submit with unanswered questions?")?) {
                println!("Submission cancelled. Your answers are still saved.");
                return Ok(());
            }
            controller.confirm_submit()?;
        }
    }

    match controller.submit().await {
        Ok(receipt) => {
            println!("Exam submitted. Reference: {}", receipt.reference);
            Ok(())
        }
        Err(e) => bail!(
            "{}. Your answers are still saved; run 'examdesk submit' again to retry.",
            e
        ),
    }
}
