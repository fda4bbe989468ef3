use anyhow::Result;

use crate::commands::common;
use crate::config::Config;
use crate::exam::ControllerError;

pub async fn execute(config: Config) -> Result<()> {
    let mut controller = common::build_controller(&config);

    match controller.resume() {
        Ok(()) => {
            controller.on_unload();
            common::answer_cache(&config).clear_cache();
            println!("Exam abandoned and cache removed.");
        }
        Err(ControllerError::NoCachedSession) => {
            common::answer_cache(&config).clear_cache();
            println!("No exam in progress.");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
