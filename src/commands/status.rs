use anyhow::Result;

use crate::commands::common;
use crate::config::Config;

pub async fn execute(config: Config) -> Result<()> {
    let Some(cache) = common::answer_cache(&config).load_cache() else {
        println!("No exam in progress.");
        return Ok(());
    };

    let controller = common::resume_controller(&config)?;
    let session = &cache.exam_session;

    println!("Exam: {} {}", session.exam_type, session.exam_num);
    if let Some(student) = &session.student_id {
        println!("Student: {}", student);
    }
    println!("Started: {}", session.start_time.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Remaining: {}", common::remaining_text(&controller));
    println!("Last saved: {}", cache.last_saved.format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "Answered: {} of {}",
        cache.answered_count(),
        session.question_count()
    );
    println!("\nQuestions:");
    common::print_statuses(&controller.question_statuses(), cache.current_question);

    Ok(())
}
