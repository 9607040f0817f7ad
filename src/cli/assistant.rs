//! `ask` command

use crate::assistant::AssistantRequest;
use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::services::SummaryService;
use crate::storage::Database;

/// Ask the assistant a question and print the Markdown reply
pub fn handle_ask(db: &Database, settings: &Settings, question: &str) -> ExpenseResult<()> {
    let summaries = SummaryService::new(db).all_texts()?;
    let request = AssistantRequest::prepare(settings, &summaries, question)?;
    eprintln!("Thinking...");
    let reply = request.send()?;
    println!("{}", reply.trim_end());
    Ok(())
}
