//! AI assistant
//!
//! Answers questions about spending by sending the three text summaries and
//! the question to a Gemini model. Replies are Markdown.

pub mod gemini;
pub mod markdown;
pub mod prompt;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::SummaryTexts;

pub const EMPTY_QUESTION_MSG: &str = "Please enter a question to ask Gemini.";
pub const MISSING_KEY_MSG: &str = "Please set your Gemini API key in the Settings.";

/// A validated question, ready to send from a worker thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantRequest {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

impl AssistantRequest {
    /// Check the inputs and build the prompt
    pub fn prepare(
        settings: &Settings,
        summaries: &SummaryTexts,
        question: &str,
    ) -> ExpenseResult<Self> {
        if question.trim().is_empty() {
            return Err(ExpenseError::Validation(EMPTY_QUESTION_MSG.into()));
        }
        if !settings.has_api_key() {
            return Err(ExpenseError::Validation(MISSING_KEY_MSG.into()));
        }
        Ok(Self {
            api_key: settings.api_key.trim().to_string(),
            model: settings.model.clone(),
            prompt: build_prompt(summaries, question),
        })
    }

    /// Blocking call to the model
    pub fn send(&self) -> ExpenseResult<String> {
        GeminiClient::new(&self.api_key, &self.model)?.ask(&self.prompt)
    }
}
