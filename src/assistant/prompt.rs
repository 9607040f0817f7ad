//! Assistant prompt text

use crate::services::SummaryTexts;

/// Build the grounding prompt for a user question
pub fn build_prompt(summaries: &SummaryTexts, question: &str) -> String {
    format!(
        "You are an expense assistant. Analyze the provided expense summaries to answer the user's question.\n\
         If the question is beyond the scope of these summaries, state that you can only answer questions based on the provided summaries.\n\
         \n\
         {}\n\
         {}\n\
         {}\n\
         \n\
         My question is: {}",
        summaries.monthly, summaries.category, summaries.yearly, question
    )
}
