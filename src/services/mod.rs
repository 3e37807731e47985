// src/services/mod.rs
pub mod chat;
pub mod chat_history;
pub mod suggestions;
pub mod trend_analysis;

pub use chat::{ChatError, ChatOrchestrator};
pub use chat_history::{ChatHistoryStore, InMemoryChatHistory};
pub use suggestions::SuggestionGenerator;
pub use trend_analysis::TrendAnalyzer;

use crate::gemini_client::GenerationError;

/// Treats whitespace-only model output as no output.
pub(crate) fn usable_text(text: String) -> Result<String, GenerationError> {
    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}
