// src/services/chat.rs
use std::sync::Arc;

use thiserror::Error;

use crate::gemini_client::{GenerationError, TextGenerator};
use crate::models::ChatTurn;
use crate::services::chat_history::ChatHistoryStore;
use crate::services::trend_analysis::TrendAnalyzer;
use crate::trending::TrendingPipeline;

/// Chat failures. Messages never carry the `Error:` marker used by the
/// suggestion path.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("No message provided")]
    EmptyMessage,
    #[error("Gemini API key is not configured")]
    NotConfigured,
    #[error("Unable to generate response")]
    NoResponse,
    #[error("Chat generation failed: {}", upstream_cause(.0))]
    Upstream(#[source] GenerationError),
}

impl ChatError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::EmptyMessage)
    }
}

fn upstream_cause(e: &GenerationError) -> String {
    let message = e.to_string();
    match message.strip_prefix("Error: ") {
        Some(rest) => rest.to_string(),
        None => message,
    }
}

impl From<GenerationError> for ChatError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::NotConfigured { .. } => ChatError::NotConfigured,
            GenerationError::EmptyResponse | GenerationError::Blocked(_) => ChatError::NoResponse,
            other => ChatError::Upstream(other),
        }
    }
}

/// Answers a creator's question with the region's current trends as context.
#[derive(Clone)]
pub struct ChatOrchestrator {
    pipeline: TrendingPipeline,
    analyzer: TrendAnalyzer,
    generator: Option<Arc<dyn TextGenerator>>,
    history: Arc<dyn ChatHistoryStore>,
}

impl ChatOrchestrator {
    pub fn new(
        pipeline: TrendingPipeline,
        analyzer: TrendAnalyzer,
        generator: Option<Arc<dyn TextGenerator>>,
        history: Arc<dyn ChatHistoryStore>,
    ) -> Self {
        Self {
            pipeline,
            analyzer,
            generator,
            history,
        }
    }

    pub async fn chat(&self, region_code: &str, user_message: &str) -> Result<String, ChatError> {
        if user_message.is_empty() {
            tracing::warn!("No message provided in chat request for {}", region_code);
            return Err(ChatError::EmptyMessage);
        }

        let generator = self.generator.as_ref().ok_or_else(|| {
            tracing::error!("Gemini API key is not configured");
            ChatError::NotConfigured
        })?;

        tracing::info!("Fetching trending videos for chat context in {}", region_code);
        let videos = self.pipeline.fetch_trending(region_code).await;
        if videos.is_empty() {
            tracing::warn!("No trending videos found for context in {}", region_code);
        }

        let context = self.analyzer.analyze_or_fallback(region_code, &videos).await;
        let prompt = build_prompt(region_code, &context, user_message);

        let reply = generator
            .generate_text(&prompt)
            .await
            .and_then(super::usable_text)
            .map_err(|e| {
                tracing::error!("Chat generation failed for {}: {}", region_code, e);
                ChatError::from(e)
            })?;

        self.history
            .append(region_code, ChatTurn::new(user_message, reply.clone()))
            .await;
        tracing::info!("Successfully generated chat response for {}", region_code);

        Ok(reply)
    }

    pub async fn history(&self, region_code: &str) -> Vec<ChatTurn> {
        self.history.read(region_code).await
    }
}

pub fn build_prompt(region_code: &str, context: &str, user_message: &str) -> String {
    format!(
        "Based on the current trending videos in {region}:\n\
         \n\
         Context about current trends:\n\
         {context}\n\
         \n\
         User question: {message}\n\
         \n\
         Please provide a helpful response focusing on trends and content-creation opportunities in {region}.",
        region = region_code,
        context = context,
        message = user_message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingConfig;
    use crate::services::chat_history::InMemoryChatHistory;
    use crate::testing::{video_item, FakeCatalog, FakeGenerator};
    use crate::youtube_client::VideoCatalog;

    fn orchestrator(
        catalog: Arc<FakeCatalog>,
        generator: Option<Arc<FakeGenerator>>,
    ) -> ChatOrchestrator {
        let generator: Option<Arc<dyn TextGenerator>> =
            generator.map(|g| g as Arc<dyn TextGenerator>);
        let pipeline = TrendingPipeline::new(
            Some(catalog as Arc<dyn VideoCatalog>),
            RankingConfig::default(),
        );
        ChatOrchestrator::new(
            pipeline,
            TrendAnalyzer::new(generator.clone()),
            generator,
            Arc::new(InMemoryChatHistory::new(10)),
        )
    }

    #[tokio::test]
    async fn test_empty_message_skips_pipeline() {
        let catalog = Arc::new(FakeCatalog::with_items(Vec::new()));
        let generator = Arc::new(FakeGenerator::replying("hi"));
        let chat = orchestrator(catalog.clone(), Some(generator.clone()));

        let err = chat.chat("US", "").await.unwrap_err();

        assert!(matches!(err, ChatError::EmptyMessage));
        assert!(err.is_client_error());
        assert_eq!(catalog.search_calls(), 0);
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_embeds_analysis_and_question() {
        let catalog = Arc::new(FakeCatalog::with_items(vec![video_item("a", 80_000, 500, 20, "PT9M")]));
        let generator = Arc::new(FakeGenerator::replying("Try shorts about cooking."));
        let chat = orchestrator(catalog.clone(), Some(generator.clone()));

        let reply = chat.chat("BR", "What should I film next?").await.unwrap();

        assert_eq!(reply, "Try shorts about cooking.");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 2);
        // first the trend analysis, then the chat prompt carrying its output
        assert!(prompts[0].contains("- Title a (80000 views, 500 likes)"));
        assert!(prompts[1].contains("Context about current trends:\nTry shorts about cooking."));
        assert!(prompts[1].contains("User question: What should I film next?"));
        assert!(prompts[1].contains("content-creation opportunities in BR"));

        let history = chat.history("BR").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_message, "What should I film next?");
    }

    #[tokio::test]
    async fn test_empty_trending_result_is_tolerated() {
        let catalog = Arc::new(FakeCatalog::failing_search());
        let generator = Arc::new(FakeGenerator::replying("General advice."));
        let chat = orchestrator(catalog, Some(generator));

        assert_eq!(chat.chat("MX", "Ideas?").await.unwrap(), "General advice.");
    }

    #[tokio::test]
    async fn test_no_text_is_server_fault_without_marker() {
        let catalog = Arc::new(FakeCatalog::with_items(Vec::new()));
        let chat = orchestrator(catalog, Some(Arc::new(FakeGenerator::silent())));

        let err = chat.chat("US", "Hello?").await.unwrap_err();

        assert!(matches!(err, ChatError::NoResponse));
        assert!(!err.is_client_error());
        assert!(!err.to_string().starts_with("Error:"));
        assert!(chat.history("US").await.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_generator_checked_before_fetch() {
        let catalog = Arc::new(FakeCatalog::with_items(Vec::new()));
        let chat = orchestrator(catalog.clone(), None);

        assert!(matches!(chat.chat("US", "Hello?").await, Err(ChatError::NotConfigured)));
        assert_eq!(catalog.search_calls(), 0);
    }

    #[test]
    fn test_upstream_errors_map_to_server_faults() {
        let err = ChatError::from(GenerationError::Api {
            status: 429,
            body: "quota".into(),
        });
        assert!(matches!(err, ChatError::Upstream(_)));
        assert_eq!(
            err.to_string(),
            "Chat generation failed: Gemini API returned 429: quota"
        );
        assert!(matches!(
            ChatError::from(GenerationError::Blocked("SAFETY".into())),
            ChatError::NoResponse
        ));
    }
}
