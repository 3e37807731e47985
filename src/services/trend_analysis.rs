// src/services/trend_analysis.rs
use std::sync::Arc;

use crate::gemini_client::{GenerationError, TextGenerator};
use crate::models::Video;

/// Used when the model answers with nothing usable.
pub const EMPTY_ANALYSIS_FALLBACK: &str = "Unable to analyze trends.";
/// Used for every other analysis failure.
pub const FAILED_ANALYSIS_FALLBACK: &str = "Error analyzing trends. Please try again.";

#[derive(Clone)]
pub struct TrendAnalyzer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl TrendAnalyzer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub async fn analyze(&self, region_code: &str, videos: &[Video]) -> Result<String, GenerationError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(GenerationError::gemini_not_configured)?;

        let prompt = build_prompt(region_code, videos);
        generator
            .generate_text(&prompt)
            .await
            .and_then(super::usable_text)
    }

    /// Analysis text for prompt context; failures become a fixed fallback.
    pub async fn analyze_or_fallback(&self, region_code: &str, videos: &[Video]) -> String {
        match self.analyze(region_code, videos).await {
            Ok(text) => text,
            Err(GenerationError::EmptyResponse) => EMPTY_ANALYSIS_FALLBACK.to_string(),
            Err(e) => {
                tracing::error!("Error analyzing trends for {}: {}", region_code, e);
                FAILED_ANALYSIS_FALLBACK.to_string()
            }
        }
    }
}

pub fn video_summary(videos: &[Video]) -> String {
    videos
        .iter()
        .map(|v| format!("- {} ({} views, {} likes)", v.title, v.views, v.likes))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(region_code: &str, videos: &[Video]) -> String {
    format!(
        "Analyze the trending videos in {region} and provide insights about:\n\
         1. Common themes or topics\n\
         2. Content types that are performing well\n\
         3. Engagement patterns\n\
         4. Potential opportunities for content creators\n\
         \n\
         Trending Videos:\n\
         {summary}\n\
         \n\
         Please provide a concise analysis focusing on the most significant trends and patterns.",
        region = region_code,
        summary = video_summary(videos),
    )
}
