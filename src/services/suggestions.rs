// src/services/suggestions.rs
use std::sync::Arc;

use crate::gemini_client::{GenerationError, TextGenerator};

/// Region-flavoured follow-up content ideas for a single video.
#[derive(Clone)]
pub struct SuggestionGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl SuggestionGenerator {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub async fn suggest(
        &self,
        title: &str,
        description: &str,
        region_code: &str,
    ) -> Result<String, GenerationError> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            tracing::error!("Gemini API key is not set, cannot generate suggestions");
            GenerationError::gemini_not_configured()
        })?;

        let prompt = build_prompt(title, description, region_code);
        let result = generator
            .generate_text(&prompt)
            .await
            .and_then(super::usable_text);

        if let Err(ref e) = result {
            tracing::error!("Error generating content suggestions: {}", e);
        }
        result
    }
}

pub fn build_prompt(title: &str, description: &str, region_code: &str) -> String {
    format!(
        "Based on this YouTube video trending in {region}:\n\
         Title: {title}\n\
         Description: {description}\n\
         \n\
         Please suggest 3-5 related content ideas that would be particularly appealing to viewers in {region}.\n\
         Consider local trends, cultural context, and regional preferences.\n\
         Format the suggestions as a list of engaging titles with brief descriptions.",
        region = region_code,
        title = title,
        description = description,
    )
}
