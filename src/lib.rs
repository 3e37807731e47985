// lib.rs - Shared state and router for the trending insights service
pub mod config;
pub mod gemini_client;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod trending;
pub mod youtube_client;

#[cfg(test)]
pub(crate) mod testing;

use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use config::AppConfig;
use gemini_client::TextGenerator;
use services::{ChatOrchestrator, InMemoryChatHistory, SuggestionGenerator, TrendAnalyzer};
use trending::TrendingPipeline;
use youtube_client::VideoCatalog;

// AppState holds the injected upstream clients and the components built on them
pub struct AppState {
    pub catalog: Option<Arc<dyn VideoCatalog>>,
    pub generator_configured: bool,
    pub pipeline: TrendingPipeline,
    pub suggestions: SuggestionGenerator,
    pub chat: ChatOrchestrator,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        catalog: Option<Arc<dyn VideoCatalog>>,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let pipeline = TrendingPipeline::new(catalog.clone(), config.ranking.clone());
        let history = Arc::new(InMemoryChatHistory::new(config.chat_history_capacity));
        let chat = ChatOrchestrator::new(
            pipeline.clone(),
            TrendAnalyzer::new(generator.clone()),
            generator.clone(),
            history,
        );

        Self {
            catalog,
            generator_configured: generator.is_some(),
            suggestions: SuggestionGenerator::new(generator),
            pipeline,
            chat,
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::ui::ui_routes())
        .merge(handlers::suggestions::suggestion_routes())
        .merge(handlers::chat::chat_routes())
        .merge(handlers::api::api_routes())
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
