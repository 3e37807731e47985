use std::sync::Arc;

use trend_scout::config::AppConfig;
use trend_scout::gemini_client::{GeminiClient, TextGenerator};
use trend_scout::youtube_client::{VideoCatalog, YouTubeClient};
use trend_scout::{app, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let config = AppConfig::from_env();

    let catalog: Option<Arc<dyn VideoCatalog>> = match config.youtube_api_key.clone() {
        Some(api_key) => {
            tracing::info!("Initializing YouTube Data API client...");
            Some(Arc::new(YouTubeClient::new(api_key)))
        }
        None => None,
    };

    let generator: Option<Arc<dyn TextGenerator>> = match config.gemini_api_key.clone() {
        Some(api_key) => {
            tracing::info!("Initializing Gemini client ({})...", config.gemini_model);
            Some(Arc::new(GeminiClient::new(api_key, config.gemini_model.clone())))
        }
        None => None,
    };

    tracing::info!(
        "Ranking: views > {}, duration >= {}s, top {}",
        config.ranking.min_views,
        config.ranking.min_duration_secs,
        config.ranking.result_limit()
    );

    let state = Arc::new(AppState::new(&config, catalog, generator));
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .expect("Server error");
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,trend_scout=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,trend_scout=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Trend Scout starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log level: {}", log_level);

    Ok(())
}
