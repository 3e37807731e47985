use crate::handlers::CountryQuery;
use crate::models::REGIONS;
use crate::AppState;
use axum::{
    extract::{Extension, Query},
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

pub fn api_routes() -> Router {
    Router::new()
        .route("/api/regions", get(list_regions))
        .route("/api/trending", get(trending_json))
        .route("/api/status", get(api_status))
}

async fn list_regions() -> Json<serde_json::Value> {
    Json(json!({ "regions": REGIONS }))
}

/// GET /api/trending?country=US
async fn trending_json(
    Query(params): Query<CountryQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let country = params.region();
    let videos = state.pipeline.fetch_trending(&country).await;
    Json(json!({ "country": country, "videos": videos }))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    let configured = |yes: bool| if yes { "configured" } else { "not_configured" };
    let ranking = state.pipeline.config();

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "youtube_data_api": configured(state.catalog.is_some()),
            "gemini": configured(state.generator_configured),
        },
        "ranking": {
            "min_views": ranking.min_views,
            "min_duration_secs": ranking.min_duration_secs,
            "top_n": ranking.result_limit(),
            "weights": {
                "views": ranking.weights.views,
                "like_ratio": ranking.weights.like_ratio,
                "comment_ratio": ranking.weights.comment_ratio,
            }
        }
    }))
}
