use crate::handlers::{api_error, ApiError, CountryQuery};
use crate::AppState;
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use std::sync::Arc;

pub fn suggestion_routes() -> Router {
    Router::new().route("/suggestions/:video_id", get(get_suggestions))
}

/// GET /suggestions/:video_id?country=US
pub async fn get_suggestions(
    Path(video_id): Path<String>,
    Query(params): Query<CountryQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let country_code = params.region();

    // the videos endpoint treats commas as an id list
    if video_id.is_empty() || video_id.contains(',') {
        return Err(api_error(StatusCode::NOT_FOUND, "Video not found"));
    }

    let catalog = state.catalog.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "YouTube API key is not configured",
        )
    })?;

    let items = catalog
        .list_videos(std::slice::from_ref(&video_id), "snippet")
        .await
        .map_err(|e| {
            tracing::error!("Video lookup failed for {}: {}", video_id, e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let Some(video) = items.into_iter().next() else {
        return Err(api_error(StatusCode::NOT_FOUND, "Video not found"));
    };

    let snippet = video.snippet.unwrap_or_default();
    let title = snippet.title.unwrap_or_default();
    let description = snippet.description.unwrap_or_default();

    let suggestions = state
        .suggestions
        .suggest(&title, &description, &country_code)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(json!({ "suggestions": suggestions })))
}
