use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ranked video as surfaced to the page and the JSON API.
///
/// Built fresh for every request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub video_id: String,
    pub country: String,
    pub published_at: DateTime<Utc>,
    pub duration_seconds: u64,
    pub duration_formatted: String,
    pub engagement_score: f64,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!(
            "https://www.youtube.com/watch?v={}",
            urlencoding::encode(&self.video_id)
        )
    }
}
