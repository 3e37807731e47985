// YouTube Data API v3 client for region-scoped search and batched video lookups
// Docs: https://developers.google.com/youtube/v3

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("YouTube API request failed: {0}")]
    Http(reqwest::Error),
    #[error("YouTube API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Failed to decode YouTube API response: {0}")]
    Decode(#[from] serde_json::Error),
}

// The request URL carries the API key.
impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Http(e.without_url())
    }
}

/// The catalog operations the trending pipeline and suggestion lookup need.
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    /// One page of video ids for `region_code`, most viewed first.
    async fn search_page(
        &self,
        region_code: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<SearchPage, CatalogError>;

    /// Detail records for up to 50 ids. `parts` is a comma separated list
    /// such as `"snippet,statistics,contentDetails"`.
    async fn list_videos(&self, ids: &[String], parts: &str) -> Result<Vec<VideoItem>, CatalogError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub video_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

// ============================================================================
// Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchResultItem>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultItem {
    pub id: Option<SearchResultId>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResultId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        let video_ids = response
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .collect();

        SearchPage {
            video_ids,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        }
    }
}

/// Raw `videos.list` envelope. Items are decoded one by one so a single
/// malformed record cannot fail the whole batch.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoItem {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Option<Thumbnails>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thumbnails {
    pub default: Option<ThumbnailInfo>,
    pub medium: Option<ThumbnailInfo>,
    pub high: Option<ThumbnailInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThumbnailInfo {
    pub url: String,
}

/// Counts arrive string-encoded; any of them may be hidden by the uploader.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

pub(crate) fn decode_video_items(response: VideoListResponse) -> Vec<VideoItem> {
    response
        .items
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<VideoItem>(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping undecodable video item: {}", e);
                None
            }
        })
        .collect()
}

// ============================================================================
// YouTube Client Implementation
// ============================================================================

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl VideoCatalog for YouTubeClient {
    async fn search_page(
        &self,
        region_code: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<SearchPage, CatalogError> {
        let mut query = vec![
            ("part", "id".to_string()),
            ("type", "video".to_string()),
            ("regionCode", region_code.to_string()),
            ("order", "viewCount".to_string()),
            ("maxResults", max_results.to_string()),
            ("fields", "nextPageToken,items(id(videoId))".to_string()),
        ];

        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response: SearchResponse = self.get_json("search", &query).await?;
        Ok(response.into())
    }

    async fn list_videos(&self, ids: &[String], parts: &str) -> Result<Vec<VideoItem>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = [("part", parts.to_string()), ("id", ids.join(","))];
        let response: VideoListResponse = self.get_json("videos", &query).await?;
        Ok(decode_video_items(response))
    }
}
