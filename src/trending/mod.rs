// src/trending/mod.rs
//! Region-scoped trending videos: paged search, batched detail lookups,
//! threshold filtering and engagement ranking.

pub mod duration;
pub mod scoring;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::RankingConfig;
use crate::models::Video;
use crate::youtube_client::{CatalogError, VideoCatalog, VideoItem};

pub use duration::{format_duration, parse_duration};
pub use scoring::{engagement_score, score_statistics};

const DETAIL_PARTS: &str = "snippet,statistics,contentDetails";

#[derive(Error, Debug)]
pub enum TrendingError {
    #[error("YouTube API key is not configured")]
    NotConfigured,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Why a single catalog item could not become a [`Video`].
#[derive(Error, Debug, PartialEq)]
pub enum ItemError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid publishedAt timestamp {0:?}")]
    InvalidTimestamp(String),
}

#[derive(Clone)]
pub struct TrendingPipeline {
    catalog: Option<Arc<dyn VideoCatalog>>,
    config: RankingConfig,
}

impl TrendingPipeline {
    pub fn new(catalog: Option<Arc<dyn VideoCatalog>>, config: RankingConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Top ranked videos for `region_code`, at most ten of them.
    ///
    /// Never fails: a missing key or any upstream fault is logged and
    /// degrades to an empty list, so callers cannot tell "no data right now"
    /// from "nothing met the filter".
    pub async fn fetch_trending(&self, region_code: &str) -> Vec<Video> {
        tracing::info!("Fetching trending videos for region: {}", region_code);

        match self.try_fetch_trending(region_code).await {
            Ok(videos) => {
                tracing::info!(
                    "Final result: {} videos processed successfully for {}",
                    videos.len(),
                    region_code
                );
                videos
            }
            Err(e) => {
                tracing::error!("Error fetching trending videos for {}: {}", region_code, e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_trending(&self, region_code: &str) -> Result<Vec<Video>, TrendingError> {
        let catalog = self.catalog.as_ref().ok_or(TrendingError::NotConfigured)?;

        let video_ids = self.collect_video_ids(catalog.as_ref(), region_code).await?;
        tracing::info!("Total video IDs collected: {}", video_ids.len());

        if video_ids.is_empty() {
            tracing::info!("No videos found in region {}", region_code);
            return Ok(Vec::new());
        }

        let mut admitted = Vec::new();
        for batch in video_ids.chunks(self.config.detail_batch_size.max(1)) {
            tracing::debug!("Processing batch of {} videos...", batch.len());
            let items = catalog.list_videos(batch, DETAIL_PARTS).await?;
            admitted.extend(items.iter().filter_map(|item| self.admit(item, region_code)));
        }

        Ok(rank(admitted, self.config.result_limit()))
    }

    async fn collect_video_ids(
        &self,
        catalog: &dyn VideoCatalog,
        region_code: &str,
    ) -> Result<Vec<String>, CatalogError> {
        let mut video_ids = Vec::new();
        let mut next_page_token: Option<String> = None;

        for page in 0..self.config.search_pages {
            let result = catalog
                .search_page(
                    region_code,
                    next_page_token.as_deref(),
                    self.config.search_page_size,
                )
                .await?;

            tracing::debug!(
                "Found {} video IDs on page {}",
                result.video_ids.len(),
                page + 1
            );
            video_ids.extend(result.video_ids);

            match result.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        Ok(video_ids)
    }

    /// Applies the view/duration thresholds, then builds the video.
    fn admit(&self, item: &VideoItem, region_code: &str) -> Option<Video> {
        let views = scoring::coerce_count(
            item.statistics
                .as_ref()
                .and_then(|s| s.view_count.as_deref()),
        );
        let duration_seconds = item
            .content_details
            .as_ref()
            .and_then(|c| c.duration.as_deref())
            .map(parse_duration)
            .unwrap_or(0);

        tracing::debug!(
            "Video {}: Views={}, Duration={}s",
            item.id,
            views,
            duration_seconds
        );

        if views <= self.config.min_views || duration_seconds < self.config.min_duration_secs {
            tracing::debug!(
                "Filtered out video {}: Views={}, Duration={}s",
                item.id,
                views,
                duration_seconds
            );
            return None;
        }

        match build_video(item, region_code, views, duration_seconds, &self.config) {
            Ok(video) => {
                tracing::debug!("Added video: {}", video.title);
                Some(video)
            }
            Err(e) => {
                tracing::warn!("Error processing video {}: {}", item.id, e);
                None
            }
        }
    }
}

fn build_video(
    item: &VideoItem,
    region_code: &str,
    views: u64,
    duration_seconds: u64,
    config: &RankingConfig,
) -> Result<Video, ItemError> {
    let snippet = item
        .snippet
        .as_ref()
        .ok_or(ItemError::MissingField("snippet"))?;
    let title = snippet
        .title
        .clone()
        .ok_or(ItemError::MissingField("snippet.title"))?;
    let description = snippet
        .description
        .clone()
        .ok_or(ItemError::MissingField("snippet.description"))?;
    let thumbnail_url = snippet
        .thumbnails
        .as_ref()
        .and_then(|t| t.high.as_ref())
        .map(|t| t.url.clone())
        .ok_or(ItemError::MissingField("snippet.thumbnails.high"))?;
    let published_raw = snippet
        .published_at
        .as_deref()
        .ok_or(ItemError::MissingField("snippet.publishedAt"))?;
    let published_at = DateTime::parse_from_rfc3339(published_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ItemError::InvalidTimestamp(published_raw.to_string()))?;

    let stats = item.statistics.as_ref();

    Ok(Video {
        title,
        description,
        thumbnail_url,
        views,
        likes: scoring::coerce_count(stats.and_then(|s| s.like_count.as_deref())),
        comments: scoring::coerce_count(stats.and_then(|s| s.comment_count.as_deref())),
        video_id: item.id.clone(),
        country: region_code.to_string(),
        published_at,
        duration_seconds,
        duration_formatted: format_duration(duration_seconds),
        engagement_score: score_statistics(stats, &config.weights),
    })
}

/// Highest score first; equal scores keep catalog order.
fn rank(mut videos: Vec<Video>, top_n: usize) -> Vec<Video> {
    videos.sort_by(|a, b| b.engagement_score.total_cmp(&a.engagement_score));
    videos.truncate(top_n);
    videos
}
