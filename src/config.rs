// src/config.rs
//! Process-wide configuration, read once at startup from the environment.

use std::str::FromStr;

/// Videos must have strictly more views than this to be listed.
pub const DEFAULT_MIN_VIEWS: u64 = 10_000;
/// Videos shorter than this (in seconds) are dropped.
pub const DEFAULT_MIN_DURATION_SECS: u64 = 300;
/// Weight applied to the raw view count.
pub const DEFAULT_VIEW_WEIGHT: f64 = 0.4;
/// Weight applied to the scaled likes-per-view ratio.
pub const DEFAULT_LIKE_RATIO_WEIGHT: f64 = 0.3;
/// Weight applied to the scaled comments-per-view ratio.
pub const DEFAULT_COMMENT_RATIO_WEIGHT: f64 = 0.3;
/// Per-view ratios are multiplied by this before weighting.
pub const DEFAULT_RATIO_SCALE: f64 = 10_000.0;
pub const DEFAULT_SEARCH_PAGES: usize = 3;
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 50;
/// The videos endpoint accepts at most 50 ids per call.
pub const DEFAULT_DETAIL_BATCH_SIZE: usize = 50;
/// Hard cap on the trending list length.
pub const DEFAULT_TOP_N: usize = 10;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CHAT_HISTORY_CAPACITY: usize = 50;

/// Weights for the engagement score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementWeights {
    pub views: f64,
    pub like_ratio: f64,
    pub comment_ratio: f64,
    pub ratio_scale: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            views: DEFAULT_VIEW_WEIGHT,
            like_ratio: DEFAULT_LIKE_RATIO_WEIGHT,
            comment_ratio: DEFAULT_COMMENT_RATIO_WEIGHT,
            ratio_scale: DEFAULT_RATIO_SCALE,
        }
    }
}

/// Thresholds and paging limits for the trending pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    pub min_views: u64,
    pub min_duration_secs: u64,
    pub weights: EngagementWeights,
    pub search_pages: usize,
    pub search_page_size: u32,
    pub detail_batch_size: usize,
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_views: DEFAULT_MIN_VIEWS,
            min_duration_secs: DEFAULT_MIN_DURATION_SECS,
            weights: EngagementWeights::default(),
            search_pages: DEFAULT_SEARCH_PAGES,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
            detail_batch_size: DEFAULT_DETAIL_BATCH_SIZE,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RankingConfig {
    /// Only the view and duration thresholds can be overridden.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_views: env_or("TRENDING_MIN_VIEWS", defaults.min_views),
            min_duration_secs: env_or("TRENDING_MIN_DURATION_SECS", defaults.min_duration_secs),
            ..defaults
        }
    }

    /// `top_n`, never above [`DEFAULT_TOP_N`].
    pub fn result_limit(&self) -> usize {
        self.top_n.min(DEFAULT_TOP_N)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub bind_addr: String,
    pub chat_history_capacity: usize,
    pub ranking: RankingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            chat_history_capacity: DEFAULT_CHAT_HISTORY_CAPACITY,
            ranking: RankingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Missing API keys are not fatal here; dependent operations report
    /// the misconfiguration when they are called.
    pub fn from_env() -> Self {
        let youtube_api_key = non_empty_var("YOUTUBE_API_KEY");
        if youtube_api_key.is_none() {
            tracing::warn!("YOUTUBE_API_KEY is not set. Trending lookups will return no videos.");
        }

        let gemini_api_key = non_empty_var("GEMINI_API_KEY");
        if gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set. Suggestions and chat will fail.");
        }

        Self {
            youtube_api_key,
            gemini_api_key,
            gemini_model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            bind_addr: non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            chat_history_capacity: env_or("CHAT_HISTORY_CAPACITY", DEFAULT_CHAT_HISTORY_CAPACITY),
            ranking: RankingConfig::from_env(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match non_empty_var(name) {
        Some(raw) => parse_or(name, &raw, default),
        None => default,
    }
}

fn parse_or<T>(name: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={:?}, using {}", name, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_defaults() {
        let ranking = RankingConfig::default();
        assert_eq!(ranking.min_views, 10_000);
        assert_eq!(ranking.min_duration_secs, 300);
        assert_eq!(ranking.search_pages, 3);
        assert_eq!(ranking.search_page_size, 50);
        assert_eq!(ranking.detail_batch_size, 50);
        assert_eq!(ranking.top_n, 10);
        assert_eq!(ranking.weights.views, 0.4);
        assert_eq!(ranking.weights.like_ratio, 0.3);
        assert_eq!(ranking.weights.comment_ratio, 0.3);
        assert_eq!(ranking.weights.ratio_scale, 10_000.0);
    }

    #[test]
    fn test_unparsable_override_keeps_default() {
        assert_eq!(parse_or("CHAT_HISTORY_CAPACITY", "lots", 50usize), 50);
        assert_eq!(parse_or("CHAT_HISTORY_CAPACITY", " 25 ", 50usize), 25);
        assert_eq!(parse_or("TRENDING_MIN_VIEWS", "-5", 10_000u64), 10_000);
    }

    #[test]
    fn test_result_count_cannot_be_raised() {
        std::env::set_var("TRENDING_TOP_N", "25");
        assert_eq!(RankingConfig::from_env().result_limit(), 10);

        let widened = RankingConfig {
            top_n: 25,
            ..RankingConfig::default()
        };
        assert_eq!(widened.result_limit(), 10);

        let narrowed = RankingConfig {
            top_n: 3,
            ..RankingConfig::default()
        };
        assert_eq!(narrowed.result_limit(), 3);
    }
}
