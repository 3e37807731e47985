//! Engagement score: raw reach plus per-view like and comment rates.

use crate::config::EngagementWeights;
use crate::youtube_client::VideoStatistics;

/// `w.views * views + w.like_ratio * (likes / views * scale) + w.comment_ratio * (comments / views * scale)`.
/// Zero views scores zero.
pub fn engagement_score(views: u64, likes: u64, comments: u64, weights: &EngagementWeights) -> f64 {
    if views == 0 {
        return 0.0;
    }

    let views_f = views as f64;
    let like_ratio = likes as f64 / views_f;
    let comment_ratio = comments as f64 / views_f;

    weights.views * views_f
        + weights.like_ratio * (like_ratio * weights.ratio_scale)
        + weights.comment_ratio * (comment_ratio * weights.ratio_scale)
}

/// Scores string-encoded statistics. An absent count reads as 0; a count
/// that is present but not a non-negative integer makes the whole score 0.
pub fn score_statistics(stats: Option<&VideoStatistics>, weights: &EngagementWeights) -> f64 {
    let Some(stats) = stats else {
        return 0.0;
    };

    let counts = (
        parse_count(stats.view_count.as_deref()),
        parse_count(stats.like_count.as_deref()),
        parse_count(stats.comment_count.as_deref()),
    );

    match counts {
        (Some(views), Some(likes), Some(comments)) => engagement_score(views, likes, comments, weights),
        _ => 0.0,
    }
}

/// `None` when the value is present but unparsable.
fn parse_count(raw: Option<&str>) -> Option<u64> {
    match raw {
        None => Some(0),
        Some(s) => s.trim().parse::<u64>().ok(),
    }
}

/// Lenient count coercion for display fields.
pub fn coerce_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}
