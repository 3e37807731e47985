use crate::handlers::CountryQuery;
use crate::models::{is_known_region, Video, REGIONS};
use crate::AppState;
use axum::{
    extract::{Extension, Query},
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn ui_routes() -> Router {
    Router::new().route("/", get(trending_page))
}

pub async fn trending_page(
    Query(params): Query<CountryQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Html<String> {
    let selected_country = params.region();
    if !is_known_region(&selected_country) {
        tracing::warn!("Rendering trending page for unlisted region: {}", selected_country);
    }
    let videos = state.pipeline.fetch_trending(&selected_country).await;
    Html(render_trending_page(&videos, &selected_country))
}

pub fn render_trending_page(videos: &[Video], selected_country: &str) -> String {
    let options: String = REGIONS
        .iter()
        .map(|region| {
            format!(
                r#"<option value="{code}"{selected}>{name}</option>"#,
                code = region.code,
                name = escape_html(region.name),
                selected = if region.code == selected_country { " selected" } else { "" },
            )
        })
        .collect();

    let cards: String = if videos.is_empty() {
        r#"<p class="empty">No trending videos found for this region right now.</p>"#.to_string()
    } else {
        videos
            .iter()
            .enumerate()
            .map(|(rank, video)| render_card(rank + 1, video))
            .collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Trending in {country}</title>
    <style>{style}</style>
</head>
<body data-country="{country}">
    <header class="header">
        <h1>Trending on YouTube</h1>
        <form method="get" action="/">
            <label for="country">Country</label>
            <select id="country" name="country" onchange="this.form.submit()">{options}</select>
        </form>
    </header>
    <main class="layout">
        <section class="videos">{cards}</section>
        <aside class="chat">
            <h2>Ask about trends in {country}</h2>
            <div id="chat-log" class="chat-log"></div>
            <form id="chat-form">
                <textarea id="chat-input" rows="3" placeholder="What content should I make next?"></textarea>
                <button type="submit">Send</button>
            </form>
        </aside>
    </main>
    <script>{script}</script>
</body>
</html>"#,
        country = escape_html(selected_country),
        style = STYLE,
        options = options,
        cards = cards,
        script = SCRIPT,
    )
}

fn render_card(rank: usize, video: &Video) -> String {
    format!(
        r#"
        <article class="card">
            <a href="{watch_url}" target="_blank" rel="noopener">
                <img src="{thumbnail}" alt="{title}" loading="lazy">
            </a>
            <div class="card-body">
                <h3><span class="rank">#{rank}</span> {title}</h3>
                <p class="meta">{views} views &middot; {likes} likes &middot; {comments} comments &middot; {duration}</p>
                <p class="meta">Published {published} &middot; Score {score:.1}</p>
                <button class="ideas" data-video-id="{video_id}">Content ideas</button>
                <pre class="suggestions" id="ideas-{video_id}"></pre>
            </div>
        </article>"#,
        watch_url = escape_html(&video.watch_url()),
        thumbnail = escape_html(&video.thumbnail_url),
        title = escape_html(&video.title),
        rank = rank,
        views = format_count(video.views),
        likes = format_count(video.likes),
        comments = format_count(video.comments),
        duration = escape_html(&video.duration_formatted),
        published = video.published_at.format("%b %d, %Y"),
        score = video.engagement_score,
        video_id = escape_html(&video.video_id),
    )
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `1234567` -> `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0f1419; color: #e8e8e8; line-height: 1.5; }
        .header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; background: #1a1a2e; }
        .header select { margin-left: 0.5rem; padding: 0.3rem; border-radius: 4px; }
        .layout { display: grid; grid-template-columns: 2fr 1fr; gap: 1.5rem; padding: 1.5rem 2rem; }
        .card { display: flex; gap: 1rem; background: #16213e; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
        .card img { width: 240px; border-radius: 6px; }
        .card-body { flex: 1; }
        .rank { color: #ff4d4d; }
        .meta { color: #9aa5b1; font-size: 0.9rem; }
        .ideas, .chat button { margin-top: 0.5rem; padding: 0.4rem 0.8rem; border: none; border-radius: 4px; background: #667eea; color: white; cursor: pointer; }
        .suggestions { white-space: pre-wrap; font-family: inherit; margin-top: 0.5rem; }
        .chat { background: #16213e; border-radius: 8px; padding: 1rem; height: fit-content; position: sticky; top: 1rem; }
        .chat-log { max-height: 420px; overflow-y: auto; margin: 0.75rem 0; white-space: pre-wrap; }
        .chat-log .user { color: #a3bffa; margin-top: 0.5rem; }
        .chat-log .error { color: #ff6b6b; }
        .chat textarea { width: 100%; padding: 0.5rem; border-radius: 4px; }
        .empty { color: #9aa5b1; }
        @media (max-width: 900px) { .layout { grid-template-columns: 1fr; } .card { flex-direction: column; } .card img { width: 100%; } }
"#;

const SCRIPT: &str = r#"
        const country = document.body.dataset.country;

        document.querySelectorAll('.ideas').forEach((button) => {
            button.addEventListener('click', async () => {
                const videoId = button.dataset.videoId;
                const target = document.getElementById('ideas-' + videoId);
                target.textContent = 'Generating ideas...';
                try {
                    const res = await fetch('/suggestions/' + encodeURIComponent(videoId) + '?country=' + encodeURIComponent(country));
                    const data = await res.json();
                    target.textContent = data.suggestions || data.error;
                } catch (err) {
                    target.textContent = 'Request failed: ' + err;
                }
            });
        });

        const log = document.getElementById('chat-log');
        function appendLine(text, cls) {
            const line = document.createElement('div');
            line.className = cls;
            line.textContent = text;
            log.appendChild(line);
            log.scrollTop = log.scrollHeight;
        }

        document.getElementById('chat-form').addEventListener('submit', async (event) => {
            event.preventDefault();
            const input = document.getElementById('chat-input');
            const message = input.value.trim();
            if (!message) return;
            appendLine(message, 'user');
            input.value = '';
            try {
                const res = await fetch('/chat/' + encodeURIComponent(country), {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ message }),
                });
                const data = await res.json();
                if (res.ok) { appendLine(data.response, 'bot'); } else { appendLine(data.error, 'error'); }
            } catch (err) {
                appendLine('Request failed: ' + err, 'error');
            }
        });
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn video(title: &str) -> Video {
        Video {
            title: title.into(),
            description: "desc".into(),
            thumbnail_url: "https://i.ytimg.com/vi/abc/hqdefault.jpg".into(),
            views: 1_234_567,
            likes: 8_900,
            comments: 12,
            video_id: "abc".into(),
            country: "GB".into(),
            published_at: chrono::Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
            duration_seconds: 933,
            duration_formatted: "0:15:33".into(),
            engagement_score: 493_827.5,
        }
    }

    #[test]
    fn test_page_lists_videos_and_selects_country() {
        let html = render_trending_page(&[video("Football highlights")], "GB");
        assert!(html.contains("Football highlights"));
        assert!(html.contains("1,234,567 views"));
        assert!(html.contains("0:15:33"));
        assert!(html.contains("Mar 09, 2024"));
        assert!(html.contains(r#"<option value="GB" selected>United Kingdom</option>"#));
        assert!(html.contains(r#"<option value="US">United States</option>"#));
        assert!(html.contains(r#"data-video-id="abc""#));
        assert!(!html.contains("No trending videos found"));
    }

    #[test]
    fn test_catalog_text_is_escaped() {
        let html = render_trending_page(&[video("<script>alert('x')</script> & more")], "US");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn test_empty_state() {
        let html = render_trending_page(&[], "ZZ");
        assert!(html.contains("No trending videos found"));
        assert!(!html.contains(" selected>"));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
