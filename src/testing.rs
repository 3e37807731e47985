//! In-process doubles for the catalog and text generator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::gemini_client::{GenerationError, TextGenerator};
use crate::youtube_client::{
    CatalogError, ContentDetails, SearchPage, ThumbnailInfo, Thumbnails, VideoCatalog, VideoItem,
    VideoSnippet, VideoStatistics,
};

pub fn video_item(id: &str, views: u64, likes: u64, comments: u64, duration: &str) -> VideoItem {
    VideoItem {
        id: id.to_string(),
        snippet: Some(VideoSnippet {
            title: Some(format!("Title {}", id)),
            description: Some(format!("Description of {}", id)),
            thumbnails: Some(Thumbnails {
                default: None,
                medium: None,
                high: Some(ThumbnailInfo {
                    url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
                }),
            }),
            published_at: Some("2024-05-01T10:00:00Z".to_string()),
        }),
        statistics: Some(VideoStatistics {
            view_count: Some(views.to_string()),
            like_count: Some(likes.to_string()),
            comment_count: Some(comments.to_string()),
        }),
        content_details: Some(ContentDetails {
            duration: Some(duration.to_string()),
        }),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pages: Vec<SearchPage>,
    items: Vec<VideoItem>,
    fail_search: bool,
    fail_details: bool,
    search_calls: AtomicUsize,
    page_tokens: Mutex<Vec<Option<String>>>,
    batches: Mutex<Vec<Vec<String>>>,
}

impl FakeCatalog {
    /// Serves `items` through search pages of 50 ids, chained by tokens.
    pub fn with_items(items: Vec<VideoItem>) -> Self {
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let chunks: Vec<&[String]> = ids.chunks(50).collect();
        let pages = if chunks.is_empty() {
            vec![SearchPage::default()]
        } else {
            chunks
                .iter()
                .enumerate()
                .map(|(n, chunk)| SearchPage {
                    video_ids: chunk.to_vec(),
                    next_page_token: (n + 1 < chunks.len()).then(|| format!("page-{}", n + 1)),
                })
                .collect()
        };
        Self::with_pages(pages, items)
    }

    pub fn with_pages(pages: Vec<SearchPage>, items: Vec<VideoItem>) -> Self {
        Self {
            pages,
            items,
            ..Default::default()
        }
    }

    pub fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Default::default()
        }
    }

    pub fn failing_details(items: Vec<VideoItem>) -> Self {
        Self {
            fail_details: true,
            ..Self::with_items(items)
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn page_tokens(&self) -> Vec<Option<String>> {
        self.page_tokens.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }
}

fn upstream_failure() -> CatalogError {
    CatalogError::Api {
        status: 403,
        body: "quotaExceeded".to_string(),
    }
}

#[async_trait]
impl VideoCatalog for FakeCatalog {
    async fn search_page(
        &self,
        _region_code: &str,
        page_token: Option<&str>,
        _max_results: u32,
    ) -> Result<SearchPage, CatalogError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.page_tokens
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));

        if self.fail_search {
            return Err(upstream_failure());
        }
        // a token resumes after the page that handed it out
        let index = match page_token {
            None => Some(0),
            Some(token) => self
                .pages
                .iter()
                .position(|p| p.next_page_token.as_deref() == Some(token))
                .map(|i| i + 1),
        };
        Ok(index
            .and_then(|i| self.pages.get(i))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_videos(&self, ids: &[String], _parts: &str) -> Result<Vec<VideoItem>, CatalogError> {
        self.batches.lock().unwrap().push(ids.to_vec());

        if self.fail_details {
            return Err(upstream_failure());
        }
        Ok(self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }
}

/// Replies with a fixed text (or an empty response when `None`) and
/// records every prompt it receives.
pub struct FakeGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(GenerationError::EmptyResponse)
    }
}
