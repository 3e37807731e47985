// src/services/chat_history.rs
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{is_known_region, ChatTurn};

/// Where completed chat turns are kept, keyed by region code.
#[async_trait]
pub trait ChatHistoryStore: Send + Sync {
    async fn append(&self, region_code: &str, turn: ChatTurn);

    /// Oldest turn first.
    async fn read(&self, region_code: &str) -> Vec<ChatTurn>;
}

/// Process-lifetime history holding at most `capacity` turns for each of
/// the listed regions; the oldest turn is evicted first. Turns for any other
/// code are dropped, which bounds the number of keys.
pub struct InMemoryChatHistory {
    capacity: usize,
    turns: RwLock<HashMap<String, VecDeque<ChatTurn>>>,
}

impl InMemoryChatHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            turns: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ChatHistoryStore for InMemoryChatHistory {
    async fn append(&self, region_code: &str, turn: ChatTurn) {
        if self.capacity == 0 {
            return;
        }
        if !is_known_region(region_code) {
            tracing::debug!("Not recording chat history for unlisted region");
            return;
        }

        let mut turns = self.turns.write().await;
        let ring = turns
            .entry(region_code.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity.min(64)));
        while ring.len() >= self.capacity {
            ring.pop_front();
        }
        ring.push_back(turn);
    }

    async fn read(&self, region_code: &str) -> Vec<ChatTurn> {
        self.turns
            .read()
            .await
            .get(region_code)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_evicts_oldest_past_capacity() {
        let store = InMemoryChatHistory::new(2);
        for i in 0..3 {
            store.append("US", ChatTurn::new(format!("q{}", i), format!("a{}", i))).await;
        }

        let turns = store.read("US").await;
        let questions: Vec<&str> = turns.iter().map(|t| t.user_message.as_str()).collect();
        assert_eq!(questions, vec!["q1", "q2"]);
    }

    #[tokio::test]
    async fn test_regions_are_isolated() {
        let store = InMemoryChatHistory::new(10);
        store.append("US", ChatTurn::new("hello", "hi")).await;

        assert_eq!(store.read("US").await.len(), 1);
        assert!(store.read("GB").await.is_empty());
    }

    #[tokio::test]
    async fn test_unlisted_codes_do_not_grow_the_map() {
        let store = InMemoryChatHistory::new(10);
        for i in 0..500 {
            store.append(&format!("X{}", i), ChatTurn::new("hello", "hi")).await;
        }
        store.append(&"Z".repeat(4096), ChatTurn::new("hello", "hi")).await;
        store.append("US", ChatTurn::new("hello", "hi")).await;

        assert_eq!(store.turns.read().await.len(), 1);
        assert!(store.read("X1").await.is_empty());
        assert_eq!(store.read("US").await.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_capacity_keeps_nothing() {
        let store = InMemoryChatHistory::new(0);
        store.append("US", ChatTurn::new("hello", "hi")).await;
        assert!(store.read("US").await.is_empty());
    }
}
