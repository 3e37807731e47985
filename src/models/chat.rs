// src/models/chat.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /chat/:country_code`. A missing `message` is treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// One completed exchange in a region's chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub user_message: String,
    pub reply: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(user_message: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            reply: reply.into(),
            created_at: Utc::now(),
        }
    }
}
