// src/handlers/mod.rs
pub mod api;
pub mod chat;
pub mod suggestions;
pub mod ui;

use crate::models::DEFAULT_REGION;
use axum::{http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::json;

pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

#[derive(Debug, Default, Deserialize)]
pub struct CountryQuery {
    pub country: Option<String>,
}

impl CountryQuery {
    /// The requested region, `US` when absent or blank.
    pub fn region(&self) -> String {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_REGION)
            .to_string()
    }
}
