// src/models/mod.rs
pub mod chat;
pub mod region;
pub mod video;

pub use chat::{ChatRequest, ChatTurn};
pub use region::{is_known_region, Region, DEFAULT_REGION, REGIONS};
pub use video::Video;
