//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod story_service;

pub use story_service::{SaveStoryParams, StoryService, MAX_IMAGE_BYTES};
