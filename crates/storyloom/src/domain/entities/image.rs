//! StoryImage - Uploaded cover image for a story

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// StoryImage - Binary image scoped under a story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryImage {
    pub id: Uuid,
    pub story_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl StoryImage {
    pub fn new(story_id: Uuid, file_name: String, content_type: String, data: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            story_id,
            file_name,
            content_type,
            data,
            created_at: Utc::now(),
        }
    }

    /// Path the image is served from
    pub fn url(&self) -> String {
        image_url(self.id)
    }
}

/// Retrievable URL for an image ID
pub fn image_url(image_id: Uuid) -> String {
    format!("/api/images/{}", image_id)
}
