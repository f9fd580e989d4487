//! CollectedStory - A story copied into the story collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Story, StoryOutline};
use crate::domain::value_objects::Language;

/// CollectedStory - Independent copy of a story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectedStory {
    pub id: Uuid,
    /// Story the copy was taken from (the source may since be deleted)
    pub source_story_id: Option<Uuid>,
    pub title: String,
    pub outline: StoryOutline,
    pub content: String,
    pub language: Language,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub copied_at: DateTime<Utc>,
}

impl CollectedStory {
    /// Copy a story into a new collection entry
    pub fn copy_of(story: &Story) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_story_id: Some(story.id),
            title: story.title.clone(),
            outline: story.outline.clone(),
            content: story.content.clone(),
            language: story.language,
            image_url: story.image_url.clone(),
            created_at: story.created_at,
            copied_at: Utc::now(),
        }
    }
}
