//! Story, collection and image DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use storyloom::{CollectedStory, Story};

use super::OutlineDto;

/// Save a bilingual story
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveStoryRequest {
    pub title_zh: String,
    pub title_en: String,
    pub content_zh: String,
    pub content_en: String,
    #[serde(default)]
    pub outline: OutlineDto,
}

/// Save AI feedback as a story
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveFeedbackRequest {
    /// Title of the story the feedback is about
    pub original_title: Option<String>,
    pub feedback: String,
}

/// IDs of the two saved language versions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavedStoriesResponse {
    pub zh_id: Uuid,
    pub en_id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListStoriesQuery {
    /// "en" or "zh"; all languages when omitted
    pub language: Option<String>,
}

/// Story listing entry
#[derive(Debug, Serialize, ToSchema)]
pub struct StorySummary {
    pub id: Uuid,
    pub title: String,
    /// First 150 characters of the content
    pub snippet: String,
    pub language: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Story> for StorySummary {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            snippet: story.snippet(),
            title: story.title,
            language: story.language.code().to_string(),
            image_url: story.image_url,
            created_at: story.created_at,
        }
    }
}

/// Full story
#[derive(Debug, Serialize, ToSchema)]
pub struct StoryResponse {
    pub id: Uuid,
    pub title: String,
    pub outline: OutlineDto,
    pub content: String,
    pub language: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            title: story.title,
            outline: story.outline.into(),
            content: story.content,
            language: story.language.code().to_string(),
            image_url: story.image_url,
            created_at: story.created_at,
        }
    }
}

/// Story copy in the collection
#[derive(Debug, Serialize, ToSchema)]
pub struct CollectedStoryResponse {
    pub id: Uuid,
    pub source_story_id: Option<Uuid>,
    pub title: String,
    pub snippet: String,
    pub content: String,
    pub language: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub copied_at: DateTime<Utc>,
}

impl From<CollectedStory> for CollectedStoryResponse {
    fn from(copy: CollectedStory) -> Self {
        Self {
            id: copy.id,
            source_story_id: copy.source_story_id,
            snippet: storyloom::domain::snippet(&copy.content),
            title: copy.title,
            content: copy.content,
            language: copy.language.code().to_string(),
            image_url: copy.image_url,
            created_at: copy.created_at,
            copied_at: copy.copied_at,
        }
    }
}

/// Multipart cover image upload
#[derive(Debug, ToSchema)]
pub struct ImageUploadForm {
    /// Image file (image/*)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageUploadResponse {
    pub image_url: String,
}

/// Generation service diagnostic
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Masked key description: length, first and last four characters
    pub diagnostic: String,
}
