//! Story Repository Port
//!
//! Abstract interface for story persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Language, Story};

/// Repository interface for Story entities
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Insert a new story
    async fn create(&self, story: &Story) -> Result<Story, DomainError>;

    /// Find a story by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Story>, DomainError>;

    /// List stories newest first, optionally for one language
    async fn list(&self, language: Option<Language>) -> Result<Vec<Story>, DomainError>;

    /// Delete a story by ID
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Point a story at a new cover image
    async fn set_image_url(&self, id: Uuid, image_url: &str) -> Result<Story, DomainError>;
}
