//! Image Store Port
//!
//! Abstract interface for binary cover image storage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, StoryImage};

/// Object storage for story images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store an image; its URL is derived from the stored ID
    async fn put(&self, image: &StoryImage) -> Result<StoryImage, DomainError>;

    /// Fetch an image with its bytes
    async fn get(&self, id: Uuid) -> Result<Option<StoryImage>, DomainError>;
}
