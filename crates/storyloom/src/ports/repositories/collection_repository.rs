//! Collection Repository Port
//!
//! Abstract interface for the story collection (copies of saved stories).

use async_trait::async_trait;

use crate::domain::{errors::DomainError, CollectedStory};

/// Repository interface for collected story copies
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Store a copy
    async fn add_copy(&self, copy: &CollectedStory) -> Result<CollectedStory, DomainError>;

    /// List copies, most recently copied first
    async fn list(&self) -> Result<Vec<CollectedStory>, DomainError>;
}
