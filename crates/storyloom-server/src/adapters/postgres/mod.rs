//! PostgreSQL Repository Implementations

mod collection_repository;
mod image_store;
mod story_repository;

pub use collection_repository::PgCollectionRepository;
pub use image_store::PgImageStore;
pub use story_repository::PgStoryRepository;
