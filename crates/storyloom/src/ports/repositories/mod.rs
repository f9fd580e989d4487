//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod collection_repository;
mod image_store;
mod story_repository;

pub use collection_repository::*;
pub use image_store::*;
pub use story_repository::*;
