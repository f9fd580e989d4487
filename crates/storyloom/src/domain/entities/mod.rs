//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - StoryOutline: characters / setting / plot / moral
//! - Story: one language version of a saved story
//! - CollectedStory: copy of a story in the collection
//! - StoryImage: uploaded cover image

mod collection;
mod image;
mod outline;
mod story;

pub use collection::*;
pub use image::*;
pub use outline::*;
pub use story::*;
