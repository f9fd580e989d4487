//! Storyloom API Data Models
//!
//! - Flows: idea generation, outline expansion, feedback
//! - Stories: saved bilingual stories, collection, cover images

mod flows;
mod story;

pub use flows::*;
pub use story::*;
