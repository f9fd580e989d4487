//! Story - A saved story in one language
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StoryOutline;
use crate::domain::value_objects::Language;

/// Characters kept in a listing snippet
pub const SNIPPET_CHARS: usize = 150;

/// Story - One language version of a saved story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub outline: StoryOutline,
    pub content: String,
    pub language: Language,
    /// Cover image URL, set by image replacement
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Create a new story with generated ID and timestamp
    pub fn new(title: String, outline: StoryOutline, content: String, language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            outline,
            content,
            language,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    /// Listing preview of the content
    pub fn snippet(&self) -> String {
        snippet(&self.content)
    }
}

/// Truncate by char count (not bytes), appending `...` when cut
pub fn snippet(content: &str) -> String {
    if content.chars().count() > SNIPPET_CHARS {
        let head: String = content.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_is_untouched() {
        assert_eq!(snippet("小貓熊"), "小貓熊");
    }

    #[test]
    fn test_long_content_is_cut_on_chars() {
        let content = "龍".repeat(200);
        let cut = snippet(&content);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SNIPPET_CHARS + 3);
    }
}
