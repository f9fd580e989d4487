//! Outline Expander
//!
//! Outline -> Traditional Chinese title and full story, plus the English
//! translation of the story.

use serde::{Deserialize, Serialize};

use super::Flow;
use crate::domain::{FlowKind, Language, StoryOutline};
use crate::prompt::{self, PromptTemplate};
use crate::schema::Schema;

/// Outline expansion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandOutlineRequest {
    /// Outline with key plot points, characters, and setting
    #[serde(default)]
    pub outline: String,
}

impl ExpandOutlineRequest {
    pub fn new(outline: impl Into<String>) -> Self {
        Self {
            outline: outline.into(),
        }
    }
}

impl From<&StoryOutline> for ExpandOutlineRequest {
    fn from(outline: &StoryOutline) -> Self {
        Self::new(outline.to_prompt_text())
    }
}

/// Expanded bilingual story
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedStory {
    pub title: String,
    pub full_story_chinese: String,
    pub full_story_english: String,
}

impl ExpandedStory {
    /// Story text in the given language
    pub fn story_in(&self, language: Language) -> &str {
        match language {
            Language::En => &self.full_story_english,
            Language::Zh => &self.full_story_chinese,
        }
    }
}

pub struct ExpandOutlineFlow;

impl Flow for ExpandOutlineFlow {
    type Input = ExpandOutlineRequest;
    type Output = ExpandedStory;

    const KIND: FlowKind = FlowKind::ExpandOutline;

    fn input_schema() -> Schema {
        Schema::new().text(
            "outline",
            "The story outline to expand, with key plot points, characters, and setting.",
        )
    }

    fn output_schema() -> Schema {
        Schema::new()
            .text(
                "title",
                "An engaging title for the children's story, in Traditional Chinese.",
            )
            .text(
                "fullStoryChinese",
                "The full, engaging children's story with vivid descriptions, in Traditional Chinese.",
            )
            .text(
                "fullStoryEnglish",
                "The full, engaging children's story with vivid descriptions, in English.",
            )
    }

    fn template() -> PromptTemplate {
        prompt::EXPAND_OUTLINE
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::GenerationError;
    use crate::flows::testing::ScriptedService;
    use crate::flows::StoryFlows;

    #[tokio::test]
    async fn test_expansion_returns_all_fields() {
        let service = ScriptedService::returning(json!({
            "title": "太陽去哪裡了？",
            "fullStoryChinese": "從前，在一片森林裡，住著一隻叫里歐的小獅子……",
            "fullStoryEnglish": "Once upon a time, in a forest, lived a little lion named Leo..."
        }));
        let flows = StoryFlows::new(service.clone());

        let outline = StoryOutline::new("Leo", "forest", "sun vanished", "friendship");
        let story = flows
            .expand_story_outline(&ExpandOutlineRequest::from(&outline))
            .await
            .unwrap();

        assert!(!story.title.is_empty());
        assert!(!story.full_story_chinese.is_empty());
        assert!(story.story_in(Language::En).starts_with("Once upon a time"));

        let call = service.last_call();
        assert!(call
            .instruction
            .contains("Characters: Leo\nSetting: forest\nPlot: sun vanished\nMoral: friendship"));
    }

    #[tokio::test]
    async fn test_empty_outline_rejected_before_invoking() {
        let service = ScriptedService::returning(json!({}));
        let flows = StoryFlows::new(service.clone());

        let err = flows
            .expand_story_outline(&ExpandOutlineRequest::new(""))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::InvalidInput(ref v) if v.field() == "outline"));
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_translation_is_rejected() {
        let service = ScriptedService::returning(json!({
            "title": "太陽去哪裡了？",
            "fullStoryChinese": "從前……"
        }));
        let flows = StoryFlows::new(service);

        let err = flows
            .expand_story_outline(&ExpandOutlineRequest::new("Characters: Leo"))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::OutputShape(ref v) if v.field() == "fullStoryEnglish"));
        assert_eq!(
            err.user_message(FlowKind::ExpandOutline),
            "Failed to generate or translate the story."
        );
    }
}
