//! Idea Generator
//!
//! Themes + keywords -> a story idea in Traditional Chinese, its English
//! translation, and an outline in the requested language.

use serde::{Deserialize, Serialize};

use super::Flow;
use crate::domain::{FlowKind, Language, StoryOutline};
use crate::ports::GenerationOptions;
use crate::prompt::{self, PromptTemplate};
use crate::schema::Schema;

/// Idea generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryIdeasRequest {
    /// Themes such as friendship, courage or honesty
    #[serde(default)]
    pub themes: String,
    /// Keywords such as dragons, castles or forests
    #[serde(default)]
    pub keywords: String,
    /// Language of the outline
    pub language: Language,
}

/// Generated idea with its outline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryIdea {
    pub story_idea_chinese: String,
    pub story_idea_english: String,
    pub outline: StoryOutline,
}

impl StoryIdea {
    /// Idea text in the given language
    pub fn idea_in(&self, language: Language) -> &str {
        match language {
            Language::En => &self.story_idea_english,
            Language::Zh => &self.story_idea_chinese,
        }
    }
}

/// Outline shape shared by idea output
pub fn outline_schema() -> Schema {
    Schema::new()
        .text("characters", "The main characters in the story.")
        .text("setting", "The setting or location of the story.")
        .text("plot", "The main plot, problem, or goal of the story.")
        .text("moral", "The moral or ending of the story.")
}

pub struct StoryIdeasFlow;

impl Flow for StoryIdeasFlow {
    type Input = StoryIdeasRequest;
    type Output = StoryIdea;

    const KIND: FlowKind = FlowKind::StoryIdeas;

    fn input_schema() -> Schema {
        Schema::new()
            .text(
                "themes",
                "Themes for the story, such as friendship, courage, or honesty.",
            )
            .text(
                "keywords",
                "Keywords related to the story, such as dragons, castles, or forests.",
            )
            .enumeration(
                "language",
                Language::CODES,
                "The language to generate the outline in.",
            )
    }

    fn output_schema() -> Schema {
        Schema::new()
            .text(
                "storyIdeaChinese",
                "A unique children's story idea in Traditional Chinese, based on the provided \
                 themes and keywords, drawing inspiration from diverse cultural elements in \
                 global folk tales.",
            )
            .text(
                "storyIdeaEnglish",
                "The English translation of the story idea.",
            )
            .object(
                "outline",
                outline_schema(),
                "The summarized outline of the generated story idea, in the requested language.",
            )
    }

    fn template() -> PromptTemplate {
        prompt::STORY_IDEAS
    }

    fn options() -> GenerationOptions {
        GenerationOptions {
            temperature: Some(0.9),
            ..GenerationOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::GenerationError;
    use crate::flows::testing::ScriptedService;
    use crate::flows::StoryFlows;

    fn request() -> StoryIdeasRequest {
        StoryIdeasRequest {
            themes: "friendship courage".to_string(),
            keywords: "dragon castle".to_string(),
            language: Language::En,
        }
    }

    #[tokio::test]
    async fn test_idea_with_complete_outline() {
        let service = ScriptedService::returning(json!({
            "storyIdeaChinese": "一隻害怕飛行的小龍在城堡裡交到了朋友。",
            "storyIdeaEnglish": "A little dragon afraid of flying makes a friend in a castle.",
            "outline": {
                "characters": "Ember the dragon, Princess Lin",
                "setting": "An old mountain castle",
                "plot": "Ember must fly to save Lin's kite",
                "moral": "Friends give us courage"
            }
        }));
        let flows = StoryFlows::new(service.clone());

        let idea = flows.generate_story_ideas(&request()).await.unwrap();

        assert!(!idea.story_idea_english.is_empty());
        assert!(!idea.story_idea_chinese.is_empty());
        assert!(idea.outline.is_complete());
        assert_eq!(idea.idea_in(Language::En), idea.story_idea_english);

        let call = service.last_call();
        assert_eq!(call.flow, FlowKind::StoryIdeas);
        assert!(call.instruction.contains("Themes: friendship courage"));
        assert!(call.instruction.contains("Keywords: dragon castle"));
        assert!(call.instruction.contains("(en;"));
        assert!(call.output_schema.is_some());
    }

    #[tokio::test]
    async fn test_partial_outline_is_rejected() {
        let service = ScriptedService::returning(json!({
            "storyIdeaChinese": "小龍",
            "storyIdeaEnglish": "Little dragon",
            "outline": {"characters": "Ember", "setting": "castle", "plot": "", "moral": "courage"}
        }));
        let flows = StoryFlows::new(service);

        let err = flows.generate_story_ideas(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::OutputShape(ref v) if v.field() == "outline.plot"));
    }

    #[tokio::test]
    async fn test_missing_themes_never_reaches_service() {
        let service = ScriptedService::returning(json!({}));
        let flows = StoryFlows::new(service.clone());

        let mut req = request();
        req.themes = " ".to_string();
        let err = flows.generate_story_ideas(&req).await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidInput(_)));
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rate_limit_passes_through() {
        let service = ScriptedService::failing(GenerationError::from_service_message(
            "Resource has been exhausted (e.g. check quota).",
        ));
        let flows = StoryFlows::new(service);

        let err = flows.generate_story_ideas(&request()).await.unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(
            err.user_message(FlowKind::StoryIdeas),
            crate::domain::RATE_LIMIT_MESSAGE
        );
    }
}
