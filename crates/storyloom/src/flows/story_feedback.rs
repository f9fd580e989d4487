//! Feedback Provider
//!
//! Story draft -> editorial feedback from a children's literature editor.

use serde::{Deserialize, Serialize};

use super::Flow;
use crate::domain::FlowKind;
use crate::ports::GenerationOptions;
use crate::prompt::{self, PromptTemplate};
use crate::schema::Schema;

/// Feedback request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFeedbackRequest {
    #[serde(default)]
    pub story_draft: String,
}

impl StoryFeedbackRequest {
    pub fn new(story_draft: impl Into<String>) -> Self {
        Self {
            story_draft: story_draft.into(),
        }
    }
}

/// Editorial feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryFeedback {
    pub feedback: String,
}

pub struct StoryFeedbackFlow;

impl Flow for StoryFeedbackFlow {
    type Input = StoryFeedbackRequest;
    type Output = StoryFeedback;

    const KIND: FlowKind = FlowKind::StoryFeedback;

    fn input_schema() -> Schema {
        Schema::new().text("storyDraft", "The draft of the story to be reviewed.")
    }

    fn output_schema() -> Schema {
        Schema::new().text(
            "feedback",
            "Constructive feedback on the story draft, focusing on elements like character \
             development, plot, pacing, and age-appropriateness. Provide actionable suggestions \
             and concrete examples for improvement.",
        )
    }

    fn template() -> PromptTemplate {
        prompt::STORY_FEEDBACK
    }

    fn options() -> GenerationOptions {
        GenerationOptions {
            temperature: Some(0.4),
            ..GenerationOptions::default()
        }
    }
}
