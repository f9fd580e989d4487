//! FlowKind - The generation flows the writer offers

use serde::{Deserialize, Serialize};

/// Generation flow kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Themes + keywords -> bilingual idea and outline
    StoryIdeas,
    /// Outline -> title and bilingual full story
    ExpandOutline,
    /// Story draft -> editorial feedback
    StoryFeedback,
}

impl FlowKind {
    pub fn name(&self) -> &'static str {
        match self {
            FlowKind::StoryIdeas => "story_ideas",
            FlowKind::ExpandOutline => "expand_outline",
            FlowKind::StoryFeedback => "story_feedback",
        }
    }

    /// Generic failure text shown to users when the flow fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            FlowKind::StoryIdeas => "Failed to generate the story idea and outline.",
            FlowKind::ExpandOutline => "Failed to generate or translate the story.",
            FlowKind::StoryFeedback => "Failed to get feedback from the AI model.",
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
