//! Flow request/response DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use storyloom::{
    ExpandOutlineRequest, ExpandedStory, Language, StoryFeedback, StoryFeedbackRequest, StoryIdea,
    StoryIdeasRequest, StoryOutline,
};

/// Story outline
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OutlineDto {
    #[serde(default)]
    pub characters: String,
    #[serde(default)]
    pub setting: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub moral: String,
}

impl From<StoryOutline> for OutlineDto {
    fn from(outline: StoryOutline) -> Self {
        Self {
            characters: outline.characters,
            setting: outline.setting,
            plot: outline.plot,
            moral: outline.moral,
        }
    }
}

impl From<OutlineDto> for StoryOutline {
    fn from(dto: OutlineDto) -> Self {
        Self {
            characters: dto.characters,
            setting: dto.setting,
            plot: dto.plot,
            moral: dto.moral,
        }
    }
}

/// Idea Generator request
#[derive(Debug, Deserialize, ToSchema)]
pub struct IdeasRequest {
    /// Themes, e.g. "friendship, courage"
    #[serde(default)]
    pub themes: String,
    /// Keywords, e.g. "dragon, castle"
    #[serde(default)]
    pub keywords: String,
    /// Outline language: "en" or "zh"
    #[schema(value_type = String, example = "en")]
    pub language: Language,
}

impl From<IdeasRequest> for StoryIdeasRequest {
    fn from(req: IdeasRequest) -> Self {
        Self {
            themes: req.themes,
            keywords: req.keywords,
            language: req.language,
        }
    }
}

/// Idea Generator response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeasResponse {
    pub story_idea_chinese: String,
    pub story_idea_english: String,
    pub outline: OutlineDto,
}

impl From<StoryIdea> for IdeasResponse {
    fn from(idea: StoryIdea) -> Self {
        Self {
            story_idea_chinese: idea.story_idea_chinese,
            story_idea_english: idea.story_idea_english,
            outline: idea.outline.into(),
        }
    }
}

/// Outline Expander request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpandRequest {
    /// Outline text with characters, setting, plot and moral
    #[serde(default)]
    pub outline: String,
}

impl From<ExpandRequest> for ExpandOutlineRequest {
    fn from(req: ExpandRequest) -> Self {
        Self::new(req.outline)
    }
}

/// Outline Expander response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpandResponse {
    /// Title in Traditional Chinese
    pub title: String,
    pub full_story_chinese: String,
    pub full_story_english: String,
}

impl From<ExpandedStory> for ExpandResponse {
    fn from(story: ExpandedStory) -> Self {
        Self {
            title: story.title,
            full_story_chinese: story.full_story_chinese,
            full_story_english: story.full_story_english,
        }
    }
}

/// Feedback Provider request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default)]
    pub story_draft: String,
}

impl From<FeedbackRequest> for StoryFeedbackRequest {
    fn from(req: FeedbackRequest) -> Self {
        Self::new(req.story_draft)
    }
}

/// Feedback Provider response
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub feedback: String,
}

impl From<StoryFeedback> for FeedbackResponse {
    fn from(result: StoryFeedback) -> Self {
        Self {
            feedback: result.feedback,
        }
    }
}

/// Error body returned by the flow endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FlowErrorResponse {
    /// invalid_input | rate_limited | generation_failed
    pub error: String,
    /// Message suitable for showing to the user
    pub message: String,
}
