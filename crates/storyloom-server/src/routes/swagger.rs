//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use super::health::HealthCheck;
use crate::models::{
    CollectedStoryResponse,
    DiagnosticResponse,
    ExpandRequest,
    ExpandResponse,
    FeedbackRequest,
    FeedbackResponse,
    FlowErrorResponse,
    // Flow models
    IdeasRequest,
    IdeasResponse,
    ImageUploadForm,
    ImageUploadResponse,
    OutlineDto,
    SaveFeedbackRequest,
    // Story models
    SaveStoryRequest,
    SavedStoriesResponse,
    StoryResponse,
    StorySummary,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health_check,
        // Flow endpoints
        super::flows::story_ideas,
        super::flows::expand_outline,
        super::flows::story_feedback,
        // Story endpoints
        super::stories::list_stories,
        super::stories::save_story,
        super::stories::save_feedback,
        super::stories::get_story,
        super::stories::delete_story,
        super::stories::collect_story,
        super::stories::upload_image,
        // Collection endpoints
        super::collections::list_collection,
        // Image endpoints
        super::images::get_image,
        // Diagnostics
        super::diagnostics::check_generation,
    ),
    info(
        title = "Storyloom API",
        version = "0.1.0",
        description = "Children's story writing assistant\n\nGenerates bilingual (Traditional Chinese / English) story ideas, outlines, full stories and editorial feedback.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Flows", description = "Flows - Idea Generator, Outline Expander, Feedback Provider"),
        (name = "Stories", description = "Stories - Saved bilingual stories and cover images"),
        (name = "Collections", description = "Collections - Copies of saved stories"),
        (name = "Images", description = "Images - Stored cover images"),
        (name = "Diagnostics", description = "Diagnostics - Generation API key check"),
    ),
    components(
        schemas(
            HealthCheck,
            // Flows
            OutlineDto,
            IdeasRequest,
            IdeasResponse,
            ExpandRequest,
            ExpandResponse,
            FeedbackRequest,
            FeedbackResponse,
            FlowErrorResponse,
            // Stories
            SaveStoryRequest,
            SaveFeedbackRequest,
            SavedStoriesResponse,
            StorySummary,
            StoryResponse,
            CollectedStoryResponse,
            ImageUploadForm,
            ImageUploadResponse,
            // Diagnostics
            DiagnosticResponse,
        )
    ),
)]
pub struct ApiDoc;
