//! Flow Routes - Idea Generator, Outline Expander, Feedback Provider
//!
//! Each handler is a thin wrapper over `StoryFlows`. Failures come back as
//! `{ "error": <code>, "message": <user message> }`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use storyloom::{FlowKind, GenerationError};

use crate::models::{
    ExpandRequest, ExpandResponse, FeedbackRequest, FeedbackResponse, FlowErrorResponse,
    IdeasRequest, IdeasResponse,
};
use crate::AppState;

type FlowError = (StatusCode, Json<FlowErrorResponse>);

/// HTTP status for a generation failure
pub fn status_for(error: &GenerationError) -> StatusCode {
    if error.is_rate_limited() {
        return StatusCode::TOO_MANY_REQUESTS;
    }
    match error {
        GenerationError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn flow_error(flow: FlowKind, error: GenerationError) -> FlowError {
    let status = status_for(&error);
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        tracing::debug!("{} rejected: {}", flow, error);
    } else {
        tracing::warn!("{} failed: {}", flow, error);
    }

    (
        status,
        Json(FlowErrorResponse {
            error: error.code().to_string(),
            message: error.user_message(flow),
        }),
    )
}

fn body_error(rejection: JsonRejection) -> FlowError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(FlowErrorResponse {
            error: "invalid_input".to_string(),
            message: rejection.body_text(),
        }),
    )
}

/// Generate a bilingual story idea and outline
#[utoipa::path(
    post,
    path = "/api/flows/story-ideas",
    request_body = IdeasRequest,
    responses(
        (status = 200, description = "Idea and outline generated", body = IdeasResponse),
        (status = 422, description = "Invalid input", body = FlowErrorResponse),
        (status = 429, description = "Rate limited", body = FlowErrorResponse),
        (status = 502, description = "Generation failed", body = FlowErrorResponse)
    ),
    tag = "Flows"
)]
pub async fn story_ideas(
    State(state): State<AppState>,
    payload: Result<Json<IdeasRequest>, JsonRejection>,
) -> Result<Json<IdeasResponse>, FlowError> {
    let Json(payload) = payload.map_err(body_error)?;

    let idea = state
        .flows
        .generate_story_ideas(&payload.into())
        .await
        .map_err(|e| flow_error(FlowKind::StoryIdeas, e))?;

    Ok(Json(idea.into()))
}

/// Expand an outline into a bilingual story
#[utoipa::path(
    post,
    path = "/api/flows/expand-outline",
    request_body = ExpandRequest,
    responses(
        (status = 200, description = "Story generated", body = ExpandResponse),
        (status = 422, description = "Invalid input", body = FlowErrorResponse),
        (status = 429, description = "Rate limited", body = FlowErrorResponse),
        (status = 502, description = "Generation failed", body = FlowErrorResponse)
    ),
    tag = "Flows"
)]
pub async fn expand_outline(
    State(state): State<AppState>,
    payload: Result<Json<ExpandRequest>, JsonRejection>,
) -> Result<Json<ExpandResponse>, FlowError> {
    let Json(payload) = payload.map_err(body_error)?;

    let story = state
        .flows
        .expand_story_outline(&payload.into())
        .await
        .map_err(|e| flow_error(FlowKind::ExpandOutline, e))?;

    Ok(Json(story.into()))
}

/// Editorial feedback on a story draft
#[utoipa::path(
    post,
    path = "/api/flows/story-feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback generated", body = FeedbackResponse),
        (status = 422, description = "Invalid input", body = FlowErrorResponse),
        (status = 429, description = "Rate limited", body = FlowErrorResponse),
        (status = 502, description = "Generation failed", body = FlowErrorResponse)
    ),
    tag = "Flows"
)]
pub async fn story_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, FlowError> {
    let Json(payload) = payload.map_err(body_error)?;

    let result = state
        .flows
        .provide_story_feedback(&payload.into())
        .await
        .map_err(|e| flow_error(FlowKind::StoryFeedback, e))?;

    Ok(Json(result.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/flows/story-ideas", post(story_ideas))
        .route("/api/flows/expand-outline", post(expand_outline))
        .route("/api/flows/story-feedback", post(story_feedback))
}
