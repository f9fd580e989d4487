//! Story Routes - Saved Bilingual Stories
//!
//! HTTP handlers that delegate to StoryService for business logic.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use storyloom::Language;

use super::domain_error;
use crate::application::{SaveStoryParams, MAX_IMAGE_BYTES};
use crate::models::{
    CollectedStoryResponse, ImageUploadForm, ImageUploadResponse, ListStoriesQuery,
    SaveFeedbackRequest, SaveStoryRequest, SavedStoriesResponse, StoryResponse, StorySummary,
};
use crate::AppState;

/// List saved stories, newest first
#[utoipa::path(
    get,
    path = "/api/stories",
    params(ListStoriesQuery),
    responses(
        (status = 200, description = "Saved stories", body = Vec<StorySummary>),
        (status = 400, description = "Unknown language"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stories"
)]
pub async fn list_stories(
    State(state): State<AppState>,
    Query(query): Query<ListStoriesQuery>,
) -> Result<Json<Vec<StorySummary>>, (StatusCode, String)> {
    let language = query
        .language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let stories = state
        .story_service
        .list(language)
        .await
        .map_err(domain_error)?;

    Ok(Json(stories.into_iter().map(Into::into).collect()))
}

/// Save a bilingual story (zh and en documents)
#[utoipa::path(
    post,
    path = "/api/stories",
    request_body = SaveStoryRequest,
    responses(
        (status = 201, description = "Story saved", body = SavedStoriesResponse),
        (status = 400, description = "Missing title or content"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stories"
)]
pub async fn save_story(
    State(state): State<AppState>,
    Json(payload): Json<SaveStoryRequest>,
) -> Result<(StatusCode, Json<SavedStoriesResponse>), (StatusCode, String)> {
    let saved = state
        .story_service
        .save_story(SaveStoryParams {
            title_zh: payload.title_zh,
            title_en: payload.title_en,
            content_zh: payload.content_zh,
            content_en: payload.content_en,
            outline: payload.outline.into(),
        })
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SavedStoriesResponse {
            zh_id: saved.zh.id,
            en_id: saved.en.id,
        }),
    ))
}

/// Save AI feedback as a bilingual story
#[utoipa::path(
    post,
    path = "/api/stories/feedback",
    request_body = SaveFeedbackRequest,
    responses(
        (status = 201, description = "Feedback saved", body = SavedStoriesResponse),
        (status = 400, description = "Empty feedback"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stories"
)]
pub async fn save_feedback(
    State(state): State<AppState>,
    Json(payload): Json<SaveFeedbackRequest>,
) -> Result<(StatusCode, Json<SavedStoriesResponse>), (StatusCode, String)> {
    let saved = state
        .story_service
        .save_feedback(payload.original_title, payload.feedback)
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SavedStoriesResponse {
            zh_id: saved.zh.id,
            en_id: saved.en.id,
        }),
    ))
}

/// Get a story by ID
#[utoipa::path(
    get,
    path = "/api/stories/{id}",
    params(
        ("id" = Uuid, Path, description = "Story ID")
    ),
    responses(
        (status = 200, description = "Story found", body = StoryResponse),
        (status = 404, description = "Story not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stories"
)]
pub async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoryResponse>, (StatusCode, String)> {
    let story = state
        .story_service
        .get(id)
        .await
        .map_err(domain_error)?
        .ok_or((StatusCode::NOT_FOUND, "Story not found".to_string()))?;

    Ok(Json(story.into()))
}

/// Delete a story
#[utoipa::path(
    delete,
    path = "/api/stories/{id}",
    params(
        ("id" = Uuid, Path, description = "Story ID")
    ),
    responses(
        (status = 204, description = "Story deleted"),
        (status = 404, description = "Story not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stories"
)]
pub async fn delete_story(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = state
        .story_service
        .delete(id)
        .await
        .map_err(domain_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Story not found".to_string()))
    }
}

/// Copy a story into the collection
#[utoipa::path(
    post,
    path = "/api/stories/{id}/collect",
    params(
        ("id" = Uuid, Path, description = "Story ID")
    ),
    responses(
        (status = 201, description = "Story copied", body = CollectedStoryResponse),
        (status = 404, description = "Story not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stories"
)]
pub async fn collect_story(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<CollectedStoryResponse>), (StatusCode, String)> {
    let copy = state
        .story_service
        .copy_to_collection(id)
        .await
        .map_err(domain_error)?;

    Ok((StatusCode::CREATED, Json(copy.into())))
}

/// Replace a story's cover image
#[utoipa::path(
    put,
    path = "/api/stories/{id}/image",
    params(
        ("id" = Uuid, Path, description = "Story ID")
    ),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = ImageUploadResponse),
        (status = 400, description = "Missing file or not an image"),
        (status = 404, description = "Story not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stories"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, (StatusCode, String)> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("cover").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        upload = Some((file_name, content_type, data.to_vec()));
    }

    let (file_name, content_type, data) = upload.ok_or((
        StatusCode::BAD_REQUEST,
        "Missing required 'file' field".to_string(),
    ))?;

    let image_url = state
        .story_service
        .replace_image(id, file_name, content_type, data)
        .await
        .map_err(domain_error)?;

    Ok(Json(ImageUploadResponse { image_url }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stories", get(list_stories).post(save_story))
        .route("/api/stories/feedback", post(save_feedback))
        .route("/api/stories/:id", get(get_story).delete(delete_story))
        .route("/api/stories/:id/collect", post(collect_story))
        .route(
            "/api/stories/:id/image",
            put(upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024)),
        )
}
