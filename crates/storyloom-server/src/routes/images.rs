//! Image Routes - serves stored cover images
//!
//! Mounted outside the auth layer so image URLs work in `<img>` tags.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use uuid::Uuid;

use super::domain_error;
use crate::AppState;

/// Get image bytes
#[utoipa::path(
    get,
    path = "/api/images/{id}",
    params(
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Image not found")
    ),
    tag = "Images"
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, (StatusCode, String)> {
    let image = state
        .story_service
        .get_image(id)
        .await
        .map_err(domain_error)?
        .ok_or((StatusCode::NOT_FOUND, "Image not found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable".to_string()),
        ],
        image.data,
    )
        .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/images/:id", get(get_image))
}
