//! Collection Routes

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::domain_error;
use crate::models::CollectedStoryResponse;
use crate::AppState;

/// List the story collection, most recently copied first
#[utoipa::path(
    get,
    path = "/api/collections",
    responses(
        (status = 200, description = "Collected stories", body = Vec<CollectedStoryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Collections"
)]
pub async fn list_collection(
    State(state): State<AppState>,
) -> Result<Json<Vec<CollectedStoryResponse>>, (StatusCode, String)> {
    let copies = state
        .story_service
        .list_collection()
        .await
        .map_err(domain_error)?;

    Ok(Json(copies.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/collections", get(list_collection))
}
