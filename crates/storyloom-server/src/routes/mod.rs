//! Storyloom API Routes
//!
//! - /health - Liveness check
//! - /api/flows/* - Idea Generator, Outline Expander, Feedback Provider
//! - /api/stories - Saved bilingual stories and cover images
//! - /api/collections - Story collection
//! - /api/images/:id - Cover image bytes (public)
//! - /api/diagnostics/generation - Generation key check

use axum::http::StatusCode;
use storyloom::DomainError;

pub mod collections;
pub mod diagnostics;
pub mod flows;
pub mod health;
pub mod images;
pub mod stories;
pub mod swagger;

/// Map a domain error to an HTTP status and message
pub(crate) fn domain_error(e: DomainError) -> (StatusCode, String) {
    match e {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        _ => {
            tracing::error!("Storage failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
