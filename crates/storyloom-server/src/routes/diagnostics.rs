//! Diagnostics Routes - checks the generation API key end to end

use axum::{extract::State, routing::get, Json, Router};

use storyloom::GenerationService;

use crate::models::DiagnosticResponse;
use crate::AppState;

const CHECK_PROMPT: &str = "Say \"API Key is working!\" if you can see this.";

/// Send a fixed prompt to the generation service
#[utoipa::path(
    get,
    path = "/api/diagnostics/generation",
    responses(
        (status = 200, description = "Diagnostic result (success or failure)", body = DiagnosticResponse)
    ),
    tag = "Diagnostics"
)]
pub async fn check_generation(State(state): State<AppState>) -> Json<DiagnosticResponse> {
    let client = state.flows.service();
    let diagnostic = client.config().key_fingerprint();

    let response = match client.complete_text(CHECK_PROMPT).await {
        Ok(text) => {
            tracing::info!(
                "Generation check succeeded ({}/{})",
                client.provider_name(),
                client.model_id()
            );
            DiagnosticResponse {
                success: true,
                message: Some(text.trim().to_string()),
                error: None,
                diagnostic,
            }
        }
        Err(e) => {
            tracing::warn!("Generation check failed: {}", e);
            DiagnosticResponse {
                success: false,
                message: None,
                error: Some(e.to_string()),
                diagnostic,
            }
        }
    };

    Json(response)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/diagnostics/generation", get(check_generation))
}
