//! Generation Service Port
//!
//! Abstract interface for the hosted LLM that turns an instruction into
//! structured output. Implementations live in the server crate (Gemini);
//! tests use in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::GenerationError;
use crate::domain::value_objects::FlowKind;
use crate::schema::Schema;

/// Options for a generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: Some(0.8),
            max_output_tokens: Some(8192),
        }
    }
}

/// One instruction submitted to the generation service
#[derive(Debug, Clone)]
pub struct GenerationCall {
    pub flow: FlowKind,
    /// Literal instruction text
    pub instruction: String,
    /// Shape the service is asked to conform to
    pub output_schema: Option<Schema>,
    pub options: GenerationOptions,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// Raw structured output, not yet validated against the output schema
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub value: Value,
    /// Model that generated the response
    pub model: String,
    pub usage: TokenUsage,
}

/// Generation service interface
///
/// One synchronous request per call: no retries, no caching. Failures are
/// classified so callers can tell throttling apart from other errors.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Submit an instruction and parse the structured (JSON) response
    async fn generate(&self, call: &GenerationCall) -> Result<GenerationResponse, GenerationError>;

    /// Plain text completion for a single prompt
    async fn complete_text(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
