//! Domain Errors
//!
//! Error types for domain operations and generation flows.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::FlowKind;

/// Message shown when the upstream generation service throttles us
pub const RATE_LIMIT_MESSAGE: &str =
    "You have hit the API rate limit. Please wait a moment and try again.";

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }
}

/// A value that does not conform to a declared schema.
///
/// Field names are dotted paths from the root object (`outline.moral`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("expected a JSON object at '{path}'")]
    NotAnObject { path: String },

    #[error("missing required field '{field}'")]
    Missing { field: String },

    #[error("field '{field}' must not be empty")]
    Empty { field: String },

    #[error("field '{field}' must be a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("field '{field}' must be one of [{allowed}], got '{actual}'")]
    NotAllowed {
        field: String,
        allowed: String,
        actual: String,
    },
}

impl SchemaViolation {
    /// Path of the first unsatisfied field
    pub fn field(&self) -> &str {
        match self {
            Self::NotAnObject { path } => path,
            Self::Missing { field }
            | Self::Empty { field }
            | Self::WrongType { field, .. }
            | Self::NotAllowed { field, .. } => field,
        }
    }
}

/// Generation flow errors
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// Request rejected before any external call
    #[error("Invalid input: {0}")]
    InvalidInput(SchemaViolation),

    #[error("Prompt template '{name}' failed to render: {message}")]
    Template { name: String, message: String },

    /// The service call failed outright (network, non-2xx, service exception)
    #[error("Generation service error: {0}")]
    Service(String),

    /// Upstream throttling
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The service answered but the payload was not usable JSON
    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    /// The service answered with JSON missing or emptying required fields
    #[error("Output shape error: {0}")]
    OutputShape(SchemaViolation),
}

impl GenerationError {
    /// Classify a failure message from the generation service.
    pub fn from_service_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if is_rate_limit_text(&message) {
            Self::RateLimited(message)
        } else {
            Self::Service(message)
        }
    }

    /// True when the invocation failed because of upstream throttling.
    ///
    /// Only invocation failures are classified; output failures keep the
    /// flow's generic message even if their text mentions `429`.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Service(message) => is_rate_limit_text(message),
            _ => false,
        }
    }

    /// Stable code for API consumers
    pub fn code(&self) -> &'static str {
        if self.is_rate_limited() {
            return "rate_limited";
        }
        match self {
            Self::InvalidInput(_) => "invalid_input",
            _ => "generation_failed",
        }
    }

    /// User-facing message for a failure in the given flow.
    ///
    /// Output shape failures read the same as invocation failures.
    pub fn user_message(&self, flow: FlowKind) -> String {
        if self.is_rate_limited() {
            return RATE_LIMIT_MESSAGE.to_string();
        }
        match self {
            Self::InvalidInput(violation) => match violation {
                SchemaViolation::Missing { field } | SchemaViolation::Empty { field } => {
                    format!("'{}' is required.", field)
                }
                other => format!("Invalid request: {}.", other),
            },
            _ => flow.failure_message().to_string(),
        }
    }
}

/// `429` anywhere, or `rate limit` / `quota` in any case
pub fn is_rate_limit_text(message: &str) -> bool {
    let lowered = message.to_lowercase();
    message.contains("429") || lowered.contains("rate limit") || lowered.contains("quota")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_429_is_rate_limited() {
        let err = GenerationError::from_service_message("[429 Too Many Requests] slow down");
        assert!(matches!(err, GenerationError::RateLimited(_)));
        assert_eq!(err.user_message(FlowKind::StoryIdeas), RATE_LIMIT_MESSAGE);
    }

    #[test]
    fn test_quota_and_rate_limit_phrases_any_case() {
        assert!(is_rate_limit_text("You exceeded your current QUOTA"));
        assert!(is_rate_limit_text("Rate Limit reached for model"));
        assert!(!is_rate_limit_text("connection reset by peer"));
    }

    #[test]
    fn test_service_error_text_is_checked_too() {
        let err = GenerationError::Service("resource exhausted: quota".to_string());
        assert!(err.is_rate_limited());
        assert_eq!(err.code(), "rate_limited");
    }

    #[test]
    fn test_malformed_output_mentioning_429_is_not_rate_limited() {
        let truncated = format!("{{\"feedback\": \"{}", "a".repeat(4280));
        let parse_err = serde_json::from_str::<serde_json::Value>(&truncated).unwrap_err();
        let err = GenerationError::MalformedOutput(format!("Response is not valid JSON: {}", parse_err));
        assert!(err.to_string().contains("429"));

        assert!(!err.is_rate_limited());
        assert_eq!(err.code(), "generation_failed");
        assert_eq!(
            err.user_message(FlowKind::StoryFeedback),
            FlowKind::StoryFeedback.failure_message()
        );
    }

    #[test]
    fn test_output_shape_with_quota_field_is_not_rate_limited() {
        let err = GenerationError::OutputShape(SchemaViolation::Missing {
            field: "quota".to_string(),
        });
        assert!(!err.is_rate_limited());
        assert_eq!(err.code(), "generation_failed");
    }

    #[test]
    fn test_generic_message_per_flow() {
        let err = GenerationError::from_service_message("500 internal error");
        assert!(matches!(err, GenerationError::Service(_)));
        assert_eq!(
            err.user_message(FlowKind::ExpandOutline),
            "Failed to generate or translate the story."
        );
        assert_eq!(err.code(), "generation_failed");
    }

    #[test]
    fn test_output_shape_reads_like_invocation_failure() {
        let err = GenerationError::OutputShape(SchemaViolation::Empty {
            field: "feedback".to_string(),
        });
        assert_eq!(
            err.user_message(FlowKind::StoryFeedback),
            "Failed to get feedback from the AI model."
        );
    }

    #[test]
    fn test_invalid_input_names_field() {
        let err = GenerationError::InvalidInput(SchemaViolation::Empty {
            field: "outline".to_string(),
        });
        assert_eq!(err.user_message(FlowKind::ExpandOutline), "'outline' is required.");
        assert_eq!(err.code(), "invalid_input");
    }
}
