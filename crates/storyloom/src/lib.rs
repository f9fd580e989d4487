//! Storyloom Domain Library
//!
//! Core types, flows and interfaces for the Storyloom children's story
//! writing assistant.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (StoryOutline, Story, CollectedStory, StoryImage)
//!   - `value_objects/`: Immutable value types (Language, FlowKind)
//!   - `errors/`: Domain and generation error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Story, collection and image storage interfaces
//!   - `services/`: Generation service interface
//!
//! - **Flows** (`flows/`): Idea Generator, Outline Expander, Feedback Provider
//!   - `schema`: declared input/output shapes and their validator
//!   - `prompt`: fixed instruction templates
//!   - `config`: generation service credentials and model settings
//!
//! # Usage
//!
//! ```rust,ignore
//! use storyloom::flows::{StoryFlows, StoryIdeasRequest};
//! use storyloom::Language;
//!
//! let flows = StoryFlows::new(service);
//! let idea = flows
//!     .generate_story_ideas(&StoryIdeasRequest {
//!         themes: "friendship".into(),
//!         keywords: "dragon".into(),
//!         language: Language::En,
//!     })
//!     .await?;
//! ```

pub mod config;
pub mod domain;
pub mod flows;
pub mod ports;
pub mod prompt;
pub mod schema;

// Re-export commonly used types
pub use config::{ConfigError, GenerationConfig};
pub use domain::{
    CollectedStory, DomainError, FlowKind, GenerationError, Language, SchemaViolation, Story,
    StoryImage, StoryOutline, RATE_LIMIT_MESSAGE,
};
pub use flows::{
    ExpandOutlineRequest, ExpandedStory, StoryFeedback, StoryFeedbackRequest, StoryFlows,
    StoryIdea, StoryIdeasRequest,
};
pub use ports::{
    // Repositories
    CollectionRepository,
    // Services
    GenerationCall,
    GenerationOptions,
    GenerationResponse,
    GenerationService,
    ImageStore,
    StoryRepository,
    TokenUsage,
};
pub use schema::{FieldKind, FieldSpec, Schema};
