//! Flow Orchestrators
//!
//! Each flow is one linear path with a single failure exit:
//!
//! 1. serialize the request and validate it against the input schema
//!    (nothing is sent upstream when this fails)
//! 2. render the flow's prompt template
//! 3. invoke the generation service once
//! 4. validate the response against the output schema
//! 5. map it into the flow's output type
//!
//! Flows are stateless; identical input may produce different output.

mod expand_outline;
mod story_feedback;
mod story_ideas;

pub use expand_outline::*;
pub use story_feedback::*;
pub use story_ideas::*;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::errors::GenerationError;
use crate::domain::value_objects::FlowKind;
use crate::ports::{GenerationCall, GenerationOptions, GenerationService};
use crate::prompt::PromptTemplate;
use crate::schema::Schema;

/// A request/response generation operation
pub trait Flow {
    type Input: Serialize + Sync;
    type Output: DeserializeOwned;

    const KIND: FlowKind;

    fn input_schema() -> Schema;
    fn output_schema() -> Schema;
    fn template() -> PromptTemplate;

    fn options() -> GenerationOptions {
        GenerationOptions::default()
    }
}

/// Check that every template placeholder is an input schema field
pub fn check_flow<F: Flow>() -> Result<(), String> {
    let missing = F::template().unsatisfied_by(&F::input_schema());
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "template '{}' references fields not in the {} input schema: {}",
            F::template().name,
            F::KIND,
            missing.join(", ")
        ))
    }
}

/// Check all three flows (run at startup)
pub fn check_templates() -> Result<(), String> {
    check_flow::<StoryIdeasFlow>()?;
    check_flow::<ExpandOutlineFlow>()?;
    check_flow::<StoryFeedbackFlow>()
}

/// Story generation flows bound to a generation service
pub struct StoryFlows<G: GenerationService> {
    service: Arc<G>,
}

impl<G: GenerationService> Clone for StoryFlows<G> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<G: GenerationService> StoryFlows<G> {
    pub fn new(service: Arc<G>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &G {
        &self.service
    }

    /// Themes + keywords -> bilingual idea and outline
    pub async fn generate_story_ideas(
        &self,
        request: &StoryIdeasRequest,
    ) -> Result<StoryIdea, GenerationError> {
        self.run::<StoryIdeasFlow>(request).await
    }

    /// Outline -> title and bilingual full story
    pub async fn expand_story_outline(
        &self,
        request: &ExpandOutlineRequest,
    ) -> Result<ExpandedStory, GenerationError> {
        self.run::<ExpandOutlineFlow>(request).await
    }

    /// Draft -> editorial feedback
    pub async fn provide_story_feedback(
        &self,
        request: &StoryFeedbackRequest,
    ) -> Result<StoryFeedback, GenerationError> {
        self.run::<StoryFeedbackFlow>(request).await
    }

    /// Validate, render, invoke, validate, map
    pub async fn run<F: Flow>(&self, input: &F::Input) -> Result<F::Output, GenerationError> {
        let template = F::template();

        let fields = serde_json::to_value(input).map_err(|e| GenerationError::Template {
            name: template.name.to_string(),
            message: e.to_string(),
        })?;

        F::input_schema().validate(&fields).map_err(|violation| {
            tracing::warn!("{} rejected input: {}", F::KIND, violation);
            GenerationError::InvalidInput(violation)
        })?;

        let instruction = template.render(&fields)?;
        tracing::debug!(
            "{} prompt rendered from '{}' ({} chars)",
            F::KIND,
            template.name,
            instruction.len()
        );

        let output_schema = F::output_schema();
        let call = GenerationCall {
            flow: F::KIND,
            instruction,
            output_schema: Some(output_schema.clone()),
            options: F::options(),
        };

        let response = self.service.generate(&call).await.map_err(|e| {
            tracing::warn!("{} generation failed: {}", F::KIND, e);
            e
        })?;

        output_schema.validate(&response.value).map_err(|violation| {
            tracing::warn!("{} output rejected: {}", F::KIND, violation);
            GenerationError::OutputShape(violation)
        })?;

        let output = serde_json::from_value(response.value)
            .map_err(|e| GenerationError::MalformedOutput(e.to_string()))?;

        tracing::info!(
            "{} completed via {}/{} ({} tokens)",
            F::KIND,
            self.service.provider_name(),
            response.model,
            response.usage.total_tokens
        );

        Ok(output)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted generation service for flow tests

    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::ports::{GenerationResponse, TokenUsage};

    /// Returns a fixed result and records every call
    pub struct ScriptedService {
        result: Result<Value, GenerationError>,
        pub calls: Mutex<Vec<GenerationCall>>,
    }

    impl ScriptedService {
        pub fn returning(value: Value) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(value),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(error: GenerationError) -> Arc<Self> {
            Arc::new(Self {
                result: Err(error),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn last_call(&self) -> GenerationCall {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        async fn generate(
            &self,
            call: &GenerationCall,
        ) -> Result<GenerationResponse, GenerationError> {
            self.calls.lock().unwrap().push(call.clone());
            self.result.clone().map(|value| GenerationResponse {
                value,
                model: "scripted".to_string(),
                usage: TokenUsage::default(),
            })
        }

        async fn complete_text(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok("API Key is working!".to_string())
        }

        fn provider_name(&self) -> &str {
            "scripted"
        }

        fn model_id(&self) -> &str {
            "scripted"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_satisfiable_from_input_schemas() {
        assert_eq!(check_templates(), Ok(()));
    }
}
