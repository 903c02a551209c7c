//! Schema-bound structured output.
//!
//! Each structured call site declares a [`ResponseSchema`]: the JSON schema
//! shown to the model and the parser that turns the raw JSON into a typed
//! value or rejects it.

use crate::StructuredDriver;
use storyboard_error::StoryboardResult;
use tracing::{debug, instrument};

/// Typed contract for one kind of structured response.
pub trait ResponseSchema {
    /// Validated result type.
    type Output: Send;

    /// Short name used in logs and in the schema instruction.
    fn name() -> &'static str;

    /// JSON schema describing the expected document.
    fn json_schema() -> serde_json::Value;

    /// Validate a raw JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document does not conform to the schema.
    fn parse(value: serde_json::Value) -> StoryboardResult<Self::Output>;
}

/// A structured-output request: two instructions and the schema to satisfy.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct StructuredRequest {
    /// Instruction framing the model's role and constraints
    system_instruction: String,
    /// Instruction carrying the concrete input
    user_instruction: String,
    /// Name of the expected document
    #[getter(skip)]
    schema_name: &'static str,
    /// JSON schema the response must follow
    schema: serde_json::Value,
}

impl StructuredRequest {
    /// Name of the expected document.
    pub fn schema_name(&self) -> &&'static str {
        &self.schema_name
    }

    /// Build a request for the given schema.
    pub fn for_schema<S: ResponseSchema>(
        system_instruction: impl Into<String>,
        user_instruction: impl Into<String>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_instruction: user_instruction.into(),
            schema_name: S::name(),
            schema: S::json_schema(),
        }
    }

    /// System instruction with the schema appended, for providers whose JSON
    /// mode only guarantees syntax.
    pub fn system_with_schema(&self) -> String {
        format!(
            "{}\n\nRespond only with a JSON object named `{}` that matches this JSON schema:\n{}",
            self.system_instruction.trim_end(),
            self.schema_name,
            self.schema
        )
    }
}

/// Issue a structured request and validate the answer against `S`.
///
/// # Errors
///
/// Propagates driver failures and schema violations unchanged.
#[instrument(skip_all, fields(schema = S::name(), provider = driver.provider_name(), model = driver.model_name()))]
pub async fn generate_structured<S: ResponseSchema>(
    driver: &dyn StructuredDriver,
    system_instruction: &str,
    user_instruction: &str,
) -> StoryboardResult<S::Output> {
    let request = StructuredRequest::for_schema::<S>(system_instruction, user_instruction);
    let raw = driver.generate_structured(&request).await?;
    debug!("Received structured response, validating");
    S::parse(raw)
}
