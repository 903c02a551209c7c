//! Trait definitions for generation services and their strategies.

use crate::StructuredRequest;
use async_trait::async_trait;
use storyboard_core::{ImageRequest, TextRequest};
use storyboard_error::StoryboardResult;

/// Language model service constrained to answer with JSON.
///
/// Implementations must return syntactically valid JSON or an error; they
/// never hand back partial documents. Schema conformance is checked by the
/// caller's [`ResponseSchema`](crate::ResponseSchema).
#[async_trait]
pub trait StructuredDriver: Send + Sync {
    /// Issue one structured-output request.
    async fn generate_structured(
        &self,
        req: &StructuredRequest,
    ) -> StoryboardResult<serde_json::Value>;

    /// Provider name (e.g., "groq").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "llama-3.3-70b-versatile").
    fn model_name(&self) -> &str;
}

/// Stateless single-turn text generation.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Generate text for one request. The model is named by the request.
    async fn generate_text(&self, req: &TextRequest) -> StoryboardResult<String>;

    /// Model identifiers the provider currently serves.
    async fn list_models(&self) -> StoryboardResult<Vec<String>>;

    /// Provider name (e.g., "pollinations").
    fn provider_name(&self) -> &'static str;
}

/// Stateless single-prompt image generation.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Render one prompt and return the encoded image bytes.
    async fn generate_image(&self, req: &ImageRequest) -> StoryboardResult<Vec<u8>>;

    /// Model identifiers the provider currently serves.
    async fn list_models(&self) -> StoryboardResult<Vec<String>>;

    /// Provider name (e.g., "pollinations").
    fn provider_name(&self) -> &'static str;
}

/// Chooses which image model renders a prompt.
///
/// Invoked once per image task. Implementations must be safe to call from
/// concurrent tasks without coordination.
pub trait ModelSelector: Send + Sync {
    /// Pick the model identifier for the next image.
    fn select_model(&self) -> String;
}
