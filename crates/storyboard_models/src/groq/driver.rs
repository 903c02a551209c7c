//! Groq structured-output driver using the OpenAI-compatible client.

use crate::openai_compat::{
    OpenAICompatError, OpenAICompatibleClient, json_from_chat_response, to_structured_chat_request,
};
use async_trait::async_trait;
use storyboard_error::{GroqErrorKind, ModelsError, ModelsErrorKind, ModelsResult, StoryboardResult};
use storyboard_interface::{StructuredDriver, StructuredRequest};
use tracing::{debug, instrument};

/// Groq chat completions endpoint.
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model used for prompt planning when none is configured.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq driver answering structured requests in JSON mode.
#[derive(Debug, Clone)]
pub struct GroqDriver {
    inner: OpenAICompatibleClient,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl GroqDriver {
    /// Creates a Groq driver with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank.
    #[instrument(skip_all, fields(model))]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> ModelsResult<Self> {
        let api_key = api_key.into();
        let model = model.into();
        tracing::Span::current().record("model", model.as_str());

        if api_key.trim().is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::Groq(
                GroqErrorKind::MissingApiKey,
            )));
        }

        let inner =
            OpenAICompatibleClient::new(Some(api_key), GROQ_CHAT_URL.to_string(), "groq");

        Ok(Self {
            inner,
            model,
            temperature: None,
            max_tokens: None,
        })
    }

    /// Point the driver at a different endpoint (proxies, tests).
    pub fn with_base_url(self, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            inner: OpenAICompatibleClient::new(api_key, base_url.into(), "groq"),
            ..self
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Converts OpenAICompatError to Groq-specific error.
    fn convert_error(error: OpenAICompatError) -> ModelsError {
        let kind = match error {
            OpenAICompatError::Http(msg) => GroqErrorKind::Api(msg),
            OpenAICompatError::Api { status, message } => {
                GroqErrorKind::Api(format!("API error {}: {}", status, message))
            }
            OpenAICompatError::RateLimit => GroqErrorKind::RateLimit,
            OpenAICompatError::ModelNotFound(model) => GroqErrorKind::ModelNotFound(model),
            OpenAICompatError::InvalidRequest(msg) => GroqErrorKind::InvalidRequest(msg),
            OpenAICompatError::ResponseParsing(msg) => GroqErrorKind::ResponseConversion(msg),
            OpenAICompatError::Builder(err) => GroqErrorKind::RequestConversion(err.to_string()),
        };

        ModelsError::new(ModelsErrorKind::Groq(kind))
    }
}

#[async_trait]
impl StructuredDriver for GroqDriver {
    #[instrument(skip(self, req), fields(provider = "groq", model = %self.model, schema = req.schema_name()))]
    async fn generate_structured(
        &self,
        req: &StructuredRequest,
    ) -> StoryboardResult<serde_json::Value> {
        let chat_request =
            to_structured_chat_request(req, &self.model, self.temperature, self.max_tokens)
                .map_err(Self::convert_error)?;

        let response = self
            .inner
            .chat(&chat_request)
            .await
            .map_err(Self::convert_error)?;

        let value = json_from_chat_response(&response).map_err(Self::convert_error)?;
        debug!("Structured response is valid JSON");
        Ok(value)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_rejected() {
        let err = GroqDriver::new("  ", DEFAULT_GROQ_MODEL).unwrap_err();
        assert_eq!(err.kind, ModelsErrorKind::Groq(GroqErrorKind::MissingApiKey));
    }

    #[test]
    fn test_driver_reports_model() {
        let driver = GroqDriver::new("gsk-test", DEFAULT_GROQ_MODEL)
            .unwrap()
            .with_temperature(0.8)
            .with_max_tokens(16_384);
        assert_eq!(driver.model_name(), DEFAULT_GROQ_MODEL);
        assert_eq!(driver.provider_name(), "groq");
        assert_eq!(driver.max_tokens, Some(16_384));
    }

    #[test]
    fn test_rate_limit_maps_to_groq_kind() {
        let err = GroqDriver::convert_error(OpenAICompatError::RateLimit);
        assert_eq!(err.kind, ModelsErrorKind::Groq(GroqErrorKind::RateLimit));
    }
}
