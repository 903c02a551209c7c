//! Pollinations text generation via its OpenAI-compatible endpoint.

use super::fetch_model_catalog;
use crate::openai_compat::{
    OpenAICompatError, OpenAICompatibleClient, from_chat_response, to_chat_request,
};
use async_trait::async_trait;
use storyboard_core::TextRequest;
use storyboard_error::{ModelsError, ModelsErrorKind, PollinationsErrorKind, StoryboardResult};
use storyboard_interface::TextDriver;
use tracing::instrument;

/// Pollinations OpenAI-compatible chat endpoint.
pub const POLLINATIONS_TEXT_URL: &str = "https://text.pollinations.ai/openai";

const POLLINATIONS_TEXT_MODELS_URL: &str = "https://text.pollinations.ai/models";

/// Text generation client for Pollinations.
#[derive(Debug, Clone)]
pub struct PollinationsTextClient {
    inner: OpenAICompatibleClient,
    models_url: String,
}

impl PollinationsTextClient {
    /// Client for the public Pollinations endpoints.
    pub fn new() -> Self {
        Self::with_urls(POLLINATIONS_TEXT_URL, POLLINATIONS_TEXT_MODELS_URL)
    }

    /// Client for custom chat and catalog URLs.
    pub fn with_urls(chat_url: impl Into<String>, models_url: impl Into<String>) -> Self {
        Self {
            inner: OpenAICompatibleClient::new(None, chat_url.into(), "pollinations"),
            models_url: models_url.into(),
        }
    }

    fn convert_error(error: OpenAICompatError) -> ModelsError {
        let kind = match error {
            OpenAICompatError::Http(msg) => PollinationsErrorKind::Request(msg),
            OpenAICompatError::Api { status, message } => PollinationsErrorKind::Status {
                status_code: status,
                message,
            },
            OpenAICompatError::RateLimit => PollinationsErrorKind::Status {
                status_code: 429,
                message: "Rate limit exceeded".to_string(),
            },
            OpenAICompatError::ModelNotFound(model) => PollinationsErrorKind::Status {
                status_code: 404,
                message: format!("Model not found: {}", model),
            },
            OpenAICompatError::InvalidRequest(msg) => PollinationsErrorKind::Request(msg),
            OpenAICompatError::Builder(err) => PollinationsErrorKind::Request(err.to_string()),
            OpenAICompatError::ResponseParsing(msg) => {
                PollinationsErrorKind::ResponseConversion(msg)
            }
        };

        ModelsError::new(ModelsErrorKind::Pollinations(kind))
    }
}

impl Default for PollinationsTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextDriver for PollinationsTextClient {
    #[instrument(skip(self, req), fields(provider = "pollinations", model = %req.model()))]
    async fn generate_text(&self, req: &TextRequest) -> StoryboardResult<String> {
        let chat_request = to_chat_request(req).map_err(Self::convert_error)?;
        let response = self
            .inner
            .chat(&chat_request)
            .await
            .map_err(Self::convert_error)?;
        Ok(from_chat_response(&response).map_err(Self::convert_error)?)
    }

    #[instrument(skip(self), fields(url = %self.models_url))]
    async fn list_models(&self) -> StoryboardResult<Vec<String>> {
        Ok(fetch_model_catalog(self.inner.http(), &self.models_url).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
