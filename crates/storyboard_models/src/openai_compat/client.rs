//! Generic client for OpenAI-compatible APIs.

use crate::LlmMetrics;
use crate::openai_compat::{ChatRequest, ChatResponse, OpenAICompatError};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Generic client for any OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    provider_name: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token, if the endpoint requires one
    /// * `base_url` - Full URL of the chat completions endpoint
    /// * `provider_name` - Name of the provider (for logging/tracing)
    #[instrument(skip(api_key), fields(provider = provider_name))]
    pub fn new(api_key: Option<String>, base_url: String, provider_name: &'static str) -> Self {
        debug!(
            provider = provider_name,
            url = %base_url,
            authenticated = api_key.is_some(),
            "Created OpenAI-compatible client"
        );

        Self {
            client: Client::new(),
            api_key,
            base_url,
            provider_name,
        }
    }

    /// Sends a chat completion request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self, chat_request), fields(provider = self.provider_name, model = %chat_request.model()))]
    pub async fn chat(&self, chat_request: &ChatRequest) -> Result<ChatResponse, OpenAICompatError> {
        let metrics = LlmMetrics::get();
        let started = Instant::now();

        let result = self.send(chat_request).await;

        match &result {
            Ok(_) => metrics.record_request(
                self.provider_name,
                chat_request.model(),
                started.elapsed().as_secs_f64(),
            ),
            Err(e) => metrics.record_error(
                self.provider_name,
                chat_request.model(),
                crate::classify_error(e),
            ),
        }

        result
    }

    async fn send(&self, chat_request: &ChatRequest) -> Result<ChatResponse, OpenAICompatError> {
        debug!(
            provider = self.provider_name,
            message_count = chat_request.messages().len(),
            json_mode = chat_request.response_format().is_some(),
            "Sending request"
        );

        let mut request = self.client.post(&self.base_url).json(chat_request);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "HTTP request failed");
            OpenAICompatError::Http(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                provider = self.provider_name,
                status = %status,
                error = %error_text,
                "API error"
            );

            return Err(OpenAICompatError::from_status(
                status.as_u16(),
                error_text,
                chat_request.model(),
            ));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "Failed to parse response");
            OpenAICompatError::ResponseParsing(format!("Failed to parse JSON: {}", e))
        })?;

        debug!(
            provider = self.provider_name,
            choices = chat_response.choices.len(),
            total_tokens = chat_response.usage.as_ref().and_then(|u| u.total_tokens),
            "Received response"
        );

        Ok(chat_response)
    }

    /// Returns the provider name.
    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared HTTP client, reused for auxiliary endpoints.
    pub fn http(&self) -> &Client {
        &self.client
    }
}
