//! Data transfer objects for OpenAI-compatible APIs.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_error::{BuilderError, BuilderErrorKind};

/// A message in the OpenAI chat format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    #[serde(default)]
    pub content: String,
}

/// Output format constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Format kind, "json_object" for JSON mode
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// JSON mode: the model must answer with a single JSON object.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// OpenAI chat completion request.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Output format constraint
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Creates a new builder for ChatRequest.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

impl From<ChatRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: ChatRequestBuilderError) -> Self {
        let kind = match err {
            ChatRequestBuilderError::UninitializedField(field) => BuilderErrorKind::MissingField {
                target: "ChatRequest",
                field: field.to_string(),
            },
            ChatRequestBuilderError::ValidationError(message) => BuilderErrorKind::Invalid {
                target: "ChatRequest",
                message,
            },
        };
        BuilderError::new(kind)
    }
}

/// One candidate answer. Only the message is read.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Assistant message
    pub message: ChatMessage,
}

/// Token accounting, logged per call.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Prompt plus completion tokens
    #[serde(default)]
    pub total_tokens: Option<usize>,
}

/// Chat completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Candidate answers; the first one is used
    pub choices: Vec<ChatChoice>,
    /// Token accounting, when the service reports it
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// Errors from OpenAI-compatible APIs.
#[derive(Debug, Clone, derive_more::Display)]
pub enum OpenAICompatError {
    /// HTTP/network error
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// API returned an error
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Rate limit exceeded
    #[display("Rate limit exceeded")]
    RateLimit,

    /// Model not found
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),

    /// Invalid request
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),

    /// Failed to parse response
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),

    /// Chat request could not be assembled
    #[display("{}", _0)]
    Builder(BuilderError),
}

impl std::error::Error for OpenAICompatError {}

impl OpenAICompatError {
    /// Map an HTTP error status to the matching error variant.
    pub fn from_status(status: u16, message: String, model: &str) -> Self {
        match status {
            429 => OpenAICompatError::RateLimit,
            404 => OpenAICompatError::ModelNotFound(model.to_string()),
            400 | 422 => OpenAICompatError::InvalidRequest(message),
            _ => OpenAICompatError::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_chat_request_names_missing_field() {
        let err: BuilderError = ChatRequest::builder()
            .messages(Vec::new())
            .build()
            .unwrap_err()
            .into();

        assert_eq!(err.target(), "ChatRequest");
        assert!(matches!(
            err.kind,
            BuilderErrorKind::MissingField { ref field, .. } if field == "model"
        ));
        assert!(OpenAICompatError::Builder(err).to_string().contains("`model`"));
    }

    #[test]
    fn test_response_ignores_unread_fields() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"hi"},"finish_reason":"stop"}],
                "usage":{"prompt_tokens":3,"completion_tokens":1,"total_tokens":4}}"#,
        )
        .unwrap();
        assert_eq!(response.choices[0].message.content, "hi");
        assert_eq!(response.usage.and_then(|u| u.total_tokens), Some(4));
    }
}
