//! Type conversions between Storyboard and OpenAI formats.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse, OpenAICompatError, ResponseFormat};
use storyboard_core::TextRequest;
use storyboard_interface::StructuredRequest;

/// Converts a text request to OpenAI chat format.
pub fn to_chat_request(req: &TextRequest) -> Result<ChatRequest, OpenAICompatError> {
    if req.messages().is_empty() {
        return Err(OpenAICompatError::InvalidRequest(
            "Text request has no messages".to_string(),
        ));
    }

    let messages: Vec<ChatMessage> = req
        .messages()
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role().as_wire().to_string(),
            content: msg.content().clone(),
        })
        .collect();

    let mut builder = ChatRequest::builder();
    builder.model(req.model().clone()).messages(messages);

    if let Some(max_tokens) = req.max_tokens() {
        builder.max_tokens(*max_tokens);
    }

    if let Some(temp) = req.temperature() {
        builder.temperature(*temp);
    }

    builder
        .build()
        .map_err(|e| OpenAICompatError::Builder(e.into()))
}

/// Converts a structured request to a JSON-mode chat request.
pub fn to_structured_chat_request(
    req: &StructuredRequest,
    model: &str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> Result<ChatRequest, OpenAICompatError> {
    let messages = vec![
        ChatMessage {
            role: "system".to_string(),
            content: req.system_with_schema(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: req.user_instruction().clone(),
        },
    ];

    let mut builder = ChatRequest::builder();
    builder
        .model(model.to_string())
        .messages(messages)
        .response_format(ResponseFormat::json_object());

    if let Some(max_tokens) = max_tokens {
        builder.max_tokens(max_tokens);
    }

    if let Some(temp) = temperature {
        builder.temperature(temp);
    }

    builder
        .build()
        .map_err(|e| OpenAICompatError::Builder(e.into()))
}

/// Extracts the text of the first choice.
pub fn from_chat_response(response: &ChatResponse) -> Result<String, OpenAICompatError> {
    let content = response
        .choices
        .first()
        .map(|choice| choice.message.content.clone())
        .ok_or_else(|| OpenAICompatError::ResponseParsing("No choices in response".to_string()))?;

    if content.trim().is_empty() {
        return Err(OpenAICompatError::ResponseParsing(
            "First choice has empty content".to_string(),
        ));
    }

    Ok(content)
}

/// Extracts the first choice and parses it as a JSON document.
pub fn json_from_chat_response(
    response: &ChatResponse,
) -> Result<serde_json::Value, OpenAICompatError> {
    let content = from_chat_response(response)?;
    serde_json::from_str(strip_code_fence(&content)).map_err(|e| {
        OpenAICompatError::ResponseParsing(format!("Response is not valid JSON: {}", e))
    })
}

/// Some models wrap JSON-mode answers in a markdown fence anyway.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
