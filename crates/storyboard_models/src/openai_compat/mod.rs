//! Generic OpenAI-compatible API client.
//!
//! Groq and Pollinations both accept the OpenAI chat completions format, so
//! both bindings share this client.

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use conversions::{from_chat_response, json_from_chat_response, to_chat_request, to_structured_chat_request};
pub use dto::{ChatMessage, ChatRequest, ChatResponse, OpenAICompatError, ResponseFormat};
