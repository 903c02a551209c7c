//! Generation provider integrations for Storyboard.
//!
//! # Available Providers
//!
//! - **Groq** - structured JSON output through the OpenAI-compatible chat API
//! - **Pollinations** - free text generation and image rendering
//!
//! ```no_run
//! use storyboard_models::{GroqDriver, PollinationsImageClient};
//! use storyboard_interface::ImageDriver;
//! use storyboard_core::ImageRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let groq = GroqDriver::new("gsk-...", "llama-3.3-70b-versatile")?;
//! let images = PollinationsImageClient::new();
//! let request = ImageRequest::builder()
//!     .model("flux")
//!     .prompt("A lighthouse made of candy")
//!     .width(512u32)
//!     .height(512u32)
//!     .build()?;
//! let bytes = images.generate_image(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod groq;
mod metrics;
mod openai_compat;
mod pollinations;

pub use groq::{DEFAULT_GROQ_MODEL, GROQ_CHAT_URL, GroqDriver};
pub use metrics::{LlmMetrics, classify_error};
pub use openai_compat::{
    ChatMessage, ChatRequest, ChatResponse, OpenAICompatError, OpenAICompatibleClient,
    ResponseFormat,
};
pub use pollinations::{
    POLLINATIONS_IMAGE_URL, POLLINATIONS_TEXT_URL, PollinationsImageClient, PollinationsTextClient,
    image_url,
};
