//! Request types for text and image generation.

use crate::Message;
use serde::{Deserialize, Serialize};
use storyboard_error::{BuilderError, BuilderErrorKind};

/// Single-turn text generation request.
///
/// Requests are stateless: any conversational context must already be folded
/// into `messages` by the caller.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Message, TextRequest};
///
/// let request = TextRequest::builder()
///     .messages(vec![Message::user("Tell me about dragons")])
///     .model("openai")
///     .temperature(Some(0.8))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(request.model(), "openai");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct TextRequest {
    /// The messages to send
    messages: Vec<Message>,
    /// Model identifier to use
    model: String,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
}

impl TextRequest {
    /// Creates a new builder for TextRequest.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

/// Moderation and formatting flags attached to an image request.
///
/// The default matches what story illustration uses: content filtering off,
/// no watermark, private results, prompt enhancement on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct ImageSafety {
    /// Enable the provider's unsafe-content filter
    #[serde(default)]
    safe: bool,
    /// Suppress the provider watermark
    #[serde(default = "enabled")]
    nologo: bool,
    /// Keep the generated image out of public feeds
    #[serde(default = "enabled")]
    private: bool,
    /// Let the provider rewrite the prompt for detail
    #[serde(default = "enabled")]
    enhance: bool,
}

fn enabled() -> bool {
    true
}

impl ImageSafety {
    /// Create a flag set.
    pub fn new(safe: bool, nologo: bool, private: bool, enhance: bool) -> Self {
        Self {
            safe,
            nologo,
            private,
            enhance,
        }
    }
}

impl Default for ImageSafety {
    fn default() -> Self {
        Self::new(false, true, true, true)
    }
}

/// One image generation call: one prompt, one model, one payload back.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ImageRequest, ImageSafety};
///
/// let request = ImageRequest::builder()
///     .model("flux")
///     .prompt("A dragon over a meadow")
///     .width(512u32)
///     .height(512u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.safety(), ImageSafety::default());
/// assert!(request.seed().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Image model identifier
    model: String,
    /// Visual description to render
    prompt: String,
    /// Moderation/formatting flags
    #[builder(default)]
    safety: ImageSafety,
    /// Output width in pixels
    width: u32,
    /// Output height in pixels
    height: u32,
    /// Optional seed for reproducible output
    #[builder(default)]
    seed: Option<u64>,
}

impl ImageRequest {
    /// Creates a new builder for ImageRequest.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

impl From<TextRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: TextRequestBuilderError) -> Self {
        let kind = match err {
            TextRequestBuilderError::UninitializedField(field) => BuilderErrorKind::MissingField {
                target: "TextRequest",
                field: field.to_string(),
            },
            TextRequestBuilderError::ValidationError(message) => BuilderErrorKind::Invalid {
                target: "TextRequest",
                message,
            },
        };
        BuilderError::new(kind)
    }
}

impl From<ImageRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: ImageRequestBuilderError) -> Self {
        let kind = match err {
            ImageRequestBuilderError::UninitializedField(field) => BuilderErrorKind::MissingField {
                target: "ImageRequest",
                field: field.to_string(),
            },
            ImageRequestBuilderError::ValidationError(message) => BuilderErrorKind::Invalid {
                target: "ImageRequest",
                message,
            },
        };
        BuilderError::new(kind)
    }
}
