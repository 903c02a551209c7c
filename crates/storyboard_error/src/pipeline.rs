//! Story pipeline error types.

/// Stage of the story generation pipeline an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineStage {
    /// Topic to story-part prompts
    #[display("prompt expansion")]
    PromptExpansion,
    /// Story-part prompts to image prompts
    #[display("image prompt derivation")]
    ImagePromptDerivation,
    /// Sequential story text generation
    #[display("text generation")]
    TextGeneration,
    /// Concurrent image generation
    #[display("image generation")]
    ImageGeneration,
}

/// Specific error conditions for pipeline operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Structured output failed to parse or validate against its schema
    #[display("Structured output for {} failed validation: {}", stage, message)]
    StructuredOutput {
        /// Stage that issued the structured call
        stage: PipelineStage,
        /// What was wrong with the response
        message: String,
    },
    /// A generation call exceeded its deadline
    #[display("{} timed out after {} seconds", stage, seconds)]
    Timeout {
        /// Stage whose call timed out
        stage: PipelineStage,
        /// Deadline in seconds
        seconds: u64,
    },
    /// Service answered with no usable content
    #[display("Empty response during {}", _0)]
    EmptyResponse(PipelineStage),
    /// Topic prompt cannot be used
    #[display("Invalid story topic: {}", _0)]
    InvalidTopic(String),
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use storyboard_error::{PipelineError, PipelineErrorKind, PipelineStage};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyResponse(PipelineStage::TextGeneration));
/// assert!(format!("{}", err).contains("text generation"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error is a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, PipelineErrorKind::Timeout { .. })
    }
}
