//! Model provider errors.

/// Groq-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GroqErrorKind {
    /// API key was not supplied in configuration
    #[display("Groq API key not configured")]
    MissingApiKey,
    /// API returned an error
    #[display("API error: {}", _0)]
    Api(String),
    /// Rate limit exceeded
    #[display("Rate limit exceeded")]
    RateLimit,
    /// Requested model does not exist
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),
    /// Request was rejected before sending
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
    /// Request could not be converted to the wire format
    #[display("Request conversion failed: {}", _0)]
    RequestConversion(String),
    /// Response could not be converted from the wire format
    #[display("Response conversion failed: {}", _0)]
    ResponseConversion(String),
}

/// Pollinations-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PollinationsErrorKind {
    /// HTTP transport failed
    #[display("Request failed: {}", _0)]
    Request(String),
    /// API returned a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Endpoint URL could not be built
    #[display("Invalid URL: {}", _0)]
    InvalidUrl(String),
    /// Response body was empty
    #[display("Empty response body")]
    EmptyBody,
    /// Response body could not be decoded
    #[display("Response conversion failed: {}", _0)]
    ResponseConversion(String),
}

/// Model provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::From)]
pub enum ModelsErrorKind {
    /// Groq-specific error
    #[display("Groq: {}", _0)]
    Groq(GroqErrorKind),

    /// Pollinations-specific error
    #[display("Pollinations: {}", _0)]
    Pollinations(PollinationsErrorKind),

    /// Builder error (derive_builder failures)
    #[from(ignore)]
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ModelsError, ModelsErrorKind, PollinationsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::Pollinations(PollinationsErrorKind::EmptyBody));
/// assert!(format!("{}", err).contains("Empty response body"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
