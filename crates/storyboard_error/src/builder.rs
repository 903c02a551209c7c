//! Errors raised while assembling requests from their builders.

/// Why a request could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("{} is missing required field `{}`", target, field)]
    MissingField {
        /// Type being built
        target: &'static str,
        /// Unset field
        field: String,
    },
    /// A field value was rejected
    #[display("{} failed validation: {}", target, message)]
    Invalid {
        /// Type being built
        target: &'static str,
        /// Rejection reason
        message: String,
    },
}

/// Request assembly error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::new(BuilderErrorKind::MissingField {
///     target: "ImageRequest",
///     field: "width".to_string(),
/// });
/// assert_eq!(err.target(), "ImageRequest");
/// assert!(err.to_string().contains("`width`"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    /// The specific error condition
    pub kind: BuilderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Name of the type that failed to build.
    pub fn target(&self) -> &'static str {
        match &self.kind {
            BuilderErrorKind::MissingField { target, .. }
            | BuilderErrorKind::Invalid { target, .. } => target,
        }
    }
}
