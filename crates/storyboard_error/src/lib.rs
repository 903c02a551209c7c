//! Error types for the Storyboard workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{StoryboardResult, HttpError};
//!
//! fn fetch_image() -> StoryboardResult<Vec<u8>> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_image().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod http;
mod json;
mod models;
mod pipeline;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use http::HttpError;
pub use json::JsonError;
pub use models::{GroqErrorKind, ModelsError, ModelsErrorKind, ModelsResult, PollinationsErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind, PipelineStage};
pub use storage::{StorageError, StorageErrorKind};
