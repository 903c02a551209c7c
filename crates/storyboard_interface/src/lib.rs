//! Service contracts for the Storyboard story generation pipeline.
//!
//! The pipeline never talks to a network directly. It consumes three
//! generation services through the traits defined here, and any provider
//! binding (or test double) that implements them can be plugged in.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod schema;
mod traits;

pub use schema::{ResponseSchema, StructuredRequest, generate_structured};
pub use traits::{ImageDriver, ModelSelector, StructuredDriver, TextDriver};
