//! Storyboard - illustrated children's stories from a single prompt.
//!
//! Storyboard plans a story with a structured-output language model, writes it
//! segment by segment with a text model, and illustrates it with an image
//! model, running text and images concurrently.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyboard::{StoryTopic, StoryboardConfig, TextModel, build_generator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = StoryboardConfig::load()?;
//!     config.structured.api_key = Some(std::env::var("GROQ_API_KEY")?);
//!
//!     let generator = build_generator(&config)?;
//!     let topic = StoryTopic::new("A friendly dragon learning to fly", TextModel::Openai);
//!     let board = generator.generate_story(&topic).await?;
//!
//!     for page in board.pages() {
//!         println!("{} ({} bytes of image)", page.text, page.image.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout
//!
//! # Architecture
//!
//! - `storyboard_error` - Error types
//! - `storyboard_core` - Story data model and request types
//! - `storyboard_interface` - Service traits and structured-output schemas
//! - `storyboard_models` - Groq and Pollinations bindings
//! - `storyboard_pipeline` - The generation pipeline and configuration
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod export;
mod setup;

pub use export::{BoardSummary, image_extension, render_markdown, write_story_board};
pub use setup::build_generator;

pub use storyboard_core::*;
pub use storyboard_error::*;
pub use storyboard_interface::*;
pub use storyboard_models::*;
pub use storyboard_pipeline::*;

#[cfg(feature = "observability")]
pub mod observability;
