//! The Storyboard story generation pipeline.
//!
//! A topic becomes an illustrated story in four stages:
//!
//! 1. [`PromptExpander`] plans the story as an ordered list of part prompts.
//! 2. [`ImagePromptDeriver`] turns those parts into image prompts.
//! 3. [`SequentialTextGenerator`] writes each part in order, feeding accepted
//!    parts forward as context, while [`ConcurrentImageGenerator`] renders
//!    every image at once with per-call timeout and retry.
//! 4. [`StoryGenerator`] joins both tracks into a [`StoryBoard`](storyboard_core::StoryBoard).
//!
//! Stages 1 and 2 are fatal on failure. Individual text segments and images
//! fail in isolation and are dropped from the board.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod expander;
mod image_prompts;
mod images;
mod metrics;
mod orchestrator;
mod prompts;
mod schema;
mod selector;
mod text;

pub use config::{ImageConfig, StoryboardConfig, StructuredConfig, TextConfig};
pub use expander::PromptExpander;
pub use image_prompts::ImagePromptDeriver;
pub use images::{ConcurrentImageGenerator, RetryPolicy};
pub use metrics::StoryMetrics;
pub use orchestrator::{StoryGenerator, validate_topic};
pub use prompts::{
    image_prompt_system_instruction, image_prompt_user_instruction,
    story_part_system_instruction, story_part_user_instruction,
};
pub use schema::{ImagePromptsSchema, StoryPartPromptsSchema};
pub use selector::{FixedModelSelector, RandomModelSelector};
pub use text::{
    SegmentOutcome, SequentialTextGenerator, TEXT_ERROR_MESSAGE, TEXT_TIMEOUT_MESSAGE,
    build_context,
};
