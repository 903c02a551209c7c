//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyboard binary.

mod commands;
mod generate;
mod models;

pub use commands::{Cli, Commands};
pub use generate::{GenerateOptions, run_generate};
pub use models::list_models;

use storyboard::{StoryboardConfig, StoryboardResult};
use std::path::Path;
use tracing::debug;

/// Load configuration from `path`, or from the standard locations.
///
/// Fills the planner API key from `GROQ_API_KEY` when the configuration
/// does not carry one.
pub fn load_config(path: Option<&Path>) -> StoryboardResult<StoryboardConfig> {
    let mut config = match path {
        Some(path) => StoryboardConfig::from_file(path)?,
        None => StoryboardConfig::load()?,
    };

    if config.structured.api_key.is_none() {
        config.structured.api_key = std::env::var("GROQ_API_KEY").ok();
        debug!(
            found = config.structured.api_key.is_some(),
            "Read planner API key from GROQ_API_KEY"
        );
    }

    Ok(config)
}
