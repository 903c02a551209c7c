//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storyboard::{ImageModel, TextModel};

/// Storyboard - illustrated children's stories from a single prompt
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Generate an illustrated children's story from a single prompt", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./storyboard.toml and ~/.config/storyboard/storyboard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story board from a topic
    Generate {
        /// What the story is about
        #[arg(short, long)]
        prompt: String,

        /// Text model for the story segments (openai, mistral, searchgpt, midijourney)
        #[arg(long)]
        text_model: Option<TextModel>,

        /// Image model used when random model selection is disabled
        #[arg(long, default_value = "flux")]
        image_model: ImageModel,

        /// Directory for story.md and the images
        #[arg(short, long, default_value = "storyboard-output")]
        output: PathBuf,

        /// Print a JSON summary instead of the story text
        #[arg(long)]
        json: bool,
    },

    /// List the models offered by the text and image services
    Models,
}
