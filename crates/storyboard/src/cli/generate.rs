//! Story generation command handler.

use std::path::PathBuf;
use storyboard::{
    ImageModel, StoryTopic, StoryboardConfig, StoryboardResult, TextModel, build_generator,
    validate_topic, write_story_board,
};
use tracing::info;

/// Options for one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Raw topic prompt
    pub prompt: String,
    /// Text model override
    pub text_model: Option<TextModel>,
    /// Image model for pinned selection
    pub image_model: ImageModel,
    /// Output directory
    pub output: PathBuf,
    /// Print a JSON summary
    pub json: bool,
}

/// Generate a story board and write it to the output directory.
pub async fn run_generate(config: StoryboardConfig, options: GenerateOptions) -> StoryboardResult<()> {
    let prompt = validate_topic(&options.prompt)?;
    let text_model = options.text_model.unwrap_or(config.text.model);
    let topic = StoryTopic::with_models(prompt, text_model, options.image_model);

    let generator = build_generator(&config)?;
    info!(prompt, %text_model, "Generating story");
    let board = generator.generate_story(&topic).await?;

    let summary = write_story_board(&board, &options.output)?;

    if options.json {
        let rendered = serde_json::to_string_pretty(&summary).map_err(|e| {
            storyboard::JsonError::new(format!("Failed to render summary: {}", e))
        })?;
        println!("{}", rendered);
    } else {
        println!("{}\n", summary.title);
        for point in &summary.story_points {
            println!("{}\n", point.trim());
        }
        println!(
            "Wrote {} segments and {} images to {}",
            summary.story_points.len(),
            summary.images.len(),
            options.output.display()
        );
    }

    Ok(())
}
