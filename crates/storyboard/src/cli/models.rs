//! Model listing command handler.

use storyboard::{PollinationsImageClient, PollinationsTextClient, StoryboardConfig, StoryboardResult};
use storyboard::{ImageDriver, TextDriver};

/// Print the models the configured text and image services offer.
///
/// Needs no planner credentials.
pub async fn list_models(config: &StoryboardConfig) -> StoryboardResult<()> {
    let text = PollinationsTextClient::with_urls(
        config.text.base_url.clone(),
        config.text.models_url.clone(),
    );
    let images = PollinationsImageClient::with_base_url(config.image.base_url.clone());

    let (text_models, image_models) = tokio::join!(text.list_models(), images.list_models());

    println!("Text models:");
    for model in text_models? {
        println!("  {}", model);
    }
    println!("Image models:");
    for model in image_models? {
        println!("  {}", model);
    }
    Ok(())
}
