//! Wiring configured providers into a story generator.

use std::sync::Arc;
use storyboard_error::{
    ConfigError, GroqErrorKind, ModelsError, ModelsErrorKind, StoryboardResult,
};
use storyboard_models::{GROQ_CHAT_URL, GroqDriver, PollinationsImageClient, PollinationsTextClient};
use storyboard_pipeline::{StoryGenerator, StoryboardConfig};
use tracing::{debug, instrument};

/// Build a [`StoryGenerator`] backed by Groq and Pollinations.
///
/// The Groq key must already be in `config.structured.api_key`; nothing is
/// read from the environment here.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, names an unsupported
/// planner provider, or has no API key.
#[instrument(skip(config), fields(provider = %config.structured.provider, model = %config.structured.model))]
pub fn build_generator(config: &StoryboardConfig) -> StoryboardResult<StoryGenerator> {
    config.validate()?;

    if config.structured.provider != "groq" {
        return Err(ConfigError::new(format!(
            "Unsupported structured provider: {}",
            config.structured.provider
        ))
        .into());
    }

    let api_key = config
        .structured
        .api_key
        .clone()
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::Groq(GroqErrorKind::MissingApiKey)))?;

    let mut planner = GroqDriver::new(api_key.clone(), config.structured.model.clone())?
        .with_temperature(config.structured.temperature)
        .with_max_tokens(config.structured.max_tokens);
    if config.structured.base_url != GROQ_CHAT_URL {
        debug!(url = %config.structured.base_url, "Using custom planner endpoint");
        planner = planner.with_base_url(config.structured.base_url.clone(), Some(api_key));
    }

    let text = PollinationsTextClient::with_urls(
        config.text.base_url.clone(),
        config.text.models_url.clone(),
    );
    let images = PollinationsImageClient::with_base_url(config.image.base_url.clone());

    Ok(StoryGenerator::new(
        Arc::new(planner),
        Arc::new(text),
        Arc::new(images),
        config.clone(),
    ))
}
