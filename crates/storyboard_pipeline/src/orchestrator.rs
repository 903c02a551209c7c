//! End-to-end story generation.

use crate::{
    ConcurrentImageGenerator, FixedModelSelector, ImagePromptDeriver, PromptExpander,
    RandomModelSelector, SequentialTextGenerator, StoryboardConfig,
};
use std::sync::Arc;
use storyboard_core::{StoryBoard, StoryTopic};
use storyboard_error::{PipelineError, PipelineErrorKind, StoryboardResult};
use storyboard_interface::{ImageDriver, ModelSelector, StructuredDriver, TextDriver};
use tracing::{error, info, instrument};

/// Reject topics the planner cannot work with.
///
/// # Errors
///
/// Returns [`PipelineErrorKind::InvalidTopic`] for empty or whitespace-only prompts.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::validate_topic;
///
/// assert!(validate_topic("  A brave snail ").is_ok());
/// assert!(validate_topic("   ").is_err());
/// ```
pub fn validate_topic(prompt: &str) -> Result<&str, PipelineError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::InvalidTopic(
            "the story prompt is empty".to_string(),
        )));
    }
    Ok(trimmed)
}

/// Turns a topic into a finished story board.
///
/// Holds the three generation services and the configuration; every call to
/// [`generate_story`](Self::generate_story) is independent.
#[derive(Clone)]
pub struct StoryGenerator {
    expander: PromptExpander,
    deriver: ImagePromptDeriver,
    text_driver: Arc<dyn TextDriver>,
    image_driver: Arc<dyn ImageDriver>,
    selector: Option<Arc<dyn ModelSelector>>,
    config: StoryboardConfig,
}

impl StoryGenerator {
    /// Assemble a generator from its services.
    pub fn new(
        structured: Arc<dyn StructuredDriver>,
        text_driver: Arc<dyn TextDriver>,
        image_driver: Arc<dyn ImageDriver>,
        config: StoryboardConfig,
    ) -> Self {
        Self {
            expander: PromptExpander::new(structured.clone()),
            deriver: ImagePromptDeriver::new(structured),
            text_driver,
            image_driver,
            selector: None,
            config,
        }
    }

    /// Override image model selection for every request.
    pub fn with_model_selector(mut self, selector: Arc<dyn ModelSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &StoryboardConfig {
        &self.config
    }

    /// Run the whole pipeline for one topic.
    ///
    /// Planning failures (stages 1 and 2) are logged and returned; no partial
    /// board is produced. Once planning succeeds, text and images run
    /// concurrently and individual failures only shrink the board.
    ///
    /// # Errors
    ///
    /// Returns an error if the image model pool is unusable, or if prompt
    /// expansion or image prompt derivation fails. The pool is checked before
    /// any service is called.
    #[instrument(skip(self, topic), fields(text_model = %topic.text_model(), image_model = %topic.image_model()))]
    pub async fn generate_story(&self, topic: &StoryTopic) -> StoryboardResult<StoryBoard> {
        info!("Generating story");

        let image_generator = self
            .image_generator(topic)
            .inspect_err(|e| error!(error = %e, "Error generating story"))?;

        let parts = self
            .expander
            .expand(topic.prompt())
            .await
            .inspect_err(|e| error!(error = %e, "Error generating story"))?;

        let image_prompts = self
            .deriver
            .derive(&parts)
            .await
            .inspect_err(|e| error!(error = %e, "Error generating story"))?;

        let text_generator = self.text_generator(topic);

        let (story_text, story_images) = tokio::join!(
            text_generator.generate(&parts),
            image_generator.generate(&image_prompts)
        );

        info!(
            segments = story_text.story_points().len(),
            images = story_images.len(),
            "Story board assembled"
        );
        Ok(StoryBoard::new(story_text, story_images))
    }

    /// Text models offered by the text service.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be fetched.
    #[instrument(skip(self), fields(provider = self.text_driver.provider_name()))]
    pub async fn list_text_models(&self) -> StoryboardResult<Vec<String>> {
        self.text_driver.list_models().await
    }

    /// Image models offered by the image service.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be fetched.
    #[instrument(skip(self), fields(provider = self.image_driver.provider_name()))]
    pub async fn list_image_models(&self) -> StoryboardResult<Vec<String>> {
        self.image_driver.list_models().await
    }

    fn text_generator(&self, topic: &StoryTopic) -> SequentialTextGenerator {
        SequentialTextGenerator::new(self.text_driver.clone(), topic.text_model().to_string())
            .with_temperature(Some(self.config.text.temperature))
            .with_timeout(self.config.text.timeout())
    }

    fn image_generator(&self, topic: &StoryTopic) -> StoryboardResult<ConcurrentImageGenerator> {
        let image = &self.config.image;
        let selector: Arc<dyn ModelSelector> = match &self.selector {
            Some(selector) => selector.clone(),
            None if image.randomize_models => {
                Arc::new(RandomModelSelector::new(image.models.clone())?)
            }
            None => Arc::new(FixedModelSelector::new(topic.image_model().to_string())),
        };

        Ok(
            ConcurrentImageGenerator::new(self.image_driver.clone(), selector)
                .with_timeout(image.timeout())
                .with_retry(image.retry_policy())
                .with_size(image.width, image.height)
                .with_safety(image.safety()),
        )
    }
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("expander", &self.expander)
            .field("deriver", &self.deriver)
            .field("text_provider", &self.text_driver.provider_name())
            .field("image_provider", &self.image_driver.provider_name())
            .field("custom_selector", &self.selector.is_some())
            .field("config", &self.config)
            .finish()
    }
}
