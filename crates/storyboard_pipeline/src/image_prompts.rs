//! Story-part prompts to image prompts.

use crate::{ImagePromptsSchema, image_prompt_system_instruction, image_prompt_user_instruction};
use std::sync::Arc;
use storyboard_core::{ImagePrompts, StoryPartPrompts};
use storyboard_error::StoryboardResult;
use storyboard_interface::{StructuredDriver, generate_structured};
use tracing::{info, instrument, warn};

/// Derives one visual prompt per story point with one structured call.
#[derive(Clone)]
pub struct ImagePromptDeriver {
    driver: Arc<dyn StructuredDriver>,
}

impl ImagePromptDeriver {
    /// Create a deriver backed by a structured-output driver.
    pub fn new(driver: Arc<dyn StructuredDriver>) -> Self {
        Self { driver }
    }

    /// Derive image prompts for the given story parts.
    ///
    /// The result is expected to be index-aligned with `parts`, but the count
    /// is whatever the planner returned; a mismatch is logged, not corrected.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or the answer does not match
    /// [`ImagePromptsSchema`]. Failures are not retried.
    #[instrument(skip(self, parts), fields(provider = self.driver.provider_name(), parts = parts.len()))]
    pub async fn derive(&self, parts: &StoryPartPrompts) -> StoryboardResult<ImagePrompts> {
        let prompts = generate_structured::<ImagePromptsSchema>(
            self.driver.as_ref(),
            image_prompt_system_instruction(),
            &image_prompt_user_instruction(parts),
        )
        .await?;

        if prompts.len() != parts.len() {
            warn!(
                parts = parts.len(),
                image_prompts = prompts.len(),
                "Image prompt count differs from story part count"
            );
        }

        info!(image_prompts = prompts.len(), "Derived image prompts");
        Ok(prompts)
    }
}

impl std::fmt::Debug for ImagePromptDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePromptDeriver")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .finish()
    }
}
