//! Topic to story-part prompts.

use crate::{StoryPartPromptsSchema, story_part_system_instruction, story_part_user_instruction};
use std::sync::Arc;
use storyboard_core::StoryPartPrompts;
use storyboard_error::StoryboardResult;
use storyboard_interface::{StructuredDriver, generate_structured};
use tracing::{debug, info, instrument};

/// Plans a story as an ordered list of part prompts with one structured call.
///
/// Failures are returned unchanged; nothing downstream can run without a plan.
#[derive(Clone)]
pub struct PromptExpander {
    driver: Arc<dyn StructuredDriver>,
}

impl PromptExpander {
    /// Create an expander backed by a structured-output driver.
    pub fn new(driver: Arc<dyn StructuredDriver>) -> Self {
        Self { driver }
    }

    /// Expand a raw topic into story-part prompts.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or the answer does not match
    /// [`StoryPartPromptsSchema`].
    #[instrument(skip(self, topic), fields(provider = self.driver.provider_name(), topic_len = topic.len()))]
    pub async fn expand(&self, topic: &str) -> StoryboardResult<StoryPartPrompts> {
        debug!("Requesting story-part prompts");
        let prompts = generate_structured::<StoryPartPromptsSchema>(
            self.driver.as_ref(),
            story_part_system_instruction(),
            &story_part_user_instruction(topic),
        )
        .await?;

        info!(parts = prompts.len(), "Expanded topic into story parts");
        Ok(prompts)
    }
}

impl std::fmt::Debug for PromptExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptExpander")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .finish()
    }
}
