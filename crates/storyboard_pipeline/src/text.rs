//! Sequential story text generation.
//!
//! Each segment is written with every previously accepted segment as context,
//! so the loop is strictly ordered: segment N is not requested until segment
//! N-1 has resolved. Failed segments are logged and dropped; they never reach
//! the context of later segments or the finished story.

use crate::StoryMetrics;
use std::sync::Arc;
use std::time::Duration;
use storyboard_core::{Message, StoryPartPrompts, StoryText, TextRequest};
use storyboard_error::{
    BuilderError, PipelineError, PipelineErrorKind, PipelineStage, StoryboardResult,
};
use storyboard_interface::TextDriver;
use tracing::{debug, info, instrument, warn};

/// Marker for a segment whose request exceeded its deadline.
pub const TEXT_TIMEOUT_MESSAGE: &str = "Story generation timed out. Please try again.";

/// Marker for a segment whose request failed.
pub const TEXT_ERROR_MESSAGE: &str = "An error occurred during story generation.";

/// Result of writing one story segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// The segment was written and joins the story
    Accepted(String),
    /// The request did not finish within the timeout
    TimedOut,
    /// The service reported an error or returned nothing usable
    Failed(String),
}

impl SegmentOutcome {
    /// The user-facing failure marker, if the segment failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_pipeline::{SegmentOutcome, TEXT_TIMEOUT_MESSAGE};
    ///
    /// assert_eq!(SegmentOutcome::TimedOut.failure_message(), Some(TEXT_TIMEOUT_MESSAGE));
    /// assert_eq!(SegmentOutcome::Accepted("Once".into()).failure_message(), None);
    /// ```
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            SegmentOutcome::Accepted(_) => None,
            SegmentOutcome::TimedOut => Some(TEXT_TIMEOUT_MESSAGE),
            SegmentOutcome::Failed(_) => Some(TEXT_ERROR_MESSAGE),
        }
    }

    /// The accepted text, if any.
    pub fn into_accepted(self) -> Option<String> {
        match self {
            SegmentOutcome::Accepted(text) => Some(text),
            _ => None,
        }
    }
}

/// Build the prompt for the next segment from the accepted segments so far.
///
/// With nothing accepted yet the prompt is sent as is.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::build_context;
///
/// assert_eq!(build_context(&[], "Begin"), "Begin");
///
/// let accepted = vec!["One.".to_string(), "Two.".to_string()];
/// assert_eq!(
///     build_context(&accepted, "Three"),
///     "Previous parts of the story:\nOne.\nTwo.\nContinue the story with:\nThree"
/// );
/// ```
pub fn build_context(accepted: &[String], prompt: &str) -> String {
    if accepted.is_empty() {
        return prompt.to_string();
    }

    format!(
        "Previous parts of the story:\n{}\nContinue the story with:\n{}",
        accepted.join("\n"),
        prompt
    )
}

/// Writes story segments one at a time against a text driver.
#[derive(Clone)]
pub struct SequentialTextGenerator {
    driver: Arc<dyn TextDriver>,
    model: String,
    temperature: Option<f32>,
    timeout: Duration,
}

impl SequentialTextGenerator {
    /// Default per-segment timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default sampling temperature.
    pub const DEFAULT_TEMPERATURE: f32 = 0.8;

    /// Create a generator for `model` with the default timeout and temperature.
    pub fn new(driver: Arc<dyn TextDriver>, model: impl Into<String>) -> Self {
        Self {
            driver,
            model: model.into(),
            temperature: Some(Self::DEFAULT_TEMPERATURE),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-segment timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model used for every segment.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Write the whole story.
    ///
    /// Never fails: the story holds only the accepted segments, in prompt order.
    #[instrument(skip(self, prompts), fields(model = %self.model, parts = prompts.len()))]
    pub async fn generate(&self, prompts: &StoryPartPrompts) -> StoryText {
        let mut accepted: Vec<String> = Vec::with_capacity(prompts.len());

        for (index, prompt) in prompts.iter().enumerate() {
            let outcome = self.generate_segment(prompt, &accepted).await;
            if let Some(marker) = outcome.failure_message() {
                warn!(index, marker, "Dropping story segment");
            }
            if let Some(text) = outcome.into_accepted() {
                accepted.push(text);
            }
        }

        info!(
            accepted = accepted.len(),
            requested = prompts.len(),
            "Generated story text"
        );
        StoryMetrics::get().record_segments(&self.model, prompts.len(), accepted.len());

        StoryText::untitled(accepted)
    }

    /// Write one segment given the segments accepted before it.
    #[instrument(skip_all, fields(model = %self.model, context_parts = accepted.len()))]
    pub async fn generate_segment(&self, prompt: &str, accepted: &[String]) -> SegmentOutcome {
        debug!("Requesting story segment");
        match self.request_segment(prompt, accepted).await {
            Ok(text) => SegmentOutcome::Accepted(text),
            Err(e) if e.is_timeout() => {
                warn!(timeout_secs = self.timeout.as_secs(), "Text generation timed out");
                SegmentOutcome::TimedOut
            }
            Err(e) => {
                warn!(error = %e, "Error generating text");
                SegmentOutcome::Failed(e.to_string())
            }
        }
    }

    async fn request_segment(&self, prompt: &str, accepted: &[String]) -> StoryboardResult<String> {
        let request = TextRequest::builder()
            .messages(vec![Message::user(build_context(accepted, prompt))])
            .model(self.model.clone())
            .temperature(self.temperature)
            .build()
            .map_err(BuilderError::from)?;

        let text = tokio::time::timeout(self.timeout, self.driver.generate_text(&request))
            .await
            .map_err(|_| {
                PipelineError::new(PipelineErrorKind::Timeout {
                    stage: PipelineStage::TextGeneration,
                    seconds: self.timeout.as_secs(),
                })
            })??;

        if text.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyResponse(
                PipelineStage::TextGeneration,
            ))
            .into());
        }
        Ok(text)
    }
}

impl std::fmt::Debug for SequentialTextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialTextGenerator")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}
