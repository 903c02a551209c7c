//! Concurrent image generation with timeout and bounded retry.
//!
//! Every prompt is rendered as its own future and all of them are polled
//! together. An attempt that times out, errors or returns no data is retried;
//! a prompt that exhausts its attempts yields no image. The survivors keep
//! their relative order.

use crate::StoryMetrics;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use storyboard_core::{ImagePrompts, ImageRequest, ImageSafety, StoryImages};
use storyboard_error::{
    BuilderError, PipelineError, PipelineErrorKind, PipelineStage, StoryboardError,
};
use storyboard_interface::{ImageDriver, ModelSelector};
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff};
use tracing::{debug, info, instrument, warn};

/// Bounded exponential backoff for image calls.
///
/// Waits between attempts double from `initial_backoff` and are capped at
/// `max_backoff`. The defaults give three attempts with waits of 4s then 8s.
///
/// The initial backoff is kept in whole, even milliseconds: odd values round
/// down and anything below 2ms becomes 2ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` counts the first call.
    pub fn new(max_attempts: usize, initial_backoff: Duration, max_backoff: Duration) -> Self {
        let half_ms = u64::try_from(initial_backoff.as_millis() / 2).unwrap_or(u64::MAX / 2);
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff: Duration::from_millis(half_ms.max(1) * 2),
            max_backoff,
        }
    }

    /// The first wait, after rounding.
    pub fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// The waits between attempts.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use storyboard_pipeline::RetryPolicy;
    ///
    /// let policy = RetryPolicy::new(4, Duration::from_secs(4), Duration::from_secs(10));
    /// let delays: Vec<Duration> = policy.delays().collect();
    /// assert_eq!(
    ///     delays,
    ///     vec![Duration::from_secs(4), Duration::from_secs(8), Duration::from_secs(10)]
    /// );
    /// ```
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        // Delay n is base^n * factor, so base 2 with factor initial/2 starts at `initial`.
        let half_initial_ms = u64::try_from(self.initial_backoff.as_millis() / 2).unwrap_or(1);
        ExponentialBackoff::from_millis(2)
            .factor(half_initial_ms)
            .max_delay(self.max_backoff)
            .take(self.max_attempts - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(4), Duration::from_secs(10))
    }
}

/// Renders image prompts concurrently against an image driver.
#[derive(Clone)]
pub struct ConcurrentImageGenerator {
    driver: Arc<dyn ImageDriver>,
    selector: Arc<dyn ModelSelector>,
    safety: ImageSafety,
    width: u32,
    height: u32,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ConcurrentImageGenerator {
    /// Default per-attempt timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

    /// Default square edge in pixels.
    pub const DEFAULT_SIZE: u32 = 512;

    /// Create a generator with default flags, size, timeout and retry policy.
    pub fn new(driver: Arc<dyn ImageDriver>, selector: Arc<dyn ModelSelector>) -> Self {
        Self {
            driver,
            selector,
            safety: ImageSafety::default(),
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            timeout: Self::DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the output dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the moderation and formatting flags.
    pub fn with_safety(mut self, safety: ImageSafety) -> Self {
        self.safety = safety;
        self
    }

    /// Render every prompt and keep the successes in prompt order.
    ///
    /// Never fails. The success count is logged and recorded in [`StoryMetrics`].
    #[instrument(skip(self, prompts), fields(provider = self.driver.provider_name(), prompts = prompts.len()))]
    pub async fn generate(&self, prompts: &ImagePrompts) -> StoryImages {
        info!("Starting generation of {} images", prompts.len());

        let results = join_all(
            prompts
                .iter()
                .enumerate()
                .map(|(index, prompt)| self.generate_one(index, prompt)),
        )
        .await;

        let total = results.len();
        let images: StoryImages = results.into_iter().flatten().collect();

        info!(
            successful = images.len(),
            total,
            "Successfully generated {}/{} images",
            images.len(),
            total
        );
        StoryMetrics::get().record_images(total, images.len());

        images
    }

    /// Render one prompt, retrying failed or timed-out attempts.
    #[instrument(skip(self, prompt))]
    pub async fn generate_one(&self, index: usize, prompt: &str) -> Option<Vec<u8>> {
        let model = self.selector.select_model();

        let request = match self.build_request(model, prompt) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Could not build image request");
                return None;
            }
        };

        debug!(model = %request.model(), "Rendering image");
        let this = self;
        let request = &request;
        let outcome = Retry::spawn(self.retry.delays(), move || async move {
            this.attempt(request).await.map_err(|err| RetryError::Transient {
                err,
                retry_after: None,
            })
        })
        .await;

        match outcome {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(
                    error = %e,
                    attempts = self.retry.max_attempts(),
                    prompt = %truncate(prompt, 100),
                    "Giving up on image"
                );
                None
            }
        }
    }

    fn build_request(&self, model: String, prompt: &str) -> Result<ImageRequest, BuilderError> {
        Ok(ImageRequest::builder()
            .model(model)
            .prompt(prompt)
            .safety(self.safety)
            .width(self.width)
            .height(self.height)
            .build()?)
    }

    async fn attempt(&self, request: &ImageRequest) -> Result<Vec<u8>, StoryboardError> {
        match tokio::time::timeout(self.timeout, self.driver.generate_image(request)).await {
            Ok(Ok(bytes)) if bytes.is_empty() => {
                warn!(model = %request.model(), "Image attempt returned no data");
                Err(PipelineError::new(PipelineErrorKind::EmptyResponse(
                    PipelineStage::ImageGeneration,
                ))
                .into())
            }
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => {
                warn!(error = %e, model = %request.model(), "Image attempt failed");
                Err(e)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    model = %request.model(),
                    "Image attempt timed out"
                );
                Err(PipelineError::new(PipelineErrorKind::Timeout {
                    stage: PipelineStage::ImageGeneration,
                    seconds: self.timeout.as_secs(),
                })
                .into())
            }
        }
    }
}

impl std::fmt::Debug for ConcurrentImageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentImageGenerator")
            .field("provider", &self.driver.provider_name())
            .field("safety", &self.safety)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
