//! Story-level OpenTelemetry counters.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<StoryMetrics> = OnceLock::new();

/// Counters for requested versus delivered story content.
#[derive(Clone)]
pub struct StoryMetrics {
    _meter: Meter,
    /// Image prompts submitted for rendering
    pub images_requested: Counter<u64>,
    /// Images successfully rendered
    pub images_generated: Counter<u64>,
    /// Story segments submitted for writing
    pub segments_requested: Counter<u64>,
    /// Story segments accepted into the story
    pub segments_accepted: Counter<u64>,
}

impl StoryMetrics {
    fn init() -> Self {
        let meter = global::meter("storyboard_pipeline");

        Self {
            _meter: meter.clone(),
            images_requested: meter
                .u64_counter("story.images.requested")
                .with_description("Image prompts submitted for rendering")
                .build(),
            images_generated: meter
                .u64_counter("story.images.generated")
                .with_description("Images successfully rendered")
                .build(),
            segments_requested: meter
                .u64_counter("story.segments.requested")
                .with_description("Story segments submitted for writing")
                .build(),
            segments_accepted: meter
                .u64_counter("story.segments.accepted")
                .with_description("Story segments accepted into the story")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record the outcome of one image fan-out.
    pub fn record_images(&self, requested: usize, generated: usize) {
        self.images_requested.add(requested as u64, &[]);
        self.images_generated.add(generated as u64, &[]);
    }

    /// Record the outcome of one text pass.
    pub fn record_segments(&self, model: &str, requested: usize, accepted: usize) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.segments_requested.add(requested as u64, labels);
        self.segments_accepted.add(accepted as u64, labels);
    }
}
