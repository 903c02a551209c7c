//! Metrics for generation API calls.
//!
//! Provides OpenTelemetry-based metrics for tracking request volume, failures
//! and latency across every provider binding.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for generation API interactions, labeled by provider and model.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total generation API requests
    pub requests: Counter<u64>,
    /// Failed generation API requests
    pub errors: Counter<u64>,
    /// Generation API call duration in seconds
    pub duration: Histogram<f64>,
    /// Size of rendered images in bytes
    pub image_bytes: Histogram<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("storyboard_models");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total generation API requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed generation API requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("Generation API call duration")
                .build(),
            image_bytes: meter
                .u64_histogram("llm.image.bytes")
                .with_unit("bytes")
                .with_description("Size of rendered images")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a successful image render and its payload size.
    pub fn record_image(&self, provider: &str, model: &str, duration_secs: f64, bytes: usize) {
        self.record_request(provider, model, duration_secs);
        self.image_bytes.record(
            bytes as u64,
            &[
                KeyValue::new("provider", provider.to_string()),
                KeyValue::new("model", model.to_string()),
            ],
        );
    }

    /// Record a failed request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }
}

/// Classify an error for metrics labeling.
///
/// Returns one of: "rate_limit", "auth", "network", "timeout", "empty_response",
/// "invalid_request", "unknown"
pub fn classify_error(error: &dyn std::error::Error) -> &'static str {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("rate limit") || error_str.contains("429") {
        "rate_limit"
    } else if error_str.contains("auth") || error_str.contains("401") || error_str.contains("403")
    {
        "auth"
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        "timeout"
    } else if error_str.contains("empty") {
        "empty_response"
    } else if error_str.contains("network")
        || error_str.contains("connection")
        || error_str.contains("dns")
    {
        "network"
    } else if error_str.contains("400") || error_str.contains("invalid") {
        "invalid_request"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_error::HttpError;

    #[test]
    fn test_classify_error() {
        assert_eq!(classify_error(&HttpError::new("HTTP 429 Too Many Requests")), "rate_limit");
        assert_eq!(classify_error(&HttpError::new("401 unauthorized")), "auth");
        assert_eq!(classify_error(&HttpError::new("operation timed out")), "timeout");
        assert_eq!(classify_error(&HttpError::new("connection reset")), "network");
        assert_eq!(classify_error(&HttpError::new("Empty response body")), "empty_response");
        assert_eq!(classify_error(&HttpError::new("something odd")), "unknown");
    }
}
