//! Pollinations image rendering.

use super::fetch_model_catalog;
use crate::LlmMetrics;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Instant;
use storyboard_core::ImageRequest;
use storyboard_error::{ModelsError, ModelsErrorKind, PollinationsErrorKind, StoryboardResult};
use storyboard_interface::ImageDriver;
use tracing::{debug, error, instrument};

/// Pollinations image service root.
pub const POLLINATIONS_IMAGE_URL: &str = "https://image.pollinations.ai";

/// Build the GET URL that renders `req`.
///
/// The prompt becomes a percent-encoded path segment under `/prompt/`; model,
/// dimensions, seed and flags become query parameters.
///
/// # Errors
///
/// Returns an error if `base_url` is not an absolute URL that can have a path.
///
/// # Examples
///
/// ```
/// use storyboard_core::ImageRequest;
/// use storyboard_models::image_url;
///
/// let req = ImageRequest::builder()
///     .model("turbo")
///     .prompt("a red kite")
///     .width(512u32)
///     .height(512u32)
///     .build()
///     .unwrap();
/// let url = image_url("https://image.pollinations.ai", &req).unwrap();
/// assert_eq!(url.path(), "/prompt/a%20red%20kite");
/// assert!(url.query().unwrap().contains("model=turbo"));
/// ```
pub fn image_url(base_url: &str, req: &ImageRequest) -> Result<Url, ModelsError> {
    let invalid = |message: String| {
        ModelsError::new(ModelsErrorKind::Pollinations(
            PollinationsErrorKind::InvalidUrl(message),
        ))
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(format!("{}: {}", base_url, e)))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| invalid(format!("{} cannot have a path", base_url)))?;
        segments.pop_if_empty().push("prompt").push(req.prompt());
    }

    {
        let safety = req.safety();
        let mut query = url.query_pairs_mut();
        query
            .append_pair("model", req.model())
            .append_pair("width", &req.width().to_string())
            .append_pair("height", &req.height().to_string())
            .append_pair("safe", bool_flag(*safety.safe()))
            .append_pair("nologo", bool_flag(*safety.nologo()))
            .append_pair("private", bool_flag(*safety.private()))
            .append_pair("enhance", bool_flag(*safety.enhance()));
        if let Some(seed) = req.seed() {
            query.append_pair("seed", &seed.to_string());
        }
    }

    Ok(url)
}

fn bool_flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Image generation client for Pollinations.
#[derive(Debug, Clone)]
pub struct PollinationsImageClient {
    client: Client,
    base_url: String,
}

impl PollinationsImageClient {
    /// Client for the public Pollinations endpoint.
    pub fn new() -> Self {
        Self::with_base_url(POLLINATIONS_IMAGE_URL)
    }

    /// Client for a custom service root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, req: &ImageRequest) -> Result<Vec<u8>, ModelsError> {
        let url = image_url(&self.base_url, req)?;
        debug!(url = %url, "Requesting image");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            ModelsError::new(ModelsErrorKind::Pollinations(PollinationsErrorKind::Request(
                e.to_string(),
            )))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "Image API error");
            return Err(ModelsError::new(ModelsErrorKind::Pollinations(
                PollinationsErrorKind::Status {
                    status_code: status.as_u16(),
                    message,
                },
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::Pollinations(
                PollinationsErrorKind::ResponseConversion(e.to_string()),
            ))
        })?;

        if bytes.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::Pollinations(
                PollinationsErrorKind::EmptyBody,
            )));
        }

        debug!(size = bytes.len(), "Received image");
        Ok(bytes.to_vec())
    }
}

impl Default for PollinationsImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageDriver for PollinationsImageClient {
    #[instrument(skip(self, req), fields(provider = "pollinations", model = %req.model()))]
    async fn generate_image(&self, req: &ImageRequest) -> StoryboardResult<Vec<u8>> {
        let metrics = LlmMetrics::get();
        let started = Instant::now();

        match self.fetch(req).await {
            Ok(bytes) => {
                metrics.record_image(
                    "pollinations",
                    req.model(),
                    started.elapsed().as_secs_f64(),
                    bytes.len(),
                );
                Ok(bytes)
            }
            Err(e) => {
                metrics.record_error("pollinations", req.model(), crate::classify_error(&e));
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_models(&self) -> StoryboardResult<Vec<String>> {
        let url = format!("{}/models", self.base_url.trim_end_matches('/'));
        Ok(fetch_model_catalog(&self.client, &url).await?)
    }

    fn provider_name(&self) -> &'static str {
        "pollinations"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::ImageSafety;

    fn request(prompt: &str) -> ImageRequest {
        ImageRequest::builder()
            .model("flux-pro")
            .prompt(prompt)
            .width(512u32)
            .height(512u32)
            .build()
            .unwrap()
    }

    #[test]
    fn test_image_url_carries_default_flags() {
        let url = image_url(POLLINATIONS_IMAGE_URL, &request("owl")).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("model".into(), "flux-pro".into())));
        assert!(pairs.contains(&("safe".into(), "false".into())));
        assert!(pairs.contains(&("nologo".into(), "true".into())));
        assert!(pairs.contains(&("private".into(), "true".into())));
        assert!(pairs.contains(&("enhance".into(), "true".into())));
        assert!(pairs.contains(&("width".into(), "512".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "seed"));
    }

    #[test]
    fn test_image_url_encodes_reserved_characters() {
        let url = image_url(POLLINATIONS_IMAGE_URL, &request("cats/dogs? yes")).unwrap();
        assert_eq!(url.path(), "/prompt/cats%2Fdogs%3F%20yes");
    }

    #[test]
    fn test_image_url_includes_seed_and_custom_flags() {
        let req = ImageRequest::builder()
            .model("flux")
            .prompt("moon")
            .width(256u32)
            .height(256u32)
            .safety(ImageSafety::new(true, false, false, false))
            .seed(Some(42u64))
            .build()
            .unwrap();
        let url = image_url("https://example.test/", &req).unwrap();
        let query = url.query().unwrap();

        assert!(query.contains("seed=42"));
        assert!(query.contains("safe=true"));
        assert!(query.contains("nologo=false"));
        assert_eq!(url.path(), "/prompt/moon");
    }

    #[test]
    fn test_image_url_rejects_relative_base() {
        assert!(image_url("not a url", &request("owl")).is_err());
    }
}
