//! Configuration for the story pipeline and its services.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - ~/.config/storyboard/storyboard.toml
//! - ./storyboard.toml
//! - `STORYBOARD__SECTION__KEY` environment variables; the image model pool
//!   takes a comma-separated list (`STORYBOARD__IMAGE__MODELS=flux,turbo`)

use crate::RetryPolicy;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyboard_core::{ImageSafety, TextModel};
use storyboard_error::{ConfigError, StoryboardError, StoryboardResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

fn environment() -> Environment {
    Environment::with_prefix("STORYBOARD")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("image.models")
}

/// Structured-output planner settings.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StructuredConfig {
    /// Provider name
    pub provider: String,
    /// Planner model
    pub model: String,
    /// Chat completions endpoint
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token limit
    pub max_tokens: u32,
    /// API key; normally supplied by the caller rather than stored in a file
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for StructuredConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            temperature: 0.8,
            max_tokens: 16384,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for StructuredConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Story text settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    /// Chat completions endpoint
    pub base_url: String,
    /// Model catalog endpoint
    pub models_url: String,
    /// Text model used when the caller does not pick one
    pub model: TextModel,
    /// Sampling temperature
    pub temperature: f32,
    /// Per-segment timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            base_url: "https://text.pollinations.ai/openai".to_string(),
            models_url: "https://text.pollinations.ai/models".to_string(),
            model: TextModel::default(),
            temperature: 0.8,
            timeout_secs: 30,
        }
    }
}

impl TextConfig {
    /// Per-segment timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Illustration settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Image service root
    pub base_url: String,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Pool for random model selection
    pub models: Vec<String>,
    /// Pick a model from `models` per image instead of using the topic's model
    pub randomize_models: bool,
    /// Attempts per image, including the first
    pub max_attempts: usize,
    /// Wait before the first retry, in milliseconds
    pub initial_backoff_ms: u64,
    /// Upper bound on any wait, in milliseconds
    pub max_backoff_ms: u64,
    /// Enable the provider's unsafe-content filter
    pub safe: bool,
    /// Suppress the provider watermark
    pub nologo: bool,
    /// Keep results out of public feeds
    pub private: bool,
    /// Let the provider enhance prompts
    pub enhance: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://image.pollinations.ai".to_string(),
            timeout_secs: 90,
            width: 512,
            height: 512,
            models: ["flux", "flux-3d", "flux-pro", "turbo"]
                .into_iter()
                .map(String::from)
                .collect(),
            randomize_models: true,
            max_attempts: 3,
            initial_backoff_ms: 4000,
            max_backoff_ms: 10000,
            safe: false,
            nologo: true,
            private: true,
            enhance: true,
        }
    }
}

impl ImageConfig {
    /// Per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy built from the attempt and backoff settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }

    /// Moderation and formatting flags.
    pub fn safety(&self) -> ImageSafety {
        ImageSafety::new(self.safe, self.nologo, self.private, self.enhance)
    }
}

/// Top-level Storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_pipeline::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// println!("Image timeout: {:?}", config.image.timeout());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct StoryboardConfig {
    /// Structured-output planner
    #[serde(default)]
    pub structured: StructuredConfig,
    /// Story text
    #[serde(default)]
    pub text: TextConfig,
    /// Illustrations
    #[serde(default)]
    pub image: ImageConfig,
}

impl StoryboardConfig {
    /// Load configuration from a specific file path.
    ///
    /// Settings missing from the file take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is invalid.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("storyboard").required(false))
            .add_source(environment());

        let config: Self = builder
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.timeout_secs == 0 {
            return Err(ConfigError::new("text.timeout_secs must be greater than 0"));
        }
        if self.image.timeout_secs == 0 {
            return Err(ConfigError::new("image.timeout_secs must be greater than 0"));
        }
        if self.image.max_attempts == 0 {
            return Err(ConfigError::new("image.max_attempts must be at least 1"));
        }
        if self.image.width == 0 || self.image.height == 0 {
            return Err(ConfigError::new("image.width and image.height must be greater than 0"));
        }
        if self.image.randomize_models && self.image.models.is_empty() {
            return Err(ConfigError::new(
                "image.models must not be empty when image.randomize_models is set",
            ));
        }
        if self.image.initial_backoff_ms < 2 || self.image.initial_backoff_ms % 2 != 0 {
            return Err(ConfigError::new(
                "image.initial_backoff_ms must be an even number of at least 2",
            ));
        }
        if self.image.initial_backoff_ms > self.image.max_backoff_ms {
            return Err(ConfigError::new(
                "image.initial_backoff_ms must not exceed image.max_backoff_ms",
            ));
        }
        for (name, temperature) in [
            ("structured.temperature", self.structured.temperature),
            ("text.temperature", self.text.temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::new(format!("{} must be between 0 and 2", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_match_builtin_defaults() {
        let bundled: StoryboardConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(bundled, StoryboardConfig::default());
    }

    #[test]
    fn test_environment_overrides_model_pool_and_scalars() {
        let vars = config::Map::from([
            ("STORYBOARD__IMAGE__MODELS".to_string(), "turbo,flux-pro".to_string()),
            ("STORYBOARD__IMAGE__TIMEOUT_SECS".to_string(), "120".to_string()),
            ("STORYBOARD__TEXT__MODEL".to_string(), "mistral".to_string()),
        ]);
        let config: StoryboardConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.image.models, vec!["turbo", "flux-pro"]);
        assert_eq!(config.image.timeout_secs, 120);
        assert_eq!(config.text.model, TextModel::Mistral);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = ImageConfig::default().retry_policy();
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn test_default_safety_flags() {
        assert_eq!(ImageConfig::default().safety(), ImageSafety::default());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = StructuredConfig {
            api_key: Some("gsk-secret".to_string()),
            ..StructuredConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("gsk-secret"));
        assert!(printed.contains("redacted"));
    }
}
