//! Image model selection strategies.

use rand::seq::SliceRandom;
use storyboard_error::{ConfigError, StoryboardResult};
use storyboard_interface::ModelSelector;

/// Picks a model uniformly at random from a fixed pool, independently per call.
///
/// # Examples
///
/// ```
/// use storyboard_interface::ModelSelector;
/// use storyboard_pipeline::RandomModelSelector;
///
/// let selector = RandomModelSelector::new(vec!["flux".into(), "turbo".into()]).unwrap();
/// let model = selector.select_model();
/// assert!(model == "flux" || model == "turbo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomModelSelector {
    models: Vec<String>,
}

impl RandomModelSelector {
    /// Create a selector over a non-empty pool.
    ///
    /// # Errors
    ///
    /// Returns an error if `models` is empty.
    pub fn new(models: Vec<String>) -> StoryboardResult<Self> {
        if models.is_empty() {
            return Err(ConfigError::new("image model pool is empty").into());
        }
        Ok(Self { models })
    }

    /// The candidate pool.
    pub fn models(&self) -> &[String] {
        &self.models
    }
}

impl ModelSelector for RandomModelSelector {
    fn select_model(&self) -> String {
        // Pool is non-empty by construction.
        self.models
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

/// Always returns the same model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedModelSelector {
    model: String,
}

impl FixedModelSelector {
    /// Pin selection to `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl ModelSelector for FixedModelSelector {
    fn select_model(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_selector_rejects_empty_pool() {
        assert!(RandomModelSelector::new(Vec::new()).is_err());
    }

    #[test]
    fn test_random_selector_stays_in_pool_and_varies() {
        let pool = vec!["flux".to_string(), "flux-3d".into(), "flux-pro".into(), "turbo".into()];
        let selector = RandomModelSelector::new(pool.clone()).unwrap();

        let seen: HashSet<String> = (0..400).map(|_| selector.select_model()).collect();
        assert!(seen.iter().all(|m| pool.contains(m)));
        assert!(seen.len() > 1, "400 draws from 4 models should not all agree");
    }

    #[test]
    fn test_fixed_selector() {
        let selector = FixedModelSelector::new("turbo");
        assert_eq!(selector.select_model(), "turbo");
        assert_eq!(selector.select_model(), "turbo");
    }
}
