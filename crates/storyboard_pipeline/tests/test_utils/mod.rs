//! Test utilities for pipeline tests.
//!
//! Mock implementations of the three generation services and a recording
//! model selector.

pub mod mock_drivers;

#[allow(unused_imports)]
pub use mock_drivers::{
    CountingSelector, MockBehavior, MockImageDriver, MockStructuredDriver, MockTextDriver,
};

use storyboard_pipeline::StoryboardConfig;

/// Configuration with the shipped defaults and no network endpoints involved.
#[allow(dead_code)]
pub fn test_config() -> StoryboardConfig {
    StoryboardConfig::default()
}
