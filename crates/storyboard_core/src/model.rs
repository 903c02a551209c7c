//! Model identifiers accepted by the generation services.

use serde::{Deserialize, Serialize};

/// Text models offered to story consumers.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use storyboard_core::TextModel;
///
/// assert_eq!(TextModel::from_str("mistral").unwrap(), TextModel::Mistral);
/// assert_eq!(TextModel::default().to_string(), "openai");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TextModel {
    /// OpenAI-backed text model
    #[default]
    Openai,
    /// Mistral text model
    Mistral,
    /// Search-augmented GPT model
    Searchgpt,
    /// Music-oriented text model
    Midijourney,
}

/// Image model variants.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use storyboard_core::ImageModel;
///
/// assert_eq!(ImageModel::from_str("flux-pro").unwrap(), ImageModel::FluxPro);
/// assert_eq!(ImageModel::Flux3d.as_ref(), "flux-3d");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ImageModel {
    /// Flux base model
    #[default]
    #[serde(rename = "flux")]
    #[strum(serialize = "flux")]
    Flux,
    /// Flux tuned for 3D renders
    #[serde(rename = "flux-3d")]
    #[strum(serialize = "flux-3d")]
    Flux3d,
    /// Flux professional model
    #[serde(rename = "flux-pro")]
    #[strum(serialize = "flux-pro")]
    FluxPro,
    /// Fast low-step model
    #[serde(rename = "turbo")]
    #[strum(serialize = "turbo")]
    Turbo,
}
