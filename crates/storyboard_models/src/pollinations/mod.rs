//! Pollinations text and image generation.
//!
//! Pollinations needs no credentials. Text goes through its OpenAI-compatible
//! endpoint; images are rendered by a plain GET on a prompt URL.

mod image;
mod text;

pub use image::{POLLINATIONS_IMAGE_URL, PollinationsImageClient, image_url};
pub use text::{POLLINATIONS_TEXT_URL, PollinationsTextClient};

use storyboard_error::{ModelsError, ModelsErrorKind, PollinationsErrorKind};

/// Parse a model catalog: either a list of names or a list of objects with a `name`.
fn parse_model_catalog(value: serde_json::Value) -> Result<Vec<String>, ModelsError> {
    let entries = value.as_array().ok_or_else(|| {
        ModelsError::new(ModelsErrorKind::Pollinations(
            PollinationsErrorKind::ResponseConversion("Model catalog is not a JSON array".to_string()),
        ))
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| match entry {
            serde_json::Value::String(name) => Some(name.clone()),
            serde_json::Value::Object(fields) => fields
                .get("name")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .collect())
}

/// Fetch and parse a model catalog.
async fn fetch_model_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<String>, ModelsError> {
    let response = client.get(url).send().await.map_err(|e| {
        ModelsError::new(ModelsErrorKind::Pollinations(PollinationsErrorKind::Request(
            e.to_string(),
        )))
    })?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ModelsError::new(ModelsErrorKind::Pollinations(
            PollinationsErrorKind::Status {
                status_code: status.as_u16(),
                message,
            },
        )));
    }

    let value: serde_json::Value = response.json().await.map_err(|e| {
        ModelsError::new(ModelsErrorKind::Pollinations(
            PollinationsErrorKind::ResponseConversion(e.to_string()),
        ))
    })?;

    parse_model_catalog(value)
}
