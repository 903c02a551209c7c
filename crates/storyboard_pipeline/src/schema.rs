//! Response schemas for the two planning calls.
//!
//! Both documents are a list of strings. The planner may answer with the
//! named object (`{"story_part_prompts": [...]}`) or with the bare array;
//! anything else, including non-string entries, is rejected.

use serde_json::{Value, json};
use storyboard_core::{ImagePrompts, StoryPartPrompts};
use storyboard_error::{PipelineError, PipelineErrorKind, PipelineStage, StoryboardResult};
use storyboard_interface::ResponseSchema;

fn list_schema(field: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: {
                "type": "array",
                "description": description,
                "items": { "type": "string" }
            }
        },
        "required": [field]
    })
}

fn parse_string_list(value: Value, field: &str, stage: PipelineStage) -> StoryboardResult<Vec<String>> {
    let invalid = |message: String| {
        PipelineError::new(PipelineErrorKind::StructuredOutput { stage, message })
    };

    let list = match value {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove(field) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(invalid(format!("`{}` is not an array: {}", field, other)).into());
            }
            None => return Err(invalid(format!("missing field `{}`", field)).into()),
        },
        other => return Err(invalid(format!("expected an object or array, got {}", other)).into()),
    };

    list.into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(invalid(format!("entry {} is not a string: {}", i, other)).into()),
        })
        .collect()
}

/// Schema for the prompt expander's answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoryPartPromptsSchema;

impl ResponseSchema for StoryPartPromptsSchema {
    type Output = StoryPartPrompts;

    fn name() -> &'static str {
        "story_part_prompts"
    }

    fn json_schema() -> Value {
        list_schema(Self::name(), "One prompt per part of the story, in narrative order")
    }

    fn parse(value: Value) -> StoryboardResult<Self::Output> {
        parse_string_list(value, Self::name(), PipelineStage::PromptExpansion)
            .map(StoryPartPrompts::new)
    }
}

/// Schema for the image prompt deriver's answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagePromptsSchema;

impl ResponseSchema for ImagePromptsSchema {
    type Output = ImagePrompts;

    fn name() -> &'static str {
        "image_prompts"
    }

    fn json_schema() -> Value {
        list_schema(Self::name(), "One image prompt per story point, in story order")
    }

    fn parse(value: Value) -> StoryboardResult<Self::Output> {
        parse_string_list(value, Self::name(), PipelineStage::ImagePromptDerivation)
            .map(ImagePrompts::new)
    }
}
