use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use storyboard_error::{JsonError, StoryboardResult};
use storyboard_interface::{ResponseSchema, StructuredDriver, StructuredRequest, generate_structured};

struct WordList;

impl ResponseSchema for WordList {
    type Output = Vec<String>;

    fn name() -> &'static str {
        "word_list"
    }

    fn json_schema() -> Value {
        json!({"type": "object", "properties": {"words": {"type": "array", "items": {"type": "string"}}}})
    }

    fn parse(value: Value) -> StoryboardResult<Self::Output> {
        let words = value
            .get("words")
            .and_then(Value::as_array)
            .ok_or_else(|| JsonError::new("missing words"))?;
        words
            .iter()
            .map(|w| {
                w.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| JsonError::new("non-string word").into())
            })
            .collect()
    }
}

struct CannedDriver {
    response: Value,
    seen: Mutex<Vec<StructuredRequest>>,
}

#[async_trait]
impl StructuredDriver for CannedDriver {
    async fn generate_structured(&self, req: &StructuredRequest) -> StoryboardResult<Value> {
        self.seen.lock().unwrap().push(req.clone());
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &'static str {
        "canned"
    }

    fn model_name(&self) -> &str {
        "canned-1"
    }
}

#[tokio::test]
async fn test_generate_structured_parses_valid_document() {
    let driver = CannedDriver {
        response: json!({"words": ["moon", "owl"]}),
        seen: Mutex::new(Vec::new()),
    };

    let words = generate_structured::<WordList>(&driver, "You list words", "Two night words")
        .await
        .unwrap();

    assert_eq!(words, vec!["moon", "owl"]);

    let seen = driver.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(*seen[0].schema_name(), "word_list");
    assert_eq!(seen[0].user_instruction(), "Two night words");
}

#[tokio::test]
async fn test_generate_structured_rejects_nonconforming_document() {
    let driver = CannedDriver {
        response: json!({"words": ["moon", 7]}),
        seen: Mutex::new(Vec::new()),
    };

    let result = generate_structured::<WordList>(&driver, "You list words", "Two words").await;
    assert!(result.is_err());
}

#[test]
fn test_system_with_schema_embeds_schema() {
    let request = StructuredRequest::for_schema::<WordList>("You list words", "Any");
    let system = request.system_with_schema();

    assert!(system.starts_with("You list words"));
    assert!(system.contains("word_list"));
    assert!(system.contains("\"words\""));
}
