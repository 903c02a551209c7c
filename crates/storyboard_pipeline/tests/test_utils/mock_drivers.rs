//! Mock generation services.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyboard_core::{ImageRequest, TextRequest};
use storyboard_error::{HttpError, StoryboardResult};
use storyboard_interface::{
    ImageDriver, ModelSelector, StructuredDriver, StructuredRequest, TextDriver,
};

/// How a mock service answers one prompt.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockBehavior {
    /// Answer immediately
    Success,
    /// Always fail
    Error,
    /// Fail N times, then answer
    FailThenSucceed {
        /// Failures before the first success
        fail_count: usize,
    },
    /// Answer after a delay
    Delay(Duration),
    /// Never answer within any realistic timeout
    Hang,
    /// Answer immediately with no content
    Empty,
}

async fn apply(behavior: &MockBehavior, calls_so_far: usize) -> StoryboardResult<()> {
    match behavior {
        MockBehavior::Success | MockBehavior::Empty => Ok(()),
        MockBehavior::Error => Err(HttpError::new("mock service failure"))?,
        MockBehavior::FailThenSucceed { fail_count } => {
            if calls_so_far < *fail_count {
                Err(HttpError::new("mock transient failure"))?
            } else {
                Ok(())
            }
        }
        MockBehavior::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            Ok(())
        }
        MockBehavior::Hang => {
            tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
            Ok(())
        }
    }
}

/// Structured driver answering from canned documents keyed by schema name.
#[derive(Clone, Default)]
pub struct MockStructuredDriver {
    responses: HashMap<&'static str, Result<Value, String>>,
    requests: Arc<Mutex<Vec<StructuredRequest>>>,
}

#[allow(dead_code)]
impl MockStructuredDriver {
    /// Driver with no canned answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `schema` with `document`.
    pub fn with_response(mut self, schema: &'static str, document: Value) -> Self {
        self.responses.insert(schema, Ok(document));
        self
    }

    /// Fail every request for `schema`.
    pub fn with_failure(mut self, schema: &'static str, message: impl Into<String>) -> Self {
        self.responses.insert(schema, Err(message.into()));
        self
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<StructuredRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredDriver for MockStructuredDriver {
    async fn generate_structured(&self, req: &StructuredRequest) -> StoryboardResult<Value> {
        self.requests.lock().unwrap().push(req.clone());
        match self.responses.get(req.schema_name()) {
            Some(Ok(document)) => Ok(document.clone()),
            Some(Err(message)) => Err(HttpError::new(message.clone()))?,
            None => Err(HttpError::new(format!("no canned answer for {}", req.schema_name())))?,
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-planner"
    }
}

/// Text driver answering `"Text for <prompt>"`, where the prompt is the last
/// line of the user message.
#[derive(Clone, Default)]
pub struct MockTextDriver {
    behaviors: HashMap<String, MockBehavior>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
    requests: Arc<Mutex<Vec<TextRequest>>>,
    models: Vec<String>,
}

#[allow(dead_code)]
impl MockTextDriver {
    /// Driver that answers every prompt immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `behavior` for `prompt`.
    pub fn with_behavior(mut self, prompt: impl Into<String>, behavior: MockBehavior) -> Self {
        self.behaviors.insert(prompt.into(), behavior);
        self
    }

    /// Models returned by `list_models`.
    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// User message contents seen so far, in call order.
    pub fn contents(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.messages()[0].content().clone())
            .collect()
    }

    /// The answer the mock gives for `prompt`.
    pub fn answer_for(prompt: &str) -> String {
        format!("Text for {}", prompt)
    }
}

#[async_trait]
impl TextDriver for MockTextDriver {
    async fn generate_text(&self, req: &TextRequest) -> StoryboardResult<String> {
        self.requests.lock().unwrap().push(req.clone());

        let content = req.messages()[0].content().clone();
        let prompt = content.lines().last().unwrap_or_default().to_string();

        let calls_so_far = {
            let mut calls = self.calls.lock().unwrap();
            let entry = calls.entry(prompt.clone()).or_insert(0);
            let seen = *entry;
            *entry += 1;
            seen
        };

        let behavior = self
            .behaviors
            .get(&prompt)
            .cloned()
            .unwrap_or(MockBehavior::Success);
        apply(&behavior, calls_so_far).await?;

        if matches!(behavior, MockBehavior::Empty) {
            return Ok("  \n".to_string());
        }
        Ok(Self::answer_for(&prompt))
    }

    async fn list_models(&self) -> StoryboardResult<Vec<String>> {
        Ok(self.models.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Image driver answering with the prompt's bytes.
#[derive(Clone, Default)]
pub struct MockImageDriver {
    behaviors: HashMap<String, MockBehavior>,
    default_behavior: Option<MockBehavior>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
    models: Vec<String>,
}

#[allow(dead_code)]
impl MockImageDriver {
    /// Driver that renders every prompt immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `behavior` for `prompt`.
    pub fn with_behavior(mut self, prompt: impl Into<String>, behavior: MockBehavior) -> Self {
        self.behaviors.insert(prompt.into(), behavior);
        self
    }

    /// Use `behavior` for every prompt without its own behavior.
    pub fn with_default_behavior(mut self, behavior: MockBehavior) -> Self {
        self.default_behavior = Some(behavior);
        self
    }

    /// Models returned by `list_models`.
    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Number of calls made for `prompt`.
    pub fn call_count(&self, prompt: &str) -> usize {
        self.calls.lock().unwrap().get(prompt).copied().unwrap_or(0)
    }

    /// Total calls across all prompts.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn generate_image(&self, req: &ImageRequest) -> StoryboardResult<Vec<u8>> {
        self.requests.lock().unwrap().push(req.clone());

        let calls_so_far = {
            let mut calls = self.calls.lock().unwrap();
            let entry = calls.entry(req.prompt().clone()).or_insert(0);
            let seen = *entry;
            *entry += 1;
            seen
        };

        let behavior = self
            .behaviors
            .get(req.prompt())
            .or(self.default_behavior.as_ref())
            .cloned()
            .unwrap_or(MockBehavior::Success);
        apply(&behavior, calls_so_far).await?;

        if matches!(behavior, MockBehavior::Empty) {
            return Ok(Vec::new());
        }
        Ok(req.prompt().as_bytes().to_vec())
    }

    async fn list_models(&self) -> StoryboardResult<Vec<String>> {
        Ok(self.models.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Selector cycling through a fixed list and counting invocations.
#[derive(Debug, Default)]
pub struct CountingSelector {
    models: Vec<String>,
    calls: Mutex<usize>,
}

#[allow(dead_code)]
impl CountingSelector {
    /// Cycle through `models`.
    pub fn new(models: &[&str]) -> Self {
        Self {
            models: models.iter().map(|m| m.to_string()).collect(),
            calls: Mutex::new(0),
        }
    }

    /// Number of selections made.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ModelSelector for CountingSelector {
    fn select_model(&self) -> String {
        let mut calls = self.calls.lock().unwrap();
        let model = self.models[*calls % self.models.len()].clone();
        *calls += 1;
        model
    }
}
