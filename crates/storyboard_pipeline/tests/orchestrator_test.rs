mod test_utils;

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use storyboard_core::{ImageModel, StoryTopic, TextModel};
use storyboard_error::{PipelineErrorKind, StoryboardErrorKind};
use storyboard_pipeline::{StoryGenerator, StoryboardConfig};
use test_utils::{
    CountingSelector, MockBehavior, MockImageDriver, MockStructuredDriver, MockTextDriver,
    test_config,
};

const DRAGON: &str = "A friendly dragon learning to fly";

fn planner() -> MockStructuredDriver {
    MockStructuredDriver::new()
        .with_response(
            "story_part_prompts",
            json!({
                "story_part_prompts": [
                    "Introduce Ember the little dragon",
                    "Ember tries to fly and tumbles",
                    "A wise owl gives advice",
                    "Ember soars over the valley"
                ]
            }),
        )
        .with_response(
            "image_prompts",
            json!({
                "image_prompts": [
                    "A small red dragon in a meadow",
                    "A dragon tumbling down a hill",
                    "An owl on a branch talking to a dragon",
                    "A dragon flying over a green valley"
                ]
            }),
        )
}

fn story_generator(
    structured: &MockStructuredDriver,
    text: &MockTextDriver,
    images: &MockImageDriver,
    config: StoryboardConfig,
) -> StoryGenerator {
    StoryGenerator::new(
        Arc::new(structured.clone()),
        Arc::new(text.clone()),
        Arc::new(images.clone()),
        config,
    )
}

#[tokio::test(start_paused = true)]
async fn test_dragon_story() -> Result<(), Box<dyn std::error::Error>> {
    let structured = planner();
    let text = MockTextDriver::new();
    let images = MockImageDriver::new();
    let generator = story_generator(&structured, &text, &images, test_config());

    let board = generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await?;

    assert_eq!(board.story_text().title(), "Story");
    assert_eq!(board.story_text().story_points().len(), 4);
    assert_eq!(board.story_images().len(), 4);
    assert_eq!(board.pages().count(), 4);
    assert_eq!(board.story_images()[0], b"A small red dragon in a meadow".to_vec());

    let requests = structured.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(*requests[0].schema_name(), "story_part_prompts");
    assert!(requests[0].user_instruction().contains(DRAGON));
    assert_eq!(*requests[1].schema_name(), "image_prompts");
    assert!(requests[1].user_instruction().contains("A wise owl gives advice"));

    assert!(text.requests().iter().all(|r| r.model() == "openai"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_all_images_failing_still_returns_text() -> Result<(), Box<dyn std::error::Error>> {
    let structured = planner();
    let text = MockTextDriver::new();
    let images = MockImageDriver::new().with_default_behavior(MockBehavior::Error);
    let generator = story_generator(&structured, &text, &images, test_config());

    let board = generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Mistral))
        .await?;

    assert!(board.story_images().is_empty());
    assert_eq!(board.story_text().story_points().len(), 4);
    assert_eq!(board.pages().count(), 0);
    assert_eq!(images.total_calls(), 12);
    Ok(())
}

#[tokio::test]
async fn test_expansion_failure_is_fatal() {
    let structured = planner().with_failure("story_part_prompts", "planner unavailable");
    let text = MockTextDriver::new();
    let images = MockImageDriver::new();
    let generator = story_generator(&structured, &text, &images, test_config());

    let result = generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await;

    assert!(result.is_err());
    assert_eq!(structured.requests().len(), 1);
    assert!(text.requests().is_empty());
    assert_eq!(images.total_calls(), 0);
}

#[tokio::test]
async fn test_derivation_failure_is_fatal() {
    let structured = planner().with_failure("image_prompts", "planner unavailable");
    let text = MockTextDriver::new();
    let images = MockImageDriver::new();
    let generator = story_generator(&structured, &text, &images, test_config());

    let result = generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await;

    assert!(result.is_err());
    assert!(text.requests().is_empty());
    assert_eq!(images.total_calls(), 0);
}

#[tokio::test]
async fn test_malformed_plan_is_structured_output_error() {
    let structured = planner().with_response("story_part_prompts", json!({"story_part_prompts": [1, 2]}));
    let generator = story_generator(
        &structured,
        &MockTextDriver::new(),
        &MockImageDriver::new(),
        test_config(),
    );

    let err = generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await
        .unwrap_err();

    match err.kind() {
        StoryboardErrorKind::Pipeline(pipeline) => {
            assert!(matches!(pipeline.kind, PipelineErrorKind::StructuredOutput { .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_empty_plan_gives_degenerate_board() -> Result<(), Box<dyn std::error::Error>> {
    let structured = MockStructuredDriver::new()
        .with_response("story_part_prompts", json!({"story_part_prompts": []}))
        .with_response("image_prompts", json!([]));
    let text = MockTextDriver::new();
    let images = MockImageDriver::new();
    let generator = story_generator(&structured, &text, &images, test_config());

    let board = generator
        .generate_story(&StoryTopic::new("", TextModel::Openai))
        .await?;

    assert!(board.story_text().story_points().is_empty());
    assert!(board.story_images().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_text_and_images_run_concurrently() -> Result<(), Box<dyn std::error::Error>> {
    let structured = planner();
    let text = [
        "Introduce Ember the little dragon",
        "Ember tries to fly and tumbles",
        "A wise owl gives advice",
        "Ember soars over the valley",
    ]
    .iter()
    .fold(MockTextDriver::new(), |driver, part| {
        driver.with_behavior(*part, MockBehavior::Delay(Duration::from_secs(10)))
    });
    let images =
        MockImageDriver::new().with_default_behavior(MockBehavior::Delay(Duration::from_secs(30)));
    let generator = story_generator(&structured, &text, &images, test_config());

    let started = tokio::time::Instant::now();
    let board = generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await?;
    let elapsed = started.elapsed();

    assert_eq!(board.story_text().story_points().len(), 4);
    assert_eq!(board.story_images().len(), 4);
    // 4 x 10s of text overlapping 30s of images.
    assert!(elapsed >= Duration::from_secs(40));
    assert!(elapsed < Duration::from_secs(41), "took {:?}", elapsed);
    Ok(())
}

#[tokio::test]
async fn test_pinned_image_model() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = test_config();
    config.image.randomize_models = false;
    let images = MockImageDriver::new();
    let generator = story_generator(&planner(), &MockTextDriver::new(), &images, config);

    generator
        .generate_story(&StoryTopic::with_models(
            DRAGON,
            TextModel::Openai,
            ImageModel::Turbo,
        ))
        .await?;

    assert!(images.requests().iter().all(|r| r.model() == "turbo"));
    Ok(())
}

#[tokio::test]
async fn test_random_models_stay_in_pool() -> Result<(), Box<dyn std::error::Error>> {
    let config = test_config();
    let pool = config.image.models.clone();
    let images = MockImageDriver::new();
    let generator = story_generator(&planner(), &MockTextDriver::new(), &images, config);

    generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await?;

    assert_eq!(images.requests().len(), 4);
    assert!(images.requests().iter().all(|r| pool.contains(r.model())));
    Ok(())
}

#[tokio::test]
async fn test_empty_random_pool_fails_before_planning() {
    let mut config = test_config();
    config.image.models.clear();
    let structured = planner();
    let text = MockTextDriver::new();
    let images = MockImageDriver::new();
    let generator = story_generator(&structured, &text, &images, config);

    let err = generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), StoryboardErrorKind::Config(_)));
    assert!(structured.requests().is_empty());
    assert!(text.requests().is_empty());
    assert_eq!(images.total_calls(), 0);
}

#[tokio::test]
async fn test_injected_selector_overrides_config() -> Result<(), Box<dyn std::error::Error>> {
    let images = MockImageDriver::new();
    let selector = Arc::new(CountingSelector::new(&["flux-3d"]));
    let generator = story_generator(&planner(), &MockTextDriver::new(), &images, test_config())
        .with_model_selector(selector.clone());

    generator
        .generate_story(&StoryTopic::new(DRAGON, TextModel::Openai))
        .await?;

    assert_eq!(selector.calls(), 4);
    assert!(images.requests().iter().all(|r| r.model() == "flux-3d"));
    Ok(())
}

#[tokio::test]
async fn test_independent_invocations() -> Result<(), Box<dyn std::error::Error>> {
    let structured = planner();
    let images = MockImageDriver::new();
    let generator = story_generator(&structured, &MockTextDriver::new(), &images, test_config());
    let topic = StoryTopic::new(DRAGON, TextModel::Openai);

    let first = generator.generate_story(&topic).await?;
    let second = generator.generate_story(&topic).await?;

    assert_eq!(first, second);
    assert_eq!(structured.requests().len(), 4);
    assert_eq!(images.total_calls(), 8);
    Ok(())
}

#[tokio::test]
async fn test_lists_models() -> Result<(), Box<dyn std::error::Error>> {
    let text = MockTextDriver::new().with_models(&["openai", "mistral"]);
    let images = MockImageDriver::new().with_models(&["flux", "turbo"]);
    let generator = story_generator(&planner(), &text, &images, test_config());

    assert_eq!(generator.list_text_models().await?, vec!["openai", "mistral"]);
    assert_eq!(generator.list_image_models().await?, vec!["flux", "turbo"]);
    Ok(())
}
