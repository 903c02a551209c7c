use storyboard_error::{
    BuilderError, BuilderErrorKind, ConfigError, GroqErrorKind, HttpError, ModelsError, ModelsErrorKind, PipelineError,
    PipelineErrorKind, PipelineStage, StorageError, StorageErrorKind, StoryboardError,
    StoryboardErrorKind, StoryboardResult,
};

fn fails_with_config() -> StoryboardResult<()> {
    Err(ConfigError::new("image.timeout_secs must be greater than 0"))?
}

#[test]
fn test_question_mark_lifts_leaf_errors() {
    let err = fails_with_config().unwrap_err();
    assert!(matches!(err.kind(), StoryboardErrorKind::Config(_)));
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn test_location_is_recorded() {
    let err = HttpError::new("connection refused");
    assert!(err.file.ends_with("error_test.rs"));
    assert!(err.line > 0);
}

#[test]
fn test_timeout_detection() {
    let timeout: StoryboardError = PipelineError::new(PipelineErrorKind::Timeout {
        stage: PipelineStage::ImageGeneration,
        seconds: 90,
    })
    .into();
    assert!(timeout.is_timeout());
    assert!(timeout.to_string().contains("image generation timed out after 90 seconds"));

    let other: StoryboardError =
        PipelineError::new(PipelineErrorKind::EmptyResponse(PipelineStage::TextGeneration)).into();
    assert!(!other.is_timeout());
}

#[test]
fn test_structured_output_names_stage() {
    let err = PipelineError::new(PipelineErrorKind::StructuredOutput {
        stage: PipelineStage::ImagePromptDerivation,
        message: "missing field `image_prompts`".to_string(),
    });
    let text = err.to_string();
    assert!(text.contains("image prompt derivation"));
    assert!(text.contains("image_prompts"));
}

#[test]
fn test_models_error_wraps_provider_kind() {
    let err: StoryboardError =
        ModelsError::new(ModelsErrorKind::Groq(GroqErrorKind::MissingApiKey)).into();
    assert!(matches!(err.kind(), StoryboardErrorKind::Models(_)));
}

#[test]
fn test_storage_error_converts() {
    let err: StoryboardError =
        StorageError::new(StorageErrorKind::FileWrite("story.md".to_string())).into();
    assert!(matches!(err.kind(), StoryboardErrorKind::Storage(_)));
}

#[test]
fn test_builder_error_converts_and_names_target() {
    let err: StoryboardError = BuilderError::new(BuilderErrorKind::Invalid {
        target: "TextRequest",
        message: "temperature out of range".to_string(),
    })
    .into();
    match err.kind() {
        StoryboardErrorKind::Builder(inner) => assert_eq!(inner.target(), "TextRequest"),
        other => panic!("expected builder error, got {other:?}"),
    }
    assert!(!err.is_timeout());
}
