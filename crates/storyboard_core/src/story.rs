//! The story data model, from topic to finished board.

use crate::{ImageModel, TextModel};
use serde::{Deserialize, Serialize};

/// Title given to every generated story.
pub const DEFAULT_STORY_TITLE: &str = "Story";

/// What the user asked for.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ImageModel, StoryTopic, TextModel};
///
/// let topic = StoryTopic::new("A friendly dragon learning to fly", TextModel::Openai);
/// assert_eq!(*topic.image_model(), ImageModel::Flux);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryTopic {
    /// The topic of the story
    prompt: String,
    /// Text model used for the story segments
    #[serde(default)]
    text_model: TextModel,
    /// Image model used when image selection is pinned
    #[serde(default)]
    image_model: ImageModel,
}

impl StoryTopic {
    /// Topic with the default image model.
    pub fn new(prompt: impl Into<String>, text_model: TextModel) -> Self {
        Self::with_models(prompt, text_model, ImageModel::default())
    }

    /// Topic with both models chosen.
    pub fn with_models(
        prompt: impl Into<String>,
        text_model: TextModel,
        image_model: ImageModel,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            text_model,
            image_model,
        }
    }
}

/// Ordered prompts, one per narrative segment.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
)]
pub struct StoryPartPrompts {
    /// The prompts for each part of the story
    story_part_prompts: Vec<String>,
}

impl StoryPartPrompts {
    /// Wrap an ordered prompt list.
    pub fn new(story_part_prompts: Vec<String>) -> Self {
        Self { story_part_prompts }
    }

    /// Number of story parts.
    pub fn len(&self) -> usize {
        self.story_part_prompts.len()
    }

    /// True when there is nothing to generate.
    pub fn is_empty(&self) -> bool {
        self.story_part_prompts.is_empty()
    }

    /// Iterate prompts in narrative order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.story_part_prompts.iter()
    }
}

impl From<Vec<String>> for StoryPartPrompts {
    fn from(prompts: Vec<String>) -> Self {
        Self::new(prompts)
    }
}

/// Ordered image prompts, index-aligned with the story parts they were derived from.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
)]
pub struct ImagePrompts {
    /// The image prompts for each of the story points
    image_prompts: Vec<String>,
}

impl ImagePrompts {
    /// Wrap an ordered image prompt list.
    pub fn new(image_prompts: Vec<String>) -> Self {
        Self { image_prompts }
    }

    /// Number of image prompts.
    pub fn len(&self) -> usize {
        self.image_prompts.len()
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.image_prompts.is_empty()
    }

    /// Iterate prompts in story order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.image_prompts.iter()
    }
}

impl From<Vec<String>> for ImagePrompts {
    fn from(prompts: Vec<String>) -> Self {
        Self::new(prompts)
    }
}

/// Generated narrative. Failed segments are absent, never placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryText {
    /// The title of the story
    title: String,
    /// The parts of the story
    story_points: Vec<String>,
}

impl StoryText {
    /// Story text with an explicit title.
    pub fn new(title: impl Into<String>, story_points: Vec<String>) -> Self {
        Self {
            title: title.into(),
            story_points,
        }
    }

    /// Story text under the fixed default title.
    pub fn untitled(story_points: Vec<String>) -> Self {
        Self::new(DEFAULT_STORY_TITLE, story_points)
    }
}

/// Binary image payloads in story order; failed images are excluded.
pub type StoryImages = Vec<Vec<u8>>;

/// Final artifact pairing narrative text with illustrations.
///
/// # Examples
///
/// ```
/// use storyboard_core::{StoryBoard, StoryText};
///
/// let text = StoryText::untitled(vec!["First".into(), "Second".into()]);
/// let board = StoryBoard::new(text, vec![vec![0xFF, 0xD8]]);
///
/// // Pages stop at the shorter of the two lists.
/// assert_eq!(board.pages().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryBoard {
    /// The text of the story
    story_text: StoryText,
    /// The images of the story
    story_images: StoryImages,
}

impl StoryBoard {
    /// Assemble a board from both generator tracks.
    pub fn new(story_text: StoryText, story_images: StoryImages) -> Self {
        Self {
            story_text,
            story_images,
        }
    }

    /// Pair story points with images by position.
    ///
    /// Text and image counts can legitimately differ; pairing ends with the
    /// shorter list.
    pub fn pages(&self) -> impl Iterator<Item = StoryPage<'_>> {
        self.story_text
            .story_points
            .iter()
            .zip(self.story_images.iter())
            .map(|(text, image)| StoryPage {
                text: text.as_str(),
                image: image.as_slice(),
            })
    }

    /// Split the board into its text and images.
    pub fn into_parts(self) -> (StoryText, StoryImages) {
        (self.story_text, self.story_images)
    }
}

/// One text segment shown beside one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryPage<'a> {
    /// Story point text
    pub text: &'a str,
    /// Encoded image bytes
    pub image: &'a [u8],
}
