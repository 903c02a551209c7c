//! Core data types for the Storyboard story generation pipeline.
//!
//! This crate holds the story data model shared by every other crate: the
//! topic a user asks for, the intermediate prompt lists, the generated text and
//! images, and the request shapes sent to generation services.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod model;
mod request;
mod role;
mod story;

pub use message::{Message, MessageBuilder};
pub use model::{ImageModel, TextModel};
pub use request::{
    ImageRequest, ImageRequestBuilder, ImageRequestBuilderError, ImageSafety, TextRequest,
    TextRequestBuilder, TextRequestBuilderError,
};
pub use role::Role;
pub use story::{
    DEFAULT_STORY_TITLE, ImagePrompts, StoryBoard, StoryImages, StoryPage, StoryPartPrompts,
    StoryText, StoryTopic,
};
