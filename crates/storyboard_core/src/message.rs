//! Message types for single-turn chat requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A text message sent to a language model.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Message, Role};
///
/// let message = Message::user("Once upon a time");
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content(), "Once upon a time");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The text content of the message
    content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system instruction message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}
