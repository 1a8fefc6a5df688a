//! Conversation messages and the append-only log a run owns.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::role::RoleName;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// The person who submitted the campaign request
    User,
    /// One of the crew roles
    Role(RoleName),
}

impl Author {
    /// The role behind this author, if any.
    pub const fn role(self) -> Option<RoleName> {
        match self {
            Self::User => None,
            Self::Role(role) => Some(role),
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Role(role) => f.write_str(role.display_name()),
        }
    }
}

/// A single message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    author: Author,
    content: String,
}

impl Message {
    /// Message submitted by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            content: content.into(),
        }
    }

    /// Message produced by a crew role.
    pub fn from_role(role: RoleName, content: impl Into<String>) -> Self {
        Self {
            author: Author::Role(role),
            content: content.into(),
        }
    }

    pub const fn author(&self) -> Author {
        self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The role that wrote this message, `None` for user messages.
    pub const fn role(&self) -> Option<RoleName> {
        self.author.role()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.author, self.content)
    }
}

/// Ordered, append-only message log for one run.
///
/// The only mutation is [`Conversation::push`]; messages already in the log
/// cannot be edited, removed or reordered through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation with the user's request as the first message.
    pub fn seeded(request: impl Into<String>) -> Self {
        let mut conversation = Self::new();
        conversation.push(Message::user(request));
        conversation
    }

    /// Append a message to the end of the log.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Render the log as `author: content` lines.
    pub fn transcript_lines(&self) -> Vec<String> {
        self.messages.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
