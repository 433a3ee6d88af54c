//! Protocol Messages
//!
//! Messages exchanged between a client and an agent. A message is an ordered
//! list of parts; only text parts carry content the agent reads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Client-side input
    User,
    /// Agent reply
    Agent,
}

/// One piece of message content
///
/// Unknown part kinds deserialize to [`Part::Other`] so that a message with
/// content the agent cannot read is still accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text {
        text: String,
    },
    File {
        file: serde_json::Value,
    },
    Data {
        data: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Text payload, if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

fn message_kind() -> String {
    "message".into()
}

fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single protocol message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Always `"message"`
    #[serde(default = "message_kind")]
    pub kind: String,

    pub role: Role,

    #[serde(default)]
    pub parts: Vec<Part>,

    #[serde(default = "new_message_id")]
    pub message_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Message {
    /// Create a new message with a fresh ID
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self {
            kind: message_kind(),
            role,
            parts,
            message_id: new_message_id(),
            task_id: None,
            context_id: None,
            metadata: None,
        }
    }

    /// Create a user message with one text part
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::text(text)])
    }

    /// Create an agent message with one text part
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, vec![Part::text(text)])
    }

    /// Attach task and context IDs
    pub fn in_task(mut self, task_id: impl Into<String>, context_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self.context_id = Some(context_id.into());
        self
    }

    /// Iterate over the non-empty text payloads, in order
    pub fn text_parts(&self) -> impl Iterator<Item = &str> {
        self.parts
            .iter()
            .filter_map(Part::as_text)
            .filter(|text| !text.is_empty())
    }
}
