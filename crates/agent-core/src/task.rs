//! Tasks
//!
//! A task records one exchange: the user message, the agent's replies and the
//! state the exchange ended in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Lifecycle state of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Submitted,
    Working,
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    pub timestamp: DateTime<Utc>,
}

impl TaskStatus {
    pub fn now(state: TaskState) -> Self {
        Self {
            state,
            timestamp: Utc::now(),
        }
    }
}

fn task_kind() -> String {
    "task".into()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Always `"task"`
    #[serde(default = "task_kind")]
    pub kind: String,
    pub id: String,
    pub context_id: String,
    pub status: TaskStatus,
    /// Every message exchanged under this ID, oldest first; unbounded
    #[serde(default)]
    pub history: Vec<Message>,
}

impl Task {
    /// Create a task in the `submitted` state
    pub fn new(id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            kind: task_kind(),
            id: id.into(),
            context_id: context_id.into(),
            status: TaskStatus::now(TaskState::Submitted),
            history: Vec::new(),
        }
    }

    /// Move to a new state, stamping the current time
    pub fn transition(&mut self, state: TaskState) {
        self.status = TaskStatus::now(state);
    }

    /// Keep only the `length` most recent history entries
    pub fn truncate_history(&mut self, length: usize) {
        let excess = self.history.len().saturating_sub(length);
        self.history.drain(..excess);
    }
}
