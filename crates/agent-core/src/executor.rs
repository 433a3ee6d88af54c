//! Agent Executor
//!
//! The seam between the protocol server and an agent. The server builds a
//! [`RequestContext`] per request and hands the executor an [`EventQueue`];
//! everything the executor publishes on the queue is relayed to the caller.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::task::Task;

/// Per-request input to an executor
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub task_id: String,
    pub context_id: String,

    /// Inbound message (absent for task-level operations like cancel)
    pub message: Option<Message>,

    /// Stored task, when one exists
    pub task: Option<Task>,
}

impl RequestContext {
    pub fn new(task_id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            context_id: context_id.into(),
            message: None,
            task: None,
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_task(mut self, task: Option<Task>) -> Self {
        self.task = task;
        self
    }
}

/// Sending half of a request's outbound event channel
#[derive(Clone, Debug)]
pub struct EventQueue {
    sender: mpsc::Sender<Message>,
}

/// Receiving half, held by the server
pub type EventReceiver = mpsc::Receiver<Message>;

impl EventQueue {
    /// Create a bounded queue
    pub fn channel(capacity: usize) -> (Self, EventReceiver) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Publish a message to the waiting caller
    pub async fn enqueue_event(&self, message: Message) -> Result<()> {
        tracing::debug!(message_id = %message.message_id, "Enqueue event");
        self.sender
            .send(message)
            .await
            .map_err(|_| AgentError::EventQueueClosed)
    }
}

/// An agent behind the protocol server
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Handle one inbound message, publishing replies on `queue`
    async fn execute(&self, context: RequestContext, queue: EventQueue) -> Result<()>;

    /// Cancel an in-flight or stored task
    async fn cancel(&self, context: RequestContext, queue: EventQueue) -> Result<()>;
}
