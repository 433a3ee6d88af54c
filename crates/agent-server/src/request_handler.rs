//! Request Handler
//!
//! Runs the agent executor for each protocol method and keeps the task store
//! in step with the outcome.

use std::sync::Arc;

use tokio::sync::mpsc;

use agent_core::{
    AgentError, AgentExecutor, EventQueue, EventReceiver, Message, RequestContext, Result, Task,
    TaskState,
    jsonrpc::{MessageSendParams, TaskIdParams, TaskQueryParams},
};

use crate::task_store::InMemoryTaskStore;

/// Capacity of each request's event queue
const EVENT_QUEUE_CAPACITY: usize = 16;

/// Stream of agent replies, ending with an error item if execution failed
pub type MessageStream = mpsc::Receiver<Result<Message>>;

pub struct RequestHandler {
    executor: Arc<dyn AgentExecutor>,
    tasks: Arc<InMemoryTaskStore>,
}

impl RequestHandler {
    pub fn new(executor: Arc<dyn AgentExecutor>, tasks: Arc<InMemoryTaskStore>) -> Self {
        Self { executor, tasks }
    }

    pub fn tasks(&self) -> &InMemoryTaskStore {
        &self.tasks
    }

    /// Assign IDs, record a working task and build the executor context
    async fn begin(&self, params: MessageSendParams) -> RequestContext {
        let mut message = params.message;
        let task_id = message
            .task_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let context_id = message
            .context_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        message.task_id = Some(task_id.clone());
        message.context_id = Some(context_id.clone());

        let task = self
            .tasks
            .upsert(
                &task_id,
                || Task::new(&task_id, &context_id),
                |task| {
                    task.history.push(message.clone());
                    task.transition(TaskState::Working);
                },
            )
            .await;

        tracing::debug!(%task_id, %context_id, "Task started");

        RequestContext::new(task_id, context_id)
            .with_message(message)
            .with_task(Some(task))
    }

    /// Record replies and the final state
    ///
    /// An execution that returns without publishing anything counts as failed.
    async fn finish(&self, task_id: &str, outcome: Result<()>, replies: Vec<Message>) -> Result<()> {
        let outcome = outcome.and_then(|()| {
            if replies.is_empty() {
                Err(no_response())
            } else {
                Ok(())
            }
        });

        let state = match &outcome {
            Ok(()) => TaskState::Completed,
            Err(e) => {
                tracing::error!(%task_id, error = %e, "Agent execution failed");
                TaskState::Failed
            }
        };
        self.tasks
            .update(task_id, |task| {
                task.history.extend(replies);
                task.transition(state);
            })
            .await;

        outcome
    }

    /// `message/send`: run to completion and return the first reply
    pub async fn on_message_send(&self, params: MessageSendParams) -> Result<Message> {
        let context = self.begin(params).await;
        let task_id = context.task_id.clone();

        let (queue, events) = EventQueue::channel(EVENT_QUEUE_CAPACITY);
        let (outcome, replies) = tokio::join!(self.executor.execute(context, queue), drain(events));

        let first = replies.first().cloned();
        self.finish(&task_id, outcome, replies).await?;

        first.ok_or_else(no_response)
    }

    /// `message/stream`: forward replies as the executor publishes them
    pub async fn on_message_stream(self: Arc<Self>, params: MessageSendParams) -> MessageStream {
        let context = self.begin(params).await;
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_CAPACITY);

        tokio::spawn(async move {
            let task_id = context.task_id.clone();
            let (queue, mut events) = EventQueue::channel(EVENT_QUEUE_CAPACITY);

            let forward = async {
                let mut sent = Vec::new();
                while let Some(message) = events.recv().await {
                    sent.push(message.clone());
                    if sender.send(Ok(message)).await.is_err() {
                        tracing::debug!(%task_id, "Stream consumer went away");
                        break;
                    }
                }
                sent
            };

            let (outcome, replies) = tokio::join!(self.executor.execute(context, queue), forward);

            if let Err(e) = self.finish(&task_id, outcome, replies).await {
                let _ = sender.send(Err(e)).await;
            }
        });

        receiver
    }

    /// `tasks/get`
    pub async fn on_get_task(&self, params: TaskQueryParams) -> Result<Task> {
        let mut task = self
            .tasks
            .get(&params.id)
            .await
            .ok_or_else(|| AgentError::TaskNotFound(params.id.clone()))?;

        if let Some(length) = params.history_length {
            task.truncate_history(length);
        }
        Ok(task)
    }

    /// `tasks/cancel`: always delegated to the executor
    pub async fn on_cancel_task(&self, params: TaskIdParams) -> Result<Task> {
        let stored = self.tasks.get(&params.id).await;
        let context_id = stored.as_ref().map_or_else(String::new, |t| t.context_id.clone());
        let context = RequestContext::new(&params.id, context_id).with_task(stored);

        let (queue, _events) = EventQueue::channel(EVENT_QUEUE_CAPACITY);
        self.executor.cancel(context, queue).await?;

        self.tasks
            .get(&params.id)
            .await
            .ok_or(AgentError::TaskNotFound(params.id))
    }
}

fn no_response() -> AgentError {
    AgentError::Other("Agent produced no response".into())
}

async fn drain(mut events: EventReceiver) -> Vec<Message> {
    let mut replies = Vec::new();
    while let Some(message) = events.recv().await {
        replies.push(message);
    }
    replies
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use investment_advisor::{InvestmentAgent, InvestmentAgentExecutor, classifier::RISK_TEMPLATE};

    fn handler() -> Arc<RequestHandler> {
        let executor = Arc::new(InvestmentAgentExecutor::new(InvestmentAgent::basic()));
        Arc::new(RequestHandler::new(executor, Arc::new(InMemoryTaskStore::new())))
    }

    fn send_params(text: &str) -> MessageSendParams {
        MessageSendParams {
            message: Message::user_text(text),
            metadata: None,
        }
    }

    /// Executor that never publishes and fails
    struct BrokenExecutor;

    #[async_trait]
    impl AgentExecutor for BrokenExecutor {
        async fn execute(&self, _context: RequestContext, _queue: EventQueue) -> Result<()> {
            Err(AgentError::Other("boom".into()))
        }

        async fn cancel(&self, _context: RequestContext, _queue: EventQueue) -> Result<()> {
            Ok(())
        }
    }

    /// Executor that returns success without publishing
    struct SilentExecutor;

    #[async_trait]
    impl AgentExecutor for SilentExecutor {
        async fn execute(&self, _context: RequestContext, _queue: EventQueue) -> Result<()> {
            Ok(())
        }

        async fn cancel(&self, _context: RequestContext, _queue: EventQueue) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_send_records_completed_task() {
        let handler = handler();
        let reply = handler.on_message_send(send_params("Is it safe?")).await.unwrap();

        assert_eq!(reply.text_parts().collect::<Vec<_>>(), vec![RISK_TEMPLATE]);
        let task_id = reply.task_id.clone().unwrap();

        let task = handler
            .on_get_task(TaskQueryParams { id: task_id.clone(), history_length: None })
            .await
            .unwrap();
        assert_eq!(task.status.state, TaskState::Completed);
        assert_eq!(task.history.len(), 2);
        assert_eq!(task.history[1].message_id, reply.message_id);
        assert_eq!(Some(&task.context_id), reply.context_id.as_ref());

        let truncated = handler
            .on_get_task(TaskQueryParams { id: task_id, history_length: Some(1) })
            .await
            .unwrap();
        assert_eq!(truncated.history[0].message_id, reply.message_id);
    }

    #[tokio::test]
    async fn test_send_reuses_caller_ids() {
        let handler = handler();
        let message = Message::user_text("hello").in_task("task-7", "ctx-7");
        let reply = handler
            .on_message_send(MessageSendParams { message, metadata: None })
            .await
            .unwrap();

        assert_eq!(reply.task_id.as_deref(), Some("task-7"));
        assert_eq!(reply.context_id.as_deref(), Some("ctx-7"));
    }

    #[tokio::test]
    async fn test_stream_yields_reply_then_ends() {
        let handler = handler();
        let mut stream = handler.clone().on_message_stream(send_params("conservative bonds")).await;

        let reply = stream.recv().await.unwrap().unwrap();
        assert_eq!(reply.text_parts().next(), Some(RISK_TEMPLATE));
        assert!(stream.recv().await.is_none());

        let task = handler.tasks().get(reply.task_id.as_deref().unwrap()).await.unwrap();
        assert_eq!(task.status.state, TaskState::Completed);
    }

    #[tokio::test]
    async fn test_failed_execution_marks_task_failed() {
        let tasks = Arc::new(InMemoryTaskStore::new());
        let handler = RequestHandler::new(Arc::new(BrokenExecutor), tasks.clone());
        let message = Message::user_text("x").in_task("t-err", "c-err");

        let err = handler
            .on_message_send(MessageSendParams { message, metadata: None })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(tasks.get("t-err").await.unwrap().status.state, TaskState::Failed);
    }

    #[tokio::test]
    async fn test_silent_executor_marks_task_failed() {
        let tasks = Arc::new(InMemoryTaskStore::new());
        let handler = Arc::new(RequestHandler::new(Arc::new(SilentExecutor), tasks.clone()));

        let message = Message::user_text("x").in_task("t-quiet", "c-quiet");
        let err = handler
            .on_message_send(MessageSendParams { message, metadata: None })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no response"));

        let task = tasks.get("t-quiet").await.unwrap();
        assert_eq!(task.status.state, TaskState::Failed);
        assert_eq!(task.history.len(), 1);

        let message = Message::user_text("y").in_task("t-quiet-stream", "c");
        let mut stream = handler
            .clone()
            .on_message_stream(MessageSendParams { message, metadata: None })
            .await;
        assert!(stream.recv().await.unwrap().is_err());
        assert!(stream.recv().await.is_none());
        assert_eq!(tasks.get("t-quiet-stream").await.unwrap().status.state, TaskState::Failed);
    }

    #[tokio::test]
    async fn test_concurrent_sends_on_one_task_keep_all_history() {
        let handler = handler();
        let shared = |text: &str| MessageSendParams {
            message: Message::user_text(text).in_task("shared", "ctx"),
            metadata: None,
        };

        let (first, second) = tokio::join!(
            handler.on_message_send(shared("risk?")),
            handler.on_message_send(shared("stocks?"))
        );
        first.unwrap();
        second.unwrap();

        let task = handler.tasks().get("shared").await.unwrap();
        assert_eq!(task.history.len(), 4);
        assert_eq!(task.status.state, TaskState::Completed);
    }

    #[tokio::test]
    async fn test_cancel_is_unsupported_for_any_task() {
        let handler = handler();
        let reply = handler.on_message_send(send_params("stocks")).await.unwrap();

        for id in [reply.task_id.unwrap(), "missing".to_string()] {
            let err = handler.on_cancel_task(TaskIdParams { id }).await.unwrap_err();
            assert!(matches!(err, AgentError::UnsupportedOperation(_)));
        }
    }

    #[tokio::test]
    async fn test_get_unknown_task() {
        let err = handler()
            .on_get_task(TaskQueryParams { id: "nope".into(), history_length: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::TaskNotFound(_)));
    }
}
