//! Investment Agent Executor
//!
//! Adapts [`InvestmentAgent`] to the protocol server's executor interface.

use async_trait::async_trait;

use agent_core::{AgentError, AgentExecutor, EventQueue, Message, RequestContext, Result};

use crate::agent::InvestmentAgent;

/// Query used when the inbound message carries no text
pub const DEFAULT_QUERY: &str = "Hello, what can you help me with?";

/// Space-joined text of every text part, trimmed, or [`DEFAULT_QUERY`]
pub fn query_from_message(message: Option<&Message>) -> String {
    let joined = message
        .map(|m| m.text_parts().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    let trimmed = joined.trim();
    if trimmed.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Agent executor for the investment strategy agent
#[derive(Debug)]
pub struct InvestmentAgentExecutor {
    agent: InvestmentAgent,
}

impl InvestmentAgentExecutor {
    pub const fn new(agent: InvestmentAgent) -> Self {
        Self { agent }
    }

    pub const fn agent(&self) -> &InvestmentAgent {
        &self.agent
    }
}

#[async_trait]
impl AgentExecutor for InvestmentAgentExecutor {
    async fn execute(&self, context: RequestContext, queue: EventQueue) -> Result<()> {
        let query = query_from_message(context.message.as_ref());
        tracing::info!(task_id = %context.task_id, query_len = query.len(), "Analyzing query");

        let result = self.agent.analyze(&query).await;

        let reply = Message::agent_text(result).in_task(context.task_id, context.context_id);
        queue.enqueue_event(reply).await
    }

    async fn cancel(&self, context: RequestContext, _queue: EventQueue) -> Result<()> {
        tracing::warn!(task_id = %context.task_id, "Cancel requested");
        Err(AgentError::UnsupportedOperation(
            "Cancel operation is not supported for this agent".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use agent_core::{Part, Role, Task, TaskState};

    use crate::classifier::{MARKET_TEMPLATE, WELCOME_TEMPLATE};

    fn message_with(parts: Vec<Part>) -> Message {
        Message::new(Role::User, parts)
    }

    #[test]
    fn test_query_joins_text_parts() {
        let message = message_with(vec![
            Part::text("  How do I"),
            Part::Other,
            Part::Data { data: serde_json::json!({"risk": "low"}) },
            Part::text("evaluate stocks?  "),
        ]);
        assert_eq!(query_from_message(Some(&message)), "How do I evaluate stocks?");
    }

    #[test]
    fn test_empty_query_gets_greeting() {
        assert_eq!(query_from_message(None), DEFAULT_QUERY);
        assert_eq!(query_from_message(Some(&message_with(Vec::new()))), DEFAULT_QUERY);
        assert_eq!(
            query_from_message(Some(&message_with(vec![Part::text("   "), Part::text("\n")]))),
            DEFAULT_QUERY
        );
    }

    #[tokio::test]
    async fn test_execute_publishes_one_reply() {
        let executor = InvestmentAgentExecutor::new(InvestmentAgent::basic());
        let (queue, mut events) = EventQueue::channel(4);
        let context = RequestContext::new("task-1", "ctx-1")
            .with_message(Message::user_text("Tell me about equity markets"));

        executor.execute(context, queue).await.unwrap();

        let reply = events.recv().await.unwrap();
        assert!(events.recv().await.is_none());
        assert_eq!(reply.role, Role::Agent);
        assert_eq!(reply.task_id.as_deref(), Some("task-1"));
        assert_eq!(reply.context_id.as_deref(), Some("ctx-1"));
        assert_eq!(reply.text_parts().collect::<Vec<_>>(), vec![MARKET_TEMPLATE]);
    }

    #[tokio::test]
    async fn test_execute_blank_message_gets_welcome() {
        let executor = InvestmentAgentExecutor::new(InvestmentAgent::basic());
        let (queue, mut events) = EventQueue::channel(1);
        let context = RequestContext::new("t", "c").with_message(message_with(vec![Part::text(" ")]));

        executor.execute(context, queue).await.unwrap();

        let reply = events.recv().await.unwrap();
        assert_eq!(reply.text_parts().next(), Some(WELCOME_TEMPLATE));
    }

    #[tokio::test]
    async fn test_cancel_always_fails() {
        let executor = InvestmentAgentExecutor::new(InvestmentAgent::basic());

        let mut completed = Task::new("t", "c");
        completed.transition(TaskState::Completed);

        for task in [None, Some(Task::new("t", "c")), Some(completed)] {
            let (queue, _events) = EventQueue::channel(1);
            let context = RequestContext::new("t", "c").with_task(task);

            let err = executor.cancel(context, queue).await.unwrap_err();
            assert!(matches!(err, AgentError::UnsupportedOperation(_)));
            assert!(err.to_string().contains("not supported"));
        }
    }
}
