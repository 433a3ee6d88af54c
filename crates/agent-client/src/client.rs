//! Agent protocol client

use anyhow::{Context, bail};
use futures::StreamExt;
use reqwest::{Url, header};

use agent_core::{
    AgentCard, Message,
    jsonrpc::{JsonRpcRequest, JsonRpcResponse, MessageSendParams, methods},
};

use crate::sse::SseDecoder;

pub struct AgentClient {
    http: reqwest::Client,
    base: Url,
}

impl AgentClient {
    pub fn new(agent_url: &str) -> anyhow::Result<Self> {
        let mut base = Url::parse(agent_url).with_context(|| format!("Invalid agent URL: {agent_url}"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Fetch the agent card
    pub async fn get_agent_card(&self) -> anyhow::Result<AgentCard> {
        let url = self.base.join(".well-known/agent.json")?;
        let card = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(card)
    }

    /// Send `query` with `message/stream`, calling `on_text` for each text
    /// part as it arrives; returns the full response text
    pub async fn stream_message(&self, query: &str, mut on_text: impl FnMut(&str)) -> anyhow::Result<String> {
        let params = MessageSendParams {
            message: Message::user_text(query),
            metadata: None,
        };
        let request = JsonRpcRequest::new(1, methods::MESSAGE_STREAM, params)?;

        let response = self
            .http
            .post(self.base.clone())
            .header(header::ACCEPT, "text/event-stream")
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let mut body = response.bytes_stream();
        let mut decoder = SseDecoder::default();
        let mut full_response = String::new();

        while let Some(chunk) = body.next().await {
            for data in decoder.push(&chunk?) {
                let event: JsonRpcResponse =
                    serde_json::from_str(&data).context("Malformed stream event")?;
                if let Some(error) = event.error {
                    bail!("Agent returned an error: {error}");
                }
                let Some(result) = event.result else { continue };

                let message: Message = serde_json::from_value(result).context("Unexpected stream result")?;
                for text in message.text_parts() {
                    on_text(text);
                    full_response.push_str(text);
                }
            }
        }

        Ok(full_response)
    }
}

/// Whether `err` was caused by failing to reach the server
pub fn is_connect_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.downcast_ref::<reqwest::Error>().is_some_and(reqwest::Error::is_connect))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        Json, Router,
        http::header::CONTENT_TYPE,
        routing::{get, post},
    };

    async fn spawn_stub() -> String {
        let card = serde_json::json!({
            "name": "Investment Strategy Agent",
            "description": "d",
            "url": "http://localhost:8000/",
            "version": "0.1.0",
            "defaultInputModes": ["text"],
            "defaultOutputModes": ["text"],
            "capabilities": {"streaming": true},
            "skills": [{"id": "risk_analysis", "name": "Risk", "description": "r", "tags": [], "examples": []}]
        });
        let event = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"kind": "message", "role": "agent", "messageId": "m", "parts": [
                {"kind": "text", "text": "Spread "}, {"kind": "text", "text": "your bets."}
            ]}
        });
        let sse = format!(":\n\ndata: {event}\n\n");

        let app = Router::new()
            .route("/agents/.well-known/agent.json", get(move || async move { Json(card) }))
            .route("/agents/", post(move || async move { ([(CONTENT_TYPE, "text/event-stream")], sse) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/agents")
    }

    #[tokio::test]
    async fn test_card_and_stream() {
        let client = AgentClient::new(&spawn_stub().await).unwrap();

        let card = client.get_agent_card().await.unwrap();
        assert_eq!(card.name, "Investment Strategy Agent");
        assert_eq!(card.skills[0].id, "risk_analysis");

        let mut pieces = Vec::new();
        let full = client
            .stream_message("hi", |text| pieces.push(text.to_string()))
            .await
            .unwrap();
        assert_eq!(pieces, vec!["Spread ", "your bets."]);
        assert_eq!(full, "Spread your bets.");
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AgentClient::new(&format!("http://{addr}/")).unwrap();
        let err = client.get_agent_card().await.unwrap_err();
        assert!(is_connect_error(&err));

        assert!(!is_connect_error(&anyhow::anyhow!("something else")));
    }
}
