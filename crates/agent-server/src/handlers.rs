//! HTTP Handlers
//!
//! Discovery, health and the JSON-RPC endpoint. `message/stream` answers with
//! server-sent events, one JSON-RPC response per event.

use std::convert::Infallible;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::{Stream, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use agent_core::{
    AgentCard,
    jsonrpc::{
        INVALID_REQUEST, JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
        METHOD_NOT_FOUND, MessageSendParams, PARSE_ERROR, UNSUPPORTED_OPERATION, methods,
    },
};

use crate::state::AppState;

pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";
pub const AGENT_CARD_PATH_ALT: &str = "/.well-known/agent-card.json";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub tasks: usize,
}

/// Build the router with CORS and request tracing
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(AGENT_CARD_PATH, get(agent_card))
        .route(AGENT_CARD_PATH_ALT, get(agent_card))
        .route("/health", get(health_check))
        .route("/", post(jsonrpc_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Agent card for discovery
pub async fn agent_card(State(state): State<AppState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_configured: state.provider.is_some(),
        provider: state.provider.clone(),
        tasks: state.handler.tasks().len().await,
    })
}

/// JSON-RPC 2.0 dispatch
pub async fn jsonrpc_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Unparseable JSON-RPC body: {}", e);
            return error_response(Value::Null, JsonRpcError::new(PARSE_ERROR, e.to_string()));
        }
    };

    // Echo the id when it can be read, even if the rest is malformed
    let raw_id = raw.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(raw) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Invalid JSON-RPC request: {}", e);
            return error_response(raw_id, JsonRpcError::new(INVALID_REQUEST, e.to_string()));
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return error_response(
            request.id,
            JsonRpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
        );
    }

    tracing::debug!(method = %request.method, "JSON-RPC request");
    let id = request.id.clone();

    match request.method.as_str() {
        methods::MESSAGE_SEND => match request.params() {
            Ok(params) => result_response(id, state.handler.on_message_send(params).await),
            Err(e) => failure_response(id, &e),
        },
        methods::MESSAGE_STREAM => {
            if !state.card.capabilities.streaming {
                return error_response(
                    id,
                    JsonRpcError::new(UNSUPPORTED_OPERATION, "Streaming is not supported"),
                );
            }
            match request.params() {
                Ok(params) => stream_response(state, id, params).await,
                Err(e) => failure_response(id, &e),
            }
        }
        methods::TASKS_GET => match request.params() {
            Ok(params) => result_response(id, state.handler.on_get_task(params).await),
            Err(e) => failure_response(id, &e),
        },
        methods::TASKS_CANCEL => match request.params() {
            Ok(params) => result_response(id, state.handler.on_cancel_task(params).await),
            Err(e) => failure_response(id, &e),
        },
        other => error_response(
            id,
            JsonRpcError::new(METHOD_NOT_FOUND, format!("Method not found: {other}")),
        ),
    }
}

fn result_response<T: Serialize>(id: Value, result: agent_core::Result<T>) -> Response {
    match result {
        Ok(value) => Json(JsonRpcResponse::success(id, value)).into_response(),
        Err(e) => failure_response(id, &e),
    }
}

fn failure_response(id: Value, err: &agent_core::AgentError) -> Response {
    tracing::warn!(error = %err, "JSON-RPC request failed");
    Json(JsonRpcResponse::failure(id, err)).into_response()
}

fn error_response(id: Value, error: JsonRpcError) -> Response {
    Json(JsonRpcResponse::error(id, error)).into_response()
}

async fn stream_response(state: AppState, id: Value, params: MessageSendParams) -> Response {
    let replies = state.handler.clone().on_message_stream(params).await;
    Sse::new(sse_events(id, ReceiverStream::new(replies)))
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn sse_events(
    id: Value,
    replies: impl Stream<Item = agent_core::Result<agent_core::Message>>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    replies.map(move |item| {
        let response = match item {
            Ok(message) => JsonRpcResponse::success(id.clone(), message),
            Err(e) => JsonRpcResponse::failure(id.clone(), &e),
        };
        let data = serde_json::to_string(&response).unwrap_or_default();
        Ok(Event::default().data(data))
    })
}
