//! Investment Strategy Agent Server
//!
//! Axum-based agent protocol server. Publishes the agent card for discovery
//! and answers JSON-RPC `message/send`, `message/stream`, `tasks/get` and
//! `tasks/cancel` through the investment agent executor.

mod config;
mod handlers;
mod request_handler;
mod state;
mod task_store;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{GenerationOptions, LlmProvider};
use agent_runtime::{GeminiConfig, GeminiProvider};
use investment_advisor::{InvestmentAgent, InvestmentAgentExecutor, ModelBackend, create_agent_card};

use crate::config::ServerConfig;
use crate::request_handler::RequestHandler;
use crate::state::AppState;
use crate::task_store::InMemoryTaskStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let backend = model_backend(&config)?;
    let provider = match &backend {
        ModelBackend::Configured(provider) => Some(provider.name().to_string()),
        ModelBackend::Unconfigured => None,
    };

    let agent = InvestmentAgent::new(backend, GenerationOptions::with_model(&config.model));
    let executor = Arc::new(InvestmentAgentExecutor::new(agent));
    let handler = RequestHandler::new(executor, Arc::new(InMemoryTaskStore::new()));

    let state = AppState {
        card: Arc::new(create_agent_card(&config.server_url)),
        handler: Arc::new(handler),
        provider,
    };

    let app = handlers::router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 Investment Strategy Agent running on http://{}", addr);
    tracing::info!("   Server URL: {}", config.server_url);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /.well-known/agent.json - Agent card");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  POST /                       - JSON-RPC (message/send, message/stream, tasks/get, tasks/cancel)");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolve the model backend once from configuration
fn model_backend(config: &ServerConfig) -> anyhow::Result<ModelBackend> {
    let Some(api_key) = config.google_api_key.as_deref() else {
        tracing::warn!("⚠ No Google API Key found - Using basic responses");
        tracing::warn!("  Set GOOGLE_API_KEY environment variable to enable AI-powered analysis");
        return Ok(ModelBackend::Unconfigured);
    };

    let provider: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::new(GeminiConfig::new(api_key))?);
    tracing::info!("✓ Google API Key configured - Gemini AI enabled (model: {})", config.model);
    Ok(ModelBackend::Configured(provider))
}
