//! Application State

use std::sync::Arc;

use agent_core::AgentCard;

use crate::request_handler::RequestHandler;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Agent card served at discovery time
    pub card: Arc<AgentCard>,

    /// Protocol method handler (executor + task store)
    pub handler: Arc<RequestHandler>,

    /// Name of the model provider, if one is configured
    pub provider: Option<String>,
}
