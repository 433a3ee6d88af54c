//! Investment Agent
//!
//! Answers a query either through a hosted model or, when none is configured,
//! through the keyword-matched basic responses.

use std::sync::Arc;

use agent_core::{GenerationOptions, LlmProvider};

use crate::classifier::basic_response;
use crate::prompt::build_prompt;

/// Model access, decided once at startup
#[derive(Clone)]
pub enum ModelBackend {
    /// Hosted model reachable through a provider
    Configured(Arc<dyn LlmProvider>),
    /// No credential; basic responses only
    Unconfigured,
}

impl ModelBackend {
    pub fn from_provider(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        provider.map_or(Self::Unconfigured, Self::Configured)
    }

    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

impl std::fmt::Debug for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured(provider) => f.debug_tuple("Configured").field(&provider.name()).finish(),
            Self::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// Investment strategy agent that provides financial analysis and advice
#[derive(Debug)]
pub struct InvestmentAgent {
    backend: ModelBackend,
    generation: GenerationOptions,
}

impl InvestmentAgent {
    pub fn new(backend: ModelBackend, generation: GenerationOptions) -> Self {
        Self { backend, generation }
    }

    /// Agent with keyword-matched responses only
    pub fn basic() -> Self {
        Self::new(ModelBackend::Unconfigured, GenerationOptions::default())
    }

    pub const fn backend(&self) -> &ModelBackend {
        &self.backend
    }

    /// Analyze an investment query
    ///
    /// Never fails: a model error is turned into a reply that names the cause.
    pub async fn analyze(&self, query: &str) -> String {
        match &self.backend {
            ModelBackend::Configured(provider) => {
                let prompt = build_prompt(query);
                match provider.complete(&prompt, &self.generation).await {
                    Ok(completion) => completion.content,
                    Err(e) => {
                        tracing::warn!(provider = provider.name(), error = %e, "Model call failed");
                        format!(
                            "Error generating AI response: {e}. Please provide a GOOGLE_API_KEY environment variable."
                        )
                    }
                }
            }
            ModelBackend::Unconfigured => basic_response(query).to_string(),
        }
    }
}
