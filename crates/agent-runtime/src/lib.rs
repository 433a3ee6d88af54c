//! # agent-runtime
//!
//! Runtime providers for the investment agent.
//!
//! ## Providers
//!
//! - **Gemini** (default): Google Generative Language API
//! - **OpenAI** (coming soon): OpenAI API integration
//! - **Anthropic** (coming soon): Claude API integration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::gemini::{GeminiConfig, GeminiProvider};
//!
//! let provider = GeminiProvider::new(GeminiConfig::new(api_key))?;
//! let backend = ModelBackend::Configured(Arc::new(provider));
//! ```

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider};

// Re-export core types for convenience
pub use agent_core::{AgentError, Completion, GenerationOptions, LlmProvider, Result};
