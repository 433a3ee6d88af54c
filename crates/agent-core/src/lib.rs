//! # agent-core
//!
//! Agent protocol types and the two seams every agent plugs into.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  JSON-RPC   ┌──────────────────┐  RequestContext  ┌─────────────────┐
//! │    Client    │────────────▶│  Protocol server │─────────────────▶│  AgentExecutor  │
//! │              │◀────────────│  (task store)    │◀─────────────────│                 │
//! └──────────────┘  Message    └──────────────────┘    EventQueue    └────────┬────────┘
//!                                                                             │
//!                                                                    ┌────────▼────────┐
//!                                                                    │   LlmProvider   │
//!                                                                    │   (Strategy)    │
//!                                                                    └─────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Gemini or any other hosted
//! model without changing agent logic.

pub mod card;
pub mod error;
pub mod executor;
pub mod jsonrpc;
pub mod message;
pub mod provider;
pub mod task;

pub use card::{AgentCapabilities, AgentCard, AgentSkill};
pub use error::{AgentError, Result};
pub use executor::{AgentExecutor, EventQueue, EventReceiver, RequestContext};
pub use message::{Message, Part, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use task::{Task, TaskState, TaskStatus};
