//! # investment-advisor
//!
//! Investment strategy agent served over the agent protocol.
//!
//! ## Request flow
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  InvestmentAgentExecutor                                      │
//! │    text parts ──join/trim──▶ query (or default greeting)      │
//! │                                │                              │
//! │                      InvestmentAgent::analyze                 │
//! │               ┌────────────────┴────────────────┐             │
//! │        Configured(provider)               Unconfigured        │
//! │     build_prompt ─▶ Gemini              keyword classifier    │
//! │      (errors become reply text)      (diversification, risk,  │
//! │                                        market, welcome)       │
//! │                                │                              │
//! │                  one agent message ─▶ EventQueue              │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancellation is not offered: [`InvestmentAgentExecutor`]'s `cancel`
//! always fails with an unsupported-operation error.

pub mod agent;
pub mod card;
pub mod classifier;
pub mod executor;
pub mod prompt;

pub use agent::{InvestmentAgent, ModelBackend};
pub use card::create_agent_card;
pub use classifier::{Topic, basic_response};
pub use executor::{DEFAULT_QUERY, InvestmentAgentExecutor};
pub use prompt::build_prompt;
