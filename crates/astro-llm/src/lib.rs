//! # astro-llm
//!
//! Abstraction over the hosted LLM. One real adapter (Anthropic Messages
//! API, non-streaming) and a deterministic mock for tests.

pub mod anthropic;
pub mod mock;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use mock::{MockProvider, MockResponse};
pub use provider::{LlmProvider, LlmRequest, LlmResponse, StopReason, Usage};
