//! # astro-runtime
//!
//! The chat loop core. A [`ChatSession`] owns the conversation history and
//! drives each turn: send the history plus the tool schema to the provider,
//! execute any requested tool calls, feed the results back, and return the
//! final assistant reply.

pub mod prompt;
pub mod session;

pub use session::{ChatSession, ToolOutcome, Turn};
