//! # astro-core
//!
//! Core types and traits for the Astro terminal chat client.
//! This crate defines the shared vocabulary used by every other crate in the workspace.

pub mod error;
pub mod message;
pub mod tool;

pub use error::{AstroError, Result};
pub use message::{Message, MessageContent, Role, SessionId};
pub use tool::{Tool, ToolCall, ToolExecutor, ToolResult};
