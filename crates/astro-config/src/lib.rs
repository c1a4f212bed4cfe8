//! # astro-config
//!
//! Configuration for the Astro chat client: the `astro.toml` schema and a
//! loader that applies environment-variable fallbacks.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{AgentConfig, AstroConfig, LoggingConfig, MemoryConfig, ServicesConfig};
