//! # astro-cli
//!
//! Command-line interface for the Astro chat client.
//!
//! ## Commands
//!
//! - `astro` / `astro chat` — Interactive chat in the terminal
//! - `astro config` — Show effective configuration
//! - `astro memory show` — Show saved memory notes
//! - `astro version` — Show version
//! - `astro completions` — Generate shell completions

pub mod commands;
pub mod console;

pub use commands::Cli;
