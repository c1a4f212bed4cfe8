//! # astro-memory
//!
//! Long-term memory for the Astro chat client: a flat text file of notes,
//! one per line, plus the `save_memory` tool the model uses to write them.
//!
//! The file is the sole persisted entity. It is created on first write,
//! never deleted automatically, and read in full at session start so the
//! notes can be injected into the system prompt.

pub mod store;
pub mod tool;

pub use store::NoteStore;
pub use tool::MemoryTool;
