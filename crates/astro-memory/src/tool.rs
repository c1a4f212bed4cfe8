use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use astro_core::{Result, Tool, ToolCall, ToolExecutor, ToolResult};

use crate::store::NoteStore;

/// Exposes the note store to the model as a single `save_memory` tool.
pub struct MemoryTool {
    store: Arc<NoteStore>,
}

impl MemoryTool {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolExecutor for MemoryTool {
    fn tools(&self) -> Vec<Tool> {
        vec![Tool {
            name: "save_memory".into(),
            description:
                "Save a short note to long-term memory. Useful to remember context \
                 about the user between conversations."
                    .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The note to remember, one short line of text"
                    }
                },
                "required": ["text"]
            }),
        }]
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        if call.tool_name != "save_memory" {
            return Err(astro_core::AstroError::ToolNotFound(call.tool_name.clone()));
        }

        // Malformed payloads skip the note; the error text goes back to the model.
        let Some(text) = call.arguments.get("text").and_then(|v| v.as_str()) else {
            warn!(arguments = %call.arguments, "save_memory called without a 'text' string");
            return Ok(ToolResult::error(
                call,
                "invalid input: expected {\"text\": string}",
            ));
        };

        match self.store.append(text) {
            Ok(()) => Ok(ToolResult::ok(call, "Note saved to memory")),
            Err(e) => {
                warn!(error = %e, "failed to write memory file, note dropped");
                Ok(ToolResult::error(call, format!("failed to save note: {e}")))
            }
        }
    }
}
