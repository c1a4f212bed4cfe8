use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use astro_config::AgentConfig;
use astro_core::{Message, Result, Role, SessionId, ToolExecutor, ToolResult};
use astro_llm::{LlmProvider, LlmRequest, Usage};

use crate::prompt::build_system_prompt;

/// One interactive chat session. Owns the conversation history; append-only,
/// discarded when the session is dropped. Only the memory file outlives it.
pub struct ChatSession {
    session_id: SessionId,
    agent: AgentConfig,
    provider: Arc<dyn LlmProvider>,
    tools: Arc<dyn ToolExecutor>,
    system_prompt: String,
    history: Vec<Message>,
}

/// What happened while executing one tool call, for display.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub tool_name: String,
    pub content: String,
    pub is_error: bool,
}

/// The outcome of one user turn.
#[derive(Debug, Clone, Default)]
pub struct Turn {
    /// Assistant text segments, in order. Usually one; more when the model
    /// spoke both before and after a tool call.
    pub replies: Vec<String>,
    pub tool_outcomes: Vec<ToolOutcome>,
    pub usage: Usage,
}

impl Turn {
    /// All reply text joined for display.
    pub fn text(&self) -> String {
        self.replies.join("\n")
    }
}

impl ChatSession {
    /// Create a session. `memory_snapshot` is the full contents of the
    /// memory file, injected into the system prompt so past notes are
    /// visible to the model.
    pub fn new(
        agent: AgentConfig,
        provider: Arc<dyn LlmProvider>,
        tools: Arc<dyn ToolExecutor>,
        memory_snapshot: &str,
    ) -> Self {
        let system_prompt =
            build_system_prompt(agent.system_prompt.as_deref(), memory_snapshot);
        Self {
            session_id: Uuid::new_v4(),
            agent,
            provider,
            tools,
            system_prompt,
            history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The conversation so far.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Run one turn: send the user text, execute any tool calls the model
    /// requests, and return the final reply.
    ///
    /// On a provider error the user message stays in history, so the next
    /// `send` simply retries with more context. Tool failures do not error
    /// the turn; they come back as error results the model can react to.
    pub async fn send(&mut self, text: &str) -> Result<Turn> {
        self.history
            .push(Message::text(self.session_id, Role::User, text));

        let tool_defs = self.tools.tools();
        let mut turn = Turn::default();

        for iteration in 0..self.agent.max_iterations {
            let request = LlmRequest {
                model: self.agent.model.clone(),
                messages: self.history.clone(),
                tools: tool_defs.clone(),
                system: Some(self.system_prompt.clone()),
                max_tokens: self.agent.max_tokens,
                temperature: self.agent.temperature,
            };

            let response = self.provider.complete(&request).await?;
            turn.usage.merge(&response.usage);
            debug!(
                iteration,
                stop_reason = ?response.stop_reason,
                tool_calls = response.message.tool_calls.len(),
                "provider response"
            );

            let reply_text = response.message.text_content();
            if !reply_text.is_empty() {
                turn.replies.push(reply_text);
            }
            let tool_calls = response.message.tool_calls.clone();
            self.history.push(response.message);

            if !response.has_tool_calls {
                return Ok(turn);
            }

            for call in &tool_calls {
                let result = match self.tools.execute(call).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(tool = %call.tool_name, error = %e, "tool call failed");
                        ToolResult::error(call, e.to_string())
                    }
                };
                turn.tool_outcomes.push(ToolOutcome {
                    tool_name: call.tool_name.clone(),
                    content: result.content.clone(),
                    is_error: result.is_error,
                });
                self.history
                    .push(Message::tool_result(self.session_id, result));
            }
        }

        warn!(
            max_iterations = self.agent.max_iterations,
            "tool loop hit the iteration cap, returning partial turn"
        );
        Ok(turn)
    }
}
