use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tracing::warn;

use astro_core::Role;
use astro_llm::AnthropicProvider;
use astro_memory::{MemoryTool, NoteStore};
use astro_runtime::ChatSession;

use crate::console;

pub(super) async fn cmd_chat(config: astro_config::AstroConfig) -> astro_core::Result<()> {
    // Missing API key is the one fatal startup error.
    let Some(api_key) = config.services.anthropic_api_key.clone() else {
        eprintln!("No Anthropic API key found.");
        eprintln!("   Add to [services] in astro.toml:  anthropic_api_key = \"sk-ant-...\"");
        eprintln!("   Or set env var: export ANTHROPIC_API_KEY=sk-ant-...");
        return Err(astro_core::AstroError::Config(
            "ANTHROPIC_API_KEY not set".into(),
        ));
    };

    let store = Arc::new(NoteStore::new(config.memory.file.clone()));
    let memory_snapshot = match store.load() {
        Ok(contents) => contents,
        Err(e) => {
            warn!(error = %e, "could not read memory file, starting without notes");
            String::new()
        }
    };

    let provider = Arc::new(AnthropicProvider::new(api_key));
    let tools = Arc::new(MemoryTool::new(Arc::clone(&store)));
    let mut session = ChatSession::new(config.agent, provider, tools, &memory_snapshot);

    println!("🪐 Astro — terminal advisor chat");
    println!("   Type 'exit', 'quit' or Ctrl+D to leave");
    println!("   Notes the model saves land in {}", store.path().display());
    println!();

    // Interactive loop reading from stdin
    let stdin = tokio::io::stdin();
    let reader = tokio::io::BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        console::prompt(Role::User);

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(_) => break,
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        match session.send(trimmed).await {
            Ok(turn) => {
                for outcome in &turn.tool_outcomes {
                    if outcome.is_error {
                        console::print_role(
                            Role::Tool,
                            &format!("{} failed: {}", outcome.tool_name, outcome.content),
                        );
                    } else {
                        console::print_role(
                            Role::Tool,
                            &format!("{}: {}", outcome.tool_name, outcome.content),
                        );
                    }
                }
                console::print_role(Role::Assistant, &turn.text());
            }
            Err(e) => {
                // Non-fatal: report and keep taking input.
                console::print_role(Role::System, &format!("\x1b[31merror: {e}\x1b[0m"));
            }
        }
        println!();
    }

    println!("👋 Goodbye!");
    Ok(())
}
