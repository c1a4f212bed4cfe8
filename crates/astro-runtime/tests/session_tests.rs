use std::sync::Arc;

use astro_config::AgentConfig;
use astro_core::{MessageContent, Role};
use astro_llm::MockProvider;
use astro_memory::{MemoryTool, NoteStore};
use astro_runtime::ChatSession;
use serde_json::json;

fn session_with(
    provider: MockProvider,
    dir: &tempfile::TempDir,
) -> (ChatSession, Arc<NoteStore>, Arc<MockProvider>) {
    let store = Arc::new(NoteStore::new(dir.path().join("memory.txt")));
    let tools = Arc::new(MemoryTool::new(Arc::clone(&store)));
    let provider = Arc::new(provider);
    let memory = store.load().unwrap();
    let session = ChatSession::new(
        AgentConfig::default(),
        Arc::clone(&provider) as Arc<dyn astro_llm::LlmProvider>,
        tools,
        &memory,
    );
    (session, store, provider)
}

#[tokio::test]
async fn plain_reply_is_returned_once_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _, provider) =
        session_with(MockProvider::new("test").with_response("Hello, world!"), &dir);

    let turn = session.send("hi").await.unwrap();

    assert_eq!(turn.replies, vec!["Hello, world!".to_string()]);
    assert_eq!(turn.text(), "Hello, world!");
    assert!(turn.tool_outcomes.is_empty());
    assert_eq!(provider.requests.lock().unwrap().len(), 1);

    // History: user then assistant, in order.
    let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
}

#[tokio::test]
async fn save_memory_tool_call_writes_the_note_and_asks_again() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, store, provider) = session_with(
        MockProvider::new("test")
            .with_tool_call("save_memory", json!({"text": "likes tea"}))
            .with_response("Noted, you like tea."),
        &dir,
    );

    let turn = session.send("remember that I like tea").await.unwrap();

    // The note landed in the file as a line.
    assert!(store.load().unwrap().lines().any(|l| l == "likes tea"));

    // A second request was made for the final reply.
    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(turn.text(), "Noted, you like tea.");
    assert_eq!(turn.tool_outcomes.len(), 1);
    assert!(!turn.tool_outcomes[0].is_error);

    // The second request carried the tool result back to the model.
    let followup = &requests[1];
    let has_tool_result = followup.messages.iter().any(|m| {
        m.role == Role::Tool
            && m.content
                .iter()
                .any(|c| matches!(c, MessageContent::ToolResult { is_error: false, .. }))
    });
    assert!(has_tool_result);
}

#[tokio::test]
async fn malformed_tool_payload_skips_the_note_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, store, _) = session_with(
        MockProvider::new("test")
            .with_tool_call("save_memory", json!({"wrong": "shape"}))
            .with_response("Sorry, I could not save that."),
        &dir,
    );

    let turn = session.send("remember this").await.unwrap();

    assert_eq!(store.load().unwrap(), "");
    assert_eq!(turn.tool_outcomes.len(), 1);
    assert!(turn.tool_outcomes[0].is_error);
    assert_eq!(turn.text(), "Sorry, I could not save that.");
}

#[tokio::test]
async fn provider_failure_is_recoverable_on_the_next_send() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _, provider) = session_with(
        MockProvider::new("test")
            .with_error("connection refused")
            .with_response("back online"),
        &dir,
    );

    assert!(session.send("hello?").await.is_err());

    // The failed user message stays in history; the next send succeeds.
    let turn = session.send("are you there?").await.unwrap();
    assert_eq!(turn.text(), "back online");
    let second = &provider.requests.lock().unwrap()[1];
    let user_texts: Vec<String> = second
        .messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.text_content())
        .collect();
    assert_eq!(user_texts, vec!["hello?", "are you there?"]);
}

#[tokio::test]
async fn tool_loop_is_bounded_by_max_iterations() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(NoteStore::new(dir.path().join("memory.txt")));
    let tools = Arc::new(MemoryTool::new(Arc::clone(&store)));

    // More tool-call responses queued than the cap allows.
    let mut provider = MockProvider::new("test");
    for _ in 0..5 {
        provider = provider.with_tool_call("save_memory", json!({"text": "again"}));
    }
    let provider = Arc::new(provider);

    let agent = AgentConfig {
        max_iterations: 2,
        ..AgentConfig::default()
    };
    let mut session = ChatSession::new(
        agent,
        Arc::clone(&provider) as Arc<dyn astro_llm::LlmProvider>,
        tools,
        "",
    );

    let turn = session.send("loop forever").await.unwrap();
    assert_eq!(provider.requests.lock().unwrap().len(), 2);
    assert_eq!(turn.tool_outcomes.len(), 2);
}

#[tokio::test]
async fn system_prompt_carries_the_memory_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = NoteStore::new(dir.path().join("memory.txt"));
    store.append("prefers index funds").unwrap();

    let (mut session, _, provider) =
        session_with(MockProvider::new("test").with_response("ok"), &dir);
    session.send("hi").await.unwrap();

    let request = &provider.requests.lock().unwrap()[0];
    let system = request.system.as_deref().unwrap();
    assert!(system.contains("prefers index funds"));
    assert!(system.contains("<current_date>"));
    assert_eq!(request.tools.len(), 1);
    assert_eq!(request.tools[0].name, "save_memory");
}

#[tokio::test]
async fn usage_is_merged_across_tool_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _, _) = session_with(
        MockProvider::new("test")
            .with_tool_call("save_memory", json!({"text": "n"}))
            .with_response("done"),
        &dir,
    );

    let turn = session.send("remember n").await.unwrap();
    // Two mock responses at 100 in / 50 out each.
    assert_eq!(turn.usage.input_tokens, 200);
    assert_eq!(turn.usage.output_tokens, 100);
    assert_eq!(turn.usage.total_tokens(), 300);
}
