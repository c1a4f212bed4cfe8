//! System prompt assembly.

const DEFAULT_PERSONA: &str = "\
You are an AI chat bot named Astro, being interacted with in a terminal chat application.
You are a \"robo advisor\" that is helping a user manage their investments.
You can use saved memory to make recommendations or answer user questions.

<behavior>
Use a professional and friendly tone in communication.
When you are not sure about the answer, say so.
Use the save_memory tool to remember durable facts the user shares about
themselves, their goals, or their preferences.
</behavior>

<style>
Use plain text in communication.
If you want to provide emphasis, use *asterisks* around the text.
Use spacing and newlines to make the text easier to read.
</style>";

/// Build the system prompt: persona (config override or the built-in one)
/// plus the current date and the memory snapshot.
pub fn build_system_prompt(persona_override: Option<&str>, memory: &str) -> String {
    let persona = persona_override.unwrap_or(DEFAULT_PERSONA);
    let today = chrono::Local::now().format("%m/%d/%Y");
    format!(
        "{persona}\n\n<current_date>\n{today}\n</current_date>\n\n<memory>\n{memory}\n</memory>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_memory_and_date() {
        let prompt = build_system_prompt(None, "likes tea\n");
        assert!(prompt.contains("<memory>\nlikes tea\n\n</memory>"));
        assert!(prompt.contains("<current_date>"));
        assert!(prompt.contains("Astro"));
    }

    #[test]
    fn override_replaces_the_persona_but_keeps_the_blocks() {
        let prompt = build_system_prompt(Some("You are a test bot."), "");
        assert!(prompt.starts_with("You are a test bot."));
        assert!(!prompt.contains("robo advisor"));
        assert!(prompt.contains("<memory>"));
    }
}
