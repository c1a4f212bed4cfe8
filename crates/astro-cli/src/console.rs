//! Role-styled terminal output.

use astro_core::Role;

const RESET: &str = "\x1b[0m";

fn style(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::User => ("\x1b[36m", "you"),
        Role::Assistant => ("\x1b[32m", "astro"),
        Role::Tool => ("\x1b[33m", "tool"),
        Role::System => ("\x1b[90m", "system"),
    }
}

/// Prefix the text with the fixed ANSI sequence for the role, resetting
/// formatting before the text itself.
pub fn paint(role: Role, text: &str) -> String {
    let (code, label) = style(role);
    format!("{code}{label}>{RESET} {text}")
}

/// Write a painted line to stdout.
pub fn print_role(role: Role, text: &str) {
    println!("{}", paint(role, text));
}

/// Write the input prompt (no trailing newline) to stderr, so piped stdout
/// stays clean.
pub fn prompt(role: Role) {
    use std::io::Write;
    let (code, label) = style(role);
    eprint!("{code}{label}>{RESET} ");
    std::io::stderr().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_and_assistant_prefixes_are_distinct_escape_codes() {
        let user = paint(Role::User, "hi");
        let assistant = paint(Role::Assistant, "hi");
        assert!(user.starts_with("\x1b["));
        assert!(assistant.starts_with("\x1b["));
        assert_ne!(user, assistant);
        assert_ne!(&user[..5], &assistant[..5]);
    }

    #[test]
    fn painted_text_is_carried_unchanged_after_a_reset() {
        let out = paint(Role::Assistant, "plain reply");
        assert!(out.ends_with(&format!("{RESET} plain reply")));
    }
}
