use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration — maps to `astro.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AstroConfig {
    pub agent: AgentConfig,
    pub memory: MemoryConfig,
    pub logging: LoggingConfig,
    pub services: ServicesConfig,
}

// ── Agent ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier, e.g. "claude-sonnet-4-20250514".
    pub model: String,
    /// System prompt override. When unset, the built-in advisor persona is used.
    pub system_prompt: Option<String>,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// Temperature (0.0 - 1.0).
    pub temperature: f32,
    /// Maximum tool round-trips within a single turn before forcing a stop.
    pub max_iterations: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".into(),
            system_prompt: None,
            max_tokens: 8192,
            temperature: 0.7,
            max_iterations: 10,
        }
    }
}

// ── Memory ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Path of the plain-text memory file, relative to the working directory
    /// unless absolute.
    pub file: PathBuf,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("memory.txt"),
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level: trace, debug, info, warn, error.
    pub level: String,
    /// Output format: "text" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

// ── Services ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Anthropic API key. `ANTHROPIC_API_KEY` env var is the fallback when
    /// the config file doesn't set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
}

impl AstroConfig {
    /// Validate the config. Returns warnings for odd-but-usable values,
    /// errors for values that cannot work.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();

        if self.agent.model.is_empty() {
            return Err("agent.model must not be empty".into());
        }
        if self.agent.max_tokens == 0 {
            return Err("agent.max_tokens must be greater than 0".into());
        }
        if !(0.0..=1.0).contains(&self.agent.temperature) {
            return Err(format!(
                "agent.temperature must be in 0.0..=1.0, got {}",
                self.agent.temperature
            ));
        }
        if self.agent.max_iterations == 0 {
            warnings.push("agent.max_iterations is 0; tool calls will never run".into());
        }
        if self.logging.format != "text" && self.logging.format != "json" {
            warnings.push(format!(
                "logging.format '{}' is not 'text' or 'json'; falling back to text",
                self.logging.format
            ));
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AstroConfig::default();
        let warnings = config.validate().unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.memory.file, PathBuf::from("memory.txt"));
        assert!(config.services.anthropic_api_key.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AstroConfig = toml::from_str(
            r#"
            [agent]
            model = "claude-haiku-3-5"

            [memory]
            file = "/tmp/notes.txt"
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.model, "claude-haiku-3-5");
        assert_eq!(config.agent.max_tokens, 8192);
        assert_eq!(config.memory.file, PathBuf::from("/tmp/notes.txt"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn bad_temperature_is_rejected() {
        let mut config = AstroConfig::default();
        config.agent.temperature = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_iterations_warns() {
        let mut config = AstroConfig::default();
        config.agent.max_iterations = 0;
        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 1);
    }
}
