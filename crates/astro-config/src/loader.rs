use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::AstroConfig;

/// Loads the Astro configuration from disk.
pub struct ConfigLoader {
    config: AstroConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > ASTRO_CONFIG env > ~/.astro/astro.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("ASTRO_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".astro")
            .join("astro.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> astro_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<AstroConfig>(&raw).map_err(|e| {
                astro_core::AstroError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            AstroConfig::default()
        };

        // Apply environment variable overrides
        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(astro_core::AstroError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get a snapshot of the loaded config.
    pub fn get(&self) -> AstroConfig {
        self.config.clone()
    }

    /// Path the config was resolved from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (ASTRO_MODEL, ASTRO_LOG_LEVEL, ANTHROPIC_API_KEY).
    fn apply_env_overrides(mut config: AstroConfig) -> AstroConfig {
        if let Ok(v) = std::env::var("ASTRO_MODEL") {
            config.agent.model = v;
        }
        if let Ok(v) = std::env::var("ASTRO_LOG_LEVEL") {
            config.logging.level = v;
        }
        // API key: env var fills in when the config file doesn't set it.
        // This means the config file takes priority, env is the fallback.
        if config.services.anthropic_api_key.is_none() {
            if let Ok(v) = std::env::var("ANTHROPIC_API_KEY") {
                config.services.anthropic_api_key = Some(v);
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_path_wins() {
        let p = Path::new("/etc/astro/custom.toml");
        assert_eq!(ConfigLoader::resolve_path(Some(p)), p);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astro.toml");
        let loader = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(loader.get().agent.max_tokens, 8192);
        assert_eq!(loader.path(), path);
    }

    #[test]
    fn file_contents_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astro.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[agent]\nmax_tokens = 1024").unwrap();
        let loader = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(loader.get().agent.max_tokens, 1024);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("astro.toml");
        std::fs::write(&path, "[agent]\ntemperature = 9.0").unwrap();
        assert!(ConfigLoader::load(Some(&path)).is_err());
    }
}
