use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use astro_config::ConfigLoader;
use astro_memory::NoteStore;

mod chat;

/// Astro — terminal robo-advisor chat with persistent memory
#[derive(Parser)]
#[command(name = "astro", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to astro.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat in the terminal (the default)
    Chat,
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect saved memory notes
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },
    /// Show version info
    Version,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum MemoryAction {
    /// Print the memory file contents
    Show,
}

impl Cli {
    pub async fn run(self) -> astro_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone())
        };

        // Initialize tracing with appropriate format
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .json()
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }

        match self.command.unwrap_or(Commands::Chat) {
            Commands::Chat => chat::cmd_chat(config).await,
            Commands::Config { json } => Self::cmd_config(config, json),
            Commands::Memory { action } => Self::cmd_memory(config, action),
            Commands::Version => Self::cmd_version(),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_config(config: astro_config::AstroConfig, json: bool) -> astro_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| astro_core::AstroError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_memory(
        config: astro_config::AstroConfig,
        action: MemoryAction,
    ) -> astro_core::Result<()> {
        let store = NoteStore::new(config.memory.file);
        match action {
            MemoryAction::Show => {
                let contents = store.load()?;
                if contents.is_empty() {
                    println!("(no notes saved at {})", store.path().display());
                } else {
                    print!("{contents}");
                }
            }
        }
        Ok(())
    }

    fn cmd_version() -> astro_core::Result<()> {
        println!("astro {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> astro_core::Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "astro", &mut std::io::stdout());
        Ok(())
    }
}
