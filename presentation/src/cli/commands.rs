//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for voicelog
#[derive(Parser, Debug)]
#[command(name = "voicelog")]
#[command(author, version, about = "Voice assistant session log and AI pass-through server")]
#[command(long_about = r#"
voicelog serves a small JSON API that records voice assistant sessions,
answers commands (rule-based, or via an AI model when prefixed with "ai:"),
and keeps an ordered transcript of every exchange.

Configuration files are loaded from (in priority order):
1. VOICELOG_* environment variables   e.g. VOICELOG_SERVER__PORT=9000
2. --config <path>                    Explicit config file
3. ./voicelog.toml                    Project-level config
4. ~/.config/voicelog/config.toml     Global config

The AI API key is read from $OPENAI_API_KEY unless [ai] api_key_env says otherwise.

Example:
  voicelog
  voicelog --port 9000 --database ./demo.db -v
  voicelog --database :memory:
"#)]
pub struct Cli {
    /// Address to bind (overrides [server] host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides [server] port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// SQLite database file, or ":memory:" (overrides [database] path)
    #[arg(long, value_name = "PATH")]
    pub database: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
