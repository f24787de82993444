//! CLI command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use fevo_core::storage::BackendKind;

/// Admin CLI for the fevo job source list.
#[derive(Debug, Parser)]
#[command(name = "fevo-admin")]
#[command(about = "Manage the fevo job source list", long_about = None)]
pub struct Cli {
    /// Primary backend the list is mirrored to.
    #[arg(long, env = "FEVO_BACKEND", default_value = "local")]
    pub backend: BackendKind,

    /// Admin password used to unlock editing for this session.
    #[arg(long, env = "FEVO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Shared admin password the session is checked against.
    #[arg(
        long,
        env = "FEVO_ADMIN_PASSWORD",
        default_value = "afeka",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub admin_password: String,

    /// Directory holding the device-local snapshot.
    #[arg(long, env = "FEVO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the remote table service.
    #[arg(long, env = "FEVO_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// API key of the remote table service.
    #[arg(long, env = "FEVO_REMOTE_KEY", hide_env_values = true)]
    pub remote_key: Option<String>,

    /// Remote table name.
    #[arg(long, env = "FEVO_REMOTE_TABLE", default_value = "job_sources")]
    pub remote_table: String,

    /// Base URL of the fevo server (file backend).
    #[arg(long, env = "FEVO_SERVER_URL", default_value = "http://localhost:4000")]
    pub server_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Keep the local snapshot in memory for this run only.
    #[arg(long)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the list and where it was loaded from.
    List,
    /// Add a source.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
    },
    /// Edit a source's name or URL.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete a source.
    Delete { id: String },
    /// Move a source to a 0-based position.
    Move { id: String, position: usize },
    /// Replace the whole list from a JSON file.
    Import { file: PathBuf },
    /// Replace the list with the built-in defaults.
    Reset,
    /// Print the list as JSON.
    Export {
        /// Print a `const defaultSources = [...]` snippet instead.
        #[arg(long)]
        snippet: bool,
    },
}

impl Commands {
    /// Returns true for commands that change the list.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Commands::List | Commands::Export { .. })
    }
}
