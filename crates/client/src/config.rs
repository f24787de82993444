//! Session configuration, built once from the command line.

use std::path::PathBuf;

use anyhow::Context;
use directories::ProjectDirs;

use fevo_core::storage::BackendKind;

use crate::cli::Cli;
use crate::storage::remote::{RemoteCredentials, DEFAULT_TABLE};

pub const DEFAULT_ADMIN_PASSWORD: &str = "afeka";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4000";

/// Resolved settings for one admin session. Read-only after startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend: BackendKind,
    /// Password offered by the operator for this session.
    pub password: Option<String>,
    /// Shared password the admin gate compares against.
    pub admin_password: String,
    pub data_dir: PathBuf,
    /// `None` unless both the URL and the key are set.
    pub remote: Option<RemoteCredentials>,
    pub remote_table: String,
    pub server_url: String,
    /// Keep the device-local snapshot in memory only.
    pub ephemeral: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            password: None,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            data_dir: PathBuf::from(".fevo"),
            remote: None,
            remote_table: DEFAULT_TABLE.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            ephemeral: false,
        }
    }
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        let remote = match (non_empty(&cli.remote_url), non_empty(&cli.remote_key)) {
            (Some(url), Some(api_key)) => Some(RemoteCredentials { url, api_key }),
            (None, None) => None,
            _ => {
                tracing::warn!("Remote URL and key must both be set; remote backend disabled");
                None
            }
        };

        Ok(Self {
            backend: cli.backend,
            password: cli.password.clone(),
            admin_password: cli.admin_password.clone(),
            data_dir,
            remote,
            remote_table: cli.remote_table.clone(),
            server_url: cli.server_url.clone(),
            ephemeral: cli.ephemeral,
        })
    }

    /// Password the session's admin gate checks against.
    ///
    /// With the file backend the server holds the shared password, so the
    /// gate takes the offered one and the server's answer decides.
    pub fn gate_password(&self) -> &str {
        match (self.backend, self.password.as_deref()) {
            (BackendKind::File, Some(offered)) => offered,
            _ => &self.admin_password,
        }
    }
}

/// Platform data directory for the device-local snapshot.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    ProjectDirs::from("il", "fevo", "fevo")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .context("Could not determine a data directory; pass --data-dir")
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
