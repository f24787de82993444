use std::{env, path::PathBuf};

/// Default shared admin password, used when `ADMIN_PASSWORD` is unset.
pub const DEFAULT_ADMIN_PASSWORD: &str = "afeka";

/// Default location of the source list file.
pub const DEFAULT_DATA_FILE: &str = "data/job-sources.json";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared password required by `POST /api/job-sources`.
    pub admin_password: String,
    /// Path of the JSON list file.
    pub data_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ADMIN_PASSWORD` - Shared admin password (default: "afeka")
    /// - `DATA_FILE` - Path of the list file (default: "data/job-sources.json")
    pub fn from_env() -> Self {
        Self {
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        env::remove_var("ADMIN_PASSWORD");
        env::remove_var("DATA_FILE");

        let config = Config::from_env();

        assert_eq!(config.admin_password, "afeka");
        assert_eq!(config.data_file, PathBuf::from("data/job-sources.json"));
    }
}
