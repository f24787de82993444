use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The persistence target a store writes to. Fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Device-bound, single user.
    Local,
    /// Shared relational table; needs reachable credentials.
    Remote,
    /// A JSON file on a server, behind the shared-password write gate.
    File,
}

/// How a failed write to a backend is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Failure must be shown to the operator.
    Authoritative,
    /// Failure is logged only.
    BestEffort,
}

impl BackendKind {
    /// Returns the write policy of this backend when it mirrors the local copy.
    pub fn write_policy(&self) -> WritePolicy {
        match self {
            BackendKind::Local | BackendKind::File => WritePolicy::Authoritative,
            BackendKind::Remote => WritePolicy::BestEffort,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::Remote => "remote",
            BackendKind::File => "file",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "remote" => Ok(BackendKind::Remote),
            "file" => Ok(BackendKind::File),
            other => Err(format!("unknown backend '{other}' (expected local, remote or file)")),
        }
    }
}
