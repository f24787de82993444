use thiserror::Error;

/// Errors raised by the admin write gate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// The offered password did not match. Deliberately carries no detail.
    #[error("wrong password")]
    Unauthorized,
    /// A mutation was attempted while the session is locked.
    #[error("session is locked")]
    Locked,
}
