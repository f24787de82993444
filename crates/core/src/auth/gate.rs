use super::error::GateError;
use super::functions::password_matches;

/// Lock state of an admin session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Locked,
    Unlocked,
}

/// Per-session write gate guarding every mutation of the source list.
///
/// Sessions start `Locked`. An accepted password moves the session to
/// `Unlocked` until [`AdminGate::lock`] is called or the session ends.
/// Nothing is persisted, so every new session starts `Locked` again.
#[derive(Debug, Clone)]
pub struct AdminGate {
    password: String,
    state: SessionState,
}

impl AdminGate {
    /// Creates a locked gate for the given shared password.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            state: SessionState::Locked,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == SessionState::Unlocked
    }

    /// Tries to unlock the session with `offered`.
    ///
    /// A wrong password never changes the current state.
    pub fn unlock(&mut self, offered: &str) -> Result<(), GateError> {
        if !password_matches(offered, &self.password) {
            return Err(GateError::Unauthorized);
        }
        self.state = SessionState::Unlocked;
        Ok(())
    }

    /// Ends editing; the session is `Locked` again.
    pub fn lock(&mut self) {
        self.state = SessionState::Locked;
    }

    /// Returns an error unless the session is unlocked.
    pub fn require_unlocked(&self) -> Result<(), GateError> {
        match self.state {
            SessionState::Unlocked => Ok(()),
            SessionState::Locked => Err(GateError::Locked),
        }
    }
}
