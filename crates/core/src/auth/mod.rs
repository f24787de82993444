mod error;
mod functions;
mod gate;

pub use error::GateError;
pub use functions::password_matches;
pub use gate::{AdminGate, SessionState};
