pub mod error;
pub mod health;
pub mod job_sources;

pub use error::AppError;
