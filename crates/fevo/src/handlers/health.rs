//! Health check endpoint for Kubernetes-style probes.

use axum::http::StatusCode;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately without touching the list file.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
