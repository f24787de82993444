//! HTTP client of the `fevo` server's flat-file endpoints.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use fevo_core::sources::JobSource;
use fevo_core::storage::{BackendKind, Result, SourceStore, StoreError};

/// Request body of `POST /api/job-sources`.
#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    password: &'a str,
    sources: &'a [JobSource],
}

/// Store that reads and writes the list through the server.
#[derive(Debug, Clone)]
pub struct FileApiStore {
    client: reqwest::Client,
    base_url: String,
    password: String,
}

impl FileApiStore {
    /// Creates a store for the server at `base_url`, sending `password` with
    /// every write.
    pub fn new(base_url: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            password: password.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/api/job-sources", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SourceStore for FileApiStore {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    async fn load(&self) -> Result<Vec<JobSource>> {
        let unavailable = |e: reqwest::Error| StoreError::BackendUnavailable(e.to_string());

        let response = self.client.get(self.url()).send().await.map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::BackendUnavailable(format!(
                "server returned {status}"
            )));
        }

        let body = response.text().await.map_err(unavailable)?;
        let sources: Vec<JobSource> =
            serde_json::from_str(&body).map_err(|e| StoreError::Parse(e.to_string()))?;

        tracing::debug!(count = sources.len(), backend = "file", "Loaded sources");
        Ok(sources)
    }

    async fn save(&self, sources: &[JobSource]) -> Result<()> {
        let response = self
            .client
            .post(self.url())
            .json(&SaveRequest {
                password: &self.password,
                sources,
            })
            .send()
            .await
            .map_err(|e| StoreError::PersistFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                tracing::debug!(count = sources.len(), backend = "file", "Saved sources");
                Ok(())
            }
            StatusCode::UNAUTHORIZED => Err(StoreError::Unauthorized),
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(StoreError::PersistFailed(format!(
                    "server returned {status}: {message}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::{json, Value};

    /// Minimal stand-in for the server: one list, one password.
    #[derive(Clone)]
    struct Stub {
        stored: Arc<Mutex<Value>>,
        password: &'static str,
    }

    async fn list(State(stub): State<Stub>) -> Json<Value> {
        Json(stub.stored.lock().unwrap().clone())
    }

    async fn save(State(stub): State<Stub>, Json(body): Json<Value>) -> (AxumStatus, Json<Value>) {
        if body["password"] != stub.password {
            return (AxumStatus::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})));
        }
        if !body["sources"].is_array() {
            return (
                AxumStatus::BAD_REQUEST,
                Json(json!({"error": "Invalid sources format"})),
            );
        }
        *stub.stored.lock().unwrap() = body["sources"].clone();
        (AxumStatus::OK, Json(json!({"success": true})))
    }

    async fn spawn(initial: Value) -> (String, Arc<Mutex<Value>>) {
        let stored = Arc::new(Mutex::new(initial));
        let app = Router::new()
            .route("/api/job-sources", get(list).post(save))
            .with_state(Stub {
                stored: stored.clone(),
                password: "afeka",
            });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}"), stored)
    }

    #[tokio::test]
    async fn test_load_reads_server_list() {
        let (url, _) = spawn(json!([{"id": 3, "name": "Drushim", "url": "https://www.drushim.co.il"}])).await;

        let sources = FileApiStore::new(url, "afeka").load().await.unwrap();

        assert_eq!(
            sources,
            vec![JobSource::new("3", "Drushim", "https://www.drushim.co.il")]
        );
    }

    #[tokio::test]
    async fn test_load_non_list_is_parse_error() {
        let (url, _) = spawn(json!({"oops": true})).await;

        let result = FileApiStore::new(url, "afeka").load().await;

        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[tokio::test]
    async fn test_save_with_password() {
        let (url, stored) = spawn(json!([])).await;
        let store = FileApiStore::new(format!("{url}/"), "afeka");
        let sources = vec![JobSource::new("1", "LinkedIn", "https://linkedin.com")];

        store.save(&sources).await.unwrap();

        assert_eq!(
            *stored.lock().unwrap(),
            json!([{"id": "1", "name": "LinkedIn", "url": "https://linkedin.com"}])
        );
        assert_eq!(store.load().await.unwrap(), sources);
    }

    #[tokio::test]
    async fn test_save_wrong_password_is_unauthorized() {
        let (url, stored) = spawn(json!([])).await;

        let result = FileApiStore::new(url, "guess")
            .save(&[JobSource::new("1", "A", "https://a.com")])
            .await;

        assert_eq!(result, Err(StoreError::Unauthorized));
        assert_eq!(*stored.lock().unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_server_down() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let store = FileApiStore::new(format!("http://{addr}"), "afeka");

        assert!(matches!(
            store.load().await,
            Err(StoreError::BackendUnavailable(_))
        ));
        assert!(matches!(
            store.save(&[]).await,
            Err(StoreError::PersistFailed(_))
        ));
    }
}
