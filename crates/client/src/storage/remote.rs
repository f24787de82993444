//! Shared relational table reached through a PostgREST (Supabase) endpoint.
//!
//! The table is `job_sources(id, name, url, updated_at)` keyed by `id`.
//! A save upserts every row and then deletes the rows that are no longer in
//! the list, so the table ends up holding exactly the saved list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use fevo_core::serde::deserialize_source_id;
use fevo_core::sources::JobSource;
use fevo_core::storage::{BackendKind, Result, SourceStore, StoreError};

/// Default table name.
pub const DEFAULT_TABLE: &str = "job_sources";

/// Connection details for the remote table.
#[derive(Debug, Clone)]
pub struct RemoteCredentials {
    pub url: String,
    pub api_key: String,
}

/// One row of the remote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RemoteRow {
    #[serde(deserialize_with = "deserialize_source_id")]
    id: String,
    name: String,
    url: String,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<RemoteRow> for JobSource {
    fn from(row: RemoteRow) -> Self {
        JobSource {
            id: row.id,
            name: row.name,
            url: row.url,
            last_updated: row.updated_at,
        }
    }
}

impl From<&JobSource> for RemoteRow {
    fn from(source: &JobSource) -> Self {
        RemoteRow {
            id: source.id.clone(),
            name: source.name.clone(),
            url: source.url.clone(),
            updated_at: source.last_updated,
        }
    }
}

/// Store backed by the remote table.
///
/// Built even when credentials are missing; every call then fails with
/// [`StoreError::BackendUnavailable`] so the caller falls back to the local
/// snapshot.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    credentials: Option<RemoteCredentials>,
    table: String,
}

impl RemoteStore {
    pub fn new(credentials: Option<RemoteCredentials>, table: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            table: table.into(),
        }
    }

    /// Returns true if both the URL and the key were configured.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn credentials(&self) -> Result<&RemoteCredentials> {
        self.credentials.as_ref().ok_or_else(|| {
            StoreError::BackendUnavailable("remote URL or key is not configured".to_string())
        })
    }

    fn table_url(&self, credentials: &RemoteCredentials) -> String {
        format!(
            "{}/rest/v1/{}",
            credentials.url.trim_end_matches('/'),
            self.table
        )
    }

    fn auth_headers(credentials: &RemoteCredentials) -> Result<HeaderMap> {
        let invalid = |_| StoreError::BackendUnavailable("remote key is not a valid header".into());

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&credentials.api_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credentials.api_key)).map_err(invalid)?,
        );
        Ok(headers)
    }

    /// Deletes every row whose id is not in `keep`.
    async fn prune(&self, credentials: &RemoteCredentials, keep: &[JobSource]) -> Result<()> {
        let response = self
            .client
            .delete(self.table_url(credentials))
            .headers(Self::auth_headers(credentials)?)
            .query(&[("id", prune_filter(keep))])
            .send()
            .await
            .map_err(|e| StoreError::PersistFailed(e.to_string()))?;

        ensure_success(response, StoreError::PersistFailed).await
    }
}

/// Builds the PostgREST filter matching rows absent from `keep`.
fn prune_filter(keep: &[JobSource]) -> String {
    if keep.is_empty() {
        return "not.is.null".to_string();
    }
    let quoted: Vec<String> = keep
        .iter()
        .map(|source| format!("\"{}\"", source.id.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("not.in.({})", quoted.join(","))
}

/// Turns a non-2xx response into the given error variant.
async fn ensure_success(
    response: reqwest::Response,
    to_error: fn(String) -> StoreError,
) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(to_error(format!("remote returned {status}: {message}")))
}

#[async_trait]
impl SourceStore for RemoteStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn load(&self) -> Result<Vec<JobSource>> {
        let credentials = self.credentials()?;
        let unavailable = |e: reqwest::Error| StoreError::BackendUnavailable(e.to_string());

        let response = self
            .client
            .get(self.table_url(credentials))
            .headers(Self::auth_headers(credentials)?)
            .query(&[("select", "id,name,url,updated_at"), ("order", "id.asc")])
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::BackendUnavailable(format!(
                "remote returned {status}"
            )));
        }

        let rows: Vec<RemoteRow> = response.json().await.map_err(unavailable)?;
        tracing::debug!(count = rows.len(), backend = "remote", "Loaded sources");
        Ok(rows.into_iter().map(JobSource::from).collect())
    }

    async fn save(&self, sources: &[JobSource]) -> Result<()> {
        let credentials = self.credentials()?;
        let rows: Vec<RemoteRow> = sources.iter().map(RemoteRow::from).collect();

        if !rows.is_empty() {
            let response = self
                .client
                .post(self.table_url(credentials))
                .headers(Self::auth_headers(credentials)?)
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&rows)
                .send()
                .await
                .map_err(|e| StoreError::PersistFailed(e.to_string()))?;
            ensure_success(response, StoreError::PersistFailed).await?;
        }

        self.prune(credentials, sources).await?;

        tracing::debug!(count = sources.len(), backend = "remote", "Saved sources");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{RawQuery, State},
        http::{HeaderMap as AxumHeaders, Method, StatusCode},
        routing::get,
        Json, Router,
    };
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        query: Option<String>,
        apikey: Option<String>,
        prefer: Option<String>,
        body: Option<Value>,
    }

    #[derive(Clone, Default)]
    struct Stub {
        requests: Arc<Mutex<Vec<Recorded>>>,
        rows: Value,
        status: Option<StatusCode>,
    }

    fn record(stub: &Stub, method: Method, headers: &AxumHeaders, query: Option<String>, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        stub.requests.lock().unwrap().push(Recorded {
            method,
            query,
            apikey: header("apikey"),
            prefer: header("prefer"),
            body,
        });
    }

    async fn list(
        State(stub): State<Stub>,
        headers: AxumHeaders,
        RawQuery(query): RawQuery,
    ) -> (StatusCode, Json<Value>) {
        record(&stub, Method::GET, &headers, query, None);
        (stub.status.unwrap_or(StatusCode::OK), Json(stub.rows.clone()))
    }

    async fn upsert(
        State(stub): State<Stub>,
        headers: AxumHeaders,
        RawQuery(query): RawQuery,
        Json(body): Json<Value>,
    ) -> StatusCode {
        record(&stub, Method::POST, &headers, query, Some(body));
        stub.status.unwrap_or(StatusCode::CREATED)
    }

    async fn prune(
        State(stub): State<Stub>,
        headers: AxumHeaders,
        RawQuery(query): RawQuery,
    ) -> StatusCode {
        record(&stub, Method::DELETE, &headers, query, None);
        stub.status.unwrap_or(StatusCode::NO_CONTENT)
    }

    async fn spawn(stub: Stub) -> String {
        let app = Router::new()
            .route("/rest/v1/job_sources", get(list).post(upsert).delete(prune))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn store(url: &str) -> RemoteStore {
        RemoteStore::new(
            Some(RemoteCredentials {
                url: url.to_string(),
                api_key: "anon-key".to_string(),
            }),
            DEFAULT_TABLE,
        )
    }

    #[tokio::test]
    async fn test_load_maps_rows() {
        let stub = Stub {
            rows: json!([
                {"id": 1, "name": "LinkedIn", "url": "https://linkedin.com", "updated_at": "2024-05-01T08:00:00Z"},
                {"id": "2", "name": "Indeed", "url": "https://il.indeed.com", "updated_at": null}
            ]),
            ..Default::default()
        };
        let requests = stub.requests.clone();
        let url = spawn(stub).await;

        let sources = store(&url).load().await.unwrap();

        assert_eq!(
            sources,
            vec![
                JobSource::new("1", "LinkedIn", "https://linkedin.com")
                    .with_last_updated(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()),
                JobSource::new("2", "Indeed", "https://il.indeed.com"),
            ]
        );
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].apikey.as_deref(), Some("anon-key"));
        assert!(requests[0]
            .query
            .as_deref()
            .unwrap()
            .contains("order=id.asc"));
    }

    #[tokio::test]
    async fn test_load_error_status_is_unavailable() {
        let stub = Stub {
            rows: json!({"message": "boom"}),
            status: Some(StatusCode::SERVICE_UNAVAILABLE),
            ..Default::default()
        };
        let url = spawn(stub).await;

        let result = store(&url).load().await;

        assert!(matches!(result, Err(StoreError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn test_load_bad_payload_is_unavailable() {
        let stub = Stub {
            rows: json!({"not": "a list"}),
            ..Default::default()
        };
        let url = spawn(stub).await;

        let result = store(&url).load().await;

        assert!(matches!(result, Err(StoreError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn test_load_unreachable_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = store(&format!("http://{addr}")).load().await;

        assert!(matches!(result, Err(StoreError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn test_missing_credentials_is_unavailable() {
        let store = RemoteStore::new(None, DEFAULT_TABLE);

        assert!(!store.is_configured());
        assert!(matches!(
            store.load().await,
            Err(StoreError::BackendUnavailable(_))
        ));
        assert!(matches!(
            store.save(&[]).await,
            Err(StoreError::BackendUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_save_upserts_then_prunes() {
        let stub = Stub::default();
        let requests = stub.requests.clone();
        let url = spawn(stub).await;
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let sources = vec![
            JobSource::new("1", "LinkedIn", "https://linkedin.com").with_last_updated(at),
            JobSource::new("2", "Indeed", "https://il.indeed.com"),
        ];

        store(&url).save(&sources).await.unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);

        let upsert = &requests[0];
        assert_eq!(upsert.method, Method::POST);
        assert_eq!(
            upsert.prefer.as_deref(),
            Some("resolution=merge-duplicates,return=minimal")
        );
        assert_eq!(
            upsert.body,
            Some(json!([
                {"id": "1", "name": "LinkedIn", "url": "https://linkedin.com", "updated_at": "2024-06-01T12:00:00Z"},
                {"id": "2", "name": "Indeed", "url": "https://il.indeed.com", "updated_at": null}
            ]))
        );

        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].apikey.as_deref(), Some("anon-key"));
        assert!(requests[1].query.is_some());
    }

    #[tokio::test]
    async fn test_save_empty_list_only_prunes() {
        let stub = Stub::default();
        let requests = stub.requests.clone();
        let url = spawn(stub).await;

        store(&url).save(&[]).await.unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].query.as_deref(), Some("id=not.is.null"));
    }

    #[tokio::test]
    async fn test_save_error_status_is_persist_failed() {
        let stub = Stub {
            status: Some(StatusCode::UNAUTHORIZED),
            ..Default::default()
        };
        let url = spawn(stub).await;

        let result = store(&url)
            .save(&[JobSource::new("1", "A", "https://a.com")])
            .await;

        assert!(matches!(result, Err(StoreError::PersistFailed(_))));
    }

    #[test]
    fn test_prune_filter_quotes_ids() {
        let keep = vec![
            JobSource::new("1", "A", "https://a.com"),
            JobSource::new("a,b", "B", "https://b.com"),
        ];
        assert_eq!(prune_filter(&keep), r#"not.in.("1","a,b")"#);
        assert_eq!(prune_filter(&[]), "not.is.null");
    }
}
