//! Hosted datastore client.
//!
//! Speaks the PostgREST dialect used by the hosted project: one endpoint
//! per table under `/rest/v1`, filters and ordering in the query string,
//! and `Prefer: return=representation` so writes echo the affected rows.
//! Authentication is a single project key sent both as `apikey` and as a
//! bearer token.

use std::time::Duration;

use async_trait::async_trait;
use backstage_core::{RecordId, ValidationError};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::backend::{Backend, Filter, Query, ID_COLUMN};
use crate::error::{StoreError, StoreResult};

const REST_PATH: &str = "rest/v1";
const USER_AGENT: &str = concat!("backstage/", env!("CARGO_PKG_VERSION"));
const PREFER: &str = "Prefer";
const RETURN_ROWS: &str = "return=representation";
const UPSERT_ROWS: &str = "resolution=merge-duplicates,return=representation";

/// PostgreSQL error codes that mean the row itself was refused.
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";

/// Error body returned by the datastore.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// A write against one table.
#[derive(Debug, Clone, Copy)]
enum Write<'a> {
    Insert(&'a Value),
    Update(&'a RecordId, &'a Value),
    Delete(&'a RecordId),
    /// Row plus the column whose conflict merges instead of failing.
    Upsert(&'a Value, &'a str),
}

/// HTTP client for the hosted datastore.
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    /// Create a client for the project at `project_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(project_url: &str, api_key: impl Into<String>) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: format!("{}/{REST_PATH}", project_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.base_url)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
    }

    /// Builds the request for a write; every write asks for the affected
    /// rows back.
    fn write_request(&self, table: &str, write: Write<'_>) -> RequestBuilder {
        match write {
            Write::Insert(row) => self
                .request(Method::POST, table)
                .header(PREFER, HeaderValue::from_static(RETURN_ROWS))
                .json(&[row]),
            Write::Update(id, patch) => self
                .request(Method::PATCH, table)
                .header(PREFER, HeaderValue::from_static(RETURN_ROWS))
                .query(&id_param(id))
                .json(patch),
            Write::Delete(id) => self
                .request(Method::DELETE, table)
                .header(PREFER, HeaderValue::from_static(RETURN_ROWS))
                .query(&id_param(id)),
            Write::Upsert(row, conflict_column) => self
                .request(Method::POST, table)
                .header(PREFER, HeaderValue::from_static(UPSERT_ROWS))
                .query(&[("on_conflict", conflict_column)])
                .json(&[row]),
        }
    }

    async fn rows(&self, table: &str, request: RequestBuilder) -> StoreResult<Vec<Value>> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(table, status, &body));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| StoreError::unavailable(format!("{table}: malformed response: {e}")))?;
        Ok(rows)
    }
}

/// Query-string parameters of a read.
fn read_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    if let Some(Filter::Eq { column, value }) = &query.filter {
        params.push((column.clone(), format!("eq.{value}")));
    }
    if let Some(order) = &query.order {
        params.push(("order".to_string(), order.to_string()));
    }
    params
}

fn id_param(id: &RecordId) -> [(&'static str, String); 1] {
    [(ID_COLUMN, format!("eq.{id}"))]
}

/// Maps an HTTP failure to the store taxonomy.
///
/// Constraint violations on the submitted row are validation failures;
/// everything else means the datastore would not serve the request.
fn classify_failure(table: &str, status: StatusCode, body: &str) -> StoreError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.details)
        .unwrap_or_else(|| body.trim().to_string());

    match parsed.code.as_deref() {
        Some(NOT_NULL_VIOLATION | CHECK_VIOLATION) => {
            ValidationError::invalid(table, format!("rejected by datastore: {message}")).into()
        }
        _ => StoreError::unavailable(format!("{table}: HTTP {status}: {message}")),
    }
}

fn first_row(table: &str, operation: &str, rows: Vec<Value>) -> StoreResult<Value> {
    rows.into_iter()
        .next()
        .ok_or_else(|| StoreError::unavailable(format!("{table}: {operation} returned no row")))
}

#[async_trait]
impl Backend for RestBackend {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Value>> {
        let request = self
            .request(Method::GET, table)
            .query(&read_params(query));
        self.rows(table, request).await
    }

    async fn insert(&self, table: &str, row: Value) -> StoreResult<Value> {
        let request = self.write_request(table, Write::Insert(&row));
        let rows = self.rows(table, request).await?;
        first_row(table, "insert", rows)
    }

    async fn update(&self, table: &str, id: &RecordId, patch: Value) -> StoreResult<Option<Value>> {
        let request = self.write_request(table, Write::Update(id, &patch));
        let rows = self.rows(table, request).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, table: &str, id: &RecordId) -> StoreResult<bool> {
        let request = self.write_request(table, Write::Delete(id));
        let rows = self.rows(table, request).await?;
        Ok(!rows.is_empty())
    }

    async fn upsert(&self, table: &str, row: Value, conflict_column: &str) -> StoreResult<Value> {
        let request = self.write_request(table, Write::Upsert(&row, conflict_column));
        let rows = self.rows(table, request).await?;
        first_row(table, "upsert", rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstage_core::OrderBy;

    fn backend() -> RestBackend {
        RestBackend::new("https://project.example.co/", "anon-key").unwrap()
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        assert_eq!(
            backend().table_url("gigs"),
            "https://project.example.co/rest/v1/gigs"
        );
    }

    #[test]
    fn test_request_carries_key_twice() {
        let request = backend().request(Method::GET, "tasks").build().unwrap();
        assert_eq!(request.headers()["apikey"], "anon-key");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer anon-key");
    }

    #[test]
    fn test_read_params_order_and_filter() {
        let query = Query {
            filter: Some(Filter::eq("key", "vision")),
            order: Some(OrderBy::asc("date")),
        };
        assert_eq!(
            read_params(&query),
            vec![
                ("select".to_string(), "*".to_string()),
                ("key".to_string(), "eq.vision".to_string()),
                ("order".to_string(), "date.asc".to_string()),
            ]
        );
        assert_eq!(read_params(&Query::default()).len(), 1);
    }

    #[test]
    fn test_select_url_encodes_query() {
        let b = backend();
        let request = b
            .request(Method::GET, "gigs")
            .query(&read_params(&Query::ordered(Some(OrderBy::desc("created_at")))))
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("select=*&order=created_at.desc"));
    }

    fn body_json(request: &reqwest::Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_insert_posts_row_array() {
        let row = serde_json::json!({ "venue": "Mohawk", "pay": 500 });
        let request = backend()
            .write_request("gigs", Write::Insert(&row))
            .build()
            .unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/rest/v1/gigs");
        assert_eq!(request.url().query(), None);
        assert_eq!(request.headers()[PREFER], RETURN_ROWS);
        assert_eq!(request.headers()["apikey"], "anon-key");
        assert_eq!(body_json(&request), serde_json::json!([row]));
    }

    #[test]
    fn test_update_patches_by_id() {
        let id = RecordId::new("7f3c");
        let patch = serde_json::json!({ "status": "Confirmed" });
        let request = backend()
            .write_request("gigs", Write::Update(&id, &patch))
            .build()
            .unwrap();
        assert_eq!(request.method(), Method::PATCH);
        assert_eq!(request.url().query(), Some("id=eq.7f3c"));
        assert_eq!(request.headers()[PREFER], RETURN_ROWS);
        assert_eq!(body_json(&request), patch);
    }

    #[test]
    fn test_delete_targets_id_without_body() {
        let id = RecordId::new("7f3c");
        let request = backend()
            .write_request("tasks", Write::Delete(&id))
            .build()
            .unwrap();
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.url().path(), "/rest/v1/tasks");
        assert_eq!(request.url().query(), Some("id=eq.7f3c"));
        assert_eq!(request.headers()[PREFER], RETURN_ROWS);
        assert!(request.body().is_none());
    }

    #[test]
    fn test_upsert_merges_on_conflict_column() {
        let row = serde_json::json!({ "key": "vision", "content": "draft B" });
        let request = backend()
            .write_request("notes", Write::Upsert(&row, "key"))
            .build()
            .unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().query(), Some("on_conflict=key"));
        assert_eq!(request.headers()[PREFER], UPSERT_ROWS);
        assert_eq!(body_json(&request), serde_json::json!([row]));
    }

    #[test]
    fn test_classify_not_null_as_validation() {
        let body = r#"{"code":"23502","message":"null value in column \"venue\" violates not-null constraint","details":null,"hint":null}"#;
        let err = classify_failure("gigs", StatusCode::BAD_REQUEST, body);
        assert!(err.is_validation());
        assert!(err.to_string().contains("venue"));
    }

    #[test]
    fn test_classify_other_failures_as_unavailable() {
        let body = r#"{"code":"42P01","message":"relation \"public.gig\" does not exist"}"#;
        let err = classify_failure("gig", StatusCode::NOT_FOUND, body);
        assert!(err.is_unavailable());

        let err = classify_failure("gigs", StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_first_row_requires_a_row() {
        assert!(first_row("gigs", "insert", Vec::new()).unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn test_unreachable_datastore_is_unavailable() {
        let backend = RestBackend::new("http://127.0.0.1:9", "anon-key").unwrap();
        let err = backend.select("gigs", &Query::default()).await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
