//! Typed HTTP client for the Joplin Data API.
//!
//! `JoplinClient` owns the single connection to Joplin and exposes one
//! method per remote capability, each a direct mapping to a Data API call
//! with no business logic. Every transport or status failure is translated
//! into the [`JoplinError`](crate::error::JoplinError) taxonomy here; no
//! raw reqwest error escapes this module.
//!
//! The client is cheap to clone and safe to share across tasks:
//! `reqwest::Client` is a connection pool behind an `Arc`, and the config
//! is immutable after construction.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::config::Config;
use crate::error::{JoplinError, Result};

/// Joplin caps page sizes at 100 items.
const PAGE_SIZE: usize = 100;

// ── Joplin Data API wire types ──────────────────────

/// Raw note as returned by the Data API. Timestamps are epoch milliseconds,
/// todo flags are 0/1 integers, and `parent_id` is empty for orphaned data.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteData {
    /// Note id.
    pub id: String,
    /// Note title.
    #[serde(default)]
    pub title: String,
    /// Markdown body. Only present when requested via `fields`.
    #[serde(default)]
    pub body: String,
    /// Owning notebook id.
    #[serde(default)]
    pub parent_id: String,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub created_time: i64,
    /// Last update time, epoch milliseconds.
    #[serde(default)]
    pub updated_time: i64,
    /// 1 when the note is a todo.
    #[serde(default)]
    pub is_todo: i64,
    /// Completion time for todos, 0 when open.
    #[serde(default)]
    pub todo_completed: i64,
}

/// Raw notebook (Joplin calls them folders).
#[derive(Debug, Clone, Deserialize)]
pub struct NotebookData {
    /// Notebook id.
    pub id: String,
    /// Notebook title.
    #[serde(default)]
    pub title: String,
    /// Parent notebook id, empty at the root.
    #[serde(default)]
    pub parent_id: String,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub created_time: i64,
    /// Last update time, epoch milliseconds.
    #[serde(default)]
    pub updated_time: i64,
}

/// Raw tag.
#[derive(Debug, Clone, Deserialize)]
pub struct TagData {
    /// Tag id.
    pub id: String,
    /// Tag title.
    #[serde(default)]
    pub title: String,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub created_time: i64,
    /// Last update time, epoch milliseconds.
    #[serde(default)]
    pub updated_time: i64,
}

/// Raw resource (attachment) metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceData {
    /// Resource id.
    pub id: String,
    /// Resource title.
    #[serde(default)]
    pub title: String,
    /// Original filename.
    #[serde(default)]
    pub filename: String,
    /// MIME type.
    #[serde(default)]
    pub mime: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub created_time: i64,
    /// Last update time, epoch milliseconds.
    #[serde(default)]
    pub updated_time: i64,
}

/// One page of a paginated list response.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

/// Create responses only need the assigned id.
#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

// ── Client ──────────────────────────────────────────

/// Client for the Joplin Data API.
///
/// Holds the configured connection (host, port, token) and performs no
/// retries; callers decide retry policy. Clones share the underlying
/// connection pool.
#[derive(Clone)]
pub struct JoplinClient {
    http: reqwest::Client,
    config: Config,
}

impl JoplinClient {
    /// Create a client from resolved configuration.
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Start a GET request with the token attached.
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.endpoint(path))
            .query(&[("token", self.config.api_token.as_str())])
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint(path))
            .query(&[("token", self.config.api_token.as_str())])
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .put(self.endpoint(path))
            .query(&[("token", self.config.api_token.as_str())])
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .delete(self.endpoint(path))
            .query(&[("token", self.config.api_token.as_str())])
    }

    /// Send a request and translate transport and status failures.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e, context))?;

        let status = response.status();
        debug!(status = %status, context, "joplin api response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &body, context))
    }

    fn transport_error(&self, err: reqwest::Error, context: &str) -> JoplinError {
        if err.is_connect() || err.is_timeout() {
            JoplinError::Connection {
                message: format!(
                    "cannot connect to Joplin at {}:{}. Is Joplin running with the \
                     Web Clipper service enabled?",
                    self.config.host, self.config.port
                ),
                detail: Some(err.to_string()),
            }
        } else {
            JoplinError::Api {
                message: format!("request failed: {}", context),
                detail: Some(err.to_string()),
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<T> {
        response.json::<T>().await.map_err(|e| JoplinError::Api {
            message: format!("unexpected response shape: {}", context),
            detail: Some(e.to_string()),
        })
    }

    /// Fetch a paginated list endpoint, aggregating pages until `limit`
    /// items are collected or Joplin reports no more pages.
    async fn fetch_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
        limit: usize,
        context: &str,
    ) -> Result<Vec<T>> {
        let mut items: Vec<T> = Vec::new();
        let mut page: u64 = 1;

        loop {
            let page_size = (limit - items.len()).min(PAGE_SIZE);
            let request = self
                .get(path)
                .query(extra)
                .query(&[("page", page.to_string()), ("limit", page_size.to_string())]);

            let response = self.send(request, context).await?;
            let batch: Page<T> = self.read_json(response, context).await?;
            let received = batch.items.len();
            items.extend(batch.items);

            if !batch.has_more || received == 0 || items.len() >= limit {
                break;
            }
            page += 1;
        }

        items.truncate(limit);
        Ok(items)
    }

    // ── Note operations ─────────────────────────────

    /// Fetch a note by id, requesting the given comma-separated fields.
    pub async fn get_note(&self, note_id: &str, fields: &str) -> Result<NoteData> {
        let context = format!("note {}", note_id);
        let request = self
            .get(&format!("/notes/{}", note_id))
            .query(&[("fields", fields)]);
        let response = self.send(request, &context).await?;
        self.read_json(response, &context).await
    }

    /// Run a search query, returning up to `limit` matching notes.
    pub async fn search_notes(
        &self,
        query: &str,
        fields: &str,
        limit: usize,
    ) -> Result<Vec<NoteData>> {
        let context = format!("search '{}'", query);
        self.fetch_pages("/search", &[("query", query), ("fields", fields)], limit, &context)
            .await
    }

    /// Create a note; returns the assigned id.
    pub async fn create_note(&self, payload: &Map<String, JsonValue>) -> Result<String> {
        let request = self.post("/notes").json(payload);
        let response = self.send(request, "create note").await?;
        let created: IdResponse = self.read_json(response, "create note").await?;
        Ok(created.id)
    }

    /// Apply a sparse field payload to an existing note.
    pub async fn update_note(&self, note_id: &str, payload: &Map<String, JsonValue>) -> Result<()> {
        let context = format!("update note {}", note_id);
        let request = self.put(&format!("/notes/{}", note_id)).json(payload);
        self.send(request, &context).await?;
        Ok(())
    }

    /// List the tags attached to a note.
    pub async fn get_note_tags(&self, note_id: &str) -> Result<Vec<TagData>> {
        let context = format!("get tags for note {}", note_id);
        self.fetch_pages(
            &format!("/notes/{}/tags", note_id),
            &[("fields", "id,title,created_time,updated_time")],
            usize::MAX,
            &context,
        )
        .await
    }

    /// List the resources (attachments) of a note.
    pub async fn get_note_resources(&self, note_id: &str) -> Result<Vec<ResourceData>> {
        let context = format!("get resources for note {}", note_id);
        self.fetch_pages(
            &format!("/notes/{}/resources", note_id),
            &[("fields", "id,title,filename,mime,size,created_time,updated_time")],
            usize::MAX,
            &context,
        )
        .await
    }

    // ── Notebook operations ─────────────────────────

    /// List notebooks, requesting the given fields, up to `limit` items.
    pub async fn get_notebooks(&self, fields: &str, limit: usize) -> Result<Vec<NotebookData>> {
        self.fetch_pages("/folders", &[("fields", fields)], limit, "get notebooks")
            .await
    }

    /// Fetch a notebook by id.
    pub async fn get_notebook(&self, notebook_id: &str) -> Result<NotebookData> {
        let context = format!("notebook {}", notebook_id);
        let request = self.get(&format!("/folders/{}", notebook_id)).query(&[(
            "fields",
            "id,title,parent_id,created_time,updated_time",
        )]);
        let response = self.send(request, &context).await?;
        self.read_json(response, &context).await
    }

    /// Create a notebook; returns the assigned id.
    pub async fn create_notebook(&self, payload: &Map<String, JsonValue>) -> Result<String> {
        let request = self.post("/folders").json(payload);
        let response = self.send(request, "create notebook").await?;
        let created: IdResponse = self.read_json(response, "create notebook").await?;
        Ok(created.id)
    }

    /// Apply a sparse field payload to an existing notebook.
    pub async fn update_notebook(
        &self,
        notebook_id: &str,
        payload: &Map<String, JsonValue>,
    ) -> Result<()> {
        let context = format!("update notebook {}", notebook_id);
        let request = self.put(&format!("/folders/{}", notebook_id)).json(payload);
        self.send(request, &context).await?;
        Ok(())
    }

    // ── Tag operations ──────────────────────────────

    /// List tags, up to `limit` items.
    pub async fn get_tags(&self, limit: usize) -> Result<Vec<TagData>> {
        self.fetch_pages(
            "/tags",
            &[("fields", "id,title,created_time,updated_time")],
            limit,
            "get tags",
        )
        .await
    }

    /// Fetch a tag by id.
    pub async fn get_tag(&self, tag_id: &str) -> Result<TagData> {
        let context = format!("tag {}", tag_id);
        let request = self.get(&format!("/tags/{}", tag_id)).query(&[(
            "fields",
            "id,title,created_time,updated_time",
        )]);
        let response = self.send(request, &context).await?;
        self.read_json(response, &context).await
    }

    /// Create a tag; returns the assigned id.
    pub async fn create_tag(&self, title: &str) -> Result<String> {
        let context = format!("create tag '{}'", title);
        let mut payload = Map::new();
        payload.insert("title".to_string(), JsonValue::String(title.to_string()));
        let request = self.post("/tags").json(&payload);
        let response = self.send(request, &context).await?;
        let created: IdResponse = self.read_json(response, &context).await?;
        Ok(created.id)
    }

    /// Attach a tag to a note.
    pub async fn add_tag_to_note(&self, tag_id: &str, note_id: &str) -> Result<()> {
        let context = format!("add tag {} to note {}", tag_id, note_id);
        let mut payload = Map::new();
        payload.insert("id".to_string(), JsonValue::String(note_id.to_string()));
        let request = self.post(&format!("/tags/{}/notes", tag_id)).json(&payload);
        self.send(request, &context).await?;
        Ok(())
    }

    /// Detach a tag from a note. The tag itself is never deleted.
    pub async fn remove_tag_from_note(&self, tag_id: &str, note_id: &str) -> Result<()> {
        let context = format!("remove tag {} from note {}", tag_id, note_id);
        let request = self.delete(&format!("/tags/{}/notes/{}", tag_id, note_id));
        self.send(request, &context).await?;
        Ok(())
    }
}

/// Map a non-success status to a domain error kind.
///
/// Total: anything unrecognized falls through to `Api` with the response
/// body preserved as detail.
fn classify_status(status: StatusCode, body: &str, context: &str) -> JoplinError {
    let detail = Some(format!("HTTP {} for {}: {}", status.as_u16(), context, body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => JoplinError::Auth {
            message: "authentication failed. Check your JOPLIN_API_TOKEN".to_string(),
            detail,
        },
        StatusCode::NOT_FOUND => JoplinError::NotFound {
            message: format!("resource not found: {}", context),
            detail,
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => JoplinError::Validation {
            message: format!("Joplin rejected the request: {}", context),
            detail,
        },
        _ => JoplinError::Api {
            message: format!("Joplin API error: {}", context),
            detail,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_statuses() {
        for code in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = classify_status(code, "invalid token", "get notebooks");
            assert!(matches!(err, JoplinError::Auth { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_classify_not_found_keeps_id() {
        let err = classify_status(StatusCode::NOT_FOUND, "", "notebook missing");
        match err {
            JoplinError::NotFound { message, detail } => {
                assert!(message.contains("notebook missing"));
                assert!(detail.unwrap().contains("notebook missing"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_validation() {
        let err = classify_status(StatusCode::BAD_REQUEST, "bad parent_id", "create notebook");
        assert!(matches!(err, JoplinError::Validation { .. }));
    }

    #[test]
    fn test_unrecognized_status_falls_through_to_api() {
        let err = classify_status(StatusCode::BAD_GATEWAY, "proxy error", "search '*'");
        match err {
            JoplinError::Api { detail, .. } => {
                assert!(detail.unwrap().contains("proxy error"));
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }
}
