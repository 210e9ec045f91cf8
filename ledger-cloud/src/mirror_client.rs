//! HTTP client for the remote document store.
//!
//! All three operations treat the document as one opaque artifact: find or
//! create it by canonical name, download its entire content, or overwrite
//! its entire content. There is no per-record addressing on the remote side.

use crate::config::MirrorConfig;
use crate::error::{MirrorError, MirrorResult};
use ledger_types::Record;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Opaque identity of the remote document, resolved once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle(String);

impl FileHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Client for the single remote JSON document mirroring the local store.
pub struct MirrorClient {
    client: Client,
    config: MirrorConfig,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileMeta>,
}

#[derive(Deserialize)]
struct FileMeta {
    id: String,
}

impl MirrorClient {
    pub fn new(config: MirrorConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }

    /// Searches the application-scoped namespace for the canonical document
    /// and returns its handle, creating an empty document when none exists.
    /// First match wins when more than one is present.
    ///
    /// Idempotent in effect, but find-then-create is not atomic: concurrent
    /// first-time callers (e.g. simultaneous first sign-ins on two devices)
    /// can each create a document. Callers cache the resolved handle for the
    /// session lifetime instead of re-resolving.
    pub async fn resolve_handle(&self, token: &str) -> MirrorResult<FileHandle> {
        let url = format!("{}/files", self.config.api_base_url);
        let query = format!("name='{}' and trashed=false", self.config.file_name);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("spaces", "appDataFolder"),
                ("fields", "files(id, name)"),
            ])
            .send()
            .await?;
        let resp = check_status(resp, "file lookup")?;

        let list: FileList = resp
            .json()
            .await
            .map_err(|e| MirrorError::Format(format!("file list response: {e}")))?;

        if let Some(existing) = list.files.into_iter().next() {
            debug!("resolved existing remote document {}", existing.id);
            return Ok(FileHandle(existing.id));
        }

        self.create_document(token).await
    }

    /// Creates a new empty document in the application data folder.
    async fn create_document(&self, token: &str) -> MirrorResult<FileHandle> {
        let url = format!("{}/files", self.config.api_base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[("fields", "id")])
            .json(&serde_json::json!({
                "name": self.config.file_name,
                "parents": ["appDataFolder"],
            }))
            .send()
            .await?;
        let resp = check_status(resp, "file creation")?;

        let meta: FileMeta = resp
            .json()
            .await
            .map_err(|e| MirrorError::Format(format!("file creation response: {e}")))?;

        debug!("created remote document {}", meta.id);
        Ok(FileHandle(meta.id))
    }

    /// Downloads and parses the full document content.
    ///
    /// An empty or absent body is a valid "no data yet" result; content that
    /// is present but unparseable is a [`MirrorError::Format`].
    pub async fn pull(&self, token: &str, handle: &FileHandle) -> MirrorResult<Vec<Record>> {
        let url = format!("{}/files/{}", self.config.api_base_url, handle.as_str());
        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("alt", "media")])
            .send()
            .await?;
        let resp = check_status(resp, "document download")?;

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<Record> = serde_json::from_str(&body)
            .map_err(|e| MirrorError::Format(format!("document content: {e}")))?;
        debug!("pulled {} records from remote document", records.len());
        Ok(records)
    }

    /// Serializes the full record sequence and overwrites the document's
    /// entire content. The remote side's atomicity is relied upon — on
    /// transport failure the prior content is presumed to remain.
    pub async fn push(
        &self,
        token: &str,
        handle: &FileHandle,
        records: &[Record],
    ) -> MirrorResult<()> {
        // Pretty-printed so the remote document stays human-inspectable.
        let body = serde_json::to_string_pretty(records)?;

        let url = format!(
            "{}/files/{}",
            self.config.upload_base_url,
            handle.as_str()
        );
        let resp = self
            .client
            .patch(&url)
            .bearer_auth(token)
            .query(&[("uploadType", "media")])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        check_status(resp, "document upload")?;

        debug!("pushed {} records to remote document", records.len());
        Ok(())
    }
}

fn check_status(resp: Response, context: &str) -> MirrorResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(MirrorError::AuthFailed(format!("{status} during {context}")))
    } else {
        Err(MirrorError::RemoteUnavailable(format!(
            "{status} during {context}"
        )))
    }
}
