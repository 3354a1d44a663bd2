//! Blinko note store - HTTP implementation of `NoteStore`.
//!
//! Talks to a Blinko-compatible note service. Notes are created through the
//! upsert endpoint as flash notes; the service parses `#tags` out of the
//! body itself, so only the content is sent.
//!
//! # Configuration
//!
//! ```ignore
//! let config = BlinkoConfig::new("https://notes.example.com", token)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let store = BlinkoNoteStore::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{CreatedNote, NoteStore, NoteStoreError};

/// Note type the service uses for flash notes.
const FLASH_NOTE_TYPE: i32 = 0;

/// Configuration for the Blinko note store.
#[derive(Debug, Clone)]
pub struct BlinkoConfig {
    /// Base URL of the service, without the `/api` suffix.
    pub base_url: String,
    /// Bearer token.
    api_token: Secret<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl BlinkoConfig {
    /// Creates a new configuration for the given service and token.
    pub fn new(base_url: impl Into<String>, api_token: Secret<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }
}

/// Request body for `POST /api/v1/note/upsert`.
#[derive(Debug, Serialize)]
struct UpsertNoteRequest<'a> {
    content: &'a str,
    #[serde(rename = "type")]
    note_type: i32,
}

/// Blinko API note store.
pub struct BlinkoNoteStore {
    config: BlinkoConfig,
    client: Client,
}

impl BlinkoNoteStore {
    /// Creates a store with its own HTTP client.
    pub fn new(config: BlinkoConfig) -> Result<Self, NoteStoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NoteStoreError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the upsert endpoint URL.
    fn upsert_url(&self) -> String {
        format!("{}/api/v1/note/upsert", self.config.base_url)
    }

    /// Maps non-success statuses to errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, NoteStoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(NoteStoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Pulls the note id out of an upsert response.
    ///
    /// The service has answered both `{"id": 1}` and `{"data": {"id": 1}}`.
    fn parse_note_id(body: &serde_json::Value) -> Option<i64> {
        body.get("id")
            .or_else(|| body.get("data").and_then(|d| d.get("id")))
            .and_then(|id| id.as_i64())
    }
}

#[async_trait]
impl NoteStore for BlinkoNoteStore {
    /// Posts `content` as a flash note.
    ///
    /// `tags` is only logged. Blinko parses `#tags` out of the note body,
    /// and the composed content already carries every tag.
    async fn create(&self, content: &str, tags: &[String]) -> Result<CreatedNote, NoteStoreError> {
        let request = UpsertNoteRequest {
            content,
            note_type: FLASH_NOTE_TYPE,
        };

        tracing::debug!(
            url = %self.upsert_url(),
            chars = content.chars().count(),
            tags = tags.len(),
            "Creating flash note"
        );

        let response = self
            .client
            .post(self.upsert_url())
            .header("Authorization", format!("Bearer {}", self.config.api_token()))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NoteStoreError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    NoteStoreError::network(format!("Connection failed: {}", e))
                } else {
                    NoteStoreError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        // An unparseable body still means the note was stored.
        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        Ok(CreatedNote {
            id: Self::parse_note_id(&body),
        })
    }
}
