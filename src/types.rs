use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-issued identifier for a multipart upload session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Create from the identifier returned by the store
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation identifier for a single transfer invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(pub String);

impl TransferId {
    /// Generate a new random transfer ID
    pub fn new() -> Self {
        Self(format!("xfer_{}", Uuid::new_v4().simple()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one successfully uploaded part.
///
/// Part numbers are unique and contiguous starting at 1; exactly
/// `ceil(total_size / chunk_size)` of them exist before completion is
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartResult {
    pub part_number: u32,
    pub etag: String,
    pub byte_length: u64,
}

/// A video visible in the catalog, derived read-only from the store
/// listing. `url` is a time-limited signed read URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoEntry {
    pub id: String,
    pub file_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub url: String,
    pub size: u64,
}

/// Request to transfer a video into the store
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub content: Bytes,
    pub destination_name: String,
    pub content_type: String,
}

impl VideoUpload {
    /// Create a new upload request with the default content type
    pub fn new<S: Into<String>>(content: Bytes, destination_name: S) -> Self {
        Self {
            content,
            destination_name: destination_name.into(),
            content_type: "application/octet-stream".to_string(),
        }
    }

    /// Set the declared content type
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = content_type.into();
        self
    }
}
