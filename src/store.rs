use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::{PartResult, SessionId, TransferResult};

/// Core object storage operations - must be implemented by all backends
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a whole object in one request
    async fn put_object(&self, key: &str, content_type: &str, body: Bytes) -> TransferResult<()>;

    /// List all objects under a prefix
    async fn list_objects(&self, prefix: &str) -> TransferResult<Vec<ObjectInfo>>;

    /// Public location of an object
    fn object_url(&self, key: &str) -> String;
}

/// Multipart transfer protocol support
#[async_trait]
pub trait MultipartStore: ObjectStore {
    /// Open a multipart session for a destination key
    async fn initiate(&self, key: &str, content_type: &str) -> TransferResult<SessionId>;

    /// Upload one part. Returns the store's etag for the part, which
    /// may be absent even when the call itself succeeded.
    async fn upload_part(
        &self,
        key: &str,
        session: &SessionId,
        part_number: u32,
        body: Bytes,
    ) -> TransferResult<Option<String>>;

    /// Finalize a session from its parts, which must be strictly
    /// ascending and gap-free by part number. Returns the final
    /// public location.
    async fn complete(
        &self,
        key: &str,
        session: &SessionId,
        parts: &[PartResult],
    ) -> TransferResult<String>;

    /// Cancel a session and discard its parts
    async fn abort(&self, key: &str, session: &SessionId) -> TransferResult<()>;
}

/// Signed URL support
#[async_trait]
pub trait SignedUrlStore: ObjectStore {
    /// Generate a time-limited URL for reading an object
    async fn sign_get(&self, key: &str, expires_in_secs: u64) -> TransferResult<String>;
}

/// Combined store surface the transfer engine and catalog work against
pub trait VideoStore: MultipartStore + SignedUrlStore {}

impl<T: MultipartStore + SignedUrlStore> VideoStore for T {}

/// One object in a store listing
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub key: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: u64,
}
