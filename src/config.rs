/// Standard chunk size for multipart transfers (5 MiB)
pub const DEFAULT_CHUNK_SIZE: u64 = 5 * 1024 * 1024;

/// Configuration for transfer and catalog operations
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Size of each multipart chunk (bytes). Every part except the
    /// final one has exactly this length.
    pub chunk_size: u64,

    /// Files at or below this size take the single-shot path; strictly
    /// larger files go multipart.
    pub multipart_threshold: u64,

    /// Upper bound on part uploads in flight at once
    pub max_concurrent_parts: usize,

    /// Upper bound on total parts to protect memory/state
    pub max_parts: u32,

    /// Key prefix new videos are published under
    pub publish_prefix: String,

    /// Key prefix the catalog listing reads from. Kept distinct from
    /// `publish_prefix`; see DESIGN.md.
    pub catalog_prefix: String,

    /// Lifetime of signed read URLs issued by the catalog
    pub signed_url_ttl_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            multipart_threshold: DEFAULT_CHUNK_SIZE,
            max_concurrent_parts: 8,
            max_parts: 10_000,
            publish_prefix: "published-videos/".to_string(),
            catalog_prefix: "videos/".to_string(),
            signed_url_ttl_secs: 3600,
        }
    }
}

impl VaultConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = bytes;
        self
    }

    /// Set the single-shot/multipart threshold
    pub fn with_multipart_threshold(mut self, bytes: u64) -> Self {
        self.multipart_threshold = bytes;
        self
    }

    /// Set the part upload concurrency limit
    pub fn with_max_concurrent_parts(mut self, limit: usize) -> Self {
        self.max_concurrent_parts = limit;
        self
    }

    /// Set the part count ceiling
    pub fn with_max_parts(mut self, max: u32) -> Self {
        self.max_parts = max;
        self
    }

    /// Set the publish prefix
    pub fn with_publish_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.publish_prefix = prefix.into();
        self
    }

    /// Set the catalog prefix
    pub fn with_catalog_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.catalog_prefix = prefix.into();
        self
    }

    /// Set the signed URL lifetime
    pub fn with_signed_url_ttl(mut self, secs: u64) -> Self {
        self.signed_url_ttl_secs = secs;
        self
    }
}
