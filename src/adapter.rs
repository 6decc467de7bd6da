use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    catalog, parts, MultipartEngine, ProgressFn, ProgressTracker, TransferError, TransferId,
    TransferResult, TransferStrategy, VaultConfig, VideoEntry, VideoStore, VideoUpload,
};

/// The main entry point: size-routed video transfer plus catalog
/// listing over an explicit store handle.
///
/// The store client is constructed once and passed in; the vault holds
/// no process-wide state. A second client can be attached for the
/// catalog side, which lets transfers ride an accelerated endpoint
/// while listing and signing stay on the standard one.
pub struct VideoVault {
    transfer: Arc<dyn VideoStore>,
    catalog: Arc<dyn VideoStore>,
    engine: MultipartEngine,
    config: VaultConfig,
}

impl VideoVault {
    /// Create a vault using one store for transfers and the catalog
    pub fn new<S: VideoStore + 'static>(store: S, config: VaultConfig) -> Self {
        let store: Arc<dyn VideoStore> = Arc::new(store);
        Self {
            transfer: store.clone(),
            catalog: store.clone(),
            engine: MultipartEngine::new(store, config.clone()),
            config,
        }
    }

    /// Use a separate store client for listing and signing
    pub fn with_catalog_store<S: VideoStore + 'static>(mut self, store: S) -> Self {
        self.catalog = Arc::new(store);
        self
    }

    /// Transfer a video into the store and return its public URL.
    ///
    /// Files at or below the multipart threshold ship in a single
    /// request; larger files are split into chunks uploaded
    /// concurrently and reassembled in part order. `on_progress`
    /// receives cumulative percentages as parts are confirmed - the
    /// single-shot path completes without intermediate reports.
    ///
    /// There is no retry at any level: the first fatal error from the
    /// store is the one returned, and a failed multipart session is
    /// aborted best-effort.
    #[instrument(
        skip(self, upload, on_progress),
        fields(
            transfer_id = %TransferId::new(),
            name = %upload.destination_name,
            bytes = upload.content.len()
        )
    )]
    pub async fn upload(
        &self,
        upload: VideoUpload,
        on_progress: Option<ProgressFn>,
    ) -> TransferResult<String> {
        if upload.destination_name.is_empty() {
            return Err(TransferError::invalid("destination name must not be empty"));
        }
        if self.config.chunk_size == 0 {
            return Err(TransferError::invalid("chunk size must be non-zero"));
        }

        let key = format!("{}{}", self.config.publish_prefix, upload.destination_name);
        let total_size = upload.content.len() as u64;

        match parts::route(total_size, self.config.multipart_threshold) {
            TransferStrategy::SingleShot => {
                info!(key = %key, "uploading in a single request");
                self.transfer
                    .put_object(&key, &upload.content_type, upload.content)
                    .await?;
                Ok(self.transfer.object_url(&key))
            }
            TransferStrategy::Multipart => {
                let progress = ProgressTracker::new(total_size, on_progress);
                self.engine
                    .run(&key, &upload.content_type, upload.content, &progress)
                    .await
            }
        }
    }

    /// List stored videos with time-limited signed read URLs
    pub async fn list_videos(&self) -> TransferResult<Vec<VideoEntry>> {
        catalog::list_videos(&self.catalog, &self.config).await
    }

    /// Get configuration
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }
}
