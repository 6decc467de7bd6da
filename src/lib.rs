//! # reelvault: Video transfer and catalog infrastructure
//!
//! `reelvault` moves video files into S3-compatible object storage and
//! catalogs what is already there. It picks a transfer strategy by
//! size, splits large files into parts uploaded concurrently,
//! reassembles them in order, reports progress, and unwinds cleanly on
//! failure.
//!
//! ## Key Features
//!
//! - **Size-routed transfers**: files up to the 5 MiB threshold ship in
//!   one request; anything larger goes through a multipart session
//! - **Bounded concurrent parts**: chunks upload through a fixed-size
//!   fan-out, joined on a full barrier and completed in part order
//! - **Progress reporting**: a serialized per-part aggregator drives an
//!   optional caller callback with clamped percentages
//! - **Clean unwind**: a failed session is aborted best-effort and the
//!   causal error is the one the caller sees
//! - **Catalog listing**: prefix listing with time-limited signed read
//!   URLs for display and download
//! - **Storage agnostic**: the engine works against store traits; an
//!   S3-compatible client is included
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reelvault::prelude::*;
//! use reelvault::{Bytes, S3Config, S3CompatibleStore};
//!
//! # #[tokio::main]
//! # async fn main() -> TransferResult<()> {
//! // 1. Build a store client once and hand it to the vault
//! let store = S3CompatibleStore::new(S3Config::new("my-bucket", "us-east-1")).await?;
//! let vault = VideoVault::new(store, VaultConfig::default());
//!
//! // 2. Upload a video, watching progress
//! let content = Bytes::from_static(b"...video bytes...");
//! let upload = VideoUpload::new(content, "clip.mp4").with_content_type("video/mp4");
//! let url = vault
//!     .upload(upload, Some(std::sync::Arc::new(|pct| println!("{pct:.0}%"))))
//!     .await?;
//!
//! // 3. Browse what is stored
//! for video in vault.list_videos().await? {
//!     println!("{} -> {}", video.file_name, video.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Your App      │  ← UI, forms, metadata
//! ├─────────────────┤
//! │   VideoVault    │  ← routing, orchestration, catalog
//! ├─────────────────┤
//! │   VideoStore    │  ← storage primitives (S3, in-memory, ...)
//! └─────────────────┘
//! ```

mod adapter;
mod catalog;
mod config;
mod engine;
mod error;
pub mod parts;
mod progress;
mod s3_store;
pub mod store;
mod types;

// Re-export main types for clean API
pub use adapter::VideoVault;
pub use config::{VaultConfig, DEFAULT_CHUNK_SIZE};
pub use engine::{MultipartEngine, SessionState, UploadSession};
pub use error::{TransferError, TransferResult};
pub use parts::{PartSpan, TransferStrategy};
pub use progress::{ProgressFn, ProgressTracker};
pub use s3_store::{S3CompatibleStore, S3Config};
pub use store::{MultipartStore, ObjectInfo, ObjectStore, SignedUrlStore, VideoStore};
pub use types::{PartResult, SessionId, TransferId, VideoEntry, VideoUpload};

pub use bytes::Bytes;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ProgressFn, TransferError, TransferResult, VaultConfig, VideoEntry, VideoStore, VideoUpload,
        VideoVault,
    };
}
