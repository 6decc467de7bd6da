//! Multipart transfer orchestration.

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::{
    parts, PartResult, ProgressTracker, SessionId, TransferError, TransferResult, VaultConfig,
    VideoStore,
};

/// Lifecycle of one multipart session. A session either finishes at
/// `Completed` or unwinds through `Aborting`; every terminal state is
/// final for that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initiated,
    PartsInFlight,
    Completing,
    Completed,
    Aborting,
    Aborted,
    AbortFailed,
}

/// In-memory state of one multipart transfer, owned exclusively by the
/// engine for the session's lifetime. Nothing is persisted: on
/// completion or abort the session is simply dropped.
#[derive(Debug)]
pub struct UploadSession {
    pub session_id: SessionId,
    pub destination_key: String,
    pub content_type: String,
    pub total_size: u64,
    pub chunk_size: u64,
    pub parts: Vec<PartResult>,
    pub state: SessionState,
}

/// Drives a multipart transfer: initiate, bounded concurrent part
/// fan-out, full-barrier join, then sorted completion - or best-effort
/// abort when anything fails.
pub struct MultipartEngine {
    store: Arc<dyn VideoStore>,
    config: VaultConfig,
}

impl MultipartEngine {
    pub fn new(store: Arc<dyn VideoStore>, config: VaultConfig) -> Self {
        Self { store, config }
    }

    /// Transfer `content` to `destination_key` as a multipart session
    /// and return the final public location.
    #[instrument(skip(self, content, progress), fields(key = destination_key, bytes = content.len()))]
    pub async fn run(
        &self,
        destination_key: &str,
        content_type: &str,
        content: Bytes,
        progress: &ProgressTracker,
    ) -> TransferResult<String> {
        let total_size = content.len() as u64;
        let spans = parts::plan(total_size, self.config.chunk_size);

        if spans.is_empty() {
            return Err(TransferError::invalid(
                "multipart transfer requires a non-empty body and chunk size",
            ));
        }
        if spans.len() > self.config.max_parts as usize {
            return Err(TransferError::invalid(format!(
                "transfer would need {} parts (max {})",
                spans.len(),
                self.config.max_parts
            )));
        }

        // Initiate failure is terminal: no session exists yet, so there
        // is nothing to abort.
        let session_id = self.store.initiate(destination_key, content_type).await?;

        let mut session = UploadSession {
            session_id,
            destination_key: destination_key.to_string(),
            content_type: content_type.to_string(),
            total_size,
            chunk_size: self.config.chunk_size,
            parts: Vec::with_capacity(spans.len()),
            state: SessionState::Initiated,
        };

        info!(
            session = %session.session_id,
            parts = spans.len(),
            chunk_size = session.chunk_size,
            content_type = %session.content_type,
            "initiated multipart upload"
        );

        session.state = SessionState::PartsInFlight;
        let limit = self.config.max_concurrent_parts.max(1);
        let key = session.destination_key.clone();
        let session_id = session.session_id.clone();

        // Fan out part uploads through a bounded stream, then join on
        // every part settling. The join is a full barrier: a failed
        // part never short-circuits its siblings.
        let results: Vec<TransferResult<PartResult>> = stream::iter(spans.into_iter().map(|span| {
            let body = span.slice(&content);
            let store = Arc::clone(&self.store);
            let key = key.clone();
            let session_id = session_id.clone();
            async move {
                let tag = store
                    .upload_part(&key, &session_id, span.part_number, body)
                    .await?;

                // A nominally successful call without an etag still
                // leaves the part unusable for completion.
                let etag = tag
                    .filter(|tag| !tag.is_empty())
                    .ok_or(TransferError::MissingPartTag {
                        part_number: span.part_number,
                    })?;

                progress.confirm(span.len).await;
                debug!(part = span.part_number, bytes = span.len, "part confirmed");

                Ok(PartResult {
                    part_number: span.part_number,
                    etag,
                    byte_length: span.len,
                })
            }
        }))
        .buffer_unordered(limit)
        .collect()
        .await;

        let mut completed = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(part) => completed.push(part),
                Err(error) => failures.push(error),
            }
        }

        // The causal part error propagates; the abort outcome never
        // replaces it.
        let failed = failures.len();
        if let Some(causal) =
            failures.into_iter().min_by_key(|error| error.part_number().unwrap_or(u32::MAX))
        {
            warn!(
                session = %session.session_id,
                failed,
                "part upload failed, aborting session"
            );
            self.abort_session(&mut session).await;
            return Err(causal);
        }

        // Concurrent completion order is arbitrary; the store requires
        // strictly ascending, gap-free part numbers.
        completed.sort_by_key(|part| part.part_number);
        session.parts = completed;
        session.state = SessionState::Completing;

        match self
            .store
            .complete(&session.destination_key, &session.session_id, &session.parts)
            .await
        {
            Ok(location) => {
                session.state = SessionState::Completed;
                info!(
                    session = %session.session_id,
                    parts = session.parts.len(),
                    bytes = session.total_size,
                    "multipart upload completed"
                );
                Ok(location)
            }
            Err(error) => {
                warn!(
                    session = %session.session_id,
                    "completion rejected, aborting session"
                );
                self.abort_session(&mut session).await;
                Err(error)
            }
        }
    }

    /// Best-effort session teardown. An abort failure is logged and
    /// recorded on the session, never returned.
    async fn abort_session(&self, session: &mut UploadSession) {
        session.state = SessionState::Aborting;
        match self
            .store
            .abort(&session.destination_key, &session.session_id)
            .await
        {
            Ok(()) => {
                session.state = SessionState::Aborted;
                info!(session = %session.session_id, "multipart session aborted");
            }
            Err(error) => {
                session.state = SessionState::AbortFailed;
                warn!(
                    session = %session.session_id,
                    error = %error,
                    "failed to abort multipart session"
                );
            }
        }
    }
}
