//! Shared in-memory store for conformance tests: records every call
//! and injects failures on demand.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reelvault::store::{MultipartStore, ObjectInfo, ObjectStore, SignedUrlStore};
use reelvault::{Bytes, PartResult, SessionId, TransferError, TransferResult};

pub const SESSION: &str = "sess-1";

/// Everything the store was asked to do, in call order per operation
#[derive(Default)]
pub struct StoreLog {
    pub puts: Vec<(String, String, usize)>,
    pub initiates: Vec<(String, String)>,
    pub parts: Vec<(String, u32, usize)>,
    pub completions: Vec<(String, Vec<PartResult>)>,
    pub aborts: Vec<String>,
    pub signs: Vec<(String, u64)>,
}

#[derive(Default)]
pub struct MemoryStore {
    pub log: Arc<Mutex<StoreLog>>,
    pub objects: Vec<ObjectInfo>,
    pub fail_put: bool,
    pub fail_initiate: bool,
    pub fail_parts: HashSet<u32>,
    pub missing_tag_parts: HashSet<u32>,
    pub part_delays_ms: HashMap<u32, u64>,
    pub fail_complete: bool,
    pub fail_abort: bool,
    pub fail_list: bool,
}

impl MemoryStore {
    pub fn new() -> (Self, Arc<Mutex<StoreLog>>) {
        let store = Self::default();
        let log = store.log.clone();
        (store, log)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(&self, key: &str, content_type: &str, body: Bytes) -> TransferResult<()> {
        if self.fail_put {
            return Err(TransferError::upload("injected put failure"));
        }
        self.log.lock().expect("log poisoned").puts.push((
            key.to_string(),
            content_type.to_string(),
            body.len(),
        ));
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> TransferResult<Vec<ObjectInfo>> {
        if self.fail_list {
            return Err(TransferError::listing("injected list failure"));
        }
        Ok(self
            .objects
            .iter()
            .filter(|object| object.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn object_url(&self, key: &str) -> String {
        format!("https://bucket.test/{key}")
    }
}

#[async_trait]
impl MultipartStore for MemoryStore {
    async fn initiate(&self, key: &str, content_type: &str) -> TransferResult<SessionId> {
        if self.fail_initiate {
            return Err(TransferError::upload("injected initiate failure"));
        }
        self.log
            .lock()
            .expect("log poisoned")
            .initiates
            .push((key.to_string(), content_type.to_string()));
        Ok(SessionId::from_string(SESSION.to_string()))
    }

    async fn upload_part(
        &self,
        _key: &str,
        session: &SessionId,
        part_number: u32,
        body: Bytes,
    ) -> TransferResult<Option<String>> {
        if let Some(delay) = self.part_delays_ms.get(&part_number) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        if self.fail_parts.contains(&part_number) {
            return Err(TransferError::part_upload(
                part_number,
                "injected part failure",
            ));
        }
        self.log.lock().expect("log poisoned").parts.push((
            session.as_str().to_string(),
            part_number,
            body.len(),
        ));
        if self.missing_tag_parts.contains(&part_number) {
            return Ok(None);
        }
        Ok(Some(format!("etag-{part_number}")))
    }

    async fn complete(
        &self,
        key: &str,
        session: &SessionId,
        parts: &[PartResult],
    ) -> TransferResult<String> {
        if self.fail_complete {
            return Err(TransferError::completion("injected completion failure"));
        }
        self.log
            .lock()
            .expect("log poisoned")
            .completions
            .push((session.as_str().to_string(), parts.to_vec()));
        Ok(format!("https://bucket.test/completed/{key}"))
    }

    async fn abort(&self, _key: &str, session: &SessionId) -> TransferResult<()> {
        self.log
            .lock()
            .expect("log poisoned")
            .aborts
            .push(session.as_str().to_string());
        if self.fail_abort {
            return Err(TransferError::abort("injected abort failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl SignedUrlStore for MemoryStore {
    async fn sign_get(&self, key: &str, expires_in_secs: u64) -> TransferResult<String> {
        self.log
            .lock()
            .expect("log poisoned")
            .signs
            .push((key.to_string(), expires_in_secs));
        Ok(format!("https://signed.test/{key}?expires={expires_in_secs}"))
    }
}

/// Deterministic test content
pub fn content_of(len: usize) -> Bytes {
    Bytes::from(vec![7u8; len])
}

/// A catalog object as the store would list it
pub fn object(key: &str, size: u64) -> ObjectInfo {
    ObjectInfo {
        key: key.to_string(),
        last_modified: chrono::DateTime::from_timestamp(1_700_000_000, 0),
        size,
    }
}
