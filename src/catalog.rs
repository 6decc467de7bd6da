//! Prefix listing and signed URL issuance for stored videos.

use std::sync::Arc;

use futures::future;
use tracing::{debug, instrument};

use crate::{TransferResult, VaultConfig, VideoEntry, VideoStore};

/// List every video under the catalog prefix, minting a time-limited
/// signed read URL per object. The prefix's own directory-marker
/// object is not a video and is dropped. Returns an empty Vec when
/// nothing is stored.
#[instrument(skip(store, config), fields(prefix = %config.catalog_prefix))]
pub async fn list_videos(
    store: &Arc<dyn VideoStore>,
    config: &VaultConfig,
) -> TransferResult<Vec<VideoEntry>> {
    let objects = store.list_objects(&config.catalog_prefix).await?;

    let entries = future::try_join_all(
        objects
            .into_iter()
            .filter(|object| object.key != config.catalog_prefix)
            .map(|object| {
                let store = Arc::clone(store);
                let ttl = config.signed_url_ttl_secs;
                async move {
                    let url = store.sign_get(&object.key, ttl).await?;
                    Ok(VideoEntry {
                        file_name: file_name_for_key(&object.key),
                        id: object.key,
                        created_at: object.last_modified,
                        url,
                        size: object.size,
                    })
                }
            }),
    )
    .await?;

    debug!(count = entries.len(), "listed videos");
    Ok(entries)
}

/// Final path segment of a key, or "Untitled" when there is none
fn file_name_for_key(key: &str) -> String {
    match key.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Untitled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_file_name_from_key() {
        assert_eq!(file_name_for_key("videos/clip.mp4"), "clip.mp4");
        assert_eq!(file_name_for_key("videos/a/b/clip.webm"), "clip.webm");
        assert_eq!(file_name_for_key("clip.mov"), "clip.mov");
    }

    #[test]
    fn falls_back_to_untitled_without_a_basename() {
        assert_eq!(file_name_for_key("videos/"), "Untitled");
        assert_eq!(file_name_for_key(""), "Untitled");
    }
}
