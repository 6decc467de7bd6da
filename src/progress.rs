//! Progress aggregation for multipart transfers.

use std::sync::Arc;
use tokio::sync::Mutex;

/// Caller-supplied callback receiving cumulative percentages in [0, 100]
pub type ProgressFn = Arc<dyn Fn(f64) + Send + Sync>;

/// Accumulates bytes confirmed uploaded and drives the caller's
/// progress callback.
///
/// Updates arrive from concurrent part completions; the counter
/// update and the callback invocation happen under one lock so
/// observers never see percentages go backwards. Granularity is one
/// whole part - callers should not expect smooth per-byte updates.
pub struct ProgressTracker {
    total_bytes: u64,
    bytes_confirmed: Mutex<u64>,
    callback: Option<ProgressFn>,
}

impl ProgressTracker {
    /// Create a tracker for a transfer of `total_bytes`
    pub fn new(total_bytes: u64, callback: Option<ProgressFn>) -> Self {
        Self {
            total_bytes,
            bytes_confirmed: Mutex::new(0),
            callback,
        }
    }

    /// Record `byte_length` more bytes as confirmed and report the new
    /// percentage. Aggregation happens even with no callback attached.
    pub async fn confirm(&self, byte_length: u64) {
        let mut confirmed = self.bytes_confirmed.lock().await;
        *confirmed += byte_length;

        if let Some(callback) = &self.callback {
            callback(Self::percentage(*confirmed, self.total_bytes));
        }
    }

    /// Bytes confirmed so far
    pub async fn bytes_confirmed(&self) -> u64 {
        *self.bytes_confirmed.lock().await
    }

    fn percentage(confirmed: u64, total: u64) -> f64 {
        if total == 0 {
            return 100.0;
        }
        (confirmed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn recording_callback() -> (ProgressFn, Arc<StdMutex<Vec<f64>>>) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: ProgressFn = Arc::new(move |pct| {
            sink.lock().expect("progress sink poisoned").push(pct);
        });
        (callback, seen)
    }

    #[tokio::test]
    async fn reports_non_decreasing_percentages() {
        let (callback, seen) = recording_callback();
        let tracker = ProgressTracker::new(100, Some(callback));

        tracker.confirm(25).await;
        tracker.confirm(25).await;
        tracker.confirm(50).await;

        let seen = seen.lock().expect("progress sink poisoned").clone();
        assert_eq!(seen, vec![25.0, 50.0, 100.0]);
    }

    #[tokio::test]
    async fn reaches_one_hundred_only_at_the_end() {
        let (callback, seen) = recording_callback();
        let tracker = ProgressTracker::new(300, Some(callback));

        tracker.confirm(100).await;
        tracker.confirm(100).await;
        {
            let seen = seen.lock().expect("progress sink poisoned");
            assert!(seen.iter().all(|pct| *pct < 100.0));
        }

        tracker.confirm(100).await;
        let seen = seen.lock().expect("progress sink poisoned");
        assert_eq!(*seen.last().expect("no progress reported"), 100.0);
    }

    #[tokio::test]
    async fn clamps_overshoot_to_one_hundred() {
        let (callback, seen) = recording_callback();
        let tracker = ProgressTracker::new(10, Some(callback));

        tracker.confirm(25).await;

        let seen = seen.lock().expect("progress sink poisoned").clone();
        assert_eq!(seen, vec![100.0]);
    }

    #[tokio::test]
    async fn aggregates_without_a_callback() {
        let tracker = ProgressTracker::new(100, None);
        tracker.confirm(40).await;
        tracker.confirm(20).await;
        assert_eq!(tracker.bytes_confirmed().await, 60);
    }
}
