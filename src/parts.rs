//! Transfer routing and part planning.

use bytes::Bytes;

/// How a file should be moved into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStrategy {
    /// One request carrying the whole body
    SingleShot,
    /// Session-based transfer of concurrent parts
    Multipart,
}

/// Choose a strategy by size. The boundary is inclusive on the
/// single-shot side: a file of exactly `threshold` bytes ships in one
/// request.
pub fn route(total_size: u64, threshold: u64) -> TransferStrategy {
    if total_size <= threshold {
        TransferStrategy::SingleShot
    } else {
        TransferStrategy::Multipart
    }
}

/// One planned byte range of a multipart transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSpan {
    pub part_number: u32,
    pub offset: u64,
    pub len: u64,
}

impl PartSpan {
    /// Exclusive end offset of the span
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }

    /// Slice exactly this span's bytes out of the content. Zero-copy:
    /// the returned `Bytes` shares the source buffer.
    pub fn slice(&self, content: &Bytes) -> Bytes {
        content.slice(self.offset as usize..self.end() as usize)
    }
}

/// Plan the parts of a multipart transfer. Part `i` (1-indexed) covers
/// `[(i-1)*chunk_size, min(i*chunk_size, total_size))`; every part
/// except the last has exactly `chunk_size` bytes.
pub fn plan(total_size: u64, chunk_size: u64) -> Vec<PartSpan> {
    if total_size == 0 || chunk_size == 0 {
        return Vec::new();
    }

    let num_parts = (total_size + chunk_size - 1) / chunk_size;
    (0..num_parts)
        .map(|index| {
            let offset = index * chunk_size;
            PartSpan {
                part_number: (index + 1) as u32,
                offset,
                len: chunk_size.min(total_size - offset),
            }
        })
        .collect()
}
