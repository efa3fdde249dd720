//! Random sample production.

use bytes::Bytes;
use rand::RngCore;
use tokio::sync::mpsc;

/// One sample: two little-endian u64 words (x-bits, y-bits).
pub const RECORD_BYTES: usize = 16;

/// Samples emitted per body chunk.
pub const POINTS_PER_CHUNK: usize = 4096;

/// Produce `count` samples in chunks, pushing each chunk into `tx`.
///
/// Runs on a blocking thread; stops early if the receiver is dropped
/// (client disconnected mid-stream).
pub fn produce_points(count: u64, tx: mpsc::UnboundedSender<Bytes>) {
    let mut rng = rand::rng();
    let mut remaining = count;

    while remaining > 0 {
        let chunk_points = remaining.min(POINTS_PER_CHUNK as u64) as usize;
        let mut chunk = Vec::with_capacity(chunk_points * RECORD_BYTES);

        for _ in 0..chunk_points {
            chunk.extend_from_slice(&rng.next_u64().to_le_bytes());
            chunk.extend_from_slice(&rng.next_u64().to_le_bytes());
        }

        if tx.send(Bytes::from(chunk)).is_err() {
            tracing::debug!("point stream receiver dropped, stopping producer");
            return;
        }

        remaining -= chunk_points as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(count: u64) -> Vec<u8> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        produce_points(count, tx);
        let mut body = Vec::new();
        while let Ok(chunk) = rx.try_recv() {
            body.extend_from_slice(&chunk);
        }
        body
    }

    #[test]
    fn test_exact_body_length() {
        assert_eq!(collect(1).len(), RECORD_BYTES);
        assert_eq!(collect(100).len(), 100 * RECORD_BYTES);
    }

    #[test]
    fn test_chunked_above_chunk_size() {
        let count = POINTS_PER_CHUNK as u64 + 10;
        let (tx, mut rx) = mpsc::unbounded_channel();
        produce_points(count, tx);

        let mut chunks = Vec::new();
        while let Ok(chunk) = rx.try_recv() {
            chunks.push(chunk);
        }
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), POINTS_PER_CHUNK * RECORD_BYTES);
        assert_eq!(chunks[1].len(), 10 * RECORD_BYTES);
    }

    #[test]
    fn test_dropped_receiver_stops_production() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        // Must return instead of spinning
        produce_points(u64::MAX, tx);
    }
}
