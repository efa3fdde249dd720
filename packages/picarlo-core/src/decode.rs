use crate::error::{PiError, Result};
use crate::types::{Point, StreamResult};

/// Size of one raw sample: two little-endian u64 words (x-bits, y-bits).
pub const RECORD_BYTES: usize = 16;

/// Low bits discarded when reducing a u64 to a 53-bit double mantissa.
const MANTISSA_SHIFT: u32 = 11;

/// 2^53 as a double; exact.
const MANTISSA_SCALE: f64 = (1u64 << 53) as f64;

/// Map a raw 64-bit word onto `[0, 1)` with full double precision.
///
/// The low 11 bits are discarded first so the remaining 53-bit magnitude fits
/// a double mantissa exactly; a naive `bits as f64 / 2^64` would round and can
/// produce 1.0 for large inputs.
#[inline]
pub fn normalize_u64(bits: u64) -> f64 {
    (bits >> MANTISSA_SHIFT) as f64 / MANTISSA_SCALE
}

/// Decode a complete point-stream response body.
///
/// The buffer is consumed in 16-byte strides, two LE u64 reads per stride.
/// Decoding is deterministic and order-preserving: the output sequence matches
/// buffer order.
///
/// A buffer whose length is not a multiple of 16 is rejected with
/// [`PiError::MalformedStream`] rather than silently dropping the trailing
/// partial record.
pub fn decode(buffer: &[u8]) -> Result<StreamResult> {
    if buffer.len() % RECORD_BYTES != 0 {
        return Err(PiError::MalformedStream(format!(
            "{} bytes is not a multiple of {}",
            buffer.len(),
            RECORD_BYTES
        )));
    }

    let count = buffer.len() / RECORD_BYTES;
    let mut points = Vec::with_capacity(count);
    let mut inside_count = 0u64;

    for record in buffer.chunks_exact(RECORD_BYTES) {
        let x = normalize_u64(read_le_u64(&record[..8]));
        let y = normalize_u64(read_le_u64(&record[8..]));
        let point = Point::classify(x, y);
        if point.inside {
            inside_count += 1;
        }
        points.push(point);
    }

    log::debug!("Decoded {} points ({} inside)", count, inside_count);

    Ok(StreamResult {
        inside_count,
        total: points.len() as u64,
        points,
    })
}

#[inline]
fn read_le_u64(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    u64::from_le_bytes(word)
}
