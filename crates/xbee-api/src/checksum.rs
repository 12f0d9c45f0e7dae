//! Additive frame checksum.
//!
//! The checksum is `0xFF` minus the low byte of the sum of all payload
//! bytes. A frame is valid when the low byte of `sum(payload) + checksum`
//! equals `0xFF`.

use crate::constants::*;
use crate::error::*;

/// Compute the checksum byte for an unescaped payload.
pub fn compute(payload: &[u8]) -> u8 {
    CHECKSUM_TARGET - low_byte_sum(payload)
}

/// Validate an unescaped, length-complete frame.
///
/// Sums everything from the first payload byte through the trailing
/// checksum byte, so the delimiter and length bytes are excluded.
pub fn validate(frame: &[u8]) -> bool {
    if frame.len() < MIN_FRAME_SIZE {
        return false;
    }
    low_byte_sum(&frame[PAYLOAD_OFFSET..]) == CHECKSUM_TARGET
}

/// Like [`validate`], but reports the expected and received checksum.
pub fn verify(frame: &[u8]) -> ProtocolResult<()> {
    if frame.len() < MIN_FRAME_SIZE {
        return Err(ProtocolError::too_short(MIN_FRAME_SIZE, frame.len()));
    }
    if validate(frame) {
        return Ok(());
    }
    let payload = &frame[PAYLOAD_OFFSET..frame.len() - 1];
    Err(ProtocolError::ChecksumMismatch {
        expected: compute(payload),
        actual: frame[frame.len() - 1],
    })
}

fn low_byte_sum(bytes: &[u8]) -> u8 {
    let sum: u64 = bytes.iter().map(|&b| u64::from(b)).sum();
    (sum & 0xFF) as u8
}
