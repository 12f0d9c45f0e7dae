//! Byte stuffing for escaped API mode.
//!
//! Any reserved byte (`0x7E`, `0x7D`, `0x11`, `0x13`) appearing after the
//! start delimiter is sent as `0x7D` followed by the byte XORed with `0x20`.
//!
//! ```text
//! 0x7E -> 0x7D 0x5E
//! 0x7D -> 0x7D 0x5D
//! 0x11 -> 0x7D 0x31
//! 0x13 -> 0x7D 0x33
//! ```

use crate::constants::*;

/// Returns true if `byte` must be escaped on the wire.
#[inline]
pub fn is_reserved(byte: u8) -> bool {
    RESERVED_BYTES.contains(&byte)
}

/// Escape every reserved byte in `data`.
pub fn escape(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 8);
    escape_into(data, &mut out);
    out
}

/// Escape `data`, appending the result to `out`.
pub fn escape_into(data: &[u8], out: &mut Vec<u8>) {
    for &byte in data {
        if is_reserved(byte) {
            out.push(ESCAPE);
            out.push(byte ^ ESCAPE_XOR);
        } else {
            out.push(byte);
        }
    }
}

/// Reverse [`escape`] on a complete byte sequence.
///
/// A trailing escape byte with no target is dropped.
pub fn unescape(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut unescaper = Unescaper::new();
    unescaper.feed(data, &mut out);
    out
}

/// Incremental un-escaper for a byte stream arriving in arbitrary chunks.
///
/// An escape byte at the end of a chunk is held until the next chunk
/// supplies its target, so splitting the stream never changes the output.
#[derive(Debug, Default, Clone)]
pub struct Unescaper {
    pending_escape: bool,
}

impl Unescaper {
    /// Create an un-escaper with no pending escape.
    pub fn new() -> Self {
        Unescaper {
            pending_escape: false,
        }
    }

    /// Un-escape `chunk`, appending resolved bytes to `out`.
    pub fn feed(&mut self, chunk: &[u8], out: &mut impl Extend<u8>) {
        for &byte in chunk {
            if let Some(resolved) = self.push(byte) {
                out.extend(Some(resolved));
            }
        }
    }

    /// Un-escape a single byte. Returns `None` when the byte is an escape
    /// prefix whose target has not arrived yet.
    #[inline]
    pub fn push(&mut self, byte: u8) -> Option<u8> {
        if self.pending_escape {
            self.pending_escape = false;
            Some(byte ^ ESCAPE_XOR)
        } else if byte == ESCAPE {
            self.pending_escape = true;
            None
        } else {
            Some(byte)
        }
    }

    /// True while an escape prefix is waiting for its target byte.
    pub fn is_pending(&self) -> bool {
        self.pending_escape
    }

    /// Forget any pending escape.
    pub fn reset(&mut self) {
        self.pending_escape = false;
    }
}
