//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when encoding or decoding API frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame or payload is too short to be valid.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Payload does not fit in the 16-bit length field.
    #[error("payload too large: maximum {max} bytes, got {size}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// First byte of a frame was not the start delimiter.
    #[error("invalid start delimiter: 0x{0:02X}")]
    InvalidStartDelimiter(u8),

    /// Declared length disagrees with the bytes present.
    #[error("length mismatch: header declares {declared} payload bytes, frame carries {actual}")]
    LengthMismatch {
        /// Length from the header.
        declared: usize,
        /// Payload bytes actually present.
        actual: usize,
    },

    /// Checksum does not validate.
    #[error("checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch {
        /// Checksum computed over the payload.
        expected: u8,
        /// Checksum byte carried by the frame.
        actual: u8,
    },

    /// Frame type byte is not one of the supported API frames.
    #[error("unknown frame type: 0x{0:02X}")]
    UnknownFrameType(u8),

    /// A frame of another type arrived where a specific one was required.
    #[error("unexpected frame type: expected 0x{expected:02X}, got 0x{actual:02X}")]
    UnexpectedFrameType {
        /// Frame type that was requested.
        expected: u8,
        /// Frame type that was received.
        actual: u8,
    },

    /// AT command mnemonic is not in the catalog.
    #[error("unknown AT command: {0:?}")]
    UnknownCommand(String),
}

impl ProtocolError {
    /// Create a too-short error for a slice of `actual` bytes.
    pub fn too_short(expected: usize, actual: usize) -> Self {
        ProtocolError::FrameTooShort { expected, actual }
    }
}

/// Result type alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::ChecksumMismatch {
            expected: 0x59,
            actual: 0x58,
        };
        assert_eq!(err.to_string(), "checksum mismatch: expected 0x59, got 0x58");

        let err = ProtocolError::UnknownCommand("NIX".to_string());
        assert_eq!(err.to_string(), "unknown AT command: \"NIX\"");
    }
}
