//! Session error types.

use std::time::Duration;

use thiserror::Error;
use xbee_api::ProtocolError;

/// Errors that can occur while talking to a radio.
#[derive(Debug, Error)]
pub enum SerialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// No complete frame arrived in time.
    #[error("timed out after {0:?} waiting for a frame")]
    Timeout(Duration),

    /// The transport reached end of stream.
    #[error("transport disconnected")]
    Disconnected,

    #[error("configuration error: {0}")]
    Config(String),
}

impl SerialError {
    /// True for errors that only affect the current read; the session can
    /// keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SerialError::Protocol(_) | SerialError::Timeout(_))
    }
}

/// Result type alias for session operations.
pub type SerialResult<T> = Result<T, SerialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_errors_are_recoverable() {
        let err = SerialError::from(ProtocolError::ChecksumMismatch {
            expected: 0x10,
            actual: 0x11,
        });
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("checksum mismatch"));

        assert!(!SerialError::Disconnected.is_recoverable());
        assert!(SerialError::Timeout(Duration::from_secs(5)).is_recoverable());
    }
}
