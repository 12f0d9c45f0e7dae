//! The 16-bit big-endian frame length field.

use crate::constants::*;
use crate::error::*;

/// Number of payload bytes in a frame, split into MSB and LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameLength {
    /// High byte.
    pub msb: u8,
    /// Low byte.
    pub lsb: u8,
}

impl FrameLength {
    /// Length of an unescaped payload. Payloads over 65535 bytes are rejected.
    pub fn from_payload(payload: &[u8]) -> ProtocolResult<Self> {
        let len = u16::try_from(payload.len()).map_err(|_| ProtocolError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD_SIZE,
        })?;
        Ok(FrameLength::from(len))
    }

    /// Read the length bytes at offsets 1 and 2 of an unescaped frame.
    pub fn from_raw_frame(frame: &[u8]) -> ProtocolResult<Self> {
        if frame.len() <= LENGTH_LSB_OFFSET {
            return Err(ProtocolError::too_short(LENGTH_LSB_OFFSET + 1, frame.len()));
        }
        Ok(FrameLength {
            msb: frame[LENGTH_MSB_OFFSET],
            lsb: frame[LENGTH_LSB_OFFSET],
        })
    }

    /// Payload length as a number.
    pub fn value(&self) -> u16 {
        u16::from_be_bytes([self.msb, self.lsb])
    }

    /// Total unescaped frame size this length implies.
    pub fn frame_size(&self) -> usize {
        usize::from(self.value()) + FRAME_OVERHEAD
    }

    /// Big-endian wire bytes.
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.msb, self.lsb]
    }
}

impl From<u16> for FrameLength {
    fn from(len: u16) -> Self {
        let [msb, lsb] = len.to_be_bytes();
        FrameLength { msb, lsb }
    }
}
