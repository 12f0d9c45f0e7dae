//! Frame envelope and streaming receive.
//!
//! Every API frame is wrapped in the same envelope:
//!
//! ```text
//! +------+--------+--------+-----------------+----------+
//! | 0x7E | len_hi | len_lo | payload[0..len] | checksum |
//! +------+--------+--------+-----------------+----------+
//! ```
//!
//! Everything after the start delimiter is escaped on the wire. The length
//! counts payload bytes only, before escaping.

use bytes::{Buf, BytesMut};

use crate::address::*;
use crate::checksum;
use crate::commands::*;
use crate::constants::*;
use crate::error::*;
use crate::escape::*;
use crate::frames::*;
use crate::length::*;
use crate::types::*;

/// Typical upper bound on a frame; the buffer grows past it if needed.
const INITIAL_BUFFER_SIZE: usize = 256;

/// Envelope encoding and parsing.
pub struct Frame;

impl Frame {
    /// Wrap a payload for transmission: delimiter, then the escaped length,
    /// payload and checksum.
    pub fn encode(payload: &[u8]) -> ProtocolResult<Vec<u8>> {
        let length = FrameLength::from_payload(payload)?;
        let mut buf = Vec::with_capacity(FRAME_OVERHEAD + payload.len() * 2);
        buf.push(START_DELIMITER);
        escape_into(&length.to_bytes(), &mut buf);
        escape_into(payload, &mut buf);
        escape_into(&[checksum::compute(payload)], &mut buf);
        Ok(buf)
    }

    /// Validate an unescaped frame and return its payload.
    pub fn parse(raw: &[u8]) -> ProtocolResult<&[u8]> {
        if raw.len() < MIN_FRAME_SIZE {
            return Err(ProtocolError::too_short(MIN_FRAME_SIZE, raw.len()));
        }
        if raw[0] != START_DELIMITER {
            return Err(ProtocolError::InvalidStartDelimiter(raw[0]));
        }

        let declared = usize::from(FrameLength::from_raw_frame(raw)?.value());
        let actual = raw.len() - FRAME_OVERHEAD;
        if declared != actual {
            return Err(ProtocolError::LengthMismatch { declared, actual });
        }

        checksum::verify(raw)?;
        Ok(&raw[PAYLOAD_OFFSET..raw.len() - 1])
    }

    /// Parse an unescaped frame all the way to a typed API frame.
    pub fn decode(raw: &[u8]) -> ProtocolResult<ApiFrame> {
        ApiFrame::decode(Frame::parse(raw)?)
    }
}

/// Encode an AT command request ready to write to the radio.
pub fn encode_command(command: &AtCommand, frame_id: FrameId) -> ProtocolResult<Vec<u8>> {
    Frame::encode(&AtCommandRequest::new(command, frame_id).encode())
}

/// Encode a transmit request ready to write to the radio.
pub fn encode_transmit_request(
    destination: DeviceAddress,
    network: NetworkAddress,
    frame_id: FrameId,
    broadcast_radius: u8,
    options: TransmitOptions,
    message: &[u8],
) -> ProtocolResult<Vec<u8>> {
    let request = TransmitRequest {
        frame_id,
        destination,
        network,
        broadcast_radius,
        options,
        data: message.to_vec(),
    };
    Frame::encode(&request.encode())
}

/// True if `buffer` holds exactly one complete unescaped frame, judged by
/// its length field alone.
pub fn is_complete(buffer: &[u8]) -> bool {
    match FrameLength::from_raw_frame(buffer) {
        Ok(length) => buffer.len() > PAYLOAD_OFFSET && buffer.len() == length.frame_size(),
        Err(_) => false,
    }
}

/// Reassembles frames from raw bytes read off the wire.
///
/// Bytes are un-escaped as they arrive and buffered until the length field
/// says the frame is complete. A stray delimiter value inside the payload
/// does not end the frame early.
///
/// ```rust,ignore
/// let mut accumulator = FrameAccumulator::new();
/// accumulator.push(&bytes_from_uart);
/// while let Some(raw) = accumulator.try_frame()? {
///     let frame = Frame::decode(&raw)?;
/// }
/// ```
#[derive(Debug, Default)]
pub struct FrameAccumulator {
    /// Un-escaped bytes of the frame in progress.
    buffer: BytesMut,
    unescaper: Unescaper,
}

impl FrameAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        FrameAccumulator {
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            unescaper: Unescaper::new(),
        }
    }

    /// Add raw bytes received from the transport.
    ///
    /// A raw `0x7E` that follows an escape byte cancels the escape and is
    /// kept as an ordinary data byte. Frame boundaries come from the length
    /// field only, so the frame in progress is not restarted; a corrupted
    /// frame is caught by its checksum in [`FrameAccumulator::try_frame`].
    pub fn push(&mut self, data: &[u8]) {
        log::trace!("rx {} bytes: {:02X?}", data.len(), data);

        for &byte in data {
            // A raw delimiter is never the target of an escape.
            if byte == START_DELIMITER && self.unescaper.is_pending() {
                log::debug!("escape interrupted by start delimiter");
                self.unescaper.reset();
            }

            if self.buffer.is_empty() && !self.unescaper.is_pending() && byte != START_DELIMITER {
                log::trace!("dropping 0x{:02X} before start delimiter", byte);
                continue;
            }

            if let Some(resolved) = self.unescaper.push(byte) {
                self.buffer.extend_from_slice(&[resolved]);
            }
        }
    }

    /// Take the next complete frame from the buffer.
    ///
    /// Returns `Ok(Some(frame))` with the full unescaped frame (delimiter
    /// through checksum), `Ok(None)` if more bytes are needed, or
    /// `Err(ChecksumMismatch)` if a complete frame failed validation. A
    /// failed frame is discarded and the next call starts fresh.
    pub fn try_frame(&mut self) -> ProtocolResult<Option<Vec<u8>>> {
        while !self.buffer.is_empty() && self.buffer[0] != START_DELIMITER {
            self.buffer.advance(1);
        }

        if self.buffer.len() <= LENGTH_LSB_OFFSET {
            return Ok(None);
        }

        let size = FrameLength::from_raw_frame(&self.buffer)?.frame_size();
        if self.buffer.len() < size {
            return Ok(None);
        }

        let frame = self.buffer.split_to(size);
        if let Err(err) = checksum::verify(&frame) {
            log::warn!("discarding {} byte frame: {}", frame.len(), err);
            return Err(err);
        }

        log::debug!("frame complete: {} bytes", frame.len());
        Ok(Some(frame.to_vec()))
    }

    /// Push `data`, then take the next complete frame if there is one.
    pub fn decode(&mut self, data: &[u8]) -> ProtocolResult<Option<Vec<u8>>> {
        self.push(data);
        self.try_frame()
    }

    /// Number of un-escaped bytes buffered.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// True if nothing is buffered and no escape is pending.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && !self.unescaper.is_pending()
    }

    /// True while the last received byte was an unresolved escape prefix.
    pub fn is_escape_pending(&self) -> bool {
        self.unescaper.is_pending()
    }

    /// Discard buffered bytes and any pending escape.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.unescaper.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_id_read() -> AtCommand {
        AtCommand::Addressing(Addressing::NodeIdentifier(Action::Read))
    }

    #[test]
    fn test_encode_at_command_frame() {
        let encoded = encode_command(&node_id_read(), FrameId(0x01)).unwrap();
        // sum(08 01 4E 49) = 0xA0
        assert_eq!(encoded, vec![0x7E, 0x00, 0x04, 0x08, 0x01, 0x4E, 0x49, 0x5F]);
    }

    #[test]
    fn test_encode_escapes_after_delimiter() {
        let payload = [0x08, 0x7E, b'N', b'J'];
        let encoded = Frame::encode(&payload).unwrap();

        assert_eq!(encoded[0], START_DELIMITER);
        assert!(!encoded[1..].contains(&START_DELIMITER));
        assert_eq!(&encoded[3..6], &[0x08, 0x7D, 0x5E]);
    }

    #[test]
    fn test_encode_too_large() {
        let payload = vec![0u8; MAX_PAYLOAD_SIZE + 1];
        assert!(matches!(
            Frame::encode(&payload),
            Err(ProtocolError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn test_parse_frame() {
        let raw = [0x7E, 0x00, 0x04, 0x08, 0x01, 0x4E, 0x49, 0x5F];
        assert_eq!(Frame::parse(&raw).unwrap(), &[0x08, 0x01, 0x4E, 0x49]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Frame::parse(&[0x7E, 0x00, 0x00]),
            Err(ProtocolError::too_short(4, 3))
        );
        assert_eq!(
            Frame::parse(&[0x7F, 0x00, 0x00, 0xFF]),
            Err(ProtocolError::InvalidStartDelimiter(0x7F))
        );
        assert_eq!(
            Frame::parse(&[0x7E, 0x00, 0x02, 0x08, 0xF7]),
            Err(ProtocolError::LengthMismatch {
                declared: 2,
                actual: 1
            })
        );
        assert_eq!(
            Frame::parse(&[0x7E, 0x00, 0x04, 0x08, 0x01, 0x4E, 0x49, 0x5E]),
            Err(ProtocolError::ChecksumMismatch {
                expected: 0x5F,
                actual: 0x5E
            })
        );
    }

    #[test]
    fn test_completeness_predicate() {
        assert!(!is_complete(&[0x7E, 0x00, 0x01]));
        assert!(!is_complete(&[0x7E, 0x00, 0x01, 0x08]));
        assert!(is_complete(&[0x7E, 0x00, 0x01, 0x08, 0xF7]));
        assert!(!is_complete(&[0x7E, 0x00, 0x01, 0x08, 0xF7, 0x00]));
        assert!(is_complete(&[0x7E, 0x00, 0x00, 0xFF]));
    }

    #[test]
    fn test_completeness_uses_full_length() {
        let mut frame = vec![0x7E, 0x01, 0x00];
        frame.extend(std::iter::repeat(0u8).take(0x100));
        frame.push(0xFF);
        assert!(is_complete(&frame));
        // msb + lsb + 4 would have been 5
        assert!(!is_complete(&frame[..5]));
    }

    #[test]
    fn test_accumulator_single_chunk() {
        let mut accumulator = FrameAccumulator::new();
        let encoded = encode_command(&node_id_read(), FrameId(0x01)).unwrap();

        let raw = accumulator.decode(&encoded).unwrap().unwrap();
        assert_eq!(raw, encoded);
        assert!(accumulator.is_empty());
    }

    #[test]
    fn test_accumulator_byte_at_a_time() {
        let mut accumulator = FrameAccumulator::new();
        let encoded = Frame::encode(&[0x8B, 0x01, 0x7D, 0x33, 0x00, 0x00, 0x00]).unwrap();

        let mut result = None;
        for (i, byte) in encoded.iter().enumerate() {
            result = accumulator.decode(&[*byte]).unwrap();
            if i + 1 < encoded.len() {
                assert!(result.is_none());
            }
        }

        let raw = result.unwrap();
        assert_eq!(
            Frame::parse(&raw).unwrap(),
            &[0x8B, 0x01, 0x7D, 0x33, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_accumulator_escape_split_across_chunks() {
        let mut accumulator = FrameAccumulator::new();
        let payload = [0x90, 0x7D, 0x11];
        let encoded = Frame::encode(&payload).unwrap();
        let split = encoded.iter().position(|&b| b == ESCAPE).unwrap() + 1;

        assert_eq!(accumulator.decode(&encoded[..split]).unwrap(), None);
        assert!(accumulator.is_escape_pending());
        assert_eq!(accumulator.buffered_len(), 4);

        let raw = accumulator.decode(&encoded[split..]).unwrap().unwrap();
        assert_eq!(Frame::parse(&raw).unwrap(), &payload);
    }

    #[test]
    fn test_accumulator_delimiter_after_escape_is_data() {
        let mut accumulator = FrameAccumulator::new();
        // 0x7D 0x7E: the escape is dropped and 0x7E lands in the payload.
        let stream = [0x7E, 0x00, 0x02, 0x7D, 0x7E, 0x01, 0x80];

        let raw = accumulator.decode(&stream).unwrap().unwrap();
        assert_eq!(raw, vec![0x7E, 0x00, 0x02, 0x7E, 0x01, 0x80]);
        assert_eq!(Frame::parse(&raw).unwrap(), &[0x7E, 0x01]);
        assert!(accumulator.is_empty());
    }

    #[test]
    fn test_accumulator_delimiter_value_in_payload() {
        let mut accumulator = FrameAccumulator::new();
        let payload = [0x90, 0x7E, 0x7E, 0x01];
        let encoded = Frame::encode(&payload).unwrap();

        let raw = accumulator.decode(&encoded).unwrap().unwrap();
        assert_eq!(Frame::parse(&raw).unwrap(), &payload);
    }

    #[test]
    fn test_accumulator_drops_leading_noise() {
        let mut accumulator = FrameAccumulator::new();
        let mut stream = vec![0x00, 0x13, 0xFF];
        stream.extend(encode_command(&node_id_read(), FrameId(0x01)).unwrap());

        let raw = accumulator.decode(&stream).unwrap().unwrap();
        assert_eq!(raw[0], START_DELIMITER);
        assert_eq!(Frame::parse(&raw).unwrap(), &[0x08, 0x01, 0x4E, 0x49]);
    }

    #[test]
    fn test_accumulator_checksum_failure_discards() {
        let mut accumulator = FrameAccumulator::new();
        let bad = [0x7E, 0x00, 0x04, 0x08, 0x01, 0x4E, 0x49, 0x00];

        assert_eq!(
            accumulator.decode(&bad),
            Err(ProtocolError::ChecksumMismatch {
                expected: 0x5F,
                actual: 0x00
            })
        );
        assert!(accumulator.is_empty());

        let good = encode_command(&node_id_read(), FrameId(0x01)).unwrap();
        assert!(accumulator.decode(&good).unwrap().is_some());
    }

    #[test]
    fn test_accumulator_back_to_back_frames() {
        let mut accumulator = FrameAccumulator::new();
        let first = Frame::encode(&[0x8B, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
        let second = Frame::encode(&[0x8B, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();

        let mut stream = first.clone();
        stream.extend_from_slice(&second);
        accumulator.push(&stream);

        let a = accumulator.try_frame().unwrap().unwrap();
        let b = accumulator.try_frame().unwrap().unwrap();
        assert_eq!(Frame::parse(&a).unwrap()[1], 0x01);
        assert_eq!(Frame::parse(&b).unwrap()[1], 0x02);
        assert_eq!(accumulator.try_frame().unwrap(), None);
    }

    #[test]
    fn test_accumulator_reset() {
        let mut accumulator = FrameAccumulator::new();
        accumulator.push(&[0x7E, 0x00, 0x05, 0x7D]);
        assert!(!accumulator.is_empty());

        accumulator.reset();
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.buffered_len(), 0);
    }

    #[test]
    fn test_decode_to_api_frame() {
        let encoded = Frame::encode(&[0x8B, 0x01, 0x12, 0x34, 0x00, 0x00, 0x00]).unwrap();
        let raw = unescape(&encoded);

        match Frame::decode(&raw).unwrap() {
            ApiFrame::TransmitStatus(status) => {
                assert_eq!(status.network, NetworkAddress::new(0x1234));
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }
}
