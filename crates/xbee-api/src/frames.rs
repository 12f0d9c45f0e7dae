//! API frame payloads.
//!
//! Each type here is the payload of one frame type: the bytes between the
//! length field and the checksum, unescaped. Offsets are relative to the start
//! of the payload, so byte 0 is always the frame type.
//!
//! ```text
//! AT command           08 | id | mnemonic[2] | parameter...
//! AT command response  88 | id | mnemonic[2] | status | data...
//! Transmit request     10 | id | dest64[8] | dest16[2] | radius | options | data...
//! Transmit status      8B | id | dest16[2] | retries | delivery | discovery
//! Receive packet       90 | src64[8] | src16[2] | options | data...
//! ```

use crate::address::*;
use crate::catalog::*;
use crate::commands::*;
use crate::constants::*;
use crate::error::*;
use crate::types::*;

/// Check that `payload` is at least `len` bytes.
fn require(payload: &[u8], len: usize) -> ProtocolResult<()> {
    if payload.len() < len {
        return Err(ProtocolError::too_short(len, payload.len()));
    }
    Ok(())
}

/// Check the frame type byte of `payload`.
fn expect_type(payload: &[u8], expected: u8) -> ProtocolResult<()> {
    require(payload, 1)?;
    if payload[0] != expected {
        return Err(ProtocolError::UnexpectedFrameType {
            expected,
            actual: payload[0],
        });
    }
    Ok(())
}

fn mnemonic_at(payload: &[u8], offset: usize) -> Mnemonic {
    [payload[offset], payload[offset + 1]]
}

// ============================================================================
// AT Command (0x08)
// ============================================================================

/// Local AT command request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCommandRequest {
    /// Frame id echoed back in the response.
    pub frame_id: FrameId,
    /// Command mnemonic.
    pub mnemonic: Mnemonic,
    /// Encoded parameter; empty for reads.
    pub parameter: Vec<u8>,
}

impl AtCommandRequest {
    const MIN_LEN: usize = 2 + MNEMONIC_SIZE;

    /// Build a request from a typed command. Parameters are clamped.
    pub fn new(command: &AtCommand, frame_id: FrameId) -> Self {
        let encoded = command.encode();
        AtCommandRequest {
            frame_id,
            mnemonic: mnemonic_at(&encoded, 0),
            parameter: encoded[MNEMONIC_SIZE..].to_vec(),
        }
    }

    /// The typed command, if the mnemonic is in the catalog.
    pub fn command(&self) -> Option<AtCommand> {
        AtCommand::from_mnemonic(&self.mnemonic)
    }

    /// Serialize to a frame payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::MIN_LEN + self.parameter.len());
        buf.push(FRAME_TYPE_AT_COMMAND);
        buf.push(self.frame_id.0);
        buf.extend_from_slice(&self.mnemonic);
        buf.extend_from_slice(&self.parameter);
        buf
    }

    /// Parse from a frame payload.
    pub fn decode(payload: &[u8]) -> ProtocolResult<Self> {
        expect_type(payload, FRAME_TYPE_AT_COMMAND)?;
        require(payload, Self::MIN_LEN)?;
        Ok(AtCommandRequest {
            frame_id: FrameId(payload[1]),
            mnemonic: mnemonic_at(payload, 2),
            parameter: payload[4..].to_vec(),
        })
    }
}

// ============================================================================
// AT Command Response (0x88)
// ============================================================================

/// Local AT command response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCommandResponse {
    /// Frame id of the request being answered.
    pub frame_id: FrameId,
    /// Mnemonic of the request being answered.
    pub mnemonic: Mnemonic,
    /// Processing status.
    pub status: AtCommandStatus,
    /// Register value for reads; usually empty for writes.
    pub data: Vec<u8>,
}

impl AtCommandResponse {
    const MIN_LEN: usize = 3 + MNEMONIC_SIZE;

    /// The typed command this answers, if the mnemonic is in the catalog.
    pub fn command(&self) -> Option<AtCommand> {
        AtCommand::from_mnemonic(&self.mnemonic)
    }

    /// Mnemonic as text.
    pub fn mnemonic_str(&self) -> String {
        String::from_utf8_lossy(&self.mnemonic).into_owned()
    }

    /// True if the radio accepted the command.
    pub fn is_ok(&self) -> bool {
        self.status == AtCommandStatus::Ok
    }

    /// Data interpreted using the command's parameter type.
    ///
    /// Read-only registers and unknown mnemonics have no declared type and
    /// return `None`; use [`AtCommandResponse::data`] directly for those.
    pub fn value(&self) -> Option<ParameterValue> {
        lookup(&self.mnemonic)?.parameter.decode(&self.data)
    }

    /// Data as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Serialize to a frame payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::MIN_LEN + self.data.len());
        buf.push(FRAME_TYPE_AT_COMMAND_RESPONSE);
        buf.push(self.frame_id.0);
        buf.extend_from_slice(&self.mnemonic);
        buf.push(self.status.into());
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Parse from a frame payload.
    pub fn decode(payload: &[u8]) -> ProtocolResult<Self> {
        expect_type(payload, FRAME_TYPE_AT_COMMAND_RESPONSE)?;
        require(payload, Self::MIN_LEN)?;
        Ok(AtCommandResponse {
            frame_id: FrameId(payload[1]),
            mnemonic: mnemonic_at(payload, 2),
            status: AtCommandStatus::from(payload[4]),
            data: payload[5..].to_vec(),
        })
    }
}

// ============================================================================
// Transmit Request (0x10)
// ============================================================================

/// ZigBee transmit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitRequest {
    pub frame_id: FrameId,
    /// 64-bit destination.
    pub destination: DeviceAddress,
    /// 16-bit destination, or `UNKNOWN_OR_BROADCAST` to let the radio resolve it.
    pub network: NetworkAddress,
    /// Maximum hops for broadcasts; zero means the network maximum.
    pub broadcast_radius: u8,
    pub options: TransmitOptions,
    /// RF data.
    pub data: Vec<u8>,
}

impl TransmitRequest {
    const HEADER_LEN: usize = 4 + DEVICE_ADDRESS_SIZE + NETWORK_ADDRESS_SIZE;

    /// A unicast with default radius and options, resolving the network address.
    pub fn new(destination: DeviceAddress, data: impl Into<Vec<u8>>) -> Self {
        TransmitRequest {
            frame_id: FrameId::ACK,
            destination,
            network: NetworkAddress::UNKNOWN_OR_BROADCAST,
            broadcast_radius: 0,
            options: TransmitOptions::NONE,
            data: data.into(),
        }
    }

    /// Serialize to a frame payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::HEADER_LEN + self.data.len());
        buf.push(FRAME_TYPE_TRANSMIT_REQUEST);
        buf.push(self.frame_id.0);
        buf.extend_from_slice(self.destination.as_bytes());
        buf.extend_from_slice(self.network.as_bytes());
        buf.push(self.broadcast_radius);
        buf.push(self.options.0);
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Parse from a frame payload.
    pub fn decode(payload: &[u8]) -> ProtocolResult<Self> {
        expect_type(payload, FRAME_TYPE_TRANSMIT_REQUEST)?;
        require(payload, Self::HEADER_LEN)?;

        let destination = DeviceAddress::from_slice(&payload[2..10])
            .ok_or(ProtocolError::too_short(10, payload.len()))?;
        let network = NetworkAddress::from_slice(&payload[10..12])
            .ok_or(ProtocolError::too_short(12, payload.len()))?;

        Ok(TransmitRequest {
            frame_id: FrameId(payload[1]),
            destination,
            network,
            broadcast_radius: payload[12],
            options: TransmitOptions(payload[13]),
            data: payload[Self::HEADER_LEN..].to_vec(),
        })
    }
}

// ============================================================================
// Transmit Status (0x8B)
// ============================================================================

/// Outcome of a transmit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitStatus {
    /// Frame id of the transmit request.
    pub frame_id: FrameId,
    /// Network address the packet was delivered to.
    pub network: NetworkAddress,
    /// Number of application retransmissions.
    pub retry_count: u8,
    pub delivery: DeliveryStatus,
    pub discovery: DiscoveryStatus,
}

impl TransmitStatus {
    const LEN: usize = 7;

    /// True if the packet was delivered.
    pub fn is_success(&self) -> bool {
        self.delivery.is_success()
    }

    /// Serialize to a frame payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::LEN);
        buf.push(FRAME_TYPE_TRANSMIT_STATUS);
        buf.push(self.frame_id.0);
        buf.extend_from_slice(self.network.as_bytes());
        buf.push(self.retry_count);
        buf.push(self.delivery.into());
        buf.push(self.discovery.into());
        buf
    }

    /// Parse from a frame payload. Trailing bytes are ignored.
    pub fn decode(payload: &[u8]) -> ProtocolResult<Self> {
        expect_type(payload, FRAME_TYPE_TRANSMIT_STATUS)?;
        require(payload, Self::LEN)?;
        Ok(TransmitStatus {
            frame_id: FrameId(payload[1]),
            network: NetworkAddress([payload[2], payload[3]]),
            retry_count: payload[4],
            delivery: DeliveryStatus::from(payload[5]),
            discovery: DiscoveryStatus::from(payload[6]),
        })
    }
}

// ============================================================================
// Receive Packet (0x90)
// ============================================================================

/// Data received from another node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivePacket {
    /// 64-bit sender, or `DeviceAddress::UNKNOWN`.
    pub source: DeviceAddress,
    /// 16-bit sender.
    pub network: NetworkAddress,
    pub options: ReceiveOptions,
    /// RF data.
    pub data: Vec<u8>,
}

impl ReceivePacket {
    const HEADER_LEN: usize = 2 + DEVICE_ADDRESS_SIZE + NETWORK_ADDRESS_SIZE;

    /// Data as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Serialize to a frame payload.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::HEADER_LEN + self.data.len());
        buf.push(FRAME_TYPE_RECEIVE_PACKET);
        buf.extend_from_slice(self.source.as_bytes());
        buf.extend_from_slice(self.network.as_bytes());
        buf.push(self.options.0);
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Parse from a frame payload.
    pub fn decode(payload: &[u8]) -> ProtocolResult<Self> {
        expect_type(payload, FRAME_TYPE_RECEIVE_PACKET)?;
        require(payload, Self::HEADER_LEN)?;

        let source = DeviceAddress::from_slice(&payload[1..9])
            .ok_or(ProtocolError::too_short(9, payload.len()))?;
        let network = NetworkAddress::from_slice(&payload[9..11])
            .ok_or(ProtocolError::too_short(11, payload.len()))?;

        Ok(ReceivePacket {
            source,
            network,
            options: ReceiveOptions(payload[11]),
            data: payload[Self::HEADER_LEN..].to_vec(),
        })
    }
}

// ============================================================================
// Any Frame
// ============================================================================

/// Any supported API frame, dispatched on the frame type byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFrame {
    AtCommand(AtCommandRequest),
    AtCommandResponse(AtCommandResponse),
    TransmitRequest(TransmitRequest),
    TransmitStatus(TransmitStatus),
    ReceivePacket(ReceivePacket),
}

impl ApiFrame {
    /// Decode a frame payload.
    pub fn decode(payload: &[u8]) -> ProtocolResult<Self> {
        require(payload, 1)?;

        let frame = match FrameType::try_from(payload[0])? {
            FrameType::AtCommand => ApiFrame::AtCommand(AtCommandRequest::decode(payload)?),
            FrameType::AtCommandResponse => {
                ApiFrame::AtCommandResponse(AtCommandResponse::decode(payload)?)
            }
            FrameType::TransmitRequest => {
                ApiFrame::TransmitRequest(TransmitRequest::decode(payload)?)
            }
            FrameType::TransmitStatus => ApiFrame::TransmitStatus(TransmitStatus::decode(payload)?),
            FrameType::ReceivePacket => ApiFrame::ReceivePacket(ReceivePacket::decode(payload)?),
        };

        Ok(frame)
    }

    /// Serialize to a frame payload.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            ApiFrame::AtCommand(f) => f.encode(),
            ApiFrame::AtCommandResponse(f) => f.encode(),
            ApiFrame::TransmitRequest(f) => f.encode(),
            ApiFrame::TransmitStatus(f) => f.encode(),
            ApiFrame::ReceivePacket(f) => f.encode(),
        }
    }

    /// The frame type.
    pub fn frame_type(&self) -> FrameType {
        match self {
            ApiFrame::AtCommand(_) => FrameType::AtCommand,
            ApiFrame::AtCommandResponse(_) => FrameType::AtCommandResponse,
            ApiFrame::TransmitRequest(_) => FrameType::TransmitRequest,
            ApiFrame::TransmitStatus(_) => FrameType::TransmitStatus,
            ApiFrame::ReceivePacket(_) => FrameType::ReceivePacket,
        }
    }

    /// Frame id, for frame types that carry one.
    pub fn frame_id(&self) -> Option<FrameId> {
        match self {
            ApiFrame::AtCommand(f) => Some(f.frame_id),
            ApiFrame::AtCommandResponse(f) => Some(f.frame_id),
            ApiFrame::TransmitRequest(f) => Some(f.frame_id),
            ApiFrame::TransmitStatus(f) => Some(f.frame_id),
            ApiFrame::ReceivePacket(_) => None,
        }
    }
}

impl From<AtCommandRequest> for ApiFrame {
    fn from(frame: AtCommandRequest) -> Self {
        ApiFrame::AtCommand(frame)
    }
}

impl From<TransmitRequest> for ApiFrame {
    fn from(frame: TransmitRequest) -> Self {
        ApiFrame::TransmitRequest(frame)
    }
}
