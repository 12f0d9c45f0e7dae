//! Common field types used in API frames.

use std::fmt;

use crate::constants::*;
use crate::error::*;

/// API frame type, carried in the first payload byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Local AT command request (0x08).
    AtCommand,
    /// Local AT command response (0x88).
    AtCommandResponse,
    /// ZigBee transmit request (0x10).
    TransmitRequest,
    /// ZigBee transmit status (0x8B).
    TransmitStatus,
    /// ZigBee receive packet (0x90).
    ReceivePacket,
}

impl TryFrom<u8> for FrameType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            FRAME_TYPE_AT_COMMAND => Ok(FrameType::AtCommand),
            FRAME_TYPE_AT_COMMAND_RESPONSE => Ok(FrameType::AtCommandResponse),
            FRAME_TYPE_TRANSMIT_REQUEST => Ok(FrameType::TransmitRequest),
            FRAME_TYPE_TRANSMIT_STATUS => Ok(FrameType::TransmitStatus),
            FRAME_TYPE_RECEIVE_PACKET => Ok(FrameType::ReceivePacket),
            other => Err(ProtocolError::UnknownFrameType(other)),
        }
    }
}

impl From<FrameType> for u8 {
    fn from(value: FrameType) -> Self {
        match value {
            FrameType::AtCommand => FRAME_TYPE_AT_COMMAND,
            FrameType::AtCommandResponse => FRAME_TYPE_AT_COMMAND_RESPONSE,
            FrameType::TransmitRequest => FRAME_TYPE_TRANSMIT_REQUEST,
            FrameType::TransmitStatus => FRAME_TYPE_TRANSMIT_STATUS,
            FrameType::ReceivePacket => FRAME_TYPE_RECEIVE_PACKET,
        }
    }
}

/// Correlates a request with its response frame.
///
/// A frame id of zero tells the radio not to send a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u8);

impl FrameId {
    /// Suppress the response frame.
    pub const NO_ACK: FrameId = FrameId(0x00);
    /// Request a response frame.
    pub const ACK: FrameId = FrameId(0x01);

    /// True if the radio will answer this frame.
    pub fn expects_response(&self) -> bool {
        self.0 != 0
    }
}

impl Default for FrameId {
    fn default() -> Self {
        FrameId::ACK
    }
}

impl From<u8> for FrameId {
    fn from(value: u8) -> Self {
        FrameId(value)
    }
}

impl From<FrameId> for u8 {
    fn from(value: FrameId) -> Self {
        value.0
    }
}

/// Processing status in an AT command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtCommandStatus {
    /// Command executed.
    Ok,
    /// Command failed.
    Error,
    /// The radio did not recognize the mnemonic.
    InvalidCommand,
    /// The radio rejected the parameter.
    InvalidParameter,
    /// Transmission failed.
    TxFailure,
    /// Status code this crate does not know.
    Unknown(u8),
}

impl From<u8> for AtCommandStatus {
    fn from(value: u8) -> Self {
        match value {
            AT_STATUS_OK => AtCommandStatus::Ok,
            AT_STATUS_ERROR => AtCommandStatus::Error,
            AT_STATUS_INVALID_COMMAND => AtCommandStatus::InvalidCommand,
            AT_STATUS_INVALID_PARAMETER => AtCommandStatus::InvalidParameter,
            AT_STATUS_TX_FAILURE => AtCommandStatus::TxFailure,
            other => AtCommandStatus::Unknown(other),
        }
    }
}

impl From<AtCommandStatus> for u8 {
    fn from(value: AtCommandStatus) -> Self {
        match value {
            AtCommandStatus::Ok => AT_STATUS_OK,
            AtCommandStatus::Error => AT_STATUS_ERROR,
            AtCommandStatus::InvalidCommand => AT_STATUS_INVALID_COMMAND,
            AtCommandStatus::InvalidParameter => AT_STATUS_INVALID_PARAMETER,
            AtCommandStatus::TxFailure => AT_STATUS_TX_FAILURE,
            AtCommandStatus::Unknown(code) => code,
        }
    }
}

impl fmt::Display for AtCommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtCommandStatus::Ok => write!(f, "OK"),
            AtCommandStatus::Error => write!(f, "error"),
            AtCommandStatus::InvalidCommand => write!(f, "invalid command"),
            AtCommandStatus::InvalidParameter => write!(f, "invalid parameter"),
            AtCommandStatus::TxFailure => write!(f, "TX failure"),
            AtCommandStatus::Unknown(code) => write!(f, "unknown status (0x{:02X})", code),
        }
    }
}

/// Delivery outcome reported in a transmit status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Success,
    MacAckFailure,
    CcaFailure,
    InvalidDestinationEndpoint,
    NetworkAckFailure,
    NotJoinedToNetwork,
    SelfAddressed,
    AddressNotFound,
    RouteNotFound,
    /// A neighbor did not relay the broadcast.
    BroadcastFailedToHear,
    InvalidBindingTableIndex,
    /// Lack of free buffers, timers, etc.
    ResourceError,
    AttemptedBroadcastWithAps,
    AttemptedUnicastWithAps,
    LackOfFreeBuffer,
    DataPayloadTooLarge,
    IndirectMessageUnrequested,
    /// Delivery code this crate does not know, e.g. firmware-specific.
    Unknown(u8),
}

impl DeliveryStatus {
    /// True if the packet reached its destination.
    pub fn is_success(&self) -> bool {
        *self == DeliveryStatus::Success
    }
}

impl From<u8> for DeliveryStatus {
    fn from(value: u8) -> Self {
        match value {
            DELIVERY_SUCCESS => DeliveryStatus::Success,
            DELIVERY_MAC_ACK_FAILURE => DeliveryStatus::MacAckFailure,
            DELIVERY_CCA_FAILURE => DeliveryStatus::CcaFailure,
            DELIVERY_INVALID_DESTINATION_ENDPOINT => DeliveryStatus::InvalidDestinationEndpoint,
            DELIVERY_NETWORK_ACK_FAILURE => DeliveryStatus::NetworkAckFailure,
            DELIVERY_NOT_JOINED_TO_NETWORK => DeliveryStatus::NotJoinedToNetwork,
            DELIVERY_SELF_ADDRESSED => DeliveryStatus::SelfAddressed,
            DELIVERY_ADDRESS_NOT_FOUND => DeliveryStatus::AddressNotFound,
            DELIVERY_ROUTE_NOT_FOUND => DeliveryStatus::RouteNotFound,
            DELIVERY_BROADCAST_FAILED_TO_HEAR => DeliveryStatus::BroadcastFailedToHear,
            DELIVERY_INVALID_BINDING_TABLE_INDEX => DeliveryStatus::InvalidBindingTableIndex,
            DELIVERY_RESOURCE_ERROR => DeliveryStatus::ResourceError,
            DELIVERY_ATTEMPTED_BROADCAST_WITH_APS => DeliveryStatus::AttemptedBroadcastWithAps,
            DELIVERY_ATTEMPTED_UNICAST_WITH_APS => DeliveryStatus::AttemptedUnicastWithAps,
            DELIVERY_LACK_OF_FREE_BUFFER => DeliveryStatus::LackOfFreeBuffer,
            DELIVERY_DATA_PAYLOAD_TOO_LARGE => DeliveryStatus::DataPayloadTooLarge,
            DELIVERY_INDIRECT_MESSAGE_UNREQUESTED => DeliveryStatus::IndirectMessageUnrequested,
            other => DeliveryStatus::Unknown(other),
        }
    }
}

impl From<DeliveryStatus> for u8 {
    fn from(value: DeliveryStatus) -> Self {
        match value {
            DeliveryStatus::Success => DELIVERY_SUCCESS,
            DeliveryStatus::MacAckFailure => DELIVERY_MAC_ACK_FAILURE,
            DeliveryStatus::CcaFailure => DELIVERY_CCA_FAILURE,
            DeliveryStatus::InvalidDestinationEndpoint => DELIVERY_INVALID_DESTINATION_ENDPOINT,
            DeliveryStatus::NetworkAckFailure => DELIVERY_NETWORK_ACK_FAILURE,
            DeliveryStatus::NotJoinedToNetwork => DELIVERY_NOT_JOINED_TO_NETWORK,
            DeliveryStatus::SelfAddressed => DELIVERY_SELF_ADDRESSED,
            DeliveryStatus::AddressNotFound => DELIVERY_ADDRESS_NOT_FOUND,
            DeliveryStatus::RouteNotFound => DELIVERY_ROUTE_NOT_FOUND,
            DeliveryStatus::BroadcastFailedToHear => DELIVERY_BROADCAST_FAILED_TO_HEAR,
            DeliveryStatus::InvalidBindingTableIndex => DELIVERY_INVALID_BINDING_TABLE_INDEX,
            DeliveryStatus::ResourceError => DELIVERY_RESOURCE_ERROR,
            DeliveryStatus::AttemptedBroadcastWithAps => DELIVERY_ATTEMPTED_BROADCAST_WITH_APS,
            DeliveryStatus::AttemptedUnicastWithAps => DELIVERY_ATTEMPTED_UNICAST_WITH_APS,
            DeliveryStatus::LackOfFreeBuffer => DELIVERY_LACK_OF_FREE_BUFFER,
            DeliveryStatus::DataPayloadTooLarge => DELIVERY_DATA_PAYLOAD_TOO_LARGE,
            DeliveryStatus::IndirectMessageUnrequested => DELIVERY_INDIRECT_MESSAGE_UNREQUESTED,
            DeliveryStatus::Unknown(code) => code,
        }
    }
}

/// Route discovery overhead reported in a transmit status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryStatus {
    NoDiscoveryOverhead,
    AddressDiscovery,
    RouteDiscovery,
    AddressAndRoute,
    ExtendedTimeoutDiscovery,
    Unknown(u8),
}

impl From<u8> for DiscoveryStatus {
    fn from(value: u8) -> Self {
        match value {
            DISCOVERY_NONE => DiscoveryStatus::NoDiscoveryOverhead,
            DISCOVERY_ADDRESS => DiscoveryStatus::AddressDiscovery,
            DISCOVERY_ROUTE => DiscoveryStatus::RouteDiscovery,
            DISCOVERY_ADDRESS_AND_ROUTE => DiscoveryStatus::AddressAndRoute,
            DISCOVERY_EXTENDED_TIMEOUT => DiscoveryStatus::ExtendedTimeoutDiscovery,
            other => DiscoveryStatus::Unknown(other),
        }
    }
}

impl From<DiscoveryStatus> for u8 {
    fn from(value: DiscoveryStatus) -> Self {
        match value {
            DiscoveryStatus::NoDiscoveryOverhead => DISCOVERY_NONE,
            DiscoveryStatus::AddressDiscovery => DISCOVERY_ADDRESS,
            DiscoveryStatus::RouteDiscovery => DISCOVERY_ROUTE,
            DiscoveryStatus::AddressAndRoute => DISCOVERY_ADDRESS_AND_ROUTE,
            DiscoveryStatus::ExtendedTimeoutDiscovery => DISCOVERY_EXTENDED_TIMEOUT,
            DiscoveryStatus::Unknown(code) => code,
        }
    }
}

/// Option bits of a received packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReceiveOptions(pub u8);

impl ReceiveOptions {
    /// Packet was acknowledged.
    pub fn is_acknowledged(&self) -> bool {
        self.0 & RX_OPT_ACKNOWLEDGED != 0
    }

    /// Packet was a broadcast.
    pub fn is_broadcast(&self) -> bool {
        self.0 & RX_OPT_BROADCAST != 0
    }

    /// Packet was APS-encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.0 & RX_OPT_ENCRYPTED != 0
    }

    /// Packet came from an end device.
    pub fn is_from_end_device(&self) -> bool {
        self.0 & RX_OPT_END_DEVICE != 0
    }
}

/// Option bits of a transmit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransmitOptions(pub u8);

impl TransmitOptions {
    pub const NONE: TransmitOptions = TransmitOptions(TX_OPT_NONE);
    pub const DISABLE_ACK: TransmitOptions = TransmitOptions(TX_OPT_DISABLE_ACK);
    pub const APS_ENCRYPTION: TransmitOptions = TransmitOptions(TX_OPT_APS_ENCRYPTION);
    pub const EXTENDED_TIMEOUT: TransmitOptions = TransmitOptions(TX_OPT_EXTENDED_TIMEOUT);
}

impl std::ops::BitOr for TransmitOptions {
    type Output = TransmitOptions;

    fn bitor(self, rhs: Self) -> Self::Output {
        TransmitOptions(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_type_codes() {
        for frame_type in [
            FrameType::AtCommand,
            FrameType::AtCommandResponse,
            FrameType::TransmitRequest,
            FrameType::TransmitStatus,
            FrameType::ReceivePacket,
        ] {
            assert_eq!(FrameType::try_from(u8::from(frame_type)), Ok(frame_type));
        }
        assert_eq!(
            FrameType::try_from(0x42),
            Err(ProtocolError::UnknownFrameType(0x42))
        );
    }

    #[test]
    fn test_delivery_status_codes() {
        assert_eq!(DeliveryStatus::from(0x00), DeliveryStatus::Success);
        assert_eq!(DeliveryStatus::from(0x21), DeliveryStatus::NetworkAckFailure);
        assert_eq!(
            DeliveryStatus::from(0x75),
            DeliveryStatus::IndirectMessageUnrequested
        );
        assert_eq!(u8::from(DeliveryStatus::LackOfFreeBuffer), 0x32);
    }

    #[test]
    fn test_unlisted_status_codes_are_kept() {
        for code in [0x03, 0x04, 0x31, 0xBB] {
            let status = DeliveryStatus::from(code);
            assert_eq!(status, DeliveryStatus::Unknown(code));
            assert!(!status.is_success());
            assert_eq!(u8::from(status), code);
        }

        assert_eq!(DiscoveryStatus::from(0x04), DiscoveryStatus::Unknown(0x04));
        assert_eq!(u8::from(DiscoveryStatus::Unknown(0x04)), 0x04);

        let status = AtCommandStatus::from(0x09);
        assert_eq!(status, AtCommandStatus::Unknown(0x09));
        assert_eq!(u8::from(status), 0x09);
        assert_eq!(status.to_string(), "unknown status (0x09)");
    }

    #[test]
    fn test_discovery_status_codes() {
        assert_eq!(
            DiscoveryStatus::from(0x40),
            DiscoveryStatus::ExtendedTimeoutDiscovery
        );
        assert_eq!(DiscoveryStatus::from(0x02), DiscoveryStatus::RouteDiscovery);
    }

    #[test]
    fn test_receive_options_bits() {
        let options = ReceiveOptions(RX_OPT_ACKNOWLEDGED | RX_OPT_ENCRYPTED);
        assert!(options.is_acknowledged());
        assert!(options.is_encrypted());
        assert!(!options.is_broadcast());
        assert!(!options.is_from_end_device());
    }

    #[test]
    fn test_transmit_options_combine() {
        let options = TransmitOptions::DISABLE_ACK | TransmitOptions::EXTENDED_TIMEOUT;
        assert_eq!(options.0, 0x41);
    }

    #[test]
    fn test_frame_id() {
        assert_eq!(FrameId::default(), FrameId::ACK);
        assert!(!FrameId::NO_ACK.expects_response());
        assert!(FrameId(0x52).expects_response());
    }
}
