//! Protocol constants
//!
//! These constants define the framing bytes, escape set, frame type codes and
//! fixed sizes used by the XBee API (escaped mode, `AP=2`) serial protocol.

// ============================================================================
// Framing
// ============================================================================

/// Marks the first byte of every API frame.
pub const START_DELIMITER: u8 = 0x7E;
/// Prefix inserted before a reserved byte on the wire.
pub const ESCAPE: u8 = 0x7D;
/// Software flow control: resume transmission.
pub const XON: u8 = 0x11;
/// Software flow control: pause transmission.
pub const XOFF: u8 = 0x13;
/// Value XORed into a reserved byte after the escape prefix.
pub const ESCAPE_XOR: u8 = 0x20;

/// Bytes that must be escaped when they appear after the start delimiter.
pub const RESERVED_BYTES: [u8; 4] = [START_DELIMITER, ESCAPE, XON, XOFF];

/// Offset of the length MSB in an unescaped frame.
pub const LENGTH_MSB_OFFSET: usize = 1;
/// Offset of the length LSB in an unescaped frame.
pub const LENGTH_LSB_OFFSET: usize = 2;
/// Offset of the first payload byte in an unescaped frame.
pub const PAYLOAD_OFFSET: usize = 3;

/// Bytes that are not counted by the length field: delimiter, two length
/// bytes and the checksum.
pub const FRAME_OVERHEAD: usize = 4;
/// Smallest possible frame (an empty payload).
pub const MIN_FRAME_SIZE: usize = FRAME_OVERHEAD;
/// Largest payload the 16-bit length field can describe.
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

/// Low byte of `sum(payload) + checksum` for a valid frame.
pub const CHECKSUM_TARGET: u8 = 0xFF;

// ============================================================================
// Frame Types
// ============================================================================

/// Local AT command request.
pub const FRAME_TYPE_AT_COMMAND: u8 = 0x08;
/// ZigBee transmit request.
pub const FRAME_TYPE_TRANSMIT_REQUEST: u8 = 0x10;
/// Local AT command response.
pub const FRAME_TYPE_AT_COMMAND_RESPONSE: u8 = 0x88;
/// ZigBee transmit status.
pub const FRAME_TYPE_TRANSMIT_STATUS: u8 = 0x8B;
/// ZigBee receive packet.
pub const FRAME_TYPE_RECEIVE_PACKET: u8 = 0x90;

// ============================================================================
// Field Sizes
// ============================================================================

/// Size of an AT command mnemonic.
pub const MNEMONIC_SIZE: usize = 2;
/// Size of a 64-bit device address.
pub const DEVICE_ADDRESS_SIZE: usize = 8;
/// Size of a 16-bit network address.
pub const NETWORK_ADDRESS_SIZE: usize = 2;

/// Maximum length of the node identifier string (`NI`).
pub const MAX_NODE_IDENTIFIER_LEN: usize = 20;

// ============================================================================
// AT Command Response Status
// ============================================================================

/// Command executed.
pub const AT_STATUS_OK: u8 = 0x00;
/// Command failed.
pub const AT_STATUS_ERROR: u8 = 0x01;
/// Mnemonic not recognized by the radio.
pub const AT_STATUS_INVALID_COMMAND: u8 = 0x02;
/// Parameter rejected by the radio.
pub const AT_STATUS_INVALID_PARAMETER: u8 = 0x03;
/// Remote command transmission failed.
pub const AT_STATUS_TX_FAILURE: u8 = 0x04;

// ============================================================================
// Transmit Status: Delivery
// ============================================================================

pub const DELIVERY_SUCCESS: u8 = 0x00;
pub const DELIVERY_MAC_ACK_FAILURE: u8 = 0x01;
pub const DELIVERY_CCA_FAILURE: u8 = 0x02;
pub const DELIVERY_INVALID_DESTINATION_ENDPOINT: u8 = 0x15;
pub const DELIVERY_NETWORK_ACK_FAILURE: u8 = 0x21;
pub const DELIVERY_NOT_JOINED_TO_NETWORK: u8 = 0x22;
pub const DELIVERY_SELF_ADDRESSED: u8 = 0x23;
pub const DELIVERY_ADDRESS_NOT_FOUND: u8 = 0x24;
pub const DELIVERY_ROUTE_NOT_FOUND: u8 = 0x25;
pub const DELIVERY_BROADCAST_FAILED_TO_HEAR: u8 = 0x26;
pub const DELIVERY_INVALID_BINDING_TABLE_INDEX: u8 = 0x2B;
pub const DELIVERY_RESOURCE_ERROR: u8 = 0x2C;
pub const DELIVERY_ATTEMPTED_BROADCAST_WITH_APS: u8 = 0x2D;
pub const DELIVERY_ATTEMPTED_UNICAST_WITH_APS: u8 = 0x2E;
pub const DELIVERY_LACK_OF_FREE_BUFFER: u8 = 0x32;
pub const DELIVERY_DATA_PAYLOAD_TOO_LARGE: u8 = 0x74;
pub const DELIVERY_INDIRECT_MESSAGE_UNREQUESTED: u8 = 0x75;

// ============================================================================
// Transmit Status: Discovery
// ============================================================================

pub const DISCOVERY_NONE: u8 = 0x00;
pub const DISCOVERY_ADDRESS: u8 = 0x01;
pub const DISCOVERY_ROUTE: u8 = 0x02;
pub const DISCOVERY_ADDRESS_AND_ROUTE: u8 = 0x03;
pub const DISCOVERY_EXTENDED_TIMEOUT: u8 = 0x40;

// ============================================================================
// Receive / Transmit Option Bits
// ============================================================================

/// Packet was acknowledged.
pub const RX_OPT_ACKNOWLEDGED: u8 = 0x01;
/// Packet was a broadcast.
pub const RX_OPT_BROADCAST: u8 = 0x02;
/// Packet was encrypted with APS encryption.
pub const RX_OPT_ENCRYPTED: u8 = 0x20;
/// Packet was sent from an end device.
pub const RX_OPT_END_DEVICE: u8 = 0x40;

/// No transmit options.
pub const TX_OPT_NONE: u8 = 0x00;
/// Disable retries and route repair.
pub const TX_OPT_DISABLE_ACK: u8 = 0x01;
/// Enable APS end-to-end encryption.
pub const TX_OPT_APS_ENCRYPTION: u8 = 0x20;
/// Use the extended transmission timeout.
pub const TX_OPT_EXTENDED_TIMEOUT: u8 = 0x40;
