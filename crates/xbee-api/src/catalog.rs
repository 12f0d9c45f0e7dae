//! Static table of every AT command the codec knows.
//!
//! Each entry names the command's two-letter mnemonic, its functional group
//! and the shape of its parameter, including the valid range that writes are
//! clamped to.

use std::fmt;

use crate::constants::*;

/// Two ASCII characters identifying an AT command.
pub type Mnemonic = [u8; MNEMONIC_SIZE];

/// Functional group an AT command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandGroup {
    Networking,
    Addressing,
    ZigBeeAddressing,
    RfInterfacing,
    Security,
    SerialInterfacing,
    AtCommandOptions,
    SleepModes,
    IoSettings,
    IoSampling,
    Diagnostics,
}

/// Shape of a command's parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Query only, no parameter can be written.
    ReadOnly,
    /// One byte, 0 or 1.
    Bool,
    /// One byte, clamped to `min..=max`.
    U8 { min: u8, max: u8 },
    /// Two bytes big-endian, clamped to `min..=max`.
    U16 { min: u16, max: u16 },
    /// Four bytes big-endian, clamped to `min..=max`.
    U32 { min: u32, max: u32 },
    /// Eight bytes big-endian, clamped to `min..=max`.
    U64 { min: u64, max: u64 },
    /// UTF-8 text, truncated to `max_len` characters.
    Text { max_len: usize },
}

/// A parameter value carried by a write command or returned by a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Text(String),
}

impl ParameterValue {
    /// Encode without any range policy applied.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            ParameterValue::Bool(v) => buf.push(u8::from(*v)),
            ParameterValue::U8(v) => buf.push(*v),
            ParameterValue::U16(v) => buf.extend_from_slice(&v.to_be_bytes()),
            ParameterValue::U32(v) => buf.extend_from_slice(&v.to_be_bytes()),
            ParameterValue::U64(v) => buf.extend_from_slice(&v.to_be_bytes()),
            ParameterValue::Text(s) => buf.extend_from_slice(s.as_bytes()),
        }
    }

    /// Numeric value, if this is not text.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ParameterValue::Bool(v) => Some(u64::from(*v)),
            ParameterValue::U8(v) => Some(u64::from(*v)),
            ParameterValue::U16(v) => Some(u64::from(*v)),
            ParameterValue::U32(v) => Some(u64::from(*v)),
            ParameterValue::U64(v) => Some(*v),
            ParameterValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(v) => write!(f, "{}", v),
            ParameterValue::U8(v) => write!(f, "0x{:02X}", v),
            ParameterValue::U16(v) => write!(f, "0x{:04X}", v),
            ParameterValue::U32(v) => write!(f, "0x{:08X}", v),
            ParameterValue::U64(v) => write!(f, "0x{:016X}", v),
            ParameterValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<u8> for ParameterValue {
    fn from(value: u8) -> Self {
        ParameterValue::U8(value)
    }
}

impl From<u16> for ParameterValue {
    fn from(value: u16) -> Self {
        ParameterValue::U16(value)
    }
}

impl From<u32> for ParameterValue {
    fn from(value: u32) -> Self {
        ParameterValue::U32(value)
    }
}

impl From<u64> for ParameterValue {
    fn from(value: u64) -> Self {
        ParameterValue::U64(value)
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl ParameterKind {
    /// Encode `value`, clamping numbers into range and truncating text.
    pub fn encode_into(&self, value: &ParameterValue, buf: &mut Vec<u8>) {
        match (*self, value) {
            (ParameterKind::U8 { min, max }, ParameterValue::U8(v)) => {
                buf.push((*v).clamp(min, max));
            }
            (ParameterKind::U16 { min, max }, ParameterValue::U16(v)) => {
                buf.extend_from_slice(&(*v).clamp(min, max).to_be_bytes());
            }
            (ParameterKind::U32 { min, max }, ParameterValue::U32(v)) => {
                buf.extend_from_slice(&(*v).clamp(min, max).to_be_bytes());
            }
            (ParameterKind::U64 { min, max }, ParameterValue::U64(v)) => {
                buf.extend_from_slice(&(*v).clamp(min, max).to_be_bytes());
            }
            (ParameterKind::Text { max_len }, ParameterValue::Text(s)) => {
                buf.extend_from_slice(truncate_chars(s, max_len).as_bytes());
            }
            (kind, value) => {
                if kind != ParameterKind::Bool {
                    log::warn!("parameter {:?} does not match catalog kind {:?}", value, kind);
                }
                value.encode_into(buf);
            }
        }
    }

    /// Interpret response data returned for a command of this kind.
    ///
    /// Numeric registers may come back shorter than their full width, so
    /// any big-endian run up to the width is accepted. Returns `None` for
    /// read-only commands, empty data, or data wider than the parameter.
    pub fn decode(&self, data: &[u8]) -> Option<ParameterValue> {
        if data.is_empty() {
            return None;
        }
        match *self {
            ParameterKind::ReadOnly => None,
            ParameterKind::Bool => {
                (data.len() == 1).then(|| ParameterValue::Bool(data[0] != 0))
            }
            ParameterKind::U8 { .. } => be_value(data, 1).map(|v| ParameterValue::U8(v as u8)),
            ParameterKind::U16 { .. } => be_value(data, 2).map(|v| ParameterValue::U16(v as u16)),
            ParameterKind::U32 { .. } => be_value(data, 4).map(|v| ParameterValue::U32(v as u32)),
            ParameterKind::U64 { .. } => be_value(data, 8).map(ParameterValue::U64),
            ParameterKind::Text { .. } => Some(ParameterValue::Text(
                String::from_utf8_lossy(data).to_string(),
            )),
        }
    }

    /// True if the command accepts a written value.
    pub fn is_writable(&self) -> bool {
        *self != ParameterKind::ReadOnly
    }
}

fn be_value(data: &[u8], width: usize) -> Option<u64> {
    if data.len() > width {
        return None;
    }
    Some(data.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

fn truncate_chars(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Catalog entry describing one AT command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    /// Two-letter mnemonic.
    pub mnemonic: Mnemonic,
    /// Human-readable name.
    pub name: &'static str,
    /// Functional group.
    pub group: CommandGroup,
    /// Parameter shape and valid range.
    pub parameter: ParameterKind,
}

impl CommandInfo {
    /// Mnemonic as a string slice.
    pub fn mnemonic_str(&self) -> &str {
        std::str::from_utf8(&self.mnemonic).unwrap_or("??")
    }
}

const fn cmd(
    mnemonic: &[u8; 2],
    name: &'static str,
    group: CommandGroup,
    parameter: ParameterKind,
) -> CommandInfo {
    CommandInfo {
        mnemonic: *mnemonic,
        name,
        group,
        parameter,
    }
}

const fn u8_range(min: u8, max: u8) -> ParameterKind {
    ParameterKind::U8 { min, max }
}

const fn u16_range(min: u16, max: u16) -> ParameterKind {
    ParameterKind::U16 { min, max }
}

const fn u32_range(min: u32, max: u32) -> ParameterKind {
    ParameterKind::U32 { min, max }
}

use CommandGroup::*;
use ParameterKind::{Bool, ReadOnly};

const ANY_U8: ParameterKind = u8_range(0, u8::MAX);
const ANY_U16: ParameterKind = u16_range(0, u16::MAX);
const ANY_U32: ParameterKind = u32_range(0, u32::MAX);
const ANY_U64: ParameterKind = ParameterKind::U64 {
    min: 0,
    max: u64::MAX,
};
const IO_PIN: ParameterKind = u8_range(0, 0x05);

/// Every supported AT command.
pub static CATALOG: &[CommandInfo] = &[
    // Networking
    cmd(b"ID", "PAN ID", Networking, ANY_U64),
    cmd(b"SC", "Scan Channels", Networking, u16_range(0x0001, 0xFFFF)),
    cmd(b"SD", "Scan Duration Exponent", Networking, u8_range(0, 0x07)),
    cmd(b"ZS", "ZigBee Stack Profile", Networking, u8_range(0, 0x02)),
    cmd(b"NJ", "Node Join Time", Networking, ANY_U8),
    cmd(b"NW", "Network Watchdog Timeout", Networking, u16_range(0, 0x64FF)),
    cmd(b"JV", "Channel Verification", Networking, Bool),
    cmd(b"JN", "Join Notification", Networking, Bool),
    cmd(b"OP", "Operating PAN ID", Networking, ReadOnly),
    cmd(b"OI", "Operating 16-bit PAN ID", Networking, ReadOnly),
    cmd(b"CH", "Operating Channel", Networking, ReadOnly),
    cmd(b"NC", "Number of Remaining Children", Networking, ReadOnly),
    cmd(b"CE", "Coordinator Enable", Networking, Bool),
    cmd(b"DO", "Device Options", Networking, ANY_U8),
    cmd(b"DC", "Device Controls", Networking, ANY_U16),
    // Addressing
    cmd(b"SH", "Serial Number High", Addressing, ReadOnly),
    cmd(b"SL", "Serial Number Low", Addressing, ReadOnly),
    cmd(b"MY", "16-bit Network Address", Addressing, ReadOnly),
    cmd(b"MP", "16-bit Parent Address", Addressing, ReadOnly),
    cmd(b"DH", "Destination Address High", Addressing, ANY_U32),
    cmd(b"DL", "Destination Address Low", Addressing, ANY_U32),
    cmd(
        b"NI",
        "Node Identifier",
        Addressing,
        ParameterKind::Text {
            max_len: MAX_NODE_IDENTIFIER_LEN,
        },
    ),
    cmd(b"NH", "Maximum Hops", Addressing, ANY_U8),
    cmd(b"BH", "Broadcast Radius", Addressing, u8_range(0, 0x1E)),
    cmd(b"AR", "Many-to-One Route Broadcast Time", Addressing, ANY_U8),
    cmd(b"DD", "Device Type Identifier", Addressing, ANY_U32),
    cmd(b"NT", "Node Discovery Backoff", Addressing, u8_range(0x20, 0xFF)),
    cmd(b"NO", "Node Discovery Options", Addressing, u8_range(0, 0x03)),
    cmd(b"NP", "Maximum RF Payload Bytes", Addressing, ReadOnly),
    cmd(b"CR", "PAN Conflict Threshold", Addressing, u8_range(0, 0x3F)),
    // ZigBee addressing
    cmd(b"SE", "Source Endpoint", ZigBeeAddressing, ANY_U8),
    cmd(b"DE", "Destination Endpoint", ZigBeeAddressing, ANY_U8),
    cmd(b"CI", "Cluster ID", ZigBeeAddressing, ANY_U16),
    cmd(b"TO", "Transmit Options", ZigBeeAddressing, ANY_U8),
    // RF interfacing
    cmd(b"PL", "TX Power Level", RfInterfacing, u8_range(0, 0x04)),
    cmd(b"PM", "Power Mode", RfInterfacing, Bool),
    cmd(b"PP", "Power at PL4", RfInterfacing, ReadOnly),
    // Security
    cmd(b"EE", "Encryption Enable", Security, Bool),
    cmd(b"EO", "Encryption Options", Security, ANY_U8),
    cmd(b"KY", "Link Encryption Key", Security, ANY_U32),
    cmd(b"NK", "Network Encryption Key", Security, ANY_U32),
    // Serial interfacing
    cmd(b"BD", "Baud Rate", SerialInterfacing, u8_range(0, 0x08)),
    cmd(b"NB", "Parity", SerialInterfacing, u8_range(0, 0x03)),
    cmd(b"SB", "Stop Bits", SerialInterfacing, u8_range(0, 0x01)),
    cmd(b"RO", "Packetization Timeout", SerialInterfacing, ANY_U8),
    cmd(b"D6", "DIO6/nRTS Configuration", SerialInterfacing, u8_range(0, 0x05)),
    cmd(b"D7", "DIO7/nCTS Configuration", SerialInterfacing, u8_range(0, 0x07)),
    cmd(b"AP", "API Enable", SerialInterfacing, u8_range(0, 0x02)),
    cmd(b"AO", "API Output Mode", SerialInterfacing, u8_range(0, 0x0B)),
    // AT command options
    cmd(b"CT", "Command Mode Timeout", AtCommandOptions, u16_range(0x02, 0x028F)),
    cmd(b"GT", "Guard Times", AtCommandOptions, u16_range(0x01, 0x0CE4)),
    cmd(b"CC", "Command Sequence Character", AtCommandOptions, ANY_U8),
    // Sleep modes
    cmd(b"SP", "Cyclic Sleep Period", SleepModes, u16_range(0x20, 0x0AF0)),
    cmd(b"SN", "Number of Cyclic Sleep Periods", SleepModes, u16_range(0x01, 0xFFFF)),
    cmd(b"SM", "Sleep Mode", SleepModes, u8_range(0, 0x05)),
    cmd(b"ST", "Time Before Sleep", SleepModes, u16_range(0x01, 0xFFFE)),
    cmd(b"SO", "Sleep Options", SleepModes, ANY_U8),
    cmd(b"WH", "Wake Host", SleepModes, ANY_U16),
    cmd(b"PO", "Poll Rate", SleepModes, u16_range(0, 0x03E8)),
    // IO settings
    cmd(b"D0", "DIO0/AD0/CB Configuration", IoSettings, IO_PIN),
    cmd(b"D1", "DIO1/AD1/nSPI_ATTN Configuration", IoSettings, IO_PIN),
    cmd(b"D2", "DIO2/AD2/SPI_SCLK Configuration", IoSettings, IO_PIN),
    cmd(b"D3", "DIO3/AD3/nSPI_SSEL Configuration", IoSettings, IO_PIN),
    cmd(b"D4", "DIO4/SPI_MOSI Configuration", IoSettings, IO_PIN),
    cmd(b"D5", "DIO5/Associated Configuration", IoSettings, IO_PIN),
    cmd(b"D8", "DIO8/nDTR/Sleep_Rq Configuration", IoSettings, IO_PIN),
    cmd(b"D9", "DIO9/nOn_Sleep Configuration", IoSettings, IO_PIN),
    cmd(b"P0", "DIO10/RSSI PWM Configuration", IoSettings, IO_PIN),
    cmd(b"P1", "DIO11/PWM1 Configuration", IoSettings, IO_PIN),
    cmd(b"P2", "DIO12/SPI_MISO Configuration", IoSettings, IO_PIN),
    cmd(b"P3", "DIO13/DOUT Configuration", IoSettings, IO_PIN),
    cmd(b"P4", "DIO14/DIN/nConfig Configuration", IoSettings, IO_PIN),
    cmd(b"PR", "Pull-up Resistor Enable", IoSettings, u16_range(0, 0x7FFF)),
    cmd(b"PD", "Pull-up/down Direction", IoSettings, u16_range(0, 0x7FFF)),
    cmd(b"LT", "Associate LED Blink Time", IoSettings, u8_range(0x0A, 0xFF)),
    cmd(b"RP", "RSSI PWM Timer", IoSettings, ANY_U8),
    // IO sampling
    cmd(b"IR", "IO Sampling Rate", IoSampling, u16_range(0x32, 0xFFFF)),
    cmd(b"IC", "Digital IO Change Detection", IoSampling, ANY_U16),
    cmd(b"V+", "Supply Voltage High Threshold", IoSampling, ANY_U16),
    // Diagnostics
    cmd(b"VR", "Firmware Version", Diagnostics, ReadOnly),
    cmd(b"HV", "Hardware Version", Diagnostics, ReadOnly),
    cmd(b"AI", "Association Indication", Diagnostics, ReadOnly),
    cmd(b"DB", "RSSI of Last Packet", Diagnostics, ReadOnly),
    cmd(b"%V", "Supply Voltage", Diagnostics, ReadOnly),
];

/// Find the catalog entry for a mnemonic.
pub fn lookup(mnemonic: &[u8]) -> Option<&'static CommandInfo> {
    CATALOG.iter().find(|info| info.mnemonic == mnemonic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_mnemonics_unique() {
        let mut seen = HashSet::new();
        for info in CATALOG {
            assert!(seen.insert(info.mnemonic), "duplicate {}", info.mnemonic_str());
        }
        assert_eq!(CATALOG.len(), 84);
    }

    #[test]
    fn test_catalog_ranges_ordered() {
        for info in CATALOG {
            let ok = match info.parameter {
                ParameterKind::U8 { min, max } => min <= max,
                ParameterKind::U16 { min, max } => min <= max,
                ParameterKind::U32 { min, max } => min <= max,
                ParameterKind::U64 { min, max } => min <= max,
                _ => true,
            };
            assert!(ok, "bad range for {}", info.mnemonic_str());
        }
    }

    #[test]
    fn test_lookup() {
        let info = lookup(b"NI").unwrap();
        assert_eq!(info.name, "Node Identifier");
        assert_eq!(info.group, CommandGroup::Addressing);
        assert!(lookup(b"ZZ").is_none());
        assert!(lookup(b"N").is_none());
    }

    #[test]
    fn test_clamp_to_bounds() {
        let mut buf = Vec::new();
        u16_range(0x0001, 0xFFFF).encode_into(&ParameterValue::U16(0), &mut buf);
        assert_eq!(buf, vec![0x00, 0x01]);

        let mut buf = Vec::new();
        u8_range(0, 0x1E).encode_into(&ParameterValue::U8(0xFF), &mut buf);
        assert_eq!(buf, vec![0x1E]);

        let mut buf = Vec::new();
        u16_range(0x02, 0x028F).encode_into(&ParameterValue::U16(0x1234), &mut buf);
        assert_eq!(buf, vec![0x02, 0x8F]);
    }

    #[test]
    fn test_text_truncated_by_characters() {
        let mut buf = Vec::new();
        let kind = ParameterKind::Text { max_len: 3 };
        kind.encode_into(&ParameterValue::Text("héllo".to_string()), &mut buf);
        assert_eq!(buf, "hél".as_bytes());
    }

    #[test]
    fn test_decode_short_registers() {
        assert_eq!(
            ANY_U32.decode(&[0x12, 0x34]),
            Some(ParameterValue::U32(0x1234))
        );
        assert_eq!(ANY_U8.decode(&[0x12, 0x34]), None);
        assert_eq!(Bool.decode(&[0x01]), Some(ParameterValue::Bool(true)));
        assert_eq!(ReadOnly.decode(&[0x01]), None);
        assert_eq!(
            ParameterKind::Text { max_len: 20 }.decode(b"XBee"),
            Some(ParameterValue::Text("XBee".to_string()))
        );
    }
}
