//! AT commands that can be sent to the radio.
//!
//! Commands are grouped the way the radio's documentation groups them. Each
//! leaf either takes no parameter (a pure query) or carries an [`Action`]:
//! read the current register value, or write a new one. Written numbers are
//! clamped to the range listed in [`crate::catalog::CATALOG`].

use std::fmt;

use crate::catalog::*;
use crate::constants::*;
use crate::error::*;

/// Read the register, or write a new value to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<T> {
    /// Query the current value.
    Read,
    /// Set a new value.
    Write(T),
}

impl<T> Action<T> {
    /// The value being written, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Action::Read => None,
            Action::Write(value) => Some(value),
        }
    }
}

impl<T: Clone + Into<ParameterValue>> Action<T> {
    fn parameter(&self) -> Option<ParameterValue> {
        self.value().cloned().map(Into::into)
    }
}

// ============================================================================
// Networking
// ============================================================================

/// Network formation and joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Networking {
    /// `ID` extended PAN ID. Zero lets a router join any PAN.
    PanId(Action<u64>),
    /// `SC` scan channels bitfield, 0x0001-0xFFFF.
    ScanChannels(Action<u16>),
    /// `SD` scan duration exponent, 0-7.
    ScanDuration(Action<u8>),
    /// `ZS` stack profile: network specific, ZigBee-2006 or ZigBee-PRO.
    StackProfile(Action<u8>),
    /// `NJ` seconds joining is allowed; 0xFF allows it forever.
    NodeJoinTime(Action<u8>),
    /// `NW` network watchdog timeout in minutes, up to 0x64FF.
    NetworkWatchdogTimeout(Action<u16>),
    /// `JV` verify a coordinator exists on the channel after joining.
    ChannelVerification(Action<bool>),
    /// `JN` broadcast a node identification frame on join.
    JoinNotification(Action<bool>),
    /// `OP` operating 64-bit PAN ID.
    OperatingPanId,
    /// `OI` operating 16-bit PAN ID.
    OperatingPanId16,
    /// `CH` operating channel.
    OperatingChannel,
    /// `NC` end device children that can still join.
    RemainingChildren,
    /// `CE` act as coordinator.
    CoordinatorEnable(Action<bool>),
    /// `DO` device options bitfield.
    DeviceOptions(Action<u8>),
    /// `DC` device controls bitfield.
    DeviceControls(Action<u16>),
}

impl Networking {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            Networking::PanId(_) => *b"ID",
            Networking::ScanChannels(_) => *b"SC",
            Networking::ScanDuration(_) => *b"SD",
            Networking::StackProfile(_) => *b"ZS",
            Networking::NodeJoinTime(_) => *b"NJ",
            Networking::NetworkWatchdogTimeout(_) => *b"NW",
            Networking::ChannelVerification(_) => *b"JV",
            Networking::JoinNotification(_) => *b"JN",
            Networking::OperatingPanId => *b"OP",
            Networking::OperatingPanId16 => *b"OI",
            Networking::OperatingChannel => *b"CH",
            Networking::RemainingChildren => *b"NC",
            Networking::CoordinatorEnable(_) => *b"CE",
            Networking::DeviceOptions(_) => *b"DO",
            Networking::DeviceControls(_) => *b"DC",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            Networking::PanId(a) => a.parameter(),
            Networking::ScanChannels(a) => a.parameter(),
            Networking::ScanDuration(a) => a.parameter(),
            Networking::StackProfile(a) => a.parameter(),
            Networking::NodeJoinTime(a) => a.parameter(),
            Networking::NetworkWatchdogTimeout(a) => a.parameter(),
            Networking::ChannelVerification(a) => a.parameter(),
            Networking::JoinNotification(a) => a.parameter(),
            Networking::CoordinatorEnable(a) => a.parameter(),
            Networking::DeviceOptions(a) => a.parameter(),
            Networking::DeviceControls(a) => a.parameter(),
            Networking::OperatingPanId
            | Networking::OperatingPanId16
            | Networking::OperatingChannel
            | Networking::RemainingChildren => None,
        }
    }
}

// ============================================================================
// Addressing
// ============================================================================

/// Device and destination addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressing {
    /// `SH` high 32 bits of the 64-bit address.
    SerialNumberHigh,
    /// `SL` low 32 bits of the 64-bit address.
    SerialNumberLow,
    /// `MY` own 16-bit network address; 0xFFFE until joined.
    NetworkAddress,
    /// `MP` parent's 16-bit network address.
    ParentAddress,
    /// `DH` upper 32 bits of the destination address.
    DestinationHigh(Action<u32>),
    /// `DL` lower 32 bits of the destination address.
    DestinationLow(Action<u32>),
    /// `NI` node identifier, up to 20 characters.
    NodeIdentifier(Action<String>),
    /// `NH` maximum unicast hops.
    MaxHops(Action<u8>),
    /// `BH` broadcast radius, up to 0x1E; zero means maximum.
    BroadcastRadius(Action<u8>),
    /// `AR` many-to-one route broadcast time; 0xFF disables.
    ManyToOneRouteBroadcastTime(Action<u8>),
    /// `DD` device type identifier.
    DeviceTypeIdentifier(Action<u32>),
    /// `NT` node discovery backoff, at least 0x20.
    NodeDiscoveryBackoff(Action<u8>),
    /// `NO` node discovery options, 0-3.
    NodeDiscoveryOptions(Action<u8>),
    /// `NP` maximum RF payload bytes.
    MaxPayloadBytes,
    /// `CR` PAN conflict threshold, up to 0x3F.
    PanConflictThreshold(Action<u8>),
}

impl Addressing {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            Addressing::SerialNumberHigh => *b"SH",
            Addressing::SerialNumberLow => *b"SL",
            Addressing::NetworkAddress => *b"MY",
            Addressing::ParentAddress => *b"MP",
            Addressing::DestinationHigh(_) => *b"DH",
            Addressing::DestinationLow(_) => *b"DL",
            Addressing::NodeIdentifier(_) => *b"NI",
            Addressing::MaxHops(_) => *b"NH",
            Addressing::BroadcastRadius(_) => *b"BH",
            Addressing::ManyToOneRouteBroadcastTime(_) => *b"AR",
            Addressing::DeviceTypeIdentifier(_) => *b"DD",
            Addressing::NodeDiscoveryBackoff(_) => *b"NT",
            Addressing::NodeDiscoveryOptions(_) => *b"NO",
            Addressing::MaxPayloadBytes => *b"NP",
            Addressing::PanConflictThreshold(_) => *b"CR",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            Addressing::DestinationHigh(a) => a.parameter(),
            Addressing::DestinationLow(a) => a.parameter(),
            Addressing::NodeIdentifier(a) => a.parameter(),
            Addressing::MaxHops(a) => a.parameter(),
            Addressing::BroadcastRadius(a) => a.parameter(),
            Addressing::ManyToOneRouteBroadcastTime(a) => a.parameter(),
            Addressing::DeviceTypeIdentifier(a) => a.parameter(),
            Addressing::NodeDiscoveryBackoff(a) => a.parameter(),
            Addressing::NodeDiscoveryOptions(a) => a.parameter(),
            Addressing::PanConflictThreshold(a) => a.parameter(),
            Addressing::SerialNumberHigh
            | Addressing::SerialNumberLow
            | Addressing::NetworkAddress
            | Addressing::ParentAddress
            | Addressing::MaxPayloadBytes => None,
        }
    }
}

// ============================================================================
// ZigBee Addressing
// ============================================================================

/// ZigBee application-layer addressing for transparent mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZigBeeAddressing {
    /// `SE` source endpoint.
    SourceEndpoint(Action<u8>),
    /// `DE` destination endpoint.
    DestinationEndpoint(Action<u8>),
    /// `CI` cluster ID.
    ClusterId(Action<u16>),
    /// `TO` transmit options.
    TransmitOptions(Action<u8>),
}

impl ZigBeeAddressing {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            ZigBeeAddressing::SourceEndpoint(_) => *b"SE",
            ZigBeeAddressing::DestinationEndpoint(_) => *b"DE",
            ZigBeeAddressing::ClusterId(_) => *b"CI",
            ZigBeeAddressing::TransmitOptions(_) => *b"TO",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            ZigBeeAddressing::SourceEndpoint(a) => a.parameter(),
            ZigBeeAddressing::DestinationEndpoint(a) => a.parameter(),
            ZigBeeAddressing::ClusterId(a) => a.parameter(),
            ZigBeeAddressing::TransmitOptions(a) => a.parameter(),
        }
    }
}

// ============================================================================
// RF Interfacing
// ============================================================================

/// Transmitter power.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RfInterfacing {
    /// `PL` power level, 0-4.
    PowerLevel(Action<u8>),
    /// `PM` boost mode.
    PowerMode(Action<bool>),
    /// `PP` output power at PL4, in dBm.
    PowerAtPl4,
}

impl RfInterfacing {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            RfInterfacing::PowerLevel(_) => *b"PL",
            RfInterfacing::PowerMode(_) => *b"PM",
            RfInterfacing::PowerAtPl4 => *b"PP",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            RfInterfacing::PowerLevel(a) => a.parameter(),
            RfInterfacing::PowerMode(a) => a.parameter(),
            RfInterfacing::PowerAtPl4 => None,
        }
    }
}

// ============================================================================
// Security
// ============================================================================

/// Encryption settings. Keys are write-only on the radio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Security {
    /// `EE` encryption enable.
    EncryptionEnable(Action<bool>),
    /// `EO` encryption options bitfield.
    EncryptionOptions(Action<u8>),
    /// `KY` trust center link key.
    LinkKey(Action<u32>),
    /// `NK` network key; zero lets the coordinator pick one.
    NetworkKey(Action<u32>),
}

impl Security {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            Security::EncryptionEnable(_) => *b"EE",
            Security::EncryptionOptions(_) => *b"EO",
            Security::LinkKey(_) => *b"KY",
            Security::NetworkKey(_) => *b"NK",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            Security::EncryptionEnable(a) => a.parameter(),
            Security::EncryptionOptions(a) => a.parameter(),
            Security::LinkKey(a) => a.parameter(),
            Security::NetworkKey(a) => a.parameter(),
        }
    }
}

// ============================================================================
// Serial Interfacing
// ============================================================================

/// UART and API mode settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialInterfacing {
    /// `BD` baud rate index, 0-8.
    BaudRate(Action<u8>),
    /// `NB` parity, 0-3.
    Parity(Action<u8>),
    /// `SB` stop bits, 0-1.
    StopBits(Action<u8>),
    /// `RO` packetization timeout in character times.
    PacketizationTimeout(Action<u8>),
    /// `D6` DIO6/nRTS configuration, 0-5.
    Dio6Configuration(Action<u8>),
    /// `D7` DIO7/nCTS configuration, 0-7.
    Dio7Configuration(Action<u8>),
    /// `AP` API enable, 0-2.
    ApiEnable(Action<u8>),
    /// `AO` API output mode, up to 0x0B.
    ApiOutputMode(Action<u8>),
}

impl SerialInterfacing {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            SerialInterfacing::BaudRate(_) => *b"BD",
            SerialInterfacing::Parity(_) => *b"NB",
            SerialInterfacing::StopBits(_) => *b"SB",
            SerialInterfacing::PacketizationTimeout(_) => *b"RO",
            SerialInterfacing::Dio6Configuration(_) => *b"D6",
            SerialInterfacing::Dio7Configuration(_) => *b"D7",
            SerialInterfacing::ApiEnable(_) => *b"AP",
            SerialInterfacing::ApiOutputMode(_) => *b"AO",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            SerialInterfacing::BaudRate(a) => a.parameter(),
            SerialInterfacing::Parity(a) => a.parameter(),
            SerialInterfacing::StopBits(a) => a.parameter(),
            SerialInterfacing::PacketizationTimeout(a) => a.parameter(),
            SerialInterfacing::Dio6Configuration(a) => a.parameter(),
            SerialInterfacing::Dio7Configuration(a) => a.parameter(),
            SerialInterfacing::ApiEnable(a) => a.parameter(),
            SerialInterfacing::ApiOutputMode(a) => a.parameter(),
        }
    }
}

// ============================================================================
// AT Command Options
// ============================================================================

/// Transparent-mode command sequence behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtCommandOptions {
    /// `CT` command mode timeout, 0x02-0x028F.
    CommandModeTimeout(Action<u16>),
    /// `GT` guard times, 0x01-0x0CE4.
    GuardTimes(Action<u16>),
    /// `CC` command sequence character, `+` by default.
    CommandSequenceCharacter(Action<u8>),
}

impl AtCommandOptions {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            AtCommandOptions::CommandModeTimeout(_) => *b"CT",
            AtCommandOptions::GuardTimes(_) => *b"GT",
            AtCommandOptions::CommandSequenceCharacter(_) => *b"CC",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            AtCommandOptions::CommandModeTimeout(a) => a.parameter(),
            AtCommandOptions::GuardTimes(a) => a.parameter(),
            AtCommandOptions::CommandSequenceCharacter(a) => a.parameter(),
        }
    }
}

// ============================================================================
// Sleep Modes
// ============================================================================

/// End device sleep behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SleepModes {
    /// `SP` cyclic sleep period, 0x20-0x0AF0.
    CyclicSleepPeriod(Action<u16>),
    /// `SN` number of cyclic sleep periods, at least 1.
    NumberOfSleepPeriods(Action<u16>),
    /// `SM` sleep mode, 0-5.
    SleepMode(Action<u8>),
    /// `ST` time before sleep, 0x0001-0xFFFE.
    TimeBeforeSleep(Action<u16>),
    /// `SO` sleep options bitfield.
    SleepOptions(Action<u8>),
    /// `WH` wake host delay.
    WakeHost(Action<u16>),
    /// `PO` poll rate, up to 0x03E8.
    PollRate(Action<u16>),
}

impl SleepModes {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            SleepModes::CyclicSleepPeriod(_) => *b"SP",
            SleepModes::NumberOfSleepPeriods(_) => *b"SN",
            SleepModes::SleepMode(_) => *b"SM",
            SleepModes::TimeBeforeSleep(_) => *b"ST",
            SleepModes::SleepOptions(_) => *b"SO",
            SleepModes::WakeHost(_) => *b"WH",
            SleepModes::PollRate(_) => *b"PO",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            SleepModes::CyclicSleepPeriod(a) => a.parameter(),
            SleepModes::NumberOfSleepPeriods(a) => a.parameter(),
            SleepModes::SleepMode(a) => a.parameter(),
            SleepModes::TimeBeforeSleep(a) => a.parameter(),
            SleepModes::SleepOptions(a) => a.parameter(),
            SleepModes::WakeHost(a) => a.parameter(),
            SleepModes::PollRate(a) => a.parameter(),
        }
    }
}

// ============================================================================
// IO Settings
// ============================================================================

/// Pin configuration. Each pin setting takes 0-5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoSettings {
    /// `D0` DIO0/AD0/commissioning button.
    Dio0(Action<u8>),
    /// `D1` DIO1/AD1/nSPI_ATTN.
    Dio1(Action<u8>),
    /// `D2` DIO2/AD2/SPI_SCLK.
    Dio2(Action<u8>),
    /// `D3` DIO3/AD3/nSPI_SSEL.
    Dio3(Action<u8>),
    /// `D4` DIO4/SPI_MOSI.
    Dio4(Action<u8>),
    /// `D5` DIO5/Associate LED.
    Dio5(Action<u8>),
    /// `D8` DIO8/nDTR/Sleep_Rq.
    Dio8(Action<u8>),
    /// `D9` DIO9/nOn_Sleep.
    Dio9(Action<u8>),
    /// `P0` DIO10/RSSI PWM.
    Dio10(Action<u8>),
    /// `P1` DIO11/PWM1.
    Dio11(Action<u8>),
    /// `P2` DIO12/SPI_MISO.
    Dio12(Action<u8>),
    /// `P3` DIO13/DOUT.
    Dio13(Action<u8>),
    /// `P4` DIO14/DIN/nConfig.
    Dio14(Action<u8>),
    /// `PR` pull-up resistor bitfield, up to 0x7FFF.
    PullUpResistor(Action<u16>),
    /// `PD` pull direction bitfield, up to 0x7FFF.
    PullDirection(Action<u16>),
    /// `LT` associate LED blink time, at least 0x0A.
    AssociateLedBlinkTime(Action<u8>),
    /// `RP` RSSI PWM timer.
    RssiPwmTimer(Action<u8>),
}

impl IoSettings {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            IoSettings::Dio0(_) => *b"D0",
            IoSettings::Dio1(_) => *b"D1",
            IoSettings::Dio2(_) => *b"D2",
            IoSettings::Dio3(_) => *b"D3",
            IoSettings::Dio4(_) => *b"D4",
            IoSettings::Dio5(_) => *b"D5",
            IoSettings::Dio8(_) => *b"D8",
            IoSettings::Dio9(_) => *b"D9",
            IoSettings::Dio10(_) => *b"P0",
            IoSettings::Dio11(_) => *b"P1",
            IoSettings::Dio12(_) => *b"P2",
            IoSettings::Dio13(_) => *b"P3",
            IoSettings::Dio14(_) => *b"P4",
            IoSettings::PullUpResistor(_) => *b"PR",
            IoSettings::PullDirection(_) => *b"PD",
            IoSettings::AssociateLedBlinkTime(_) => *b"LT",
            IoSettings::RssiPwmTimer(_) => *b"RP",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            IoSettings::Dio0(a)
            | IoSettings::Dio1(a)
            | IoSettings::Dio2(a)
            | IoSettings::Dio3(a)
            | IoSettings::Dio4(a)
            | IoSettings::Dio5(a)
            | IoSettings::Dio8(a)
            | IoSettings::Dio9(a)
            | IoSettings::Dio10(a)
            | IoSettings::Dio11(a)
            | IoSettings::Dio12(a)
            | IoSettings::Dio13(a)
            | IoSettings::Dio14(a)
            | IoSettings::AssociateLedBlinkTime(a)
            | IoSettings::RssiPwmTimer(a) => a.parameter(),
            IoSettings::PullUpResistor(a) | IoSettings::PullDirection(a) => a.parameter(),
        }
    }
}

// ============================================================================
// IO Sampling
// ============================================================================

/// Periodic and change-driven IO sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoSampling {
    /// `IR` sampling rate in ms, at least 0x32.
    SamplingRate(Action<u16>),
    /// `IC` digital change detection bitfield.
    ChangeDetection(Action<u16>),
    /// `V+` supply voltage high threshold.
    SupplyVoltageThreshold(Action<u16>),
}

impl IoSampling {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            IoSampling::SamplingRate(_) => *b"IR",
            IoSampling::ChangeDetection(_) => *b"IC",
            IoSampling::SupplyVoltageThreshold(_) => *b"V+",
        }
    }

    fn parameter(&self) -> Option<ParameterValue> {
        match self {
            IoSampling::SamplingRate(a)
            | IoSampling::ChangeDetection(a)
            | IoSampling::SupplyVoltageThreshold(a) => a.parameter(),
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Read-only diagnostic registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    /// `VR` firmware version.
    FirmwareVersion,
    /// `HV` hardware version.
    HardwareVersion,
    /// `AI` association indication.
    AssociationIndication,
    /// `DB` RSSI of the last received packet.
    LastPacketRssi,
    /// `%V` supply voltage in mV.
    SupplyVoltage,
}

impl Diagnostics {
    fn mnemonic(&self) -> Mnemonic {
        match self {
            Diagnostics::FirmwareVersion => *b"VR",
            Diagnostics::HardwareVersion => *b"HV",
            Diagnostics::AssociationIndication => *b"AI",
            Diagnostics::LastPacketRssi => *b"DB",
            Diagnostics::SupplyVoltage => *b"%V",
        }
    }
}

// ============================================================================
// AT Command
// ============================================================================

/// Any AT command in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtCommand {
    Networking(Networking),
    Addressing(Addressing),
    ZigBeeAddressing(ZigBeeAddressing),
    RfInterfacing(RfInterfacing),
    Security(Security),
    SerialInterfacing(SerialInterfacing),
    AtCommandOptions(AtCommandOptions),
    SleepModes(SleepModes),
    IoSettings(IoSettings),
    IoSampling(IoSampling),
    Diagnostics(Diagnostics),
}

impl AtCommand {
    /// The command's two-letter mnemonic.
    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            AtCommand::Networking(c) => c.mnemonic(),
            AtCommand::Addressing(c) => c.mnemonic(),
            AtCommand::ZigBeeAddressing(c) => c.mnemonic(),
            AtCommand::RfInterfacing(c) => c.mnemonic(),
            AtCommand::Security(c) => c.mnemonic(),
            AtCommand::SerialInterfacing(c) => c.mnemonic(),
            AtCommand::AtCommandOptions(c) => c.mnemonic(),
            AtCommand::SleepModes(c) => c.mnemonic(),
            AtCommand::IoSettings(c) => c.mnemonic(),
            AtCommand::IoSampling(c) => c.mnemonic(),
            AtCommand::Diagnostics(c) => c.mnemonic(),
        }
    }

    /// The value being written, before range clamping. `None` for reads.
    pub fn parameter(&self) -> Option<ParameterValue> {
        match self {
            AtCommand::Networking(c) => c.parameter(),
            AtCommand::Addressing(c) => c.parameter(),
            AtCommand::ZigBeeAddressing(c) => c.parameter(),
            AtCommand::RfInterfacing(c) => c.parameter(),
            AtCommand::Security(c) => c.parameter(),
            AtCommand::SerialInterfacing(c) => c.parameter(),
            AtCommand::AtCommandOptions(c) => c.parameter(),
            AtCommand::SleepModes(c) => c.parameter(),
            AtCommand::IoSettings(c) => c.parameter(),
            AtCommand::IoSampling(c) => c.parameter(),
            AtCommand::Diagnostics(_) => None,
        }
    }

    /// Catalog entry for this command.
    pub fn info(&self) -> Option<&'static CommandInfo> {
        lookup(&self.mnemonic())
    }

    /// True if this command writes a value.
    pub fn is_write(&self) -> bool {
        self.parameter().is_some()
    }

    /// Encode as mnemonic followed by the clamped parameter bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mnemonic = self.mnemonic();
        let mut buf = Vec::with_capacity(MNEMONIC_SIZE + 8);
        buf.extend_from_slice(&mnemonic);

        // Every variant has a catalog entry.
        if let (Some(value), Some(info)) = (self.parameter(), self.info()) {
            info.parameter.encode_into(&value, &mut buf);
        }

        buf
    }

    /// Build the read form of the command with the given mnemonic.
    ///
    /// Returns `None` for mnemonics outside the catalog; callers should
    /// treat that as an unknown command rather than a fatal error.
    pub fn from_mnemonic(mnemonic: &[u8]) -> Option<AtCommand> {
        use Action::Read;

        let command = match mnemonic {
            // Networking
            b"ID" => AtCommand::Networking(Networking::PanId(Read)),
            b"SC" => AtCommand::Networking(Networking::ScanChannels(Read)),
            b"SD" => AtCommand::Networking(Networking::ScanDuration(Read)),
            b"ZS" => AtCommand::Networking(Networking::StackProfile(Read)),
            b"NJ" => AtCommand::Networking(Networking::NodeJoinTime(Read)),
            b"NW" => AtCommand::Networking(Networking::NetworkWatchdogTimeout(Read)),
            b"JV" => AtCommand::Networking(Networking::ChannelVerification(Read)),
            b"JN" => AtCommand::Networking(Networking::JoinNotification(Read)),
            b"OP" => AtCommand::Networking(Networking::OperatingPanId),
            b"OI" => AtCommand::Networking(Networking::OperatingPanId16),
            b"CH" => AtCommand::Networking(Networking::OperatingChannel),
            b"NC" => AtCommand::Networking(Networking::RemainingChildren),
            b"CE" => AtCommand::Networking(Networking::CoordinatorEnable(Read)),
            b"DO" => AtCommand::Networking(Networking::DeviceOptions(Read)),
            b"DC" => AtCommand::Networking(Networking::DeviceControls(Read)),
            // Addressing
            b"SH" => AtCommand::Addressing(Addressing::SerialNumberHigh),
            b"SL" => AtCommand::Addressing(Addressing::SerialNumberLow),
            b"MY" => AtCommand::Addressing(Addressing::NetworkAddress),
            b"MP" => AtCommand::Addressing(Addressing::ParentAddress),
            b"DH" => AtCommand::Addressing(Addressing::DestinationHigh(Read)),
            b"DL" => AtCommand::Addressing(Addressing::DestinationLow(Read)),
            b"NI" => AtCommand::Addressing(Addressing::NodeIdentifier(Read)),
            b"NH" => AtCommand::Addressing(Addressing::MaxHops(Read)),
            b"BH" => AtCommand::Addressing(Addressing::BroadcastRadius(Read)),
            b"AR" => AtCommand::Addressing(Addressing::ManyToOneRouteBroadcastTime(Read)),
            b"DD" => AtCommand::Addressing(Addressing::DeviceTypeIdentifier(Read)),
            b"NT" => AtCommand::Addressing(Addressing::NodeDiscoveryBackoff(Read)),
            b"NO" => AtCommand::Addressing(Addressing::NodeDiscoveryOptions(Read)),
            b"NP" => AtCommand::Addressing(Addressing::MaxPayloadBytes),
            b"CR" => AtCommand::Addressing(Addressing::PanConflictThreshold(Read)),
            // ZigBee addressing
            b"SE" => AtCommand::ZigBeeAddressing(ZigBeeAddressing::SourceEndpoint(Read)),
            b"DE" => AtCommand::ZigBeeAddressing(ZigBeeAddressing::DestinationEndpoint(Read)),
            b"CI" => AtCommand::ZigBeeAddressing(ZigBeeAddressing::ClusterId(Read)),
            b"TO" => AtCommand::ZigBeeAddressing(ZigBeeAddressing::TransmitOptions(Read)),
            // RF interfacing
            b"PL" => AtCommand::RfInterfacing(RfInterfacing::PowerLevel(Read)),
            b"PM" => AtCommand::RfInterfacing(RfInterfacing::PowerMode(Read)),
            b"PP" => AtCommand::RfInterfacing(RfInterfacing::PowerAtPl4),
            // Security
            b"EE" => AtCommand::Security(Security::EncryptionEnable(Read)),
            b"EO" => AtCommand::Security(Security::EncryptionOptions(Read)),
            b"KY" => AtCommand::Security(Security::LinkKey(Read)),
            b"NK" => AtCommand::Security(Security::NetworkKey(Read)),
            // Serial interfacing
            b"BD" => AtCommand::SerialInterfacing(SerialInterfacing::BaudRate(Read)),
            b"NB" => AtCommand::SerialInterfacing(SerialInterfacing::Parity(Read)),
            b"SB" => AtCommand::SerialInterfacing(SerialInterfacing::StopBits(Read)),
            b"RO" => AtCommand::SerialInterfacing(SerialInterfacing::PacketizationTimeout(Read)),
            b"D6" => AtCommand::SerialInterfacing(SerialInterfacing::Dio6Configuration(Read)),
            b"D7" => AtCommand::SerialInterfacing(SerialInterfacing::Dio7Configuration(Read)),
            b"AP" => AtCommand::SerialInterfacing(SerialInterfacing::ApiEnable(Read)),
            b"AO" => AtCommand::SerialInterfacing(SerialInterfacing::ApiOutputMode(Read)),
            // AT command options
            b"CT" => AtCommand::AtCommandOptions(AtCommandOptions::CommandModeTimeout(Read)),
            b"GT" => AtCommand::AtCommandOptions(AtCommandOptions::GuardTimes(Read)),
            b"CC" => AtCommand::AtCommandOptions(AtCommandOptions::CommandSequenceCharacter(Read)),
            // Sleep modes
            b"SP" => AtCommand::SleepModes(SleepModes::CyclicSleepPeriod(Read)),
            b"SN" => AtCommand::SleepModes(SleepModes::NumberOfSleepPeriods(Read)),
            b"SM" => AtCommand::SleepModes(SleepModes::SleepMode(Read)),
            b"ST" => AtCommand::SleepModes(SleepModes::TimeBeforeSleep(Read)),
            b"SO" => AtCommand::SleepModes(SleepModes::SleepOptions(Read)),
            b"WH" => AtCommand::SleepModes(SleepModes::WakeHost(Read)),
            b"PO" => AtCommand::SleepModes(SleepModes::PollRate(Read)),
            // IO settings
            b"D0" => AtCommand::IoSettings(IoSettings::Dio0(Read)),
            b"D1" => AtCommand::IoSettings(IoSettings::Dio1(Read)),
            b"D2" => AtCommand::IoSettings(IoSettings::Dio2(Read)),
            b"D3" => AtCommand::IoSettings(IoSettings::Dio3(Read)),
            b"D4" => AtCommand::IoSettings(IoSettings::Dio4(Read)),
            b"D5" => AtCommand::IoSettings(IoSettings::Dio5(Read)),
            b"D8" => AtCommand::IoSettings(IoSettings::Dio8(Read)),
            b"D9" => AtCommand::IoSettings(IoSettings::Dio9(Read)),
            b"P0" => AtCommand::IoSettings(IoSettings::Dio10(Read)),
            b"P1" => AtCommand::IoSettings(IoSettings::Dio11(Read)),
            b"P2" => AtCommand::IoSettings(IoSettings::Dio12(Read)),
            b"P3" => AtCommand::IoSettings(IoSettings::Dio13(Read)),
            b"P4" => AtCommand::IoSettings(IoSettings::Dio14(Read)),
            b"PR" => AtCommand::IoSettings(IoSettings::PullUpResistor(Read)),
            b"PD" => AtCommand::IoSettings(IoSettings::PullDirection(Read)),
            b"LT" => AtCommand::IoSettings(IoSettings::AssociateLedBlinkTime(Read)),
            b"RP" => AtCommand::IoSettings(IoSettings::RssiPwmTimer(Read)),
            // IO sampling
            b"IR" => AtCommand::IoSampling(IoSampling::SamplingRate(Read)),
            b"IC" => AtCommand::IoSampling(IoSampling::ChangeDetection(Read)),
            b"V+" => AtCommand::IoSampling(IoSampling::SupplyVoltageThreshold(Read)),
            // Diagnostics
            b"VR" => AtCommand::Diagnostics(Diagnostics::FirmwareVersion),
            b"HV" => AtCommand::Diagnostics(Diagnostics::HardwareVersion),
            b"AI" => AtCommand::Diagnostics(Diagnostics::AssociationIndication),
            b"DB" => AtCommand::Diagnostics(Diagnostics::LastPacketRssi),
            b"%V" => AtCommand::Diagnostics(Diagnostics::SupplyVoltage),
            _ => return None,
        };

        Some(command)
    }

    /// Like [`AtCommand::from_mnemonic`], but reports unknown mnemonics as an error.
    pub fn parse_mnemonic(mnemonic: &str) -> ProtocolResult<AtCommand> {
        AtCommand::from_mnemonic(mnemonic.as_bytes())
            .ok_or_else(|| ProtocolError::UnknownCommand(mnemonic.to_string()))
    }
}

impl fmt::Display for AtCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.mnemonic();
        write!(f, "AT{}", String::from_utf8_lossy(&mnemonic))?;
        if let Some(value) = self.parameter() {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}
