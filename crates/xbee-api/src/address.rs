//! 64-bit device and 16-bit network addresses.

use std::fmt;

use crate::constants::*;

/// A 64-bit IEEE extended address, stored big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceAddress(pub [u8; DEVICE_ADDRESS_SIZE]);

impl DeviceAddress {
    /// Address of the network coordinator.
    pub const COORDINATOR: DeviceAddress = DeviceAddress([0; DEVICE_ADDRESS_SIZE]);
    /// Broadcast address for the PAN.
    pub const BROADCAST: DeviceAddress = DeviceAddress([0, 0, 0, 0, 0, 0, 0xFF, 0xFF]);
    /// Reported as the source when the sender's 64-bit address is unknown.
    pub const UNKNOWN: DeviceAddress = DeviceAddress([0xFF; DEVICE_ADDRESS_SIZE]);

    /// Create an address from its numeric value.
    pub const fn new(address: u64) -> Self {
        DeviceAddress(address.to_be_bytes())
    }

    /// Create from a slice. Returns None if slice is wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; DEVICE_ADDRESS_SIZE] = slice.try_into().ok()?;
        Some(DeviceAddress(bytes))
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; DEVICE_ADDRESS_SIZE] {
        &self.0
    }

    /// Numeric value of the address.
    pub fn to_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }
}

impl From<u64> for DeviceAddress {
    fn from(address: u64) -> Self {
        DeviceAddress::new(address)
    }
}

impl AsRef<[u8]> for DeviceAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.to_u64())
    }
}

/// A 16-bit network address, stored big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NetworkAddress(pub [u8; NETWORK_ADDRESS_SIZE]);

impl NetworkAddress {
    /// Address of the network coordinator.
    pub const COORDINATOR: NetworkAddress = NetworkAddress([0x00, 0x00]);
    /// Used when the destination's network address is unknown, or for broadcasts.
    pub const UNKNOWN_OR_BROADCAST: NetworkAddress = NetworkAddress([0xFF, 0xFE]);

    /// Create an address from its numeric value.
    pub const fn new(address: u16) -> Self {
        NetworkAddress(address.to_be_bytes())
    }

    /// Create from a slice. Returns None if slice is wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; NETWORK_ADDRESS_SIZE] = slice.try_into().ok()?;
        Some(NetworkAddress(bytes))
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; NETWORK_ADDRESS_SIZE] {
        &self.0
    }

    /// Numeric value of the address.
    pub fn to_u16(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }
}

impl From<u16> for NetworkAddress {
    fn from(address: u16) -> Self {
        NetworkAddress::new(address)
    }
}

impl AsRef<[u8]> for NetworkAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.to_u16())
    }
}
