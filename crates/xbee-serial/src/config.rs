//! Serial line configuration.
//!
//! Settings can be loaded from YAML:
//!
//! ```yaml
//! port: /dev/ttyUSB0
//! baud_rate: 9600
//! parity: none
//! ```
//!
//! Missing fields take the radio's factory defaults (9600 8N1).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::*;

/// Default serial device.
pub const DEFAULT_PORT: &str = "/dev/ttyS0";
/// Factory default baud rate (`BD=3`).
pub const DEFAULT_BAUD_RATE: u32 = 9600;
/// How long a single read blocks before reporting no data.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;

/// Parity setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

impl From<Parity> for serialport::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        }
    }
}

/// Serial port settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path or COM port name.
    pub port: String,
    pub baud_rate: u32,
    /// 5 to 8.
    pub data_bits: u8,
    pub parity: Parity,
    /// 1 or 2.
    pub stop_bits: u8,
    /// Per-read blocking timeout in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    /// Parse settings from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> SerialResult<Self> {
        let config: SerialConfig = serde_yaml::from_str(yaml)
            .map_err(|e| SerialError::Config(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> SerialResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("loaded serial config from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Serialize settings to YAML.
    pub fn to_yaml(&self) -> SerialResult<String> {
        serde_yaml::to_string(self).map_err(|e| SerialError::Config(e.to_string()))
    }

    /// Check that every field is something the serial driver accepts.
    pub fn validate(&self) -> SerialResult<()> {
        if self.port.is_empty() {
            return Err(SerialError::Config("port must not be empty".into()));
        }
        if self.baud_rate == 0 {
            return Err(SerialError::Config("baud rate must be non-zero".into()));
        }
        self.serial_data_bits()?;
        self.serial_stop_bits()?;
        Ok(())
    }

    /// Per-read blocking timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub(crate) fn serial_data_bits(&self) -> SerialResult<serialport::DataBits> {
        match self.data_bits {
            5 => Ok(serialport::DataBits::Five),
            6 => Ok(serialport::DataBits::Six),
            7 => Ok(serialport::DataBits::Seven),
            8 => Ok(serialport::DataBits::Eight),
            other => Err(SerialError::Config(format!("unsupported data bits: {}", other))),
        }
    }

    pub(crate) fn serial_stop_bits(&self) -> SerialResult<serialport::StopBits> {
        match self.stop_bits {
            1 => Ok(serialport::StopBits::One),
            2 => Ok(serialport::StopBits::Two),
            other => Err(SerialError::Config(format!("unsupported stop bits: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_9600_8n1() {
        let config = SerialConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.data_bits, 8);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = SerialConfig::from_yaml_str("port: /dev/ttyUSB1\nbaud_rate: 115200\n").unwrap();
        assert_eq!(config.port, "/dev/ttyUSB1");
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.stop_bits, 1);
        assert_eq!(config.read_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn test_yaml_parity() {
        let config = SerialConfig::from_yaml_str("parity: even\nstop_bits: 2\n").unwrap();
        assert_eq!(config.parity, Parity::Even);
        assert_eq!(config.serial_stop_bits().unwrap(), serialport::StopBits::Two);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SerialConfig::from_yaml_str("data_bits: 9\n"),
            Err(SerialError::Config(_))
        ));
        assert!(matches!(
            SerialConfig::from_yaml_str("stop_bits: 3\n"),
            Err(SerialError::Config(_))
        ));
        assert!(matches!(
            SerialConfig::from_yaml_str("parity: [1, 2]\n"),
            Err(SerialError::Config(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = SerialConfig {
            port: "COM3".into(),
            parity: Parity::Odd,
            ..SerialConfig::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SerialConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_from_yaml_file() {
        let path = std::env::temp_dir().join(format!("xbee-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "port: /dev/ttyAMA0\n").unwrap();

        let config = SerialConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.port, "/dev/ttyAMA0");

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            SerialConfig::from_yaml_file(&path),
            Err(SerialError::Io(_))
        ));
    }
}
