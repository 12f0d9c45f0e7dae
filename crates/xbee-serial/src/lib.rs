//! XBee serial session.
//!
//! Connects the frame codec in `xbee_api` to a byte transport: a real serial
//! port through `serialport`, or an in-memory [`MockTransport`] for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use xbee_serial::{SerialConfig, SerialTransport, XBee};
//! use xbee_api::{Action, Addressing, AtCommand};
//!
//! let transport = SerialTransport::open(&SerialConfig::default())?;
//! let mut xbee = XBee::new(transport);
//!
//! let response = xbee.query(&AtCommand::Addressing(Addressing::NodeIdentifier(Action::Read)))?;
//! println!("NI = {}", response.text());
//! ```

mod config;
mod device;
mod error;
mod transport;

pub use config::*;
pub use device::*;
pub use error::*;
pub use transport::*;
