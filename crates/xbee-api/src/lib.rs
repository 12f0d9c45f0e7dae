//! XBee API Frame Protocol
//!
//! This crate provides types and utilities for talking to XBee ZigBee radios
//! running API firmware in escaped mode (`AP=2`). The radio's serial interface
//! exchanges binary frames; each frame carries one typed payload.
//!
//! # Protocol Overview
//!
//! A frame is a start delimiter, a big-endian length, the payload and an
//! additive checksum. Everything after the delimiter is byte-stuffed so that
//! the delimiter, escape and software flow-control bytes never appear bare.
//!
//! - **Requests** (host → radio): AT commands (`0x08`) and transmit requests (`0x10`)
//! - **Responses** (radio → host): AT command responses (`0x88`), transmit
//!   status (`0x8B`) and received packets (`0x90`)
//!
//! AT commands are addressed by two-letter mnemonics. [`CATALOG`] lists every
//! supported mnemonic with its parameter type and valid range; written values
//! are clamped into range before encoding.
//!
//! # Example
//!
//! ```rust,ignore
//! use xbee_api::{Action, Addressing, AtCommand, FrameAccumulator, FrameId, Frame};
//!
//! // Build a command
//! let cmd = AtCommand::Addressing(Addressing::NodeIdentifier(Action::Read));
//! let bytes = xbee_api::encode_command(&cmd, FrameId::ACK)?;
//!
//! // Parse a response
//! let mut accumulator = FrameAccumulator::new();
//! accumulator.push(&received_data);
//! if let Some(raw) = accumulator.try_frame()? {
//!     let frame = Frame::decode(&raw)?;
//! }
//! ```

mod address;
mod catalog;
pub mod checksum;
mod commands;
mod constants;
mod error;
pub mod escape;
mod frame;
mod frames;
mod length;
mod types;

pub use address::*;
pub use catalog::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use escape::{escape, unescape, Unescaper};
pub use frame::*;
pub use frames::*;
pub use length::*;
pub use types::*;
