//! Byte transports between the host and the radio.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use serialport::{FlowControl, SerialPort};
use xbee_api::{Frame, ProtocolResult};

use crate::config::SerialConfig;
use crate::error::*;

/// Size of a single serial read.
const READ_BUFFER_SIZE: usize = 256;

/// Raw byte I/O used by a session.
pub trait Transport {
    /// Return whatever bytes have arrived. An empty vector means nothing is
    /// available yet; end of stream is reported as `UnexpectedEof`.
    fn read_available(&mut self) -> io::Result<Vec<u8>>;

    /// Write every byte of `data`.
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;
}

/// Names of the serial ports on this machine.
pub fn list_ports() -> SerialResult<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

// ============================================================================
// Serial Port
// ============================================================================

/// A real serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    buffer: [u8; READ_BUFFER_SIZE],
}

impl SerialTransport {
    /// Open the port described by `config`.
    pub fn open(config: &SerialConfig) -> SerialResult<Self> {
        config.validate()?;

        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(config.serial_data_bits()?)
            .parity(config.parity.into())
            .stop_bits(config.serial_stop_bits()?)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout())
            .open()?;

        log::info!("opened {} at {} baud", config.port, config.baud_rate);

        Ok(SerialTransport {
            port,
            buffer: [0; READ_BUFFER_SIZE],
        })
    }

    /// Name of the underlying port, if the driver knows it.
    pub fn name(&self) -> Option<String> {
        self.port.name()
    }
}

impl Transport for SerialTransport {
    fn read_available(&mut self) -> io::Result<Vec<u8>> {
        match self.port.read(&mut self.buffer) {
            Ok(n) => Ok(self.buffer[..n].to_vec()),
            // Timeout > nothing yet
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        Write::write_all(&mut self.port, data)?;
        self.port.flush()
    }
}

// ============================================================================
// Mock
// ============================================================================

/// In-memory transport that replays scripted chunks and records writes.
///
/// Once the script runs out it reports end of stream, unless
/// [`MockTransport::hold_open`] was set, in which case it keeps returning
/// empty reads.
#[derive(Debug, Default)]
pub struct MockTransport {
    incoming: VecDeque<Vec<u8>>,
    written: Vec<Vec<u8>>,
    hold_open: bool,
}

impl MockTransport {
    /// Create a transport with nothing to read.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the stream open after the script is exhausted.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Queue a raw chunk to be returned by one read.
    pub fn queue(&mut self, chunk: impl Into<Vec<u8>>) {
        self.incoming.push_back(chunk.into());
    }

    /// Queue a payload wrapped in a complete escaped frame.
    pub fn queue_frame(&mut self, payload: &[u8]) -> ProtocolResult<()> {
        let wire = Frame::encode(payload)?;
        self.queue(wire);
        Ok(())
    }

    /// Every write so far, one entry per call.
    pub fn written(&self) -> &[Vec<u8>] {
        &self.written
    }

    /// Number of chunks still waiting to be read.
    pub fn pending(&self) -> usize {
        self.incoming.len()
    }
}

impl Transport for MockTransport {
    fn read_available(&mut self) -> io::Result<Vec<u8>> {
        match self.incoming.pop_front() {
            Some(chunk) => Ok(chunk),
            None if self.hold_open => Ok(Vec::new()),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "mock script exhausted")),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.written.push(data.to_vec());
        Ok(())
    }
}
