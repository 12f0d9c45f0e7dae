//! A session with one radio over a [`Transport`].
//!
//! Each send or read owns the transport for its whole duration. Reads pull
//! bytes until the accumulator yields a checksum-valid frame, the transport
//! fails, or an optional deadline passes.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use xbee_api::*;

use crate::error::*;
use crate::transport::Transport;

/// Pause between polls when the transport has nothing to read.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// An XBee radio in API mode.
pub struct XBee<T: Transport> {
    transport: T,
    accumulator: FrameAccumulator,
    poll_interval: Duration,
}

impl<T: Transport> XBee<T> {
    /// Start a session over `transport`.
    pub fn new(transport: T) -> Self {
        XBee {
            transport,
            accumulator: FrameAccumulator::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Change how long to wait between empty reads.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// End the session and return the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Drop any partially received frame.
    pub fn clear_input(&mut self) {
        self.accumulator.reset();
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Send a local AT command. Written values are clamped to the command's range.
    pub fn send_at_command(&mut self, command: &AtCommand, frame_id: FrameId) -> SerialResult<()> {
        log::debug!("-> {} (frame id {})", command, frame_id.0);
        let wire = encode_command(command, frame_id)?;
        self.write(&wire)
    }

    /// Send `message` to a remote radio with default radius and options.
    pub fn send_transmit_request(
        &mut self,
        destination: DeviceAddress,
        network: NetworkAddress,
        message: &[u8],
    ) -> SerialResult<()> {
        let request = TransmitRequest {
            network,
            ..TransmitRequest::new(destination, message)
        };
        self.send_frame(&request.into())
    }

    /// Send any API frame.
    pub fn send_frame(&mut self, frame: &ApiFrame) -> SerialResult<()> {
        log::debug!("-> {:?} frame", frame.frame_type());
        let wire = Frame::encode(&frame.encode())?;
        self.write(&wire)
    }

    fn write(&mut self, wire: &[u8]) -> SerialResult<()> {
        log::trace!("tx {} bytes: {:02X?}", wire.len(), wire);
        self.transport.write_all(wire).map_err(map_io)
    }

    // ========================================================================
    // Receiving
    // ========================================================================

    /// Wait for the next frame, however long it takes.
    pub fn read_frame(&mut self) -> SerialResult<ApiFrame> {
        self.read_until(None)
    }

    /// Wait up to `timeout` for the next frame.
    pub fn read_frame_timeout(&mut self, timeout: Duration) -> SerialResult<ApiFrame> {
        self.read_until(Some(timeout))
    }

    /// Wait for an AT command response.
    pub fn read_at_command_response(&mut self) -> SerialResult<AtCommandResponse> {
        match self.read_frame()? {
            ApiFrame::AtCommandResponse(response) => Ok(response),
            other => Err(unexpected(FrameType::AtCommandResponse, &other)),
        }
    }

    /// Wait for the status of a transmit request.
    pub fn read_transmit_status(&mut self) -> SerialResult<TransmitStatus> {
        match self.read_frame()? {
            ApiFrame::TransmitStatus(status) => Ok(status),
            other => Err(unexpected(FrameType::TransmitStatus, &other)),
        }
    }

    /// Wait up to `max_timeout` for data from another node.
    pub fn read_receive_packet(&mut self, max_timeout: Duration) -> SerialResult<ReceivePacket> {
        match self.read_frame_timeout(max_timeout)? {
            ApiFrame::ReceivePacket(packet) => Ok(packet),
            other => Err(unexpected(FrameType::ReceivePacket, &other)),
        }
    }

    /// Send an AT command and wait for its response.
    pub fn query(&mut self, command: &AtCommand) -> SerialResult<AtCommandResponse> {
        self.send_at_command(command, FrameId::ACK)?;
        self.read_at_command_response()
    }

    fn read_until(&mut self, timeout: Option<Duration>) -> SerialResult<ApiFrame> {
        let deadline = timeout.map(|t| Instant::now() + t);

        loop {
            if let Some(raw) = self.accumulator.try_frame()? {
                let frame = Frame::decode(&raw)?;
                log::debug!("<- {:?} frame", frame.frame_type());
                return Ok(frame);
            }

            if let (Some(deadline), Some(timeout)) = (deadline, timeout) {
                if Instant::now() >= deadline {
                    return Err(SerialError::Timeout(timeout));
                }
            }

            let chunk = self.transport.read_available().map_err(map_io)?;
            if chunk.is_empty() {
                thread::sleep(self.poll_interval);
                continue;
            }
            self.accumulator.push(&chunk);
        }
    }
}

fn map_io(err: io::Error) -> SerialError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => SerialError::Disconnected,
        _ => SerialError::Io(err),
    }
}

fn unexpected(expected: FrameType, frame: &ApiFrame) -> SerialError {
    log::warn!("expected {:?}, got {:?}", expected, frame.frame_type());
    ProtocolError::UnexpectedFrameType {
        expected: expected.into(),
        actual: frame.frame_type().into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn test_send_at_command_writes_frame() {
        let mut xbee = XBee::new(MockTransport::new());
        let cmd = AtCommand::Addressing(Addressing::NodeIdentifier(Action::Read));
        xbee.send_at_command(&cmd, FrameId(0x01)).unwrap();

        assert_eq!(
            xbee.transport().written(),
            &[vec![0x7E, 0x00, 0x04, 0x08, 0x01, 0x4E, 0x49, 0x5F]]
        );
    }

    #[test]
    fn test_disconnect_reported() {
        let mut xbee = XBee::new(MockTransport::new());
        assert!(matches!(xbee.read_frame(), Err(SerialError::Disconnected)));
    }

    #[test]
    fn test_timeout_reported() {
        let mut xbee = XBee::new(MockTransport::new().hold_open())
            .with_poll_interval(Duration::from_millis(1));
        let result = xbee.read_frame_timeout(Duration::from_millis(20));
        assert!(matches!(result, Err(SerialError::Timeout(_))));
    }
}
