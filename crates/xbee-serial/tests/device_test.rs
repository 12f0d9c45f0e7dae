//! Session tests against a scripted transport.

use std::time::Duration;

use xbee_api::*;
use xbee_serial::*;

fn transmit_status(frame_id: u8, delivery: DeliveryStatus) -> Vec<u8> {
    TransmitStatus {
        frame_id: FrameId(frame_id),
        network: NetworkAddress::new(0x1234),
        retry_count: 0,
        delivery,
        discovery: DiscoveryStatus::NoDiscoveryOverhead,
    }
    .encode()
}

#[test]
fn test_query_node_identifier() {
    let mut mock = MockTransport::new();
    mock.queue_frame(&[0x88, 0x01, b'N', b'I', 0x00, b'X', b'B', b'e', b'e'])
        .unwrap();

    let mut xbee = XBee::new(mock);
    let cmd = AtCommand::Addressing(Addressing::NodeIdentifier(Action::Read));
    let response = xbee.query(&cmd).unwrap();

    assert!(response.is_ok());
    assert_eq!(response.command(), Some(cmd));
    assert_eq!(response.text(), "XBee");
    assert_eq!(
        xbee.transport().written(),
        &[vec![0x7E, 0x00, 0x04, 0x08, 0x01, 0x4E, 0x49, 0x5F]]
    );
}

#[test]
fn test_write_without_response() {
    let mut xbee = XBee::new(MockTransport::new());
    let cmd = AtCommand::Addressing(Addressing::NodeIdentifier(Action::Write(
        "XBee Test".to_string(),
    )));
    xbee.send_at_command(&cmd, FrameId::NO_ACK).unwrap();

    let written = &xbee.transport().written()[0];
    let payload = Frame::parse(&unescape(written)).unwrap().to_vec();
    assert_eq!(payload[1], 0x00);
    assert_eq!(&payload[2..], b"NIXBee Test");
}

#[test]
fn test_transmit_and_status() {
    let mut mock = MockTransport::new();
    mock.queue_frame(&transmit_status(0x01, DeliveryStatus::Success))
        .unwrap();

    let mut xbee = XBee::new(mock);
    xbee.send_transmit_request(
        DeviceAddress::new(0x0013_A200_1234_5678),
        NetworkAddress::UNKNOWN_OR_BROADCAST,
        b"This is my message to send!",
    )
    .unwrap();

    let status = xbee.read_transmit_status().unwrap();
    assert_eq!(status.frame_id, FrameId(0x01));
    assert!(status.is_success());

    let raw = unescape(&xbee.transport().written()[0]);
    match Frame::decode(&raw).unwrap() {
        ApiFrame::TransmitRequest(request) => {
            assert_eq!(request.destination.to_u64(), 0x0013_A200_1234_5678);
            assert_eq!(request.network, NetworkAddress::UNKNOWN_OR_BROADCAST);
            assert_eq!(request.data, b"This is my message to send!");
        }
        other => panic!("expected transmit request, got {:?}", other),
    }
}

#[test]
fn test_frame_split_across_many_reads() {
    let wire = Frame::encode(&transmit_status(0x07, DeliveryStatus::RouteNotFound)).unwrap();

    let mut mock = MockTransport::new();
    for byte in &wire {
        mock.queue(vec![*byte]);
    }

    let mut xbee = XBee::new(mock);
    let status = xbee.read_transmit_status().unwrap();
    assert_eq!(status.frame_id, FrameId(0x07));
    assert_eq!(status.delivery, DeliveryStatus::RouteNotFound);
    assert_eq!(xbee.transport().pending(), 0);
}

#[test]
fn test_receive_packet_with_empty_polls() {
    let packet = ReceivePacket {
        source: DeviceAddress::new(0x0013_A200_4052_2BAA),
        network: NetworkAddress::new(0x7D84),
        options: ReceiveOptions(0x01),
        data: b"RxData".to_vec(),
    };
    let wire = Frame::encode(&packet.encode()).unwrap();
    let (head, tail) = wire.split_at(wire.len() / 2);

    let mut mock = MockTransport::new().hold_open();
    mock.queue(head.to_vec());
    mock.queue(Vec::new());
    mock.queue(tail.to_vec());

    let mut xbee = XBee::new(mock).with_poll_interval(Duration::from_millis(1));
    let received = xbee.read_receive_packet(Duration::from_secs(5)).unwrap();
    assert_eq!(received, packet);
    assert_eq!(received.text(), "RxData");
}

#[test]
fn test_receive_packet_times_out() {
    let mock = MockTransport::new().hold_open();
    let mut xbee = XBee::new(mock).with_poll_interval(Duration::from_millis(1));

    let result = xbee.read_receive_packet(Duration::from_millis(20));
    assert!(matches!(result, Err(SerialError::Timeout(_))));
}

#[test]
fn test_unexpected_frame_type() {
    let mut mock = MockTransport::new();
    mock.queue_frame(&transmit_status(0x01, DeliveryStatus::Success))
        .unwrap();

    let mut xbee = XBee::new(mock);
    let err = xbee.read_at_command_response().unwrap_err();
    assert!(matches!(
        err,
        SerialError::Protocol(ProtocolError::UnexpectedFrameType {
            expected: 0x88,
            actual: 0x8B
        })
    ));
}

#[test]
fn test_checksum_failure_then_recovery() {
    let mut bad = Frame::encode(&transmit_status(0x01, DeliveryStatus::Success)).unwrap();
    let last = bad.len() - 1;
    bad[last] ^= 0x01;

    let mut mock = MockTransport::new();
    mock.queue(bad);
    mock.queue_frame(&transmit_status(0x02, DeliveryStatus::Success))
        .unwrap();

    let mut xbee = XBee::new(mock);
    let err = xbee.read_transmit_status().unwrap_err();
    assert!(matches!(
        err,
        SerialError::Protocol(ProtocolError::ChecksumMismatch { .. })
    ));
    assert!(err.is_recoverable());

    let status = xbee.read_transmit_status().unwrap();
    assert_eq!(status.frame_id, FrameId(0x02));
}

#[test]
fn test_two_frames_in_one_read() {
    let mut stream = Frame::encode(&transmit_status(0x01, DeliveryStatus::Success)).unwrap();
    stream.extend(Frame::encode(&transmit_status(0x02, DeliveryStatus::Success)).unwrap());

    let mut mock = MockTransport::new();
    mock.queue(stream);

    let mut xbee = XBee::new(mock);
    assert_eq!(xbee.read_transmit_status().unwrap().frame_id, FrameId(0x01));
    assert_eq!(xbee.read_transmit_status().unwrap().frame_id, FrameId(0x02));
    assert!(matches!(xbee.read_frame(), Err(SerialError::Disconnected)));
}
