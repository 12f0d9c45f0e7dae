//! End-to-end tests of the frame codec: typed command to wire bytes, and
//! wire bytes in arbitrary chunks back to typed frames.

use proptest::prelude::*;
use xbee_api::*;

/// Feed `stream` to a fresh accumulator in the given chunk sizes and collect
/// every frame it yields.
fn collect_frames(stream: &[u8], chunk_sizes: &[usize]) -> Vec<Vec<u8>> {
    let mut accumulator = FrameAccumulator::new();
    let mut frames = Vec::new();
    let mut rest = stream;
    let mut sizes = chunk_sizes.iter().cycle();

    while !rest.is_empty() {
        let size = (*sizes.next().unwrap()).clamp(1, rest.len());
        let (chunk, tail) = rest.split_at(size);
        rest = tail;

        accumulator.push(chunk);
        while let Some(raw) = accumulator.try_frame().expect("valid stream") {
            frames.push(raw);
        }
    }

    frames
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_node_identifier_read_frame() {
    let cmd = AtCommand::Addressing(Addressing::NodeIdentifier(Action::Read));
    assert_eq!(cmd.encode(), vec![0x4E, 0x49]);

    let wire = encode_command(&cmd, FrameId::ACK).unwrap();
    let payload = Frame::parse(&unescape(&wire)).unwrap().to_vec();
    assert_eq!(payload[0], FRAME_TYPE_AT_COMMAND);
    assert_eq!(&payload[2..], b"NI");
}

#[test]
fn test_transmit_status_from_wire() {
    let wire = Frame::encode(&[0x8B, 0x01, 0x12, 0x34, 0x00, 0x00, 0x00]).unwrap();

    let mut accumulator = FrameAccumulator::new();
    let raw = accumulator.decode(&wire).unwrap().unwrap();

    let status = match Frame::decode(&raw).unwrap() {
        ApiFrame::TransmitStatus(status) => status,
        other => panic!("expected transmit status, got {:?}", other),
    };
    assert_eq!(status.frame_id, FrameId(0x01));
    assert_eq!(status.network.to_u16(), 0x1234);
    assert_eq!(status.retry_count, 0);
    assert_eq!(status.delivery, DeliveryStatus::Success);
    assert_eq!(status.discovery, DiscoveryStatus::NoDiscoveryOverhead);
}

#[test]
fn test_escape_byte_ends_first_chunk() {
    // Network address 0x7D84 puts an escape prefix on the wire.
    let packet = ReceivePacket {
        source: DeviceAddress::new(0x0013_A200_4052_2BAA),
        network: NetworkAddress::new(0x7D84),
        options: ReceiveOptions(0x01),
        data: b"hello".to_vec(),
    };
    let wire = Frame::encode(&packet.encode()).unwrap();
    let split = wire.iter().rposition(|&b| b == ESCAPE).unwrap() + 1;

    let mut accumulator = FrameAccumulator::new();
    accumulator.push(&wire[..split]);
    let before = accumulator.buffered_len();
    assert!(accumulator.is_escape_pending());
    assert_eq!(accumulator.try_frame().unwrap(), None);

    accumulator.push(&wire[split..split + 1]);
    assert!(!accumulator.is_escape_pending());
    assert_eq!(accumulator.buffered_len(), before + 1);

    accumulator.push(&wire[split + 1..]);
    let raw = accumulator.try_frame().unwrap().unwrap();
    assert_eq!(Frame::decode(&raw).unwrap(), ApiFrame::ReceivePacket(packet));
}

#[test]
fn test_transmit_request_wire_bytes() {
    let wire = encode_transmit_request(
        DeviceAddress::new(0x0013_A200_4000_0001),
        NetworkAddress::UNKNOWN_OR_BROADCAST,
        FrameId(0x01),
        0,
        TransmitOptions::NONE,
        b"Hi",
    )
    .unwrap();

    let raw = unescape(&wire);
    assert_eq!(&raw[..3], &[0x7E, 0x00, 0x10]);
    assert!(checksum::validate(&raw));

    match Frame::decode(&raw).unwrap() {
        ApiFrame::TransmitRequest(request) => {
            assert_eq!(request.network, NetworkAddress::UNKNOWN_OR_BROADCAST);
            assert_eq!(request.data, b"Hi");
        }
        other => panic!("expected transmit request, got {:?}", other),
    }
}

#[test]
fn test_clamped_write_on_the_wire() {
    let cmd = AtCommand::Networking(Networking::ScanChannels(Action::Write(0x0000)));
    let raw = unescape(&encode_command(&cmd, FrameId::ACK).unwrap());
    let request = AtCommandRequest::decode(Frame::parse(&raw).unwrap()).unwrap();

    assert_eq!(&request.mnemonic, b"SC");
    assert_eq!(request.parameter, vec![0x00, 0x01]);
}

#[test]
fn test_mixed_stream_with_noise_and_bad_frame() {
    let response = AtCommandResponse {
        frame_id: FrameId(0x01),
        mnemonic: *b"MY",
        status: AtCommandStatus::Ok,
        data: vec![0x00, 0x00],
    };

    let mut bad = Frame::encode(&[0x8B, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
    let last = bad.len() - 1;
    bad[last] = bad[last].wrapping_add(1);

    let mut stream = vec![0xAA, 0xBB];
    stream.extend(bad);
    stream.extend(Frame::encode(&response.encode()).unwrap());

    let mut accumulator = FrameAccumulator::new();
    accumulator.push(&stream);

    assert!(matches!(
        accumulator.try_frame(),
        Err(ProtocolError::ChecksumMismatch { .. })
    ));

    let raw = accumulator.try_frame().unwrap().unwrap();
    assert_eq!(
        Frame::decode(&raw).unwrap(),
        ApiFrame::AtCommandResponse(response)
    );
}

// ============================================================================
// Properties
// ============================================================================

fn any_frame() -> impl Strategy<Value = ApiFrame> {
    prop_oneof![
        (any::<u8>(), any::<[u8; 2]>(), prop::collection::vec(any::<u8>(), 0..8)).prop_map(
            |(id, mnemonic, data)| ApiFrame::AtCommandResponse(AtCommandResponse {
                frame_id: FrameId(id),
                mnemonic,
                status: AtCommandStatus::Ok,
                data,
            })
        ),
        (any::<u64>(), any::<u16>(), any::<u8>(), prop::collection::vec(any::<u8>(), 0..64))
            .prop_map(|(src, net, opts, data)| ApiFrame::ReceivePacket(ReceivePacket {
                source: DeviceAddress::new(src),
                network: NetworkAddress::new(net),
                options: ReceiveOptions(opts),
                data,
            })),
        (any::<u8>(), any::<u16>(), any::<u8>()).prop_map(|(id, net, retries)| {
            ApiFrame::TransmitStatus(TransmitStatus {
                frame_id: FrameId(id),
                network: NetworkAddress::new(net),
                retry_count: retries,
                delivery: DeliveryStatus::Success,
                discovery: DiscoveryStatus::AddressAndRoute,
            })
        }),
    ]
}

proptest! {
    #[test]
    fn prop_chunking_does_not_change_frames(
        frames in prop::collection::vec(any_frame(), 1..5),
        chunk_sizes in prop::collection::vec(1usize..16, 1..8),
    ) {
        let mut stream = Vec::new();
        for frame in &frames {
            stream.extend(Frame::encode(&frame.encode()).unwrap());
        }

        let raws = collect_frames(&stream, &chunk_sizes);
        prop_assert_eq!(raws.len(), frames.len());
        for (raw, expected) in raws.iter().zip(&frames) {
            prop_assert!(is_complete(raw));
            let decoded = Frame::decode(raw).unwrap();
            prop_assert_eq!(&decoded, expected);
        }
    }

    #[test]
    fn prop_wire_never_contains_bare_reserved_bytes(
        payload in prop::collection::vec(any::<u8>(), 1..128),
    ) {
        let wire = Frame::encode(&payload).unwrap();
        prop_assert_eq!(wire[0], START_DELIMITER);
        for &byte in &wire[1..] {
            prop_assert!(byte != START_DELIMITER && byte != XON && byte != XOFF);
        }
        let raw = unescape(&wire);
        prop_assert_eq!(Frame::parse(&raw).unwrap(), &payload[..]);
    }

    #[test]
    fn prop_short_buffers_never_complete(
        payload in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let raw = unescape(&Frame::encode(&payload).unwrap());
        for len in 0..raw.len() {
            prop_assert!(!is_complete(&raw[..len]));
        }
        prop_assert!(is_complete(&raw));
    }
}
