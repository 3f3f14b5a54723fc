use super::*;
use tessel_core::hash;

#[test]
fn kind_ids() {
    assert_eq!(MessageKind::from_u16(0x1), MessageKind::Connect);
    assert_eq!(MessageKind::from_u16(0x2), MessageKind::ConnectResponse);
    assert_eq!(MessageKind::from_u16(0x10), MessageKind::FunctionRpc);
    assert_eq!(MessageKind::from_u16(0x33), MessageKind::ServerTest);
    assert_eq!(MessageKind::from_u16(0x66), MessageKind::ClientTest);
    assert_eq!(MessageKind::from_u16(0xBEEF), MessageKind::Unknown(0xBEEF));

    for raw in [0x1, 0x2, 0x10, 0x33, 0x66, 0x7] {
        assert_eq!(MessageKind::from_u16(raw).as_u16(), raw);
    }
    assert_eq!(MessageKind::Unknown(0x7).to_string(), "Unknown(0x0007)");
}

#[test]
fn encode_layout() {
    let message = Message::new(MessageKind::ClientTest, 234, b"hi".to_vec());

    assert_eq!(
        message.encode(),
        vec![0x00, 0x66, 0x00, 0xEA, 0, 0, 0, 2, b'h', b'i']
    );
}

#[test]
fn decode_consumes_one_frame() {
    let first = Message::new(MessageKind::ServerTest, 1, b"abc".to_vec());
    let second = Message::new(MessageKind::Connect, 2, Vec::new());
    let mut stream = first.encode();
    stream.extend(second.encode());

    let (decoded, used) = Message::decode(&stream).unwrap();
    assert_eq!(decoded, first);
    assert_eq!(used, MessageHeader::SIZE + 3);

    let (decoded, used) = Message::decode(&stream[used..]).unwrap();
    assert_eq!(decoded, second);
    assert_eq!(used, MessageHeader::SIZE);
}

#[test]
fn decode_short_payload() {
    let mut bytes = Message::new(MessageKind::FunctionRpc, 9, vec![1, 2, 3, 4]).encode();
    bytes.truncate(10);

    let err = Message::decode(&bytes).unwrap_err();
    assert_eq!(
        err,
        FormatError::Truncated {
            offset: 8,
            needed: 4,
            available: 2
        }
    );
}

#[test]
fn decode_short_header() {
    assert!(matches!(
        Message::decode(&[0, 1, 0]),
        Err(FormatError::Truncated { .. })
    ));
}

#[test]
fn connect_handshake() {
    let token = "a1B2c3D4e5F6g7H8";
    let request = Message::connect(234, token);
    assert_eq!(request.payload.len(), 16);

    let response = Message::connect_response(&request).unwrap();
    assert_eq!(response.kind, MessageKind::ConnectResponse);
    assert_eq!(response.id, 234);
    assert_eq!(response.payload, hash(token).to_be_bytes().to_vec());

    verify_connect_response(token, 234, &response).unwrap();
}

#[test]
fn connect_response_rejects_other_kinds() {
    let request = Message::new(MessageKind::ClientTest, 1, Vec::new());
    assert_eq!(
        Message::connect_response(&request),
        Err(HandshakeError::WrongKind {
            expected: MessageKind::Connect,
            found: MessageKind::ClientTest,
        })
    );
}

#[test]
fn verify_rejects_bad_responses() {
    let token = "jake";
    let good = Message::connect_response(&Message::connect(5, token)).unwrap();

    assert_eq!(
        verify_connect_response(token, 6, &good),
        Err(HandshakeError::WrongId {
            expected: 6,
            found: 5
        })
    );

    let short = Message::new(MessageKind::ConnectResponse, 5, vec![0, 1]);
    assert_eq!(
        verify_connect_response(token, 5, &short),
        Err(HandshakeError::WrongPayloadSize(2))
    );

    let wrong = Message::new(MessageKind::ConnectResponse, 5, 1u32.to_be_bytes().to_vec());
    let err = verify_connect_response(token, 5, &wrong).unwrap_err();
    assert_eq!(
        err.to_string(),
        "wrong response hash: expected 0x6F119EBD, found 0x1"
    );
}
