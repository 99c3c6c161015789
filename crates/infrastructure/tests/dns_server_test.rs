use fdns_infrastructure::dns::TransportKind;
use hickory_proto::op::{MessageType, ResponseCode};
use hickory_proto::rr::{RData, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::Ipv4Addr;

mod helpers;
use helpers::{example_handler, ipv4_of, parse, query_bytes, query_message, CLIENT};

// ── answers ────────────────────────────────────────────────────────────────

#[test]
fn test_a_query_returns_configured_address_and_ttl() {
    let handler = example_handler();

    let response = handler
        .handle_raw(
            &query_bytes(0x1234, "www.example.", RecordType::A),
            CLIENT,
            TransportKind::Datagram,
        )
        .unwrap();
    let response = parse(&response);

    assert_eq!(response.id(), 0x1234);
    assert_eq!(response.message_type(), MessageType::Response);
    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert!(response.authoritative());
    assert!(response.recursion_desired());
    assert_eq!(response.queries().len(), 1);
    assert_eq!(response.answers().len(), 1);

    let answer = &response.answers()[0];
    assert_eq!(answer.name().to_ascii(), "www.example.");
    assert_eq!(answer.ttl(), 60);
    assert_eq!(ipv4_of(answer), Some(Ipv4Addr::new(5, 6, 7, 8)));
}

#[test]
fn test_unsupported_type_returns_empty_noerror() {
    let handler = example_handler();

    let response = handler
        .handle_raw(
            &query_bytes(7, "www.example.", RecordType::SOA),
            CLIENT,
            TransportKind::Stream,
        )
        .unwrap();
    let response = parse(&response);

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert!(response.answers().is_empty());
}

#[test]
fn test_zone_without_address_returns_empty_noerror() {
    let handler = example_handler();

    let response = handler
        .handle_raw(
            &query_bytes(7, "big.example.", RecordType::A),
            CLIENT,
            TransportKind::Stream,
        )
        .unwrap();
    let response = parse(&response);

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert!(response.answers().is_empty());
}

#[test]
fn test_multiple_questions_are_answered_in_order() {
    let handler = example_handler();
    let query = query_message(
        9,
        &[("example.", RecordType::MX), ("example.", RecordType::A)],
    )
    .to_vec()
    .unwrap();

    let response = parse(
        &handler
            .handle_raw(&query, CLIENT, TransportKind::Stream)
            .unwrap(),
    );

    let types: Vec<RecordType> = response.answers().iter().map(|r| r.record_type()).collect();
    assert_eq!(types, vec![RecordType::MX, RecordType::A]);
    match response.answers()[0].data() {
        RData::MX(mx) => {
            assert_eq!(mx.preference(), 10);
            assert_eq!(mx.exchange().to_ascii(), "mail.example.");
        }
        other => panic!("expected MX, got {:?}", other),
    }
}

#[test]
fn test_long_text_is_split_into_character_strings() {
    let handler = example_handler();

    let response = parse(
        &handler
            .handle_raw(
                &query_bytes(3, "big.example.", RecordType::TXT),
                CLIENT,
                TransportKind::Stream,
            )
            .unwrap(),
    );

    match response.answers()[0].data() {
        RData::TXT(txt) => {
            let strings = txt.txt_data();
            assert_eq!(strings.len(), 8);
            assert!(strings.iter().all(|s| s.len() <= 255));
            assert_eq!(strings.iter().map(|s| s.len()).sum::<usize>(), 2000);
        }
        other => panic!("expected TXT, got {:?}", other),
    }
}

// ── transport limits ───────────────────────────────────────────────────────

#[test]
fn test_oversized_udp_response_is_truncated() {
    let handler = example_handler();

    let response = parse(
        &handler
            .handle_raw(
                &query_bytes(4, "big.example.", RecordType::TXT),
                CLIENT,
                TransportKind::Datagram,
            )
            .unwrap(),
    );

    assert!(response.truncated());
    assert!(response.answers().is_empty());
    assert_eq!(response.id(), 4);
}

// ── error responses ────────────────────────────────────────────────────────

#[test]
fn test_query_outside_zones_is_refused() {
    let handler = example_handler();

    let response = parse(
        &handler
            .handle_raw(
                &query_bytes(5, "example.org.", RecordType::A),
                CLIENT,
                TransportKind::Datagram,
            )
            .unwrap(),
    );

    assert_eq!(response.response_code(), ResponseCode::Refused);
    assert!(response.answers().is_empty());
}

#[test]
fn test_query_without_question_is_format_error() {
    let handler = example_handler();
    let query = query_message(6, &[]).to_vec().unwrap();

    let response = parse(
        &handler
            .handle_raw(&query, CLIENT, TransportKind::Datagram)
            .unwrap(),
    );

    assert_eq!(response.response_code(), ResponseCode::FormErr);
}

#[test]
fn test_malformed_message_gets_format_error_with_same_id() {
    let handler = example_handler();

    let response = parse(
        &handler
            .handle_raw(&[0xab, 0xcd, 0xff], CLIENT, TransportKind::Datagram)
            .unwrap(),
    );

    assert_eq!(response.id(), 0xabcd);
    assert_eq!(response.response_code(), ResponseCode::FormErr);
}

#[test]
fn test_too_short_garbage_is_dropped() {
    let handler = example_handler();

    assert!(handler
        .handle_raw(&[0x01], CLIENT, TransportKind::Datagram)
        .is_none());
}

#[test]
fn test_responses_sent_to_server_are_ignored() {
    let handler = example_handler();
    let mut message = query_message(8, &[("www.example.", RecordType::A)]);
    message.set_message_type(MessageType::Response);

    assert!(handler
        .handle_raw(&message.to_vec().unwrap(), CLIENT, TransportKind::Datagram)
        .is_none());
}
