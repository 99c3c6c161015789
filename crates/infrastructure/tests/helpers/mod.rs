#![allow(dead_code)]
use fdns_application::use_cases::HandleZoneQueryUseCase;
use fdns_domain::config::{AddressData, MailExchangeData, TextData};
use fdns_domain::{ZoneNode, ZoneTree};
use fdns_infrastructure::dns::DnsServerHandler;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub const CLIENT: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 40000);

/// `example.` (1.2.3.4/300, MX mail.example.) with `www` (5.6.7.8/60) and
/// `big` carrying a long TXT record.
pub fn example_zone() -> Vec<ZoneNode> {
    let mut www = ZoneNode::new("www");
    www.address = Some(AddressData {
        ip: "5.6.7.8".parse().unwrap(),
        ttl: Some(60),
    });

    let mut big = ZoneNode::new("big");
    big.txt = Some(TextData {
        content: "t".repeat(2000),
        ttl: Some(30),
    });

    let mut example = ZoneNode::new("example");
    example.address = Some(AddressData {
        ip: "1.2.3.4".parse().unwrap(),
        ttl: Some(300),
    });
    example.mail_exchange = Some(MailExchangeData {
        content: "mail.example.".to_string(),
        priority: 10,
        ttl: Some(3600),
    });
    example.children = vec![www, big];

    vec![example]
}

pub fn example_handler() -> DnsServerHandler {
    let registration = ZoneTree::new(example_zone(), 300).register();
    DnsServerHandler::new(Arc::new(HandleZoneQueryUseCase::new(Arc::new(
        registration.bindings,
    ))))
}

pub fn query_message(id: u16, questions: &[(&str, RecordType)]) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    for (name, record_type) in questions {
        message.add_query(Query::query(Name::from_ascii(name).unwrap(), *record_type));
    }
    message
}

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    query_message(id, &[(name, record_type)]).to_vec().unwrap()
}

pub fn parse(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}

pub fn ipv4_of(record: &Record) -> Option<Ipv4Addr> {
    match record.data() {
        RData::A(a) => Some(a.0),
        _ => None,
    }
}

/// A port currently free for both TCP and UDP on localhost.
pub fn free_port() -> u16 {
    loop {
        let tcp = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = tcp.local_addr().unwrap().port();
        if std::net::UdpSocket::bind(("127.0.0.1", port)).is_ok() {
            return port;
        }
    }
}
