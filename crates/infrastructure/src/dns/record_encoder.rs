//! Converts domain answer records into `hickory-proto` records for the wire.

use fdns_domain::{AnswerRecord, RecordClass};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use hickory_proto::ProtoError;
use std::net::IpAddr;

pub fn to_hickory(record: &AnswerRecord) -> Result<Record, ProtoError> {
    let header = record.header();
    let name = Name::from_ascii(&header.name)?;

    let rdata = match record {
        AnswerRecord::Address {
            ip: IpAddr::V4(ip), ..
        } => RData::A(A(*ip)),
        AnswerRecord::Address {
            ip: IpAddr::V6(ip), ..
        } => RData::AAAA(AAAA(*ip)),
        AnswerRecord::MailExchange {
            preference,
            exchange,
            ..
        } => RData::MX(MX::new(*preference, Name::from_ascii(exchange)?)),
        AnswerRecord::Alias { target, .. } => RData::CNAME(CNAME(Name::from_ascii(target)?)),
        AnswerRecord::Nameserver { target, .. } => RData::NS(NS(Name::from_ascii(target)?)),
        AnswerRecord::Text { chunks, .. } => {
            RData::TXT(TXT::from_bytes(chunks.iter().map(Vec::as_slice).collect()))
        }
    };

    let mut encoded = Record::from_rdata(name, header.ttl, rdata);
    encoded.set_dns_class(match header.class {
        RecordClass::IN => DNSClass::IN,
    });
    Ok(encoded)
}
