//! Constructors for answer records.
//!
//! Every function is pure: the same inputs always produce the same record
//! and nothing is cached.

use crate::dns_record::{AnswerRecord, RecordHeader};
use std::net::{IpAddr, Ipv6Addr};

/// Upper bound of a single character-string inside a TXT record.
pub const MAX_TEXT_CHUNK: usize = 255;

/// Address record for `ip`. IPv4 yields an A record, IPv6 an AAAA record.
pub fn build_address(name: &str, ip: IpAddr, ttl: u32) -> AnswerRecord {
    AnswerRecord::Address {
        header: RecordHeader::new(name, ttl),
        ip,
    }
}

pub fn build_ipv6_address(name: &str, ip: Ipv6Addr, ttl: u32) -> AnswerRecord {
    build_address(name, IpAddr::V6(ip), ttl)
}

pub fn build_mail_exchange(name: &str, target: &str, priority: u16, ttl: u32) -> AnswerRecord {
    AnswerRecord::MailExchange {
        header: RecordHeader::new(name, ttl),
        preference: priority,
        exchange: target.to_string(),
    }
}

pub fn build_alias(name: &str, target: &str, ttl: u32) -> AnswerRecord {
    AnswerRecord::Alias {
        header: RecordHeader::new(name, ttl),
        target: target.to_string(),
    }
}

pub fn build_nameserver(name: &str, target: &str, ttl: u32) -> AnswerRecord {
    AnswerRecord::Nameserver {
        header: RecordHeader::new(name, ttl),
        target: target.to_string(),
    }
}

/// Text record holding `content` split into 255-byte character-strings.
///
/// Empty content still yields one (empty) character-string since the
/// record data cannot be empty on the wire.
pub fn build_text(name: &str, content: &str, ttl: u32) -> AnswerRecord {
    let mut chunks: Vec<Vec<u8>> = split_text(content)
        .into_iter()
        .map(<[u8]>::to_vec)
        .collect();
    if chunks.is_empty() {
        chunks.push(Vec::new());
    }

    AnswerRecord::Text {
        header: RecordHeader::new(name, ttl),
        chunks,
    }
}

/// Splits `content` into `ceil(len / 255)` byte chunks; the last one holds
/// the remainder.
///
/// Chunks are cut on byte boundaries, so a multi-byte character may span two
/// of them.
pub fn split_text(content: &str) -> Vec<&[u8]> {
    content.as_bytes().chunks(MAX_TEXT_CHUNK).collect()
}
