use std::fmt;
use std::net::IpAddr;

/// Query types the server knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    TXT,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::NS => "NS",
            RecordType::TXT => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordClass {
    #[default]
    IN,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub name: String,
    pub class: RecordClass,
    pub ttl: u32,
}

impl RecordHeader {
    pub fn new(name: impl Into<String>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            class: RecordClass::IN,
            ttl,
        }
    }
}

/// A single answer entry, built fresh for every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRecord {
    Address {
        header: RecordHeader,
        ip: IpAddr,
    },
    MailExchange {
        header: RecordHeader,
        preference: u16,
        exchange: String,
    },
    Alias {
        header: RecordHeader,
        target: String,
    },
    Nameserver {
        header: RecordHeader,
        target: String,
    },
    /// Character-strings of at most 255 bytes each, in order.
    Text {
        header: RecordHeader,
        chunks: Vec<Vec<u8>>,
    },
}

impl AnswerRecord {
    pub fn header(&self) -> &RecordHeader {
        match self {
            AnswerRecord::Address { header, .. }
            | AnswerRecord::MailExchange { header, .. }
            | AnswerRecord::Alias { header, .. }
            | AnswerRecord::Nameserver { header, .. }
            | AnswerRecord::Text { header, .. } => header,
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            AnswerRecord::Address {
                ip: IpAddr::V4(_), ..
            } => RecordType::A,
            AnswerRecord::Address {
                ip: IpAddr::V6(_), ..
            } => RecordType::AAAA,
            AnswerRecord::MailExchange { .. } => RecordType::MX,
            AnswerRecord::Alias { .. } => RecordType::CNAME,
            AnswerRecord::Nameserver { .. } => RecordType::NS,
            AnswerRecord::Text { .. } => RecordType::TXT,
        }
    }
}
