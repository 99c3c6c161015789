use crate::dns_record::RecordType;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    /// `None` when the wire type is one the server does not answer.
    pub record_type: Option<RecordType>,
}

impl Question {
    pub fn new(name: impl Into<String>, record_type: Option<RecordType>) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

/// Transport independent view of an incoming query.
#[derive(Debug, Clone)]
pub struct ZoneRequest {
    pub questions: Vec<Question>,
    pub client_ip: IpAddr,
}

impl ZoneRequest {
    pub fn new(questions: Vec<Question>, client_ip: IpAddr) -> Self {
        Self {
            questions,
            client_ip,
        }
    }
}
