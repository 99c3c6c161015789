use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// One configured domain label with its answer data and nested subdomains.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ZoneNode {
    pub name: String,

    #[serde(default, rename = "a", skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressData>,

    #[serde(default, rename = "mx", skip_serializing_if = "Option::is_none")]
    pub mail_exchange: Option<MailExchangeData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt: Option<TextData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<TargetData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<TargetData>,

    #[serde(default, rename = "domains", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ZoneNode>,
}

impl ZoneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            mail_exchange: None,
            txt: None,
            cname: None,
            ns: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AddressData {
    pub ip: IpAddr,

    #[serde(default)]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MailExchangeData {
    pub content: String,

    #[serde(default)]
    pub priority: u16,

    #[serde(default)]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TextData {
    pub content: String,

    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Data of records pointing at another host (CNAME, NS).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetData {
    pub content: String,

    #[serde(default)]
    pub ttl: Option<u32>,
}
