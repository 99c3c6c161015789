//! fdns Domain Layer
pub mod config;
pub mod dns_name;
pub mod dns_record;
pub mod dns_request;
pub mod errors;
pub mod record_builder;
pub mod tsig_key;
pub mod zone_tree;

pub use config::{CliOverrides, ConfigError, ServerConfig, ZoneNode};
pub use dns_record::{AnswerRecord, RecordClass, RecordHeader, RecordType};
pub use dns_request::{Question, ZoneRequest};
pub use errors::DomainError;
pub use tsig_key::SharedSecretKey;
pub use zone_tree::{QueryBindings, Registration, ZoneEntry, ZoneTree};
