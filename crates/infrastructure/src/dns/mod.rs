pub mod listener;
pub mod record_encoder;
pub mod record_type_map;
pub mod server;
pub mod tsig;

pub use listener::{
    start_listeners, DnsListener, ListenerError, ListenerHandle, ListenerState, TransportKind,
    DNS_PORT,
};
pub use record_type_map::RecordTypeMapper;
pub use server::DnsServerHandler;
pub use tsig::{TsigAlgorithm, TsigError, TsigReply, TsigVerifier};
