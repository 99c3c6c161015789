pub mod dns;
pub mod signal;

pub use dns::run_dns_server;
