//! fdns Infrastructure Layer
pub mod dns;
