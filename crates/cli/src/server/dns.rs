use super::signal::shutdown_signal;
use fdns_infrastructure::dns::{start_listeners, DnsServerHandler, DNS_PORT};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Serves DNS over UDP and TCP until SIGINT or SIGTERM.
///
/// Listener failures are logged by the listeners themselves; the process keeps
/// running on whichever transport came up. In-flight requests are abandoned
/// on shutdown.
pub async fn run_dns_server(handler: DnsServerHandler) {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, DNS_PORT));
    let shutdown = CancellationToken::new();

    info!(
        bind_address = %addr,
        tsig = handler.verifies_signatures(),
        "Starting DNS server"
    );
    let handles = start_listeners(addr, Arc::new(handler), shutdown.clone());

    let signal = shutdown_signal().await;
    info!(signal, "Signal received, stopping");

    shutdown.cancel();
    drop(handles);
}
