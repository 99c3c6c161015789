use super::{ListenerError, ListenerState, TransportKind};
use crate::dns::server::DnsServerHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const RECV_BUFFER_SIZE: usize = 4096;

pub(super) async fn serve(
    addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    state: &watch::Sender<ListenerState>,
    shutdown: CancellationToken,
) -> Result<(), ListenerError> {
    let socket = UdpSocket::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind {
            transport: TransportKind::Datagram,
            addr,
            source,
        })?;
    let socket = Arc::new(socket);

    state.send_replace(ListenerState::Listening);
    info!(bind_address = %addr, "UDP DNS listener ready");

    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => received,
        };

        let (n, from) = match received {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        let handler = handler.clone();
        let socket = socket.clone();
        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);

        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw(&query, from, TransportKind::Datagram) {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send UDP response");
                }
            }
        });
    }

    state.send_replace(ListenerState::Draining);
    Ok(())
}
