//! UDP and TCP listeners sharing one [`DnsServerHandler`].
//!
//! Each listener moves through `Idle → Listening → Draining → Closed`. The
//! state is published on a watch channel so callers can wait for a listener
//! to come up or observe that it failed.

mod tcp;
mod udp;

use crate::dns::server::DnsServerHandler;
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Standard DNS port; both transports always bind it in production.
pub const DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Datagram,
    Stream,
}

impl TransportKind {
    pub fn protocol_name(&self) -> &'static str {
        match self {
            TransportKind::Datagram => "UDP",
            TransportKind::Stream => "TCP",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.protocol_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Listening,
    /// Shutdown requested; no new requests are accepted.
    Draining,
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("Unable to start {transport} server on {addr}: {source}")]
    Bind {
        transport: TransportKind,
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

pub struct DnsListener {
    kind: TransportKind,
    addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    state: watch::Sender<ListenerState>,
}

impl DnsListener {
    pub fn new(kind: TransportKind, addr: SocketAddr, handler: Arc<DnsServerHandler>) -> Self {
        let (state, _) = watch::channel(ListenerState::Idle);
        Self {
            kind,
            addr,
            handler,
            state,
        }
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn state(&self) -> ListenerState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListenerState> {
        self.state.subscribe()
    }

    /// Binds and serves until `shutdown` is cancelled.
    ///
    /// In-flight requests are not awaited once shutdown starts.
    pub async fn start(self, shutdown: CancellationToken) -> Result<(), ListenerError> {
        let result = match self.kind {
            TransportKind::Datagram => {
                udp::serve(self.addr, self.handler.clone(), &self.state, shutdown).await
            }
            TransportKind::Stream => {
                tcp::serve(self.addr, self.handler.clone(), &self.state, shutdown).await
            }
        };

        self.state.send_replace(ListenerState::Closed);
        info!(transport = %self.kind, "DNS listener closed");
        result
    }
}

/// A listener running on its own task.
pub struct ListenerHandle {
    pub kind: TransportKind,
    pub state: watch::Receiver<ListenerState>,
    pub task: JoinHandle<Result<(), ListenerError>>,
}

/// Starts the UDP and TCP listeners concurrently on `addr`.
///
/// A failure of one transport is logged and leaves the other running.
pub fn start_listeners(
    addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> Vec<ListenerHandle> {
    [TransportKind::Stream, TransportKind::Datagram]
        .into_iter()
        .map(|kind| {
            let listener = DnsListener::new(kind, addr, handler.clone());
            let state = listener.subscribe();
            let shutdown = shutdown.clone();

            let task = tokio::spawn(async move {
                let result = listener.start(shutdown).await;
                if let Err(e) = &result {
                    error!(transport = %kind, error = %e, "DNS listener failed");
                }
                result
            });

            ListenerHandle { kind, state, task }
        })
        .collect()
}
