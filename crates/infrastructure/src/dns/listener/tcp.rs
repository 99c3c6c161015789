use super::{ListenerError, ListenerState, TransportKind};
use crate::dns::server::DnsServerHandler;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Connections idle longer than this are closed.
const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause after an accept error that is not tied to a single connection,
/// such as running out of file descriptors.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

pub(super) async fn serve(
    addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    state: &watch::Sender<ListenerState>,
    shutdown: CancellationToken,
) -> Result<(), ListenerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind {
            transport: TransportKind::Stream,
            addr,
            source,
        })?;

    state.send_replace(ListenerState::Listening);
    info!(bind_address = %addr, "TCP DNS listener ready");

    loop {
        let accepted = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => accepted,
        };

        let (stream, peer) = match accepted {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "TCP accept error");
                if let Some(delay) = accept_backoff(&e) {
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                continue;
            }
        };

        let handler = handler.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer, handler).await {
                debug!(client = %peer, error = %e, "TCP connection closed with error");
            }
        });
    }

    state.send_replace(ListenerState::Draining);
    Ok(())
}

/// How long to wait before accepting again after `error`.
///
/// Errors caused by one failed connection are retried at once; anything
/// else (EMFILE, ENFILE, ENOBUFS) would fail again immediately.
fn accept_backoff(error: &io::Error) -> Option<Duration> {
    match error.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::Interrupted => None,
        _ => Some(ACCEPT_ERROR_BACKOFF),
    }
}

/// Serves length-prefixed messages on one connection until the peer closes
/// it or it stays idle past [`TCP_IDLE_TIMEOUT`].
async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsServerHandler>,
) -> io::Result<()> {
    loop {
        let read = tokio::time::timeout(TCP_IDLE_TIMEOUT, read_with_length_prefix(&mut stream));
        let query = match read.await {
            Err(_) => return Ok(()),
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Ok(result) => result?,
        };

        if let Some(response) = handler.handle_raw(&query, peer, TransportKind::Stream) {
            send_with_length_prefix(&mut stream, &response).await?;
        }
    }
}

async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let mut message = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut message).await?;
    Ok(message)
}

async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidData, "DNS message exceeds 65535 bytes")
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}
