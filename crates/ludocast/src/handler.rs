//! Per-connection handler: attach, pump frames both ways, detach.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Attach to the lobby → everyone hears `connected`
//!   2. Spawn a writer that drains the connection's outbound queue
//!   3. Loop: receive frames → decode → submit to the lobby, until the
//!      peer leaves, goes idle, or the server shuts down
//!   4. Detach, let the writer drain, close the socket

use std::sync::Arc;

use ludocast_lobby::LobbyHandle;
use ludocast_protocol::{Codec, ErrorNotice, InboundEvent, OutboundEvent};
use ludocast_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::{mpsc, watch};

use crate::LudocastError;
use crate::server::ServerState;

/// Detaches a connection from the lobby when the handler exits.
///
/// The normal path awaits [`release`](Self::release). If the handler
/// unwinds instead, `Drop` fires a detach task since it cannot await.
struct DetachGuard {
    conn_id: ConnectionId,
    lobby: LobbyHandle,
    released: bool,
}

impl DetachGuard {
    async fn release(mut self) {
        self.released = true;
        if let Err(e) = self.lobby.detach(self.conn_id).await {
            tracing::debug!(conn_id = %self.conn_id, error = %e, "detach failed");
        }
    }
}

impl Drop for DetachGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let conn_id = self.conn_id;
        let lobby = self.lobby.clone();
        runtime.spawn(async move {
            let _ = lobby.detach(conn_id).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), LudocastError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, rx) = mpsc::unbounded_channel();
    state.lobby.attach(conn_id, tx.clone()).await?;
    let guard = DetachGuard {
        conn_id,
        lobby: state.lobby.clone(),
        released: false,
    };

    let writer = tokio::spawn(write_loop(Arc::clone(&conn), rx, Arc::clone(&state)));

    read_loop(&conn, &state, &tx).await;

    // Once detached the lobby holds no sender for us; dropping ours lets
    // the writer flush what is queued and stop.
    guard.release().await;
    drop(tx);
    if let Err(e) = writer.await {
        tracing::warn!(%conn_id, error = %e, "writer task failed");
    }

    if let Err(e) = conn.close().await {
        tracing::debug!(%conn_id, error = %e, "close after disconnect");
    }
    tracing::info!(%conn_id, "connection finished");
    Ok(())
}

/// Resolves once the server signals shutdown. A dropped sender counts.
async fn stopped(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Receives frames until the peer goes away, the idle timeout elapses,
/// the server shuts down, or the lobby stops.
async fn read_loop<C: Codec>(
    conn: &WebSocketConnection,
    state: &ServerState<C>,
    tx: &mpsc::UnboundedSender<OutboundEvent>,
) {
    let conn_id = conn.id();
    let stop = stopped(state.shutdown.clone());
    tokio::pin!(stop);

    loop {
        let next_frame = async {
            match state.idle_timeout {
                Some(limit) => tokio::time::timeout(limit, conn.recv()).await.ok(),
                None => Some(conn.recv().await),
            }
        };

        let received = tokio::select! {
            _ = &mut stop => {
                tracing::info!(%conn_id, "server shutting down, closing connection");
                return;
            }
            next = next_frame => match next {
                Some(received) => received,
                None => {
                    tracing::info!(%conn_id, "connection idle, closing");
                    return;
                }
            },
        };

        let data = match received {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%conn_id, "connection closed cleanly");
                return;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                return;
            }
        };

        let event: InboundEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "failed to decode event");
                let _ = tx.send(OutboundEvent::Error(ErrorNotice {
                    code: 400,
                    message: format!("invalid event: {e}"),
                }));
                continue;
            }
        };

        tracing::trace!(%conn_id, event = event.name(), "received");
        if let Err(e) = state.lobby.submit(conn_id, event).await {
            tracing::info!(%conn_id, error = %e, "lobby gone, dropping connection");
            return;
        }
    }
}

/// Encodes queued events and writes them to the socket in queue order.
async fn write_loop<C: Codec>(
    conn: Arc<WebSocketConnection>,
    mut rx: mpsc::UnboundedReceiver<OutboundEvent>,
    state: Arc<ServerState<C>>,
) {
    let conn_id = conn.id();

    while let Some(event) = rx.recv().await {
        let frame = match state.codec.encode(&event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(%conn_id, event = event.name(), error = %e, "failed to encode event");
                continue;
            }
        };
        if let Err(e) = conn.send(&frame).await {
            tracing::debug!(%conn_id, error = %e, "send failed, stopping writer");
            return;
        }
    }
}
