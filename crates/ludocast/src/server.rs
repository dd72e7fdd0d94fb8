//! `LudocastServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → lobby. One lobby
//! actor serves every connection the server accepts.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ludocast_lobby::{DEFAULT_CHANNEL_SIZE, LobbyConfig, LobbyHandle, spawn_lobby};
use ludocast_protocol::{Codec, JsonCodec};
use ludocast_transport::{Transport, WebSocketTransport};
use tokio::sync::watch;

use crate::LudocastError;
use crate::handler::handle_connection;

/// Shared state handed to each connection task.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) lobby: LobbyHandle,
    pub(crate) codec: C,
    /// Close a connection after this long without an inbound frame.
    pub(crate) idle_timeout: Option<Duration>,
    /// Flips to `true` when the server stops; handlers close their sockets.
    pub(crate) shutdown: watch::Receiver<bool>,
}

/// Builder for configuring and starting a Ludocast server.
///
/// ```rust,no_run
/// use ludocast::prelude::*;
///
/// # async fn run() -> Result<(), LudocastError> {
/// let server = LudocastServer::builder()
///     .bind("0.0.0.0:4000")
///     .lobby_config(LobbyConfig { player_count: 4, ..LobbyConfig::default() })
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct LudocastServerBuilder {
    bind_addr: String,
    lobby_config: LobbyConfig,
    channel_size: usize,
    idle_timeout: Option<Duration>,
}

impl LudocastServerBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
            lobby_config: LobbyConfig::default(),
            channel_size: DEFAULT_CHANNEL_SIZE,
            idle_timeout: None,
        }
    }

    /// Sets the address to bind to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets seat count, color ring, and rejection policy.
    pub fn lobby_config(mut self, config: LobbyConfig) -> Self {
        self.lobby_config = config;
        self
    }

    /// Bounds the lobby's command queue.
    pub fn channel_size(mut self, size: usize) -> Self {
        self.channel_size = size;
        self
    }

    /// Drops connections that stay silent for `timeout`. Off by default.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Binds the listener and spawns the lobby using [`JsonCodec`].
    pub async fn build(self) -> Result<LudocastServer<JsonCodec>, LudocastError> {
        self.build_with_codec(JsonCodec).await
    }

    /// Binds the listener and spawns the lobby using a custom codec.
    pub async fn build_with_codec<C: Codec>(
        self,
        codec: C,
    ) -> Result<LudocastServer<C>, LudocastError> {
        let lobby = spawn_lobby(self.lobby_config, self.channel_size)?;
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let (shutdown_tx, shutdown) = watch::channel(false);
        let state = Arc::new(ServerState {
            lobby,
            codec,
            idle_timeout: self.idle_timeout,
            shutdown,
        });

        Ok(LudocastServer {
            transport,
            state,
            shutdown_tx,
        })
    }
}

impl Default for LudocastServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Ludocast server.
///
/// Call [`run()`](Self::run) or [`run_until()`](Self::run_until) to start
/// accepting connections.
pub struct LudocastServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
    shutdown_tx: watch::Sender<bool>,
}

impl LudocastServer<JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> LudocastServerBuilder {
        LudocastServerBuilder::new()
    }
}

impl<C: Codec> LudocastServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// A handle to the lobby, for pushing `newChallenge` notifications
    /// or inspecting claims from outside the connection handlers.
    pub fn lobby(&self) -> LobbyHandle {
        self.state.lobby.clone()
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(self) -> Result<(), LudocastError> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the accept loop until `shutdown` resolves, then stops the
    /// lobby and tells every connection handler to detach and close its
    /// socket.
    pub async fn run_until(
        mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), LudocastError> {
        tracing::info!(addr = ?self.local_addr().ok(), "Ludocast server running");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
                accepted = self.transport.accept() => match accepted {
                    Ok(conn) => {
                        let state = Arc::clone(&self.state);
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(conn, state).await {
                                tracing::debug!(error = %e, "connection ended with error");
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept failed");
                    }
                },
            }
        }

        self.shutdown_tx.send_replace(true);
        self.transport.shutdown().await?;
        // The actor may already be gone; nothing left to stop then.
        let _ = self.state.lobby.shutdown().await;
        tracing::info!("Ludocast server stopped");
        Ok(())
    }
}
