//! Lobby actor: one Tokio task that owns a room and its live connections.
//!
//! Connection handlers never touch the [`Room`] directly. They send
//! commands through a [`LobbyHandle`] and the actor applies them one at
//! a time, so claims, restarts, attaches, and detaches are all
//! linearized. Deliveries are pushed into per-connection unbounded
//! queues; no socket I/O happens inside the actor.

use std::collections::BTreeMap;

use ludocast_protocol::{ChallengeRecord, InboundEvent, OutboundEvent, Recipient};
use ludocast_transport::ConnectionId;
use tokio::sync::{mpsc, oneshot};

use crate::router::{Delivery, EventRouter};
use crate::{LobbyConfig, LobbyError, Room, Snapshot};

/// Default command channel size for lobby actors.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Queue that carries outbound events to one connection's writer task.
pub type ConnectionSender = mpsc::UnboundedSender<OutboundEvent>;

/// Commands sent to the lobby actor.
///
/// Variants with a `reply` are request/response; the rest are
/// fire-and-forget.
pub(crate) enum LobbyCommand {
    /// Register a connection's outbound queue.
    Attach {
        conn_id: ConnectionId,
        sender: ConnectionSender,
        reply: oneshot::Sender<Result<(), LobbyError>>,
    },

    /// Drop a connection from the live set. Replies `true` if it was
    /// attached.
    Detach {
        conn_id: ConnectionId,
        reply: oneshot::Sender<bool>,
    },

    /// An event received from a connection.
    Inbound {
        sender: ConnectionId,
        event: InboundEvent,
    },

    /// A server-originated broadcast (new wager challenge).
    Publish(OutboundEvent),

    /// Read the room and connection count.
    GetInfo { reply: oneshot::Sender<LobbyInfo> },

    /// Stop the actor.
    Shutdown,
}

/// A point-in-time view of a lobby.
#[derive(Debug, Clone)]
pub struct LobbyInfo {
    /// Claims, state tag, and turn order.
    pub snapshot: Snapshot,
    /// Number of attached connections.
    pub connections: usize,
}

/// Handle to a running lobby actor.
///
/// Cheap to clone: it wraps an `mpsc::Sender`. Every connection handler
/// and the challenge subsystem hold one.
#[derive(Clone)]
pub struct LobbyHandle {
    sender: mpsc::Sender<LobbyCommand>,
}

impl LobbyHandle {
    /// Registers a connection and broadcasts `connected` to everyone.
    pub async fn attach(
        &self,
        conn_id: ConnectionId,
        sender: ConnectionSender,
    ) -> Result<(), LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(LobbyCommand::Attach {
            conn_id,
            sender,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| LobbyError::Unavailable)?
    }

    /// Removes a connection from the live set.
    ///
    /// Returns once the actor has dropped the connection's queue, so no
    /// delivery started afterwards can reach it. Claims are kept.
    pub async fn detach(&self, conn_id: ConnectionId) -> Result<bool, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(LobbyCommand::Detach {
            conn_id,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| LobbyError::Unavailable)
    }

    /// Hands an inbound event to the lobby (fire-and-forget).
    ///
    /// Events are applied in the order they are submitted.
    pub async fn submit(
        &self,
        sender: ConnectionId,
        event: InboundEvent,
    ) -> Result<(), LobbyError> {
        self.send(LobbyCommand::Inbound { sender, event }).await
    }

    /// Broadcasts a freshly persisted wager challenge as `newChallenge`.
    pub async fn publish_challenge(&self, challenge: ChallengeRecord) -> Result<(), LobbyError> {
        self.send(LobbyCommand::Publish(OutboundEvent::NewChallenge(challenge)))
            .await
    }

    /// Requests the current lobby info.
    pub async fn info(&self) -> Result<LobbyInfo, LobbyError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(LobbyCommand::GetInfo { reply: reply_tx }).await?;
        reply_rx.await.map_err(|_| LobbyError::Unavailable)
    }

    /// Shorthand for `info().await?.snapshot`.
    pub async fn snapshot(&self) -> Result<Snapshot, LobbyError> {
        Ok(self.info().await?.snapshot)
    }

    /// Tells the lobby to stop. Attached queues are dropped, which ends
    /// their writer tasks.
    pub async fn shutdown(&self) -> Result<(), LobbyError> {
        self.send(LobbyCommand::Shutdown).await
    }

    async fn send(&self, cmd: LobbyCommand) -> Result<(), LobbyError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| LobbyError::Unavailable)
    }
}

/// The actor state. Runs inside its own Tokio task.
struct LobbyActor {
    room: Room,
    router: EventRouter,
    /// Live connections, ordered by id so fan-out order is stable.
    connections: BTreeMap<ConnectionId, ConnectionSender>,
    receiver: mpsc::Receiver<LobbyCommand>,
}

impl LobbyActor {
    async fn run(mut self) {
        tracing::info!(
            players = self.room.player_count(),
            ring = %self.room.ring(),
            "lobby actor started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                LobbyCommand::Attach {
                    conn_id,
                    sender,
                    reply,
                } => {
                    let result = self.handle_attach(conn_id, sender);
                    let _ = reply.send(result);
                }
                LobbyCommand::Detach { conn_id, reply } => {
                    let _ = reply.send(self.handle_detach(conn_id));
                }
                LobbyCommand::Inbound { sender, event } => {
                    if !self.connections.contains_key(&sender) {
                        tracing::warn!(%sender, event = event.name(), "event from detached connection, ignoring");
                        continue;
                    }
                    let deliveries = self.router.route(&mut self.room, sender, event);
                    self.dispatch(deliveries);
                }
                LobbyCommand::Publish(event) => {
                    tracing::info!(event = event.name(), "publishing to all connections");
                    self.dispatch(vec![(Recipient::All, event)]);
                }
                LobbyCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                LobbyCommand::Shutdown => {
                    tracing::info!("lobby shutting down");
                    break;
                }
            }
        }

        tracing::info!("lobby actor stopped");
    }

    fn handle_attach(
        &mut self,
        conn_id: ConnectionId,
        sender: ConnectionSender,
    ) -> Result<(), LobbyError> {
        if self.connections.contains_key(&conn_id) {
            return Err(LobbyError::AlreadyAttached(conn_id));
        }
        self.connections.insert(conn_id, sender);
        tracing::info!(%conn_id, connections = self.connections.len(), "connection attached");

        self.dispatch(vec![EventRouter::connected(conn_id)]);
        Ok(())
    }

    fn handle_detach(&mut self, conn_id: ConnectionId) -> bool {
        let removed = self.connections.remove(&conn_id).is_some();
        if removed {
            // Claims survive a disconnect; only a restart frees colors.
            tracing::info!(
                %conn_id,
                connections = self.connections.len(),
                claimed = self.room.claimed().len(),
                "connection detached"
            );
        }
        removed
    }

    /// Pushes each delivery into the queue of every addressed connection.
    ///
    /// A queue whose receiver is gone belongs to a handler that already
    /// exited; it is pruned so later fan-outs skip it.
    fn dispatch(&mut self, deliveries: Vec<Delivery>) {
        let mut dead = Vec::new();
        for (recipient, event) in deliveries {
            tracing::debug!(event = event.name(), ?recipient, "dispatching");
            for (conn_id, sender) in &self.connections {
                if recipient.includes(*conn_id) && sender.send(event.clone()).is_err() {
                    dead.push(*conn_id);
                }
            }
        }
        for conn_id in dead {
            if self.connections.remove(&conn_id).is_some() {
                tracing::debug!(%conn_id, "pruned closed connection");
            }
        }
    }

    fn info(&self) -> LobbyInfo {
        LobbyInfo {
            snapshot: self.room.snapshot(),
            connections: self.connections.len(),
        }
    }
}

/// Validates `config`, spawns a lobby actor, and returns its handle.
///
/// `channel_size` bounds the command queue; submitters wait when it is
/// full.
pub fn spawn_lobby(config: LobbyConfig, channel_size: usize) -> Result<LobbyHandle, LobbyError> {
    config.validate()?;
    let (tx, rx) = mpsc::channel(channel_size.max(1));

    let actor = LobbyActor {
        room: Room::new(&config),
        router: EventRouter::new(config.notify_rejections),
        connections: BTreeMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    Ok(LobbyHandle { sender: tx })
}
