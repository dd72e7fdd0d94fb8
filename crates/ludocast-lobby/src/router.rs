//! Event routing: what each inbound event does to the room and who hears
//! about it.
//!
//! Routing is synchronous and free of I/O. The lobby actor calls
//! [`EventRouter::route`] with exclusive access to the room and then
//! dispatches the returned deliveries.

use ludocast_protocol::{ClaimRejection, InboundEvent, OutboundEvent, Recipient};
use ludocast_transport::ConnectionId;

use crate::{Claim, Room};

/// One outbound event and its addressing.
pub type Delivery = (Recipient, OutboundEvent);

/// Translates inbound events into room operations and deliveries.
#[derive(Debug, Clone, Copy)]
pub struct EventRouter {
    notify_rejections: bool,
}

impl EventRouter {
    /// `notify_rejections` controls whether a refused claim is answered
    /// with `claimRejected` to the sender.
    pub fn new(notify_rejections: bool) -> Self {
        Self { notify_rejections }
    }

    /// The announcement for a freshly attached connection.
    pub fn connected(conn_id: ConnectionId) -> Delivery {
        (Recipient::All, OutboundEvent::Connected(conn_id.to_string()))
    }

    /// Applies `event` from `sender` to `room`.
    ///
    /// | inbound | deliveries |
    /// |---|---|
    /// | `chat` | all |
    /// | `move`, `diceRoll` | all except sender |
    /// | `claimColor` | `gameStart` (if it filled the room) then `claimedSet` to all; on rejection optionally `claimRejected` to sender |
    /// | `restart` | `restart` to all except sender |
    /// | `requestClaimedSet` | `claimedSet` to sender |
    pub fn route(&self, room: &mut Room, sender: ConnectionId, event: InboundEvent) -> Vec<Delivery> {
        match event {
            InboundEvent::Chat(text) => vec![(Recipient::All, OutboundEvent::Chat(text))],

            InboundEvent::Move(mv) => {
                tracing::debug!(%sender, "relaying move");
                vec![(Recipient::AllExcept(sender), OutboundEvent::Move(mv))]
            }

            InboundEvent::DiceRoll(n) => {
                tracing::debug!(%sender, roll = n, "relaying dice roll");
                vec![(Recipient::AllExcept(sender), OutboundEvent::DiceRoll(n))]
            }

            InboundEvent::ClaimColor(color) => match room.claim(color) {
                Ok(claim) => {
                    tracing::info!(
                        %sender,
                        %color,
                        claimed = room.claimed().len(),
                        players = room.player_count(),
                        "color claimed"
                    );
                    let mut out = Vec::with_capacity(2);
                    if let Claim::Filled(start) = claim {
                        tracing::info!(first = %start.first, "lobby full, game starting");
                        out.push((Recipient::All, OutboundEvent::GameStart(start)));
                    }
                    out.push((
                        Recipient::All,
                        OutboundEvent::ClaimedSet(room.claimed().to_vec()),
                    ));
                    out
                }
                Err(e) => {
                    tracing::info!(%sender, %color, reason = %e, "claim rejected");
                    if self.notify_rejections {
                        vec![(
                            Recipient::Connection(sender),
                            OutboundEvent::ClaimRejected(ClaimRejection {
                                color,
                                reason: e.to_string(),
                            }),
                        )]
                    } else {
                        Vec::new()
                    }
                }
            },

            InboundEvent::Restart => {
                tracing::info!(%sender, released = room.claimed().len(), "lobby restarted");
                room.restart();
                vec![(Recipient::AllExcept(sender), OutboundEvent::Restart)]
            }

            InboundEvent::RequestClaimedSet => vec![(
                Recipient::Connection(sender),
                OutboundEvent::ClaimedSet(room.claimed().to_vec()),
            )],
        }
    }
}
