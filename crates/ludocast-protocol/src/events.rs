//! Lobby events and delivery addressing.
//!
//! Every frame is an adjacently tagged JSON object:
//!
//! ```json
//! {"event": "claimColor", "data": "green"}
//! {"event": "restart"}
//! ```
//!
//! `data` is absent for events that carry nothing.

use ludocast_transport::ConnectionId;
use serde::{Deserialize, Serialize};

use crate::{ChallengeRecord, Color, GameStart};

/// Who an outbound event is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every live connection, the sender included.
    All,
    /// A single connection (usually the sender).
    Connection(ConnectionId),
    /// Every live connection except this one.
    AllExcept(ConnectionId),
}

impl Recipient {
    /// Returns `true` if a connection with `id` is addressed.
    pub fn includes(&self, id: ConnectionId) -> bool {
        match self {
            Self::All => true,
            Self::Connection(target) => *target == id,
            Self::AllExcept(excluded) => *excluded != id,
        }
    }
}

/// Client → server events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum InboundEvent {
    /// Free-text chat line, relayed to everyone.
    Chat(String),
    /// A board move. The lobby relays it without looking inside.
    Move(serde_json::Value),
    /// The number a player rolled.
    DiceRoll(i64),
    /// Claim a color for this client.
    ClaimColor(Color),
    /// Clear every claim and go back to an empty lobby.
    Restart,
    /// Ask for the current claimed colors.
    RequestClaimedSet,
}

impl InboundEvent {
    /// The wire name of this event, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chat(_) => "chat",
            Self::Move(_) => "move",
            Self::DiceRoll(_) => "diceRoll",
            Self::ClaimColor(_) => "claimColor",
            Self::Restart => "restart",
            Self::RequestClaimedSet => "requestClaimedSet",
        }
    }
}

/// Why a claim was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRejection {
    pub color: Color,
    pub reason: String,
}

/// A frame the server could not accept. `code` follows HTTP conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    pub code: u16,
    pub message: String,
}

/// Server → client events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum OutboundEvent {
    /// A connection joined; carries its opaque id.
    Connected(String),
    Chat(String),
    Move(serde_json::Value),
    DiceRoll(i64),
    /// The claimed colors, in claim order.
    ClaimedSet(Vec<Color>),
    /// The lobby filled; play order is fixed.
    GameStart(GameStart),
    /// Another client reset the lobby.
    Restart,
    ClaimRejected(ClaimRejection),
    NewChallenge(ChallengeRecord),
    Error(ErrorNotice),
}

impl OutboundEvent {
    /// The wire name of this event, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::Chat(_) => "chat",
            Self::Move(_) => "move",
            Self::DiceRoll(_) => "diceRoll",
            Self::ClaimedSet(_) => "claimedSet",
            Self::GameStart(_) => "gameStart",
            Self::Restart => "restart",
            Self::ClaimRejected(_) => "claimRejected",
            Self::NewChallenge(_) => "newChallenge",
            Self::Error(_) => "error",
        }
    }
}
