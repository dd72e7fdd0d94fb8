//! Error types for the lobby layer.

use ludocast_protocol::Color;
use ludocast_transport::ConnectionId;

/// Errors that can occur while claiming colors, building a turn order,
/// configuring a lobby, or talking to the lobby actor.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// Another client already holds this color.
    #[error("color {0} is already taken")]
    AlreadyTaken(Color),

    /// Every seat is claimed; nothing more can join until a restart.
    #[error("lobby is full ({0} players)")]
    RoomFull(usize),

    /// A turn order was requested over no colors at all.
    #[error("cannot build a turn order from an empty claim list")]
    EmptyClaim,

    /// The claim list names a color twice.
    #[error("color {0} appears more than once in the claim list")]
    DuplicateColor(Color),

    /// The opening color is not one of the claimed colors.
    #[error("first color {0} has not been claimed")]
    FirstNotClaimed(Color),

    /// The configured color ring is not a permutation of every color.
    #[error("invalid color ring: {0}")]
    InvalidRing(String),

    /// The configured player count is outside `2..=max`.
    #[error("player count {count} must be between 2 and {max}")]
    InvalidPlayerCount { count: usize, max: usize },

    /// The connection is already registered with the lobby.
    #[error("connection {0} is already attached")]
    AlreadyAttached(ConnectionId),

    /// The lobby actor has stopped or its command queue is closed.
    #[error("lobby is unavailable")]
    Unavailable,
}
