//! Game-room coordination for Ludocast.
//!
//! A lobby lets a fixed number of clients claim colors, fixes the turn
//! order once every seat is taken, and fans events out to every live
//! connection. Each lobby runs as one Tokio task (actor model) that owns
//! the room state and the connection set.
//!
//! # Key types
//!
//! - [`compute_sequence`]: turn order from claimed colors and the ring
//! - [`Room`]: claimed colors, lobby state, turn order
//! - [`EventRouter`]: what each inbound event does and who hears it
//! - [`LobbyHandle`]: send commands to a running lobby actor
//! - [`LobbyConfig`] / [`ColorRing`]: seats, ring order, rejection policy

mod config;
mod error;
mod lobby;
mod room;
mod router;
mod sequence;

pub use config::{ColorRing, LobbyConfig, LobbyState};
pub use error::LobbyError;
pub use lobby::{ConnectionSender, DEFAULT_CHANNEL_SIZE, LobbyHandle, LobbyInfo, spawn_lobby};
pub use room::{Claim, Room, Snapshot};
pub use router::{Delivery, EventRouter};
pub use sequence::compute_sequence;
