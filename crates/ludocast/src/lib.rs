//! # Ludocast
//!
//! Realtime lobby server for four-color race board games.
//!
//! Clients connect over WebSocket, claim one of four colors, and once every
//! seat is taken the server fixes the turn order from a global color ring.
//! Chat, moves, and dice rolls are relayed between connections; restarts
//! release every claim.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ludocast::prelude::*;
//!
//! # async fn run() -> Result<(), LudocastError> {
//! let server = LudocastServer::builder()
//!     .bind("0.0.0.0:4000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
pub mod logging;
mod server;

pub use error::LudocastError;
pub use server::{LudocastServer, LudocastServerBuilder};

/// Everything needed to embed a lobby server.
pub mod prelude {
    pub use crate::{LudocastError, LudocastServer, LudocastServerBuilder};
    pub use ludocast_lobby::{ColorRing, LobbyConfig, LobbyHandle, LobbyInfo, LobbyState};
    pub use ludocast_protocol::{
        ChallengeRecord, Codec, Color, GameStart, InboundEvent, JsonCodec, OutboundEvent,
        Participant, TurnSequence,
    };
}
