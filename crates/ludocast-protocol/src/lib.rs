//! Wire protocol for Ludocast.
//!
//! This crate defines what clients and the lobby server say to each other:
//!
//! - **Values** ([`Color`], [`TurnSequence`], [`GameStart`],
//!   [`ChallengeRecord`]): the data carried inside events.
//! - **Events** ([`InboundEvent`], [`OutboundEvent`]): one JSON frame
//!   each, shaped as `{"event": "<name>", "data": <payload>}`.
//! - **Addressing** ([`Recipient`]): who an outbound event goes to.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): events to and from
//!   frame text.
//!
//! The protocol layer knows nothing about rooms or sockets; it only
//! describes and (de)serializes messages.
//!
//! ```text
//! Transport (frames) → Protocol (events) → Lobby (room state)
//! ```

mod codec;
mod error;
mod events;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use events::{ClaimRejection, ErrorNotice, InboundEvent, OutboundEvent, Recipient};
pub use types::{ChallengeRecord, Color, GameStart, Participant, Successor, TurnSequence};
