//! Unified error type for the Ludocast server.

use ludocast_lobby::LobbyError;
use ludocast_protocol::ProtocolError;
use ludocast_transport::TransportError;

/// Top-level error wrapping each layer's error.
///
/// `#[from]` lets `?` lift layer errors into this type.
#[derive(Debug, thiserror::Error)]
pub enum LudocastError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A lobby-level error (configuration, actor gone).
    #[error(transparent)]
    Lobby(#[from] LobbyError),
}
