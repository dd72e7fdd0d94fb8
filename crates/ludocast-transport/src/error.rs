/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Accepting a TCP connection failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// The WebSocket upgrade handshake was rejected or broke off.
    #[error("websocket handshake failed: {0}")]
    Handshake(String),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}
