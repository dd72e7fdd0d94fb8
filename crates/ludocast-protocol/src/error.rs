//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding lobby frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// An outbound event could not be serialized.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// An inbound frame was not valid JSON, named an unknown event, or
    /// carried a payload of the wrong shape.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A value parsed but violates protocol rules, e.g. an unknown color
    /// name in configuration.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
