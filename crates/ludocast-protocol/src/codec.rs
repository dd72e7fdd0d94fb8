//! Codec trait and the JSON implementation.
//!
//! Frames are text on the wire, so a codec encodes to `String` and
//! decodes from raw bytes (the transport hands over text and binary
//! frames alike).

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts events to frame text and frames back to events.
///
/// `Send + Sync + 'static` because one codec is shared by every
/// connection task for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into frame text.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a received frame.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or do
    /// not match the expected shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use ludocast_protocol::{Codec, Color, InboundEvent, JsonCodec};
///
/// let codec = JsonCodec;
/// let event: InboundEvent = codec
///     .decode(br#"{"event":"claimColor","data":"green"}"#)
///     .unwrap();
/// assert_eq!(event, InboundEvent::ClaimColor(Color::Green));
///
/// let text = codec.encode(&event).unwrap();
/// assert_eq!(text, r#"{"event":"claimColor","data":"green"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InboundEvent, OutboundEvent};

    #[test]
    fn test_decode_error_is_reported_as_decode() {
        let err = JsonCodec.decode::<InboundEvent>(b"{not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
        assert!(err.to_string().starts_with("decode failed"));
    }

    #[test]
    fn test_encode_produces_single_line_text() {
        let text = JsonCodec
            .encode(&OutboundEvent::Chat("hello\nworld".into()))
            .unwrap();
        assert!(!text.contains('\n'));
    }
}
