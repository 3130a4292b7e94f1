// Binary round trips between messages and byte buffers.
//
// Plain functions rather than generated From/TryFrom impls: the conversion
// is the same for every message type, so one generic signature covers them
// all. Decode failures surface the prost error unchanged.

use bytes::Bytes;
use prost::Message;

pub use prost::DecodeError;

/// Encode a message into a fresh `Vec<u8>`.
pub fn message_to_vec<M: Message>(msg: &M) -> Vec<u8> {
    msg.encode_to_vec()
}

/// Decode a message from an owned byte vector.
pub fn message_from_vec<M: Message + Default>(data: Vec<u8>) -> Result<M, DecodeError> {
    M::decode(data.as_slice())
}

/// Encode a message into a `bytes::Bytes` buffer.
pub fn message_to_bytes<M: Message>(msg: &M) -> Bytes {
    Bytes::from(msg.encode_to_vec())
}

/// Decode a message from a `bytes::Bytes` buffer.
pub fn message_from_bytes<M: Message + Default>(data: Bytes) -> Result<M, DecodeError> {
    M::decode(data)
}
