// JSON codecs for byte-buffer fields.
//
// Byte buffers have no natural JSON form; these hooks render them as
// URL-safe unpadded base64 text. Wire them up with the build half's field
// attributes:
//
//   #[serde(serialize_with = "protoforge_runtime::encode_bytes_field",
//           deserialize_with = "protoforge_runtime::decode_vec_field")]
//
// The empty buffer encodes to the empty string and decodes back to an
// empty buffer.

use base64::display::Base64Display;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use bytes::Bytes;
use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

/// Serialize a byte buffer as base64 text.
pub fn encode_bytes_field<S, T>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    // Display wrapper writes straight into the serializer without an
    // intermediate String.
    serializer.collect_str(&Base64Display::new(bytes.as_ref(), &URL_SAFE_NO_PAD))
}

/// Deserialize base64 text into a `Vec<u8>`.
pub fn decode_vec_field<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    URL_SAFE_NO_PAD.decode(s).map_err(de::Error::custom)
}

/// Deserialize base64 text into a `bytes::Bytes` buffer.
pub fn decode_buf_field<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    decode_vec_field(deserializer).map(Bytes::from)
}

/// Serialize a repeated byte-buffer field as a sequence of base64 text.
pub fn encode_repeated_bytes_field<S, T>(data: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    let mut seq = serializer.serialize_seq(Some(data.len()))?;
    for item in data {
        seq.serialize_element(&URL_SAFE_NO_PAD.encode(item))?;
    }
    seq.end()
}

/// Deserialize a sequence of base64 text into `Vec<Vec<u8>>`.
pub fn decode_repeated_vec_field<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Vec<Vec<u8>>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a sequence of base64 text")
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: de::SeqAccess<'de>,
        {
            let mut data = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(s) = seq.next_element::<String>()? {
                data.push(URL_SAFE_NO_PAD.decode(s).map_err(de::Error::custom)?);
            }
            Ok(data)
        }
    }

    deserializer.deserialize_seq(Visitor)
}

/// Deserialize a sequence of base64 text into `Vec<bytes::Bytes>`.
pub fn decode_repeated_buf_field<'de, D>(deserializer: D) -> Result<Vec<Bytes>, D::Error>
where
    D: Deserializer<'de>,
{
    decode_repeated_vec_field(deserializer)
        .map(|data| data.into_iter().map(Bytes::from).collect())
}
