// JSON codecs for 16-byte identifier fields.
//
// Identifiers travel on the wire as raw 16-byte buffers but read as
// canonical UUID strings in JSON. An empty buffer renders as "" and parses
// back to an empty buffer; any other length is an error.

use bytes::Bytes;
use serde::{de, ser, ser::SerializeSeq, Deserialize, Deserializer, Serializer};
use uuid::Uuid;

/// Serialize a 16-byte id buffer as a canonical UUID string.
pub fn encode_id_field<S, T>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    let bytes = bytes.as_ref();
    if bytes.is_empty() {
        return serializer.serialize_str("");
    }
    let arr: [u8; 16] = bytes
        .try_into()
        .map_err(|_| ser::Error::custom("id field is not 16 bytes"))?;
    serializer.collect_str(&Uuid::from_bytes(arr))
}

/// Deserialize a UUID string into a `Vec<u8>` id buffer.
pub fn decode_id_vec_field<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_id(&s).map_err(de::Error::custom)
}

/// Deserialize a UUID string into a `bytes::Bytes` id buffer.
pub fn decode_id_buf_field<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    decode_id_vec_field(deserializer).map(Bytes::from)
}

/// Serialize a repeated id field as a sequence of UUID strings.
pub fn encode_repeated_id_field<S, T>(data: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    let mut seq = serializer.serialize_seq(Some(data.len()))?;
    for item in data {
        let bytes = item.as_ref();
        if bytes.is_empty() {
            seq.serialize_element("")?;
            continue;
        }
        let arr: [u8; 16] = bytes
            .try_into()
            .map_err(|_| ser::Error::custom("id field is not 16 bytes"))?;
        seq.serialize_element(&Uuid::from_bytes(arr).to_string())?;
    }
    seq.end()
}

/// Deserialize a sequence of UUID strings into `Vec<Vec<u8>>`.
pub fn decode_repeated_id_vec_field<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Vec<Vec<u8>>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a sequence of UUID text")
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: de::SeqAccess<'de>,
        {
            let mut data = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(s) = seq.next_element::<String>()? {
                data.push(parse_id(&s).map_err(de::Error::custom)?);
            }
            Ok(data)
        }
    }

    deserializer.deserialize_seq(Visitor)
}

/// Deserialize a sequence of UUID strings into `Vec<bytes::Bytes>`.
pub fn decode_repeated_id_buf_field<'de, D>(deserializer: D) -> Result<Vec<Bytes>, D::Error>
where
    D: Deserializer<'de>,
{
    decode_repeated_id_vec_field(deserializer)
        .map(|data| data.into_iter().map(Bytes::from).collect())
}

fn parse_id(s: &str) -> Result<Vec<u8>, uuid::Error> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Uuid::try_parse(s)?.as_bytes().to_vec())
}
