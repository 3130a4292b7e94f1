//! Runtime glue between prost-generated message types, raw byte buffers and
//! JSON text.
//!
//! The build half of this workspace injects serde attributes into generated
//! code; this crate supplies the functions those attributes point at, plus a
//! handful of conversions the generated types do not carry themselves:
//!
//! - binary round trips between messages and `Vec<u8>` / `bytes::Bytes`
//!   ([`convert`])
//! - byte-buffer fields rendered as URL-safe base64 in JSON (feature `b64`)
//! - 16-byte id fields rendered as canonical UUID strings (feature `id`)
//! - [`is_zero_value`] for zero-elision via `skip_serializing_if`
//! - [`default_if_null`] for tolerant deserialization of JSON null
//! - [`ToJson`] for debug-oriented JSON rendering (feature `json`)

use serde::{Deserialize, Deserializer};

pub mod convert;

#[cfg(feature = "b64")]
mod codec;
#[cfg(feature = "b64")]
pub use codec::*;

#[cfg(feature = "id")]
mod id;
#[cfg(feature = "id")]
pub use id::*;

pub use convert::{message_from_bytes, message_from_vec, message_to_bytes, message_to_vec};

/// Debug-oriented JSON rendering, available on every serializable message.
///
/// Never fails: a value that cannot be rendered produces a JSON error
/// object instead.
#[cfg(feature = "json")]
pub trait ToJson {
    fn to_json(&self) -> String;
}

#[cfg(feature = "json")]
impl<T: serde::Serialize> ToJson for T {
    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":{:?}}}"#, e.to_string()))
    }
}

/// True when `value` equals its type's default.
///
/// Usable as a `skip_serializing_if` predicate to elide zero-valued fields
/// from JSON output; holds for generated message types as well as scalars.
pub fn is_zero_value<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Deserialize JSON null as the type's default value instead of failing.
///
/// Intended as a `deserialize_with` hook on fields of `#[serde(default)]`
/// message types.
pub fn default_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
