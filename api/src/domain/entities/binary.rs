//! Wire encoding for optional binary attachments (pictures, registration
//! certificates).
//!
//! Written as base64. Read from either base64 or a plain array of bytes,
//! which is what the web front end posts for uploaded files.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Encoded {
    Base64(String),
    Bytes(Vec<u8>),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Encoded>::deserialize(deserializer)? {
        Some(Encoded::Base64(s)) => STANDARD
            .decode(s.as_bytes())
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(Encoded::Bytes(bytes)) => Ok(Some(bytes)),
        None => Ok(None),
    }
}
