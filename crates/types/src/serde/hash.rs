//! Hex serialization of fixed-size byte arrays for human-readable formats.
//!
//! Binary formats get the raw bytes.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Serialize a fixed-size byte array (`Digest`, `Address`, `Price`).
pub fn serialize<const N: usize, S>(bytes: &[u8; N], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if s.is_human_readable() {
        s.serialize_str(&hex::encode_upper(bytes))
    } else {
        bytes[..].serialize(s)
    }
}

/// Deserialize a fixed-size byte array (`Digest`, `Address`, `Price`).
///
/// Hex of either case is accepted.
pub fn deserialize<'de, const N: usize, D>(d: D) -> Result<[u8; N], D::Error>
where
    D: Deserializer<'de>,
{
    let mut bytes = [0; N];
    if d.is_human_readable() {
        let string = String::deserialize(d)?;
        hex::decode_to_slice(string, &mut bytes).map_err(D::Error::custom)?;
    } else {
        let vec = Vec::<u8>::deserialize(d)?;
        if vec.len() != N {
            return Err(D::Error::custom(format!(
                "expected {N} bytes, found {}",
                vec.len()
            )));
        }
        bytes.copy_from_slice(&vec);
    }
    Ok(bytes)
}
