//! Serialization of addresses in their checksummed text form for
//! human-readable formats.
//!
//! Binary formats get the raw key bytes.

use crate::{Address, ADDRESS_LENGTH};
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

/// Serialize the key bytes of an [`Address`].
pub fn serialize<S>(key: &[u8; ADDRESS_LENGTH], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if s.is_human_readable() {
        s.collect_str(&Address(*key))
    } else {
        super::hash::serialize(key, s)
    }
}

/// Deserialize the key bytes of an [`Address`].
pub fn deserialize<'de, D>(d: D) -> Result<[u8; ADDRESS_LENGTH], D::Error>
where
    D: Deserializer<'de>,
{
    if d.is_human_readable() {
        let string = String::deserialize(d)?;
        let address: Address = string.parse().map_err(D::Error::custom)?;
        Ok(address.0)
    } else {
        super::hash::deserialize(d)
    }
}
