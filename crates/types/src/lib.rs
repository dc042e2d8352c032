//! Base types for the packlog record codec.
//!
//! A [`Schema`] is an ordered list of named fields, each carrying a
//! [`FieldType`] whose [`TypeCode`] is part of the permanent wire format.
//! A [`Record`] maps field names to tagged [`Value`]s and is encoded against
//! a schema by `packlog-codec`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use ::serde::{Deserialize, Serialize};

pub mod address;
pub mod fmt;
pub mod price;
pub mod schema;
pub mod serde;
pub mod value;

pub use address::{AddressError, ADDRESS_TEXT_LENGTH};
pub use price::{ParsePriceError, Price};
pub use schema::{Field, FieldType, Schema, SchemaError, TypeCode, UnknownTypeCode};
pub use value::{Record, Value};

/// Width in bytes of a content digest.
pub const DIGEST_LENGTH: usize = 32;

/// Width in bytes of an address (a raw ed25519 public key).
pub const ADDRESS_LENGTH: usize = 32;

/// Width in bytes of an encoded [`Price`].
pub const PRICE_LENGTH: usize = 17;

/// Decoded width in bytes of the signatures carried in `base64` fields.
pub const SIGNATURE_LENGTH: usize = 64;

/// Width in bytes of the big-endian length prefixes used for nested formats
/// and self-described records.
pub const SCHEMA_LEN_PREFIX: usize = 8;

/// A 32-byte content digest.
///
/// Produced by hashing the self-described encoding of a record, and used both
/// as the value of `hash` fields and as the log's lookup key.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(proptest_derive::Arbitrary))]
pub struct Digest(#[serde(with = "crate::serde::hash")] pub [u8; DIGEST_LENGTH]);

/// A 32-byte account address.
///
/// Displayed and parsed in its checksummed base32 text form; see
/// [`address`].
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(proptest_derive::Arbitrary))]
pub struct Address(#[serde(with = "crate::serde::address")] pub [u8; ADDRESS_LENGTH]);

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LENGTH] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_LENGTH] {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
