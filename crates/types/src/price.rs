//! Fixed-point prices.
//!
//! A price is a 17-byte big-endian unsigned integer: one byte wider than a
//! `u128` so that the product of two 64-bit quantities scaled by a 64-bit
//! fixed-point factor never overflows.

use crate::PRICE_LENGTH;
use core::{fmt, str};
use serde::{Deserialize, Serialize};

/// A fixed-point price held as its 17 big-endian bytes.
///
/// Byte-wise ordering of big-endian integers equals numeric ordering, so the
/// derived `Ord` compares prices by value.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(proptest_derive::Arbitrary))]
pub struct Price(#[serde(with = "crate::serde::hash")] pub [u8; PRICE_LENGTH]);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self([0; PRICE_LENGTH]);

    /// The price as a `u128`, or `None` if the leading byte is set.
    pub fn to_u128(&self) -> Option<u128> {
        let [high, rest @ ..] = self.0;
        if high != 0 {
            return None;
        }
        Some(u128::from_be_bytes(rest))
    }
}

impl From<u128> for Price {
    fn from(value: u128) -> Self {
        let mut bytes = [0; PRICE_LENGTH];
        bytes[1..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<[u8; PRICE_LENGTH]> for Price {
    fn from(bytes: [u8; PRICE_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_u128() {
            Some(value) => value.fmt(f),
            None => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Price({self})")
    }
}

/// Text could not be parsed as a price.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParsePriceError {
    /// Not a decimal `u128`.
    #[error("invalid decimal price: {0}")]
    Decimal(#[from] core::num::ParseIntError),
    /// Not `0x` followed by exactly 17 bytes of hex.
    #[error("invalid hex price: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Parses the forms written by `Display`: a decimal `u128`, or `0x` and the
/// full 17 bytes in hex for wider prices.
impl str::FromStr for Price {
    type Err = ParsePriceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("0x") {
            Some(digits) => {
                let mut bytes = [0; PRICE_LENGTH];
                hex::decode_to_slice(digits, &mut bytes)?;
                Ok(Self(bytes))
            }
            None => Ok(s.parse::<u128>().map(Self::from)?),
        }
    }
}
