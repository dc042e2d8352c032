//! The text form of an [`Address`].
//!
//! An address is written as unpadded RFC 4648 base32 of the 32 key bytes
//! followed by a 4-byte checksum: the last 4 bytes of the SHA-512/256 digest
//! of the key. The result is always [`ADDRESS_TEXT_LENGTH`] upper case
//! characters, the form used by the chain that issues the keys.

use crate::{Address, ADDRESS_LENGTH};
use core::{
    fmt::{self, Write as _},
    str,
};
use sha2::{Digest as _, Sha512_256};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Length of the text form of an address.
pub const ADDRESS_TEXT_LENGTH: usize = 58;

const CHECKSUM_LENGTH: usize = 4;
const RAW_LENGTH: usize = ADDRESS_LENGTH + CHECKSUM_LENGTH;
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Text could not be parsed as an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The text is not [`ADDRESS_TEXT_LENGTH`] characters long.
    #[error("expected {ADDRESS_TEXT_LENGTH} characters, found {0}")]
    Length(usize),
    /// A character outside the base32 alphabet.
    #[error("invalid base32 character at position {0}")]
    Character(usize),
    /// The unused low bits of the last character are not zero.
    #[error("non-zero trailing bits")]
    TrailingBits,
    /// The checksum does not match the key.
    #[error("checksum mismatch")]
    Checksum,
}

fn checksum(key: &[u8; ADDRESS_LENGTH]) -> [u8; CHECKSUM_LENGTH] {
    let digest = Sha512_256::digest(key);
    let mut sum = [0; CHECKSUM_LENGTH];
    sum.copy_from_slice(&digest[digest.len() - CHECKSUM_LENGTH..]);
    sum
}

fn write_base32(bytes: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in bytes {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            f.write_char(char::from(ALPHABET[((acc >> bits) & 0x1f) as usize]))?;
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        f.write_char(char::from(ALPHABET[((acc << (5 - bits)) & 0x1f) as usize]))?;
    }
    Ok(())
}

fn read_base32(text: &str) -> Result<[u8; RAW_LENGTH], AddressError> {
    if text.len() != ADDRESS_TEXT_LENGTH {
        return Err(AddressError::Length(text.len()));
    }
    let mut raw = [0; RAW_LENGTH];
    let mut written = 0;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for (position, c) in text.bytes().enumerate() {
        let value = ALPHABET
            .iter()
            .position(|a| *a == c)
            .ok_or(AddressError::Character(position))?;
        acc = (acc << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            // 58 characters carry 290 bits, so exactly `RAW_LENGTH` bytes.
            raw[written] = (acc >> bits) as u8;
            written += 1;
            acc &= (1 << bits) - 1;
        }
    }
    if acc != 0 {
        return Err(AddressError::TrailingBits);
    }
    Ok(raw)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut raw = [0; RAW_LENGTH];
        raw[..ADDRESS_LENGTH].copy_from_slice(&self.0);
        raw[ADDRESS_LENGTH..].copy_from_slice(&checksum(&self.0));
        write_base32(&raw, f)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl str::FromStr for Address {
    type Err = AddressError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = read_base32(s)?;
        let mut key = [0; ADDRESS_LENGTH];
        key.copy_from_slice(&raw[..ADDRESS_LENGTH]);
        if raw[ADDRESS_LENGTH..] != checksum(&key) {
            return Err(AddressError::Checksum);
        }
        Ok(Self(key))
    }
}
