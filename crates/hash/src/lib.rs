//! A minimal crate containing packlog's [`hash_bytes`] digest function and the
//! domain-separated [`merkle`] node hashes built on it.
//!
//! All digests are SHA-512/256. Records are referenced by the digest of their
//! self-described encoding, so any change to this function changes every
//! reference ever written to a log.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use packlog_types::Digest;
use sha2::Digest as _;

pub mod merkle;

/// Hash a byte slice using SHA-512/256.
pub fn hash_bytes(bytes: &[u8]) -> Digest {
    let mut hasher = sha2::Sha512_256::new();
    hasher.update(bytes);
    Digest(hasher.finalize().into())
}

/// Hash the concatenation of the given byte slices using SHA-512/256.
///
/// Equivalent to concatenating the slices and calling [`hash_bytes`] without
/// the intermediate allocation.
pub fn hash_bytes_iter<'a>(iter: impl IntoIterator<Item = &'a [u8]>) -> Digest {
    let mut hasher = sha2::Sha512_256::new();
    for bytes in iter {
        hasher.update(bytes);
    }
    Digest(hasher.finalize().into())
}
