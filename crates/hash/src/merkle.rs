//! Merkle tree node hashing.
//!
//! Leaves and interior nodes are hashed under distinct one byte prefixes so
//! that an interior node can never be presented as a leaf.

use crate::hash_bytes_iter;
use packlog_types::Digest;

/// Prefix of leaf hashes.
pub const LEAF_PREFIX: u8 = 0x00;

/// Prefix of interior node hashes.
pub const NODE_PREFIX: u8 = 0x01;

/// The digest of an empty subtree, and the root of an empty tree.
pub const EMPTY: Digest = Digest([0; 32]);

/// Hash a leaf: `H(0x00 ‖ entry)`.
pub fn leaf(entry: &[u8]) -> Digest {
    hash_bytes_iter([&[LEAF_PREFIX][..], entry])
}

/// Hash an interior node: `H(0x01 ‖ left ‖ right)`.
pub fn node(left: &Digest, right: &Digest) -> Digest {
    hash_bytes_iter([&[NODE_PREFIX][..], &left.0[..], &right.0[..]])
}
