//! Append-only audit log of encoded records.
//!
//! Entries are committed to by a binary Merkle tree so that anyone holding a
//! published [`MerkleLog::root`] can check an entry's inclusion with only the
//! entry, its position and a [`Proof`]; see [`validate`].
//!
//! [`MerkleLog`] is the single-owner log. [`AuditLog`] is a cloneable handle
//! for sharing one log between a writer and any number of readers.
//!
//! Both resolve `hash` references by content digest, so a log holding the
//! self-described encodings of records can be handed to
//! [`packlog_codec::resolve`] to expand references between them.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub use index::DigestIndex;
pub use proof::{validate, validate_range, Inclusion, Proof, RangeInclusion};
pub use shared::AuditLog;
pub use tree::MerkleLog;

mod index;
mod proof;
mod shared;
mod tree;
