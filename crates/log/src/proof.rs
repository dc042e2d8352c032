//! # Inclusion proofs
//!
//! The log commits to its entries with a complete binary tree whose height is
//! the smallest `h` such that `2^h >= len`. Leaves beyond the end of the log,
//! and any subtree made up only of such leaves, hash to [`merkle::EMPTY`].
//!
//! A proof for the contiguous range `[lo, hi]` lists, level by level from the
//! leaves up, the left sibling of the range when `lo` is a right child and then
//! the right sibling when `hi` is a left child. A point proof is the range
//! proof of a single entry, so it holds exactly one sibling per level.
//!
//! Validation needs nothing from the log. The tree height is implied by the
//! number of siblings, and every malformed proof fails validation rather than
//! raising an error.

use packlog_hash::merkle;
use packlog_types::Digest;
use serde::{Deserialize, Serialize};


/// No proof can be longer than two siblings for every level of a tree
/// addressable by `usize`.
const MAX_SIBLINGS: usize = 2 * usize::BITS as usize;

/// Sibling digests from the leaves to the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proof {
    /// Siblings in the order they are consumed by validation.
    pub siblings: Vec<Digest>,
}

/// An entry together with its position and the proof of its inclusion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inclusion {
    /// Position of the entry in the log.
    pub index: usize,
    /// The entry bytes.
    pub entry: Vec<u8>,
    /// Proof against the root of the log at the time of the lookup.
    pub proof: Proof,
}

/// A contiguous run of entries with a single proof covering all of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeInclusion {
    /// Position of the first entry.
    pub start: usize,
    /// The entries in log order.
    pub entries: Vec<Vec<u8>>,
    /// Proof against the root of the log at the time of the lookup.
    pub proof: Proof,
}

impl Proof {
    /// Number of siblings.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Whether the proof has no siblings, as for a log of one entry.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

impl From<Vec<Digest>> for Proof {
    fn from(siblings: Vec<Digest>) -> Self {
        Self { siblings }
    }
}

impl Inclusion {
    /// Check this inclusion against a published root.
    pub fn verify(&self, root: &Digest) -> bool {
        validate(root, self.index, &self.entry, &self.proof)
    }
}

impl RangeInclusion {
    /// Check this inclusion against a published root.
    pub fn verify(&self, root: &Digest) -> bool {
        validate_range(root, self.start, &self.entries, &self.proof)
    }
}

/// Check that `entry` is at `index` in the log committed to by `root`.
///
/// Never panics; any proof that does not lead to `root` yields `false`.
pub fn validate(root: &Digest, index: usize, entry: &[u8], proof: &Proof) -> bool {
    validate_range(root, index, &[entry], proof)
}

/// Check that `entries` occupy consecutive positions from `start` in the log
/// committed to by `root`.
///
/// Never panics; an empty range, an overflowing range or any proof that does
/// not lead to `root` yields `false`.
pub fn validate_range<E: AsRef<[u8]>>(
    root: &Digest,
    start: usize,
    entries: &[E],
    proof: &Proof,
) -> bool {
    if entries.is_empty() || proof.siblings.len() > MAX_SIBLINGS {
        return false;
    }
    let Some(end) = start.checked_add(entries.len() - 1) else {
        return false;
    };

    let mut nodes: Vec<Digest> = entries
        .iter()
        .map(|entry| merkle::leaf(entry.as_ref()))
        .collect();
    let (mut lo, mut hi) = (start, end);
    let mut siblings = proof.siblings.iter();
    loop {
        if lo == 0 && hi == 0 && siblings.len() == 0 {
            return nodes.first() == Some(root);
        }
        if lo % 2 == 1 {
            let Some(left) = siblings.next() else {
                return false;
            };
            nodes.insert(0, *left);
        }
        if hi % 2 == 0 {
            let Some(right) = siblings.next() else {
                return false;
            };
            nodes.push(*right);
        }
        nodes = nodes
            .chunks_exact(2)
            .map(|pair| merkle::node(&pair[0], &pair[1]))
            .collect();
        lo /= 2;
        hi /= 2;
    }
}

/// Build the proof for `[lo, hi]` from the levels of a tree.
///
/// `levels[0]` holds the leaves and the last level holds only the root.
pub(crate) fn prove(levels: &[Vec<Digest>], mut lo: usize, mut hi: usize) -> Proof {
    let height = levels.len().saturating_sub(1);
    let mut siblings = Vec::new();
    for level in &levels[..height] {
        if lo % 2 == 1 {
            siblings.push(level[lo - 1]);
        }
        if hi % 2 == 0 {
            siblings.push(level.get(hi + 1).copied().unwrap_or(merkle::EMPTY));
        }
        lo /= 2;
        hi /= 2;
    }
    Proof { siblings }
}
