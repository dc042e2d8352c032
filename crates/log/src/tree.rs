use crate::{
    proof::{self, Inclusion, Proof, RangeInclusion},
    DigestIndex,
};
use packlog_codec::{resolve::ResolveSync, EncodeError};
use packlog_hash::{hash_bytes, merkle};
use packlog_types::{Digest, Record, Schema};


/// An append-only log of byte entries committed to by a Merkle tree.
///
/// Every level of the tree is kept so that appends and proofs cost
/// `O(log n)`. Entries are never modified or removed.
#[derive(Clone, Debug, Default)]
pub struct MerkleLog {
    entries: Vec<Vec<u8>>,
    /// `levels[0]` holds the leaf hashes; the last level holds only the root.
    levels: Vec<Vec<Digest>>,
    index: DigestIndex,
}

impl MerkleLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries in order, returning the new length of the log.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn append<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
    {
        #[cfg(feature = "tracing")]
        let before = self.len();
        for entry in entries {
            self.push(entry.into());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "appended {} entries, length {}, root {}",
            self.len() - before,
            self.len(),
            self.root()
        );
        self.len()
    }

    /// Append the self-described encoding of a record, returning its content
    /// digest.
    ///
    /// Nothing is appended if the record cannot be encoded.
    pub fn append_record(&mut self, record: &Record, schema: &Schema) -> Result<Digest, EncodeError> {
        let bytes = packlog_codec::encode_with_schema(record, schema)?;
        let digest = hash_bytes(&bytes);
        self.append([bytes]);
        Ok(digest)
    }

    fn push(&mut self, entry: Vec<u8>) {
        let position = self.entries.len();
        self.index.insert(hash_bytes(&entry), position);
        let leaf = merkle::leaf(&entry);
        self.entries.push(entry);

        if self.levels.is_empty() {
            self.levels.push(Vec::new());
        }
        self.levels[0].push(leaf);

        // Recompute the path from the new leaf to the root, growing the tree
        // by a level whenever the current top holds more than one node.
        let mut pos = position;
        let mut k = 0;
        while self.levels[k].len() > 1 {
            let parent = pos / 2;
            let left = self.levels[k][parent * 2];
            let right = self.levels[k]
                .get(parent * 2 + 1)
                .copied()
                .unwrap_or(merkle::EMPTY);
            let node = merkle::node(&left, &right);
            if self.levels.len() == k + 1 {
                self.levels.push(Vec::new());
            }
            let up = &mut self.levels[k + 1];
            if parent < up.len() {
                up[parent] = node;
            } else {
                up.push(node);
            }
            pos = parent;
            k += 1;
        }
    }

    /// The root committing to every entry, or [`merkle::EMPTY`] if the log is
    /// empty.
    pub fn root(&self) -> Digest {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(merkle::EMPTY)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The height of the tree; the number of siblings in a point proof.
    pub fn height(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// All entries in log order.
    pub fn values(&self) -> &[Vec<u8>] {
        &self.entries
    }

    /// The digest index of this log.
    pub fn digests(&self) -> &DigestIndex {
        &self.index
    }

    /// The entry at `index` with its proof, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Inclusion> {
        let entry = self.entries.get(index)?;
        Some(Inclusion {
            index,
            entry: entry.clone(),
            proof: self.prove(index, index),
        })
    }

    /// The entries in `start..end` with a proof covering all of them.
    ///
    /// Returns `None` if the range is empty or reaches past the end of the log.
    pub fn get_range(&self, start: usize, end: usize) -> Option<RangeInclusion> {
        if start >= end || end > self.len() {
            return None;
        }
        Some(RangeInclusion {
            start,
            entries: self.entries[start..end].to_vec(),
            proof: self.prove(start, end - 1),
        })
    }

    /// The last `count` entries with a proof covering all of them.
    ///
    /// Returns `None` if `count` is zero or larger than the log.
    pub fn get_last(&self, count: usize) -> Option<RangeInclusion> {
        let start = self.len().checked_sub(count)?;
        self.get_range(start, self.len())
    }

    /// The first entry whose bytes hash to `digest`, with its proof.
    pub fn get_by_hash(&self, digest: &Digest) -> Option<Inclusion> {
        self.get(self.position(digest)?)
    }

    /// The position of the first entry whose bytes hash to `digest`.
    pub fn position(&self, digest: &Digest) -> Option<usize> {
        self.index.get(digest)
    }

    /// Check that `entry` is at `index` in a log committed to by `root`.
    ///
    /// This needs no log state; see [`crate::validate`].
    pub fn validate(root: &Digest, index: usize, entry: &[u8], proof: &Proof) -> bool {
        proof::validate(root, index, entry, proof)
    }

    /// Check that `entries` start at `start` in a log committed to by `root`.
    ///
    /// This needs no log state; see [`crate::validate_range`].
    pub fn validate_range<E: AsRef<[u8]>>(
        root: &Digest,
        start: usize,
        entries: &[E],
        proof: &Proof,
    ) -> bool {
        proof::validate_range(root, start, entries, proof)
    }

    fn prove(&self, lo: usize, hi: usize) -> Proof {
        proof::prove(&self.levels, lo, hi)
    }
}

impl<E: Into<Vec<u8>>> FromIterator<E> for MerkleLog {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut log = Self::new();
        log.append(iter);
        log
    }
}

impl<E: Into<Vec<u8>>> Extend<E> for MerkleLog {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.append(iter);
    }
}

impl ResolveSync for MerkleLog {
    type Error = core::convert::Infallible;

    fn resolve(&self, digest: &Digest) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self
            .position(digest)
            .and_then(|position| self.entries.get(position))
            .cloned())
    }
}
