use packlog_types::Digest;
use std::collections::HashMap;


/// Maps the digest of every entry in a log to its position.
///
/// Entries are immutable once appended, so the index only ever grows. If the
/// same bytes are appended more than once the index keeps the first position.
#[derive(Clone, Debug, Default)]
pub struct DigestIndex {
    positions: HashMap<Digest, usize>,
}

impl DigestIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `digest` at `position` unless it is already indexed.
    ///
    /// Returns `false` if the digest was already present.
    pub fn insert(&mut self, digest: Digest, position: usize) -> bool {
        match self.positions.entry(digest) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(position);
                true
            }
        }
    }

    /// The first position holding an entry with this digest.
    pub fn get(&self, digest: &Digest) -> Option<usize> {
        self.positions.get(digest).copied()
    }

    /// Whether an entry with this digest has been indexed.
    pub fn contains(&self, digest: &Digest) -> bool {
        self.positions.contains_key(digest)
    }

    /// Number of distinct digests.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
