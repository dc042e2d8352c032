use crate::{Inclusion, MerkleLog, RangeInclusion};
use packlog_codec::{
    resolve::{Resolve, ResolveSync},
    EncodeError,
};
use packlog_lock::Lock;
use packlog_types::{Digest, Record, Schema};
use std::sync::{Arc, RwLock};

#[cfg(test)]
mod tests;

/// A cloneable handle to a [`MerkleLog`] shared between threads.
///
/// Appends are serialised, so positions are assigned without gaps in the
/// order appends acquire the log. Reads run concurrently with each other and
/// never observe part of an append: every method sees the log either before
/// or after any given append in full.
///
/// To make several reads against the same state, use [`AuditLog::read`].
#[derive(Clone, Default)]
pub struct AuditLog {
    log: Arc<Lock<RwLock<MerkleLog>>>,
}

impl AuditLog {
    /// A handle to a new, empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries in order, returning the new length of the log.
    ///
    /// All entries are appended under a single acquisition of the log.
    pub fn append<I>(&self, entries: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
    {
        // Convert before locking to keep the critical section short.
        let entries: Vec<Vec<u8>> = entries.into_iter().map(Into::into).collect();
        self.log.apply(|log| log.append(entries))
    }

    /// Append the self-described encoding of a record, returning its content
    /// digest.
    pub fn append_record(&self, record: &Record, schema: &Schema) -> Result<Digest, EncodeError> {
        let bytes = packlog_codec::encode_with_schema(record, schema)?;
        let digest = packlog_hash::hash_bytes(&bytes);
        self.append([bytes]);
        Ok(digest)
    }

    /// Run `f` against a consistent view of the log.
    pub fn read<U>(&self, f: impl FnOnce(&MerkleLog) -> U) -> U {
        self.log.inspect(f)
    }

    /// See [`MerkleLog::root`].
    pub fn root(&self) -> Digest {
        self.read(MerkleLog::root)
    }

    /// See [`MerkleLog::len`].
    pub fn len(&self) -> usize {
        self.read(MerkleLog::len)
    }

    /// See [`MerkleLog::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.read(MerkleLog::is_empty)
    }

    /// A copy of every entry in log order.
    pub fn values(&self) -> Vec<Vec<u8>> {
        self.read(|log| log.values().to_vec())
    }

    /// See [`MerkleLog::get`].
    pub fn get(&self, index: usize) -> Option<Inclusion> {
        self.read(|log| log.get(index))
    }

    /// See [`MerkleLog::get_range`].
    pub fn get_range(&self, start: usize, end: usize) -> Option<RangeInclusion> {
        self.read(|log| log.get_range(start, end))
    }

    /// See [`MerkleLog::get_last`].
    pub fn get_last(&self, count: usize) -> Option<RangeInclusion> {
        self.read(|log| log.get_last(count))
    }

    /// See [`MerkleLog::get_by_hash`].
    pub fn get_by_hash(&self, digest: &Digest) -> Option<Inclusion> {
        self.read(|log| log.get_by_hash(digest))
    }

    /// See [`MerkleLog::position`].
    pub fn position(&self, digest: &Digest) -> Option<usize> {
        self.read(|log| log.position(digest))
    }
}

impl From<MerkleLog> for AuditLog {
    fn from(log: MerkleLog) -> Self {
        Self {
            log: Arc::new(Lock::new(log)),
        }
    }
}

impl core::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.read(|log| {
            f.debug_struct("AuditLog")
                .field("len", &log.len())
                .field("root", &log.root())
                .finish()
        })
    }
}

impl ResolveSync for AuditLog {
    type Error = core::convert::Infallible;

    fn resolve(&self, digest: &Digest) -> Result<Option<Vec<u8>>, Self::Error> {
        self.read(|log| ResolveSync::resolve(log, digest))
    }
}

impl Resolve for AuditLog {
    type Error = core::convert::Infallible;
    type Future = core::future::Ready<Result<Option<Vec<u8>>, Self::Error>>;

    fn resolve(&self, digest: Digest) -> Self::Future {
        core::future::ready(ResolveSync::resolve(self, &digest))
    }
}
