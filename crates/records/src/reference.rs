use crate::{Packed, RecordError};
use packlog_types::{Digest, Value};
use serde::{Deserialize, Serialize};

/// A `hash` field: a record held by its content digest.
///
/// In human-readable formats a digest serializes as its hex string and a
/// resolved record as the record itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    /// Only the digest is known.
    Digest(Digest),
    /// The referenced record.
    Resolved(Box<T>),
}

impl<T: Packed> Reference<T> {
    /// The digest of the referenced record.
    pub fn digest(&self) -> Result<Digest, RecordError> {
        match self {
            Reference::Digest(digest) => Ok(*digest),
            Reference::Resolved(record) => record.content_digest(),
        }
    }

    /// The referenced record, if resolved.
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Digest(_) => None,
            Reference::Resolved(record) => Some(record.as_ref()),
        }
    }

    /// The referenced record, or [`RecordError::Unresolved`] naming `field`.
    pub fn into_resolved(self, field: &str) -> Result<T, RecordError> {
        match self {
            Reference::Digest(digest) => Err(RecordError::Unresolved {
                field: field.to_string(),
                digest,
            }),
            Reference::Resolved(record) => Ok(*record),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self {
            Reference::Digest(digest) => Value::Hash(*digest),
            Reference::Resolved(record) => Value::Object(record.to_record()),
        }
    }
}

impl<T> From<T> for Reference<T> {
    fn from(record: T) -> Self {
        Reference::Resolved(Box::new(record))
    }
}
