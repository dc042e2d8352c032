use packlog_codec::{DecodeError, EncodeError, ResolveError};
use packlog_types::{Digest, TypeCode};
use thiserror::Error;

/// A typed record could not be built, encoded or decoded.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record has no value for a required field.
    #[error("field `{0}` missing")]
    MissingField(String),
    /// A field holds a value of the wrong type.
    #[error("field `{field}`: expected {expected}, found {found}")]
    WrongType {
        /// Name of the field.
        field: String,
        /// The type the field must have.
        expected: TypeCode,
        /// The type found.
        found: TypeCode,
    },
    /// A reference has not been resolved to its record.
    #[error("field `{field}` references {digest}, which has not been resolved")]
    Unresolved {
        /// Path of the reference.
        field: String,
        /// The referenced digest.
        digest: Digest,
    },
    /// A signature is not 64 bytes of base64.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    /// Self-described bytes embed a schema other than the record's.
    #[error("embedded schema does not match the record type")]
    SchemaMismatch,
    /// A resolver returned data inconsistent with the reference.
    #[error("corrupt reference: {0}")]
    Corrupt(String),
    /// A resolver failed.
    #[error("resolver error: {0}")]
    Resolver(String),
    /// Encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl RecordError {
    /// Whether this is a reference that may resolve once its record has been
    /// observed.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, RecordError::Unresolved { .. })
    }
}

impl<E: core::fmt::Display> From<ResolveError<E>> for RecordError {
    fn from(err: ResolveError<E>) -> Self {
        match err {
            ResolveError::Unresolved { field, digest } => RecordError::Unresolved { field, digest },
            ResolveError::Decode(err) => RecordError::Decode(err),
            ResolveError::Resolver(err) => RecordError::Resolver(err.to_string()),
            err @ (ResolveError::DigestMismatch { .. } | ResolveError::SchemaMismatch { .. }) => {
                RecordError::Corrupt(err.to_string())
            }
        }
    }
}
