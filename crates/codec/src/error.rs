//! The types of errors that might occur while encoding, decoding or resolving
//! records.
//!
//! Field names in errors are dotted paths from the top-level record, e.g.
//! `userOrder.data.user`.

use packlog_types::{Digest, SchemaError, TypeCode};
use thiserror::Error;

/// A record could not be encoded against its schema.
///
/// Encoding is all or nothing: no bytes are returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// The schema breaks a size cap or names a field twice.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),
    /// The record has no value for a field in the schema.
    #[error("field `{field}` missing from record:\n{record}")]
    MissingField {
        /// Path of the missing field.
        field: String,
        /// Debug dump of the record the field is missing from.
        record: String,
    },
    /// The value's tag does not match the field type.
    #[error("field `{field}`: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Path of the field.
        field: String,
        /// The type declared by the schema.
        expected: TypeCode,
        /// Debug dump of the offending value.
        found: String,
    },
    /// A sized field's value does not have exactly the declared length.
    #[error("field `{field}`: expected {expected} bytes, found {actual}")]
    SizeMismatch {
        /// Path of the field.
        field: String,
        /// The size declared by the schema.
        expected: usize,
        /// The length of the value.
        actual: usize,
    },
}

/// Bytes could not be decoded.
///
/// [`DecodeError::Truncated`] and [`DecodeError::TrailingBytes`] are framing
/// errors: the input is shorter or longer than the schema says it must be.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The input ended before `what` could be read.
    #[error("input truncated reading {what}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// What was being read, usually a field path.
        what: String,
        /// Bytes required.
        needed: u64,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// Bytes were left over after the last field.
    #[error("decoded {consumed} bytes but the input is {len} bytes")]
    TrailingBytes {
        /// Bytes consumed by the schema.
        consumed: usize,
        /// Length of the input.
        len: usize,
    },
    /// A schema names a type outside the type table.
    #[error("field `{field}`: unknown type code {code}")]
    UnknownTypeCode {
        /// Path of the field.
        field: String,
        /// The unknown code.
        code: u8,
    },
    /// A string or field name is not valid UTF-8.
    #[error("field `{field}`: invalid UTF-8")]
    InvalidUtf8 {
        /// Path of the field, or of the schema whose field name is invalid.
        field: String,
    },
    /// A boolean byte other than `0x00` or `0x01`.
    #[error("field `{field}`: invalid boolean byte {byte:#04x}")]
    InvalidBoolean {
        /// Path of the field.
        field: String,
        /// The byte found.
        byte: u8,
    },
    /// An embedded schema breaks a size cap or names a field twice.
    #[error("invalid embedded schema: {0}")]
    InvalidSchema(#[from] SchemaError),
}

/// A `hash` reference could not be resolved to its record.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// No entry was found for the digest, or the lookup timed out.
    ///
    /// The referenced record may simply not have been observed yet; the
    /// caller may retry later.
    #[error("unresolved reference in field `{field}`: {digest}")]
    Unresolved {
        /// Path of the `hash` field.
        field: String,
        /// The digest that could not be resolved.
        digest: Digest,
    },
    /// The resolver returned bytes that do not hash to the requested digest.
    #[error("entry returned for {digest} in field `{field}` hashes to {actual}")]
    DigestMismatch {
        /// Path of the `hash` field.
        field: String,
        /// The requested digest.
        digest: Digest,
        /// The digest of the bytes returned.
        actual: Digest,
    },
    /// The resolved entry embeds a different schema than the field declares.
    #[error("entry for {digest} in field `{field}` does not match the declared schema")]
    SchemaMismatch {
        /// Path of the `hash` field.
        field: String,
        /// The resolved digest.
        digest: Digest,
    },
    /// The record or a resolved entry could not be decoded.
    #[error("decoding error: {0}")]
    Decode(#[from] DecodeError),
    /// The resolver itself failed.
    #[error("resolver error: {0}")]
    Resolver(E),
}

impl DecodeError {
    /// Whether the input was shorter or longer than its schema requires.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            DecodeError::Truncated { .. } | DecodeError::TrailingBytes { .. }
        )
    }
}

impl<E> ResolveError<E> {
    /// Whether this is a missing reference that may resolve later.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolveError::Unresolved { .. })
    }

    /// Whether the resolver returned data inconsistent with the reference.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            ResolveError::DigestMismatch { .. } | ResolveError::SchemaMismatch { .. }
        )
    }
}
