//! Content digests of records.

use crate::{encode::encode_with_schema, EncodeError};
use packlog_types::{Digest, Record, Schema};

/// The content digest of a record: the hash of its self-described encoding.
///
/// This is the value written into `hash` fields that reference the record,
/// and equals [`packlog_hash::hash_bytes`] of the bytes a producer appends to
/// the log for it.
pub fn content_digest(record: &Record, schema: &Schema) -> Result<Digest, EncodeError> {
    let bytes = encode_with_schema(record, schema)?;
    Ok(packlog_hash::hash_bytes(&bytes))
}
