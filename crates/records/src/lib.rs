//! Typed exchange records and their fixed schemas.
//!
//! Encodings of these records are stored in audit logs and hashed into the
//! references between them, so their schemas may only ever gain fields at the
//! end. Field names keep their historical spellings on the wire.
//!
//! Records referencing other records by `hash` hold a [`Reference`]. Decoding
//! yields only digests; [`decode_resolved`] (and [`decode_match`],
//! [`decode_cancelled_order`]) expands them through any
//! [`Resolve`](packlog_codec::resolve::Resolve) implementation, typically an
//! audit log holding the referenced records.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use packlog_codec::resolve::{self, Resolve};
use packlog_types::{Digest, Record, Schema};
use std::time::Duration;

pub use cancel::{decode_cancelled_order, CancelData, CancelledOrder, SignedCancel};
pub use error::RecordError;
pub use order::{OrderData, ServerOrder, SignedOrder};
pub use reference::Reference;
pub use signature::Signature;
pub use trade::{decode_match, Match};

mod cancel;
mod error;
mod fields;
mod order;
mod reference;
mod signature;
mod trade;

/// A record type with a fixed schema.
pub trait Packed: Sized {
    /// The schema every value of this type is encoded against.
    fn schema() -> &'static Schema;

    /// Convert to a dynamic record.
    fn to_record(&self) -> Record;

    /// Convert from a dynamic record, which may carry extra fields.
    fn from_record(record: &Record) -> Result<Self, RecordError>;

    /// Encode against [`Packed::schema`].
    fn encode(&self) -> Result<Vec<u8>, RecordError> {
        Ok(packlog_codec::encode(&self.to_record(), Self::schema())?)
    }

    /// Encode prefixed by [`Packed::schema`]; the form appended to logs.
    fn encode_with_schema(&self) -> Result<Vec<u8>, RecordError> {
        Ok(packlog_codec::encode_with_schema(
            &self.to_record(),
            Self::schema(),
        )?)
    }

    /// Decode bytes encoded against [`Packed::schema`].
    ///
    /// References are left as digests.
    fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        Self::from_record(&packlog_codec::decode(bytes, Self::schema())?)
    }

    /// Decode a self-described encoding, checking the embedded schema is
    /// [`Packed::schema`].
    ///
    /// References are left as digests.
    fn decode_self_described(bytes: &[u8]) -> Result<Self, RecordError> {
        let (schema, record) = packlog_codec::decode_self_described(bytes)?;
        check_schema::<Self>(&schema)?;
        Self::from_record(&record)
    }

    /// The digest other records use to reference this one.
    fn content_digest(&self) -> Result<Digest, RecordError> {
        Ok(packlog_codec::content_digest(
            &self.to_record(),
            Self::schema(),
        )?)
    }
}

/// Decode a record and resolve every reference it holds through `resolver`.
///
/// If `self_described` is set the bytes must embed [`Packed::schema`].
/// Each lookup is bounded by `timeout` when one is given.
pub async fn decode_resolved<T: Packed, R: Resolve>(
    bytes: &[u8],
    self_described: bool,
    resolver: &R,
    timeout: Option<Duration>,
) -> Result<T, RecordError> {
    let record = if self_described {
        let (schema, record) = packlog_codec::decode_self_described(bytes)?;
        check_schema::<T>(&schema)?;
        record
    } else {
        packlog_codec::decode(bytes, T::schema())?
    };
    let record = resolve::resolve(record, T::schema(), resolver, timeout).await?;
    T::from_record(&record)
}

fn check_schema<T: Packed>(schema: &Schema) -> Result<(), RecordError> {
    if schema != T::schema() {
        return Err(RecordError::SchemaMismatch);
    }
    Ok(())
}
