//! # Decoding
//! Decoding of records from bytes.
//!
//! Decoding walks the schema with a single cursor over the input. The input
//! must be consumed exactly: running out of bytes and having bytes left over
//! are both errors.

use crate::{format::decode_format, join_path, DecodeError};
use base64::Engine as _;
use packlog_types::{
    Address, Digest, Field, FieldType, Price, Record, Schema, Value, ADDRESS_LENGTH,
    DIGEST_LENGTH, PRICE_LENGTH,
};


/// A cursor over an input buffer.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take the next `n` bytes.
    pub(crate) fn take(&mut self, n: u64, what: &str) -> Result<&'a [u8], DecodeError> {
        let truncated = || DecodeError::Truncated {
            what: what.to_string(),
            needed: n,
            remaining: self.remaining(),
        };
        let n = usize::try_from(n).map_err(|_| truncated())?;
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(truncated)?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], DecodeError> {
        let mut arr = [0; N];
        arr.copy_from_slice(self.take(N as u64, what)?);
        Ok(arr)
    }

    pub(crate) fn byte(&mut self, what: &str) -> Result<u8, DecodeError> {
        let [b] = self.array::<1>(what)?;
        Ok(b)
    }

    pub(crate) fn u64_be(&mut self, what: &str) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.array(what)?))
    }

    /// Check the whole input was consumed.
    pub(crate) fn finish(self) -> Result<(), DecodeError> {
        if self.pos != self.buf.len() {
            return Err(DecodeError::TrailingBytes {
                consumed: self.pos,
                len: self.buf.len(),
            });
        }
        Ok(())
    }
}

/// Decode a record encoded against a known schema.
///
/// The schema is checked first, as on encode, so a schema that could never
/// have produced `bytes` is rejected rather than read from.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(len = bytes.len())))]
pub fn decode(bytes: &[u8], schema: &Schema) -> Result<Record, DecodeError> {
    let result = schema.check().map_err(DecodeError::from).and_then(|()| {
        let mut reader = Reader::new(bytes);
        let record = decode_fields(&mut reader, schema, "")?;
        reader.finish()?;
        Ok(record)
    });
    #[cfg(feature = "tracing")]
    if let Err(ref err) = result {
        tracing::debug!("failed to decode record: {err}");
    }
    result
}

/// Decode a self-described record, returning the embedded schema alongside
/// the record.
///
/// # Layout
/// ```text
/// +------------------------+-----------------+------------------+
/// | schema length (8, BE)  | schema bytes    | field encodings  |
/// +------------------------+-----------------+------------------+
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(len = bytes.len())))]
pub fn decode_self_described(bytes: &[u8]) -> Result<(Schema, Record), DecodeError> {
    let mut reader = Reader::new(bytes);
    let result = read_schema(&mut reader).and_then(|schema| {
        let record = decode_fields(&mut reader, &schema, "")?;
        reader.finish()?;
        Ok((schema, record))
    });
    #[cfg(feature = "tracing")]
    if let Err(ref err) = result {
        tracing::debug!("failed to decode self-described record: {err}");
    }
    result
}

/// Decode against `schema` if one is given, otherwise read the embedded
/// schema first.
pub fn decode_with(bytes: &[u8], schema: Option<&Schema>) -> Result<Record, DecodeError> {
    match schema {
        Some(schema) => decode(bytes, schema),
        None => decode_self_described(bytes).map(|(_, record)| record),
    }
}

fn read_schema(reader: &mut Reader) -> Result<Schema, DecodeError> {
    let len = reader.u64_be("schema length")?;
    decode_format(reader.take(len, "schema")?)
}

fn decode_fields(reader: &mut Reader, schema: &Schema, path: &str) -> Result<Record, DecodeError> {
    let mut record = Record::new();
    for Field { name, ty } in schema {
        let field = join_path(path, name);
        let value = decode_value(reader, ty, &field)?;
        record.insert(name.clone(), value);
    }
    Ok(record)
}

fn decode_value(reader: &mut Reader, ty: &FieldType, field: &str) -> Result<Value, DecodeError> {
    let value = match ty {
        FieldType::Uint => Value::Uint(reader.u64_be(field)?),
        FieldType::Number => Value::Number(reader.u64_be(field)?),
        FieldType::Address => Value::Address(Address(reader.array::<ADDRESS_LENGTH>(field)?)),
        // Doubles are little-endian, unlike every other numeric type.
        FieldType::Double => Value::Double(f64::from_le_bytes(reader.array(field)?)),
        FieldType::Boolean => match reader.byte(field)? {
            0 => Value::Boolean(false),
            1 => Value::Boolean(true),
            byte => {
                return Err(DecodeError::InvalidBoolean {
                    field: field.to_string(),
                    byte,
                })
            }
        },
        FieldType::String { size } => {
            let bytes = reader.take(*size as u64, field)?;
            let string = core::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
                field: field.to_string(),
            })?;
            Value::String(string.to_string())
        }
        FieldType::Bytes { size } => Value::Bytes(reader.take(*size as u64, field)?.to_vec()),
        FieldType::Base64 { size } => {
            let bytes = reader.take(*size as u64, field)?;
            Value::Base64(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        FieldType::Object(nested) => Value::Object(decode_fields(reader, nested, field)?),
        FieldType::Hash(_) => Value::Hash(Digest(reader.array::<DIGEST_LENGTH>(field)?)),
        FieldType::Price => Value::Price(Price(reader.array::<PRICE_LENGTH>(field)?)),
    };
    Ok(value)
}
