//! # Encoding
//! Encoding of records into bytes.
//!
//! # Layout
//! | Type | Width (bytes) | Encoding |
//! | --- | --- | --- |
//! | `uint`, `number` | 8 | big-endian |
//! | `price` | 17 | big-endian |
//! | `double` | 8 | IEEE-754 little-endian |
//! | `boolean` | 1 | `0x00` or `0x01` |
//! | `address` | 32 | raw public key |
//! | `string`, `bytes` | declared size | verbatim, length must match |
//! | `base64` | declared size | decoded text, decoded length must match |
//! | `object` | sum of nested fields | nested fields inline, no schema |
//! | `hash` | 32 | digest of the nested record's self-described encoding |

use crate::{digest::content_digest, format::encode_format, join_path, EncodeError};
use base64::Engine as _;
use packlog_types::{Field, FieldType, Record, Schema, TypeCode, Value, SCHEMA_LEN_PREFIX};

#[cfg(test)]
mod tests;

/// Encode a record against its schema.
///
/// Values are written in schema order; fields of the record that the schema
/// does not name are ignored.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn encode(record: &Record, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    let result = schema.check().map_err(EncodeError::from).and_then(|()| {
        let mut buf = Vec::new();
        encode_fields(record, schema, "", &mut buf)?;
        Ok(buf)
    });
    #[cfg(feature = "tracing")]
    if let Err(ref err) = result {
        tracing::debug!("failed to encode record: {err}");
    }
    result
}

/// Encode a record prefixed by its schema so that it can be decoded without
/// prior knowledge of the schema.
///
/// This is the canonical encoding hashed by [`content_digest`].
///
/// # Layout
/// ```text
/// +------------------------+-----------------+------------------+
/// | schema length (8, BE)  | schema bytes    | field encodings  |
/// +------------------------+-----------------+------------------+
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn encode_with_schema(record: &Record, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    let result = encode_format(schema).and_then(|format| {
        let mut buf = Vec::with_capacity(SCHEMA_LEN_PREFIX + format.len());
        buf.extend_from_slice(&(format.len() as u64).to_be_bytes());
        buf.extend_from_slice(&format);
        encode_fields(record, schema, "", &mut buf)?;
        Ok(buf)
    });
    #[cfg(feature = "tracing")]
    if let Err(ref err) = result {
        tracing::debug!("failed to encode self-described record: {err}");
    }
    result
}

fn encode_fields(
    record: &Record,
    schema: &Schema,
    path: &str,
    buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    for Field { name, ty } in schema {
        let field = join_path(path, name);
        let Some(value) = record.get(name) else {
            return Err(EncodeError::MissingField {
                field,
                record: format!("{record:#?}"),
            });
        };
        encode_value(value, ty, &field, buf)?;
    }
    Ok(())
}

fn encode_value(
    value: &Value,
    ty: &FieldType,
    field: &str,
    buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    match (ty, value) {
        (FieldType::Uint, Value::Uint(v)) | (FieldType::Number, Value::Number(v)) => {
            buf.extend_from_slice(&v.to_be_bytes())
        }
        (FieldType::Address, Value::Address(address)) => buf.extend_from_slice(&address.0),
        // Doubles are little-endian, unlike every other numeric type.
        (FieldType::Double, Value::Double(v)) => buf.extend_from_slice(&v.to_le_bytes()),
        (FieldType::Boolean, Value::Boolean(v)) => buf.push(u8::from(*v)),
        (FieldType::Price, Value::Price(price)) => buf.extend_from_slice(&price.0),
        (FieldType::String { size }, Value::String(string)) => {
            check_size(field, *size, string.len())?;
            buf.extend_from_slice(string.as_bytes());
        }
        (FieldType::Bytes { size }, Value::Bytes(bytes)) => {
            check_size(field, *size, bytes.len())?;
            buf.extend_from_slice(bytes);
        }
        (FieldType::Base64 { size }, Value::Base64(text)) => {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(text)
                .map_err(|_| shape_mismatch(ty.type_code(), value, field))?;
            check_size(field, *size, bytes.len())?;
            buf.extend_from_slice(&bytes);
        }
        (FieldType::Object(nested), Value::Object(record)) => {
            encode_fields(record, nested, field, buf)?
        }
        // References always digest the self-described encoding so that they
        // can be resolved without knowing the nested schema.
        (FieldType::Hash(nested), Value::Object(record)) => {
            let digest = content_digest(record, nested).map_err(|err| nest_error(err, field))?;
            buf.extend_from_slice(&digest.0);
        }
        (FieldType::Hash(_), Value::Hash(digest)) => buf.extend_from_slice(&digest.0),
        (ty, value) => return Err(shape_mismatch(ty.type_code(), value, field)),
    }
    Ok(())
}

fn check_size(field: &str, expected: usize, actual: usize) -> Result<(), EncodeError> {
    if expected != actual {
        return Err(EncodeError::SizeMismatch {
            field: field.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn shape_mismatch(expected: TypeCode, value: &Value, field: &str) -> EncodeError {
    EncodeError::ShapeMismatch {
        field: field.to_string(),
        expected,
        found: format!("{value:?}"),
    }
}

/// Prefix field paths of an error raised while encoding a referenced record.
fn nest_error(err: EncodeError, parent: &str) -> EncodeError {
    match err {
        EncodeError::MissingField { field, record } => EncodeError::MissingField {
            field: join_path(parent, &field),
            record,
        },
        EncodeError::ShapeMismatch {
            field,
            expected,
            found,
        } => EncodeError::ShapeMismatch {
            field: join_path(parent, &field),
            expected,
            found,
        },
        EncodeError::SizeMismatch {
            field,
            expected,
            actual,
        } => EncodeError::SizeMismatch {
            field: join_path(parent, &field),
            expected,
            actual,
        },
        err @ EncodeError::InvalidSchema(_) => err,
    }
}
