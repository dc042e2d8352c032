//! # Encode and Decode Schemas
//!
//! Schemas are encoded so that a record can carry its own layout, letting
//! readers decode records written under schemas they have never seen.
//!
//! # Encoding
//! ## Schema
//! | Field | Size (bytes) | Description |
//! | --- | --- | --- |
//! | field_count | 1 | Number of fields, at most 127. |
//! | fields | variable | Each field in layout order. |
//!
//! ## Field
//! | Field | Size (bytes) | Description |
//! | --- | --- | --- |
//! | name_len | 1 | Length of the name in bytes, at most 127. |
//! | name | name_len | UTF-8 field name. |
//! | type_code | 1 | [`TypeCode`] of the field. |
//! | size | 1 | Only for `string`, `bytes` and `base64`: the declared size, at most 127. |
//! | nested_len | 8 | Only for `object` and `hash`: big-endian length of the nested schema. |
//! | nested | nested_len | Only for `object` and `hash`: the nested schema. |
//!
//! One byte counts keep their high bit clear so they can later be extended to
//! variable-length integers without changing existing encodings.

use crate::{decode::Reader, join_path, DecodeError, EncodeError};
use packlog_types::{Field, FieldType, Schema, SchemaError, TypeCode, SCHEMA_LEN_PREFIX};
use std::collections::HashSet;


/// Encode a schema into bytes.
///
/// Fails without truncating if a count, name or size does not fit.
pub fn encode_format(schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    schema.check()?;
    let mut buf = Vec::new();
    write_format(schema, &mut buf);
    Ok(buf)
}

/// The number of bytes [`encode_format`] produces for `schema`.
pub fn format_encoded_size(schema: &Schema) -> usize {
    1 + schema
        .fields()
        .iter()
        .map(|Field { name, ty }| {
            let tail = match ty {
                FieldType::String { .. } | FieldType::Bytes { .. } | FieldType::Base64 { .. } => 1,
                FieldType::Object(nested) | FieldType::Hash(nested) => {
                    SCHEMA_LEN_PREFIX + format_encoded_size(nested)
                }
                _ => 0,
            };
            1 + name.len() + 1 + tail
        })
        .sum::<usize>()
}

/// Writes the schema.
///
/// ## Warning
/// It's the callers responsibility to ensure the schema is within bounds
/// before calling this function. Use [`Schema::check`].
fn write_format(schema: &Schema, buf: &mut Vec<u8>) {
    // All following casts are safe because the schema has been checked.
    buf.push(schema.len() as u8);
    for Field { name, ty } in schema {
        buf.push(name.len() as u8);
        buf.extend_from_slice(name.as_bytes());
        buf.push(ty.type_code() as u8);
        match ty {
            FieldType::String { size } | FieldType::Bytes { size } | FieldType::Base64 { size } => {
                buf.push(*size as u8)
            }
            FieldType::Object(nested) | FieldType::Hash(nested) => {
                let len_at = buf.len();
                buf.extend_from_slice(&[0; SCHEMA_LEN_PREFIX]);
                write_format(nested, buf);
                let nested_len = (buf.len() - len_at - SCHEMA_LEN_PREFIX) as u64;
                buf[len_at..len_at + SCHEMA_LEN_PREFIX].copy_from_slice(&nested_len.to_be_bytes());
            }
            FieldType::Uint
            | FieldType::Number
            | FieldType::Address
            | FieldType::Double
            | FieldType::Boolean
            | FieldType::Price => (),
        }
    }
}

/// Decode a schema from bytes.
///
/// The input must hold exactly one schema. The same caps that apply when
/// encoding are enforced, as are unique names and the nesting limit.
pub fn decode_format(bytes: &[u8]) -> Result<Schema, DecodeError> {
    decode_format_at(bytes, 1, "")
}

fn decode_format_at(bytes: &[u8], depth: usize, path: &str) -> Result<Schema, DecodeError> {
    if depth > Schema::MAX_DEPTH {
        return Err(SchemaError::TooDeep(depth).into());
    }
    let mut reader = Reader::new(bytes);
    let count = usize::from(reader.byte(&join_path(path, "<field count>"))?);
    if count > Schema::MAX_FIELDS {
        return Err(SchemaError::TooManyFields(count).into());
    }

    let mut schema = Schema::new();
    let mut names = HashSet::with_capacity(count);
    for _ in 0..count {
        let name_len = usize::from(reader.byte(&join_path(path, "<name length>"))?);
        let name_bytes = reader.take(name_len as u64, &join_path(path, "<name>"))?;
        let name = core::str::from_utf8(name_bytes).map_err(|_| DecodeError::InvalidUtf8 {
            field: join_path(path, "<name>"),
        })?;
        if name_len > Schema::MAX_NAME_LEN {
            return Err(SchemaError::NameTooLong {
                name: name.to_string(),
                len: name_len,
            }
            .into());
        }
        if !names.insert(name) {
            return Err(SchemaError::DuplicateField(name.to_string()).into());
        }

        let field = join_path(path, name);
        let code = reader.byte(&field)?;
        let code = TypeCode::try_from(code).map_err(|_| DecodeError::UnknownTypeCode {
            field: field.clone(),
            code,
        })?;
        let ty = match code {
            TypeCode::Uint => FieldType::Uint,
            TypeCode::Number => FieldType::Number,
            TypeCode::Address => FieldType::Address,
            TypeCode::Double => FieldType::Double,
            TypeCode::Boolean => FieldType::Boolean,
            TypeCode::Price => FieldType::Price,
            TypeCode::String => FieldType::String {
                size: read_size(&mut reader, &field)?,
            },
            TypeCode::Bytes => FieldType::Bytes {
                size: read_size(&mut reader, &field)?,
            },
            TypeCode::Base64 => FieldType::Base64 {
                size: read_size(&mut reader, &field)?,
            },
            TypeCode::Object => FieldType::Object(read_nested(&mut reader, depth, &field)?),
            TypeCode::Hash => FieldType::Hash(read_nested(&mut reader, depth, &field)?),
        };
        schema.push(name, ty);
    }
    reader.finish()?;
    Ok(schema)
}

fn read_size(reader: &mut Reader, field: &str) -> Result<usize, DecodeError> {
    let size = usize::from(reader.byte(field)?);
    if size > Schema::MAX_SIZE {
        return Err(SchemaError::SizeTooLarge {
            field: field.to_string(),
            size,
        }
        .into());
    }
    Ok(size)
}

fn read_nested(reader: &mut Reader, depth: usize, field: &str) -> Result<Schema, DecodeError> {
    let len = reader.u64_be(field)?;
    let nested = reader.take(len, field)?;
    decode_format_at(nested, depth + 1, field)
}
