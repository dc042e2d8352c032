#![allow(dead_code)]

use packlog_codec::types::{FieldType, Schema};

/// The number of bytes a record encoded against `schema` occupies.
pub fn encoded_len(schema: &Schema) -> usize {
    schema
        .fields()
        .iter()
        .map(|field| match &field.ty {
            FieldType::Object(nested) => encoded_len(nested),
            ty => ty
                .type_code()
                .fixed_width()
                .or(ty.size())
                .unwrap_or_default(),
        })
        .sum()
}
