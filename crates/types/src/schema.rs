//! # Schemas
//!
//! A [`Schema`] is the ordered list of fields that defines a record's byte
//! layout. The order of fields is significant: records are encoded as the
//! concatenation of their field encodings in schema order.
//!
//! ## Type codes
//! | Code | Type | Width |
//! | --- | --- | --- |
//! | 0 | `uint` | 8 |
//! | 1 | `number` | 8 |
//! | 2 | `address` | 32 |
//! | 3 | `double` | 8 |
//! | 4 | `boolean` | 1 |
//! | 5 | `string` | declared size |
//! | 6 | `bytes` | declared size |
//! | 7 | `base64` | declared size |
//! | 8 | `object` | sum of nested fields |
//! | 9 | `hash` | 32 |
//! | 10 | `price` | 17 |
//!
//! Type codes are part of every digest ever computed over a self-described
//! record. They may only ever be appended to.

use crate::{ADDRESS_LENGTH, DIGEST_LENGTH, PRICE_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;


/// The permanent table of field type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeCode {
    /// Unsigned 64-bit integer.
    Uint = 0,
    /// Unsigned 64-bit integer used for ids and timestamps.
    Number = 1,
    /// 32-byte address.
    Address = 2,
    /// IEEE-754 double, little-endian on the wire.
    Double = 3,
    /// Single byte boolean.
    Boolean = 4,
    /// Fixed-size UTF-8 string.
    String = 5,
    /// Fixed-size byte string.
    Bytes = 6,
    /// Base64 text carrying a fixed number of decoded bytes.
    Base64 = 7,
    /// Nested record encoded inline.
    Object = 8,
    /// Nested record referenced by content digest.
    Hash = 9,
    /// 17-byte fixed-point price.
    Price = 10,
}

/// The type of a single field, including any size or nested schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// See [`TypeCode::Uint`].
    Uint,
    /// See [`TypeCode::Number`].
    Number,
    /// See [`TypeCode::Address`].
    Address,
    /// See [`TypeCode::Double`].
    Double,
    /// See [`TypeCode::Boolean`].
    Boolean,
    /// See [`TypeCode::Price`].
    Price,
    /// A UTF-8 string whose encoding is exactly `size` bytes.
    String {
        /// Encoded length in bytes.
        size: usize,
    },
    /// A byte string of exactly `size` bytes.
    Bytes {
        /// Length in bytes.
        size: usize,
    },
    /// Base64 text that decodes to exactly `size` bytes.
    Base64 {
        /// Decoded length in bytes.
        size: usize,
    },
    /// A nested record encoded inline.
    Object(Schema),
    /// A nested record referenced by the digest of its self-described encoding.
    Hash(Schema),
}

/// A named field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// The field name. Unique within its schema.
    pub name: String,
    /// The field type.
    #[serde(rename = "type")]
    pub ty: FieldType,
}

/// An ordered list of fields describing a record's byte layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

/// A schema that cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// More fields than fit in the one byte field count.
    #[error("schema has {0} fields, at most {max} are allowed", max = Schema::MAX_FIELDS)]
    TooManyFields(usize),
    /// A field name longer than fits in its one byte length prefix.
    #[error("field name `{name}` is {len} bytes, at most {max} are allowed", max = Schema::MAX_NAME_LEN)]
    NameTooLong {
        /// The offending name.
        name: String,
        /// Its length in bytes.
        len: usize,
    },
    /// A sized field whose size does not fit in its one byte size.
    #[error("field `{field}` has size {size}, at most {max} is allowed", max = Schema::MAX_SIZE)]
    SizeTooLarge {
        /// The offending field.
        field: String,
        /// The declared size.
        size: usize,
    },
    /// Nested schemas deeper than [`Schema::MAX_DEPTH`].
    #[error("schema nesting depth {0} exceeds {max}", max = Schema::MAX_DEPTH)]
    TooDeep(usize),
    /// Two fields share a name.
    #[error("field `{0}` appears more than once")]
    DuplicateField(String),
}

impl TypeCode {
    /// Every type code in table order.
    pub const ALL: [TypeCode; 11] = [
        TypeCode::Uint,
        TypeCode::Number,
        TypeCode::Address,
        TypeCode::Double,
        TypeCode::Boolean,
        TypeCode::String,
        TypeCode::Bytes,
        TypeCode::Base64,
        TypeCode::Object,
        TypeCode::Hash,
        TypeCode::Price,
    ];

    /// The name used for this type in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            TypeCode::Uint => "uint",
            TypeCode::Number => "number",
            TypeCode::Address => "address",
            TypeCode::Double => "double",
            TypeCode::Boolean => "boolean",
            TypeCode::String => "string",
            TypeCode::Bytes => "bytes",
            TypeCode::Base64 => "base64",
            TypeCode::Object => "object",
            TypeCode::Hash => "hash",
            TypeCode::Price => "price",
        }
    }

    /// The encoded width of types whose width does not depend on the schema.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            TypeCode::Uint | TypeCode::Number | TypeCode::Double => Some(8),
            TypeCode::Address => Some(ADDRESS_LENGTH),
            TypeCode::Boolean => Some(1),
            TypeCode::Hash => Some(DIGEST_LENGTH),
            TypeCode::Price => Some(PRICE_LENGTH),
            TypeCode::String | TypeCode::Bytes | TypeCode::Base64 | TypeCode::Object => None,
        }
    }
}

impl core::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A byte that is not in the type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown type code {0}")]
pub struct UnknownTypeCode(pub u8);

impl TryFrom<u8> for TypeCode {
    type Error = UnknownTypeCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TypeCode::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(UnknownTypeCode(value))
    }
}

impl FieldType {
    /// The type code written for this field.
    pub const fn type_code(&self) -> TypeCode {
        match self {
            FieldType::Uint => TypeCode::Uint,
            FieldType::Number => TypeCode::Number,
            FieldType::Address => TypeCode::Address,
            FieldType::Double => TypeCode::Double,
            FieldType::Boolean => TypeCode::Boolean,
            FieldType::Price => TypeCode::Price,
            FieldType::String { .. } => TypeCode::String,
            FieldType::Bytes { .. } => TypeCode::Bytes,
            FieldType::Base64 { .. } => TypeCode::Base64,
            FieldType::Object(_) => TypeCode::Object,
            FieldType::Hash(_) => TypeCode::Hash,
        }
    }

    /// The declared size of `string`, `bytes` and `base64` fields.
    pub const fn size(&self) -> Option<usize> {
        match self {
            FieldType::String { size } | FieldType::Bytes { size } | FieldType::Base64 { size } => {
                Some(*size)
            }
            _ => None,
        }
    }

    /// The nested schema of `object` and `hash` fields.
    pub const fn nested(&self) -> Option<&Schema> {
        match self {
            FieldType::Object(schema) | FieldType::Hash(schema) => Some(schema),
            _ => None,
        }
    }
}

impl Schema {
    /// Maximum number of fields in one schema.
    ///
    /// The count is a single byte with the high bit reserved for a future
    /// variable-length extension.
    pub const MAX_FIELDS: usize = 127;
    /// Maximum length in bytes of a field name.
    pub const MAX_NAME_LEN: usize = 127;
    /// Maximum declared size of a `string`, `bytes` or `base64` field.
    pub const MAX_SIZE: usize = 127;
    /// Maximum nesting depth, counting the top-level schema as depth 1.
    pub const MAX_DEPTH: usize = 16;

    /// An empty schema.
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field, builder style.
    pub fn with(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.push(name, ty);
        self
    }

    /// Append a field.
    pub fn push(&mut self, name: impl Into<String>, ty: FieldType) {
        self.fields.push(Field {
            name: name.into(),
            ty,
        });
    }

    /// The fields in layout order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The type of the named field.
    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.ty)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Nesting depth, counting this schema as 1.
    pub fn depth(&self) -> usize {
        1 + self
            .fields
            .iter()
            .filter_map(|field| field.ty.nested())
            .map(Schema::depth)
            .max()
            .unwrap_or(0)
    }

    /// Check that the schema can be encoded.
    ///
    /// Field counts, name lengths and sizes must fit in one byte with the
    /// high bit clear, names must be unique and nesting is bounded by
    /// [`Schema::MAX_DEPTH`].
    pub fn check(&self) -> Result<(), SchemaError> {
        self.check_at(1)
    }

    fn check_at(&self, depth: usize) -> Result<(), SchemaError> {
        if depth > Self::MAX_DEPTH {
            return Err(SchemaError::TooDeep(depth));
        }
        if self.fields.len() > Self::MAX_FIELDS {
            return Err(SchemaError::TooManyFields(self.fields.len()));
        }
        let mut names = HashSet::with_capacity(self.fields.len());
        for Field { name, ty } in &self.fields {
            if name.len() > Self::MAX_NAME_LEN {
                return Err(SchemaError::NameTooLong {
                    name: name.clone(),
                    len: name.len(),
                });
            }
            if !names.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
            match ty {
                FieldType::String { size } | FieldType::Bytes { size } | FieldType::Base64 { size }
                    if *size > Self::MAX_SIZE =>
                {
                    return Err(SchemaError::SizeTooLarge {
                        field: name.clone(),
                        size: *size,
                    });
                }
                FieldType::Object(nested) | FieldType::Hash(nested) => nested.check_at(depth + 1)?,
                _ => (),
            }
        }
        Ok(())
    }
}

impl SchemaError {
    /// Whether this error is a cap overflow rather than a naming conflict.
    pub fn is_too_large(&self) -> bool {
        !matches!(self, SchemaError::DuplicateField(_))
    }
}

impl FromIterator<Field> for Schema {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Field;
    type IntoIter = core::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
