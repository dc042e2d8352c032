//! # Values
//! Tagged field values and the records built from them.
//!
//! Every [`Value`] variant corresponds to one [`TypeCode`]; a value's shape is
//! fixed when it is constructed, so the codec only has to compare tags.

use crate::{Address, Digest, Price, TypeCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A `uint` field.
    Uint(u64),
    /// A `number` field.
    Number(u64),
    /// An `address` field.
    Address(Address),
    /// A `double` field.
    Double(f64),
    /// A `boolean` field.
    Boolean(bool),
    /// A `string` field.
    String(String),
    /// A `bytes` field.
    Bytes(Vec<u8>),
    /// A `base64` field, held as its text.
    Base64(String),
    /// An inline `object`, or the resolved target of a `hash` field.
    Object(Record),
    /// The digest held by a `hash` field that has not been resolved.
    Hash(Digest),
    /// A `price` field.
    Price(Price),
}

/// A mapping of field names to values.
///
/// The layout is defined by the schema the record is encoded against, not by
/// the record, so fields are kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Value {
    /// The type code this value encodes as.
    ///
    /// Note that an [`Value::Object`] may also fill a `hash` field.
    pub fn type_code(&self) -> TypeCode {
        match self {
            Value::Uint(_) => TypeCode::Uint,
            Value::Number(_) => TypeCode::Number,
            Value::Address(_) => TypeCode::Address,
            Value::Double(_) => TypeCode::Double,
            Value::Boolean(_) => TypeCode::Boolean,
            Value::String(_) => TypeCode::String,
            Value::Bytes(_) => TypeCode::Bytes,
            Value::Base64(_) => TypeCode::Base64,
            Value::Object(_) => TypeCode::Object,
            Value::Hash(_) => TypeCode::Hash,
            Value::Price(_) => TypeCode::Price,
        }
    }

    /// The integer of a `uint` value.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer of a `number` value.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The address of an `address` value.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(v) => Some(*v),
            _ => None,
        }
    }

    /// The float of a `double` value.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The flag of a `boolean` value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// The text of a `string` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// The bytes of a `bytes` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// The text of a `base64` value.
    pub fn as_base64(&self) -> Option<&str> {
        match self {
            Value::Base64(v) => Some(v),
            _ => None,
        }
    }

    /// The nested record of an `object` value.
    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Value::Object(v) => Some(v),
            _ => None,
        }
    }

    /// The digest of an unresolved `hash` value.
    pub fn as_hash(&self) -> Option<Digest> {
        match self {
            Value::Hash(v) => Some(*v),
            _ => None,
        }
    }

    /// The price of a `price` value.
    pub fn as_price(&self) -> Option<Price> {
        match self {
            Value::Price(v) => Some(*v),
            _ => None,
        }
    }
}

impl Record {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// The value of the named field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Mutable access to the named field.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Remove the named field.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Digests of all `hash` references, at any depth, that are not yet
    /// resolved to their records.
    pub fn unresolved(&self) -> Vec<Digest> {
        let mut digests = Vec::new();
        self.collect_unresolved(&mut digests);
        digests
    }

    fn collect_unresolved(&self, digests: &mut Vec<Digest>) {
        for value in self.fields.values() {
            match value {
                Value::Hash(digest) => digests.push(*digest),
                Value::Object(record) => record.collect_unresolved(digests),
                _ => (),
            }
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<Address> for Value {
    fn from(v: Address) -> Self {
        Value::Address(v)
    }
}

impl From<Digest> for Value {
    fn from(v: Digest) -> Self {
        Value::Hash(v)
    }
}

impl From<Price> for Value {
    fn from(v: Price) -> Self {
        Value::Price(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Object(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}
