//! Typed access to the fields of a dynamic record.

use crate::{Packed, RecordError, Reference, Signature};
use packlog_types::{Address, Price, Record, TypeCode, Value};

fn field<'a>(record: &'a Record, name: &str) -> Result<&'a Value, RecordError> {
    record
        .get(name)
        .ok_or_else(|| RecordError::MissingField(name.to_string()))
}

fn wrong_type(name: &str, expected: TypeCode, found: &Value) -> RecordError {
    RecordError::WrongType {
        field: name.to_string(),
        expected,
        found: found.type_code(),
    }
}

pub(crate) fn uint(record: &Record, name: &str) -> Result<u64, RecordError> {
    let value = field(record, name)?;
    value
        .as_uint()
        .ok_or_else(|| wrong_type(name, TypeCode::Uint, value))
}

pub(crate) fn number(record: &Record, name: &str) -> Result<u64, RecordError> {
    let value = field(record, name)?;
    value
        .as_number()
        .ok_or_else(|| wrong_type(name, TypeCode::Number, value))
}

pub(crate) fn address(record: &Record, name: &str) -> Result<Address, RecordError> {
    let value = field(record, name)?;
    value
        .as_address()
        .ok_or_else(|| wrong_type(name, TypeCode::Address, value))
}

pub(crate) fn boolean(record: &Record, name: &str) -> Result<bool, RecordError> {
    let value = field(record, name)?;
    value
        .as_boolean()
        .ok_or_else(|| wrong_type(name, TypeCode::Boolean, value))
}

pub(crate) fn price(record: &Record, name: &str) -> Result<Price, RecordError> {
    let value = field(record, name)?;
    value
        .as_price()
        .ok_or_else(|| wrong_type(name, TypeCode::Price, value))
}

pub(crate) fn signature(record: &Record, name: &str) -> Result<Signature, RecordError> {
    let value = field(record, name)?;
    let text = value
        .as_base64()
        .ok_or_else(|| wrong_type(name, TypeCode::Base64, value))?;
    text.parse()
}

pub(crate) fn object<T: Packed>(record: &Record, name: &str) -> Result<T, RecordError> {
    let value = field(record, name)?;
    let inner = value
        .as_object()
        .ok_or_else(|| wrong_type(name, TypeCode::Object, value))?;
    T::from_record(inner)
}

pub(crate) fn reference<T: Packed>(record: &Record, name: &str) -> Result<Reference<T>, RecordError> {
    match field(record, name)? {
        Value::Hash(digest) => Ok(Reference::Digest(*digest)),
        Value::Object(inner) => Ok(Reference::Resolved(Box::new(T::from_record(inner)?))),
        value => Err(wrong_type(name, TypeCode::Hash, value)),
    }
}
