use super::*;
use crate::decode;
use packlog_types::{Address, Digest, Price};

fn schema() -> Schema {
    Schema::new()
        .with("user", FieldType::Address)
        .with("amount", FieldType::Uint)
        .with("ratio", FieldType::Double)
        .with("live", FieldType::Boolean)
}

fn record() -> Record {
    Record::new()
        .with("user", Address([7; 32]))
        .with("amount", Value::Uint(100))
        .with("ratio", 1.5f64)
        .with("live", true)
}

#[test]
fn encodes_in_schema_order() {
    let bytes = encode(&record(), &schema()).unwrap();
    let mut expected = vec![7; 32];
    expected.extend_from_slice(&100u64.to_be_bytes());
    expected.extend_from_slice(&1.5f64.to_le_bytes());
    expected.push(1);
    assert_eq!(bytes, expected);
}

#[test]
fn doubles_are_little_endian() {
    let schema = Schema::new().with("d", FieldType::Double);
    let record = Record::new().with("d", 1.0f64);
    assert_eq!(
        encode(&record, &schema).unwrap(),
        hex::decode("000000000000f03f").unwrap()
    );
}

#[test]
fn integers_and_prices_are_big_endian() {
    let schema = Schema::new()
        .with("n", FieldType::Number)
        .with("p", FieldType::Price);
    let record = Record::new()
        .with("n", Value::Number(0x0102))
        .with("p", Price::from(0x0304u128));
    let bytes = encode(&record, &schema).unwrap();
    assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 1, 2]);
    assert_eq!(bytes[8..].len(), 17);
    assert_eq!(&bytes[8 + 15..], &[3, 4]);
}

#[test]
fn extra_fields_are_ignored() {
    let with_extra = record().with("note", "ignored");
    assert_eq!(
        encode(&with_extra, &schema()).unwrap(),
        encode(&record(), &schema()).unwrap()
    );
}

#[test]
fn missing_field() {
    let mut record = record();
    record.remove("amount");
    let err = encode(&record, &schema()).unwrap_err();
    assert!(
        matches!(err, EncodeError::MissingField { ref field, .. } if field == "amount"),
        "{err}"
    );
}

#[test]
fn shape_mismatch() {
    // A number in a uint field is the wrong tag even though both are u64.
    let record = record().with("amount", Value::Number(100));
    let err = encode(&record, &schema()).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::ShapeMismatch {
            expected: TypeCode::Uint,
            ..
        }
    ));
}

#[test]
fn size_mismatch() {
    let schema = Schema::new().with("memo", FieldType::String { size: 4 });
    let record = Record::new().with("memo", "abc");
    assert_eq!(
        encode(&record, &schema).unwrap_err(),
        EncodeError::SizeMismatch {
            field: "memo".to_string(),
            expected: 4,
            actual: 3,
        }
    );

    let schema = Schema::new().with("raw", FieldType::Bytes { size: 2 });
    let record = Record::new().with("raw", vec![1u8, 2, 3]);
    assert!(matches!(
        encode(&record, &schema).unwrap_err(),
        EncodeError::SizeMismatch { expected: 2, actual: 3, .. }
    ));
}

#[test]
fn base64_is_written_decoded() {
    let schema = Schema::new().with("sig", FieldType::Base64 { size: 3 });
    let record = Record::new().with("sig", Value::Base64("AQID".to_string()));
    assert_eq!(encode(&record, &schema).unwrap(), vec![1, 2, 3]);

    let record = Record::new().with("sig", Value::Base64("not base64!".to_string()));
    assert!(matches!(
        encode(&record, &schema).unwrap_err(),
        EncodeError::ShapeMismatch { .. }
    ));

    let record = Record::new().with("sig", Value::Base64("AQIDBA==".to_string()));
    assert!(matches!(
        encode(&record, &schema).unwrap_err(),
        EncodeError::SizeMismatch { expected: 3, actual: 4, .. }
    ));
}

#[test]
fn object_fields_are_inlined() {
    let schema = Schema::new().with("inner", FieldType::Object(schema()));
    let outer = Record::new().with("inner", record());
    assert_eq!(
        encode(&outer, &schema).unwrap(),
        encode(&record(), &self::schema()).unwrap()
    );
}

#[test]
fn hash_fields_hold_content_digest() {
    let schema = Schema::new().with("ref", FieldType::Hash(self::schema()));
    let outer = Record::new().with("ref", record());
    let digest = content_digest(&record(), &self::schema()).unwrap();
    assert_eq!(encode(&outer, &schema).unwrap(), digest.0.to_vec());

    // A bare digest encodes to the same bytes.
    let outer = Record::new().with("ref", digest);
    assert_eq!(encode(&outer, &schema).unwrap(), digest.0.to_vec());
}

#[test]
fn hash_field_errors_carry_full_path() {
    let schema = Schema::new().with("ref", FieldType::Hash(self::schema()));
    let mut inner = record();
    inner.remove("live");
    let outer = Record::new().with("ref", inner);
    let err = encode(&outer, &schema).unwrap_err();
    assert!(
        matches!(err, EncodeError::MissingField { ref field, .. } if field == "ref.live"),
        "{err}"
    );
}

#[test]
fn nested_error_carries_full_path() {
    let schema = Schema::new().with("inner", FieldType::Object(self::schema()));
    let outer = Record::new().with("inner", record().with("live", Value::Uint(1)));
    let err = encode(&outer, &schema).unwrap_err();
    assert!(
        matches!(err, EncodeError::ShapeMismatch { ref field, .. } if field == "inner.live"),
        "{err}"
    );
}

#[test]
fn invalid_schema_fails_before_writing() {
    let schema = Schema::new().with("b", FieldType::Bytes { size: 200 });
    let record = Record::new().with("b", vec![0u8; 200]);
    assert!(matches!(
        encode(&record, &schema).unwrap_err(),
        EncodeError::InvalidSchema(_)
    ));
    assert!(matches!(
        encode_with_schema(&record, &schema).unwrap_err(),
        EncodeError::InvalidSchema(_)
    ));
}

#[test]
fn self_described_layout() {
    let bytes = encode_with_schema(&record(), &schema()).unwrap();
    let format = encode_format(&schema()).unwrap();
    let body = encode(&record(), &schema()).unwrap();
    assert_eq!(&bytes[..8], &(format.len() as u64).to_be_bytes());
    assert_eq!(&bytes[8..8 + format.len()], &format[..]);
    assert_eq!(&bytes[8 + format.len()..], &body[..]);
}

#[test]
fn self_described_fixture() {
    let schema = Schema::new()
        .with("a", FieldType::Uint)
        .with("ok", FieldType::Boolean)
        .with("p", FieldType::Price);
    let record = Record::new()
        .with("a", Value::Uint(1))
        .with("ok", true)
        .with("p", Price::from(2_u64));
    let expected = hex::decode(concat!(
        "000000000000000b",
        "03016100026f6b0401700a",
        "0000000000000001",
        "01",
        "0000000000000000000000000000000002",
    ))
    .unwrap();
    assert_eq!(encode_with_schema(&record, &schema).unwrap(), expected);
    assert_eq!(
        format!("{:x}", content_digest(&record, &schema).unwrap()),
        "cbdbeb379e906550c8609a1a80e551938c5345f42354b745a8e3a657ca3feb59"
    );
}

#[test]
fn digest_is_stable_and_order_sensitive() {
    let a = content_digest(&record(), &schema()).unwrap();
    assert_eq!(a, content_digest(&record(), &schema()).unwrap());

    let reordered = Schema::new()
        .with("amount", FieldType::Uint)
        .with("user", FieldType::Address)
        .with("ratio", FieldType::Double)
        .with("live", FieldType::Boolean);
    assert_ne!(a, content_digest(&record(), &reordered).unwrap());

    let changed = record().with("amount", Value::Uint(101));
    assert_ne!(a, content_digest(&changed, &schema()).unwrap());
    assert_ne!(a, Digest::default());
}

#[test]
fn decodes_what_it_encodes() {
    let bytes = encode(&record(), &schema()).unwrap();
    assert_eq!(decode(&bytes, &schema()).unwrap(), record());
}
