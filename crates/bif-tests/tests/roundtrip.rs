//! Roundtrip integration tests for the BI format encode → decode pipeline.
//!
//! Any sequence of fields with valid names, encoded with [`BifEncoder`],
//! decodes to the record obtained by inserting those fields in order
//! (last write wins for duplicate names). Re-encoding a decoded record with
//! [`BifEncoder::from_record`] reproduces the buffer byte for byte whenever
//! the names were distinct.

use bif_decoder::{BifDecoder, parse_complete};
use bif_encoder::{BifEncoder, EncodeError};
use bif_types::{Field, Record};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ── Strategies ───────────────────────────────────────────────────────────────

fn name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_:]{0,8}"
}

fn field() -> impl Strategy<Value = Field> {
    prop_oneof![
        (name(), prop::collection::vec(any::<u8>(), 0..64))
            .prop_map(|(name, body)| Field::blob(name, body)),
        (name(), any::<i64>()).prop_map(|(name, value)| Field::int(name, value)),
    ]
}

fn encode(fields: &[Field], omit_final_newline: bool) -> Vec<u8> {
    let mut encoder = BifEncoder::new();
    for field in fields {
        encoder.add_field(field.clone());
    }
    if omit_final_newline {
        encoder.omit_final_newline();
    }
    encoder.encode().unwrap()
}

// ── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(config())]

    /// Decoding an encoded field list gives the last-write-wins record.
    #[test]
    fn decode_inverts_encode(
        fields in prop::collection::vec(field(), 0..12),
        omit_final_newline in any::<bool>(),
    ) {
        let buf = encode(&fields, omit_final_newline);
        let expected: Record = fields.into_iter().collect();
        prop_assert_eq!(parse_complete(buf).unwrap(), expected);
    }

    /// With distinct names, decode → re-encode is byte-identical.
    #[test]
    fn reencode_is_byte_identical(
        fields in prop::collection::btree_map(name(), field(), 0..8),
    ) {
        // Re-key each field by its map key so names are unique.
        let fields: Vec<Field> = fields
            .into_iter()
            .map(|(name, field)| match field {
                Field::Blob(blob) => Field::blob(name, blob.bytes),
                Field::Int(int) => Field::int(name, int.value),
            })
            .collect();
        let buf = encode(&fields, false);
        let record = parse_complete(buf.clone()).unwrap();
        prop_assert_eq!(BifEncoder::from_record(&record).encode().unwrap(), buf);
    }
}

// ── Fixed cases ──────────────────────────────────────────────────────────────

#[test]
fn reference_example() {
    let buf = BifEncoder::new()
        .add_blob("name", b"Johnny")
        .add_int("age", 32)
        .omit_final_newline()
        .encode()
        .unwrap();
    let record = BifDecoder::decode(&buf).unwrap();

    let name = record.get("name").and_then(Field::as_blob).unwrap();
    assert_eq!(name.size, 6);
    assert_eq!(name.as_str(), Ok("Johnny"));
    assert_eq!(record.get("age").and_then(Field::as_int), Some(32));
    assert_eq!(record.names().collect::<Vec<_>>(), ["name", "age"]);
}

#[test]
fn blob_containing_framing_bytes() {
    let body = b":i fake 1\n:b x 9999\n\n";
    let buf = BifEncoder::new()
        .add_blob("tricky", body)
        .add_int("after", 1)
        .encode()
        .unwrap();
    let record = BifDecoder::decode(&buf).unwrap();
    assert_eq!(record.len(), 2);
    assert_eq!(record.get("tricky"), Some(&Field::blob("tricky", &body[..])));
}

#[test]
fn extreme_ints() {
    let buf = BifEncoder::new()
        .add_int("min", i64::MIN)
        .add_int("max", i64::MAX)
        .add_int("zero", 0)
        .omit_final_newline()
        .encode()
        .unwrap();
    let record = BifDecoder::decode(&buf).unwrap();
    assert_eq!(record.get("min").and_then(Field::as_int), Some(i64::MIN));
    assert_eq!(record.get("max").and_then(Field::as_int), Some(i64::MAX));
    assert_eq!(record.get("zero").and_then(Field::as_int), Some(0));
}

#[test]
fn duplicate_names_keep_first_position_last_value() {
    let buf = BifEncoder::new()
        .add_int("a", 1)
        .add_int("b", 2)
        .add_blob("a", b"later")
        .encode()
        .unwrap();
    let record = BifDecoder::decode(&buf).unwrap();
    assert_eq!(record.names().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(record.get("a"), Some(&Field::blob("a", "later")));
}

#[test]
fn invalid_names_never_reach_the_wire() {
    assert!(matches!(
        BifEncoder::new().add_int("has space", 1).encode(),
        Err(EncodeError::NameContainsSpace { .. })
    ));
    assert!(matches!(
        BifEncoder::new().add_blob("", b"x").encode(),
        Err(EncodeError::EmptyName { index: 0 })
    ));
}
