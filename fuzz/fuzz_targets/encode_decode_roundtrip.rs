#![no_main]

use arbitrary::Arbitrary;
use bif_decoder::BifDecoder;
use bif_encoder::BifEncoder;
use bif_types::{Field, Record};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzField {
    Blob { name: String, body: Vec<u8> },
    Int { name: String, value: i64 },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    fields: Vec<FuzzField>,
    omit_final_newline: bool,
}

/// Names the encoder accepts: non-empty, no spaces.
fn clean_name(name: &str) -> String {
    let name: String = name.chars().filter(|&c| c != ' ').collect();
    if name.is_empty() {
        "_".to_string()
    } else {
        name
    }
}

// Fuzz target: encode -> decode roundtrip.
//
// Arbitrary fields are encoded with BifEncoder and decoded again; the
// result must equal inserting the same fields into a Record in order.
fuzz_target!(|input: FuzzInput| {
    let fields: Vec<Field> = input
        .fields
        .into_iter()
        .map(|field| match field {
            FuzzField::Blob { name, body } => Field::blob(clean_name(&name), body),
            FuzzField::Int { name, value } => Field::int(clean_name(&name), value),
        })
        .collect();

    let mut encoder = BifEncoder::new();
    for field in &fields {
        encoder.add_field(field.clone());
    }
    if input.omit_final_newline {
        encoder.omit_final_newline();
    }
    let wire = encoder.encode().unwrap();

    let expected: Record = fields.into_iter().collect();
    assert_eq!(BifDecoder::decode(&wire).unwrap(), expected);
});
