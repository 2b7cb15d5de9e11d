//! Golden fixture generator for the BI format conformance suite.
//!
//! Writes every fixture under `tests/golden/`. Run it after a deliberate
//! wire-format change and commit the regenerated buffers; the inline
//! snapshots in `tests/conformance.rs` are then updated with
//! `cargo insta review`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p bif-tests
//! ```
//!
//! # Generated fixtures
//!
//! | Directory                     | Contents                                   |
//! |-------------------------------|--------------------------------------------|
//! | simple_record                 | blob + int, final int without newline      |
//! | mixed_fields                  | multi-line blob, negative int, empty blob  |
//! | duplicate_names               | same name as int then blob                 |
//! | edge_cases/binary_blob        | blob body with NUL, 0xFF, '\n', ' ', ':'   |
//! | edge_cases/truncated_blob     | Handcrafted: declared length overruns      |
//! | edge_cases/unsupported_type   | Handcrafted: type byte 'x'                 |
//! | edge_cases/padded_final_int   | Handcrafted: spaces before unterminated int |

#![allow(clippy::pedantic)]

use std::path::Path;

use bif_encoder::BifEncoder;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    generate_simple_record(&golden_dir);
    generate_mixed_fields(&golden_dir);
    generate_duplicate_names(&golden_dir);
    generate_edge_cases(&golden_dir);

    println!("All golden fixtures written to {}", golden_dir.display());
}

fn write_fixture(dir: &Path, bytes: &[u8]) {
    std::fs::create_dir_all(dir).expect("create fixture dir");
    let path = dir.join("payload.bif");
    std::fs::write(&path, bytes).expect("write fixture");
    println!("  {} ({} bytes)", path.display(), bytes.len());
}

fn generate_simple_record(golden_dir: &Path) {
    let bytes = BifEncoder::new()
        .add_blob("name", b"Johnny")
        .add_int("age", 32)
        .omit_final_newline()
        .encode()
        .unwrap();
    write_fixture(&golden_dir.join("simple_record"), &bytes);
}

fn generate_mixed_fields(golden_dir: &Path) {
    let bytes = BifEncoder::new()
        .add_blob("greeting", b"hello\nworld")
        .add_int("delta", -17)
        .add_blob("empty", b"")
        .add_blob("colon", b":i fake 1")
        .add_int("max", i64::MAX)
        .encode()
        .unwrap();
    write_fixture(&golden_dir.join("mixed_fields"), &bytes);
}

fn generate_duplicate_names(golden_dir: &Path) {
    let bytes = BifEncoder::new()
        .add_int("a", 1)
        .add_blob("a", b"xyz")
        .add_int("b", 2)
        .encode()
        .unwrap();
    write_fixture(&golden_dir.join("duplicate_names"), &bytes);
}

fn generate_edge_cases(golden_dir: &Path) {
    let edge = golden_dir.join("edge_cases");

    let binary = BifEncoder::new()
        .add_blob("raw", &[0x00, 0xff, b'\n', b' ', b':'])
        .encode()
        .unwrap();
    write_fixture(&edge.join("binary_blob"), &binary);

    // The encoder never produces these; they are written byte for byte.
    write_fixture(&edge.join("truncated_blob"), b":b blob 5\nAB");
    write_fixture(&edge.join("unsupported_type"), b":x bad 1\n");
    write_fixture(&edge.join("padded_final_int"), b":i a 1\n:i last   99");
}
