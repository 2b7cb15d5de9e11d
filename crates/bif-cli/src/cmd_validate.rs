/// Implementation of `bif validate`.
///
/// Runs the parse to completion and reports either a series of success
/// checkmarks (`✓`) or a diagnostic failure line (`✗`). A blob whose
/// declared length runs past the end of the buffer still decodes, so it
/// is reported as a warning (`!`) rather than a failure.
///
/// # Success output
///
/// ```text
/// ✓ Fields: 3 fields parsed (2 distinct names)
/// ✓ Blobs: all bodies complete
/// ✓ Length: 36 bytes consumed
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: unsupported field type at byte 1: expected 'b' or 'i' but found 'x'
/// ```
use anyhow::{Result, anyhow};
use bif_decoder::{ParseProcess, ParseState};
use bif_types::Field;

use crate::ValidateArgs;

/// Run the `bif validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the buffer is
/// malformed.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let buf = args.input.load()?;
    let len = buf.len();

    let mut process = ParseProcess::new(buf);
    while !process.step() {}

    match process.state() {
        ParseState::Succeeded(record) => {
            // The terminal step decodes nothing.
            let parsed = process.steps().saturating_sub(1);
            println!(
                "✓ Fields: {parsed} field{} parsed ({} distinct name{})",
                plural(parsed),
                record.len(),
                plural(record.len())
            );

            let truncated: Vec<_> = record
                .iter()
                .filter_map(Field::as_blob)
                .filter(|blob| blob.is_truncated())
                .collect();
            if truncated.is_empty() {
                println!("✓ Blobs: all bodies complete");
            }
            for blob in truncated {
                println!(
                    "! Blobs: {:?} declares {} bytes but only {} are present",
                    blob.name,
                    blob.size,
                    blob.bytes.len()
                );
            }

            println!("✓ Length: {len} bytes consumed");
            Ok(())
        }
        ParseState::Failed(error) => {
            println!("✗ Error: {error}");
            Err(anyhow!("validation failed"))
        }
        ParseState::Running { .. } => Err(anyhow!("parse stopped before reaching a terminal state")),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
