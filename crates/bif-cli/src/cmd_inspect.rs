/// Implementation of `bif inspect`.
///
/// Resumes the parse one step at a time and prints the field each step
/// decoded together with the byte range it occupied.
///
/// # Output format
///
/// ```text
/// Step 1 [0..17): BLOB name (6 bytes) "Johnny"
/// Step 2 [17..26): INT age = 32
/// ---
/// Done after 3 steps: 2 fields, 26 bytes
/// ```
use std::fmt::Write as _;

use anyhow::{Result, anyhow};
use bif_decoder::{ParseProcess, ParseState};
use bif_types::{BlobField, Field};

use crate::InspectArgs;

/// Run the `bif inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the buffer is
/// malformed. Steps decoded before the failure are still printed.
pub fn run(args: &InspectArgs) -> Result<()> {
    let buf = args.input.load()?;
    let mut process = ParseProcess::new(buf);

    loop {
        let start = process.offset();
        if process.step() {
            break;
        }
        let end = process.offset();
        let Some(field) = process.last_field() else {
            continue;
        };
        println!("Step {} [{start}..{end}): {}", process.steps(), describe(field));
        if let (true, Field::Blob(blob)) = (args.show_hex, field) {
            print!("{}", hex_dump(blob));
        }
    }

    println!("---");
    match process.state() {
        ParseState::Succeeded(record) => {
            println!(
                "Done after {} steps: {} field{}, {} bytes",
                process.steps(),
                record.len(),
                if record.len() == 1 { "" } else { "s" },
                process.buffer().len()
            );
            Ok(())
        }
        ParseState::Failed(error) => Err(anyhow!("step {} failed: {error}", process.steps())),
        ParseState::Running { .. } => Err(anyhow!("parse stopped before reaching a terminal state")),
    }
}

fn describe(field: &Field) -> String {
    match field {
        Field::Blob(blob) => {
            let preview: String = blob.as_utf8().chars().take(40).collect();
            let ellipsis = if blob.as_utf8().chars().count() > 40 { "…" } else { "" };
            let truncated = if blob.is_truncated() {
                format!(", {} present", blob.bytes.len())
            } else {
                String::new()
            };
            format!(
                "BLOB {} ({} bytes{truncated}) {preview:?}{ellipsis}",
                blob.name, blob.size
            )
        }
        Field::Int(int) => format!("INT {} = {}", int.name, int.value),
    }
}

/// Sixteen bytes per line: offset, hex, printable ASCII.
fn hex_dump(blob: &BlobField) -> String {
    let mut out = String::new();
    for (i, chunk) in blob.bytes.chunks(16).enumerate() {
        let hex = hex::encode(chunk)
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        let _ = writeln!(out, "           {:04x}  {hex:<48}  {ascii}", i * 16);
    }
    out
}
