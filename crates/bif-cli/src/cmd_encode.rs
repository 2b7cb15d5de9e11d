/// Implementation of `bif encode`.
///
/// Reads a JSON manifest (see [`crate::manifest`]) and serialises its
/// fields into a BI format buffer with [`BifEncoder`]. Field order is kept;
/// duplicate names are written as given.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use bif_encoder::BifEncoder;

use crate::EncodeArgs;
use crate::manifest::{Manifest, ManifestField};

/// Run the `bif encode` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, a blob entry
/// does not name exactly one content source, a content file cannot be
/// read, a field name is invalid, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let manifest: Manifest = serde_json::from_str(&text)
        .with_context(|| format!("invalid manifest {}", args.input.display()))?;

    let base_dir = args.input.parent().unwrap_or_else(|| Path::new("."));
    let encoder = build_encoder(&manifest, base_dir)?;
    let bytes = encoder.encode().context("failed to encode fields")?;

    fs::write(&args.output, &bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Wrote {} bytes ({} field{}) to {}",
        bytes.len(),
        encoder.len(),
        if encoder.len() == 1 { "" } else { "s" },
        args.output.display()
    );
    Ok(())
}

fn build_encoder(manifest: &Manifest, base_dir: &Path) -> Result<BifEncoder> {
    let mut encoder = BifEncoder::new();
    for field in &manifest.fields {
        match field {
            ManifestField::Blob {
                name,
                content,
                content_hex,
                content_file,
            } => {
                let body = blob_body(
                    name,
                    content.as_deref(),
                    content_hex.as_deref(),
                    content_file.as_deref(),
                    base_dir,
                )?;
                encoder.add_blob(name, &body);
            }
            ManifestField::Int { name, value } => {
                encoder.add_int(name, *value);
            }
        }
    }
    if manifest.omit_final_newline {
        encoder.omit_final_newline();
    }
    Ok(encoder)
}

fn blob_body(
    name: &str,
    content: Option<&str>,
    content_hex: Option<&str>,
    content_file: Option<&str>,
    base_dir: &Path,
) -> Result<Vec<u8>> {
    match (content, content_hex, content_file) {
        (Some(text), None, None) => Ok(text.as_bytes().to_vec()),
        (None, Some(encoded), None) => {
            hex::decode(encoded).with_context(|| format!("blob {name:?}: content_hex is not valid hex"))
        }
        (None, None, Some(file)) => {
            let path = base_dir.join(file);
            fs::read(&path).with_context(|| format!("blob {name:?}: cannot read {}", path.display()))
        }
        _ => bail!("blob {name:?} needs exactly one of content, content_hex, or content_file"),
    }
}
