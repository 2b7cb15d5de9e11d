/// Implementation of `bif decode`.
///
/// Decodes a buffer with the selected driver and prints the record, either
/// as `name: value` lines or as a JSON manifest that `bif encode` accepts.
///
/// ```text
/// $ bif decode --text ':b name 6\nJohnny\n:i age 32'
/// name: Johnny
/// age: 32
/// ```
use std::fs;
use std::io::{self, Write as _};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use bif_driver::render::render_fields;
use bif_driver::{DriverConfig, ParseMode};

use crate::DecodeArgs;
use crate::manifest::Manifest;

/// Run the `bif decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read, `--mode` is not a known
/// driver, the buffer is malformed, or the output cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let buf = args.input.load()?;
    let config = DriverConfig {
        mode: parse_mode(&args.mode)?,
        tick_interval: Duration::from_millis(args.tick_ms),
    };

    let record = crate::runtime()?
        .block_on(bif_driver::run(buf, &config))
        .with_context(|| format!("failed to decode {}", args.input.name()))?;

    let mut output = if args.json {
        serde_json::to_string_pretty(&Manifest::from_record(&record))?
    } else {
        render_fields(&record)
    };
    if !output.is_empty() {
        output.push('\n');
    }

    match &args.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

fn parse_mode(name: &str) -> Result<ParseMode> {
    ParseMode::from_name(name).ok_or_else(|| {
        anyhow!("unknown mode {name:?}; expected complete, cooperative, or incremental")
    })
}
