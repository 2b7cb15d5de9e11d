/// Where a command reads its buffer from: a file path or inline text.
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bytes::Bytes;

/// Exactly one of `<FILE>` or `--text` must be given.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Path to the buffer to read.
    pub file: Option<PathBuf>,

    /// Inline buffer. `\n`, `\t` and `\\` escapes are expanded.
    #[arg(long)]
    pub text: Option<String>,
}

impl InputArgs {
    /// Display name for status output: the file path, or `<text>`.
    pub fn name(&self) -> String {
        match &self.file {
            Some(path) => path.display().to_string(),
            None => "<text>".to_string(),
        }
    }

    /// Read the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(&self) -> Result<Bytes> {
        if let Some(path) = &self.file {
            let bytes =
                fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
            return Ok(Bytes::from(bytes));
        }
        Ok(Bytes::from(unescape(self.text.as_deref().unwrap_or_default())))
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_escapes() {
        assert_eq!(unescape(r":b name 6\nJohnny\n:i age 32"), ":b name 6\nJohnny\n:i age 32");
        assert_eq!(unescape(r"a\\n"), "a\\n");
        assert_eq!(unescape(r"tab\tq\x"), "tab\tq\\x");
        assert_eq!(unescape("end\\"), "end\\");
    }

    #[test]
    fn text_input_is_named_placeholder() {
        let args = InputArgs {
            file: None,
            text: Some(r":i a 1\n".into()),
        };
        assert_eq!(args.name(), "<text>");
        assert_eq!(args.load().unwrap(), Bytes::from_static(b":i a 1\n"));
    }
}
