//! Plain-text views of a parse, for terminals and logs.
//!
//! ```text
//! Parsing 'person.bif'...      ← title while running
//! name: Johnny                 ← one line per field, insertion order
//! age: 32
//! ```

use std::fmt::Write;

use bif_types::{Field, Record};

use crate::incremental::DriverResult;

/// One `name: value` line per field, in insertion order, joined with `\n`
/// (no trailing newline). Blob bodies are shown as lossy UTF-8.
#[must_use]
pub fn render_fields(record: &Record) -> String {
    let mut out = String::new();
    for (i, field) in record.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = match field {
            Field::Blob(blob) => write!(out, "{}: {}", blob.name, blob.as_utf8()),
            Field::Int(int) => write!(out, "{}: {}", int.name, int.value),
        };
    }
    out
}

/// Status title for a parse of `source_name`, followed by the fields
/// whenever a record is available.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────┐
/// │ result / done        │ title                            │
/// ├──────────────────────┼──────────────────────────────────┤
/// │ None                 │ No parsing started               │
/// │ Some(Ok), running    │ Parsing '<name>'...              │
/// │ Some(Ok), done       │ Parsed '<name>'                  │
/// │ Some(Err(e))         │ e.to_string()                    │
/// └──────────────────────┴──────────────────────────────────┘
/// ```
#[must_use]
pub fn render_status(source_name: &str, done: bool, result: Option<&DriverResult>) -> String {
    match result {
        None => "No parsing started".to_string(),
        Some(Err(error)) => error.to_string(),
        Some(Ok(record)) => {
            let mut out = if done {
                format!("Parsed '{source_name}'")
            } else {
                format!("Parsing '{source_name}'...")
            };
            if !record.is_empty() {
                out.push('\n');
                out.push_str(&render_fields(record));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DriverError;
    use bif_decoder::{DecodeError, parse_complete};

    #[test]
    fn fields_in_insertion_order() {
        let record = parse_complete(":b name 6\nJohnny\n:i age 32").unwrap();
        assert_eq!(render_fields(&record), "name: Johnny\nage: 32");
    }

    #[test]
    fn empty_record_renders_nothing() {
        assert_eq!(render_fields(&Record::new()), "");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let record: Record = [Field::blob("raw", vec![0x66, 0xff])].into_iter().collect();
        assert_eq!(render_fields(&record), "raw: f\u{fffd}");
    }

    #[test]
    fn status_titles() {
        let record = parse_complete(":i a 1").unwrap();
        assert_eq!(render_status("in.bif", false, None), "No parsing started");
        assert_eq!(
            render_status("in.bif", false, Some(&Ok(record.clone()))),
            "Parsing 'in.bif'...\na: 1"
        );
        assert_eq!(
            render_status("in.bif", true, Some(&Ok(record))),
            "Parsed 'in.bif'\na: 1"
        );
        assert_eq!(
            render_status("in.bif", true, Some(&Ok(Record::new()))),
            "Parsed 'in.bif'"
        );
    }

    #[test]
    fn status_shows_errors() {
        let decode = DriverError::Decode(DecodeError::EmptyName { offset: 3 });
        assert_eq!(
            render_status("x", true, Some(&Err(decode.clone()))),
            decode.to_string()
        );
        assert_eq!(
            render_status("x", false, Some(&Err(DriverError::Cancelled))),
            "parsing was cancelled"
        );
    }
}
