use std::fmt;

/// A single observed token in the input, used to report what the decoder
/// actually found where it expected something else.
///
/// Printable bytes render quoted (`'x'`), control bytes render escaped
/// (`'\n'`, `'\x00'`), and running off the end of the buffer renders as
/// `end of input`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Byte(u8),
    EndOfInput,
}

impl From<Option<u8>> for Token {
    fn from(byte: Option<u8>) -> Self {
        byte.map_or(Self::EndOfInput, Self::Byte)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(b) => write!(f, "'{}'", b.escape_ascii()),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Errors that can occur while decoding a BI format buffer.
///
/// Every variant carries the byte offset at which decoding stopped, so a
/// caller can point at the offending position in the input. The messages
/// are deterministic: the same malformed input always produces the same
/// text.
///
/// ```text
///   DecodeError
///   ├── MalformedPrefix      ← missing ':' or a missing ' ' separator
///   ├── EmptyName            ← ':b  ...' (zero-length field name)
///   ├── UnsupportedType      ← type byte other than 'b' or 'i'
///   ├── TruncatedBlobHeader  ← no '\n' after a blob's length
///   ├── MissingIntValue      ← int field with nothing after the name
///   └── InvalidNumber        ← length/value text with no decimal prefix
/// ```
///
/// The error is `Clone` so that a terminal failure can be handed out
/// repeatedly by a parse process that has already stopped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The field did not start with `:`, or the type byte was not followed
    /// by a space, or the name ran into the end of the buffer.
    #[error("malformed field prefix at byte {offset}: expected {expected} but found {found}")]
    MalformedPrefix {
        offset: usize,
        expected: &'static str,
        found: Token,
    },

    /// The name separator came straight after the type separator.
    #[error("empty field name at byte {offset}: expected a field name but found ' '")]
    EmptyName { offset: usize },

    #[error("unsupported field type at byte {offset}: expected 'b' or 'i' but found {found}")]
    UnsupportedType { offset: usize, found: Token },

    /// A blob's decimal length was not terminated by a newline before the
    /// end of the buffer.
    #[error("truncated blob header at byte {offset}: expected '\\n' after the blob length but found end of input")]
    TruncatedBlobHeader { offset: usize },

    /// `found` is the `'\n'` that ended an empty value line, or end of
    /// input when the final int had only spaces after its name.
    #[error("missing int value at byte {offset}: expected a decimal integer but found {found}")]
    MissingIntValue { offset: usize, found: Token },

    /// Length or value text had no leading decimal number, overflowed a
    /// 64-bit integer, or (for blob lengths) was negative.
    ///
    /// A lenient text-to-number conversion would produce "not a number"
    /// here and keep going: an int field would be stored as NaN, and a
    /// NaN blob length would end the parse as a success. An `i64` has no
    /// NaN and a negative length would move the cursor backwards, so the
    /// parse stops with this error instead.
    #[error("invalid number at byte {offset}: expected a decimal integer but found {text:?}")]
    InvalidNumber { offset: usize, text: String },
}

impl DecodeError {
    /// Byte offset into the input where decoding failed.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::MalformedPrefix { offset, .. }
            | Self::EmptyName { offset }
            | Self::UnsupportedType { offset, .. }
            | Self::TruncatedBlobHeader { offset }
            | Self::MissingIntValue { offset, .. }
            | Self::InvalidNumber { offset, .. } => *offset,
        }
    }

    /// Build an [`InvalidNumber`](Self::InvalidNumber) error from the raw
    /// bytes that failed to parse.
    #[must_use]
    pub fn invalid_number(offset: usize, text: &[u8]) -> Self {
        Self::InvalidNumber {
            offset,
            text: String::from_utf8_lossy(text).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_display_escapes_control_bytes() {
        assert_eq!(Token::Byte(b'x').to_string(), "'x'");
        assert_eq!(Token::Byte(b'\n').to_string(), "'\\n'");
        assert_eq!(Token::Byte(0).to_string(), "'\\x00'");
        assert_eq!(Token::EndOfInput.to_string(), "end of input");
    }

    #[test]
    fn malformed_prefix_message_names_expected_and_found() {
        let err = DecodeError::MalformedPrefix {
            offset: 0,
            expected: "':'",
            found: Token::Byte(b'x'),
        };
        assert_eq!(
            err.to_string(),
            "malformed field prefix at byte 0: expected ':' but found 'x'"
        );
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn empty_value_messages_name_what_was_found() {
        assert_eq!(
            DecodeError::EmptyName { offset: 3 }.to_string(),
            "empty field name at byte 3: expected a field name but found ' '"
        );
        let line = DecodeError::MissingIntValue {
            offset: 5,
            found: Token::Byte(b'\n'),
        };
        assert_eq!(
            line.to_string(),
            "missing int value at byte 5: expected a decimal integer but found '\\n'"
        );
        let end = DecodeError::MissingIntValue {
            offset: 8,
            found: Token::EndOfInput,
        };
        assert_eq!(
            end.to_string(),
            "missing int value at byte 8: expected a decimal integer but found end of input"
        );
    }

    #[test]
    fn invalid_number_keeps_offending_text() {
        let err = DecodeError::invalid_number(7, b"abc");
        assert_eq!(
            err.to_string(),
            "invalid number at byte 7: expected a decimal integer but found \"abc\""
        );
        assert_eq!(err.offset(), 7);
    }
}
