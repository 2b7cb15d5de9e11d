use std::borrow::Cow;

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Token};

/// Byte that opens every field.
pub const FIELD_MARKER: u8 = b':';

/// Separator between the type byte, the name and the payload.
pub const SEPARATOR: u8 = b' ';

/// Terminates blob lengths and int values.
pub const NEWLINE: u8 = b'\n';

/// Known field type discriminators.
///
/// These are the raw bytes that appear on the wire right after the `:`.
/// The `bif-types` crate maps them onto its typed `FieldType`.
pub mod field_type {
    pub const BLOB: u8 = b'b';
    pub const INT: u8 = b'i';
}

/// The shared prefix of every field: `:<type> <name> `.
///
/// ```text
/// ┌───┬──────┬───┬────────────┬───┬─────────── ─ ─
/// │ : │ type │ SP│ name bytes │ SP│ payload ...
/// └───┴──────┴───┴────────────┴───┴─────────── ─ ─
///   ^ start       ^ name_offset     ^ payload_offset
/// ```
///
/// The name borrows from the input buffer; it may be any byte sequence
/// that does not contain a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldHeader<'a> {
    /// Raw type discriminator, already checked to be one of
    /// [`field_type::BLOB`] or [`field_type::INT`].
    pub type_byte: u8,
    /// Offset of the leading `:`.
    pub start: usize,
    /// Offset of the type byte.
    pub type_offset: usize,
    /// Offset of the first name byte.
    pub name_offset: usize,
    /// The raw field name.
    pub name: &'a [u8],
    /// Offset of the first payload byte, just past the name's separator.
    pub payload_offset: usize,
}

impl<'a> FieldHeader<'a> {
    /// Decode a field header at the cursor and advance past it.
    ///
    /// The checks run in wire order: marker, type byte, separator, name.
    /// The type byte is only validated once the name has been read, so an
    /// unknown type is reported after the header has otherwise parsed.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MalformedPrefix`] if the `:` marker or either space
    ///   separator is missing, or the buffer ends inside the header.
    /// - [`DecodeError::EmptyName`] if the name is zero bytes long.
    /// - [`DecodeError::UnsupportedType`] if the type byte is not `b`/`i`.
    pub fn read_from(cursor: &mut ByteCursor<'a>) -> Result<Self, DecodeError> {
        let start = cursor.position();
        let marker = cursor.read_byte();
        if marker != Some(FIELD_MARKER) {
            return Err(DecodeError::MalformedPrefix {
                offset: start,
                expected: "':'",
                found: marker.into(),
            });
        }

        let type_offset = cursor.position();
        let Some(type_byte) = cursor.read_byte() else {
            return Err(DecodeError::MalformedPrefix {
                offset: type_offset,
                expected: "a field type",
                found: Token::EndOfInput,
            });
        };

        let separator_offset = cursor.position();
        let separator = cursor.read_byte();
        if separator != Some(SEPARATOR) {
            return Err(DecodeError::MalformedPrefix {
                offset: separator_offset,
                expected: "' '",
                found: separator.into(),
            });
        }

        let name_offset = cursor.position();
        let Some(scan) = cursor.read_until(SEPARATOR) else {
            return Err(DecodeError::MalformedPrefix {
                offset: cursor.buffer_len(),
                expected: "' '",
                found: Token::EndOfInput,
            });
        };
        if scan.body.is_empty() {
            return Err(DecodeError::EmptyName {
                offset: name_offset,
            });
        }
        cursor.commit(scan.next);

        if !matches!(type_byte, field_type::BLOB | field_type::INT) {
            return Err(DecodeError::UnsupportedType {
                offset: type_offset,
                found: Token::Byte(type_byte),
            });
        }

        Ok(Self {
            type_byte,
            start,
            type_offset,
            name_offset,
            name: scan.body,
            payload_offset: scan.next,
        })
    }

    /// The field name as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn name_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read(input: &[u8]) -> Result<FieldHeader<'_>, DecodeError> {
        FieldHeader::read_from(&mut ByteCursor::new(input))
    }

    #[test]
    fn reads_blob_header() {
        let mut cursor = ByteCursor::new(b":b name 6\nJohnny\n");
        let header = FieldHeader::read_from(&mut cursor).unwrap();
        assert_eq!(header.type_byte, field_type::BLOB);
        assert_eq!(header.name, b"name");
        assert_eq!(header.name_offset, 3);
        assert_eq!(header.payload_offset, 8);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn header_starts_mid_buffer() {
        let mut cursor = ByteCursor::at(b"xxxx:i age 32", 4);
        let header = FieldHeader::read_from(&mut cursor).unwrap();
        assert_eq!(header.start, 4);
        assert_eq!(header.type_offset, 5);
        assert_eq!(header.name_lossy(), "age");
        assert_eq!(cursor.rest(), b"32");
    }

    #[test]
    fn name_may_contain_non_space_punctuation() {
        let header = read(b":i a:b\n 1").unwrap();
        assert_eq!(header.name, b"a:b\n");
    }

    #[rstest]
    #[case::missing_marker(b"b name 1", 0, "':'", Token::Byte(b'b'))]
    #[case::empty_input(b"", 0, "':'", Token::EndOfInput)]
    #[case::missing_type(b":", 1, "a field type", Token::EndOfInput)]
    #[case::missing_separator(b":bname 1", 2, "' '", Token::Byte(b'n'))]
    #[case::unterminated_name(b":i name", 7, "' '", Token::EndOfInput)]
    fn malformed_prefixes(
        #[case] input: &[u8],
        #[case] offset: usize,
        #[case] expected: &'static str,
        #[case] found: Token,
    ) {
        assert_eq!(
            read(input),
            Err(DecodeError::MalformedPrefix {
                offset,
                expected,
                found
            })
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(read(b":i  1"), Err(DecodeError::EmptyName { offset: 3 }));
    }

    #[test]
    fn unsupported_type_reports_type_offset() {
        assert_eq!(
            read(b":x bad 1\n"),
            Err(DecodeError::UnsupportedType {
                offset: 1,
                found: Token::Byte(b'x'),
            })
        );
    }
}
