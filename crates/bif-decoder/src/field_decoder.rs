use bif_types::{BlobField, Field, FieldType, IntField};
use bif_wire::header::{NEWLINE, SEPARATOR};
use bif_wire::number::parse_decimal_prefix;
use bif_wire::{ByteCursor, DecodeError, FieldHeader, Token};
use bytes::Bytes;

/// Decode one complete field (header + payload) at the cursor.
///
/// `buf` must be the buffer the cursor reads from; blob bodies are
/// returned as zero-copy slices of it. On success the cursor has been
/// committed past the field. On failure the cursor position is
/// unspecified and the caller is expected to stop.
///
/// # Errors
///
/// Any [`DecodeError`] from the header or the payload decoders.
pub fn decode_field(buf: &Bytes, cursor: &mut ByteCursor<'_>) -> Result<Field, DecodeError> {
    let header = FieldHeader::read_from(cursor)?;
    let name = header.name_lossy().into_owned();

    match FieldType::from_wire(header.type_byte) {
        Some(FieldType::Blob) => decode_blob(buf, cursor, name),
        Some(FieldType::Int) => decode_int(cursor, name),
        None => Err(DecodeError::UnsupportedType {
            offset: header.type_offset,
            found: Token::Byte(header.type_byte),
        }),
    }
}

/// Decode a blob payload: `<len>\n<len bytes><terminator>`.
///
/// The body is whatever lies in `newline + 1 .. newline + 1 + len`,
/// clamped to the end of the buffer; a declared length that overruns the
/// input is not an error, the body is just shorter than `size`. The
/// cursor always commits one byte past the body, whatever that byte is.
///
/// # Errors
///
/// - [`DecodeError::TruncatedBlobHeader`] if no `\n` follows the length.
/// - [`DecodeError::InvalidNumber`] if the length has no decimal prefix
///   or is negative.
pub fn decode_blob(
    buf: &Bytes,
    cursor: &mut ByteCursor<'_>,
    name: String,
) -> Result<Field, DecodeError> {
    let length_offset = cursor.position();
    let scan = cursor
        .read_until(NEWLINE)
        .ok_or(DecodeError::TruncatedBlobHeader {
            offset: length_offset,
        })?;

    let size = parse_decimal_prefix(scan.body)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| DecodeError::invalid_number(length_offset, scan.body))?;

    let body_start = scan.next;
    let body_end = body_start.saturating_add(size).min(buf.len());
    let bytes = buf.slice(body_start..body_end);

    cursor.commit(body_start.saturating_add(size).saturating_add(1));

    Ok(Field::Blob(BlobField { name, size, bytes }))
}

/// Decode an int payload: `<decimal>\n`, or `<decimal>` up to the end of
/// the buffer when no newline follows.
///
/// With a newline, the bytes before it are parsed as they are. Without
/// one, leading spaces are skipped and the rest of the buffer is parsed,
/// which lets the final field omit its newline.
///
/// # Errors
///
/// - [`DecodeError::MissingIntValue`] if the value text is empty.
/// - [`DecodeError::InvalidNumber`] if it has no decimal prefix or does
///   not fit in an `i64`.
pub fn decode_int(cursor: &mut ByteCursor<'_>, name: String) -> Result<Field, DecodeError> {
    let (text, text_offset, next, end) = if let Some(scan) = cursor.read_until(NEWLINE) {
        (scan.body, scan.start, scan.next, Token::Byte(NEWLINE))
    } else {
        cursor.skip_while(|b| b == SEPARATOR);
        (cursor.rest(), cursor.position(), cursor.buffer_len(), Token::EndOfInput)
    };

    if text.is_empty() {
        return Err(DecodeError::MissingIntValue {
            offset: text_offset,
            found: end,
        });
    }

    let value = parse_decimal_prefix(text)
        .ok_or_else(|| DecodeError::invalid_number(text_offset, text))?;

    cursor.commit(next);
    Ok(Field::Int(IntField { name, value }))
}
