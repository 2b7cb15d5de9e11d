use bif_wire::header::{FIELD_MARKER, NEWLINE, SEPARATOR, field_type};
use bif_wire::number::format_decimal;

/// Field serializer for BI format buffers.
///
/// `FieldWriter` appends one field at a time to an internal byte buffer.
/// It performs no validation of its own; [`BifEncoder`](crate::BifEncoder)
/// checks names before handing them over.
///
/// Wire format per field:
///
/// ```text
/// ┌─────┬──────┬────┬──────┬────┬───────────────────────────────────┐
/// │ ':' │ type │ SP │ name │ SP │ payload                           │
/// ├─────┼──────┼────┼──────┼────┼───────────────────────────────────┤
/// │     │ 'b'  │    │      │    │ <len> '\n' <len bytes> '\n'       │
/// │     │ 'i'  │    │      │    │ <decimal> '\n' (optional if last) │
/// └─────┴──────┴────┴──────┴────┴───────────────────────────────────┘
/// ```
#[derive(Debug, Default)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with a pre-allocated buffer capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Write a blob field. The body is followed by a `\n` terminator byte.
    pub fn write_blob(&mut self, name: &[u8], body: &[u8]) {
        self.write_header(field_type::BLOB, name);
        self.buf.extend_from_slice(body.len().to_string().as_bytes());
        self.buf.push(NEWLINE);
        self.buf.extend_from_slice(body);
        self.buf.push(NEWLINE);
    }

    /// Write an int field.
    ///
    /// When `terminate` is `false` the value runs to the end of the buffer,
    /// which the decoder only accepts for the final field.
    pub fn write_int(&mut self, name: &[u8], value: i64, terminate: bool) {
        self.write_header(field_type::INT, name);
        self.buf.extend_from_slice(format_decimal(value).as_bytes());
        if terminate {
            self.buf.push(NEWLINE);
        }
    }

    fn write_header(&mut self, type_byte: u8, name: &[u8]) {
        self.buf.push(FIELD_MARKER);
        self.buf.push(type_byte);
        self.buf.push(SEPARATOR);
        self.buf.extend_from_slice(name);
        self.buf.push(SEPARATOR);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the accumulated bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
