use std::io::Write;

use bif_types::{Field, Record};
use bif_wire::header::SEPARATOR;

use crate::error::EncodeError;
use crate::field_writer::FieldWriter;

/// Builds a BI format buffer from named fields.
///
/// The encoder is the producing side of the format and the inverse of
/// the decoder for well-formed input. It follows the builder pattern:
/// [`add_blob`](Self::add_blob) and [`add_int`](Self::add_int) append
/// fields in order, and [`encode`](Self::encode) validates the names and
/// serializes everything in one pass.
///
/// Duplicate names are written as given. The decoder collapses them to
/// the last value, so encoding `a=1, a=2` decodes to `{a: 2}`.
///
/// # Usage
///
/// ```rust
/// use bif_encoder::BifEncoder;
///
/// let buf = BifEncoder::new()
///     .add_blob("name", b"Johnny")
///     .add_int("age", 32)
///     .omit_final_newline()
///     .encode()
///     .unwrap();
///
/// assert_eq!(buf, b":b name 6\nJohnny\n:i age 32");
/// ```
#[derive(Clone, Debug, Default)]
pub struct BifEncoder {
    fields: Vec<Field>,
    omit_final_newline: bool,
}

impl BifEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an encoder pre-filled with every field of `record`, in
    /// insertion order.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            fields: record.iter().cloned().collect(),
            omit_final_newline: false,
        }
    }

    /// Append a blob field.
    pub fn add_blob(&mut self, name: &str, bytes: &[u8]) -> &mut Self {
        self.fields.push(Field::blob(name, bytes.to_vec()));
        self
    }

    /// Append an int field.
    pub fn add_int(&mut self, name: &str, value: i64) -> &mut Self {
        self.fields.push(Field::int(name, value));
        self
    }

    /// Append an already-built field.
    pub fn add_field(&mut self, field: Field) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// Leave the trailing `\n` off the last field when it is an int.
    ///
    /// The decoder reads an unterminated int that ends the buffer as the
    /// rest of the buffer. Has no effect when the last field is a blob,
    /// whose terminator byte is always written.
    pub fn omit_final_newline(&mut self) -> &mut Self {
        self.omit_final_newline = true;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize all fields into a new buffer.
    ///
    /// An encoder with no fields produces an empty buffer, which decodes
    /// to an empty record.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyName`] if any field name is empty.
    /// - [`EncodeError::NameContainsSpace`] if any name contains `' '`.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.validate()?;

        let mut writer = FieldWriter::with_capacity(self.estimated_size());
        let last = self.fields.len().saturating_sub(1);
        for (i, field) in self.fields.iter().enumerate() {
            match field {
                // The body actually held is written, which for a field
                // decoded from a truncated buffer is shorter than `size`.
                Field::Blob(blob) => writer.write_blob(blob.name.as_bytes(), &blob.bytes),
                Field::Int(int) => {
                    let terminate = !(self.omit_final_newline && i == last);
                    writer.write_int(int.name.as_bytes(), int.value, terminate);
                }
            }
        }
        Ok(writer.finish())
    }

    /// Serialize all fields into `w`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Everything [`encode`](Self::encode) can return, plus
    /// [`EncodeError::Io`] if the writer fails.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize, EncodeError> {
        let buf = self.encode()?;
        w.write_all(&buf)?;
        Ok(buf.len())
    }

    fn validate(&self) -> Result<(), EncodeError> {
        for (index, field) in self.fields.iter().enumerate() {
            let name = field.name();
            if name.is_empty() {
                return Err(EncodeError::EmptyName { index });
            }
            if name.as_bytes().contains(&SEPARATOR) {
                return Err(EncodeError::NameContainsSpace {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn estimated_size(&self) -> usize {
        self.fields
            .iter()
            .map(|field| {
                let payload = field.as_blob().map_or(20, |blob| blob.bytes.len() + 21);
                field.name().len() + 5 + payload
            })
            .sum()
    }
}
