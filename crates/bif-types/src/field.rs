use std::borrow::Cow;
use std::str::Utf8Error;

use bif_wire::header::field_type;
use bytes::Bytes;

/// The two field kinds the format knows about.
///
/// ```text
/// ┌──────┬──────┬─────────────────────────────────────────┐
/// │ Wire │ Type │ Payload                                 │
/// ├──────┼──────┼─────────────────────────────────────────┤
/// │ 'b'  │ Blob │ <len>\n<len raw bytes><terminator byte> │
/// │ 'i'  │ Int  │ <decimal>\n  (or end of buffer)         │
/// └──────┴──────┴─────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
  Blob,
  Int,
}

impl FieldType {
  /// Map a raw wire discriminator onto a [`FieldType`].
  ///
  /// Returns `None` for anything other than `b` or `i`.
  #[must_use]
  pub fn from_wire(byte: u8) -> Option<Self> {
    match byte {
      field_type::BLOB => Some(Self::Blob),
      field_type::INT => Some(Self::Int),
      _ => None,
    }
  }

  #[must_use]
  pub fn wire_byte(self) -> u8 {
    match self {
      Self::Blob => field_type::BLOB,
      Self::Int => field_type::INT,
    }
  }

  /// Human-readable type name, as printed by the CLI.
  #[must_use]
  pub fn display_name(self) -> &'static str {
    match self {
      Self::Blob => "blob",
      Self::Int => "int",
    }
  }
}

/// A length-prefixed run of raw bytes.
///
/// `size` is the length declared on the wire. It normally equals
/// `bytes.len()`, but when the declared length runs past the end of the
/// buffer the body is cut short and `size` keeps the declared value, so
/// a caller can detect the truncation by comparing the two.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobField {
  pub name: String,
  pub size: usize,
  pub bytes: Bytes,
}

impl BlobField {
  /// The body as text, with invalid UTF-8 replaced by `U+FFFD`.
  #[must_use]
  pub fn as_utf8(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(&self.bytes)
  }

  /// The body as text, failing on invalid UTF-8.
  ///
  /// # Errors
  ///
  /// Returns the [`Utf8Error`] from [`std::str::from_utf8`].
  pub fn as_str(&self) -> Result<&str, Utf8Error> {
    std::str::from_utf8(&self.bytes)
  }

  /// `true` when fewer bytes were available than the declared size.
  #[must_use]
  pub fn is_truncated(&self) -> bool {
    self.bytes.len() < self.size
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntField {
  pub name: String,
  pub value: i64,
}

/// One decoded, named value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
  Blob(BlobField),
  Int(IntField),
}

impl Field {
  /// Convenience constructor for a blob field whose size matches its body.
  pub fn blob(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
    let bytes = bytes.into();
    Self::Blob(BlobField {
      name: name.into(),
      size: bytes.len(),
      bytes,
    })
  }

  pub fn int(name: impl Into<String>, value: i64) -> Self {
    Self::Int(IntField {
      name: name.into(),
      value,
    })
  }

  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Blob(blob) => &blob.name,
      Self::Int(int) => &int.name,
    }
  }

  #[must_use]
  pub fn field_type(&self) -> FieldType {
    match self {
      Self::Blob(_) => FieldType::Blob,
      Self::Int(_) => FieldType::Int,
    }
  }

  #[must_use]
  pub fn as_blob(&self) -> Option<&BlobField> {
    match self {
      Self::Blob(blob) => Some(blob),
      Self::Int(_) => None,
    }
  }

  #[must_use]
  pub fn as_int(&self) -> Option<i64> {
    match self {
      Self::Int(int) => Some(int.value),
      Self::Blob(_) => None,
    }
  }
}
