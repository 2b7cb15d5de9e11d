/// Errors that can occur while encoding fields into a BI format buffer.
///
/// The encoder refuses to produce bytes that the decoder would read back
/// differently. Names are the only thing that can break framing: an empty
/// name is rejected by the decoder, and a space inside a name would end
/// the name early.
///
/// ```text
///   EncodeError
///   ├── EmptyName          ← field at `index` has a zero-length name
///   ├── NameContainsSpace  ← name would be split at the space
///   └── Io(std::io::Error) ← from the underlying writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("field {index} has an empty name")]
    EmptyName { index: usize },

    #[error("field name {name:?} contains a space")]
    NameContainsSpace { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
