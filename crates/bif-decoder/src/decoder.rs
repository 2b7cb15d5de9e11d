use bytes::Bytes;

use crate::process::{ParseProcess, ParseResult};

/// Synchronous BI format decoder for a complete in-memory buffer.
///
/// Runs a [`ParseProcess`] to its terminal state in one call, with no
/// intermediate state visible to the caller. Use this when progress
/// reporting does not matter; reach for
/// [`parse_cooperative`](crate::parse_cooperative) or the incremental
/// driver when the parse has to share a thread with other work.
///
/// # Example
///
/// ```rust
/// use bif_decoder::BifDecoder;
///
/// let record = BifDecoder::decode(b":b name 6\nJohnny\n:i age 32").unwrap();
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.get("age").and_then(|f| f.as_int()), Some(32));
/// ```
pub struct BifDecoder;

impl BifDecoder {
    /// Decode a borrowed buffer. The bytes are copied once so blob fields
    /// can outlive `buf`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`](crate::DecodeError) encountered.
    pub fn decode(buf: &[u8]) -> ParseResult {
        Self::decode_bytes(Bytes::copy_from_slice(buf))
    }

    /// Decode an owned buffer without copying; blob fields share it.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`](crate::DecodeError) encountered.
    pub fn decode_bytes(buf: Bytes) -> ParseResult {
        ParseProcess::new(buf).finish()
    }
}

/// Run-to-completion entry point.
///
/// # Errors
///
/// Returns the first [`DecodeError`](crate::DecodeError) encountered.
pub fn parse_complete(buf: impl Into<Bytes>) -> ParseResult {
    BifDecoder::decode_bytes(buf.into())
}
