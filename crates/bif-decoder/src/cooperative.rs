use bytes::Bytes;

use crate::process::{ParseProcess, ParseResult};

/// Yield-per-step entry point.
///
/// Resumes the parse one field at a time and hands control back to the
/// async runtime before every step, so a large buffer never monopolises a
/// single-threaded executor. The result is only observable by awaiting
/// the returned future; nothing runs until it is polled.
///
/// ```text
///   yield ─▶ step ─▶ yield ─▶ step ─▶ ... ─▶ step (terminal) ─▶ Ready
/// ```
///
/// Produces exactly the same result as
/// [`parse_complete`](crate::parse_complete) for the same input.
///
/// # Errors
///
/// Returns the first [`DecodeError`](crate::DecodeError) encountered.
pub async fn parse_cooperative(buf: impl Into<Bytes>) -> ParseResult {
    let mut process = ParseProcess::new(buf);
    loop {
        tokio::task::yield_now().await;
        if process.step() {
            break;
        }
    }
    process.finish()
}
