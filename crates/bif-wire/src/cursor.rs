/// Result of a [`ByteCursor::read_until`] scan.
///
/// ```text
///   ... │ body ............ │ delim │ ...
///       ^ start             ^ delimiter ^ next
/// ```
///
/// The scan does not move the cursor. Callers that accept the result
/// advance explicitly with [`ByteCursor::commit`], usually to `next`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scan<'a> {
    /// Bytes between the cursor and the delimiter (delimiter excluded).
    pub body: &'a [u8],
    /// Offset the scan started from.
    pub start: usize,
    /// Offset of the delimiter itself.
    pub delimiter: usize,
    /// Offset just past the delimiter.
    pub next: usize,
}

/// Forward-only reader over an immutable byte buffer.
///
/// The cursor owns nothing but its position. Every read is bounds-checked
/// and reports end-of-buffer as `None` instead of panicking. The position
/// only ever moves forward, and never past the end of the buffer: once an
/// offset is committed the bytes before it are unreachable through this
/// cursor.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Create a cursor positioned at `offset`, clamped to the buffer length.
    ///
    /// Used to pick a parse back up at the offset committed by the previous
    /// resumption step.
    #[must_use]
    pub fn at(buf: &'a [u8], offset: usize) -> Self {
        Self {
            buf,
            pos: offset.min(buf.len()),
        }
    }

    /// Current offset into the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes left between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Byte at the current offset, without advancing.
    #[must_use]
    pub fn peek_byte(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Byte at the current offset, advancing by one on success.
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Some(byte)
    }

    /// Scan forward for `delimiter` without moving the cursor.
    ///
    /// Returns `None` when the buffer ends before the delimiter is found.
    #[must_use]
    pub fn read_until(&self, delimiter: u8) -> Option<Scan<'a>> {
        let rest = self.rest();
        let len = rest.iter().position(|&b| b == delimiter)?;
        Some(Scan {
            body: &rest[..len],
            start: self.pos,
            delimiter: self.pos + len,
            next: self.pos + len + 1,
        })
    }

    /// Advance the cursor to `offset`.
    ///
    /// Offsets behind the current position are ignored and offsets past the
    /// end of the buffer are clamped to its length, so the position stays
    /// within `0..=len` and never decreases.
    pub fn commit(&mut self, offset: usize) {
        self.pos = offset.clamp(self.pos, self.buf.len());
    }

    /// Advance past every byte matching `pred`, returning how many were
    /// skipped.
    pub fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let skipped = self.rest().iter().take_while(|&&b| pred(b)).count();
        self.pos += skipped;
        skipped
    }

    /// Every byte from the current offset to the end of the buffer.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_byte_advances_until_end() {
        let mut cursor = ByteCursor::new(b"ab");
        assert_eq!(cursor.read_byte(), Some(b'a'));
        assert_eq!(cursor.read_byte(), Some(b'b'));
        assert_eq!(cursor.read_byte(), None);
        assert_eq!(cursor.position(), 2);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn peek_does_not_advance() {
        let cursor = ByteCursor::new(b"z");
        assert_eq!(cursor.peek_byte(), Some(b'z'));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn read_until_is_a_pure_scan() {
        let cursor = ByteCursor::at(b"xx12\nrest", 2);
        let scan = cursor.read_until(b'\n').unwrap();
        assert_eq!(scan.body, b"12");
        assert_eq!(scan.start, 2);
        assert_eq!(scan.delimiter, 4);
        assert_eq!(scan.next, 5);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn read_until_missing_delimiter() {
        let cursor = ByteCursor::new(b"no newline here");
        assert!(cursor.read_until(b'\n').is_none());
    }

    #[test]
    fn read_until_delimiter_at_cursor_gives_empty_body() {
        let cursor = ByteCursor::new(b" name");
        let scan = cursor.read_until(b' ').unwrap();
        assert!(scan.body.is_empty());
        assert_eq!(scan.next, 1);
    }

    #[test]
    fn commit_never_moves_backwards_or_past_end() {
        let mut cursor = ByteCursor::new(b"0123456789");
        cursor.commit(4);
        assert_eq!(cursor.position(), 4);
        cursor.commit(2);
        assert_eq!(cursor.position(), 4);
        cursor.commit(100);
        assert_eq!(cursor.position(), 10);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn at_clamps_to_buffer_length() {
        let cursor = ByteCursor::at(b"abc", 9);
        assert_eq!(cursor.position(), 3);
        assert!(cursor.rest().is_empty());
    }

    #[test]
    fn skip_while_counts_skipped_bytes() {
        let mut cursor = ByteCursor::new(b"   42");
        assert_eq!(cursor.skip_while(|b| b == b' '), 3);
        assert_eq!(cursor.rest(), b"42");
    }
}
