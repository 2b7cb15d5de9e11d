/// Parse the longest decimal integer prefix of `text`.
///
/// Accepts the same shapes a lenient text-to-integer conversion would:
///
/// ```text
///   "32"      → 32
///   "  -7"    → -7     leading ASCII whitespace skipped
///   "+5"      → 5
///   "12abc"   → 12     parsing stops at the first non-digit
///   "6\r"     → 6
///   "abc"     → None   no digits at all
///   "-"       → None
/// ```
///
/// Trailing bytes after the digits are ignored rather than rejected.
/// Values that do not fit in an `i64` return `None`.
#[must_use]
pub fn parse_decimal_prefix(text: &[u8]) -> Option<i64> {
    let start = text
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(text.len());
    let mut rest = &text[start..];

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    // Accumulate towards the sign so i64::MIN stays representable.
    let mut value: i64 = 0;
    for &b in &rest[..digits] {
        let digit = i64::from(b - b'0');
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(digit)?
        } else {
            value.checked_add(digit)?
        };
    }
    Some(value)
}

/// Format `value` as the decimal text the decoder reads back.
#[must_use]
pub fn format_decimal(value: i64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_digits() {
        assert_eq!(parse_decimal_prefix(b"32"), Some(32));
        assert_eq!(parse_decimal_prefix(b"0"), Some(0));
    }

    #[test]
    fn signs_and_whitespace() {
        assert_eq!(parse_decimal_prefix(b"  -7"), Some(-7));
        assert_eq!(parse_decimal_prefix(b"\t+5"), Some(5));
        assert_eq!(parse_decimal_prefix(b"- 5"), None);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_decimal_prefix(b"12abc"), Some(12));
        assert_eq!(parse_decimal_prefix(b"6\r"), Some(6));
        assert_eq!(parse_decimal_prefix(b"9 9"), Some(9));
    }

    #[test]
    fn no_digits() {
        assert_eq!(parse_decimal_prefix(b""), None);
        assert_eq!(parse_decimal_prefix(b"   "), None);
        assert_eq!(parse_decimal_prefix(b"abc"), None);
        assert_eq!(parse_decimal_prefix(b"-"), None);
    }

    #[test]
    fn extremes() {
        assert_eq!(
            parse_decimal_prefix(b"9223372036854775807"),
            Some(i64::MAX)
        );
        assert_eq!(
            parse_decimal_prefix(b"-9223372036854775808"),
            Some(i64::MIN)
        );
        assert_eq!(parse_decimal_prefix(b"9223372036854775808"), None);
    }

    #[test]
    fn format_matches_parse() {
        for value in [0, 1, -1, 32, i64::MAX, i64::MIN] {
            let text = format_decimal(value);
            assert_eq!(parse_decimal_prefix(text.as_bytes()), Some(value));
        }
    }
}
