//! Lenient number parsing for free-text credit fields.
//!
//! Credits come straight from a text box, so parsing reads the longest numeric
//! prefix and ignores whatever follows it: `"4 credits"` is 4, `"3.5abc"` is
//! 3.5, and `"abc"` has no value at all. Blank text and garbage are not told
//! apart here; callers decide what a missing value means.

/// Parse the leading numeric prefix of `text`.
///
/// Accepts, after optional leading whitespace:
/// - an optional `+`/`-` sign
/// - `Infinity` (exact case)
/// - `digits[.digits]` or `.digits`, optionally followed by `e`/`E`,
///   an optional sign, and exponent digits
///
/// An exponent marker with no digits after it is left out of the prefix, so
/// `"2e"` parses as 2.
///
/// Returns `None` when no numeric prefix exists.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            end = j + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
