//! Permissive numeric field parsing.
//!
//! Command fields are parsed the way C's `atof`/`atol` read numbers: skip
//! leading whitespace, take the longest numeric prefix, ignore whatever
//! follows. A field with no numeric prefix reads as zero. These functions
//! never fail.

/// Parse the leading decimal number of `s`
///
/// Accepts an optional sign, digits with an optional fractional part and an
/// optional exponent. Returns `0.0` when no digits are found. `inf` and
/// `nan` are not numbers here, so the result is never NaN.
pub fn parse_float_prefix(s: &str) -> f32 {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let len = float_prefix_len(s.as_bytes());
    if len == 0 {
        return 0.0;
    }
    s[..len].parse().unwrap_or(0.0)
}

/// Parse the leading decimal integer of `s`
///
/// Accepts an optional sign followed by digits; stops at the first
/// non-digit. Out-of-range values saturate.
pub fn parse_int_prefix(s: &str) -> i32 {
    let bytes = s
        .trim_start_matches(|c: char| c.is_ascii_whitespace())
        .as_bytes();

    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }

    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Length of the longest float literal at the start of `bytes`
///
/// Returns 0 if the prefix contains no mantissa digits.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        i += 1 + frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_float_plain_values() {
        assert_eq!(parse_float_prefix("2.5"), 2.5);
        assert_eq!(parse_float_prefix("+2.5"), 2.5);
        assert_eq!(parse_float_prefix("-3.5"), -3.5);
        assert_eq!(parse_float_prefix("42"), 42.0);
        assert_eq!(parse_float_prefix("0"), 0.0);
    }

    #[test]
    fn test_float_optional_parts() {
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("-.25"), -0.25);
        assert_eq!(parse_float_prefix("7."), 7.0);
        assert_eq!(parse_float_prefix("1.5e2"), 150.0);
        assert_eq!(parse_float_prefix("1E-1"), 0.1);
    }

    #[test]
    fn test_float_stops_at_garbage() {
        assert_eq!(parse_float_prefix("12.5deg"), 12.5);
        assert_eq!(parse_float_prefix("3.0.1"), 3.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert_eq!(parse_float_prefix("2e+"), 2.0);
        assert_eq!(parse_float_prefix("  -1.0"), -1.0);
    }

    #[test]
    fn test_float_unparseable_is_zero() {
        assert_eq!(parse_float_prefix(""), 0.0);
        assert_eq!(parse_float_prefix("abc"), 0.0);
        assert_eq!(parse_float_prefix("-"), 0.0);
        assert_eq!(parse_float_prefix("."), 0.0);
        assert_eq!(parse_float_prefix("+.e5"), 0.0);
        assert_eq!(parse_float_prefix("inf"), 0.0);
        assert_eq!(parse_float_prefix("nan"), 0.0);
    }

    #[test]
    fn test_int_values() {
        assert_eq!(parse_int_prefix("0"), 0);
        assert_eq!(parse_int_prefix("1"), 1);
        assert_eq!(parse_int_prefix("-7"), -7);
        assert_eq!(parse_int_prefix("+12"), 12);
        assert_eq!(parse_int_prefix(" 3"), 3);
    }

    #[test]
    fn test_int_prefix_only() {
        assert_eq!(parse_int_prefix("1:extra"), 1);
        assert_eq!(parse_int_prefix("0:1"), 0);
        assert_eq!(parse_int_prefix("2.9"), 2);
        assert_eq!(parse_int_prefix("5abc"), 5);
        assert_eq!(parse_int_prefix("x5"), 0);
        assert_eq!(parse_int_prefix(""), 0);
        assert_eq!(parse_int_prefix("-"), 0);
    }

    #[test]
    fn test_int_saturates() {
        assert_eq!(parse_int_prefix("99999999999999999999"), i32::MAX);
        assert_eq!(parse_int_prefix("-99999999999999999999"), i32::MIN);
    }

    proptest! {
        #[test]
        fn float_parse_never_nan(s in "\\PC*") {
            prop_assert!(!parse_float_prefix(&s).is_nan());
        }

        #[test]
        fn int_parse_never_panics(s in "\\PC*") {
            let _ = parse_int_prefix(&s);
        }

        #[test]
        fn float_matches_display(v in -1000.0f32..1000.0) {
            let mut buf = heapless::String::<64>::new();
            core::fmt::Write::write_fmt(&mut buf, format_args!("{}", v)).unwrap();
            prop_assert_eq!(parse_float_prefix(&buf), v);
        }
    }
}
