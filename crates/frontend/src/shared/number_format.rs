//! Number parsing and formatting for values living in table cells

/// Parse the leading numeric prefix of a cell, the way browsers' `parseFloat`
/// does: leading whitespace is skipped, trailing garbage ignored.
/// Returns NaN when no number starts the text.
///
/// ```
/// use frontend::shared::number_format::parse_float_prefix;
/// assert_eq!(parse_float_prefix(" 0.10 lots"), 0.10);
/// assert!(parse_float_prefix("n/a").is_nan());
/// ```
pub fn parse_float_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

/// Number of digits after the decimal point in a cell, e.g. "1.10500" -> 5.
pub fn decimal_places(text: &str) -> usize {
    let text = text.trim();
    match text.split_once('.') {
        Some((_, frac)) => frac.chars().take_while(char::is_ascii_digit).count(),
        None => 0,
    }
}

/// Fixed-point rendering of a finite value, e.g. `format_fixed(12.5, 2)` -> "12.50".
///
/// Negative zero renders without a sign. Non-finite values render as
/// "∞", "-∞" or "n/a" instead of a number.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "n/a".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("1.1050"), 1.105);
        assert_eq!(parse_float_prefix("  -0.25"), -0.25);
        assert_eq!(parse_float_prefix("0.10 lots"), 0.1);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("5."), 5.0);
        assert_eq!(parse_float_prefix("1e3x"), 1000.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
    }

    #[test]
    fn test_parse_float_prefix_nan() {
        assert!(parse_float_prefix("").is_nan());
        assert!(parse_float_prefix("-").is_nan());
        assert!(parse_float_prefix(".").is_nan());
        assert!(parse_float_prefix("abc").is_nan());
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places("1.10500"), 5);
        assert_eq!(decimal_places(" 150.123 "), 3);
        assert_eq!(decimal_places("100"), 0);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(12.5, 2), "12.50");
        assert_eq!(format_fixed(-3.14159, 2), "-3.14");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(1.105, 4), "1.1050");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_fixed(f64::INFINITY, 2), "∞");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 2), "-∞");
        assert_eq!(format_fixed(f64::NAN, 2), "n/a");
    }
}
