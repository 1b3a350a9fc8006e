//! Number formatting for script output.

/// Default number of significant digits in emitted numbers.
pub const DEFAULT_PRECISION: usize = 6;

/// Formats `value` with at most `significant` significant digits.
///
/// Trailing zeros and a trailing decimal point are removed, so `14.0`
/// becomes `14` and `19.276999999999997` becomes `19.277`. Negative zero is
/// printed as `0`. Non-finite values pass through as Rust prints them.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)] // exponents of finite f64 are within ±324
pub fn format_number(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let significant = significant.clamp(1, 17) as i32;
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (significant - 1 - exponent).max(0) as usize;

    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_decimal_point() {
        assert_eq!(format_number(14.0, 6), "14");
        assert_eq!(format_number(-1.0, 6), "-1");
        assert_eq!(format_number(100.0, 6), "100");
    }

    #[test]
    fn six_significant_digits() {
        assert_eq!(format_number(18.5 * 1.042, 6), "19.277");
        assert_eq!(format_number(16.693_882, 6), "16.6939");
        assert_eq!(format_number(134.5236, 6), "134.524");
        assert_eq!(format_number(0.4, 6), "0.4");
    }

    #[test]
    fn rounding_carries() {
        assert_eq!(format_number(9.999_999_7, 6), "10");
        assert_eq!(format_number(99_999.96, 6), "100000");
    }

    #[test]
    fn negative_zero_and_tiny_values() {
        assert_eq!(format_number(-0.0, 6), "0");
        assert_eq!(format_number(-0.000_000_1, 3), "-0.0000001");
        assert_eq!(format_number(0.001_234_56, 3), "0.00123");
    }

    #[test]
    fn non_finite_pass_through() {
        assert_eq!(format_number(f64::NAN, 6), "NaN");
        assert_eq!(format_number(f64::INFINITY, 6), "inf");
    }

    #[test]
    fn precision_is_configurable() {
        assert_eq!(format_number(19.277, 3), "19.3");
        assert_eq!(format_number(19.277, 0), "19");
    }
}
