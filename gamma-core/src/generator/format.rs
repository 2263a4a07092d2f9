//! Number rendering for machine fields.

/// Round to a number of decimal places.
///
/// Rounds the exact binary value, so halfway cases resolve the way a
/// correctly rounded decimal conversion does.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value)
        .parse()
        .unwrap_or(value)
}

/// Format a number in "general" notation with at most `precision` significant digits.
///
/// Matches the `%.{precision}g` printf conversion: fixed notation unless the
/// decimal exponent is below -4 or at least `precision`, trailing zeros and a
/// dangling decimal point removed.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);

    // Scientific form first: it yields the exponent after rounding to `precision` digits
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }

    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

/// Strip trailing zeros and a trailing decimal point from a fractional rendering.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(900.0, 10), "900");
        assert_eq!(format_general(899.9, 10), "899.9");
        assert_eq!(format_general(1000.0, 10), "1000");
        assert_eq!(format_general(-13.5, 10), "-13.5");
        assert_eq!(format_general(0.0, 10), "0");
        assert_eq!(format_general(-0.0, 10), "-0");
        assert_eq!(format_general(0.5, 10), "0.5");
        assert_eq!(format_general(0.0001, 10), "0.0001");
    }

    #[test]
    fn test_format_general_exponent_form() {
        assert_eq!(format_general(0.00001, 10), "1e-05");
        assert_eq!(format_general(1e10, 10), "1e+10");
        assert_eq!(format_general(12345678901.0, 10), "1.23456789e+10");
        assert_eq!(format_general(9999999999.0, 10), "9999999999");
    }

    #[test]
    fn test_format_general_significant_digits() {
        assert_eq!(format_general(1.0 / 3.0, 10), "0.3333333333");
        assert_eq!(format_general(2.0 / 3.0, 10), "0.6666666667");
        assert_eq!(format_general(1234.56789012, 10), "1234.56789");
        assert_eq!(format_general(899.99999999999997, 10), "900");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(899.96, 1), 900.0);
        assert_eq!(round_to(913.3974596, 1), 913.4);
        assert_eq!(round_to(-2.04, 1), -2.0);
        assert_eq!(round_to(1000.0, 1), 1000.0);
        assert!(round_to(f64::INFINITY, 1).is_infinite());
    }
}
