use serde_json::{Number, Value as Json};

/// Maps an f64 onto a JSON number carrying the reference encoder's text.
/// NaN and ±Infinity become null.
pub(crate) fn number_to_json(value: f64) -> Json {
    if !value.is_finite() {
        return Json::Null;
    }
    // serde_json keeps the digits verbatim (arbitrary_precision).
    serde_json::from_str::<Number>(&format_number(value)).map_or(Json::Null, Json::Number)
}

/// Formats a finite f64 the way the reference encoder does.
/// - shortest round-tripping digits
/// - plain notation for decimal exponents in (-7, 21), so every integral
///   value below 1e21 prints without fraction or exponent
/// - `d.ddde+N` / `d.ddde-N` outside that range
/// - -0 normalized to 0
pub(crate) fn format_number(value: f64) -> String {
    debug_assert!(value.is_finite(), "format_number called with non-finite value");
    if value == 0.0 {
        return String::from("0");
    }

    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(value.abs());
    let (mantissa, exp) = match raw.find(['e', 'E']) {
        Some(idx) => (&raw[..idx], raw[idx + 1..].parse::<i32>().unwrap_or(0)),
        None => (raw, 0),
    };
    let (digits, point) = significant_digits(mantissa);
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first significant digit.
    let n = point + exp;

    let mut out = String::with_capacity(digits.len() + 8);
    if value < 0.0 {
        out.push('-');
    }
    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(core::iter::repeat_n('0', (n - k) as usize));
    } else if 0 < n && n <= 21 {
        out.push_str(&digits[..n as usize]);
        out.push('.');
        out.push_str(&digits[n as usize..]);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(core::iter::repeat_n('0', (-n) as usize));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if n - 1 >= 0 { '+' } else { '-' });
        out.push_str(&(n - 1).abs().to_string());
    }
    out
}

// Strips the point and surrounding zeros from a ryu mantissa, returning the
// significant digits and where the point sat relative to the first of them.
fn significant_digits(mantissa: &str) -> (String, i32) {
    let mut digits = String::with_capacity(mantissa.len());
    let mut point = None;
    for c in mantissa.chars() {
        if c == '.' {
            point = Some(digits.len());
        } else {
            digits.push(c);
        }
    }
    let mut point = point.unwrap_or(digits.len()) as i32;

    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading);
    point -= leading as i32;
    let significant = digits.trim_end_matches('0').len();
    digits.truncate(significant);
    (digits, point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_is_null() {
        assert_eq!(number_to_json(f64::NAN), Json::Null);
        assert_eq!(number_to_json(f64::INFINITY), Json::Null);
        assert_eq!(number_to_json(f64::NEG_INFINITY), Json::Null);
    }

    #[test]
    fn integral_values_below_1e21_are_plain() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(9_007_199_254_740_991.0), "9007199254740991");
        assert_eq!(format_number(9_007_199_254_740_992.0), "9007199254740992");
        assert_eq!(format_number(1e16), "10000000000000000");
        assert_eq!(format_number(1.2345678901234567e19), "12345678901234567000");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(-1e20), "-100000000000000000000");
    }

    #[test]
    fn exponent_outside_plain_range() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(f64::MIN_POSITIVE), "2.2250738585072014e-308");
    }

    #[test]
    fn fractions() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(123.456), "123.456");
    }

    #[test]
    fn json_number_keeps_the_text() {
        assert_eq!(number_to_json(1e21).to_string(), "1e+21");
        assert_eq!(number_to_json(1e20).to_string(), "100000000000000000000");
        assert_eq!(number_to_json(-0.0).to_string(), "0");
    }
}
