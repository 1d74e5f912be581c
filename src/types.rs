use std::fmt;

/// A loosely typed scalar, as handed over by scripting callers.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    // §7.1.4 ToNumber
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
        }
    }

    // §7.1.2 ToBoolean
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => !(*n == 0.0 || n.is_nan()),
            Value::String(s) => !s.is_empty(),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Value::Undefined, Value::Number)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", number_ops::to_string(*n)),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

fn is_js_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

// §7.1.4.1.1 StringToNumber
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    for (prefixes, radix) in [(["0x", "0X"], 16), (["0o", "0O"], 8), (["0b", "0B"], 2)] {
        if let Some(digits) = prefixes.iter().find_map(|p| trimmed.strip_prefix(p)) {
            return parse_radix_digits(digits, radix);
        }
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust accepts spellings ("inf", "nan") that JS does not.
    if trimmed
        .bytes()
        .any(|b| !(b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')))
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned digits in a power-of-two radix, rounded to nearest-even.
///
/// Bits are shifted into a 64-bit window until its top bit is set; anything
/// after that only moves the exponent, with a sticky bit so that ties break
/// correctly in the final `u64 -> f64` conversion.
fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let width = radix.trailing_zeros();
    let mut window: u64 = 0;
    let mut shift: i32 = 0;
    let mut sticky = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            return f64::NAN;
        };
        for b in (0..width).rev() {
            let bit = u64::from((digit >> b) & 1);
            if window >> 63 == 0 {
                window = (window << 1) | bit;
            } else {
                shift = shift.saturating_add(1);
                sticky |= bit == 1;
            }
        }
    }
    (window | u64::from(sticky)) as f64 * 2f64.powi(shift)
}

// §6.1.6.1 Number type operations
pub mod number_ops {
    const TWO_32: f64 = 4294967296.0;

    pub fn to_string(x: f64) -> String {
        if x.is_nan() {
            return "NaN".to_string();
        }
        if x == 0.0 {
            return "0".to_string();
        }
        if x.is_infinite() {
            return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        let mut buf = ryu_js::Buffer::new();
        buf.format(x).to_string()
    }

    // §7.1.7 ToUint32
    pub fn to_uint32(n: f64) -> u32 {
        if n.is_nan() || n.is_infinite() || n == 0.0 {
            return 0;
        }
        let n = n.trunc() % TWO_32;
        let n = if n < 0.0 { n + TWO_32 } else { n };
        n as u32
    }

    // §7.1.6 ToInt32
    pub fn to_int32(n: f64) -> i32 {
        to_uint32(n) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::number_ops::*;
    use super::*;

    #[test]
    fn string_coercion() {
        assert_eq!(Value::from("  42 ").to_number(), 42.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("0x1F").to_number(), 31.0);
        assert_eq!(Value::from("0b101").to_number(), 5.0);
        assert_eq!(Value::from("-Infinity").to_number(), f64::NEG_INFINITY);
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("12px").to_number().is_nan());
        assert_eq!(Value::from("1.5e3").to_number(), 1500.0);
    }

    #[test]
    fn radix_literals_take_bare_digits_only() {
        for s in ["0x+1", "0x-1", "0x", "0b2", "0o8", "-0x10", "0x1 2"] {
            assert!(Value::from(s).to_number().is_nan(), "{s:?}");
        }
        assert_eq!(Value::from("0o777").to_number(), 511.0);
        assert_eq!(Value::from("0XfF").to_number(), 255.0);
    }

    #[test]
    fn wide_radix_literals_round_to_nearest() {
        assert_eq!(Value::from("0x10000000000000000").to_number(), 18446744073709551616.0);
        assert_eq!(Value::from("0xFFFFFFFFFFFFFFFF").to_number(), 18446744073709551616.0);
        // 2^53 + 1 ties down to even, 2^53 + 3 ties up.
        assert_eq!(Value::from("0x20000000000001").to_number(), 9007199254740992.0);
        assert_eq!(Value::from("0x20000000000003").to_number(), 9007199254740996.0);
        // A set bit past the 64-bit window breaks the tie upward.
        let above_tie = format!("0x{}{}", "20000000000001", "0".repeat(8) + "1");
        assert_eq!(
            Value::from(above_tie.as_str()).to_number(),
            (9007199254740994.0f64) * 2f64.powi(36)
        );
        let huge = format!("0b1{}", "0".repeat(1100));
        assert_eq!(Value::from(huge.as_str()).to_number(), f64::INFINITY);
    }

    #[test]
    fn trims_js_whitespace() {
        assert_eq!(Value::from("\u{FEFF}5").to_number(), 5.0);
        assert_eq!(Value::from("\u{00A0}\u{2028}7\u{3000}").to_number(), 7.0);
        assert_eq!(Value::from("\u{FEFF}").to_number(), 0.0);
        // NEL is Unicode whitespace but not JS whitespace.
        assert!(Value::from("\u{0085}1").to_number().is_nan());
    }

    #[test]
    fn primitive_coercion() {
        assert!(Value::Undefined.to_number().is_nan());
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert!(!Value::Number(f64::NAN).to_boolean());
        assert!(Value::from("x").to_boolean());
        assert!(!Value::Number(-0.0).to_boolean());
    }

    #[test]
    fn modular_integer_conversion() {
        assert_eq!(to_int32(4294967295.0), -1);
        assert_eq!(to_int32(2147483648.0), i32::MIN);
        assert_eq!(to_uint32(-1.0), u32::MAX);
        assert_eq!(to_uint32(1e20), (1e20 % 4294967296.0) as u32);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(-3.7), -3);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(to_string(1.0), "1");
        assert_eq!(to_string(-0.0), "0");
        assert_eq!(to_string(1.5), "1.5");
        assert_eq!(to_string(f64::NAN), "NaN");
        assert_eq!(to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }
}
