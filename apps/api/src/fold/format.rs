//! Browser-compatible number formatting.
//!
//! The display fields must read exactly as a browser would print them, so these
//! helpers follow `Number.prototype.toFixed`, `toExponential` and the default
//! `toLocaleString` rather than Rust's `{:.N}` formatting:
//! - exact ties round away from zero (Rust rounds ties to even)
//! - non-finite values print as `Infinity` / `∞`
//! - `toFixed` switches to exponent notation at 1e21
//! - `toLocaleString` starts from the shortest round-trip digits, padded with zeros,
//!   not the exact binary expansion

/// Digits needed to print any finite `f64` exactly (subnormals have 1074 fraction digits).
const EXACT_DIGITS: usize = 1100;

/// Maximum fraction digits of the default `toLocaleString` output.
const LOCALE_MAX_FRACTION_DIGITS: usize = 3;

/// `value.toFixed(digits)`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    if value.abs() >= 1e21 {
        return to_js_string(value);
    }
    let value = nudge_tie(value, is_fixed_tie(value, digits));
    strip_negative_zero(format!("{value:.digits$}"))
}

/// `value.toExponential(digits)`, e.g. `1.28e+0`.
pub fn to_exponential(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    let value = nudge_tie(value, is_exponential_tie(value, digits));
    js_exponent(&format!("{value:.digits$e}"))
}

/// `value.toLocaleString()` with the default grouping: `,` thousands separator and
/// at most three fraction digits (halves round up), trailing zeros dropped.
///
/// `2^64` prints as `18,446,744,073,709,552,000`.
pub fn to_locale_grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (int_part, frac_part) = shortest_decimal(value.abs());
    let (int_part, frac_part) =
        round_half_up(&int_part, &frac_part, LOCALE_MAX_FRACTION_DIGITS);
    let frac_part = frac_part.trim_end_matches('0');
    let is_zero = int_part == "0" && frac_part.is_empty();

    let mut out = String::with_capacity(int_part.len() * 4 / 3 + frac_part.len() + 2);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Integer and fraction digits of the shortest round-trip form of a finite,
/// non-negative `value`: `1.2e3` is `("1200", "")`, `0.05` is `("0", "05")`.
fn shortest_decimal(value: f64) -> (String, String) {
    let sci = format!("{value:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i64 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    // Position of the decimal point, counted in digits from the left.
    let point = exp + 1;
    if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{zeros}{digits}"))
    } else if point as usize >= digits.len() {
        let zeros = "0".repeat(point as usize - digits.len());
        (format!("{digits}{zeros}"), String::new())
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        (int_part.to_string(), frac_part.to_string())
    }
}

/// Rounds a decimal digit string to `digits` fraction digits, halves away from zero.
fn round_half_up(int_part: &str, frac_part: &str, digits: usize) -> (String, String) {
    if frac_part.len() <= digits {
        return (int_part.to_string(), frac_part.to_string());
    }
    let round_up = frac_part.as_bytes()[digits] >= b'5';

    let mut all: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..digits].bytes())
        .collect();
    if round_up {
        let mut i = all.len();
        loop {
            if i == 0 {
                all.insert(0, b'1');
                break;
            }
            i -= 1;
            if all[i] == b'9' {
                all[i] = b'0';
            } else {
                all[i] += 1;
                break;
            }
        }
    }

    let split = all.len() - digits;
    let to_string = |bytes: &[u8]| bytes.iter().map(|&b| b as char).collect::<String>();
    (to_string(&all[..split]), to_string(&all[split..]))
}

/// Shortest round-trip representation, the way `String(value)` prints it.
/// Used for echoing user-supplied parameters back in messages.
pub fn to_js_string(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        format!("{value}")
    } else {
        js_exponent(&format!("{value:e}"))
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

/// Rust prints `1.28e0` / `1.28e-3`; browsers print `1.28e+0` / `1.28e-3`.
fn js_exponent(rust: &str) -> String {
    match rust.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => rust.to_string(),
    }
}

fn strip_negative_zero(text: String) -> String {
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Moves an exact tie one ulp away from zero so Rust's round-half-even formatting
/// lands on the same digit a browser would pick.
fn nudge_tie(value: f64, is_tie: bool) -> f64 {
    if is_tie && value != 0.0 {
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    }
}

fn is_fixed_tie(value: f64, digits: usize) -> bool {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    match exact.split_once('.') {
        Some((_, frac)) => is_half(&frac[digits..]),
        None => false,
    }
}

fn is_exponential_tie(value: f64, digits: usize) -> bool {
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let mantissa = exact.split_once('e').map_or(exact.as_str(), |(m, _)| m);
    match mantissa.split_once('.') {
        Some((_, frac)) => is_half(&frac[digits..]),
        None => false,
    }
}

/// True when the discarded digits are exactly one half: `5` followed only by zeros.
fn is_half(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('5') && chars.all(|c| c == '0')
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
