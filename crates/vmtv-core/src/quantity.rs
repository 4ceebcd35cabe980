//! # Kubernetes Resource Quantities
//!
//! Memory and CPU sizes in VM templates are written as quantity strings
//! (`128Mi`, `1G`, `0.5Gi`, `1e3`). Integer rules compare against the exact
//! integer value of the quantity.
//!
//! Supported forms: `<sign?><digits>[.<digits>]<suffix?>` where the suffix
//! is one of the binary suffixes `Ki Mi Gi Ti Pi Ei`, the decimal suffixes
//! `m k M G T P E`, or a decimal exponent `e<int>` / `E<int>`.
//!
//! Arithmetic is exact (`i128` numerator over a power-of-ten denominator).
//! Quantities whose value is not a whole number, or does not fit in `i64`,
//! are rejected.

/// Largest decimal exponent accepted; `10^38` still fits in `i128`.
const MAX_EXPONENT: u32 = 38;

/// Scale applied by a quantity suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    /// Multiply by `1024^n`.
    Binary(u32),
    /// Multiply by `10^n` (negative for milli).
    Decimal(i32),
}

/// Parse a quantity string into its exact integer value.
///
/// Returns `None` for malformed input, non-integral values, and values
/// outside the `i64` range. Plain integers (`"42"`, `"-7"`) are quantities
/// without a suffix and parse as themselves.
pub fn parse_quantity(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, scale) = split_suffix(unsigned)?;
    let (mut numerator, frac_digits) = parse_mantissa(mantissa)?;
    let mut denominator: i128 = 10i128.checked_pow(frac_digits)?;

    match scale {
        Scale::Binary(n) => {
            numerator = numerator.checked_mul(1024i128.checked_pow(n)?)?;
        }
        Scale::Decimal(e) if e >= 0 => {
            numerator = numerator.checked_mul(10i128.checked_pow(e.unsigned_abs())?)?;
        }
        Scale::Decimal(e) => {
            denominator = denominator.checked_mul(10i128.checked_pow(e.unsigned_abs())?)?;
        }
    }

    if numerator % denominator != 0 {
        return None;
    }
    let magnitude = numerator / denominator;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

/// Split the numeric part from its suffix.
fn split_suffix(text: &str) -> Option<(&str, Scale)> {
    const BINARY: [(&str, u32); 6] = [("Ki", 1), ("Mi", 2), ("Gi", 3), ("Ti", 4), ("Pi", 5), ("Ei", 6)];
    for (suffix, power) in BINARY {
        if let Some(number) = text.strip_suffix(suffix) {
            return Some((number, Scale::Binary(power)));
        }
    }

    // `1E3` is an exponent, `1E` is exa.
    if let Some(idx) = text.find(['e', 'E']) {
        let exponent = &text[idx + 1..];
        if !exponent.is_empty() {
            let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let e: i32 = exponent.parse().ok()?;
            if e.unsigned_abs() > MAX_EXPONENT {
                return None;
            }
            return Some((&text[..idx], Scale::Decimal(e)));
        }
    }

    let decimal = match text.as_bytes().last()? {
        b'm' => Some(-3),
        b'k' => Some(3),
        b'M' => Some(6),
        b'G' => Some(9),
        b'T' => Some(12),
        b'P' => Some(15),
        b'E' => Some(18),
        _ => None,
    };
    match decimal {
        Some(e) => Some((&text[..text.len() - 1], Scale::Decimal(e))),
        None => Some((text, Scale::Decimal(0))),
    }
}

/// Parse `<digits>[.<digits>]` into a numerator and the count of fractional digits.
fn parse_mantissa(text: &str) -> Option<(i128, u32)> {
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return None;
    }

    let mut numerator: i128 = 0;
    for b in whole.bytes().chain(frac.bytes()) {
        numerator = numerator.checked_mul(10)?.checked_add(i128::from(b - b'0'))?;
    }
    let frac_digits = u32::try_from(frac.len()).ok()?;
    Some((numerator, frac_digits))
}
