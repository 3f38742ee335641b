//! Readers turning vendor magnitude strings ("10k", "4k7", "1/4W", "100nF")
//! into [`Magnitude`]s.
//!
//! Numbers are parsed as exact decimals and scaled by exact powers of ten
//! before the final conversion to `f64`, so `"4.7k"` reads as `4700.0` and not
//! `4700.000000000001`.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;

use crate::Magnitude;

const MILLIMETRES_PER_METRE: Decimal = dec!(1000);

/// Single-letter prefixes vendors append to bare numbers.
const SI_PREFIXES: [(char, i32); 11] = [
    ('p', -12),
    ('n', -9),
    ('u', -6),
    ('μ', -6), // GREEK SMALL LETTER MU
    ('µ', -6), // MICRO SIGN
    // '?' replaces 'm' in a recurring vendor typo, the keys sit next to each other
    ('?', -3),
    ('m', -3),
    ('k', 3),
    ('K', 3),
    ('M', 6),
    ('G', 9),
];

/// Letters accepted inside resistor codes such as "4k7", "4R7" or "2M2".
const RESISTANCE_INFIX: [(char, i32); 7] = [
    ('R', 0),
    ('r', 0),
    ('m', -3),
    ('k', 3),
    ('K', 3),
    ('M', 6),
    ('G', 9),
];

static FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*/\s*(\d+(?:\.\d+)?)(.*)$").expect("fraction pattern")
});

#[inline]
fn pow10(exp: i32) -> Decimal {
    if exp >= 0 {
        Decimal::from_i128_with_scale(10i128.pow(exp as u32), 0)
    } else {
        Decimal::new(1, (-exp) as u32)
    }
}

fn prefix_exponent(table: &[(char, i32)], letter: char) -> Option<i32> {
    table
        .iter()
        .find(|(prefix, _)| *prefix == letter)
        .map(|(_, exp)| *exp)
}

/// Explicit "no value" spellings. These are never errors.
pub fn is_empty_sentinel(value: &str) -> bool {
    matches!(value.trim(), "" | "-" | "null")
}

/// Parse a bare decimal number, tolerating a leading `+` and exponent notation.
pub(crate) fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(value)
        .ok()
        .or_else(|| Decimal::from_scientific(value).ok())
        .or_else(|| value.parse::<f64>().ok().and_then(Decimal::from_f64))
}

fn to_magnitude(value: Option<Decimal>) -> Magnitude {
    value
        .and_then(|d| d.to_f64())
        .map_or(Magnitude::NotANumber, Magnitude::from_f64)
}

fn scaled(number: Decimal, exp: i32) -> Option<Decimal> {
    number.checked_mul(pow10(exp))
}

fn read_decimal_with_si_prefix(value: &str) -> Option<Decimal> {
    let value = value.trim();
    let last = value.chars().last()?;
    match prefix_exponent(&SI_PREFIXES, last) {
        Some(exp) => scaled(parse_decimal(&value[..value.len() - last.len_utf8()])?, exp),
        None => parse_decimal(value),
    }
}

/// Read `<number><prefix?>` where the unit itself has already been removed,
/// e.g. `"10k"` -> 10000, `"10m"` -> 0.01.
///
/// Empty input and `"-"` give [`Magnitude::NotANumber`], as does anything the
/// reader cannot make sense of. Unit words are *not* stripped here.
pub fn read_with_si_prefix(value: &str) -> Magnitude {
    if is_empty_sentinel(value) {
        return Magnitude::NotANumber;
    }
    to_magnitude(read_decimal_with_si_prefix(value))
}

/// Remove the first matching unit spelling from the end of `value`.
fn strip_unit<'a>(value: &'a str, units: &[&str]) -> &'a str {
    let value = value.trim();
    units
        .iter()
        .find_map(|unit| value.strip_suffix(unit))
        .map_or(value, str::trim_end)
}

/// Resistor code notation: the letter marks both the multiplier and the
/// decimal point ("4k7" -> 4700, "4R7" -> 4.7, "10R" -> 10).
fn parse_resistance_notation(value: &str) -> Option<Decimal> {
    let pos = value.find(|c: char| c.is_alphabetic())?;
    let letter = value[pos..].chars().next()?;
    let exp = prefix_exponent(&RESISTANCE_INFIX, letter)?;
    let before = &value[..pos];
    let after = &value[pos + letter.len_utf8()..];

    if before.is_empty()
        || !before.chars().all(|c| c.is_ascii_digit() || c == '.')
        || !after.chars().all(|c| c.is_ascii_digit())
        || (before.contains('.') && !after.is_empty())
        || after.len() > 9
    {
        return None;
    }

    let whole = parse_decimal(before)?;
    let fraction = if after.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::from_str(after).ok()? * pow10(-(after.len() as i32))
    };
    scaled(whole + fraction, exp)
}

/// Read a resistance in ohms.
pub fn read_resistance(value: &str) -> Magnitude {
    let mut cleaned = value.to_string();
    for decoration in ["Ω", "Ohms", "Ohm", "ohms", "ohm", "(Max)", "Max"] {
        cleaned = cleaned.replace(decoration, "");
    }
    // Vendors occasionally put spaces around the decimal separator.
    cleaned.retain(|c| !c.is_whitespace());

    if is_empty_sentinel(&cleaned) {
        return Magnitude::NotANumber;
    }
    match parse_resistance_notation(&cleaned) {
        Some(value) => to_magnitude(Some(value)),
        None => read_with_si_prefix(&cleaned),
    }
}

/// Read a voltage in volts. A trailing "A" is a known vendor typo for "V".
pub fn read_voltage(value: &str) -> Magnitude {
    read_with_si_prefix(strip_unit(
        value,
        &["VDC", "Vdc", "VAC", "Vac", "V", "v", "A"],
    ))
}

/// Read a current in amperes. A trailing "V" is a known vendor typo for "A".
pub fn read_current(value: &str) -> Magnitude {
    read_with_si_prefix(strip_unit(value, &["A", "V"]))
}

/// Read a power in watts, including fractional ratings such as `"1/4W"`.
pub fn read_power(value: &str) -> Magnitude {
    // Some ratings list several conditions; the first clause is the headline.
    let value = value.split(';').next().unwrap_or_default().trim();
    if is_empty_sentinel(value) {
        return Magnitude::NotANumber;
    }

    if let Some(captures) = FRACTION.captures(value) {
        let quotient = parse_decimal(&captures[1])
            .zip(parse_decimal(&captures[2]))
            .and_then(|(numerator, denominator)| numerator.checked_div(denominator));
        let rest = strip_unit(&captures[3], &["W", "w"]);
        let mut letters = rest.chars();
        let exp = match (letters.next(), letters.next()) {
            (None, _) => Some(0),
            (Some(letter), None) => prefix_exponent(&SI_PREFIXES, letter),
            _ => None,
        };
        return to_magnitude(quotient.zip(exp).and_then(|(q, exp)| scaled(q, exp)));
    }

    read_with_si_prefix(strip_unit(value, &["W", "w"]))
}

pub fn read_capacitance(value: &str) -> Magnitude {
    read_with_si_prefix(strip_unit(value, &["F"]))
}

pub fn read_inductance(value: &str) -> Magnitude {
    read_with_si_prefix(strip_unit(value, &["H"]))
}

pub fn read_frequency(value: &str) -> Magnitude {
    read_with_si_prefix(strip_unit(value, &["Hz", "HZ", "hz"]))
}

pub fn read_charge(value: &str) -> Magnitude {
    read_with_si_prefix(strip_unit(value, &["C"]))
}

/// Read a length given in millimetres and return it in metres.
pub fn read_length_mm(value: &str) -> Magnitude {
    let value = strip_unit(value, &["mm"]);
    if is_empty_sentinel(value) {
        return Magnitude::NotANumber;
    }
    to_magnitude(parse_decimal(value).and_then(|mm| mm.checked_div(MILLIMETRES_PER_METRE)))
}

/// Read a temperature in whole degrees Celsius, truncated toward zero.
pub fn read_temperature(value: &str) -> Magnitude {
    let value = strip_unit(value, &["℃", "°C", "°c"]);
    if is_empty_sentinel(value) {
        return Magnitude::NotANumber;
    }
    to_magnitude(parse_decimal(value).map(|t| t.trunc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Magnitude, expected: f64) {
        let value = actual
            .value()
            .unwrap_or_else(|| panic!("expected {}, got NaN", expected));
        let tolerance = expected.abs() * 1e-9 + 1e-30;
        assert!(
            (value - expected).abs() <= tolerance,
            "expected {}, got {}",
            expected,
            value
        );
    }

    #[test]
    fn test_si_prefixes() {
        for (prefix, multiplier) in [
            ("p", 1e-12),
            ("n", 1e-9),
            ("u", 1e-6),
            ("μ", 1e-6),
            ("µ", 1e-6),
            ("m", 1e-3),
            ("?", 1e-3),
            ("k", 1e3),
            ("K", 1e3),
            ("M", 1e6),
            ("G", 1e9),
        ] {
            assert_close(read_with_si_prefix(&format!("5{}", prefix)), 5.0 * multiplier);
        }
        assert_close(read_with_si_prefix("5"), 5.0);
        assert_close(read_with_si_prefix(" 2.2k "), 2200.0);
    }

    #[test]
    fn test_sentinels_and_garbage() {
        for input in ["", "-", " - ", "null", "abc", "5X", "5.3.3", "k"] {
            assert!(read_with_si_prefix(input).is_nan(), "'{}' should be NaN", input);
        }
    }

    #[test]
    fn test_exact_decimal_scaling() {
        assert_eq!(read_with_si_prefix("4.7k"), Magnitude::Number(4700.0));
        assert_eq!(read_resistance("4k7"), Magnitude::Number(4700.0));
    }

    #[test]
    fn test_resistance() {
        for (input, expected) in [
            ("10kΩ", 10_000.0),
            ("10K", 10_000.0),
            ("4k7", 4_700.0),
            ("4R7", 4.7),
            ("10R", 10.0),
            ("2M2", 2_200_000.0),
            ("100mΩ", 0.1),
            ("0.5Ω", 0.5),
            ("1 . 5Ω", 1.5),
            ("120Ohms", 120.0),
            ("75 Ohm", 75.0),
            ("3.3Ω(Max)", 3.3),
            ("500μΩ", 0.0005),
        ] {
            assert_close(read_resistance(input), expected);
        }
        assert!(read_resistance("-").is_nan());
        assert!(read_resistance("Ω").is_nan());
    }

    #[test]
    fn test_voltage_and_current_typos() {
        assert_close(read_voltage("12V"), 12.0);
        assert_close(read_voltage("50VDC"), 50.0);
        assert_close(read_voltage("20A"), 20.0);
        assert_close(read_voltage("3.3"), 3.3);
        assert_close(read_current("100mA"), 0.1);
        assert_close(read_current("10V"), 10.0);
        assert!(read_current("-").is_nan());
    }

    #[test]
    fn test_power() {
        assert_close(read_power("1/4W"), 0.25);
        assert_close(read_power("1/16W"), 0.0625);
        assert_close(read_power("1/8mW"), 0.000125);
        assert_close(read_power("62.5mW"), 0.0625);
        assert_close(read_power("250mW;500mW"), 0.25);
        assert!(read_power("1/0W").is_nan());
        assert!(read_power("1/4XYW").is_nan());
        assert!(read_power("").is_nan());
    }

    #[test]
    fn test_other_units() {
        assert_close(read_capacitance("100nF"), 100e-9);
        assert_close(read_capacitance("10uF"), 10e-6);
        assert_close(read_inductance("4.7uH"), 4.7e-6);
        assert_close(read_frequency("100MHz"), 100e6);
        assert_close(read_frequency("32.768kHz"), 32_768.0);
        assert_close(read_charge("15nC"), 15e-9);
        assert_close(read_length_mm("3.2mm"), 0.0032);
        assert_close(read_length_mm("1.6"), 0.0016);
    }

    #[test]
    fn test_temperature_truncates() {
        assert_eq!(read_temperature("+125℃"), Magnitude::Number(125.0));
        assert_eq!(read_temperature("-40.7°C"), Magnitude::Number(-40.0));
        assert_eq!(read_temperature("85.9"), Magnitude::Number(85.0));
        assert!(read_temperature("hot").is_nan());
    }
}
