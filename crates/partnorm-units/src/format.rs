use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::{Dimension, Magnitude};

/// Placeholder shown for a sub-value that could not be read.
pub const MISSING: &str = "-";

const DISPLAY_DIGITS: u32 = 3;

/// Display prefixes, largest first.
const SI_PREFIXES: [(i32, &str); 8] = [
    (9, "G"),
    (6, "M"),
    (3, "k"),
    (0, ""),
    (-3, "m"),
    (-6, "μ"),
    (-9, "n"),
    (-12, "p"),
];

/// Letters used by resistor codes, largest first. Milliohms are handled apart.
const RESISTANCE_LETTERS: [(i32, &str); 4] = [(9, "G"), (6, "M"), (3, "k"), (0, "R")];

fn pow10(exp: i32) -> Decimal {
    if exp >= 0 {
        Decimal::from_i128_with_scale(10i128.pow(exp as u32), 0)
    } else {
        Decimal::new(1, (-exp) as u32)
    }
}

fn fmt_significant(x: Decimal) -> String {
    let formatted = format!("{}", x.normalize());

    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Scale into `table`, stepping up one prefix when rounding carries to 1000.
fn scale_into(raw: Decimal, table: &[(i32, &'static str)]) -> (Decimal, &'static str) {
    let abs = raw.abs();
    let mut index = table
        .iter()
        .position(|(exp, _)| abs >= pow10(*exp))
        .unwrap_or(table.len() - 1);

    loop {
        let (exp, symbol) = table[index];
        let scaled = (raw / pow10(exp)).round_dp(DISPLAY_DIGITS);
        if scaled.abs() >= Decimal::ONE_THOUSAND && index > 0 {
            index -= 1;
            continue;
        }
        return (scaled, symbol);
    }
}

fn format_resistance(ohms: Decimal) -> String {
    if ohms.is_zero() {
        return "0R".to_string();
    }
    let sign = if ohms.is_sign_negative() { "-" } else { "" };
    let ohms = ohms.abs();

    if ohms < Decimal::ONE {
        let milli = (ohms * Decimal::ONE_THOUSAND).round_dp(DISPLAY_DIGITS);
        if milli < Decimal::ONE_THOUSAND {
            return format!("{}{}mR", sign, fmt_significant(milli));
        }
    }

    let (scaled, letter) = scale_into(ohms, &RESISTANCE_LETTERS);
    let whole = scaled.trunc();
    let fraction = fmt_significant(scaled - whole);
    let digits = fraction.strip_prefix("0.").unwrap_or("");
    format!("{}{}{}{}", sign, whole.normalize(), letter, digits)
}

fn format_si(value: Decimal, unit: &str) -> String {
    if value.is_zero() {
        return format!("0 {}", unit);
    }
    let (scaled, prefix) = scale_into(value, &SI_PREFIXES);
    format!("{} {}{}", fmt_significant(scaled), prefix, unit)
}

/// Human readable rendering of one sub-value, e.g. `4k7`, `100 nF`, `85 °C`.
pub fn format_magnitude(magnitude: Magnitude, dimension: Dimension) -> String {
    let Some(value) = magnitude.value() else {
        return MISSING.to_string();
    };
    let Some(exact) = Decimal::from_f64(value) else {
        return format!("{} {}", value, dimension.suffix()).trim_end().to_string();
    };

    match dimension {
        Dimension::Resistance => format_resistance(exact),
        Dimension::Temperature => format!("{} {}", fmt_significant(exact), dimension.suffix()),
        Dimension::Count | Dimension::String => fmt_significant(exact),
        _ => format_si(exact, dimension.suffix()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(value: f64, dimension: Dimension) -> String {
        format_magnitude(Magnitude::Number(value), dimension)
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(format_magnitude(Magnitude::NotANumber, Dimension::Voltage), "-");
        assert_eq!(format_magnitude(Magnitude::NotANumber, Dimension::Resistance), "-");
    }

    #[test]
    fn test_resistor_codes() {
        assert_eq!(show(4700.0, Dimension::Resistance), "4k7");
        assert_eq!(show(5.6, Dimension::Resistance), "5R6");
        assert_eq!(show(10.0, Dimension::Resistance), "10R");
        assert_eq!(show(10_000.0, Dimension::Resistance), "10k");
        assert_eq!(show(2_200_000.0, Dimension::Resistance), "2M2");
        assert_eq!(show(0.33, Dimension::Resistance), "330mR");
        assert_eq!(show(0.0, Dimension::Resistance), "0R");
        assert_eq!(show(999.9999, Dimension::Resistance), "1k");
    }

    #[test]
    fn test_si_display() {
        assert_eq!(show(100e-9, Dimension::Capacitance), "100 nF");
        assert_eq!(show(3.3, Dimension::Voltage), "3.3 V");
        assert_eq!(show(0.25, Dimension::Power), "250 mW");
        assert_eq!(show(4.7e-6, Dimension::Inductance), "4.7 μH");
        assert_eq!(show(100e6, Dimension::Frequency), "100 MHz");
        assert_eq!(show(0.0, Dimension::Current), "0 A");
        assert_eq!(show(0.0032, Dimension::Length), "3.2 mm");
    }

    #[test]
    fn test_plain_dimensions() {
        assert_eq!(show(-40.0, Dimension::Temperature), "-40 °C");
        assert_eq!(show(16.0, Dimension::Count), "16");
        assert_eq!(show(2.5, Dimension::Count), "2.5");
    }
}
