//! Value parsers, one per value-shape dialect.
//!
//! Every parser is a plain function of the raw text. Unreadable numbers
//! degrade to [`Magnitude::NotANumber`] for the affected sub-value only, and a
//! structural mismatch yields the full declared shape with every sub-value
//! set to NaN.

mod compound;
mod dual;
mod range;
mod scalar;
mod size;
mod temperature;

pub use compound::{
    capacity_at_voltage, charge_at_voltage, clamping_voltage, esr, forward_voltage,
    impedance_at_frequency, rds_on_max_at_ids_at_vgs, ripple_current, vce_on_max, vgs_threshold,
};
pub use dual::{
    continuous_transistor_current, drain_to_source_voltage, power_dissipation, vce_breakdown,
};
pub use range::{temperature_range, voltage_range};
pub use scalar::{
    capacitance_attribute, charge_attribute, count_attribute, current_attribute,
    frequency_attribute, impedance_attribute, inductance_attribute, power_attribute,
    resistance_attribute, string_attribute, voltage_attribute,
};
pub use size::size_mm;
pub use temperature::temperature_attribute;

use once_cell::sync::Lazy;
use partnorm_units::Magnitude;
use partnorm_units::readers::is_empty_sentinel;
use regex::Regex;

pub(crate) type Reader = fn(&str) -> Magnitude;

static NOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

const LIST_SEPARATORS: [char; 3] = [',', '，', ';'];

/// Drop parenthesised notes such as `(Tc)` or `(Max)`.
pub(crate) fn strip_notes(value: &str) -> String {
    NOTES.replace_all(value, "").trim().to_string()
}

pub(crate) fn is_placeholder(value: &str) -> bool {
    is_empty_sentinel(value)
}

/// Split a list of values on `,`, `，` or `;`, dropping empty pieces.
pub(crate) fn split_list(value: &str) -> Vec<&str> {
    value
        .split(LIST_SEPARATORS)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Split the conditions after an `@`.
///
/// Historic data separates them with commas, semicolons, full-width commas or
/// bare spaces; the space form is only tried when no explicit separator is
/// present.
pub(crate) fn split_qualifiers(value: &str) -> Vec<&str> {
    let pieces = split_list(value);
    if pieces.len() > 1 {
        return pieces;
    }
    value.split_whitespace().collect()
}

/// Separate the two channels of a dual part.
///
/// A dual value carries two `@` clauses; the channels split at the last `,`,
/// `，` or `;` before the second `@`. With a single `@` every separator belongs
/// to the conditions.
pub(crate) fn split_channels(value: &str) -> Option<(&str, &str)> {
    let mut ats = value.match_indices('@').map(|(index, _)| index);
    let first_at = ats.next()?;
    let second_at = ats.next()?;
    let boundary = value[first_at..second_at].rfind(LIST_SEPARATORS)? + first_at;
    let separator_len = value[boundary..].chars().next()?.len_utf8();
    Some((
        value[..boundary].trim(),
        value[boundary + separator_len..].trim(),
    ))
}

/// Numbered sub-value name for channel `index` of a dual part.
pub(crate) fn channel_name(name: &str, index: usize) -> String {
    format!("{} {}", name, index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qualifiers() {
        assert_eq!(split_qualifiers(" 1A, 10V"), vec!["1A", "10V"]);
        assert_eq!(split_qualifiers("1A;10V"), vec!["1A", "10V"]);
        assert_eq!(split_qualifiers("1A，10V"), vec!["1A", "10V"]);
        assert_eq!(split_qualifiers("1A 10V"), vec!["1A", "10V"]);
        assert_eq!(split_qualifiers("250uA"), vec!["250uA"]);
    }

    #[test]
    fn test_split_channels() {
        assert_eq!(
            split_channels("2.5Ω@1A,10V;3Ω@1A,10V"),
            Some(("2.5Ω@1A,10V", "3Ω@1A,10V"))
        );
        assert_eq!(
            split_channels("2.5Ω@1A,10V,3Ω@1A，10V"),
            Some(("2.5Ω@1A,10V", "3Ω@1A，10V"))
        );
        assert_eq!(
            split_channels("1V@250uA，2V@250uA"),
            Some(("1V@250uA", "2V@250uA"))
        );
        assert_eq!(split_channels("2.5Ω@1A,10V"), None);
        assert_eq!(split_channels("2.5Ω @ 1A;10V"), None);
        assert_eq!(split_channels("1V;2V"), None);
    }

    #[test]
    fn test_strip_notes() {
        assert_eq!(strip_notes("10A(Tc)"), "10A");
        assert_eq!(strip_notes("1W (Ta) "), "1W");
    }
}
