use partnorm_units::{Dimension, Magnitude, read_temperature};

use super::{is_placeholder, strip_notes};
use crate::{AttributeError, NormalizedAttribute};

const CELSIUS: [&str; 2] = ["℃", "°C"];

/// `"-55℃~+150℃"` and friends. A leading sign is not a delimiter.
fn is_range(value: &str) -> bool {
    let unsigned = value.trim_start_matches(['+', '-']);
    unsigned.contains(['~', '-']) || unsigned.contains("..")
}

/// A single temperature such as `"150℃"` or `"+125℃@Tj"`, truncated to whole
/// degrees.
///
/// Only registered for keys whose values carry a Celsius sign; anything else
/// is reported as a contract violation and handled by the dispatcher.
pub fn temperature_attribute(value: &str) -> Result<NormalizedAttribute, AttributeError> {
    let condition_free = value.split('@').next().unwrap_or_default();
    let cleaned = strip_notes(condition_free);

    let magnitude = if is_placeholder(&cleaned) {
        Magnitude::NotANumber
    } else if is_range(&cleaned) {
        return Err(AttributeError::ContractViolation {
            parser: "temperature_attribute",
            expected: "a single value in ℃",
            value: value.to_string(),
        });
    } else if CELSIUS.iter().any(|sign| cleaned.ends_with(sign)) {
        read_temperature(&cleaned)
    } else {
        return Err(AttributeError::ContractViolation {
            parser: "temperature_attribute",
            expected: "a value in ℃",
            value: value.to_string(),
        });
    };

    Ok(NormalizedAttribute::scalar(
        "temperature",
        magnitude,
        Dimension::Temperature,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature() {
        let attribute = temperature_attribute("+150.5℃ (Tj)").unwrap();
        assert_eq!(attribute.magnitude("temperature"), Some(Magnitude::Number(150.0)));
        assert_eq!(attribute.render(), "150 °C");

        let qualified = temperature_attribute("125°C@Ta").unwrap();
        assert_eq!(qualified.magnitude("temperature"), Some(Magnitude::Number(125.0)));

        assert!(temperature_attribute("-").unwrap().is_blank());
    }

    #[test]
    fn test_range_is_a_contract_violation() {
        for range in ["-55℃~+150℃", "-40℃-125℃", "-40..125℃"] {
            let err = temperature_attribute(range).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("temperature_attribute expects a single value in ℃, got '{}'", range)
            );
        }
        let negative = temperature_attribute("-40℃").unwrap();
        assert_eq!(negative.magnitude("temperature"), Some(Magnitude::Number(-40.0)));
    }

    #[test]
    fn test_missing_celsius_is_a_contract_violation() {
        let err = temperature_attribute("150").unwrap_err();
        assert_eq!(
            err.to_string(),
            "temperature_attribute expects a value in ℃, got '150'"
        );
    }
}
