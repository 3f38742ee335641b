//! Attributes mined from product titles.
//!
//! Passive parts often ship with an empty attribute bag while the title still
//! reads e.g. `"Chip Resistor - Surface Mount 10KOhms ±1% 1/10W 0603"`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

const CHIP_RESISTOR: &str = "Chip Resistor - Surface Mount";
const MLCC: &str = "Multilayer Ceramic Capacitors MLCC";

static RESISTANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?[a-zA-Z]?(?:Ohms?|Ω)").unwrap());
static TOLERANCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"±\d+(?:\.\d+)?(?:%|pF)").unwrap());
static POWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\d+/\d+|\d+(?:\.\d+)?[a-zA-Z]?)W\b").unwrap());
static CAPACITANCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?[pnuμµm]?F\b").unwrap());
static VOLTAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?[kK]?V\b").unwrap());
static DIELECTRIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:C0G|NP0|X5R|X6S|X7R|X7S|X7T|X8R|Y5V|Z5U)\b").unwrap());

fn capture(attrs: &mut BTreeMap<String, String>, key: &str, pattern: &Regex, description: &str) {
    if let Some(found) = pattern.find(description) {
        attrs.insert(key.to_string(), found.as_str().to_string());
    }
}

fn chip_resistor(description: &str) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    capture(&mut attrs, "Resistance", &RESISTANCE, description);
    capture(&mut attrs, "Tolerance", &TOLERANCE, description);
    capture(&mut attrs, "Power", &POWER, description);
    attrs
}

fn mlcc(description: &str) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    capture(&mut attrs, "Capacitance", &CAPACITANCE, description);
    capture(&mut attrs, "Rated Voltage", &VOLTAGE, description);
    capture(&mut attrs, "Tolerance", &TOLERANCE, description);
    capture(&mut attrs, "Temperature Coefficient", &DIELECTRIC, description);
    attrs
}

/// Raw attributes recoverable from a product description.
///
/// Keys are raw names and still go through the key normalizer. Descriptions of
/// other part families yield an empty map.
pub fn extract_from_description(description: &str) -> BTreeMap<String, String> {
    let description = description.trim();
    if description.starts_with(CHIP_RESISTOR) {
        chip_resistor(description)
    } else if description.starts_with(MLCC) {
        mlcc(description)
    } else {
        BTreeMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_resistor() {
        let attrs = extract_from_description(
            "Chip Resistor - Surface Mount 4.7KOhms ±1% 1/10W Thick Film Resistors 0603",
        );
        assert_eq!(attrs.get("Resistance").map(String::as_str), Some("4.7KOhms"));
        assert_eq!(attrs.get("Tolerance").map(String::as_str), Some("±1%"));
        assert_eq!(attrs.get("Power").map(String::as_str), Some("1/10W"));
    }

    #[test]
    fn test_mlcc() {
        let attrs = extract_from_description(
            "Multilayer Ceramic Capacitors MLCC - SMD/SMT 50V 100nF X7R ±10% 0402",
        );
        assert_eq!(attrs.get("Capacitance").map(String::as_str), Some("100nF"));
        assert_eq!(attrs.get("Rated Voltage").map(String::as_str), Some("50V"));
        assert_eq!(attrs.get("Tolerance").map(String::as_str), Some("±10%"));
        assert_eq!(
            attrs.get("Temperature Coefficient").map(String::as_str),
            Some("X7R")
        );
    }

    #[test]
    fn test_other_families() {
        assert!(extract_from_description("Schottky Barrier Diode 40V 1A SOD-123").is_empty());
        assert!(extract_from_description("").is_empty());
    }
}
