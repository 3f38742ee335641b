use partnorm_units::{
    Dimension, Magnitude, read_capacitance, read_charge, read_current, read_frequency,
    read_inductance, read_power, read_resistance, read_voltage, read_with_si_prefix,
};

use super::{Reader, is_placeholder, strip_notes};
use crate::NormalizedAttribute;

const STRING_NAME: &str = "default";

fn scalar(value: &str, name: &str, dimension: Dimension, read: Reader) -> NormalizedAttribute {
    let value = strip_notes(value);
    let magnitude = if is_placeholder(&value) {
        Magnitude::NotANumber
    } else {
        read(&value)
    };
    NormalizedAttribute::scalar(name, magnitude, dimension)
}

/// Keep the text verbatim. This is the fallback for every unknown key.
pub fn string_attribute(value: &str) -> NormalizedAttribute {
    NormalizedAttribute::new(format!("${{{}}}", STRING_NAME), STRING_NAME)
        .with_text(STRING_NAME, value)
}

pub fn resistance_attribute(value: &str) -> NormalizedAttribute {
    // "(Max)" is part of the resistance dialect, leave it to the reader.
    let magnitude = if is_placeholder(value) {
        Magnitude::NotANumber
    } else {
        read_resistance(value)
    };
    NormalizedAttribute::scalar("resistance", magnitude, Dimension::Resistance)
}

pub fn impedance_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "impedance", Dimension::Resistance, read_resistance)
}

pub fn voltage_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "voltage", Dimension::Voltage, read_voltage)
}

pub fn current_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "current", Dimension::Current, read_current)
}

pub fn power_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "power", Dimension::Power, read_power)
}

pub fn capacitance_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "capacitance", Dimension::Capacitance, read_capacitance)
}

pub fn inductance_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "inductance", Dimension::Inductance, read_inductance)
}

pub fn frequency_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "frequency", Dimension::Frequency, read_frequency)
}

pub fn charge_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "charge", Dimension::Charge, read_charge)
}

/// Pin or element counts. `"40+2"` sums to 42; any unreadable term makes the
/// whole count NaN.
pub fn count_attribute(value: &str) -> NormalizedAttribute {
    scalar(value, "count", Dimension::Count, read_count)
}

fn read_count(value: &str) -> Magnitude {
    value
        .split('+')
        .map(|term| read_with_si_prefix(term).value())
        .sum::<Option<f64>>()
        .map_or(Magnitude::NotANumber, Magnitude::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttributeValue;

    #[test]
    fn test_string_keeps_text() {
        let attribute = string_attribute(" ±1% ");
        assert_eq!(attribute.format, "${default}");
        assert_eq!(attribute.primary, "default");
        assert_eq!(attribute.get("default"), Some(&AttributeValue::Text(" ±1% ".into())));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            voltage_attribute("50V").magnitude("voltage"),
            Some(Magnitude::Number(50.0))
        );
        assert_eq!(
            current_attribute("2A(Tc)").magnitude("current"),
            Some(Magnitude::Number(2.0))
        );
        assert_eq!(
            power_attribute("1/4W").magnitude("power"),
            Some(Magnitude::Number(0.25))
        );
        assert_eq!(
            resistance_attribute("3.3Ω(Max)").magnitude("resistance"),
            Some(Magnitude::Number(3.3))
        );
        assert_eq!(
            impedance_attribute("120Ω").get("impedance").map(AttributeValue::dimension),
            Some(Dimension::Resistance)
        );
    }

    #[test]
    fn test_count() {
        assert_eq!(count_attribute("40+2").magnitude("count"), Some(Magnitude::Number(42.0)));
        assert_eq!(count_attribute("1.5+1").magnitude("count"), Some(Magnitude::Number(2.5)));
        assert_eq!(count_attribute("8").magnitude("count"), Some(Magnitude::Number(8.0)));
        assert!(count_attribute("4+x").is_blank());
        assert!(count_attribute("-").is_blank());
    }
}
