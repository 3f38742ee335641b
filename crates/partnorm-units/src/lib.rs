pub mod format;
pub mod magnitude;
pub mod readers;

use serde::{Deserialize, Serialize};

pub use format::format_magnitude;
pub use magnitude::Magnitude;
pub use readers::{
    read_capacitance, read_charge, read_current, read_frequency, read_inductance, read_length_mm,
    read_power, read_resistance, read_temperature, read_voltage, read_with_si_prefix,
};

/// Physical dimension tag carried next to every normalized number.
///
/// The lowercase serialized names are consumed verbatim by the search UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Resistance,
    Voltage,
    Current,
    Power,
    Capacitance,
    Inductance,
    Frequency,
    Charge,
    Temperature,
    Length,
    Count,
    String,
}

impl Dimension {
    pub const ALL: [Dimension; 12] = [
        Dimension::Resistance,
        Dimension::Voltage,
        Dimension::Current,
        Dimension::Power,
        Dimension::Capacitance,
        Dimension::Inductance,
        Dimension::Frequency,
        Dimension::Charge,
        Dimension::Temperature,
        Dimension::Length,
        Dimension::Count,
        Dimension::String,
    ];

    /// Unit symbol used when formatting a value of this dimension.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Dimension::Resistance => "Ω",
            Dimension::Voltage => "V",
            Dimension::Current => "A",
            Dimension::Power => "W",
            Dimension::Capacitance => "F",
            Dimension::Inductance => "H",
            Dimension::Frequency => "Hz",
            Dimension::Charge => "C",
            Dimension::Temperature => "°C",
            Dimension::Length => "m",
            Dimension::Count | Dimension::String => "",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Dimension::Resistance => "resistance",
            Dimension::Voltage => "voltage",
            Dimension::Current => "current",
            Dimension::Power => "power",
            Dimension::Capacitance => "capacitance",
            Dimension::Inductance => "inductance",
            Dimension::Frequency => "frequency",
            Dimension::Charge => "charge",
            Dimension::Temperature => "temperature",
            Dimension::Length => "length",
            Dimension::Count => "count",
            Dimension::String => "string",
        }
    }

    /// Whether values of this dimension are magnitudes rather than free text.
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Dimension::String)
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|dimension| dimension.name() == s)
            .ok_or_else(|| format!("Unknown dimension: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_names_roundtrip() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.to_string().parse::<Dimension>(), Ok(dimension));
            assert_eq!(
                serde_json::to_string(&dimension).unwrap(),
                format!("\"{}\"", dimension.name())
            );
        }
        assert!("ohms".parse::<Dimension>().is_err());
    }
}
