//! `min ~ max` ranges.

use once_cell::sync::Lazy;
use partnorm_units::{Dimension, Magnitude, read_temperature, read_voltage};
use regex::Regex;

use super::{Reader, is_placeholder, split_list, strip_notes};
use crate::NormalizedAttribute;

/// LED and indicator listings sometimes leave the colour next to the value.
static COLOURS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:warm white|cool white|cold white|white|red|green|blue|yellow|orange|amber|purple|pink|infrared|ir|uv)\b",
    )
    .unwrap()
});

/// Characters after which a `-` is a sign rather than a range delimiter.
const SIGN_CONTEXT: [char; 4] = ['~', ',', ';', '('];

struct RangeShape {
    min: &'static str,
    max: &'static str,
    /// Tried in order; the first one found splits the range.
    delimiters: &'static [&'static str],
    dimension: Dimension,
    read: Reader,
}

/// Byte offset of the first `-` acting as a delimiter, skipping minus signs.
fn find_dash(value: &str) -> Option<usize> {
    value.match_indices('-').map(|(index, _)| index).find(|&index| {
        value[..index]
            .trim_end()
            .chars()
            .last()
            .is_some_and(|previous| !SIGN_CONTEXT.contains(&previous))
    })
}

fn find_delimiter(value: &str, delimiter: &str) -> Option<usize> {
    if delimiter == "-" {
        find_dash(value)
    } else {
        value.find(delimiter)
    }
}

impl RangeShape {
    fn parse(&self, value: &str) -> NormalizedAttribute {
        let cleaned = strip_notes(value);
        let cleaned = COLOURS.replace_all(&cleaned, "");
        // Only the first listed range is kept.
        let cleaned = split_list(&cleaned).first().copied().unwrap_or_default().trim();

        let split = self.delimiters.iter().find_map(|delimiter| {
            find_delimiter(cleaned, delimiter)
                .map(|index| (&cleaned[..index], &cleaned[index + delimiter.len()..]))
        });

        match split {
            Some((low, high)) if !is_placeholder(cleaned) => {
                NormalizedAttribute::new(format!("${{{}}} ~ ${{{}}}", self.min, self.max), self.min)
                    .with(self.min, self.read_bound(low), self.dimension)
                    .with(self.max, self.read_bound(high), self.dimension)
            }
            _ => {
                let magnitude = if is_placeholder(cleaned) {
                    Magnitude::NotANumber
                } else {
                    self.read_bound(cleaned)
                };
                NormalizedAttribute::scalar(self.min, magnitude, self.dimension)
            }
        }
    }

    fn read_bound(&self, value: &str) -> Magnitude {
        let value = value.trim();
        if is_placeholder(value) {
            Magnitude::NotANumber
        } else {
            (self.read)(value)
        }
    }
}

static VOLTAGE_RANGE: RangeShape = RangeShape {
    min: "Vmin",
    max: "Vmax",
    delimiters: &["..", "-", "~"],
    dimension: Dimension::Voltage,
    read: read_voltage,
};

static TEMPERATURE_RANGE: RangeShape = RangeShape {
    min: "Tmin",
    max: "Tmax",
    delimiters: &["~", "..", "-"],
    dimension: Dimension::Temperature,
    read: read_temperature,
};

/// `"1.8~3.3V"`, `"2.7V-5.5V"`, `"3V..5V"`, or a single voltage.
pub fn voltage_range(value: &str) -> NormalizedAttribute {
    VOLTAGE_RANGE.parse(value)
}

/// `"-40℃~+85℃"`. Bounds are whole degrees.
pub fn temperature_range(value: &str) -> NormalizedAttribute {
    TEMPERATURE_RANGE.parse(value)
}
