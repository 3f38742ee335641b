//! Ratings that dual-channel transistors list once per channel (`"1A,2A"`).

use partnorm_units::{Dimension, Magnitude, read_current, read_power, read_voltage};

use super::{Reader, channel_name, is_placeholder, split_list, strip_notes};
use crate::NormalizedAttribute;

fn per_channel(value: &str, name: &str, dimension: Dimension, read: Reader) -> NormalizedAttribute {
    let value = strip_notes(value);
    let channels = if is_placeholder(&value) {
        Vec::new()
    } else {
        split_list(&value)
    };

    if channels.len() < 2 {
        let magnitude = channels.first().map_or(Magnitude::NotANumber, |v| read(v));
        return NormalizedAttribute::scalar(name, magnitude, dimension);
    }

    let names: Vec<String> = (0..channels.len())
        .map(|index| channel_name(name, index))
        .collect();
    let format = names
        .iter()
        .map(|name| format!("${{{}}}", name))
        .collect::<Vec<_>>()
        .join(", ");
    let mut attribute = NormalizedAttribute::new(format, names[0].clone());
    for (name, channel) in names.into_iter().zip(channels) {
        attribute = attribute.with(name, read(channel), dimension);
    }
    attribute
}

/// Drain or collector current, `symbol` names the sub-value (`Id`, `Ic`).
///
/// Temperature notes such as `(Tc)` are dropped and a trailing `V` is read as
/// `A`.
pub fn continuous_transistor_current(value: &str, symbol: &str) -> NormalizedAttribute {
    per_channel(value, symbol, Dimension::Current, read_current)
}

pub fn drain_to_source_voltage(value: &str) -> NormalizedAttribute {
    per_channel(value, "Vds", Dimension::Voltage, read_voltage)
}

pub fn power_dissipation(value: &str) -> NormalizedAttribute {
    per_channel(value, "power", Dimension::Power, read_power)
}

pub fn vce_breakdown(value: &str) -> NormalizedAttribute {
    per_channel(value, "Vce", Dimension::Voltage, read_voltage)
}
