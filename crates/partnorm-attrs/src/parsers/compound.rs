//! Values measured under conditions: `"<head> @ <condition>, <condition>"`.

use partnorm_units::{
    Dimension, Magnitude, read_capacitance, read_charge, read_current, read_frequency,
    read_resistance, read_voltage,
};

use super::{Reader, channel_name, is_placeholder, split_channels, split_qualifiers, strip_notes};
use crate::NormalizedAttribute;

#[derive(Clone, Copy)]
struct Slot {
    name: &'static str,
    dimension: Dimension,
    read: Reader,
}

impl Slot {
    const fn new(name: &'static str, dimension: Dimension, read: Reader) -> Self {
        Self {
            name,
            dimension,
            read,
        }
    }

    /// Whether `part` ends with this slot's unit symbol.
    fn claims(&self, part: &str) -> bool {
        let suffix = self.dimension.suffix();
        !suffix.is_empty() && part.trim_end().ends_with(suffix)
    }
}

/// Head value followed by the conditions it was measured at.
struct Shape {
    head: Slot,
    conditions: &'static [Slot],
}

impl Shape {
    fn slots(&self) -> impl Iterator<Item = &Slot> {
        std::iter::once(&self.head).chain(self.conditions)
    }

    fn template(&self, name: impl Fn(&str) -> String) -> String {
        let conditions = self
            .conditions
            .iter()
            .map(|slot| format!("${{{}}}", name(slot.name)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("${{{}}} @ {}", name(self.head.name), conditions)
    }

    /// Read one channel. The result always has one entry per slot.
    fn read(&self, value: &str) -> Vec<Magnitude> {
        let slot_count = 1 + self.conditions.len();
        let blank = vec![Magnitude::NotANumber; slot_count];
        if is_placeholder(value) {
            return blank;
        }

        let Some((head, tail)) = value.split_once('@') else {
            // A bare head value without its conditions.
            let mut result = blank;
            result[0] = (self.head.read)(value.trim());
            return result;
        };

        let mut parts = vec![head.trim()];
        parts.extend(split_qualifiers(tail));
        if parts.len() != slot_count {
            return blank;
        }

        let slots: Vec<&Slot> = self.slots().collect();
        // A part carrying another slot's unit, while that slot carries ours,
        // was written in the wrong position.
        for i in 0..slot_count {
            for j in i + 1..slot_count {
                if !slots[i].claims(parts[i])
                    && slots[j].claims(parts[i])
                    && slots[i].claims(parts[j])
                {
                    parts.swap(i, j);
                }
            }
        }

        slots
            .iter()
            .zip(parts)
            .map(|(slot, part)| (slot.read)(part))
            .collect()
    }

    fn parse(&self, value: &str) -> NormalizedAttribute {
        let value = strip_notes(value);
        match split_channels(&value) {
            Some((first, second)) => {
                let channels = [self.read(first), self.read(second)];
                // Channels with several conditions need a separator the
                // conditions do not use.
                let separator = if self.conditions.len() > 1 { "; " } else { ", " };
                let format = [0, 1]
                    .map(|index| self.template(|name| channel_name(name, index)))
                    .join(separator);
                let mut attribute =
                    NormalizedAttribute::new(format, channel_name(self.head.name, 0));
                for (index, magnitudes) in channels.into_iter().enumerate() {
                    for (slot, magnitude) in self.slots().zip(magnitudes) {
                        attribute = attribute.with(
                            channel_name(slot.name, index),
                            magnitude,
                            slot.dimension,
                        );
                    }
                }
                attribute
            }
            None => {
                let magnitudes = self.read(&value);
                let format = self.template(str::to_string);
                let mut attribute = NormalizedAttribute::new(format, self.head.name);
                for (slot, magnitude) in self.slots().zip(magnitudes) {
                    attribute = attribute.with(slot.name, magnitude, slot.dimension);
                }
                attribute
            }
        }
    }
}

const CURRENT: Dimension = Dimension::Current;
const VOLTAGE: Dimension = Dimension::Voltage;

static RDS_ON: Shape = Shape {
    head: Slot::new("Rds", Dimension::Resistance, read_resistance),
    conditions: &[
        Slot::new("Id", CURRENT, read_current),
        Slot::new("Vgs", VOLTAGE, read_voltage),
    ],
};

static VGS_THRESHOLD: Shape = Shape {
    head: Slot::new("Vgs", VOLTAGE, read_voltage),
    conditions: &[Slot::new("Id", CURRENT, read_current)],
};

static FORWARD_VOLTAGE: Shape = Shape {
    head: Slot::new("Vf", VOLTAGE, read_voltage),
    conditions: &[Slot::new("If", CURRENT, read_current)],
};

static CLAMPING_VOLTAGE: Shape = Shape {
    head: Slot::new("Vc", VOLTAGE, read_voltage),
    conditions: &[Slot::new("Ipp", CURRENT, read_current)],
};

static CHARGE_AT_VOLTAGE: Shape = Shape {
    head: Slot::new("Qg", Dimension::Charge, read_charge),
    conditions: &[Slot::new("Vgs", VOLTAGE, read_voltage)],
};

static CAPACITY_AT_VOLTAGE: Shape = Shape {
    head: Slot::new("capacity", Dimension::Capacitance, read_capacitance),
    conditions: &[Slot::new("voltage", VOLTAGE, read_voltage)],
};

static ESR: Shape = Shape {
    head: Slot::new("esr", Dimension::Resistance, read_resistance),
    conditions: &[Slot::new("frequency", Dimension::Frequency, read_frequency)],
};

static IMPEDANCE_AT_FREQUENCY: Shape = Shape {
    head: Slot::new("impedance", Dimension::Resistance, read_resistance),
    conditions: &[Slot::new("frequency", Dimension::Frequency, read_frequency)],
};

static RIPPLE_CURRENT: Shape = Shape {
    head: Slot::new("current", CURRENT, read_current),
    conditions: &[Slot::new("frequency", Dimension::Frequency, read_frequency)],
};

static VCE_ON: Shape = Shape {
    head: Slot::new("Vce", VOLTAGE, read_voltage),
    conditions: &[
        Slot::new("Vge", VOLTAGE, read_voltage),
        Slot::new("Ic", CURRENT, read_current),
    ],
};

/// `"2.5Ω @ 1A, 10V"`, or two channels separated by `;`.
pub fn rds_on_max_at_ids_at_vgs(value: &str) -> NormalizedAttribute {
    RDS_ON.parse(value)
}

/// `"2.5V @ 250uA"`.
pub fn vgs_threshold(value: &str) -> NormalizedAttribute {
    VGS_THRESHOLD.parse(value)
}

pub fn forward_voltage(value: &str) -> NormalizedAttribute {
    FORWARD_VOLTAGE.parse(value)
}

/// `"24V @ 5A"`. Vendors sometimes swap the two or write the current with a
/// `V`; both are read as current.
pub fn clamping_voltage(value: &str) -> NormalizedAttribute {
    CLAMPING_VOLTAGE.parse(value)
}

pub fn charge_at_voltage(value: &str) -> NormalizedAttribute {
    CHARGE_AT_VOLTAGE.parse(value)
}

pub fn capacity_at_voltage(value: &str) -> NormalizedAttribute {
    CAPACITY_AT_VOLTAGE.parse(value)
}

pub fn esr(value: &str) -> NormalizedAttribute {
    ESR.parse(value)
}

pub fn impedance_at_frequency(value: &str) -> NormalizedAttribute {
    IMPEDANCE_AT_FREQUENCY.parse(value)
}

pub fn ripple_current(value: &str) -> NormalizedAttribute {
    RIPPLE_CURRENT.parse(value)
}

/// `"1.7V @ 15V, 10A"`.
pub fn vce_on_max(value: &str) -> NormalizedAttribute {
    VCE_ON.parse(value)
}
