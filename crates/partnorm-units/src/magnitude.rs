use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest integral value that survives an `f64` -> `i64` round trip.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A parsed number, or the marker for "present but unreadable".
///
/// On the wire a number is a plain JSON number and the marker is the string
/// `"NaN"`, which is what downstream consumers already key on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    Number(f64),
    NotANumber,
}

impl Magnitude {
    pub const NAN_MARKER: &'static str = "NaN";

    /// Wraps a float, mapping non-finite results to the marker.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Magnitude::Number(value)
        } else {
            Magnitude::NotANumber
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Magnitude::Number(value) => Some(value),
            Magnitude::NotANumber => None,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Magnitude::NotANumber)
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Magnitude::Number(value) => Magnitude::from_f64(f(value)),
            Magnitude::NotANumber => Magnitude::NotANumber,
        }
    }

    /// Total order for sorting tables: numbers ascending, markers last.
    pub fn total_cmp_nan_last(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Magnitude::Number(a), Magnitude::Number(b)) => a.total_cmp(b),
            (Magnitude::Number(_), Magnitude::NotANumber) => Ordering::Less,
            (Magnitude::NotANumber, Magnitude::Number(_)) => Ordering::Greater,
            (Magnitude::NotANumber, Magnitude::NotANumber) => Ordering::Equal,
        }
    }
}

impl From<Option<f64>> for Magnitude {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Magnitude::NotANumber, Magnitude::from_f64)
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::Number(value) => write!(f, "{}", value),
            Magnitude::NotANumber => f.write_str(Self::NAN_MARKER),
        }
    }
}

impl Serialize for Magnitude {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Magnitude::Number(value) if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER => {
                serializer.serialize_i64(value as i64)
            }
            Magnitude::Number(value) => serializer.serialize_f64(value),
            Magnitude::NotANumber => serializer.serialize_str(Self::NAN_MARKER),
        }
    }
}

struct MagnitudeVisitor;

impl Visitor<'_> for MagnitudeVisitor {
    type Value = Magnitude;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or the string \"NaN\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Magnitude::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Magnitude::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Magnitude::from_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == Magnitude::NAN_MARKER {
            Ok(Magnitude::NotANumber)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Magnitude {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MagnitudeVisitor)
    }
}
