use partnorm_units::{Dimension, Magnitude, read_length_mm};

use super::{is_placeholder, strip_notes};
use crate::NormalizedAttribute;

const SIZE_SEPARATORS: [char; 4] = ['x', 'X', '×', '*'];

/// Package outline `"3.2x1.6"` in millimetres, stored as `width`/`height` in
/// metres.
pub fn size_mm(value: &str) -> NormalizedAttribute {
    let value = strip_notes(value);
    let parts: Vec<&str> = value.split(SIZE_SEPARATORS).map(str::trim).collect();

    let (width, height) = match parts.as_slice() {
        [width, height] if !is_placeholder(&value) => (read_length_mm(width), read_length_mm(height)),
        _ => (Magnitude::NotANumber, Magnitude::NotANumber),
    };

    NormalizedAttribute::new("${width} x ${height}", "width")
        .with("width", width, Dimension::Length)
        .with("height", height, Dimension::Length)
}
