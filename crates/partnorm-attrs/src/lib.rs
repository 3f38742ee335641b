//! Normalization of free-text component attributes.
//!
//! Vendor catalogs describe parameters with an open-ended vocabulary of
//! attribute names and value dialects (`"10K"`, `"0.5Ω@1A,12V"`, `"1.8~3.3V"`,
//! `"-"`). This crate maps every attribute name onto a canonical key
//! ([`normalize_key`]), picks the value parser registered for that key
//! ([`dispatch`]) and produces a [`NormalizedAttribute`]: a display template,
//! the name of its headline sub-value and typed `[value, dimension]` pairs.
//!
//! Parsing never fails a component. Unreadable numbers become
//! [`Magnitude::NotANumber`](partnorm_units::Magnitude::NotANumber) and a
//! parser that rejects its input is replaced by a verbatim string attribute.

pub mod attribute;
pub mod description;
pub mod dispatch;
pub mod error;
pub mod keys;
pub mod normalize;
pub mod parsers;
pub mod raw;

pub use attribute::{AttributeValue, NormalizedAttribute};
pub use description::extract_from_description;
pub use dispatch::{ValueParser, dispatch, dispatch_value, dispatch_with, parser_for};
pub use error::AttributeError;
pub use keys::normalize_key;
pub use normalize::{
    DefaultHooks, NormalizeHooks, RawAttributes, canonical_slots, normalize_attributes,
    normalize_attributes_with, weak_update,
};
pub use partnorm_units::{Dimension, Magnitude};
