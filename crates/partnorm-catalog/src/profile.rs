use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use partnorm_attrs::{NormalizeHooks, ValueParser, normalize_key, parser_for};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Profile validation error: {0}")]
    ValidationError(String),
}

/// Knobs for a normalization run, usually loaded from YAML:
///
/// ```yaml
/// version: 1
/// description_fallback: true
/// passthrough: ["Tolerance"]
/// drop: ["Basic/Extended"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizeProfile {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Mine descriptions for attributes the vendor left blank.
    #[serde(default = "default_true")]
    pub description_fallback: bool,
    /// Add `Basic/Extended` and `Package` to every attribute bag.
    #[serde(default = "default_true")]
    pub extra_attributes: bool,
    /// Canonical keys kept as verbatim text.
    #[serde(default)]
    pub passthrough: BTreeSet<String>,
    /// Canonical keys removed from the output.
    #[serde(default)]
    pub drop: BTreeSet<String>,
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for NormalizeProfile {
    fn default() -> Self {
        Self {
            version: default_version(),
            description_fallback: true,
            extra_attributes: true,
            passthrough: BTreeSet::new(),
            drop: BTreeSet::new(),
        }
    }
}

impl NormalizeProfile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ProfileError> {
        let profile: NormalizeProfile = serde_yaml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        if self.version != 1 {
            return Err(ProfileError::ValidationError(format!(
                "Unsupported profile version: {}",
                self.version
            )));
        }

        for key in self.passthrough.iter().chain(&self.drop) {
            let canonical = normalize_key(key);
            if &canonical != key {
                return Err(ProfileError::ValidationError(format!(
                    "'{}' is not a canonical attribute key, use '{}'",
                    key, canonical
                )));
            }
        }

        if let Some(key) = self.passthrough.intersection(&self.drop).next() {
            return Err(ProfileError::ValidationError(format!(
                "'{}' is listed in both passthrough and drop",
                key
            )));
        }

        Ok(())
    }
}

impl NormalizeHooks for NormalizeProfile {
    fn parser_for(&self, key: &str) -> ValueParser {
        if self.passthrough.contains(key) {
            ValueParser::Text
        } else {
            parser_for(key)
        }
    }

    fn keeps(&self, key: &str) -> bool {
        !self.drop.contains(key)
    }
}
