//! Rule definition file types
//!
//! A rule directory holds one primary settings file and any number of
//! auxiliary rule files. Every file shares the shape below and may declare
//! any subset of the three sections. Only the primary file's
//! `useRomanNumerals` flag is honored.
//!
//! ```json
//! {
//!   "useRomanNumerals": false,
//!   "effectPotencies": { "AlchRestoreHealth": { "min": 5, "max": 100 } },
//!   "descriptors": { "Restore": ["Weak", "", "Potent"] },
//!   "potions": [
//!     { "name": "Draught of {}Vigor", "effects": ["AlchRestoreHealth", "Skyrim.esm|3EB15"], "descriptor": "Restore" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::IgnoredAny;

// ═══════════════════════════════════════════════════════════════════════════
// Lenient values
// ═══════════════════════════════════════════════════════════════════════════

/// A value that was either readable as `T` or present with the wrong type.
///
/// Wrong types inside a single entry must only reject that entry, so the
/// entry fields are wrapped in this instead of failing the whole file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Lenient<T> {
    /// The value, if it had the expected type
    pub fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    pub fn into_valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Entries
// ═══════════════════════════════════════════════════════════════════════════

/// One naming rule as authored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleEntry {
    /// Name template with at most one `{}` marker
    pub name: Option<Lenient<String>>,

    /// Editor IDs or `<plugin>|<hex id>` pairs
    pub effects: Option<Lenient<Vec<String>>>,

    /// Descriptor category name
    pub descriptor: Option<Lenient<String>>,
}

impl RuleEntry {
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Lenient::valid).map(String::as_str)
    }

    pub fn effects(&self) -> Option<&[String]> {
        self.effects.as_ref().and_then(Lenient::valid).map(Vec::as_slice)
    }

    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_ref().and_then(Lenient::valid).map(String::as_str)
    }
}

/// Potency calibration for one effect
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalibrationEntry {
    pub min: Option<Lenient<f32>>,
    pub max: Option<Lenient<f32>>,
}

// ═══════════════════════════════════════════════════════════════════════════
// File Structure
// ═══════════════════════════════════════════════════════════════════════════

/// Root structure of a rule definition file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFile {
    /// Primary file only: append roman numerals instead of descriptor words
    pub use_roman_numerals: Option<Lenient<bool>>,

    /// Naming rules in declaration order
    pub potions: Option<Vec<Lenient<RuleEntry>>>,

    /// Effect name -> calibration range
    pub effect_potencies: Option<BTreeMap<String, Lenient<CalibrationEntry>>>,

    /// Category name -> ordered potency-band words
    pub descriptors: Option<BTreeMap<String, Lenient<Vec<String>>>>,
}
