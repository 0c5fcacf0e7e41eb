//! Host collaborator types
//!
//! The host application owns form records and newly created items. The
//! renamer only ever sees them through the types below and the
//! [`FormLookup`] trait, so the core can be driven by the game binding or
//! by a plain [`FormCatalog`](crate::catalog::FormCatalog).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a host form record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub u32);

impl FormId {
    /// Form ID with the load-order byte masked off
    pub fn local_id(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Record type of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    MagicEffect,
    Ingredient,
    AlchemyItem,
    #[default]
    Other,
}

/// A resolved form record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    pub form_id: FormId,
    pub kind: FormKind,
    pub editor_id: Option<String>,
}

impl FormRecord {
    pub fn is_effect(&self) -> bool {
        self.kind == FormKind::MagicEffect
    }
}

/// Identifier resolution provided by the host
pub trait FormLookup {
    /// Look up a form by editor ID (e.g. `AlchRestoreHealth`)
    fn lookup_editor_id(&self, editor_id: &str) -> Option<FormRecord>;

    /// Look up a form by plugin file name and plugin-local ID
    fn lookup_form(&self, plugin: &str, local_id: u32) -> Option<FormRecord>;
}

/// Which effect property scales with the crafter's power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerScaling {
    Magnitude,
    Duration,
    /// Neither magnitude nor duration scales
    #[default]
    None,
}

/// One effect on a created item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    /// Base magic effect
    pub effect_id: FormId,

    /// Base effect editor ID, when the host can provide one
    #[serde(default)]
    pub editor_id: Option<String>,

    /// Base effect display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub scaling: PowerScaling,

    #[serde(default)]
    pub magnitude: f32,

    /// Duration in seconds
    #[serde(default)]
    pub duration: f32,

    /// In-game cost, used to rank effects on an item
    #[serde(default)]
    pub cost: f32,
}

impl ItemEffect {
    /// The value potency is measured from, if any
    pub fn scaled_value(&self) -> Option<f32> {
        match self.scaling {
            PowerScaling::Magnitude => Some(self.magnitude),
            PowerScaling::Duration => Some(self.duration),
            PowerScaling::None => None,
        }
    }
}

/// A newly created consumable handed over by the host's creation hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedItem {
    /// Display name; the only field the renamer writes
    pub name: String,

    #[serde(default, rename = "effect", alias = "effects")]
    pub effects: Vec<ItemEffect>,
}

impl CreatedItem {
    /// The effect the host ranks highest by cost (earliest wins ties)
    pub fn costliest_effect(&self) -> Option<&ItemEffect> {
        self.effects
            .iter()
            .reduce(|best, effect| if effect.cost > best.cost { effect } else { best })
    }
}
