//! Effect identifier parsing and resolution
//!
//! Rule files name required effects either by editor ID
//! (`AlchRestoreHealth`) or by plugin and hex local ID
//! (`Skyrim.esm|3EB15`). Resolution happens once, at load time.

use thiserror::Error;

use crate::host::{FormId, FormLookup, FormRecord};

const SEPARATOR: char = '|';

/// A parsed, not yet resolved, effect identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectIdentifier<'a> {
    EditorId(&'a str),
    FormKey { plugin: &'a str, local_id: u32 },
}

impl<'a> EffectIdentifier<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, IdentifierError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }

        match trimmed.matches(SEPARATOR).count() {
            0 => Ok(Self::EditorId(trimmed)),
            1 => {
                let (plugin, id) = trimmed.split_once(SEPARATOR).unwrap_or((trimmed, ""));
                let plugin = plugin.trim();
                if plugin.is_empty() {
                    return Err(IdentifierError::MissingPlugin(raw.to_string()));
                }
                let local_id = parse_hex(id.trim()).ok_or_else(|| IdentifierError::InvalidHex {
                    identifier: raw.to_string(),
                    value: id.trim().to_string(),
                })?;
                Ok(Self::FormKey { plugin, local_id })
            }
            _ => Err(IdentifierError::TooManySeparators(raw.to_string())),
        }
    }

    fn lookup(&self, lookup: &dyn FormLookup) -> Option<FormRecord> {
        match *self {
            Self::EditorId(editor_id) => lookup.lookup_editor_id(editor_id),
            Self::FormKey { plugin, local_id } => lookup.lookup_form(plugin, local_id),
        }
    }
}

fn parse_hex(value: &str) -> Option<u32> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Resolve an identifier to a magic effect form ID
pub fn resolve_effect(raw: &str, lookup: &dyn FormLookup) -> Result<FormId, IdentifierError> {
    let identifier = EffectIdentifier::parse(raw)?;
    let record = identifier
        .lookup(lookup)
        .ok_or_else(|| IdentifierError::NotFound(raw.to_string()))?;

    if !record.is_effect() {
        return Err(IdentifierError::NotAnEffect {
            identifier: raw.to_string(),
            form_id: record.form_id,
            editor_id: record.editor_id.unwrap_or_default(),
        });
    }

    Ok(record.form_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("empty effect identifier")]
    Empty,

    #[error("\"{0}\" has more than one '|' separator")]
    TooManySeparators(String),

    #[error("\"{0}\" is missing the plugin name before '|'")]
    MissingPlugin(String),

    #[error("\"{identifier}\" has an invalid hex form ID \"{value}\"")]
    InvalidHex { identifier: String, value: String },

    #[error("failed to load ID \"{0}\"")]
    NotFound(String),

    #[error("\"{identifier}\" resolved to form {form_id} (\"{editor_id}\"), which is not a magic effect")]
    NotAnEffect {
        identifier: String,
        form_id: FormId,
        editor_id: String,
    },
}
