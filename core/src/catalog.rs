//! In-memory form catalog
//!
//! A [`FormLookup`] backed by a plain list of forms, loaded from a JSON or
//! TOML file. Used by the validator and by tests in place of the game's
//! data handler.
//!
//! ```toml
//! [[form]]
//! form_id = 0x0003EB15
//! plugin = "Skyrim.esm"
//! kind = "magic_effect"
//! editor_id = "AlchRestoreHealth"
//! ```

use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::files::{FileError, read_definition};
use crate::host::{FormId, FormKind, FormLookup, FormRecord};

/// One form as listed in a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogForm {
    /// Full form ID (load-order byte included)
    pub form_id: FormId,

    /// Plugin file that defines the form
    pub plugin: String,

    #[serde(default)]
    pub kind: FormKind,

    #[serde(default)]
    pub editor_id: Option<String>,
}

impl CatalogForm {
    fn record(&self) -> FormRecord {
        FormRecord {
            form_id: self.form_id,
            kind: self.kind,
            editor_id: self.editor_id.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "form", alias = "forms")]
    forms: Vec<CatalogForm>,
}

/// Forms indexed for lookup by editor ID and by plugin-local ID
#[derive(Debug, Clone, Default)]
pub struct FormCatalog {
    forms: Vec<CatalogForm>,
    /// Lowercase editor ID -> index into `forms`
    editor_index: HashMap<String, usize>,
}

impl FormCatalog {
    pub fn new(forms: Vec<CatalogForm>) -> Self {
        let mut editor_index = HashMap::new();
        for (i, form) in forms.iter().enumerate() {
            if let Some(editor_id) = &form.editor_id {
                // Keep the first form registered under an editor ID
                editor_index.entry(editor_id.to_lowercase()).or_insert(i);
            }
        }
        Self { forms, editor_index }
    }

    /// Load a catalog from a JSON or TOML file
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let file: CatalogFile = read_definition(path)?;
        tracing::info!(forms = file.forms.len(), "Loaded form catalog");
        Ok(Self::new(file.forms))
    }

    pub fn forms(&self) -> &[CatalogForm] {
        &self.forms
    }

    /// Get a form by its full form ID
    pub fn get(&self, form_id: FormId) -> Option<&CatalogForm> {
        self.forms.iter().find(|form| form.form_id == form_id)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl FormLookup for FormCatalog {
    fn lookup_editor_id(&self, editor_id: &str) -> Option<FormRecord> {
        self.editor_index
            .get(&editor_id.to_lowercase())
            .map(|&i| self.forms[i].record())
    }

    fn lookup_form(&self, plugin: &str, local_id: u32) -> Option<FormRecord> {
        let local_id = local_id & 0x00FF_FFFF;
        self.forms
            .iter()
            .find(|form| {
                form.plugin.eq_ignore_ascii_case(plugin) && form.form_id.local_id() == local_id
            })
            .map(CatalogForm::record)
    }
}
