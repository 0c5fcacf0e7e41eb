//! brewname core
//!
//! Renames crafted consumables by matching their effect set against a
//! user-authored rule table.
//!
//! ```text
//! rule directory ──load_rule_table()──► RuleTable ──► NamingEngine::try_rename(item)
//!                                                          │
//!                                     potency::estimate ◄──┘
//! ```

pub mod catalog;
pub mod files;
pub mod hook;
pub mod host;
pub mod identifier;
pub mod loader;
pub mod naming;
pub mod potency;
pub mod rules;

#[cfg(test)]
mod naming_tests;

// Re-exports for convenience
pub use catalog::FormCatalog;
pub use hook::RenameHook;
pub use host::{CreatedItem, FormId, FormKind, FormLookup, FormRecord, ItemEffect, PowerScaling};
pub use loader::{LoadError, LoadReport, load_rule_table};
pub use naming::NamingEngine;
pub use rules::{RuleTable, RuleTableBuilder};
