//! Naming rules and the table that holds them
//!
//! ```text
//! rule files ──► RuleTableBuilder ──finish()──► RuleTable (read-only)
//!                  │                              │
//!                  ├─ NamingRule (template,       ├─ rules in declaration order
//!                  │   required effect set)       ├─ descriptor categories by index
//!                  └─ DescriptorCategory          └─ potency calibrations
//! ```

mod table;
mod template;

pub use table::{
    Calibration, Calibrations, CategoryDeclaration, CategoryIndex, DescriptorCategory,
    MAX_CALIBRATIONS, MAX_CATEGORIES, MAX_RULE_EFFECTS, MAX_RULES, MIN_RULE_EFFECTS, NamingRule,
    NamingSettings, RuleError, RuleTable, RuleTableBuilder,
};
pub use template::{NameTemplate, PLACEHOLDER, PlaceholderPosition, TemplateError};
