//! Shared types for brewname
//!
//! - [`config`]: the shape of a rule definition file
//! - [`formatting`]: potency band and roman numeral helpers

pub mod config;
pub mod formatting;

pub use config::{CalibrationEntry, Lenient, RuleEntry, RuleFile};
