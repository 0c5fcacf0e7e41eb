//! Rule table loading
//!
//! Rules are loaded from one directory:
//! - **Primary**: `UserSettings.json` (or `.toml`), read first. The only
//!   file whose `useRomanNumerals` flag counts, and the one whose
//!   descriptor categories win over every other file's.
//! - **Auxiliary**: every other `.json`/`.toml` file, read in file name
//!   order so category resolution does not depend on directory order.
//!
//! Nothing here aborts the whole load. A file that cannot be read or parsed
//! is skipped; a bad entry inside a readable file skips just that entry.
//! Every problem is logged as it is found and collected in the
//! [`LoadReport`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use brewname_types::{CalibrationEntry, Lenient, RuleEntry, RuleFile};
use thiserror::Error;

use crate::files::{FileError, display_name, is_definition_file, read_definition};
use crate::host::FormLookup;
use crate::identifier::{IdentifierError, resolve_effect};
use crate::rules::{
    Calibration, CategoryDeclaration, MAX_RULE_EFFECTS, MAX_RULES, MIN_RULE_EFFECTS, NameTemplate,
    NamingRule, RuleError, RuleTable, RuleTableBuilder, TemplateError,
};

/// Primary settings file names, in order of preference
pub const PRIMARY_FILE_NAMES: [&str; 2] = ["UserSettings.json", "UserSettings.toml"];

/// Result of loading a rule directory
#[derive(Debug)]
pub struct LoadReport {
    pub table: RuleTable,
    /// Every problem found, in the order it was found
    pub issues: Vec<LoadError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileRole {
    Primary,
    Auxiliary,
}

/// Load every rule file in a directory into a [`RuleTable`]
pub fn load_rule_table(dir: &Path, lookup: &dyn FormLookup) -> LoadReport {
    let mut loader = Loader::new(lookup);

    let primary = find_primary_file(dir);
    match &primary {
        Some(path) => loader.load_file(path, FileRole::Primary),
        None => tracing::warn!(dir = %dir.display(), "Primary settings file not found, using defaults"),
    }

    match auxiliary_files(dir, primary.as_deref()) {
        Ok(listing) => {
            for source in listing.errors {
                loader.report(LoadError::DirectoryEntry {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            for path in listing.paths {
                loader.load_file(&path, FileRole::Auxiliary);
            }
        }
        Err(e) => loader.report(LoadError::Directory {
            path: dir.to_path_buf(),
            source: e,
        }),
    }

    loader.finish()
}

fn find_primary_file(dir: &Path) -> Option<PathBuf> {
    PRIMARY_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Auxiliary files found in a directory, plus entries that could not be read
#[derive(Debug, Default)]
struct Listing {
    paths: Vec<PathBuf>,
    errors: Vec<std::io::Error>,
}

/// Recognized files other than the primary one, sorted by file name
fn auxiliary_files(dir: &Path, primary: Option<&Path>) -> std::io::Result<Listing> {
    let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
    Ok(collect_auxiliary(entries, primary))
}

fn collect_auxiliary(
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
    primary: Option<&Path>,
) -> Listing {
    let mut listing = Listing::default();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() && is_definition_file(&path) && Some(path.as_path()) != primary {
                    listing.paths.push(path);
                }
            }
            Err(e) => listing.errors.push(e),
        }
    }
    listing.paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    listing
}

/// Get the default rule directory
pub fn default_rules_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("brewname").join("rules"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Loader
// ─────────────────────────────────────────────────────────────────────────────

struct Loader<'a> {
    lookup: &'a dyn FormLookup,
    builder: RuleTableBuilder,
    issues: Vec<LoadError>,
}

impl<'a> Loader<'a> {
    fn new(lookup: &'a dyn FormLookup) -> Self {
        Self {
            lookup,
            builder: RuleTableBuilder::new(),
            issues: Vec::new(),
        }
    }

    fn report(&mut self, error: LoadError) {
        tracing::error!(error = %error, "Rule loading problem");
        self.issues.push(error);
    }

    fn load_file(&mut self, path: &Path, role: FileRole) {
        let file_name = display_name(path);
        tracing::info!(file = %file_name, "Reading rule file");

        let file: RuleFile = match read_definition(path) {
            Ok(file) => file,
            Err(e) => {
                self.report(LoadError::File(e));
                return;
            }
        };

        match (role, file.use_roman_numerals) {
            (FileRole::Primary, Some(Lenient::Valid(enabled))) => {
                self.builder.set_use_roman_numerals(enabled);
                tracing::info!(enabled, "Read useRomanNumerals");
            }
            (FileRole::Primary, Some(Lenient::Invalid(_))) => {
                self.report(LoadError::InvalidSetting { file: file_name.clone() });
            }
            (FileRole::Primary, None) => {
                tracing::info!(file = %file_name, "useRomanNumerals not set, using descriptor words");
            }
            (FileRole::Auxiliary, Some(_)) => {
                tracing::warn!(file = %file_name, "useRomanNumerals is only read from the primary file");
            }
            (FileRole::Auxiliary, None) => {}
        }

        match file.effect_potencies {
            Some(entries) => self.read_calibrations(&file_name, entries),
            None => tracing::info!(file = %file_name, "\"effectPotencies\" not found"),
        }

        if let Some(categories) = file.descriptors {
            self.read_descriptors(&file_name, categories);
        }

        if let Some(rules) = file.potions {
            self.read_rules(&file_name, rules);
        }
    }

    fn read_calibrations(
        &mut self,
        file: &str,
        entries: BTreeMap<String, Lenient<CalibrationEntry>>,
    ) {
        for (effect, entry) in entries {
            match self.read_calibration(file, &effect, entry) {
                Ok(calibration) => tracing::info!(
                    effect = %effect,
                    min = calibration.min,
                    max = calibration.max,
                    "Loaded potency range"
                ),
                Err(e) => self.report(e),
            }
        }
    }

    fn read_calibration(
        &mut self,
        file: &str,
        effect: &str,
        entry: Lenient<CalibrationEntry>,
    ) -> Result<Calibration, LoadError> {
        let non_numeric = || LoadError::NonNumericBound {
            file: file.to_string(),
            effect: effect.to_string(),
        };

        let entry = entry.into_valid().ok_or_else(non_numeric)?;
        let bound = |value: Option<Lenient<f32>>, field: &'static str| match value {
            None => Err(LoadError::MissingBound {
                file: file.to_string(),
                effect: effect.to_string(),
                field,
            }),
            Some(Lenient::Valid(v)) if v.is_finite() => Ok(v),
            Some(_) => Err(non_numeric()),
        };
        let min = bound(entry.min, "min")?;
        let max = bound(entry.max, "max")?;

        let calibration = Calibration { min, max };
        self.builder
            .set_calibration(effect, calibration)
            .map_err(|source| LoadError::Calibration {
                file: file.to_string(),
                effect: effect.to_string(),
                source,
            })?;
        Ok(calibration)
    }

    fn read_descriptors(
        &mut self,
        file: &str,
        categories: BTreeMap<String, Lenient<Vec<String>>>,
    ) {
        tracing::trace!(file, "Reading descriptors");
        for (name, words) in categories {
            let Some(words) = words.into_valid() else {
                self.report(LoadError::MalformedCategory {
                    file: file.to_string(),
                    category: name,
                });
                continue;
            };
            match self.builder.declare_category(&name, words) {
                Ok(CategoryDeclaration::Created(index)) => {
                    tracing::info!(category = %name, index = index.get(), "Read descriptor category");
                }
                Ok(CategoryDeclaration::Filled(index)) => {
                    tracing::info!(category = %name, index = index.get(), "Filled descriptor category");
                }
                Ok(CategoryDeclaration::Ignored(_)) => {
                    tracing::info!(category = %name, file, "Ignoring duplicate category definition");
                }
                Err(source) => self.report(LoadError::Category {
                    file: file.to_string(),
                    category: name,
                    source,
                }),
            }
        }
    }

    fn read_rules(&mut self, file: &str, entries: Vec<Lenient<RuleEntry>>) {
        for (position, entry) in entries.into_iter().enumerate() {
            if let Err(e) = self.read_rule(file, position + 1, entry) {
                self.report(e);
            }
        }
        tracing::info!(file, total = self.builder.rule_count(), "Rules loaded");
    }

    fn read_rule(
        &mut self,
        file: &str,
        position: usize,
        entry: Lenient<RuleEntry>,
    ) -> Result<(), LoadError> {
        if self.builder.rule_count() >= MAX_RULES {
            return Err(LoadError::Rule {
                file: file.to_string(),
                rule: format!("#{position}"),
                source: RuleError::TooManyRules,
            });
        }

        let entry = entry.into_valid().ok_or_else(|| LoadError::MalformedRule {
            file: file.to_string(),
            position,
        })?;
        let name = entry.name().ok_or_else(|| LoadError::MissingName {
            file: file.to_string(),
            position,
        })?;
        let rule_error = |source: RuleError| LoadError::Rule {
            file: file.to_string(),
            rule: name.to_string(),
            source,
        };

        let template = NameTemplate::parse(name).map_err(|source| LoadError::Template {
            file: file.to_string(),
            rule: name.to_string(),
            source,
        })?;

        let identifiers = entry.effects().ok_or_else(|| LoadError::MissingEffects {
            file: file.to_string(),
            rule: name.to_string(),
        })?;
        if !(MIN_RULE_EFFECTS..=MAX_RULE_EFFECTS).contains(&identifiers.len()) {
            return Err(rule_error(RuleError::EffectCount(identifiers.len())));
        }

        let effects = identifiers
            .iter()
            .map(|id| resolve_effect(id, self.lookup))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| LoadError::Effect {
                file: file.to_string(),
                rule: name.to_string(),
                source,
            })?;

        let rule = NamingRule::new(template, effects).map_err(rule_error)?;

        let category = match &entry.descriptor {
            Some(Lenient::Valid(category)) => {
                Some(self.builder.reference_category(category).map_err(rule_error)?)
            }
            Some(Lenient::Invalid(_)) => {
                return Err(LoadError::InvalidDescriptor {
                    file: file.to_string(),
                    rule: name.to_string(),
                });
            }
            None => {
                tracing::warn!(rule = %name, "Rule has no \"descriptor\", '{{}}' will be removed");
                None
            }
        };

        let rule = rule.with_category(category);
        let effect_list = rule
            .required_effects()
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.builder.push_rule(rule).map_err(rule_error)?;
        tracing::info!(rule = %name, effects = %effect_list, "Read rule");
        Ok(())
    }

    fn finish(self) -> LoadReport {
        let table = self.builder.finish();

        for category in table.categories().iter().filter(|c| c.is_empty()) {
            tracing::warn!(
                category = %category.name(),
                "Descriptors not found for category, '{{}}' will be stripped from names"
            );
        }
        tracing::info!(
            rules = table.rules().len(),
            categories = table.categories().iter().filter(|c| !c.is_empty()).count(),
            potencies = table.calibrations().len(),
            issues = self.issues.len(),
            "Rule table loaded"
        );

        LoadReport {
            table,
            issues: self.issues,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// A problem found while loading rules. None of these abort the load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to list rule directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read an entry of rule directory {path:?}: {source}")]
    DirectoryEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    File(#[from] FileError),

    #[error("{file}: \"useRomanNumerals\" must be true or false")]
    InvalidSetting { file: String },

    #[error("{file}: rule #{position} is not an object")]
    MalformedRule { file: String, position: usize },

    #[error("{file}: rule #{position} has no readable \"name\"")]
    MissingName { file: String, position: usize },

    #[error("{file}: rule \"{rule}\" has an invalid name: {source}")]
    Template {
        file: String,
        rule: String,
        source: TemplateError,
    },

    #[error("{file}: rule \"{rule}\" has a \"descriptor\" that is not a category name")]
    InvalidDescriptor { file: String, rule: String },

    #[error("{file}: rule \"{rule}\" has no readable \"effects\" list")]
    MissingEffects { file: String, rule: String },

    #[error("{file}: skipping rule \"{rule}\": {source}")]
    Effect {
        file: String,
        rule: String,
        source: IdentifierError,
    },

    #[error("{file}: skipping rule \"{rule}\": {source}")]
    Rule {
        file: String,
        rule: String,
        source: RuleError,
    },

    #[error("{file}: potency entry \"{effect}\" is missing \"{field}\"")]
    MissingBound {
        file: String,
        effect: String,
        field: &'static str,
    },

    #[error("{file}: potency entry \"{effect}\" does not have numeric min/max values")]
    NonNumericBound { file: String, effect: String },

    #[error("{file}: skipping potency entry \"{effect}\": {source}")]
    Calibration {
        file: String,
        effect: String,
        source: RuleError,
    },

    #[error("{file}: descriptor category \"{category}\" is not a list of words")]
    MalformedCategory { file: String, category: String },

    #[error("{file}: skipping descriptor category \"{category}\": {source}")]
    Category {
        file: String,
        category: String,
        source: RuleError,
    },
}
