//! brewname-validate - Check a rule directory against a form catalog.
//!
//! Loads the rule directory exactly as the game binding would, with a form
//! catalog file standing in for the game's data handler, then prints the
//! resulting rule table and every problem found.
//!
//! Usage:
//!   brewname-validate check  [--dir <DIR>] --catalog <FILE>
//!   brewname-validate rename [--dir <DIR>] --catalog <FILE> --items <FILE>

use std::path::PathBuf;
use std::process::ExitCode;

use brewname_core::files::read_definition;
use brewname_core::loader::default_rules_dir;
use brewname_core::{CreatedItem, FormCatalog, LoadReport, NamingEngine, load_rule_table};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Validate brewname rule files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Rule directory (defaults to <config dir>/brewname/rules)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Form catalog used to resolve effect identifiers (.json or .toml)
    #[arg(short, long)]
    catalog: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the rules and report the table and any problems
    Check {
        #[command(flatten)]
        source: Source,
    },
    /// Load the rules and rename a list of sample items
    Rename {
        #[command(flatten)]
        source: Source,

        /// Sample items (.json or .toml)
        #[arg(short, long)]
        items: PathBuf,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ItemsFile {
    #[serde(default, rename = "item", alias = "items")]
    items: Vec<CreatedItem>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If BREWNAME_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("BREWNAME_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load(source: &Source) -> Result<LoadReport, String> {
    let dir = match &source.dir {
        Some(dir) => dir.clone(),
        None => default_rules_dir().ok_or("No config directory available, pass --dir")?,
    };
    let catalog = FormCatalog::load(&source.catalog).map_err(|e| e.to_string())?;

    tracing::info!(dir = %dir.display(), "Loading rules");
    Ok(load_rule_table(&dir, &catalog))
}

fn print_table(report: &LoadReport) {
    let table = &report.table;

    println!(
        "Mode: {}",
        if table.settings().use_roman_numerals { "roman numerals" } else { "descriptor words" }
    );

    println!("\nRules ({}):", table.rules().len());
    for (i, rule) in table.rules().iter().enumerate() {
        let effects: Vec<String> = rule.required_effects().iter().map(|id| id.to_string()).collect();
        let category = rule
            .category()
            .and_then(|index| table.category(index))
            .map(|c| c.name())
            .unwrap_or("-");
        println!(
            "  {:>2}. \"{}\"  [{}]  descriptor: {}",
            i + 1,
            rule.template(),
            effects.join(", "),
            category
        );
    }

    println!("\nDescriptor categories ({}):", table.categories().len());
    for category in table.categories() {
        if category.is_empty() {
            println!("  {}: (no words, placeholder will be stripped)", category.name());
        } else {
            let words: Vec<String> = category.words().iter().map(|w| format!("{w:?}")).collect();
            println!("  {}: {}", category.name(), words.join(", "));
        }
    }

    let mut calibrations: Vec<_> = table.calibrations().iter().collect();
    calibrations.sort_by(|a, b| a.0.cmp(b.0));
    println!("\nEffect potencies ({}):", calibrations.len());
    for (name, cal) in calibrations {
        println!("  {name}: {} - {}", cal.min, cal.max);
    }

    println!("\nProblems ({}):", report.issues.len());
    for issue in &report.issues {
        println!("  {issue}");
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    match cli.command {
        Commands::Check { source } => {
            let report = load(&source)?;
            print_table(&report);
            Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Rename { source, items } => {
            let report = load(&source)?;
            let file: ItemsFile = read_definition(&items).map_err(|e| e.to_string())?;
            let engine = NamingEngine::new(&report.table);

            for item in &file.items {
                match engine.try_rename(item) {
                    Some(name) => println!("{} -> {}", item.name, name),
                    None => println!("{}: unchanged", item.name),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
