//! Structured file reading
//!
//! Rule files, form catalogs and sample item lists may be written as JSON
//! or TOML. The format is chosen by file extension.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Extensions recognized as definition files (compared case-insensitively)
pub const RECOGNIZED_EXTENSIONS: [&str; 2] = ["json", "toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("json") {
        Some(Format::Json)
    } else if ext.eq_ignore_ascii_case("toml") {
        Some(Format::Toml)
    } else {
        None
    }
}

/// Whether a path has a recognized definition file extension
pub fn is_definition_file(path: &Path) -> bool {
    format_of(path).is_some()
}

/// File name for diagnostics, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and deserialize a JSON or TOML file
pub fn read_definition<T: DeserializeOwned>(path: &Path) -> Result<T, FileError> {
    let format = format_of(path).ok_or_else(|| FileError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let contents = fs::read_to_string(path).map_err(|e| FileError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_definition(&contents, format, path)
}

fn parse_definition<T: DeserializeOwned>(
    contents: &str,
    format: Format,
    path: &Path,
) -> Result<T, FileError> {
    match format {
        Format::Json => serde_json::from_str(contents).map_err(|e| FileError::Json {
            path: path.to_path_buf(),
            source: e,
        }),
        Format::Toml => toml::from_str(contents).map_err(|e| FileError::Toml {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Errors that abort reading a single file
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("TOML error in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{path:?} is neither a .json nor a .toml file")]
    UnsupportedFormat { path: PathBuf },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Json { path, .. }
            | Self::Toml { path, .. }
            | Self::UnsupportedFormat { path } => path,
        }
    }
}
