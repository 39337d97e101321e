use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Field separator used by the published dataset
pub const DEFAULT_SEPARATOR: &str = ",";

/// File name of the database inside the data directory
pub const DEFAULT_DB_FILE: &str = "pokedex.db";

/// Options controlling how a CSV file is read during a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Separator between fields; may be longer than one character
    pub separator: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl LoadOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

/// Resolve the database path used when none is given on the command line.
///
/// Creates the per-user data directory if it does not exist yet.
pub fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "pokedex-sqlite")
        .context("Could not determine data directory")?;
    let data_dir = proj_dirs.data_dir();

    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join(DEFAULT_DB_FILE))
}
