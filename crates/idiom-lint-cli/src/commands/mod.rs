//! CLI subcommand implementations.

pub mod check;
pub mod output;
pub mod show;

use idiom_lint_core::{default_config, ConfigFile};
use miette::Result;
use std::path::PathBuf;

/// Loads documents in order, the embedded ruleset first when requested.
pub(crate) fn load_files(paths: &[PathBuf], builtin: bool) -> Result<Vec<ConfigFile>> {
    let mut files = Vec::with_capacity(paths.len() + usize::from(builtin));
    if builtin {
        files.push(default_config()?);
    }
    for path in paths {
        files.push(ConfigFile::from_file(path)?);
    }
    Ok(files)
}
