//! Check command implementation.

use idiom_lint_core::build_settings;
use miette::{miette, Result};
use std::path::{Path, PathBuf};

use crate::resolver::{self, RulesSource};

/// Runs the check command.
pub fn run(files: &[PathBuf]) -> Result<()> {
    let files = if files.is_empty() {
        discover_files()?
    } else {
        files.to_vec()
    };

    let configs = super::load_files(&files, false)?;
    let settings = build_settings(&configs)?;

    tracing::info!(
        "Checked {} document(s) assembling {} setting(s)",
        configs.len(),
        settings.len()
    );

    super::output::print_summary(&settings, configs.len());
    Ok(())
}

fn discover_files() -> Result<Vec<PathBuf>> {
    match resolver::discover(Path::new(".")) {
        RulesSource::Project(path) => Ok(vec![path]),
        RulesSource::Global(path) => {
            tracing::info!("Using global rules: {}", path.display());
            Ok(vec![path])
        }
        RulesSource::Missing => Err(miette!(
            help = "pass document paths, or create idiom-lint.yaml in the working directory",
            "no rule documents found"
        )),
    }
}
