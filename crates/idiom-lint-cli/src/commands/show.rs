//! Show command implementation.

use idiom_lint_core::build_settings;
use miette::{miette, Result};
use std::path::PathBuf;

use crate::OutputFormat;

/// Runs the show command.
pub fn run(files: &[PathBuf], builtin: bool, format: OutputFormat) -> Result<()> {
    if files.is_empty() && !builtin {
        return Err(miette!(
            help = "pass document paths, or --builtin for the shipped rules",
            "nothing to show"
        ));
    }

    let configs = super::load_files(files, builtin)?;
    let settings = build_settings(&configs)?;
    super::output::print(&settings, configs.len(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_show_nothing() {
        let err = run(&[], false, OutputFormat::Text).unwrap_err();
        assert_eq!(err.to_string(), "nothing to show");
    }

    #[test]
    fn shows_the_builtin_ruleset_alone() {
        assert!(run(&[], true, OutputFormat::Text).is_ok());
        assert!(run(&[], true, OutputFormat::Json).is_ok());
    }
}
