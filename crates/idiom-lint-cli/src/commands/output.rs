//! Shared output formatting for assembled settings.

use idiom_lint_core::{Setting, Severity};
use miette::{IntoDiagnostic, Result};

use crate::OutputFormat;

/// Prints the assembled settings in the specified format.
pub fn print(settings: &[Setting], files: usize, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(settings, files),
        OutputFormat::Json => return print_json(settings),
    }
    Ok(())
}

/// Prints the per-severity summary line.
pub fn print_summary(settings: &[Setting], files: usize) {
    let (errors, warnings, suggestions, ignores) = count_by_severity(settings);

    // An empty assembly is legal but usually means a disabled group ate
    // everything, so it gets the cautionary color.
    let color = if settings.is_empty() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Assembled {} setting(s) from {} document(s): {} error, {} warn, {} suggest, {} ignore\x1b[0m",
        color,
        settings.len(),
        files,
        errors,
        warnings,
        suggestions,
        ignores,
    );
}

fn print_text(settings: &[Setting], files: usize) {
    for setting in settings {
        let line = setting.to_string();
        let keyword = setting.severity().to_string();
        let paint = match setting.severity() {
            Severity::Error => "\x1b[31m",
            Severity::Warn => "\x1b[33m",
            Severity::Suggest => "\x1b[34m",
            Severity::Ignore => "\x1b[2m",
        };

        // Every rendered setting starts with its severity keyword.
        let rest = line.strip_prefix(keyword.as_str()).unwrap_or(&line);
        println!("{paint}{keyword}\x1b[0m{rest}");
    }

    if !settings.is_empty() {
        println!();
    }
    print_summary(settings, files);
}

fn print_json(settings: &[Setting]) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

fn count_by_severity(settings: &[Setting]) -> (usize, usize, usize, usize) {
    let mut errors = 0;
    let mut warnings = 0;
    let mut suggestions = 0;
    let mut ignores = 0;
    for setting in settings {
        match setting.severity() {
            Severity::Error => errors += 1,
            Severity::Warn => warnings += 1,
            Severity::Suggest => suggestions += 1,
            Severity::Ignore => ignores += 1,
        }
    }
    (errors, warnings, suggestions, ignores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idiom_lint_core::{build_settings, ConfigFile};

    #[test]
    fn counts_split_by_severity() {
        let config = ConfigFile::parse(
            "rules.yaml",
            "[{warn: {lhs: id x, rhs: x}}, {error: {lhs: fromJust x, rhs: x}}, {ignore: {name: A}}]",
        )
        .unwrap();
        let settings = build_settings(std::slice::from_ref(&config)).unwrap();

        assert_eq!(count_by_severity(&settings), (1, 1, 0, 1));
    }
}
