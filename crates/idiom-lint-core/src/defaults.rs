//! The ruleset shipped with the binary.

use crate::config::{ConfigFile, LoadError};

const DEFAULT_RULES: &str = include_str!("../data/defaults.yaml");

/// Decodes the embedded default ruleset.
///
/// # Errors
///
/// Returns an error if the embedded document fails to decode, which only
/// happens after a bad edit to `data/defaults.yaml`.
pub fn default_config() -> Result<ConfigFile, LoadError> {
    ConfigFile::parse("defaults.yaml", DEFAULT_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::build_settings;
    use crate::types::{Setting, Severity};

    #[test]
    fn shipped_rules_load_and_assemble() {
        let config = default_config().unwrap();
        let settings = build_settings(std::slice::from_ref(&config)).unwrap();
        assert!(!settings.is_empty());

        let rendered: Vec<String> = settings.iter().map(ToString::to_string).collect();
        assert!(rendered.iter().any(|s| s.contains("Use concatMap")));

        // The disabled group ships rules but contributes none.
        assert!(rendered.iter().all(|s| !s.contains("sequence")));

        for setting in &settings {
            if let Setting::Match(rule) = setting {
                assert!(
                    !rule.scope.is_empty(),
                    "{} should carry the base imports",
                    rule.name
                );
            }
        }
    }

    #[test]
    fn shipped_rules_span_the_severity_range() {
        let config = default_config().unwrap();
        let settings = build_settings(std::slice::from_ref(&config)).unwrap();
        for severity in [Severity::Ignore, Severity::Suggest, Severity::Warn, Severity::Error] {
            assert!(
                settings.iter().any(|s| s.severity() == severity),
                "no {severity} rule in the shipped set"
            );
        }
    }
}
