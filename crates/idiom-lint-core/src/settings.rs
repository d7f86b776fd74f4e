//! Settings assembly: from decoded documents to the active rule list.

use crate::ast::Import;
use crate::config::model::{ConfigEntry, Group, Package};
use crate::config::ConfigFile;
use crate::scope::{resolve_scope, ResolveError};
use crate::types::Setting;
use std::collections::HashMap;

/// Flattens decoded documents into the final rule list.
///
/// Rules keep document order within and across files. A named group is
/// dropped, every occurrence of it, when the last definition of that name
/// says `enabled: false`; anonymous groups always contribute. Each match
/// rule receives the scope resolved from its group's imports.
///
/// # Errors
///
/// Returns an error if an enabled group imports an unknown package.
pub fn build_settings(files: &[ConfigFile]) -> Result<Vec<Setting>, ResolveError> {
    let mut packages: Vec<&Package> = Vec::new();
    let mut groups: Vec<&Group> = Vec::new();
    for file in files {
        for entry in &file.entries {
            match entry {
                ConfigEntry::Package(package) => packages.push(package),
                ConfigEntry::Group(group) => groups.push(group),
            }
        }
    }

    // Same-named packages merge; later definitions append their modules.
    let mut modules: HashMap<String, Vec<Import>> = HashMap::new();
    for package in &packages {
        modules
            .entry(package.name.clone())
            .or_default()
            .extend(package.modules.iter().cloned());
    }

    // The last definition of a group name decides for all its occurrences.
    let mut enabled: HashMap<&str, bool> = HashMap::new();
    for group in &groups {
        enabled.insert(group.name.as_str(), group.enabled);
    }

    let mut settings = Vec::new();
    for group in &groups {
        if !group.is_anonymous() && enabled.get(group.name.as_str()) == Some(&false) {
            tracing::debug!(group = %group.name, "skipping disabled group");
            continue;
        }
        let scope = resolve_scope(&group.name, &group.imports, &modules)?;
        for rule in &group.rules {
            settings.push(match rule {
                Setting::Match(rule) => Setting::Match(rule.clone().with_scope(scope.clone())),
                Setting::Classify(rule) => Setting::Classify(rule.clone()),
            });
        }
    }
    tracing::debug!(
        files = files.len(),
        packages = packages.len(),
        groups = groups.len(),
        settings = settings.len(),
        "assembled settings"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchRule;

    fn config(label: &str, text: &str) -> ConfigFile {
        ConfigFile::parse(label, text).unwrap()
    }

    fn rule_names(settings: &[Setting]) -> Vec<&str> {
        settings
            .iter()
            .map(|s| match s {
                Setting::Match(rule) => rule.name.as_str(),
                Setting::Classify(rule) => rule.rule_name.as_str(),
            })
            .collect()
    }

    fn match_rule(setting: &Setting) -> &MatchRule {
        match setting {
            Setting::Match(rule) => rule,
            Setting::Classify(_) => panic!("expected a match rule"),
        }
    }

    // -- Ordering --

    #[test]
    fn document_order_is_preserved_across_files() {
        let first = config(
            "a.yaml",
            r"
- group: default
  rules:
    - warn: {lhs: id x, rhs: x, name: first}
    - warn: {lhs: not (not x), rhs: x, name: second}
",
        );
        let second = config(
            "b.yaml",
            "- warn: {lhs: concat (map f x), rhs: concatMap f x, name: third}",
        );

        let settings = build_settings(&[first, second]).unwrap();
        assert_eq!(rule_names(&settings), ["first", "second", "third"]);
    }

    // -- Enablement --

    #[test]
    fn disabling_a_group_drops_every_occurrence() {
        let file = config(
            "rules.yaml",
            r"
- group: extras
  rules:
    - warn: {lhs: id x, rhs: x, name: first}
- group: extras
  enabled: false
",
        );
        assert!(build_settings(&[file]).unwrap().is_empty());
    }

    #[test]
    fn a_later_enabled_definition_revives_earlier_ones() {
        let file = config(
            "rules.yaml",
            r"
- group: extras
  enabled: false
- group: extras
  rules:
    - warn: {lhs: id x, rhs: x, name: revived}
",
        );
        let settings = build_settings(&[file]).unwrap();
        assert_eq!(rule_names(&settings), ["revived"]);
    }

    #[test]
    fn anonymous_groups_always_contribute() {
        let file = config(
            "rules.yaml",
            r"
- group: noisy
  enabled: false
  rules:
    - warn: {lhs: id x, rhs: x, name: dropped}
- suggest: {lhs: not (not x), rhs: x, name: kept}
",
        );
        let settings = build_settings(&[file]).unwrap();
        assert_eq!(rule_names(&settings), ["kept"]);
    }

    // -- Packages and scopes --

    #[test]
    fn same_named_packages_merge_in_order() {
        let file = config(
            "rules.yaml",
            r"
- package: base
  modules:
    - import Data.List
- package: base
  modules:
    - import Data.Maybe
- group: default
  imports:
    - package base
  rules:
    - warn: {lhs: id x, rhs: x}
",
        );
        let settings = build_settings(&[file]).unwrap();
        let rule = match_rule(&settings[0]);
        let modules: Vec<&str> = rule
            .scope
            .imports()
            .iter()
            .map(|i| i.module.as_str())
            .collect();
        assert_eq!(modules, ["Data.List", "Data.Maybe"]);
    }

    #[test]
    fn packages_defined_in_a_later_file_still_resolve() {
        let rules = config(
            "rules.yaml",
            r"
- group: default
  imports:
    - package shared
  rules:
    - warn: {lhs: id x, rhs: x}
",
        );
        let shared = config(
            "shared.yaml",
            r"
- package: shared
  modules:
    - import qualified Data.Map as Map
",
        );

        let settings = build_settings(&[rules, shared]).unwrap();
        let rule = match_rule(&settings[0]);
        assert_eq!(rule.scope.imports().len(), 1);
        assert_eq!(rule.scope.imports()[0].module, "Data.Map");
    }

    #[test]
    fn unknown_package_references_fail() {
        let file = config(
            "rules.yaml",
            r"
- group: default
  imports:
    - package nonexistent
  rules:
    - warn: {lhs: id x, rhs: x}
",
        );
        let err = build_settings(&[file]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnknownPackage { group, package }
                if group == "default" && package == "nonexistent"
        ));
    }

    #[test]
    fn classifications_pass_through_unchanged() {
        let file = config(
            "rules.yaml",
            r"
- group: default
  imports:
    - import Data.List
  rules:
    - warn: {lhs: id x, rhs: x}
    - ignore: {name: Redundant id, within: parseDoc}
",
        );
        let settings = build_settings(&[file]).unwrap();
        assert_eq!(settings.len(), 2);
        assert!(!match_rule(&settings[0]).scope.is_empty());
        assert!(matches!(
            &settings[1],
            Setting::Classify(rule)
                if rule.rule_name == "Redundant id" && rule.decl == "parseDoc"
        ));
    }
}
