//! Decoding of document entries into typed records.
//!
//! The schema is lenient where authors benefit (a single value wherever an
//! array is expected, hints allowed outside any group) and strict where
//! silence would hide mistakes (unknown keys, malformed severity objects).

use crate::ast::{Expr, ExprKind, Name};
use crate::config::model::{ConfigEntry, Group, Package};
use crate::config::value::{DecodeError, DocValue};
use crate::parse;
use crate::scope::{GroupImport, Scope};
use crate::traverse::named_idents;
use crate::types::{word1, ClassifyRule, MatchRule, Note, Setting, Severity};

/// Name given to a rule when nothing better can be derived.
const DEFAULT_RULE_NAME: &str = "Use alternative";

/// Decodes one top-level document entry.
///
/// An entry is a package (has a `package` key), a group (has a `group`
/// key), or a bare hint, which gets wrapped in an anonymous always-enabled
/// group so everything downstream deals in groups only.
pub(crate) fn decode_entry(entry: &DocValue, file: &str) -> Result<ConfigEntry, DecodeError> {
    let keys = entry.keys()?;
    if keys.contains(&"package") {
        decode_package(entry, file).map(ConfigEntry::Package)
    } else if keys.contains(&"group") {
        decode_group(entry, file).map(ConfigEntry::Group)
    } else if keys.len() == 1 && Severity::from_keyword(keys[0]).is_some() {
        let rules = decode_rule(entry, file)?;
        Ok(ConfigEntry::Group(Group {
            name: String::new(),
            enabled: true,
            imports: Vec::new(),
            rules,
        }))
    } else {
        Err(entry.error("Expecting an object with a 'package' or 'group' key, or a hint"))
    }
}

fn decode_package(v: &DocValue, file: &str) -> Result<Package, DecodeError> {
    v.reject_unknown(&["package", "modules"])?;
    let name = v.field("package")?.as_str()?.to_string();
    let mut modules = Vec::new();
    for item in v.field("modules")?.into_array() {
        modules.push(item.as_syntax(|src| parse::parse_import(src, file))?);
    }
    Ok(Package { name, modules })
}

fn decode_group(v: &DocValue, file: &str) -> Result<Group, DecodeError> {
    v.reject_unknown(&["group", "enabled", "imports", "rules"])?;
    let name = v.field("group")?.as_str()?.to_string();
    let enabled = match v.opt_field("enabled")? {
        Some(flag) => flag.as_bool()?,
        None => true,
    };
    let mut imports = Vec::new();
    if let Some(list) = v.opt_field("imports")? {
        for item in list.into_array() {
            imports.push(decode_group_import(&item, file)?);
        }
    }
    let mut rules = Vec::new();
    if let Some(list) = v.opt_field("rules")? {
        for item in list.into_array() {
            rules.extend(decode_rule(&item, file)?);
        }
    }
    Ok(Group {
        name,
        enabled,
        imports,
        rules,
    })
}

/// An imports entry is either `package <name>` or an import declaration.
fn decode_group_import(item: &DocValue, file: &str) -> Result<GroupImport, DecodeError> {
    let text = item.as_str()?;
    let (keyword, rest) = word1(text);
    if keyword == "package" {
        Ok(GroupImport::Package(rest.to_string()))
    } else {
        item.as_syntax(|src| parse::parse_import(src, file))
            .map(GroupImport::Direct)
    }
}

/// Decodes a severity-keyed rule object into one or more settings.
///
/// The single key names the severity; the body is a rewrite rule when it
/// has an `lhs`, otherwise a classification.
fn decode_rule(v: &DocValue, file: &str) -> Result<Vec<Setting>, DecodeError> {
    let keys = v.keys()?;
    if keys.len() != 1 {
        return Err(v.error(format!("Expected exactly one key but got {}", keys.len())));
    }
    let keyword = keys[0];
    let severity = Severity::from_keyword(keyword).ok_or_else(|| {
        v.error(format!(
            "Unknown severity `{keyword}`, expected: ignore, suggest, warn, error"
        ))
    })?;
    let body = v.field(keyword)?;
    if body.opt_field("lhs")?.is_some() {
        decode_match(&body, severity, file).map(|rule| vec![Setting::Match(rule)])
    } else {
        decode_classify(&body, severity, file)
    }
}

fn decode_match(body: &DocValue, severity: Severity, file: &str) -> Result<MatchRule, DecodeError> {
    body.reject_unknown(&["lhs", "rhs", "note", "name", "side"])?;
    let lhs = body
        .field("lhs")?
        .as_syntax(|src| parse::parse_expr(src, file))?;
    let rhs = body
        .field("rhs")?
        .as_syntax(|src| parse::parse_expr(src, file))?;
    let side = match body.opt_field("side")? {
        Some(cond) => Some(cond.as_syntax(|src| parse::parse_expr(src, file))?),
        None => None,
    };
    let mut notes = Vec::new();
    if let Some(list) = body.opt_field("note")? {
        for item in list.into_array() {
            notes.push(Note::parse(item.as_str()?));
        }
    }
    let name = match body.opt_field("name")? {
        Some(name) => name.as_str()?.to_string(),
        None => derive_name(&lhs, &rhs),
    };
    Ok(MatchRule {
        severity,
        name,
        lhs,
        rhs,
        side,
        notes,
        scope: Scope::default(),
    })
}

/// Names an unnamed rule after the identifier the rewrite introduces
/// (`Use concatMap`), else after one it removes (`Redundant id`), else
/// falls back to a generic name.
fn derive_name(lhs: &Expr, rhs: &Expr) -> String {
    let before = named_idents(lhs);
    let after = named_idents(rhs);
    if let Some(added) = after.iter().find(|name| !before.contains(name)) {
        format!("Use {added}")
    } else if let Some(removed) = before.iter().find(|name| !after.contains(name)) {
        format!("Redundant {removed}")
    } else {
        DEFAULT_RULE_NAME.to_string()
    }
}

fn decode_classify(
    body: &DocValue,
    severity: Severity,
    file: &str,
) -> Result<Vec<Setting>, DecodeError> {
    body.reject_unknown(&["name", "within"])?;
    let mut names = Vec::new();
    if let Some(list) = body.opt_field("name")? {
        for item in list.into_array() {
            names.push(item.as_str()?.to_string());
        }
    }
    if names.is_empty() {
        names.push(String::new());
    }
    // Absent `within` means everywhere; an explicit empty list means nowhere
    // and produces no settings at all.
    let targets = match body.opt_field("within")? {
        Some(list) => {
            let mut targets = Vec::new();
            for item in list.into_array() {
                targets.extend(decode_within(&item, file)?);
            }
            targets
        }
        None => vec![(String::new(), String::new())],
    };
    let mut settings = Vec::new();
    for name in &names {
        for (module, decl) in &targets {
            settings.push(Setting::Classify(ClassifyRule {
                severity,
                rule_name: name.clone(),
                module: module.clone(),
                decl: decl.clone(),
            }));
        }
    }
    Ok(settings)
}

fn decode_within(item: &DocValue, file: &str) -> Result<Vec<(String, String)>, DecodeError> {
    let expr = item.as_syntax(|src| parse::parse_expr(src, file))?;
    let ExprKind::Var(name) = &expr.kind else {
        return Err(item.error("Expected a module or declaration name"));
    };
    Ok(expand_within(name))
}

/// `Module.decl` forms are unambiguous. A bare capitalized name could be a
/// module or a declaration, so it produces both readings.
fn expand_within(name: &Name) -> Vec<(String, String)> {
    let module = name.module.as_str();
    let decl = name.name.as_str();
    if name.is_constructor() {
        if module.is_empty() {
            vec![
                (decl.to_string(), String::new()),
                (String::new(), decl.to_string()),
            ]
        } else {
            vec![
                (format!("{module}.{decl}"), String::new()),
                (module.to_string(), decl.to_string()),
            ]
        }
    } else if module.is_empty() {
        vec![(String::new(), decl.to_string())]
    } else {
        vec![(module.to_string(), decl.to_string())]
    }
}
