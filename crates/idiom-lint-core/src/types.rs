//! Core rule types: severities, notes, and the assembled settings.

use crate::ast::Expr;
use crate::scope::Scope;
use serde::Serialize;
use std::fmt;

/// Splits off the first whitespace-separated word, trimming the remainder.
pub(crate) fn word1(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

// ────────────────────────────────────────────
// Severity
// ────────────────────────────────────────────

/// How prominently a finding is reported.
///
/// Ordered least to most severe, so overrides can only be compared upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suppress the finding entirely.
    Ignore,
    /// Report as an optional style suggestion.
    Suggest,
    /// Report as a warning.
    Warn,
    /// Report as an error.
    Error,
}

impl Severity {
    /// Parses a document keyword: `ignore`, `suggest`, `warn` or `error`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ignore" => Some(Self::Ignore),
            "suggest" => Some(Self::Suggest),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ignore => "ignore",
            Self::Suggest => "suggest",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

// ────────────────────────────────────────────
// Notes
// ────────────────────────────────────────────

/// A structured remark attached to a rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Note {
    /// The replacement evaluates less of its input.
    IncreasesLaziness,
    /// The replacement evaluates more of its input.
    DecreasesLaziness,
    /// The replacement no longer raises the named error.
    RemovesError(String),
    /// The rewrite relies on a lawful instance method.
    ValidInstance {
        /// Class the instance belongs to.
        class: String,
        /// Method the rewrite relies on.
        method: String,
    },
    /// Free-form remark.
    FreeText(String),
}

impl Note {
    /// Reads a note from document text.
    ///
    /// Recognizes the tagged forms (`IncreasesLaziness`, `RemovesError on
    /// []`, `ValidInstance Eq a`); anything else becomes [`Note::FreeText`].
    /// This never fails.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "IncreasesLaziness" => return Self::IncreasesLaziness,
            "DecreasesLaziness" => return Self::DecreasesLaziness,
            _ => {}
        }
        let (tag, rest) = word1(text);
        match tag {
            "RemovesError" => Self::RemovesError(rest.to_string()),
            "ValidInstance" => {
                let (class, method) = word1(rest);
                Self::ValidInstance {
                    class: class.to_string(),
                    method: method.to_string(),
                }
            }
            _ => Self::FreeText(text.to_string()),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncreasesLaziness => f.write_str("increases laziness"),
            Self::DecreasesLaziness => f.write_str("decreases laziness"),
            Self::RemovesError(error) => write!(f, "removes error {error}"),
            Self::ValidInstance { class, method } => {
                write!(f, "requires a valid {class} instance for {method}")
            }
            Self::FreeText(text) => f.write_str(text),
        }
    }
}

// ────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────

/// A rewrite rule: report things shaped like `lhs`, suggest `rhs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRule {
    /// Default report severity.
    pub severity: Severity,
    /// Human-readable rule name, e.g. `Use concatMap`.
    pub name: String,
    /// Template the linter searches for.
    pub lhs: Expr,
    /// Suggested replacement.
    pub rhs: Expr,
    /// Side condition restricting when the rule fires.
    pub side: Option<Expr>,
    /// Remarks shown with the suggestion.
    pub notes: Vec<Note>,
    /// Imports delimiting where the rule applies.
    pub scope: Scope,
}

impl MatchRule {
    /// Replaces the scope, keeping everything else.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\": {} ==> {}",
            self.severity, self.name, self.lhs, self.rhs
        )?;
        if let Some(side) = &self.side {
            write!(f, " where {side}")?;
        }
        if !self.notes.is_empty() {
            let notes: Vec<String> = self.notes.iter().map(ToString::to_string).collect();
            write!(f, " ({})", notes.join(", "))?;
        }
        Ok(())
    }
}

/// A severity override for already-defined rules.
///
/// Empty `rule_name`, `module` or `decl` fields act as wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifyRule {
    /// Severity to apply to everything the override matches.
    pub severity: Severity,
    /// Rule name the override targets; empty targets every rule.
    pub rule_name: String,
    /// Module restriction; empty means any module.
    pub module: String,
    /// Declaration restriction; empty means any declaration.
    pub decl: String,
}

impl fmt::Display for ClassifyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.severity)?;
        if self.rule_name.is_empty() {
            write!(f, "*")?;
        } else {
            write!(f, "\"{}\"", self.rule_name)?;
        }
        write!(f, " within ")?;
        match (self.module.is_empty(), self.decl.is_empty()) {
            (true, true) => write!(f, "*"),
            (false, true) => write!(f, "{}", self.module),
            (true, false) => write!(f, "{}", self.decl),
            (false, false) => write!(f, "{}.{}", self.module, self.decl),
        }
    }
}

/// One element of the assembled rule list, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Setting {
    /// A rewrite rule.
    Match(MatchRule),
    /// A severity override.
    Classify(ClassifyRule),
}

impl Setting {
    /// The severity this setting carries.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Match(rule) => rule.severity,
            Self::Classify(rule) => rule.severity,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match(rule) => rule.fmt(f),
            Self::Classify(rule) => rule.fmt(f),
        }
    }
}
