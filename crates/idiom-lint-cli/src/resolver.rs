//! Rule-document discovery with global fallback.
//!
//! When `check` is given no files, a document is discovered in a
//! deterministic order:
//!
//! 1. `{cwd}/idiom-lint.yaml` or `.idiom-lint.yaml`
//! 2. `~/.idiom-lint/rules.yaml` (global fallback)
//! 3. Nothing found → error upstream

use std::path::{Path, PathBuf};

/// Where discovery found a rule document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    /// Found in the working directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.idiom-lint/`).
    Global(PathBuf),
    /// No document found anywhere.
    Missing,
}

impl RulesSource {
    /// Returns the discovered path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Project(p) | Self::Global(p) => Some(p),
            Self::Missing => None,
        }
    }

    /// Returns `true` if the document came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level document names, checked in order.
const PROJECT_RULES_NAMES: &[&str] = &["idiom-lint.yaml", ".idiom-lint.yaml"];

/// Document name within the global config directory.
const GLOBAL_RULES_NAME: &str = "rules.yaml";

/// Discovers a rule document for the given working directory.
///
/// See module-level docs for the search order.
#[must_use]
pub fn discover(cwd: &Path) -> RulesSource {
    discover_inner(cwd, global_rules_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn discover_inner(cwd: &Path, global_dir: Option<PathBuf>) -> RulesSource {
    for name in PROJECT_RULES_NAMES {
        let candidate = cwd.join(name);
        if candidate.exists() {
            tracing::debug!("Found project rules: {}", candidate.display());
            return RulesSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_RULES_NAME);
        if candidate.exists() {
            tracing::debug!("Found global rules: {}", candidate.display());
            return RulesSource::Global(candidate);
        }
    }

    RulesSource::Missing
}

/// Returns the global config directory path.
///
/// `$IDIOM_LINT_CONFIG_DIR` overrides the home-relative `~/.idiom-lint/`.
#[must_use]
pub fn global_rules_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("IDIOM_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".idiom-lint"))
}
