//! Source locations for syntax fragments.
//!
//! Patterns are parsed out of configuration documents, so a location names
//! the document (or other label) the fragment came from plus a line/column
//! inside that fragment. Synthesized nodes have no location of their own and
//! inherit one during traversal, see [`crate::traverse`].

use serde::Serialize;
use std::fmt;

/// A concrete position inside a named source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SrcLoc {
    /// Label of the source the fragment was read from, usually a file path.
    pub file: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl SrcLoc {
    /// Creates a location inside `file`.
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SrcLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Location attached to a syntax node.
///
/// Nodes built by rewrites rather than parsed from text are [`Loc::Synthetic`]
/// and report the location of their nearest located ancestor when traversed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Loc {
    /// No location of its own; the node was synthesized.
    #[default]
    Synthetic,
    /// A known position in a named source.
    Known(SrcLoc),
}

impl Loc {
    /// Creates a known location.
    #[must_use]
    pub fn known(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Known(SrcLoc::new(file, line, column))
    }

    /// Returns `true` when the node carries no location of its own.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic)
    }

    /// The concrete position, if one is attached.
    #[must_use]
    pub fn src(&self) -> Option<&SrcLoc> {
        match self {
            Self::Synthetic => None,
            Self::Known(src) => Some(src),
        }
    }

    /// This location when known, otherwise `fallback`.
    #[must_use]
    pub fn or<'a>(&'a self, fallback: &'a Self) -> &'a Self {
        match self {
            Self::Synthetic => fallback,
            Self::Known(_) => self,
        }
    }
}

impl From<SrcLoc> for Loc {
    fn from(src: SrcLoc) -> Self {
        Self::Known(src)
    }
}
