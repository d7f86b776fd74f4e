//! Configuration document loading.
//!
//! A document is YAML describing packages, groups and hints:
//!
//! ```text
//! text ──parse──▶ serde_yaml::Value ──decode──▶ ConfigEntry records
//! ```
//!
//! Decoding runs over path-tracked [`value::DocValue`] wrappers, so schema
//! failures report the route from the document root and an excerpt of the
//! surrounding document rather than a bare message.

pub mod model;
mod schema;
mod value;

pub use value::DecodeError;

use crate::config::model::ConfigEntry;
use crate::config::value::DocValue;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error raised while loading a configuration document.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    /// The document could not be read from disk.
    #[error("failed to read {}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed YAML.
    #[error("{path}: {message}")]
    Format {
        /// Label of the offending document.
        path: String,
        /// The YAML parser's message.
        message: String,
        /// The document text, for the diagnostic frame.
        #[source_code]
        src: NamedSource<String>,
        /// Where the parser gave up.
        #[label("{message}")]
        span: SourceSpan,
    },

    /// The document parsed but does not follow the rule schema.
    #[error("{path}: {error}")]
    Decode {
        /// Label of the offending document.
        path: String,
        /// The schema error, including path and excerpt.
        error: DecodeError,
    },
}

/// A decoded configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Where the document came from; a plain label for inline text.
    pub path: PathBuf,
    /// Top-level entries in document order.
    pub entries: Vec<ConfigEntry>,
}

impl ConfigFile {
    /// Loads and decodes a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the document fails
    /// to decode.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Decodes a document from text. `path` labels the source in node
    /// locations and diagnostics.
    ///
    /// An empty document yields no entries; a document whose root is a
    /// single entry rather than a list is accepted as a one-entry list.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not YAML or an entry does not match
    /// the document schema.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, LoadError> {
        let path = path.into();
        let label = path.display().to_string();
        let value: Value = serde_yaml::from_str(text).map_err(|e| {
            let offset = e.location().map_or(0, |l| l.index());
            let len = usize::from(offset < text.len());
            LoadError::Format {
                path: label.clone(),
                message: e.to_string(),
                src: NamedSource::new(&label, text.to_string()),
                span: SourceSpan::from((offset, len)),
            }
        })?;

        let mut entries = Vec::new();
        for item in DocValue::root(&value).into_array() {
            let entry = schema::decode_entry(&item, &label).map_err(|error| LoadError::Decode {
                path: label.clone(),
                error,
            })?;
            entries.push(entry);
        }
        tracing::debug!(path = %label, entries = entries.len(), "decoded configuration document");
        Ok(Self { path, entries })
    }
}
