//! # idiom-lint-core
//!
//! Core engine for idiom-lint: rule documents, the pattern snippet syntax,
//! and assembly of the active rule list.
//!
//! This crate provides the pieces a lint driver builds on:
//!
//! - [`ConfigFile`] for loading and decoding YAML rule documents
//! - [`build_settings`] for flattening documents into an ordered list of
//!   [`Setting`]s, honoring group enablement and package imports
//! - [`parse_expr`] and [`parse_import`] for the pattern snippet syntax
//! - [`traverse`] helpers for walking patterns with source locations
//!
//! ## Example
//!
//! ```ignore
//! use idiom_lint_core::{build_settings, ConfigFile};
//!
//! let config = ConfigFile::from_file("rules.yaml")?;
//! for setting in build_settings(&[config])? {
//!     println!("{setting}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ast;
mod config;
mod defaults;
mod loc;
mod parse;
mod scope;
mod settings;
mod types;

/// Helpers for walking pattern expressions.
pub mod traverse;

pub use ast::{Expr, ExprKind, Import, Literal, Name};
pub use config::model::{ConfigEntry, Group, Package};
pub use config::{ConfigFile, DecodeError, LoadError};
pub use defaults::default_config;
pub use loc::{Loc, SrcLoc};
pub use parse::{parse_expr, parse_import, ParseError};
pub use scope::{resolve_scope, GroupImport, ResolveError, Scope};
pub use settings::build_settings;
pub use types::{ClassifyRule, MatchRule, Note, Setting, Severity};
