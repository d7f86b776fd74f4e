//! Import scopes and group-import resolution.
//!
//! A group's `imports` list mixes direct import declarations with `package`
//! references. Resolution flattens that list against the package map into a
//! [`Scope`], the set of imports attached to every rule of the group.

use crate::ast::Import;
use miette::Diagnostic;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// The imports in force for a rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scope {
    imports: Vec<Import>,
}

impl Scope {
    /// Creates a scope from already-flattened imports.
    #[must_use]
    pub fn new(imports: Vec<Import>) -> Self {
        Self { imports }
    }

    /// The imports, in the order the group listed them.
    #[must_use]
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Whether the scope restricts anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

/// One element of a group's `imports` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GroupImport {
    /// Reference to a named package of modules.
    Package(String),
    /// A direct import declaration.
    Direct(Import),
}

/// Error raised while resolving group imports.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// A group referred to a package no document defines.
    #[error("group `{group}` refers to unknown package `{package}`")]
    #[diagnostic(help("define the package in one of the loaded documents"))]
    UnknownPackage {
        /// Name of the referring group.
        group: String,
        /// The unresolved package name.
        package: String,
    },
}

/// Flattens a group's import list against the package map.
///
/// Direct imports are kept in place; package references expand, also in
/// place, to the package's modules. Referring to an unknown package fails.
///
/// # Errors
///
/// Returns an error naming the group and the first unknown package.
pub fn resolve_scope(
    group: &str,
    imports: &[GroupImport],
    packages: &HashMap<String, Vec<Import>>,
) -> Result<Scope, ResolveError> {
    let mut flat = Vec::new();
    for import in imports {
        match import {
            GroupImport::Direct(decl) => flat.push(decl.clone()),
            GroupImport::Package(name) => match packages.get(name) {
                Some(modules) => flat.extend(modules.iter().cloned()),
                None => {
                    return Err(ResolveError::UnknownPackage {
                        group: group.to_string(),
                        package: name.clone(),
                    });
                }
            },
        }
    }
    Ok(Scope::new(flat))
}
