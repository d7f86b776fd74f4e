//! Decoded configuration records.

use crate::ast::Import;
use crate::scope::GroupImport;
use crate::types::Setting;
use serde::Serialize;

/// A named, reusable bundle of module imports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    /// The name groups refer to with `package <name>`.
    pub name: String,
    /// The imports the package bundles, in document order.
    pub modules: Vec<Import>,
}

/// A named collection of rules sharing one import scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    /// Group name; empty for the anonymous group wrapping a bare hint.
    pub name: String,
    /// Whether the group contributes rules; the last definition of a name
    /// decides for all definitions of that name.
    pub enabled: bool,
    /// Direct imports and package references, in document order.
    pub imports: Vec<GroupImport>,
    /// The group's rules, in document order.
    pub rules: Vec<Setting>,
}

impl Group {
    /// Whether the group was synthesized around a bare hint.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// One top-level entry of a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConfigEntry {
    /// A package definition.
    Package(Package),
    /// A rule group, named or anonymous.
    Group(Group),
}

impl From<Package> for ConfigEntry {
    fn from(package: Package) -> Self {
        Self::Package(package)
    }
}

impl From<Group> for ConfigEntry {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}
