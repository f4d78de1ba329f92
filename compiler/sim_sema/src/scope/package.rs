//! The outermost scope: a package and what it imports.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sim_ir::Name;

use crate::conformance::TraitDef;
use crate::package::{GlobalValue, Package, TypeDef};

/// A package under analysis together with its imports.
///
/// Externs are reached through `alias::name`; links splice another
/// package's public names into unqualified lookup. Both expose only
/// public definitions.
#[derive(Debug)]
pub(crate) struct PackageScope {
    package: Package,
    externs: FxHashMap<Name, Arc<Package>>,
    links: Vec<Arc<Package>>,
}

impl PackageScope {
    pub(crate) fn new(path: Name) -> Self {
        PackageScope {
            package: Package::new(path),
            externs: FxHashMap::default(),
            links: Vec::new(),
        }
    }

    pub(crate) fn package(&self) -> &Package {
        &self.package
    }

    pub(crate) fn package_mut(&mut self) -> &mut Package {
        &mut self.package
    }

    pub(crate) fn into_package(self) -> Package {
        self.package
    }

    /// Register an import under `alias`; `false` if the alias is taken.
    pub(crate) fn add_import(&mut self, alias: Name, package: Arc<Package>, linked: bool) -> bool {
        if self.externs.contains_key(&alias) {
            return false;
        }
        if linked {
            self.links.push(Arc::clone(&package));
        }
        self.externs.insert(alias, package);
        true
    }

    pub(crate) fn has_extern(&self, alias: Name) -> bool {
        self.externs.contains_key(&alias)
    }

    /// Whether a new package-level value `name` would clash.
    pub(crate) fn value_clash(&self, name: Name) -> bool {
        self.package.values.contains_key(&name)
            || self
                .links
                .iter()
                .any(|p| p.value(name).is_some_and(GlobalValue::is_public))
    }

    /// Whether a new type or trait `name` would clash.
    pub(crate) fn type_clash(&self, name: Name) -> bool {
        self.package.types.contains_key(&name)
            || self.package.traits.contains_key(&name)
            || self.links.iter().any(|p| {
                p.type_def(name).is_some_and(TypeDef::is_public)
                    || p.trait_def(name).is_some_and(|t| t.public)
            })
    }

    /// Resolve a value; returns the defining package's path with it.
    pub(crate) fn lookup_value(
        &self,
        qualifier: Option<Name>,
        name: Name,
    ) -> Option<(Name, &GlobalValue)> {
        match qualifier {
            Some(alias) => {
                let package = self.externs.get(&alias)?;
                let value = package.value(name).filter(|v| v.is_public())?;
                Some((package.path, value))
            }
            None => self
                .package
                .value(name)
                .map(|v| (self.package.path, v))
                .or_else(|| {
                    self.links.iter().find_map(|p| {
                        p.value(name).filter(|v| v.is_public()).map(|v| (p.path, v))
                    })
                }),
        }
    }

    pub(crate) fn lookup_type(&self, qualifier: Option<Name>, name: Name) -> Option<&TypeDef> {
        match qualifier {
            Some(alias) => self
                .externs
                .get(&alias)?
                .type_def(name)
                .filter(|t| t.is_public()),
            None => self.package.type_def(name).or_else(|| {
                self.links
                    .iter()
                    .find_map(|p| p.type_def(name).filter(|t| t.is_public()))
            }),
        }
    }

    pub(crate) fn lookup_trait(
        &self,
        qualifier: Option<Name>,
        name: Name,
    ) -> Option<&Arc<TraitDef>> {
        match qualifier {
            Some(alias) => self
                .externs
                .get(&alias)?
                .trait_def(name)
                .filter(|t| t.public),
            None => self.package.trait_def(name).or_else(|| {
                self.links
                    .iter()
                    .find_map(|p| p.trait_def(name).filter(|t| t.public))
            }),
        }
    }

    /// Package with the given path among this one and its imports.
    pub(crate) fn find_package(&self, path: Name) -> Option<&Package> {
        if self.package.path == path {
            return Some(&self.package);
        }
        self.externs
            .values()
            .find(|p| p.path == path)
            .map(|p| &**p)
    }
}
