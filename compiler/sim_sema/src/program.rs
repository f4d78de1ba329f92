//! Analysis driver.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sim_ir::{ExprArena, Module, Name, SharedInterner, StringInterner};

use crate::config::SemaConfig;
use crate::declare::analyze_package;
use crate::error::SemanticError;
use crate::ir::TypedPackage;
use crate::package::Package;

/// The packages of one compilation, analyzed one at a time.
///
/// A package can import only packages analyzed before it.
pub struct Program {
    interner: SharedInterner,
    config: SemaConfig,
    packages: FxHashMap<Name, Arc<Package>>,
}

impl Program {
    pub fn new(interner: SharedInterner, config: SemaConfig) -> Self {
        Program {
            interner,
            config,
            packages: FxHashMap::default(),
        }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn config(&self) -> &SemaConfig {
        &self.config
    }

    /// An analyzed package by path.
    pub fn package(&self, path: Name) -> Option<&Arc<Package>> {
        self.packages.get(&path)
    }

    /// Analyze the package at `path` and register it for later imports.
    ///
    /// Stops at the first error; on error nothing is registered.
    #[tracing::instrument(level = "debug", skip_all, fields(package = self.interner.lookup(path)))]
    pub fn analyze(
        &mut self,
        path: Name,
        module: &Module,
        arena: &ExprArena,
    ) -> Result<TypedPackage, SemanticError> {
        let typed = analyze_package(
            &self.config,
            &self.interner,
            &self.packages,
            path,
            module,
            arena,
        )?;
        self.packages.insert(path, Arc::clone(&typed.package));
        tracing::debug!("package analysis complete");
        Ok(typed)
    }
}
