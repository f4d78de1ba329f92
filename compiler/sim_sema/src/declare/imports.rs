//! Import resolution.

use std::sync::Arc;

use sim_ir::{Name, StringInterner};

use super::Declarer;
use crate::error::{report, SemaResult, SemanticError};

impl Declarer<'_> {
    /// Bind every import to an already analyzed package.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn resolve_imports(&mut self) -> SemaResult<()> {
        for import in &self.module.imports {
            let Some(package) = self.packages.get(&import.path) else {
                return report(SemanticError::UnknownPackage {
                    path: import.path,
                    span: import.span,
                });
            };
            let alias = import
                .alias
                .unwrap_or_else(|| default_alias(self.interner, import.path));
            if !self
                .scope
                .add_import(alias, Arc::clone(package), import.linked)
            {
                return report(SemanticError::IdentifierDuplication {
                    name: alias,
                    span: import.span,
                });
            }
        }
        tracing::debug!(imports = self.module.imports.len(), "imports resolved");
        Ok(())
    }
}

/// Last `/`-separated segment of a package path.
pub(crate) fn default_alias(interner: &StringInterner, path: Name) -> Name {
    let text = interner.lookup(path);
    match text.rsplit_once('/') {
        Some((_, last)) => interner.intern(last),
        None => path,
    }
}
