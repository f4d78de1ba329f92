//! Traits and declared conformance.

use std::sync::Arc;

use sim_ir::Path;
use sim_types::{FuncType, Type};

use super::Declarer;
use crate::analyzer::{lower_type, ScopeTypes};
use crate::conformance::{TraitDef, TraitMethod};
use crate::error::{report, SemaResult, SemanticError};
use crate::package::TypeDef;

impl Declarer<'_> {
    /// Resolve trait method signatures; `Self` is in scope.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn register_traits(&mut self) -> SemaResult<()> {
        let module = self.module;
        for decl in &module.traits {
            let mut names = ScopeTypes {
                scope: &self.scope,
                interner: self.interner,
                generics: &[],
                allow_self: true,
            };
            let mut methods: Vec<TraitMethod> = Vec::with_capacity(decl.methods.len());
            for sig in &decl.methods {
                if methods.iter().any(|m| m.name == sig.name) {
                    return report(SemanticError::IdentifierDuplication {
                        name: sig.name,
                        span: sig.span,
                    });
                }
                let params = sig
                    .params
                    .iter()
                    .map(|p| lower_type(p, sig.span, &mut names))
                    .collect::<SemaResult<Vec<_>>>()?;
                let ret = match &sig.ret {
                    Some(ret) => lower_type(ret, sig.span, &mut names)?,
                    None => Type::Empty,
                };
                methods.push(TraitMethod {
                    name: sig.name,
                    sig: FuncType::new(params, ret),
                });
            }

            let def = TraitDef {
                public: decl.public,
                package: self.scope.package().path,
                name: decl.name,
                methods,
            };
            self.scope
                .package_mut()
                .traits
                .insert(decl.name, Arc::new(def));
        }
        tracing::debug!(traits = module.traits.len(), "traits registered");
        Ok(())
    }

    /// Check every `implements` clause against the collected methods.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn check_conformance(&mut self) -> SemaResult<()> {
        let module = self.module;
        for decl in module.structs.iter().filter(|s| !s.implements.is_empty()) {
            let implements = decl
                .implements
                .iter()
                .map(|path| self.lookup_trait(path))
                .collect::<SemaResult<Vec<_>>>()?;

            let package = self.scope.package();
            for trait_def in &implements {
                if let Some(method) = trait_def.first_missing(package, decl.name) {
                    return report(SemanticError::TraitNotImplemented {
                        trait_name: trait_def.name,
                        ty: decl.name,
                        method,
                        span: decl.span,
                    });
                }
            }

            let Some(def) = package.struct_def(decl.name) else {
                return report(SemanticError::Internal {
                    message: "struct missing after registration".to_string(),
                    span: decl.span,
                });
            };
            let mut def = (**def).clone();
            def.implements = implements;
            self.scope
                .package_mut()
                .types
                .insert(decl.name, TypeDef::Struct(Arc::new(def)));
        }
        tracing::debug!("conformance checked");
        Ok(())
    }

    fn lookup_trait(&self, path: &Path) -> SemaResult<Arc<TraitDef>> {
        if let Some(alias) = path.package {
            if !self.scope.has_extern(alias) {
                return report(SemanticError::UnknownIdentifier {
                    name: alias,
                    span: path.span,
                });
            }
        }
        match self.scope.lookup_trait(path.package, path.name) {
            Some(def) => Ok(Arc::clone(def)),
            None => report(SemanticError::UnknownIdentifier {
                name: path.name,
                span: path.span,
            }),
        }
    }
}
