//! Function, method and global declarations.

use std::sync::Arc;

use sim_ir::{GlobalDecl, Name, ParamDecl, ParsedType, Span};
use sim_types::{FuncType, GenericParam, Type};

use super::{Declarer, FunctionPlan, GlobalPlan, MethodPlan};
use crate::analyzer::{infer_global, lower_type, ScopeTypes};
use crate::error::{report, SemaResult, SemanticError};
use crate::generic::GenericFuncDef;
use crate::ir::FunctionKind;
use crate::package::{FunctionDef, GlobalValue, GlobalVar, MethodDef};

impl Declarer<'_> {
    /// A package-level value `name` would clash with a value or trait.
    fn check_value_name(&self, name: Name, span: Span) -> SemaResult<()> {
        if self.scope.value_clash(name) || self.scope.package().trait_def(name).is_some() {
            return report(SemanticError::IdentifierDuplication { name, span });
        }
        Ok(())
    }

    fn lower_signature(
        &self,
        params: &[ParamDecl],
        ret: Option<&ParsedType>,
        generics: &[GenericParam],
        span: Span,
    ) -> SemaResult<FuncType> {
        let mut names = ScopeTypes {
            scope: &self.scope,
            interner: self.interner,
            generics,
            allow_self: false,
        };
        let params = params
            .iter()
            .map(|p| lower_type(&p.ty, p.span, &mut names))
            .collect::<SemaResult<Vec<_>>>()?;
        let ret = match ret {
            Some(ret) => lower_type(ret, span, &mut names)?,
            None => Type::Empty,
        };
        Ok(FuncType::new(params, ret))
    }

    /// Register functions and generic functions with their signatures.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn declare_functions(&mut self) -> SemaResult<Vec<FunctionPlan>> {
        let module = self.module;
        let path = self.scope.package().path;
        let mut plans = Vec::with_capacity(module.functions.len());

        for decl in &module.functions {
            self.check_value_name(decl.name, decl.span)?;

            let mut generics: Vec<GenericParam> = Vec::with_capacity(decl.generics.len());
            for (index, name) in decl.generics.iter().enumerate() {
                if generics.iter().any(|g| g.name == *name) {
                    return report(SemanticError::IdentifierDuplication {
                        name: *name,
                        span: decl.span,
                    });
                }
                generics.push(GenericParam {
                    name: *name,
                    index: u32::try_from(index).unwrap_or(u32::MAX),
                });
            }

            let sig = self.lower_signature(&decl.params, decl.ret.as_ref(), &generics, decl.span)?;
            let (value, kind) = if generics.is_empty() {
                let def = FunctionDef {
                    public: decl.public,
                    name: decl.name,
                    sig: sig.clone(),
                    extern_name: decl.extern_name,
                };
                (
                    GlobalValue::Function(Arc::new(def)),
                    FunctionKind::Plain {
                        extern_name: decl.extern_name,
                    },
                )
            } else {
                let def = Arc::new(GenericFuncDef::new(
                    decl.public,
                    path,
                    decl.name,
                    generics,
                    sig.clone(),
                ));
                (
                    GlobalValue::GenericFunction(Arc::clone(&def)),
                    FunctionKind::Generic(def),
                )
            };
            self.scope.package_mut().values.insert(decl.name, value);
            plans.push(FunctionPlan { sig, kind });
        }

        tracing::debug!(functions = plans.len(), "function signatures declared");
        Ok(plans)
    }

    /// Attach methods to the structs of this package.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn declare_methods(&mut self) -> SemaResult<Vec<MethodPlan>> {
        let module = self.module;
        let mut plans = Vec::with_capacity(module.methods.len());

        for decl in &module.methods {
            let package = self.scope.package();
            let Some(owner) = package.struct_def(decl.receiver) else {
                return report(SemanticError::UnknownIdentifier {
                    name: decl.receiver,
                    span: decl.span,
                });
            };
            if owner.ty.field(decl.name).is_some()
                || package.method(decl.receiver, decl.name).is_some()
            {
                return report(SemanticError::IdentifierDuplication {
                    name: decl.name,
                    span: decl.span,
                });
            }
            let receiver = Type::Struct(Arc::clone(&owner.ty));

            let sig = self.lower_signature(&decl.params, decl.ret.as_ref(), &[], decl.span)?;
            let def = MethodDef {
                public: decl.public,
                receiver: decl.receiver,
                receiver_mutable: decl.receiver_mutable,
                name: decl.name,
                sig: sig.clone(),
            };
            self.scope
                .package_mut()
                .methods
                .insert((decl.receiver, decl.name), Arc::new(def));
            plans.push(MethodPlan { receiver, sig });
        }

        tracing::debug!(methods = plans.len(), "methods declared");
        Ok(plans)
    }

    /// Register globals.
    ///
    /// Globals with a declared type are registered first. The rest are
    /// typed from their initializers, retrying those that name a global not
    /// yet typed, so declaration order does not matter. A round without
    /// progress means the remaining initializers depend on each other.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn declare_globals(&mut self) -> SemaResult<Vec<GlobalPlan>> {
        let module = self.module;
        let mut plans: Vec<Option<GlobalPlan>> = Vec::with_capacity(module.globals.len());
        let mut pending: Vec<usize> = Vec::new();

        for (index, decl) in module.globals.iter().enumerate() {
            self.check_value_name(decl.name, decl.span)?;
            if pending.iter().any(|&i| module.globals[i].name == decl.name) {
                return report(SemanticError::IdentifierDuplication {
                    name: decl.name,
                    span: decl.span,
                });
            }
            let Some(parsed) = &decl.ty else {
                pending.push(index);
                plans.push(None);
                continue;
            };
            let mut names = ScopeTypes {
                scope: &self.scope,
                interner: self.interner,
                generics: &[],
                allow_self: false,
            };
            let ty = lower_type(parsed, decl.span, &mut names)?;
            self.insert_global(decl, ty.clone());
            plans.push(Some(GlobalPlan::Declared(ty)));
        }

        while !pending.is_empty() {
            let mut deferred = Vec::with_capacity(pending.len());
            for &index in &pending {
                let decl = &module.globals[index];
                match infer_global(self.context(), decl) {
                    Ok(global) => {
                        self.insert_global(decl, global.ty.clone());
                        plans[index] = Some(GlobalPlan::Inferred(global));
                    }
                    Err(SemanticError::UnknownIdentifier { name, .. })
                        if pending.iter().any(|&i| module.globals[i].name == name) =>
                    {
                        deferred.push(index);
                    }
                    Err(err) => return Err(err),
                }
            }
            if deferred.len() == pending.len() {
                let decl = &module.globals[deferred[0]];
                return report(SemanticError::RecursiveType {
                    name: decl.name,
                    span: decl.span,
                });
            }
            tracing::trace!(deferred = deferred.len(), "global inference round");
            pending = deferred;
        }

        let plans: Vec<GlobalPlan> = plans.into_iter().flatten().collect();
        tracing::debug!(globals = plans.len(), "globals declared");
        Ok(plans)
    }

    fn insert_global(&mut self, decl: &GlobalDecl, ty: Type) {
        let var = GlobalVar {
            public: decl.public,
            mutable: decl.mutable,
            name: decl.name,
            ty,
            extern_name: decl.extern_name,
        };
        self.scope
            .package_mut()
            .values
            .insert(decl.name, GlobalValue::Variable(Arc::new(var)));
    }
}
