//! Package-level passes.
//!
//! Declarations are registered before any body is analyzed, in this order:
//! imports, type and trait names, struct and alias types (lazily, so the
//! order of declarations does not matter), traits, function and method
//! signatures, trait conformance, globals. The package tables are then
//! frozen and the bodies analyzed, optionally in parallel.

mod imports;
mod signatures;
mod trait_registration;
mod type_registration;

use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use sim_ir::{ExprArena, Module, Name, StringInterner};
use sim_types::{FuncType, Type};

use crate::analyzer::{analyze_function, analyze_global, analyze_method, SemaContext};
use crate::config::SemaConfig;
use crate::error::SemaResult;
use crate::ir::{FunctionKind, TypedGlobal, TypedPackage};
use crate::package::Package;
use crate::scope::PackageScope;

/// State of the declaration passes for one package.
pub(crate) struct Declarer<'d> {
    config: &'d SemaConfig,
    interner: &'d StringInterner,
    arena: &'d ExprArena,
    module: &'d Module,
    packages: &'d FxHashMap<Name, Arc<Package>>,
    scope: PackageScope,
}

/// Resolved signature of a function awaiting body analysis.
struct FunctionPlan {
    sig: FuncType,
    kind: FunctionKind,
}

struct MethodPlan {
    receiver: Type,
    sig: FuncType,
}

enum GlobalPlan {
    /// Declared type; the initializer is checked with the bodies.
    Declared(Type),
    /// Type inferred from the initializer, already analyzed.
    Inferred(TypedGlobal),
}

/// Run every pass over `module` and produce its typed form.
pub(crate) fn analyze_package(
    config: &SemaConfig,
    interner: &StringInterner,
    packages: &FxHashMap<Name, Arc<Package>>,
    path: Name,
    module: &Module,
    arena: &ExprArena,
) -> SemaResult<TypedPackage> {
    let mut declarer = Declarer {
        config,
        interner,
        arena,
        module,
        packages,
        scope: PackageScope::new(path),
    };

    declarer.resolve_imports()?;
    declarer.register_types()?;
    declarer.register_traits()?;
    let functions = declarer.declare_functions()?;
    let methods = declarer.declare_methods()?;
    declarer.check_conformance()?;
    let globals = declarer.declare_globals()?;

    declarer.analyze_bodies(&functions, &methods, globals)
}

impl<'d> Declarer<'d> {
    fn context(&self) -> SemaContext<'_> {
        SemaContext {
            config: self.config,
            interner: self.interner,
            arena: self.arena,
            scope: &self.scope,
            packages: self.packages,
        }
    }

    /// Analyze every body against the frozen tables.
    ///
    /// Order of results (and of the error reported) is declaration order:
    /// globals, then functions, then methods.
    #[tracing::instrument(level = "debug", skip_all)]
    fn analyze_bodies(
        self,
        functions: &[FunctionPlan],
        methods: &[MethodPlan],
        globals: Vec<GlobalPlan>,
    ) -> SemaResult<TypedPackage> {
        let ctx = self.context();
        let module = self.module;
        let parallel = self.config.parallel_bodies;

        let globals = globals
            .into_iter()
            .zip(&module.globals)
            .map(|(plan, decl)| match plan {
                GlobalPlan::Declared(ty) => analyze_global(ctx, decl, &ty),
                GlobalPlan::Inferred(global) => Ok(global),
            })
            .collect::<SemaResult<Vec<_>>>()?;

        let function_items: Vec<_> = module.functions.iter().zip(functions).collect();
        let mut typed = map_bodies(parallel, &function_items, |(decl, plan)| {
            analyze_function(ctx, decl, &plan.sig, plan.kind.clone())
        })?;

        let method_items: Vec<_> = module.methods.iter().zip(methods).collect();
        typed.extend(map_bodies(parallel, &method_items, |(decl, plan)| {
            analyze_method(ctx, decl, plan.receiver.clone(), &plan.sig)
        })?);

        tracing::debug!(functions = typed.len(), globals = globals.len(), "body analysis complete");
        Ok(TypedPackage {
            package: Arc::new(self.scope.into_package()),
            globals,
            functions: typed,
        })
    }
}

/// Map `f` over `items`, on the rayon pool when `parallel`.
///
/// Either way the error returned is the one of the earliest failing item.
fn map_bodies<T, R, F>(parallel: bool, items: &[T], f: F) -> SemaResult<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> SemaResult<R> + Sync + Send,
{
    if parallel {
        let results: Vec<SemaResult<R>> = items.par_iter().map(f).collect();
        results.into_iter().collect()
    } else {
        items.iter().map(f).collect()
    }
}
