//! Identifiers and calls.

use sim_ir::{ExprArena, ExprId, ExprRange, ParsedType, Path, Span};
use sim_types::Type;

use crate::analyzer::{Analyzer, Expected};
use crate::error::{report, SemaResult, SemanticError};
use crate::ir::{TypedExpr, TypedExprKind};
use crate::scope::SymbolTarget;

impl<'a> Analyzer<'a> {
    /// A name, optionally qualified and optionally with type arguments
    /// (`name::<T>`), which instantiate a generic function.
    pub(super) fn elaborate_ident(
        &mut self,
        path: &Path,
        generic_args: &[ParsedType],
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let symbol = self.lookup_value(path)?;

        match symbol.target {
            SymbolTarget::Generic(def) => {
                let args = generic_args
                    .iter()
                    .map(|arg| self.resolve_type(arg, span))
                    .collect::<SemaResult<Vec<_>>>()?;
                let instance = match def.instantiate(&args) {
                    Ok(instance) => instance,
                    Err(mismatch) => {
                        return report(SemanticError::GenericArgCountMismatch {
                            expected: mismatch.expected,
                            found: mismatch.found,
                            span,
                        });
                    }
                };
                let ty = Type::Function(instance.sig.clone());
                Ok(TypedExpr::new(
                    TypedExprKind::GenericInstance(instance),
                    ty,
                    span,
                ))
            }
            _ if !generic_args.is_empty() => report(SemanticError::NotGeneric {
                name: path.name,
                span,
            }),
            SymbolTarget::Local(id) => Ok(TypedExpr::place(
                TypedExprKind::Local(id),
                symbol.ty,
                symbol.mutable,
                span,
            )),
            SymbolTarget::Global { package, name } => Ok(TypedExpr::place(
                TypedExprKind::Global { package, name },
                symbol.ty,
                symbol.mutable,
                span,
            )),
        }
    }

    /// `func(args)`. Each argument must match its parameter type exactly.
    pub(super) fn elaborate_call(
        &mut self,
        func: ExprId,
        args: ExprRange,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let func = self.elaborate(&Expected::None, func)?;
        let Some(sig) = func.ty.as_function().cloned() else {
            return report(SemanticError::NotAFunction {
                found: func.ty,
                span: func.span,
            });
        };

        let arena: &'a ExprArena = self.ctx.arena;
        let arg_ids = arena.get_expr_list(args);
        if arg_ids.len() != sig.params.len() {
            return report(SemanticError::ParameterCountMismatch {
                expected: sig.params.len(),
                found: arg_ids.len(),
                span,
            });
        }

        let args = arg_ids
            .iter()
            .zip(&sig.params)
            .map(|(id, param)| self.expect_expr(param, *id))
            .collect::<SemaResult<Vec<_>>>()?;

        Ok(TypedExpr::new(
            TypedExprKind::Call {
                func: Box::new(func),
                args,
            },
            *sig.ret,
            span,
        ))
    }
}
