//! Entry points for bodies: functions, methods and global initializers.

use sim_ir::{Block, FunctionDecl, GlobalDecl, MethodDecl, Name, ParamDecl, Span};
use sim_types::{FuncType, GenericParam, Type};

use super::{Analyzer, Expected, SemaContext};
use crate::error::{report, SemaResult, SemanticError};
use crate::ir::{
    Exit, FunctionKind, LocalDecl, LocalId, TypedBlock, TypedExpr, TypedExprKind, TypedFunction,
    TypedGlobal,
};
use crate::scope::{Frame, SymbolOrigin};

/// Everything a body analysis needs besides the context.
struct BodyInput<'d> {
    name: Name,
    span: Span,
    /// `self` binding of a method: its type and mutability.
    receiver: Option<(Type, bool)>,
    params: &'d [ParamDecl],
    sig: &'d FuncType,
    generics: Vec<GenericParam>,
    body: Option<&'d Block>,
}

struct BodyOutput {
    params: Vec<LocalId>,
    locals: Vec<LocalDecl>,
    body: Option<TypedBlock>,
}

#[tracing::instrument(level = "debug", skip_all, fields(name = ctx.interner.lookup(decl.name)))]
pub(crate) fn analyze_function(
    ctx: SemaContext<'_>,
    decl: &FunctionDecl,
    sig: &FuncType,
    kind: FunctionKind,
) -> SemaResult<TypedFunction> {
    let generics = match &kind {
        FunctionKind::Generic(def) => def.params.clone(),
        FunctionKind::Plain { .. } | FunctionKind::Method { .. } => Vec::new(),
    };
    let out = analyze_body(
        ctx,
        BodyInput {
            name: decl.name,
            span: decl.span,
            receiver: None,
            params: &decl.params,
            sig,
            generics,
            body: decl.body.as_ref(),
        },
    )?;
    tracing::debug!("function analysis complete");
    Ok(TypedFunction {
        name: decl.name,
        kind,
        sig: sig.clone(),
        params: out.params,
        locals: out.locals,
        body: out.body,
    })
}

#[tracing::instrument(level = "debug", skip_all, fields(name = ctx.interner.lookup(decl.name)))]
pub(crate) fn analyze_method(
    ctx: SemaContext<'_>,
    decl: &MethodDecl,
    receiver: Type,
    sig: &FuncType,
) -> SemaResult<TypedFunction> {
    let out = analyze_body(
        ctx,
        BodyInput {
            name: decl.name,
            span: decl.span,
            receiver: Some((receiver, decl.receiver_mutable)),
            params: &decl.params,
            sig,
            generics: Vec::new(),
            body: Some(&decl.body),
        },
    )?;
    tracing::debug!("method analysis complete");
    Ok(TypedFunction {
        name: decl.name,
        kind: FunctionKind::Method {
            receiver: decl.receiver,
        },
        sig: sig.clone(),
        params: out.params,
        locals: out.locals,
        body: out.body,
    })
}

fn analyze_body(ctx: SemaContext<'_>, input: BodyInput<'_>) -> SemaResult<BodyOutput> {
    let self_name = ctx.interner.intern("self");
    let mut analyzer = Analyzer::new(ctx);
    let frame = Frame::function((*input.sig.ret).clone(), input.generics);

    let (params, body) = analyzer.with_frame(frame, |this| {
        let mut params = Vec::with_capacity(input.params.len() + 1);
        if let Some((ty, mutable)) = input.receiver {
            params.push(this.declare_local(self_name, ty, mutable, SymbolOrigin::Param, input.span)?);
        }
        for (param, ty) in input.params.iter().zip(&input.sig.params) {
            params.push(this.declare_local(
                param.name,
                ty.clone(),
                param.mutable,
                SymbolOrigin::Param,
                param.span,
            )?);
        }
        let body = match input.body {
            Some(body) => Some(this.analyze_block(body, None)?),
            None => None,
        };
        Ok::<_, SemanticError>((params, body))
    })?;

    if let Some(body) = &body {
        check_return(input.name, &input.sig.ret, body, input.span)?;
    }
    Ok(BodyOutput {
        params,
        locals: analyzer.into_locals(),
        body,
    })
}

/// A body must end in `return` on every path unless it returns `void`
/// or never returns.
fn check_return(name: Name, ret: &Type, body: &TypedBlock, span: Span) -> SemaResult<()> {
    if ret.is_empty() || ret.is_no_return() || body.exit == Exit::Return {
        return Ok(());
    }
    report(SemanticError::MissingReturn {
        name,
        ret: ret.clone(),
        span,
    })
}

/// Initializer of a global with a declared type.
#[tracing::instrument(level = "debug", skip_all, fields(name = ctx.interner.lookup(decl.name)))]
pub(crate) fn analyze_global(
    ctx: SemaContext<'_>,
    decl: &GlobalDecl,
    ty: &Type,
) -> SemaResult<TypedGlobal> {
    let value = match decl.value {
        Some(value) => Analyzer::new(ctx).expect_expr(ty, value)?,
        None => TypedExpr::new(TypedExprKind::Zero, ty.clone(), decl.span),
    };
    Ok(TypedGlobal {
        name: decl.name,
        ty: ty.clone(),
        value,
        extern_name: decl.extern_name,
    })
}

/// Initializer of a global without a declared type; its type is inferred.
#[tracing::instrument(level = "debug", skip_all, fields(name = ctx.interner.lookup(decl.name)))]
pub(crate) fn infer_global(ctx: SemaContext<'_>, decl: &GlobalDecl) -> SemaResult<TypedGlobal> {
    let Some(value) = decl.value else {
        return report(SemanticError::Internal {
            message: "global declaration without type or value".to_string(),
            span: decl.span,
        });
    };
    let value = Analyzer::new(ctx).elaborate(&Expected::None, value)?;
    Ok(TypedGlobal {
        name: decl.name,
        ty: value.ty.clone(),
        value,
        extern_name: decl.extern_name,
    })
}
