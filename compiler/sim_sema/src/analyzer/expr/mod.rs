//! Bidirectional expression elaboration.
//!
//! Each node is elaborated against an [`Expected`] hint and produces a
//! [`TypedExpr`]. Split into:
//! - `literal.rs`: literals and their narrowing
//! - `operators.rs`: binary and unary operators, assignment
//! - `call.rs`: calls, identifiers and generic instantiation
//! - `access.rs`: arrays, tuples, structs, fields and references

mod access;
mod call;
mod literal;
mod operators;

use sim_ir::{ExprArena, ExprId, ExprKind, ExprRange, ParsedType, Span};
use sim_types::Type;

use super::{Analyzer, Expected};
use crate::error::{report, SemaResult, SemanticError};
use crate::ir::{TypedExpr, TypedExprKind};
use crate::stack::ensure_sufficient_stack;

impl<'a> Analyzer<'a> {
    /// Elaborate one expression.
    pub(crate) fn elaborate(&mut self, expected: &Expected, id: ExprId) -> SemaResult<TypedExpr> {
        ensure_sufficient_stack(|| self.elaborate_inner(expected, id))
    }

    #[tracing::instrument(level = "trace", skip_all, fields(expr = id.index()))]
    fn elaborate_inner(&mut self, expected: &Expected, id: ExprId) -> SemaResult<TypedExpr> {
        let arena: &'a ExprArena = self.ctx.arena;
        let expr = arena.get_expr(id);
        let span = expr.span;

        match &expr.kind {
            ExprKind::Int(text) => self.elaborate_int(expected, *text, false, span),
            ExprKind::Char(c) => self.elaborate_char(expected, *c, span),
            ExprKind::Float(text) => self.elaborate_float(expected, *text, false, span),
            ExprKind::Bool(value) => Ok(TypedExpr::new(
                TypedExprKind::Bool(*value),
                Type::Bool,
                span,
            )),
            ExprKind::Str(text) => Ok(TypedExpr::new(TypedExprKind::Str(*text), Type::Str, span)),

            ExprKind::Binary { op, left, right } => {
                self.elaborate_binary(expected, *op, *left, *right, span)
            }
            ExprKind::Unary { op, operand } => self.elaborate_unary(expected, *op, *operand, span),

            ExprKind::Ident { path, generic_args } => self.elaborate_ident(path, generic_args, span),
            ExprKind::Call { func, args } => self.elaborate_call(*func, *args, span),

            ExprKind::Tuple(elems) => self.elaborate_tuple(expected, *elems, span),
            ExprKind::Convert { ty, value } => self.elaborate_conversion(ty, *value, span),

            ExprKind::Array { ty, elems } => self.elaborate_array(ty, *elems, span),
            ExprKind::Index { base, index } => self.elaborate_index(*base, *index, span),
            ExprKind::Extract {
                base,
                index,
                index_span,
            } => self.elaborate_extract(expected, *base, *index, *index_span, span),
            ExprKind::StructLit { ty, fields } => self.elaborate_struct_lit(ty, fields, span),
            ExprKind::Field {
                base,
                name,
                name_span,
            } => self.elaborate_field(*base, *name, *name_span, span),
            ExprKind::Ref { mutable, value } => self.elaborate_ref(expected, *mutable, *value, span),
            ExprKind::Deref(value) => self.elaborate_deref(*value, span),
        }
    }

    /// `(a, b, ...)`. A one-element tuple without a tuple expectation is
    /// just parentheses.
    fn elaborate_tuple(
        &mut self,
        expected: &Expected,
        elems: ExprRange,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let arena: &'a ExprArena = self.ctx.arena;
        let ids = arena.get_expr_list(elems);
        if let [only] = ids {
            if !expected.is_tuple() {
                return self.elaborate(expected, *only);
            }
        }

        let slots = expected.tuple_slots(ids.len());
        let elems = ids
            .iter()
            .zip(&slots)
            .map(|(id, slot)| self.elaborate(slot, *id))
            .collect::<SemaResult<Vec<_>>>()?;

        let ty = Type::Tuple(elems.iter().map(|e| e.ty.clone()).collect());
        let mutable = !elems.is_empty() && elems.iter().all(|e| e.mutable);
        Ok(TypedExpr::place(TypedExprKind::Tuple(elems), ty, mutable, span))
    }

    /// `T(value)`.
    fn elaborate_conversion(
        &mut self,
        ty: &ParsedType,
        value: ExprId,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let target = self.resolve_type(ty, span)?;
        let value = self.elaborate(&Expected::Type(target.clone()), value)?;

        if value.ty == target {
            return Ok(value);
        }
        let kind = if value.ty.is_number() && target.is_number() {
            TypedExprKind::NumToNum(Box::new(value))
        } else if value.ty.is_no_return() {
            TypedExprKind::NoReturnToAny(Box::new(value))
        } else {
            return report(SemanticError::IllegalConversion {
                from: value.ty,
                to: target,
                span,
            });
        };
        Ok(TypedExpr::new(kind, target, span))
    }
}
