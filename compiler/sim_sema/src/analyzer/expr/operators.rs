//! Operator checking.
//!
//! The left operand is elaborated with the caller's expectation and the
//! right operand with the left operand's type, so `x + 1` types the literal
//! as `x`. Operand types must then be equal and belong to the operator's
//! class:
//!
//! | operators            | operand class | result  |
//! |----------------------|---------------|---------|
//! | `& \| ^ << >>`       | integer       | operand |
//! | `+ - * / %`          | number        | operand |
//! | `== !=`              | equatable     | `bool`  |
//! | `< <= > >=`          | number        | `bool`  |
//! | `&& \|\|`            | `bool`        | `bool`  |

use sim_ir::{BinaryOp, ExprArena, ExprId, ExprKind, Span, UnaryOp};
use sim_types::Type;

use super::literal::int_literal_type;
use crate::analyzer::{coerce, Analyzer, Expected};
use crate::error::{report, SemaResult, SemanticError};
use crate::ir::{BinaryKind, TypedExpr, TypedExprKind, UnaryKind};

impl<'a> Analyzer<'a> {
    pub(super) fn elaborate_binary(
        &mut self,
        expected: &Expected,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let left = self.elaborate(expected, left)?;
        let right = self.elaborate(&Expected::Type(left.ty.clone()), right)?;

        if op == BinaryOp::Assign {
            return check_assign(left, right, span);
        }

        let Some((kind, result)) = binary_rule(op, &left.ty, &right.ty) else {
            return report(SemanticError::IllegalBinaryOperation {
                op,
                left: left.ty,
                right: right.ty,
                span,
            });
        };
        Ok(TypedExpr::new(
            TypedExprKind::Binary {
                op: kind,
                left: Box::new(left),
                right: Box::new(right),
            },
            result,
            span,
        ))
    }

    pub(super) fn elaborate_unary(
        &mut self,
        expected: &Expected,
        op: UnaryOp,
        operand: ExprId,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        // `-literal` folds into the literal so that e.g. `-128` fits `i8`.
        if op == UnaryOp::Neg {
            let arena: &'a ExprArena = self.ctx.arena;
            match arena.get_expr(operand).kind {
                ExprKind::Int(text) => {
                    let ty = int_literal_type(expected);
                    if !(ty.is_signed_int() || ty.is_float()) {
                        return report(SemanticError::IllegalUnaryOperation {
                            op,
                            operand: ty,
                            span,
                        });
                    }
                    return self.elaborate_int(expected, text, true, span);
                }
                ExprKind::Float(text) => return self.elaborate_float(expected, text, true, span),
                _ => {}
            }
        }

        let operand = self.elaborate(expected, operand)?;
        let kind = match op {
            UnaryOp::Neg if operand.ty.is_signed_int() || operand.ty.is_float() => {
                UnaryKind::NumNeg
            }
            UnaryOp::Not if operand.ty.is_integer() => UnaryKind::IntBitNot,
            UnaryOp::Not if operand.ty.is_bool() => UnaryKind::BoolNot,
            UnaryOp::Neg | UnaryOp::Not => {
                return report(SemanticError::IllegalUnaryOperation {
                    op,
                    operand: operand.ty,
                    span,
                });
            }
        };
        let ty = operand.ty.clone();
        Ok(TypedExpr::new(
            TypedExprKind::Unary {
                op: kind,
                operand: Box::new(operand),
            },
            ty,
            span,
        ))
    }
}

/// `target = value`: equal types and a mutable target. Yields `void`.
fn check_assign(target: TypedExpr, value: TypedExpr, span: Span) -> SemaResult<TypedExpr> {
    let value = if value.ty.is_no_return() {
        coerce(value, &target.ty)?
    } else {
        value
    };
    if target.ty != value.ty {
        return report(SemanticError::IllegalBinaryOperation {
            op: BinaryOp::Assign,
            left: target.ty,
            right: value.ty,
            span,
        });
    }
    if !target.mutable {
        return report(SemanticError::NotMutable { span: target.span });
    }
    Ok(TypedExpr::new(
        TypedExprKind::Assign {
            target: Box::new(target),
            value: Box::new(value),
        },
        Type::Empty,
        span,
    ))
}

/// Checked operation and result type, or `None` if the operands are not
/// acceptable for `op`.
fn binary_rule(op: BinaryOp, left: &Type, right: &Type) -> Option<(BinaryKind, Type)> {
    if left != right {
        return None;
    }
    let ty = left;
    let (kind, accepted, result) = match op {
        BinaryOp::BitAnd => (BinaryKind::BitAnd, ty.is_integer(), ty.clone()),
        BinaryOp::BitOr => (BinaryKind::BitOr, ty.is_integer(), ty.clone()),
        BinaryOp::BitXor => (BinaryKind::BitXor, ty.is_integer(), ty.clone()),
        BinaryOp::Shl => (BinaryKind::Shl, ty.is_integer(), ty.clone()),
        BinaryOp::Shr => (BinaryKind::Shr, ty.is_integer(), ty.clone()),

        BinaryOp::Add => (BinaryKind::Add, ty.is_number(), ty.clone()),
        BinaryOp::Sub => (BinaryKind::Sub, ty.is_number(), ty.clone()),
        BinaryOp::Mul => (BinaryKind::Mul, ty.is_number(), ty.clone()),
        BinaryOp::Div => (BinaryKind::Div, ty.is_number(), ty.clone()),
        BinaryOp::Rem => (BinaryKind::Rem, ty.is_number(), ty.clone()),

        BinaryOp::Eq => (BinaryKind::Eq, ty.is_equatable(), Type::Bool),
        BinaryOp::NotEq => (BinaryKind::NotEq, ty.is_equatable(), Type::Bool),

        BinaryOp::Lt => (BinaryKind::Lt, ty.is_number(), Type::Bool),
        BinaryOp::LtEq => (BinaryKind::LtEq, ty.is_number(), Type::Bool),
        BinaryOp::Gt => (BinaryKind::Gt, ty.is_number(), Type::Bool),
        BinaryOp::GtEq => (BinaryKind::GtEq, ty.is_number(), Type::Bool),

        BinaryOp::And => (BinaryKind::And, ty.is_bool(), Type::Bool),
        BinaryOp::Or => (BinaryKind::Or, ty.is_bool(), Type::Bool),

        BinaryOp::Assign => return None,
    };
    accepted.then_some((kind, result))
}
