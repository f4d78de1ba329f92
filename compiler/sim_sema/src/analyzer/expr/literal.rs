//! Literals.
//!
//! Integer literals take a numeric expected type and default to `isize`;
//! float literals take a float expected type and default to `f64`;
//! character literals are integers holding the code point, defaulting to
//! `i32`. The value is then range-checked against the final type.

use num_bigint::BigInt;
use sim_ir::{Name, Span};
use sim_types::Type;

use crate::analyzer::{Analyzer, Expected};
use crate::config::LiteralOverflow;
use crate::error::{report, wrapped_literal, SemaResult, SemanticError};
use crate::ir::{TypedExpr, TypedExprKind};
use crate::literal::{narrow_int, parse_int, FloatConst, Narrowed};

impl Analyzer<'_> {
    /// Integer literal from its text; `negative` when folded with a
    /// leading `-`.
    pub(super) fn elaborate_int(
        &mut self,
        expected: &Expected,
        text: Name,
        negative: bool,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let Some(value) = parse_int(self.ctx.interner.lookup(text)) else {
            return report(SemanticError::Internal {
                message: format!("malformed integer literal `{}`", self.ctx.interner.lookup(text)),
                span,
            });
        };
        let value = if negative { -value } else { value };
        let ty = int_literal_type(expected);
        self.int_constant(value, ty, span)
    }

    pub(super) fn elaborate_char(
        &mut self,
        expected: &Expected,
        c: char,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let ty = expected.number().cloned().unwrap_or(Type::I32);
        self.int_constant(BigInt::from(u32::from(c)), ty, span)
    }

    pub(super) fn elaborate_float(
        &mut self,
        expected: &Expected,
        text: Name,
        negative: bool,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let Some(value) = FloatConst::parse(self.ctx.interner.lookup(text)) else {
            return report(SemanticError::Internal {
                message: format!("malformed float literal `{}`", self.ctx.interner.lookup(text)),
                span,
            });
        };
        let value = if negative { value.negated() } else { value };
        let ty = expected.float().cloned().unwrap_or(Type::F64);
        float_constant(value, ty, span)
    }

    /// Integer-valued constant of type `ty` (an integer or float type).
    fn int_constant(&self, value: BigInt, ty: Type, span: Span) -> SemaResult<TypedExpr> {
        let Some(bits) = ty.int_bits(self.ctx.config.pointer_width) else {
            return float_constant(FloatConst::from_int(value), ty, span);
        };

        match narrow_int(&value, ty.is_signed_int(), bits) {
            Narrowed::Fits => Ok(TypedExpr::new(TypedExprKind::Int(value), ty, span)),
            Narrowed::Overflows { wrapped } => match self.ctx.config.literal_overflow {
                LiteralOverflow::Error => report(SemanticError::LiteralOutOfRange {
                    literal: value.to_string(),
                    ty,
                    span,
                }),
                LiteralOverflow::Wrap => {
                    let warning = wrapped_literal(self.ctx.interner, &value, &wrapped, &ty, span);
                    tracing::warn!(bits, span = ?span, "{warning}");
                    Ok(TypedExpr::new(TypedExprKind::Int(wrapped), ty, span))
                }
            },
        }
    }
}

/// Type an integer literal takes under `expected`.
pub(super) fn int_literal_type(expected: &Expected) -> Type {
    expected.number().cloned().unwrap_or(Type::ISIZE)
}

fn float_constant(value: FloatConst, ty: Type, span: Span) -> SemaResult<TypedExpr> {
    let bits = match &ty {
        Type::Float(bits) => *bits,
        _ => 64,
    };
    if !value.fits(bits) {
        return report(SemanticError::LiteralOutOfRange {
            literal: value.to_string(),
            ty,
            span,
        });
    }
    Ok(TypedExpr::new(TypedExprKind::Float(value), ty, span))
}
