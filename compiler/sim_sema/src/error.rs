//! Semantic errors.
//!
//! Analysis stops at the first error. Every error carries the span of the
//! offending node; [`SemanticError::to_diagnostic`] renders it with type
//! names for display.

use num_bigint::BigInt;
use sim_diagnostic::{Diagnostic, ErrorCode};
use sim_ir::{BinaryOp, Name, Span, StringInterner, UnaryOp};
use sim_types::Type;
use thiserror::Error;

pub type SemaResult<T> = Result<T, SemanticError>;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum SemanticError {
    #[error("unknown identifier")]
    UnknownIdentifier { name: Name, span: Span },

    #[error("identifier is already declared")]
    IdentifierDuplication { name: Name, span: Span },

    #[error("type mismatch")]
    TypeMismatch {
        expected: Type,
        found: Type,
        span: Span,
    },

    #[error("illegal binary operation `{}`", op.as_symbol())]
    IllegalBinaryOperation {
        op: BinaryOp,
        left: Type,
        right: Type,
        span: Span,
    },

    #[error("illegal unary operation `{}`", op.as_symbol())]
    IllegalUnaryOperation {
        op: UnaryOp,
        operand: Type,
        span: Span,
    },

    #[error("illegal conversion")]
    IllegalConversion { from: Type, to: Type, span: Span },

    #[error("called value is not a function")]
    NotAFunction { found: Type, span: Span },

    #[error("value is not an array")]
    NotAnArray { found: Type, span: Span },

    #[error("value is not a tuple")]
    NotATuple { found: Type, span: Span },

    #[error("value is not a struct")]
    NotAStruct { found: Type, span: Span },

    #[error("expected {expected} arguments, found {found}")]
    ParameterCountMismatch {
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("tuple index out of range")]
    InvalidTupleIndex { index: Name, span: Span },

    #[error("`break` or `continue` outside of a loop")]
    LoopControlOutsideLoop { span: Span },

    #[error("value is not mutable")]
    NotMutable { span: Span },

    #[error("function does not return on every path")]
    MissingReturn { name: Name, ret: Type, span: Span },

    #[error("literal `{literal}` does not fit its type")]
    LiteralOutOfRange {
        literal: String,
        ty: Type,
        span: Span,
    },

    /// A type or inferred global whose definition depends on itself.
    #[error("definition depends on itself")]
    RecursiveType { name: Name, span: Span },

    #[error("struct does not implement trait")]
    TraitNotImplemented {
        trait_name: Name,
        ty: Name,
        method: Name,
        span: Span,
    },

    #[error("value is not a reference")]
    NotAReference { found: Type, span: Span },

    #[error("expected {expected} generic arguments, found {found}")]
    GenericArgCountMismatch {
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("value takes no generic arguments")]
    NotGeneric { name: Name, span: Span },

    #[error("unknown package")]
    UnknownPackage { path: Name, span: Span },

    #[error("internal error: {message}")]
    Internal { message: String, span: Span },
}

impl SemanticError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SemanticError::TypeMismatch { .. } => ErrorCode::E2001,
            SemanticError::IllegalBinaryOperation { .. } => ErrorCode::E2002,
            SemanticError::UnknownIdentifier { .. } => ErrorCode::E2003,
            SemanticError::ParameterCountMismatch { .. } => ErrorCode::E2004,
            SemanticError::IllegalUnaryOperation { .. } => ErrorCode::E2005,
            SemanticError::IdentifierDuplication { .. } => ErrorCode::E2006,
            SemanticError::IllegalConversion { .. } => ErrorCode::E2007,
            SemanticError::NotAFunction { .. } => ErrorCode::E2008,
            SemanticError::NotAnArray { .. } => ErrorCode::E2009,
            SemanticError::NotATuple { .. } => ErrorCode::E2010,
            SemanticError::NotAStruct { .. } => ErrorCode::E2011,
            SemanticError::InvalidTupleIndex { .. } => ErrorCode::E2012,
            SemanticError::LoopControlOutsideLoop { .. } => ErrorCode::E2013,
            SemanticError::NotMutable { .. } => ErrorCode::E2014,
            SemanticError::MissingReturn { .. } => ErrorCode::E2015,
            SemanticError::LiteralOutOfRange { .. } => ErrorCode::E2016,
            SemanticError::RecursiveType { .. } => ErrorCode::E2017,
            SemanticError::TraitNotImplemented { .. } => ErrorCode::E2018,
            SemanticError::NotAReference { .. } => ErrorCode::E2019,
            SemanticError::GenericArgCountMismatch { .. } => ErrorCode::E2020,
            SemanticError::NotGeneric { .. } => ErrorCode::E2021,
            SemanticError::UnknownPackage { .. } => ErrorCode::E2022,
            SemanticError::Internal { .. } => ErrorCode::E9001,
        }
    }

    /// Location of the offending node.
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UnknownIdentifier { span, .. }
            | SemanticError::IdentifierDuplication { span, .. }
            | SemanticError::TypeMismatch { span, .. }
            | SemanticError::IllegalBinaryOperation { span, .. }
            | SemanticError::IllegalUnaryOperation { span, .. }
            | SemanticError::IllegalConversion { span, .. }
            | SemanticError::NotAFunction { span, .. }
            | SemanticError::NotAnArray { span, .. }
            | SemanticError::NotATuple { span, .. }
            | SemanticError::NotAStruct { span, .. }
            | SemanticError::ParameterCountMismatch { span, .. }
            | SemanticError::InvalidTupleIndex { span, .. }
            | SemanticError::LoopControlOutsideLoop { span }
            | SemanticError::NotMutable { span }
            | SemanticError::MissingReturn { span, .. }
            | SemanticError::LiteralOutOfRange { span, .. }
            | SemanticError::RecursiveType { span, .. }
            | SemanticError::TraitNotImplemented { span, .. }
            | SemanticError::NotAReference { span, .. }
            | SemanticError::GenericArgCountMismatch { span, .. }
            | SemanticError::NotGeneric { span, .. }
            | SemanticError::UnknownPackage { span, .. }
            | SemanticError::Internal { span, .. } => *span,
        }
    }

    /// Render with names and types spelled out.
    pub fn to_diagnostic(&self, interner: &StringInterner) -> Diagnostic {
        let ty = |t: &Type| t.display(interner);
        let name = |n: Name| interner.lookup(n);
        let span = self.span();
        let diag = Diagnostic::error(self.code());

        match self {
            SemanticError::UnknownIdentifier { name: n, .. } => diag
                .with_message(format!("unknown identifier `{}`", name(*n)))
                .with_label(span, "not found in this scope"),
            SemanticError::IdentifierDuplication { name: n, .. } => diag
                .with_message(format!("`{}` is already declared", name(*n)))
                .with_label(span, "redeclared here"),
            SemanticError::TypeMismatch {
                expected, found, ..
            } => diag
                .with_message(format!(
                    "type mismatch: expected `{}`, found `{}`",
                    ty(expected),
                    ty(found)
                ))
                .with_label(span, format!("expected `{}`", ty(expected))),
            SemanticError::IllegalBinaryOperation {
                op, left, right, ..
            } => diag
                .with_message(format!(
                    "cannot apply `{}` to `{}` and `{}`",
                    op.as_symbol(),
                    ty(left),
                    ty(right)
                ))
                .with_label(span, "illegal operands"),
            SemanticError::IllegalUnaryOperation { op, operand, .. } => diag
                .with_message(format!(
                    "cannot apply unary `{}` to `{}`",
                    op.as_symbol(),
                    ty(operand)
                ))
                .with_label(span, "illegal operand"),
            SemanticError::IllegalConversion { from, to, .. } => diag
                .with_message(format!("cannot convert `{}` to `{}`", ty(from), ty(to)))
                .with_label(span, "illegal conversion"),
            SemanticError::NotAFunction { found, .. } => diag
                .with_message(format!("`{}` is not a function", ty(found)))
                .with_label(span, "called here"),
            SemanticError::NotAnArray { found, .. } => diag
                .with_message(format!("`{}` is not an array", ty(found)))
                .with_label(span, "expected an array"),
            SemanticError::NotATuple { found, .. } => diag
                .with_message(format!("`{}` is not a tuple", ty(found)))
                .with_label(span, "expected a tuple"),
            SemanticError::NotAStruct { found, .. } => diag
                .with_message(format!("`{}` is not a struct", ty(found)))
                .with_label(span, "expected a struct"),
            SemanticError::ParameterCountMismatch {
                expected, found, ..
            } => diag
                .with_message(format!("expected {expected} arguments, found {found}"))
                .with_label(span, "wrong number of arguments"),
            SemanticError::InvalidTupleIndex { index, .. } => diag
                .with_message(format!("tuple index `{}` is out of range", name(*index)))
                .with_label(span, "no such element"),
            SemanticError::LoopControlOutsideLoop { .. } => diag
                .with_message("`break` or `continue` outside of a loop")
                .with_label(span, "not inside a loop"),
            SemanticError::NotMutable { .. } => diag
                .with_message("cannot mutate an immutable value")
                .with_label(span, "not mutable"),
            SemanticError::MissingReturn { name: n, ret, .. } => diag
                .with_message(format!(
                    "function `{}` must return `{}` on every path",
                    name(*n),
                    ty(ret)
                ))
                .with_label(span, "missing return"),
            SemanticError::LiteralOutOfRange { literal, ty: t, .. } => diag
                .with_message(format!("literal `{literal}` does not fit `{}`", ty(t)))
                .with_label(span, "out of range"),
            SemanticError::RecursiveType { name: n, .. } => diag
                .with_message(format!("`{}` is defined in terms of itself", name(*n)))
                .with_label(span, "recursive definition")
                .with_note("break the cycle with a reference or a declared type"),
            SemanticError::TraitNotImplemented {
                trait_name,
                ty: t,
                method,
                ..
            } => diag
                .with_message(format!(
                    "`{}` does not implement `{}`",
                    name(*t),
                    name(*trait_name)
                ))
                .with_label(span, format!("method `{}` missing or mismatched", name(*method))),
            SemanticError::NotAReference { found, .. } => diag
                .with_message(format!("`{}` is not a reference", ty(found)))
                .with_label(span, "cannot dereference"),
            SemanticError::GenericArgCountMismatch {
                expected, found, ..
            } => diag
                .with_message(format!("expected {expected} generic arguments, found {found}"))
                .with_label(span, "wrong number of generic arguments"),
            SemanticError::NotGeneric { name: n, .. } => diag
                .with_message(format!("`{}` takes no generic arguments", name(*n)))
                .with_label(span, "not generic"),
            SemanticError::UnknownPackage { path, .. } => diag
                .with_message(format!("unknown package `{}`", name(*path)))
                .with_label(span, "imported here"),
            SemanticError::Internal { message, .. } => diag
                .with_message(format!("internal error: {message}"))
                .with_label(span, "here"),
        }
    }
}

/// The single exit point for errors: logs, then fails.
#[cold]
pub(crate) fn report<T>(err: SemanticError) -> SemaResult<T> {
    tracing::debug!(code = %err.code(), span = ?err.span(), error = %err, "semantic error");
    Err(err)
}

/// Warning for an integer literal wrapped to fit `ty`.
pub(crate) fn wrapped_literal(
    interner: &StringInterner,
    literal: &BigInt,
    wrapped: &BigInt,
    ty: &Type,
    span: Span,
) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E2016)
        .with_message(format!("literal `{literal}` wrapped to `{wrapped}`"))
        .with_label(span, format!("does not fit `{}`", ty.display(interner)))
}
