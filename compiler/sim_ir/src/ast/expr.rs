//! Expression nodes.
//!
//! All child expressions are `ExprId` indices into the module's arena.
//! Literal text is kept interned and unparsed: the analyzer decides the
//! literal's type first and only then reads its value.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use super::parsed_type::{ParsedType, Path};
use crate::{ExprId, ExprRange, Name, Span};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// `name: value` inside a struct literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldInit {
    pub name: Name,
    pub value: ExprId,
    pub span: Span,
}

/// Expression variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal, decimal digits as written: `42`
    Int(Name),

    /// Character literal: `'a'`
    Char(char),

    /// Float literal, decimal text as written: `2.5`, `1e-3`
    Float(Name),

    /// Boolean literal: `true`, `false`
    Bool(bool),

    /// String literal (interned contents)
    Str(Name),

    /// `left op right`, assignment included
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `op operand`
    Unary { op: UnaryOp, operand: ExprId },

    /// `name`, `pkg.name`, or `name::<T, ...>` for a generic function
    Ident {
        path: Path,
        generic_args: Vec<ParsedType>,
    },

    /// `func(args)`
    Call { func: ExprId, args: ExprRange },

    /// `(a, b, ...)`; a single element without a trailing comma is
    /// parenthesization sugar
    Tuple(ExprRange),

    /// `value as ty`
    Convert { ty: ParsedType, value: ExprId },

    /// `[N]T{a, b, ...}`; `ty` is always an array type
    Array { ty: ParsedType, elems: ExprRange },

    /// `base[index]`
    Index { base: ExprId, index: ExprId },

    /// `base.N` on a tuple, numeral text as written
    Extract {
        base: ExprId,
        index: Name,
        index_span: Span,
    },

    /// `Name{field: value, ...}`
    StructLit { ty: Path, fields: Vec<FieldInit> },

    /// `base.name`, a struct field or method
    Field {
        base: ExprId,
        name: Name,
        name_span: Span,
    },

    /// `&value` or `&mut value`
    Ref { mutable: bool, value: ExprId },

    /// `*value`
    Deref(ExprId),
}
