//! Statement nodes.

use super::parsed_type::ParsedType;
use crate::{ExprId, Name, Span};

/// `{ stmts }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Block { stmts, span }
    }
}

/// One link of an `if / else if / else` chain.
///
/// The final `else` is a link with no condition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IfElse {
    pub cond: Option<ExprId>,
    pub body: Block,
    pub next: Option<Box<IfElse>>,
    pub span: Span,
}

impl IfElse {
    pub fn is_else(&self) -> bool {
        self.cond.is_none()
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Bare expression statement.
    Expr(ExprId),

    /// `let [mut] name [: ty] [= value]`; the parser guarantees at least one
    /// of `ty` and `value`.
    Let {
        mutable: bool,
        name: Name,
        ty: Option<ParsedType>,
        value: Option<ExprId>,
    },

    /// `return [value]`
    Return(Option<ExprId>),

    Block(Block),

    If(IfElse),

    /// `loop { body }`
    Loop(Block),

    /// `while cond { body }`
    While { cond: ExprId, body: Block },

    /// `for [mut] cursor in iter { body }`
    For {
        cursor_mutable: bool,
        cursor: Name,
        iter: ExprId,
        body: Block,
    },

    Break,

    Continue,
}
