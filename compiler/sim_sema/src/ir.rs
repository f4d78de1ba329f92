//! Typed IR produced by analysis.
//!
//! Every expression node carries its resolved [`Type`] and whether it is a
//! mutable place. Implicit behavior is explicit here: numeric conversions,
//! `X` coercions, zero-filled struct fields and instantiated generics all
//! appear as nodes, so the lowering stage never re-derives types.

use std::sync::Arc;

use num_bigint::BigInt;
use sim_ir::{Name, Span};
use sim_types::{FuncType, Type};

use crate::generic::{GenericFuncDef, GenericInstance};
use crate::literal::FloatConst;
use crate::package::Package;
use crate::scope::{LoopId, SymbolOrigin};

/// Index of a local binding in [`TypedFunction::locals`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LocalId(u32);

impl LocalId {
    pub(crate) fn new(index: usize) -> Self {
        LocalId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct LocalDecl {
    pub name: Name,
    pub ty: Type,
    pub mutable: bool,
    pub origin: SymbolOrigin,
}

/// Checked binary operation. Operand types are equal; integer versus float
/// semantics follow from the operand type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryKind {
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryKind {
    /// Negation of a signed integer or float.
    NumNeg,
    /// Bitwise complement of an integer.
    IntBitNot,
    BoolNot,
}

#[derive(Clone, Debug)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub ty: Type,
    pub mutable: bool,
    pub span: Span,
}

impl TypedExpr {
    pub(crate) fn new(kind: TypedExprKind, ty: Type, span: Span) -> Self {
        TypedExpr {
            kind,
            ty,
            mutable: false,
            span,
        }
    }

    pub(crate) fn place(kind: TypedExprKind, ty: Type, mutable: bool, span: Span) -> Self {
        TypedExpr {
            kind,
            ty,
            mutable,
            span,
        }
    }
}

#[derive(Clone, Debug)]
pub enum TypedExprKind {
    /// Integer constant, already narrowed to the node's type.
    Int(BigInt),
    Float(FloatConst),
    Bool(bool),
    Str(Name),

    Binary {
        op: BinaryKind,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
    Assign {
        target: Box<TypedExpr>,
        value: Box<TypedExpr>,
    },
    Unary {
        op: UnaryKind,
        operand: Box<TypedExpr>,
    },

    /// Parameter, local or loop cursor.
    Local(LocalId),
    /// Package-level variable or function.
    Global { package: Name, name: Name },
    /// Generic function used with concrete type arguments.
    GenericInstance(Arc<GenericInstance>),
    /// Method bound to its receiver.
    Method {
        receiver: Box<TypedExpr>,
        package: Name,
        struct_name: Name,
        name: Name,
    },

    Call {
        func: Box<TypedExpr>,
        args: Vec<TypedExpr>,
    },
    Tuple(Vec<TypedExpr>),
    Array(Vec<TypedExpr>),
    /// Struct literal; fields in declaration order.
    Struct(Vec<TypedExpr>),
    /// Zero value of the node's type.
    Zero,

    /// Numeric conversion to the node's type.
    NumToNum(Box<TypedExpr>),
    /// `X` value used where the node's type is expected.
    NoReturnToAny(Box<TypedExpr>),

    Index {
        base: Box<TypedExpr>,
        index: Box<TypedExpr>,
    },
    Extract {
        base: Box<TypedExpr>,
        index: usize,
    },
    Field {
        base: Box<TypedExpr>,
        index: usize,
    },
    Ref(Box<TypedExpr>),
    Deref(Box<TypedExpr>),
}

/// How control leaves a block. Ordered: a sequence of statements and an
/// `if` chain both take the strongest (largest) exit seen.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, Default)]
pub enum Exit {
    /// Falls through.
    #[default]
    None,
    NextLoop,
    BreakLoop,
    Return,
}

#[derive(Clone, Debug)]
pub struct TypedBlock {
    pub stmts: Vec<TypedStmt>,
    pub exit: Exit,
}

#[derive(Clone, Debug)]
pub struct TypedIf {
    /// `None` for a final `else`.
    pub cond: Option<TypedExpr>,
    pub body: TypedBlock,
    pub next: Option<Box<TypedIf>>,
}

#[derive(Clone, Debug)]
pub enum TypedStmt {
    Expr(TypedExpr),
    Let {
        local: LocalId,
        value: TypedExpr,
    },
    Return(Option<TypedExpr>),
    If(TypedIf),
    Loop {
        id: LoopId,
        body: TypedBlock,
    },
    While {
        id: LoopId,
        cond: TypedExpr,
        body: TypedBlock,
    },
    For {
        id: LoopId,
        cursor: LocalId,
        iter: TypedExpr,
        body: TypedBlock,
    },
    Break(LoopId),
    Continue(LoopId),
}

#[derive(Clone, Debug)]
pub enum FunctionKind {
    Plain { extern_name: Option<Name> },
    /// Method of the struct `receiver`; its first local is `self`.
    Method { receiver: Name },
    Generic(Arc<GenericFuncDef>),
}

#[derive(Clone, Debug)]
pub struct TypedFunction {
    pub name: Name,
    pub kind: FunctionKind,
    pub sig: FuncType,
    pub params: Vec<LocalId>,
    pub locals: Vec<LocalDecl>,
    /// `None` for external functions.
    pub body: Option<TypedBlock>,
}

impl TypedFunction {
    pub fn local(&self, id: LocalId) -> &LocalDecl {
        &self.locals[id.index()]
    }
}

#[derive(Clone, Debug)]
pub struct TypedGlobal {
    pub name: Name,
    pub ty: Type,
    /// Initializer, or [`TypedExprKind::Zero`].
    pub value: TypedExpr,
    pub extern_name: Option<Name>,
}

/// Result of analyzing one package.
#[derive(Clone, Debug)]
pub struct TypedPackage {
    pub package: Arc<Package>,
    pub globals: Vec<TypedGlobal>,
    pub functions: Vec<TypedFunction>,
}

impl TypedPackage {
    pub fn function(&self, name: Name) -> Option<&TypedFunction> {
        self.functions
            .iter()
            .find(|f| f.name == name && !matches!(f.kind, FunctionKind::Method { .. }))
    }

    pub fn method(&self, receiver: Name, name: Name) -> Option<&TypedFunction> {
        self.functions.iter().find(|f| {
            f.name == name && matches!(f.kind, FunctionKind::Method { receiver: r } if r == receiver)
        })
    }
}
