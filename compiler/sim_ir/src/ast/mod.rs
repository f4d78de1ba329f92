//! Syntax tree consumed by semantic analysis.
//!
//! Expressions are arena-allocated (see [`ExprArena`](crate::ExprArena));
//! statements, items and parsed types are ordinary owned trees since they
//! are visited exactly once.

mod expr;
mod items;
mod operators;
mod parsed_type;
mod stmt;

pub use expr::{Expr, ExprKind, FieldInit};
pub use items::{
    FieldDecl, FunctionDecl, GlobalDecl, Import, MethodDecl, Module, ParamDecl, StructDecl,
    TraitDecl, TraitMethodSig, TypeAliasDecl,
};
pub use operators::{BinaryOp, UnaryOp};
pub use parsed_type::{ParsedType, Path};
pub use stmt::{Block, IfElse, Stmt, StmtKind};

#[cfg(test)]
mod tests;
