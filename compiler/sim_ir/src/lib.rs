//! Sim IR - input data structures for semantic analysis.
//!
//! This crate holds everything the analyzer consumes from the front end:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Syntax nodes (expressions, statements, items, parsed types)
//! - Arena allocation for expressions
//!
//! The parser producing these trees lives outside this workspace; the
//! analyzer assumes a well-formed tree and only checks semantics.
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and literal text are `Name(u32)`
//! - **Flatten Expressions**: children are `ExprId(u32)` indices into an arena
//! - **Spans Everywhere**: every node exposes a `Span` for diagnostics

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod span;

pub use arena::ExprArena;
pub use ast::{
    BinaryOp, Block, Expr, ExprKind, FieldDecl, FieldInit, FunctionDecl, GlobalDecl, IfElse,
    Import, MethodDecl, Module, ParamDecl, ParsedType, Path, Stmt, StmtKind, StructDecl, TraitDecl,
    TraitMethodSig, TypeAliasDecl, UnaryOp,
};
pub use expr_id::{ExprId, ExprRange};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
