//! Semantic analysis for Sim.
//!
//! Takes the syntax tree of one package (see `sim_ir`) and produces a fully
//! typed, scope-resolved IR for the lowering stage.
//!
//! # Architecture
//!
//! - `program`: entry point; owns analyzed packages and runs the passes
//! - `declare`: package-level passes (names, types, traits, signatures)
//! - `scope`: package tables with import links, and the frame stack used
//!   inside function bodies
//! - `analyzer`: bidirectional expression elaboration, statement analysis
//!   and control-flow exit classification
//! - `generic`: the instance cache of generic functions
//! - `conformance`: trait conformance of struct types
//! - `ir`: the typed output tree
//!
//! # Passes
//!
//! ```text
//! imports ─▶ type names ─▶ struct/alias types ─▶ traits ─▶ signatures
//!         ─▶ conformance ─▶ globals ─▶ bodies (optionally parallel)
//! ```
//!
//! Analysis is fail-fast: the first error aborts the package and is
//! returned as a [`SemanticError`].

mod analyzer;
mod config;
mod conformance;
mod declare;
mod error;
mod generic;
pub mod ir;
mod literal;
mod package;
mod program;
mod scope;
mod stack;
mod tracing_setup;

pub use config::{LiteralOverflow, SemaConfig};
pub use conformance::{satisfies, TraitDef, TraitMethod};
pub use error::SemanticError;
pub use generic::{ArityMismatch, GenericFuncDef, GenericInstance, InstanceKey};
pub use literal::FloatConst;
pub use package::{
    AliasDef, FunctionDef, GlobalValue, GlobalVar, MethodDef, Package, StructDef, TypeDef,
};
pub use program::Program;
pub use scope::{LoopId, Symbol, SymbolOrigin};
pub use tracing_setup::init_tracing;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
