//! Type system for the Sim semantic analyzer.
//!
//! # Architecture
//!
//! - `core`: the closed [`Type`] sum type, its components, classification
//!   predicates and canonical rendering
//! - `subst`: structural equality and rewriting under an explicit
//!   substitution for `Self` and generic parameters
//! - `zero`: the language-defined default value of each type
//!
//! Types are plain values compared structurally; there is no interning and
//! no inference variable. Struct types are shared through `Arc` since they
//! appear in many signatures.

mod core;
mod subst;
mod zero;

pub use crate::core::{Field, FuncType, GenericParam, StructType, Type};
pub use subst::Subst;
pub use zero::ZeroValue;
