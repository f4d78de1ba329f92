//! Types as written in source, before resolution.

use crate::{Name, Span};

/// A possibly package-qualified name: `name` or `pkg.name`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Path {
    pub package: Option<Name>,
    pub name: Name,
    pub span: Span,
}

impl Path {
    pub fn local(name: Name, span: Span) -> Self {
        Path {
            package: None,
            name,
            span,
        }
    }

    pub fn qualified(package: Name, name: Name, span: Span) -> Self {
        Path {
            package: Some(package),
            name,
            span,
        }
    }
}

/// Syntactic type annotation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsedType {
    /// Builtin, struct, alias or generic parameter name.
    Named(Path),
    /// `[size]elem`
    Array { size: u64, elem: Box<ParsedType> },
    /// `(a, b, ...)`
    Tuple(Vec<ParsedType>),
    /// `func(params) ret`; a missing return type is void.
    Function {
        params: Vec<ParsedType>,
        ret: Option<Box<ParsedType>>,
    },
    /// `&T` or `&mut T`
    Reference { mutable: bool, pointee: Box<ParsedType> },
    /// `A | B`
    Union(Vec<ParsedType>),
    /// `Self` inside a trait method signature.
    SelfType,
    /// `X`, the type of expressions that never produce a value.
    NoReturn,
}

impl ParsedType {
    pub fn named(name: Name, span: Span) -> Self {
        ParsedType::Named(Path::local(name, span))
    }

    pub fn array(size: u64, elem: ParsedType) -> Self {
        ParsedType::Array {
            size,
            elem: Box::new(elem),
        }
    }

    pub fn reference(mutable: bool, pointee: ParsedType) -> Self {
        ParsedType::Reference {
            mutable,
            pointee: Box::new(pointee),
        }
    }
}
