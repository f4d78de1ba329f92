//! Package-level declarations.

use super::parsed_type::{ParsedType, Path};
use super::stmt::Block;
use crate::{ExprId, Name, Span};

/// One compilation unit: every declaration of one package.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Module {
    pub imports: Vec<Import>,
    pub structs: Vec<StructDecl>,
    pub aliases: Vec<TypeAliasDecl>,
    pub traits: Vec<TraitDecl>,
    pub globals: Vec<GlobalDecl>,
    pub functions: Vec<FunctionDecl>,
    pub methods: Vec<MethodDecl>,
}

/// `import a.b.c [as alias]`, or `import a.b.c as .` when `linked`.
///
/// `path` is the dotted package path as one interned string. Qualified
/// access uses `alias`, defaulting to the last path segment. A linked
/// import also exposes the package's public definitions unqualified.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Import {
    pub path: Name,
    pub alias: Option<Name>,
    pub linked: bool,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamDecl {
    pub mutable: bool,
    pub name: Name,
    pub ty: ParsedType,
    pub span: Span,
}

/// Function or generic function declaration.
///
/// A function without a body is an external declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDecl {
    pub public: bool,
    pub name: Name,
    pub generics: Vec<Name>,
    pub params: Vec<ParamDecl>,
    pub ret: Option<ParsedType>,
    pub body: Option<Block>,
    pub extern_name: Option<Name>,
    pub span: Span,
}

/// `func (mut? self: Receiver) name(params) ret { body }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodDecl {
    pub public: bool,
    pub receiver: Name,
    pub receiver_mutable: bool,
    pub name: Name,
    pub params: Vec<ParamDecl>,
    pub ret: Option<ParsedType>,
    pub body: Block,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    pub public: bool,
    pub mutable: bool,
    pub name: Name,
    pub ty: ParsedType,
    pub span: Span,
}

/// `struct Name: Trait, ... { fields }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructDecl {
    pub public: bool,
    pub name: Name,
    pub fields: Vec<FieldDecl>,
    pub implements: Vec<Path>,
    pub span: Span,
}

/// `type Name = ty`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeAliasDecl {
    pub public: bool,
    pub name: Name,
    pub ty: ParsedType,
    pub span: Span,
}

/// Method signature inside a trait; the receiver is implicit.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TraitMethodSig {
    pub name: Name,
    pub params: Vec<ParsedType>,
    pub ret: Option<ParsedType>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TraitDecl {
    pub public: bool,
    pub name: Name,
    pub methods: Vec<TraitMethodSig>,
    pub span: Span,
}

/// Package-level `let`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GlobalDecl {
    pub public: bool,
    pub mutable: bool,
    pub name: Name,
    pub ty: Option<ParsedType>,
    pub value: Option<ExprId>,
    pub extern_name: Option<Name>,
    pub span: Span,
}
