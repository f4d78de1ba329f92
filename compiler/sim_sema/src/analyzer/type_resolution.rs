//! Resolution of types as written (`ParsedType`) into semantic types.
//!
//! The structural part is shared; only named types differ between the
//! declaration pass (which resolves struct and alias names lazily) and body
//! analysis (which reads frozen tables). [`NamedTypes`] is that seam.

use sim_ir::{Name, ParsedType, Path, Span, StringInterner};
use sim_types::{GenericParam, Type};

use crate::error::{report, SemaResult, SemanticError};
use crate::scope::PackageScope;

/// Resolution of type names and `Self`.
pub(crate) trait NamedTypes {
    fn named(&mut self, path: &Path) -> SemaResult<Type>;

    fn self_type(&mut self, span: Span) -> SemaResult<Type>;
}

/// Lower `parsed` to a [`Type`]. `span` locates errors for parts of the
/// type that carry no span of their own.
pub(crate) fn lower_type(
    parsed: &ParsedType,
    span: Span,
    names: &mut impl NamedTypes,
) -> SemaResult<Type> {
    match parsed {
        ParsedType::Named(path) => names.named(path),
        ParsedType::Array { size, elem } => Ok(Type::array(*size, lower_type(elem, span, names)?)),
        ParsedType::Tuple(elems) => Ok(Type::Tuple(lower_all(elems, span, names)?)),
        ParsedType::Function { params, ret } => {
            let params = lower_all(params, span, names)?;
            let ret = match ret {
                Some(ret) => lower_type(ret, span, names)?,
                None => Type::Empty,
            };
            Ok(Type::function(params, ret))
        }
        ParsedType::Reference { mutable, pointee } => {
            Ok(Type::reference(*mutable, lower_type(pointee, span, names)?))
        }
        ParsedType::Union(variants) => Ok(Type::union(lower_all(variants, span, names)?)),
        ParsedType::SelfType => names.self_type(span),
        ParsedType::NoReturn => Ok(Type::NoReturn),
    }
}

fn lower_all(
    parsed: &[ParsedType],
    span: Span,
    names: &mut impl NamedTypes,
) -> SemaResult<Vec<Type>> {
    parsed.iter().map(|p| lower_type(p, span, names)).collect()
}

/// Builtin type named `name`, if any.
pub(crate) fn builtin_type(interner: &StringInterner, name: Name) -> Option<Type> {
    Type::builtin(interner.lookup(name))
}

/// Named types from frozen package tables.
///
/// Unqualified lookup order: generic parameters of the enclosing function,
/// builtins, then the package scope (own types before linked ones).
pub(crate) struct ScopeTypes<'s> {
    pub scope: &'s PackageScope,
    pub interner: &'s StringInterner,
    pub generics: &'s [GenericParam],
    /// Whether `Self` is in scope (trait signatures).
    pub allow_self: bool,
}

impl NamedTypes for ScopeTypes<'_> {
    fn named(&mut self, path: &Path) -> SemaResult<Type> {
        match path.package {
            Some(alias) if !self.scope.has_extern(alias) => {
                return report(SemanticError::UnknownIdentifier {
                    name: alias,
                    span: path.span,
                });
            }
            Some(_) => {}
            None => {
                if let Some(param) = self.generics.iter().find(|g| g.name == path.name) {
                    return Ok(Type::Generic(*param));
                }
                if let Some(ty) = builtin_type(self.interner, path.name) {
                    return Ok(ty);
                }
            }
        }
        match self.scope.lookup_type(path.package, path.name) {
            Some(def) => Ok(def.ty()),
            None => report(SemanticError::UnknownIdentifier {
                name: path.name,
                span: path.span,
            }),
        }
    }

    fn self_type(&mut self, span: Span) -> SemaResult<Type> {
        if self.allow_self {
            return Ok(Type::SelfType);
        }
        report(SemanticError::UnknownIdentifier {
            name: self.interner.intern("Self"),
            span,
        })
    }
}
