//! Registration of type and trait names, and lazy resolution of struct
//! and alias definitions.
//!
//! Struct and alias bodies may refer to each other in any order. Each is
//! resolved on first use; a definition reached again while it is still
//! being resolved is a [`SemanticError::RecursiveType`].

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use sim_ir::{Name, Path, Span, StringInterner, StructDecl, TypeAliasDecl};
use sim_types::{Field, StructType, Type};

use super::Declarer;
use crate::analyzer::{builtin_type, lower_type, NamedTypes, ScopeTypes};
use crate::error::{report, SemaResult, SemanticError};
use crate::package::{AliasDef, StructDef, TypeDef};
use crate::scope::PackageScope;

#[derive(Copy, Clone)]
enum PendingType<'m> {
    Struct(&'m StructDecl),
    Alias(&'m TypeAliasDecl),
}

/// Named types during declaration: own definitions are resolved on demand.
struct LazyTypes<'s, 'm> {
    scope: &'s mut PackageScope,
    interner: &'s StringInterner,
    pending: FxHashMap<Name, PendingType<'m>>,
    resolving: FxHashSet<Name>,
}

impl Declarer<'_> {
    /// Check type and trait names for clashes, then resolve every struct
    /// and alias.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn register_types(&mut self) -> SemaResult<()> {
        let module = self.module;
        let mut taken = FxHashSet::default();
        let names = module
            .structs
            .iter()
            .map(|s| (s.name, s.span))
            .chain(module.aliases.iter().map(|a| (a.name, a.span)))
            .chain(module.traits.iter().map(|t| (t.name, t.span)));
        for (name, span) in names {
            if builtin_type(self.interner, name).is_some()
                || !taken.insert(name)
                || self.scope.type_clash(name)
            {
                return report(SemanticError::IdentifierDuplication { name, span });
            }
        }

        let pending: FxHashMap<Name, PendingType<'_>> = module
            .structs
            .iter()
            .map(|s| (s.name, PendingType::Struct(s)))
            .chain(module.aliases.iter().map(|a| (a.name, PendingType::Alias(a))))
            .collect();

        let order: Vec<(Name, Span)> = module
            .structs
            .iter()
            .map(|s| (s.name, s.span))
            .chain(module.aliases.iter().map(|a| (a.name, a.span)))
            .collect();
        let mut lazy = LazyTypes {
            scope: &mut self.scope,
            interner: self.interner,
            pending,
            resolving: FxHashSet::default(),
        };
        for (name, span) in order {
            lazy.resolve(name, span)?;
        }

        tracing::debug!(types = self.scope.package().types.len(), "types registered");
        Ok(())
    }
}

impl LazyTypes<'_, '_> {
    fn resolve(&mut self, name: Name, span: Span) -> SemaResult<Type> {
        if let Some(def) = self.scope.package().type_def(name) {
            return Ok(def.ty());
        }
        let Some(pending) = self.pending.get(&name).copied() else {
            return report(SemanticError::UnknownIdentifier { name, span });
        };
        if !self.resolving.insert(name) {
            return report(SemanticError::RecursiveType { name, span });
        }

        let def = match pending {
            PendingType::Struct(decl) => TypeDef::Struct(Arc::new(self.resolve_struct(decl)?)),
            PendingType::Alias(decl) => TypeDef::Alias(Arc::new(AliasDef {
                public: decl.public,
                name: decl.name,
                ty: lower_type(&decl.ty, decl.span, self)?,
            })),
        };

        self.resolving.remove(&name);
        let ty = def.ty();
        self.scope.package_mut().types.insert(name, def);
        Ok(ty)
    }

    fn resolve_struct(&mut self, decl: &StructDecl) -> SemaResult<StructDef> {
        let mut fields: Vec<Field> = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            if fields.iter().any(|f| f.name == field.name) {
                return report(SemanticError::IdentifierDuplication {
                    name: field.name,
                    span: field.span,
                });
            }
            fields.push(Field {
                public: field.public,
                mutable: field.mutable,
                name: field.name,
                ty: lower_type(&field.ty, field.span, self)?,
            });
        }

        Ok(StructDef {
            public: decl.public,
            ty: Arc::new(StructType {
                package: self.scope.package().path,
                name: decl.name,
                fields,
            }),
            implements: Vec::new(),
        })
    }
}

impl NamedTypes for LazyTypes<'_, '_> {
    fn named(&mut self, path: &Path) -> SemaResult<Type> {
        if path.package.is_none() {
            if let Some(ty) = builtin_type(self.interner, path.name) {
                return Ok(ty);
            }
            if self.pending.contains_key(&path.name) {
                return self.resolve(path.name, path.span);
            }
        }
        ScopeTypes {
            scope: &*self.scope,
            interner: self.interner,
            generics: &[],
            allow_self: false,
        }
        .named(path)
    }

    fn self_type(&mut self, span: Span) -> SemaResult<Type> {
        report(SemanticError::UnknownIdentifier {
            name: self.interner.intern("Self"),
            span,
        })
    }
}
