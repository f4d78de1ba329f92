//! Explicit substitution for placeholder types.
//!
//! Trait method signatures mention `Self`; generic function signatures
//! mention their type parameters. Rather than mutating signatures, callers
//! build a [`Subst`] and thread it through [`Type::eq_under`] (comparison)
//! or [`Type::apply`] (rewriting).

use std::sync::Arc;

use crate::core::{Field, FuncType, StructType, Type};

/// Replacement for `Self` and for generic parameters by index.
#[derive(Copy, Clone, Debug, Default)]
pub struct Subst<'a> {
    self_ty: Option<&'a Type>,
    generic_args: &'a [Type],
}

impl<'a> Subst<'a> {
    /// Substitution that replaces nothing.
    pub const EMPTY: Subst<'static> = Subst {
        self_ty: None,
        generic_args: &[],
    };

    /// Replace `Self` with `ty`.
    pub fn with_self(ty: &'a Type) -> Self {
        Subst {
            self_ty: Some(ty),
            generic_args: &[],
        }
    }

    /// Replace generic parameter `i` with `args[i]`.
    pub fn with_generics(args: &'a [Type]) -> Self {
        Subst {
            self_ty: None,
            generic_args: args,
        }
    }

    /// The replacement for a placeholder, if this substitution has one.
    fn lookup(&self, ty: &Type) -> Option<&'a Type> {
        match ty {
            Type::SelfType => self.self_ty,
            Type::Generic(param) => self.generic_args.get(param.index as usize),
            _ => None,
        }
    }
}

impl Type {
    /// Structural equality with placeholders on either side replaced first.
    pub fn eq_under(&self, other: &Type, subst: &Subst<'_>) -> bool {
        let lhs = subst.lookup(self).unwrap_or(self);
        let rhs = subst.lookup(other).unwrap_or(other);

        match (lhs, rhs) {
            (Type::Array { size: s1, elem: e1 }, Type::Array { size: s2, elem: e2 }) => {
                s1 == s2 && e1.eq_under(e2, subst)
            }
            (Type::Tuple(a), Type::Tuple(b)) => all_eq_under(a, b, subst),
            (Type::Function(f1), Type::Function(f2)) => {
                all_eq_under(&f1.params, &f2.params, subst) && f1.ret.eq_under(&f2.ret, subst)
            }
            (
                Type::Reference {
                    mutable: m1,
                    pointee: p1,
                },
                Type::Reference {
                    mutable: m2,
                    pointee: p2,
                },
            ) => m1 == m2 && p1.eq_under(p2, subst),
            (Type::Struct(a), Type::Struct(b)) => {
                a.fields.len() == b.fields.len()
                    && a.fields.iter().zip(&b.fields).all(|(f1, f2)| {
                        f1.public == f2.public
                            && f1.mutable == f2.mutable
                            && f1.name == f2.name
                            && f1.ty.eq_under(&f2.ty, subst)
                    })
            }
            (Type::Union(a), Type::Union(b)) => {
                a.len() == b.len()
                    && a.iter().all(|x| b.iter().any(|y| x.eq_under(y, subst)))
                    && b.iter().all(|y| a.iter().any(|x| x.eq_under(y, subst)))
            }
            _ => lhs == rhs,
        }
    }

    /// Rewrite every placeholder that `subst` replaces.
    #[must_use]
    pub fn apply(&self, subst: &Subst<'_>) -> Type {
        if let Some(replacement) = subst.lookup(self) {
            return replacement.clone();
        }
        match self {
            Type::Array { size, elem } => Type::array(*size, elem.apply(subst)),
            Type::Tuple(elems) => Type::Tuple(elems.iter().map(|e| e.apply(subst)).collect()),
            Type::Function(func) => Type::Function(func.apply(subst)),
            Type::Reference { mutable, pointee } => Type::reference(*mutable, pointee.apply(subst)),
            Type::Struct(st) => Type::Struct(Arc::new(StructType {
                package: st.package,
                name: st.name,
                fields: st
                    .fields
                    .iter()
                    .map(|f| Field {
                        ty: f.ty.apply(subst),
                        ..f.clone()
                    })
                    .collect(),
            })),
            Type::Union(variants) => Type::union(variants.iter().map(|v| v.apply(subst))),
            Type::Empty
            | Type::NoReturn
            | Type::SignedInt(_)
            | Type::UnsignedInt(_)
            | Type::Float(_)
            | Type::Bool
            | Type::Str
            | Type::Generic(_)
            | Type::SelfType => self.clone(),
        }
    }

    /// Whether any generic parameter or `Self` occurs in this type.
    pub fn has_placeholders(&self) -> bool {
        match self {
            Type::Generic(_) | Type::SelfType => true,
            Type::Array { elem, .. } => elem.has_placeholders(),
            Type::Tuple(elems) | Type::Union(elems) => elems.iter().any(Type::has_placeholders),
            Type::Function(func) => {
                func.params.iter().any(Type::has_placeholders) || func.ret.has_placeholders()
            }
            Type::Reference { pointee, .. } => pointee.has_placeholders(),
            Type::Struct(st) => st.fields.iter().any(|f| f.ty.has_placeholders()),
            Type::Empty
            | Type::NoReturn
            | Type::SignedInt(_)
            | Type::UnsignedInt(_)
            | Type::Float(_)
            | Type::Bool
            | Type::Str => false,
        }
    }
}

impl FuncType {
    /// Equality of two signatures under `subst`.
    pub fn eq_under(&self, other: &FuncType, subst: &Subst<'_>) -> bool {
        all_eq_under(&self.params, &other.params, subst) && self.ret.eq_under(&other.ret, subst)
    }

    #[must_use]
    pub fn apply(&self, subst: &Subst<'_>) -> FuncType {
        FuncType::new(
            self.params.iter().map(|p| p.apply(subst)).collect(),
            self.ret.apply(subst),
        )
    }
}

fn all_eq_under(a: &[Type], b: &[Type], subst: &Subst<'_>) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_under(y, subst))
}
