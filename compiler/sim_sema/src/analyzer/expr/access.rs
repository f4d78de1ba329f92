//! Aggregates and places: array literals, indexing, positional extraction,
//! struct literals, field and method access, references.
//!
//! Mutability flows from the base: an element, tuple slot or field of a
//! mutable place is itself mutable.

use std::sync::Arc;

use sim_ir::{ExprArena, ExprId, ExprRange, FieldInit, Name, ParsedType, Path, Span};
use sim_types::{StructType, Type};

use crate::analyzer::{Analyzer, Expected};
use crate::error::{report, SemaResult, SemanticError};
use crate::ir::{TypedExpr, TypedExprKind};

/// Extraction indices at or above this are out of range for any tuple.
const MAX_TUPLE_INDEX: usize = 65_535;

impl<'a> Analyzer<'a> {
    /// `[N]T{a, b, ...}`. Missing trailing elements are zero.
    pub(super) fn elaborate_array(
        &mut self,
        ty: &ParsedType,
        elems: ExprRange,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let ty = self.resolve_type(ty, span)?;
        let (size, elem) = match &ty {
            Type::Array { size, elem } => (*size, (**elem).clone()),
            _ => return report(SemanticError::NotAnArray { found: ty, span }),
        };

        let arena: &'a ExprArena = self.ctx.arena;
        let ids = arena.get_expr_list(elems);
        if ids.len() as u64 > size {
            return report(SemanticError::TypeMismatch {
                expected: ty,
                found: Type::array(ids.len() as u64, elem),
                span,
            });
        }

        let elems = ids
            .iter()
            .map(|id| self.expect_expr(&elem, *id))
            .collect::<SemaResult<Vec<_>>>()?;
        Ok(TypedExpr::new(TypedExprKind::Array(elems), ty, span))
    }

    pub(super) fn elaborate_index(
        &mut self,
        base: ExprId,
        index: ExprId,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let base = self.elaborate(&Expected::None, base)?;
        let Some(elem) = base.ty.array_elem().cloned() else {
            return report(SemanticError::NotAnArray {
                found: base.ty,
                span: base.span,
            });
        };
        let index = self.expect_expr(&Type::USIZE, index)?;

        let mutable = base.mutable;
        Ok(TypedExpr::place(
            TypedExprKind::Index {
                base: Box::new(base),
                index: Box::new(index),
            },
            elem,
            mutable,
            span,
        ))
    }

    /// `base.N`. The base is elaborated expecting a tuple whose slot `N`
    /// carries our own expectation.
    pub(super) fn elaborate_extract(
        &mut self,
        expected: &Expected,
        base: ExprId,
        index_text: Name,
        index_span: Span,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let index = self
            .ctx
            .interner
            .lookup(index_text)
            .parse::<usize>()
            .ok()
            .filter(|i| *i < MAX_TUPLE_INDEX);

        let base_expected = match index {
            Some(i) => {
                let mut slots = vec![Expected::None; i];
                slots.push(expected.clone());
                Expected::Tuple(slots)
            }
            None => Expected::None,
        };
        let base = self.elaborate(&base_expected, base)?;

        let Some(elems) = base.ty.as_tuple() else {
            return report(SemanticError::NotATuple {
                found: base.ty,
                span: base.span,
            });
        };
        let Some((index, elem)) = index.and_then(|i| elems.get(i).map(|t| (i, t.clone()))) else {
            return report(SemanticError::InvalidTupleIndex {
                index: index_text,
                span: index_span,
            });
        };

        let mutable = base.mutable;
        Ok(TypedExpr::place(
            TypedExprKind::Extract {
                base: Box::new(base),
                index,
            },
            elem,
            mutable,
            span,
        ))
    }

    /// `S{field: value, ...}`. Omitted fields get their zero value.
    pub(super) fn elaborate_struct_lit(
        &mut self,
        path: &Path,
        fields: &[FieldInit],
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let ty = self.resolve_type(&ParsedType::Named(*path), path.span)?;
        let Some(st) = ty.as_struct().cloned() else {
            return report(SemanticError::NotAStruct {
                found: ty,
                span: path.span,
            });
        };
        let foreign = st.package != self.own_package();

        let mut values: Vec<Option<TypedExpr>> = vec![None; st.fields.len()];
        for init in fields {
            let Some((index, field)) = st
                .field(init.name)
                .filter(|(_, f)| !foreign || f.public)
            else {
                return report(SemanticError::UnknownIdentifier {
                    name: init.name,
                    span: init.span,
                });
            };
            if values[index].is_some() {
                return report(SemanticError::IdentifierDuplication {
                    name: init.name,
                    span: init.span,
                });
            }
            values[index] = Some(self.expect_expr(&field.ty, init.value)?);
        }

        let elems = values
            .into_iter()
            .zip(&st.fields)
            .map(|(value, field)| {
                value.unwrap_or_else(|| TypedExpr::new(TypedExprKind::Zero, field.ty.clone(), span))
            })
            .collect();
        Ok(TypedExpr::new(TypedExprKind::Struct(elems), ty, span))
    }

    /// `base.name`: a field, or else a method bound to `base`.
    ///
    /// From another package only public members are visible, and a field
    /// is assignable only if it is declared mutable.
    pub(super) fn elaborate_field(
        &mut self,
        base: ExprId,
        name: Name,
        name_span: Span,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let base = self.elaborate(&Expected::None, base)?;
        let Some(st) = base.ty.as_struct().cloned() else {
            return report(SemanticError::NotAStruct {
                found: base.ty,
                span: base.span,
            });
        };
        let foreign = st.package != self.own_package();

        if let Some((index, field)) = st.field(name).filter(|(_, f)| !foreign || f.public) {
            let mutable = base.mutable && (!foreign || field.mutable);
            return Ok(TypedExpr::place(
                TypedExprKind::Field {
                    base: Box::new(base),
                    index,
                },
                field.ty.clone(),
                mutable,
                span,
            ));
        }

        self.bind_method(base, &st, name, name_span, span)
    }

    fn bind_method(
        &self,
        receiver: TypedExpr,
        st: &Arc<StructType>,
        name: Name,
        name_span: Span,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let foreign = st.package != self.own_package();
        let method = self
            .find_package(st.package)
            .and_then(|p| p.method(st.name, name))
            .filter(|m| !foreign || m.public);
        let Some(method) = method else {
            return report(SemanticError::UnknownIdentifier {
                name,
                span: name_span,
            });
        };
        if method.receiver_mutable && !receiver.mutable {
            return report(SemanticError::NotMutable {
                span: receiver.span,
            });
        }

        Ok(TypedExpr::new(
            TypedExprKind::Method {
                receiver: Box::new(receiver),
                package: st.package,
                struct_name: st.name,
                name,
            },
            Type::Function(method.sig.clone()),
            span,
        ))
    }

    /// `&value` or `&mut value`.
    pub(super) fn elaborate_ref(
        &mut self,
        expected: &Expected,
        mutable: bool,
        value: ExprId,
        span: Span,
    ) -> SemaResult<TypedExpr> {
        let pointee_expected = match expected.ty() {
            Some(Type::Reference { pointee, .. }) => Expected::Type((**pointee).clone()),
            _ => Expected::None,
        };
        let value = self.elaborate(&pointee_expected, value)?;
        if mutable && !value.mutable {
            return report(SemanticError::NotMutable { span: value.span });
        }

        let ty = Type::reference(mutable, value.ty.clone());
        Ok(TypedExpr::new(TypedExprKind::Ref(Box::new(value)), ty, span))
    }

    /// `*value`; mutable iff the reference is `&mut`.
    pub(super) fn elaborate_deref(&mut self, value: ExprId, span: Span) -> SemaResult<TypedExpr> {
        let value = self.elaborate(&Expected::None, value)?;
        let (mutable, ty) = match &value.ty {
            Type::Reference { mutable, pointee } => (*mutable, (**pointee).clone()),
            _ => {
                return report(SemanticError::NotAReference {
                    found: value.ty,
                    span: value.span,
                });
            }
        };
        Ok(TypedExpr::place(
            TypedExprKind::Deref(Box::new(value)),
            ty,
            mutable,
            span,
        ))
    }
}
