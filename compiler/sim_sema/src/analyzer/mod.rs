//! Body analysis: expressions, statements and functions.
//!
//! An [`Analyzer`] analyzes one body (function, method or global
//! initializer) against a frozen [`SemaContext`]. It owns the frame stack
//! and the local table of that body, so independent bodies can run on
//! different threads.
//!
//! - `expr`: bidirectional elaboration, one file per node family
//! - `control`: statements and control-flow exit classification
//! - `function_checking`: function, method and global entry points
//! - `scope_guards`: frame push/pop around a closure
//! - `type_resolution`: `ParsedType` to `Type`

mod control;
mod expr;
mod function_checking;
mod scope_guards;
mod type_resolution;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use sim_ir::{ExprArena, ExprId, Name, ParsedType, Path, Span, StringInterner};
use sim_types::Type;

use crate::config::SemaConfig;
use crate::error::{report, SemaResult, SemanticError};
use crate::ir::{LocalDecl, LocalId, TypedExpr, TypedExprKind};
use crate::package::{GlobalValue, Package};
use crate::scope::{LoopId, PackageScope, ScopeStack, Symbol, SymbolOrigin, SymbolTarget};

pub(crate) use function_checking::{analyze_function, analyze_global, analyze_method, infer_global};
pub(crate) use type_resolution::{builtin_type, lower_type, NamedTypes, ScopeTypes};

/// Read-only state shared by every body of a package.
#[derive(Copy, Clone)]
pub(crate) struct SemaContext<'a> {
    pub config: &'a SemaConfig,
    pub interner: &'a StringInterner,
    pub arena: &'a ExprArena,
    pub scope: &'a PackageScope,
    /// Every package analyzed so far, for method lookup on foreign structs.
    pub packages: &'a FxHashMap<Name, Arc<Package>>,
}

/// Type information flowing down into an expression.
///
/// A hint, not a requirement: literals adopt it, tuples distribute it, and
/// most other nodes ignore it. Strict checks go through
/// [`Analyzer::expect_expr`].
#[derive(Clone, Debug, Default)]
pub(crate) enum Expected {
    #[default]
    None,
    Type(Type),
    /// Per-element expectations for a tuple, used by positional extraction.
    Tuple(Vec<Expected>),
}

impl Expected {
    pub(crate) fn ty(&self) -> Option<&Type> {
        match self {
            Expected::Type(ty) => Some(ty),
            Expected::None | Expected::Tuple(_) => None,
        }
    }

    /// The expected type, if it is a number type.
    pub(crate) fn number(&self) -> Option<&Type> {
        self.ty().filter(|t| t.is_number())
    }

    pub(crate) fn float(&self) -> Option<&Type> {
        self.ty().filter(|t| t.is_float())
    }

    pub(crate) fn is_tuple(&self) -> bool {
        matches!(self, Expected::Tuple(_) | Expected::Type(Type::Tuple(_)))
    }

    /// Expectations for the `len` elements of a tuple, truncated or padded
    /// with `None`.
    pub(crate) fn tuple_slots(&self, len: usize) -> Vec<Expected> {
        let mut slots: Vec<Expected> = match self {
            Expected::Type(Type::Tuple(elems)) => {
                elems.iter().cloned().map(Expected::Type).collect()
            }
            Expected::Tuple(slots) => slots.clone(),
            Expected::Type(_) | Expected::None => Vec::new(),
        };
        slots.resize(len, Expected::None);
        slots
    }
}

pub(crate) struct Analyzer<'a> {
    ctx: SemaContext<'a>,
    scopes: ScopeStack,
    locals: Vec<LocalDecl>,
    next_loop: u32,
}

impl<'a> Analyzer<'a> {
    pub(crate) fn new(ctx: SemaContext<'a>) -> Self {
        Analyzer {
            ctx,
            scopes: ScopeStack::default(),
            locals: Vec::new(),
            next_loop: 0,
        }
    }

    pub(crate) fn into_locals(self) -> Vec<LocalDecl> {
        self.locals
    }

    fn own_package(&self) -> Name {
        self.ctx.scope.package().path
    }

    fn fresh_loop(&mut self) -> LoopId {
        let id = LoopId(self.next_loop);
        self.next_loop += 1;
        id
    }

    /// Bind a new local in the innermost frame.
    pub(crate) fn declare_local(
        &mut self,
        name: Name,
        ty: Type,
        mutable: bool,
        origin: SymbolOrigin,
        span: Span,
    ) -> SemaResult<LocalId> {
        let id = LocalId::new(self.locals.len());
        let symbol = Symbol {
            ty: ty.clone(),
            mutable,
            origin,
            target: SymbolTarget::Local(id),
        };
        if !self.scopes.declare(name, symbol) {
            return report(SemanticError::IdentifierDuplication { name, span });
        }
        self.locals.push(LocalDecl {
            name,
            ty,
            mutable,
            origin,
        });
        Ok(id)
    }

    /// Resolve a value name: frames innermost first, then the package scope.
    ///
    /// A qualifier must name an imported package.
    pub(crate) fn lookup_value(&self, path: &Path) -> SemaResult<Symbol> {
        if let Some(alias) = path.package {
            if !self.ctx.scope.has_extern(alias) {
                return report(SemanticError::UnknownIdentifier {
                    name: alias,
                    span: path.span,
                });
            }
        } else if let Some(symbol) = self.scopes.lookup(path.name) {
            return Ok(symbol.clone());
        }

        match self.ctx.scope.lookup_value(path.package, path.name) {
            Some((package, value)) => Ok(global_symbol(package, value)),
            None => report(SemanticError::UnknownIdentifier {
                name: path.name,
                span: path.span,
            }),
        }
    }

    /// Package with the given path: this one, an import, or any package
    /// analyzed earlier.
    fn find_package(&self, path: Name) -> Option<&'a Package> {
        self.ctx
            .scope
            .find_package(path)
            .or_else(|| self.ctx.packages.get(&path).map(|p| &**p))
    }

    pub(crate) fn resolve_type(&self, parsed: &ParsedType, span: Span) -> SemaResult<Type> {
        let mut names = ScopeTypes {
            scope: self.ctx.scope,
            interner: self.ctx.interner,
            generics: self.scopes.generics(),
            allow_self: false,
        };
        lower_type(parsed, span, &mut names)
    }

    /// Elaborate `id` and require its type to equal `expected`.
    ///
    /// An `X` value is accepted anywhere and wrapped in a conversion to
    /// `expected`.
    pub(crate) fn expect_expr(&mut self, expected: &Type, id: ExprId) -> SemaResult<TypedExpr> {
        let value = self.elaborate(&Expected::Type(expected.clone()), id)?;
        coerce(value, expected)
    }
}

/// Check `value` against `expected` exactly, allowing `X` to flow anywhere.
pub(crate) fn coerce(value: TypedExpr, expected: &Type) -> SemaResult<TypedExpr> {
    if value.ty == *expected {
        return Ok(value);
    }
    if value.ty.is_no_return() {
        let span = value.span;
        return Ok(TypedExpr::new(
            TypedExprKind::NoReturnToAny(Box::new(value)),
            expected.clone(),
            span,
        ));
    }
    report(SemanticError::TypeMismatch {
        expected: expected.clone(),
        found: value.ty,
        span: value.span,
    })
}

fn global_symbol(package: Name, value: &GlobalValue) -> Symbol {
    match value {
        GlobalValue::Variable(var) => Symbol {
            ty: var.ty.clone(),
            mutable: var.mutable,
            origin: SymbolOrigin::GlobalVar,
            target: SymbolTarget::Global {
                package,
                name: var.name,
            },
        },
        GlobalValue::Function(func) => Symbol {
            ty: Type::Function(func.sig.clone()),
            mutable: false,
            origin: SymbolOrigin::Function,
            target: SymbolTarget::Global {
                package,
                name: func.name,
            },
        },
        GlobalValue::GenericFunction(def) => Symbol {
            ty: Type::Function(def.sig.clone()),
            mutable: false,
            origin: SymbolOrigin::Function,
            target: SymbolTarget::Generic(Arc::clone(def)),
        },
    }
}
