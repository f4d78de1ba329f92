//! Arena allocation for expressions.
//!
//! All expressions of a compilation unit live in one contiguous `Vec`;
//! children refer to each other through `ExprId`, and variable-length
//! children (arguments, elements) through an `ExprRange` into a second
//! flattened list.

use super::ast::Expr;
use super::{ExprId, ExprRange};

/// Contiguous storage for all expressions in a module.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expression allocation =====

    /// Allocate expression, return ID.
    ///
    /// # Panics
    /// Panics if the arena holds more than `u32::MAX` expressions.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let index = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded u32::MAX entries"));
        self.exprs.push(expr);
        ExprId::new(index)
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Expression lists =====

    /// Allocate an expression list, return its range.
    ///
    /// # Panics
    /// Panics if the list is longer than `u16::MAX` or the flattened storage
    /// exceeds `u32::MAX` entries.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(exprs);
        let len = self.expr_lists.len() - start;
        ExprRange::new(
            u32::try_from(start).unwrap_or_else(|_| panic!("expression list storage is full")),
            u16::try_from(len).unwrap_or_else(|_| panic!("expression list of {len} entries")),
        )
    }

    /// Get an expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }
}
