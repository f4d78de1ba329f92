//! Statements and control-flow exit classification.
//!
//! Every statement yields an [`Exit`]. A block takes the maximum over its
//! statements, and so does an `if` chain over its branches, unless the
//! chain has no final `else` and so can fall through. Loops absorb
//! `NextLoop` and `BreakLoop` but let `Return` through.

use sim_ir::{Block, IfElse, Stmt, StmtKind};
use sim_types::Type;

use super::{Analyzer, Expected};
use crate::error::{report, SemaResult, SemanticError};
use crate::ir::{Exit, TypedBlock, TypedExpr, TypedExprKind, TypedIf, TypedStmt};
use crate::scope::{Frame, LoopId, SymbolOrigin};
use crate::stack::ensure_sufficient_stack;

impl Analyzer<'_> {
    /// Analyze `block` in a fresh block frame.
    pub(crate) fn analyze_block(
        &mut self,
        block: &Block,
        loop_id: Option<LoopId>,
    ) -> SemaResult<TypedBlock> {
        self.with_frame(Frame::block(loop_id), |this| this.analyze_stmts(&block.stmts))
    }

    fn analyze_stmts(&mut self, stmts: &[Stmt]) -> SemaResult<TypedBlock> {
        let mut out = Vec::with_capacity(stmts.len());
        let mut exit = Exit::None;
        for stmt in stmts {
            exit = exit.max(self.analyze_stmt(stmt, &mut out)?);
        }
        Ok(TypedBlock { stmts: out, exit })
    }

    /// Analyze one statement, appending its typed form to `out`.
    fn analyze_stmt(&mut self, stmt: &Stmt, out: &mut Vec<TypedStmt>) -> SemaResult<Exit> {
        ensure_sufficient_stack(|| self.analyze_stmt_inner(stmt, out))
    }

    fn analyze_stmt_inner(&mut self, stmt: &Stmt, out: &mut Vec<TypedStmt>) -> SemaResult<Exit> {
        let span = stmt.span;
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                let value = self.elaborate(&Expected::None, *expr)?;
                let exit = if value.ty.is_no_return() {
                    Exit::Return
                } else {
                    Exit::None
                };
                out.push(TypedStmt::Expr(value));
                Ok(exit)
            }

            StmtKind::Let {
                mutable,
                name,
                ty,
                value,
            } => {
                let (local, value) = match (ty, value) {
                    // Declared first, so the initializer already sees it.
                    (Some(ty), value) => {
                        let ty = self.resolve_type(ty, span)?;
                        let local = self.declare_local(
                            *name,
                            ty.clone(),
                            *mutable,
                            SymbolOrigin::Local,
                            span,
                        )?;
                        let value = match value {
                            Some(value) => self.expect_expr(&ty, *value)?,
                            None => TypedExpr::new(TypedExprKind::Zero, ty, span),
                        };
                        (local, value)
                    }
                    (None, Some(value)) => {
                        let value = self.elaborate(&Expected::None, *value)?;
                        let local = self.declare_local(
                            *name,
                            value.ty.clone(),
                            *mutable,
                            SymbolOrigin::Local,
                            span,
                        )?;
                        (local, value)
                    }
                    (None, None) => {
                        return report(SemanticError::Internal {
                            message: "local declaration without type or value".to_string(),
                            span,
                        });
                    }
                };
                out.push(TypedStmt::Let { local, value });
                Ok(Exit::None)
            }

            StmtKind::Return(value) => {
                let Some(ret) = self.scopes.return_type().cloned() else {
                    return report(SemanticError::Internal {
                        message: "return outside of a function".to_string(),
                        span,
                    });
                };
                let value = match value {
                    Some(value) => Some(self.expect_expr(&ret, *value)?),
                    None if ret.is_empty() => None,
                    None => {
                        return report(SemanticError::TypeMismatch {
                            expected: ret,
                            found: Type::Empty,
                            span,
                        });
                    }
                };
                out.push(TypedStmt::Return(value));
                Ok(Exit::Return)
            }

            StmtKind::Block(block) => {
                let block = self.analyze_block(block, None)?;
                out.extend(block.stmts);
                Ok(block.exit)
            }

            StmtKind::If(chain) => {
                let chain = self.analyze_if(chain)?;
                let exit = if_exit(&chain);
                out.push(TypedStmt::If(chain));
                Ok(exit)
            }

            StmtKind::Loop(body) => {
                let id = self.fresh_loop();
                let body = self.analyze_block(body, Some(id))?;
                let exit = absorb_loop_exit(body.exit);
                out.push(TypedStmt::Loop { id, body });
                Ok(exit)
            }

            StmtKind::While { cond, body } => {
                let cond = self.expect_expr(&Type::Bool, *cond)?;
                let id = self.fresh_loop();
                let body = self.analyze_block(body, Some(id))?;
                let exit = absorb_loop_exit(body.exit);
                out.push(TypedStmt::While { id, cond, body });
                Ok(exit)
            }

            StmtKind::For {
                cursor_mutable,
                cursor,
                iter,
                body,
            } => {
                let iter = self.elaborate(&Expected::None, *iter)?;
                let Some(elem) = iter.ty.array_elem().cloned() else {
                    return report(SemanticError::NotAnArray {
                        found: iter.ty,
                        span: iter.span,
                    });
                };

                let id = self.fresh_loop();
                let (cursor, body) = self.with_frame(Frame::block(Some(id)), |this| {
                    let cursor = this.declare_local(
                        *cursor,
                        elem,
                        *cursor_mutable,
                        SymbolOrigin::LoopCursor,
                        span,
                    )?;
                    let body = this.analyze_block(body, None)?;
                    Ok::<_, SemanticError>((cursor, body))
                })?;
                let exit = absorb_loop_exit(body.exit);
                out.push(TypedStmt::For {
                    id,
                    cursor,
                    iter,
                    body,
                });
                Ok(exit)
            }

            StmtKind::Break => {
                let Some(id) = self.scopes.current_loop() else {
                    return report(SemanticError::LoopControlOutsideLoop { span });
                };
                out.push(TypedStmt::Break(id));
                Ok(Exit::BreakLoop)
            }

            StmtKind::Continue => {
                let Some(id) = self.scopes.current_loop() else {
                    return report(SemanticError::LoopControlOutsideLoop { span });
                };
                out.push(TypedStmt::Continue(id));
                Ok(Exit::NextLoop)
            }
        }
    }

    fn analyze_if(&mut self, link: &IfElse) -> SemaResult<TypedIf> {
        ensure_sufficient_stack(|| {
            let cond = match link.cond {
                Some(cond) => Some(self.expect_expr(&Type::Bool, cond)?),
                None => None,
            };
            let body = self.analyze_block(&link.body, None)?;
            let next = match &link.next {
                Some(next) => Some(Box::new(self.analyze_if(next)?)),
                None => None,
            };
            Ok(TypedIf { cond, body, next })
        })
    }
}

/// Exit of an `if` chain: the strongest exit over its branches. A chain
/// without a final `else` can fall through and is `None`.
pub(crate) fn if_exit(link: &TypedIf) -> Exit {
    let mut exit = link.body.exit;
    let mut last = link;
    while let Some(next) = &last.next {
        exit = exit.max(next.body.exit);
        last = next;
    }
    if last.cond.is_some() {
        return Exit::None;
    }
    exit
}

/// A loop consumes its own `break` and `continue`.
pub(crate) fn absorb_loop_exit(body: Exit) -> Exit {
    match body {
        Exit::NextLoop | Exit::BreakLoop => Exit::None,
        Exit::None | Exit::Return => body,
    }
}
