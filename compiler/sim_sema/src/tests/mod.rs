//! End-to-end tests: syntax trees built by hand, analyzed through
//! [`Program`].

mod property_tests;
mod stmt_tests;

use sim_ir::{
    BinaryOp, Block, Expr, ExprArena, ExprId, ExprKind, FieldDecl, FieldInit, FunctionDecl,
    GlobalDecl, IfElse, Import, MethodDecl, Module, Name, ParamDecl, ParsedType, Path,
    SharedInterner, Span, Stmt, StmtKind, StructDecl, TraitDecl, TraitMethodSig, TypeAliasDecl,
    UnaryOp,
};

use crate::config::SemaConfig;
use crate::error::SemanticError;
use crate::ir::TypedPackage;
use crate::program::Program;

/// Tree builder plus a program to analyze the trees in.
///
/// Every node gets its own span so errors can be matched to the node that
/// caused them.
struct Fixture {
    interner: SharedInterner,
    arena: ExprArena,
    program: Program,
    next_pos: u32,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(SemaConfig::default())
    }

    fn with_config(config: SemaConfig) -> Self {
        let interner = SharedInterner::new();
        let program = Program::new(interner.clone(), config);
        Fixture {
            interner,
            arena: ExprArena::new(),
            program,
            next_pos: 0,
        }
    }

    fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    fn span(&mut self) -> Span {
        let start = self.next_pos;
        self.next_pos += 2;
        Span::new(start, start + 1)
    }

    fn analyze(&mut self, path: &str, module: &Module) -> Result<TypedPackage, SemanticError> {
        let path = self.name(path);
        self.program.analyze(path, module, &self.arena)
    }

    /// Analyze `body` as the body of `fn main()` in package `main`.
    fn analyze_main(&mut self, body: Vec<Stmt>) -> Result<TypedPackage, SemanticError> {
        let main = self.func("main", Vec::new(), None, body);
        let module = Module {
            functions: vec![main],
            ..Module::default()
        };
        self.analyze("main", &module)
    }

    // ===== Types =====

    fn ty(&mut self, name: &str) -> ParsedType {
        let span = self.span();
        ParsedType::named(self.name(name), span)
    }

    fn qualified_ty(&mut self, package: &str, name: &str) -> ParsedType {
        let span = self.span();
        ParsedType::Named(Path::qualified(self.name(package), self.name(name), span))
    }

    fn path(&mut self, name: &str) -> Path {
        let span = self.span();
        Path::local(self.name(name), span)
    }

    // ===== Expressions =====

    fn expr(&mut self, kind: ExprKind) -> ExprId {
        let span = self.span();
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    fn int(&mut self, text: &str) -> ExprId {
        let text = self.name(text);
        self.expr(ExprKind::Int(text))
    }

    fn float(&mut self, text: &str) -> ExprId {
        let text = self.name(text);
        self.expr(ExprKind::Float(text))
    }

    fn boolean(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Bool(value))
    }

    fn ident(&mut self, name: &str) -> ExprId {
        let path = self.path(name);
        self.expr(ExprKind::Ident {
            path,
            generic_args: Vec::new(),
        })
    }

    fn qualified(&mut self, package: &str, name: &str) -> ExprId {
        let span = self.span();
        let path = Path::qualified(self.name(package), self.name(name), span);
        self.expr(ExprKind::Ident {
            path,
            generic_args: Vec::new(),
        })
    }

    fn instantiate(&mut self, name: &str, generic_args: Vec<ParsedType>) -> ExprId {
        let path = self.path(name);
        self.expr(ExprKind::Ident { path, generic_args })
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    fn assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        self.binary(BinaryOp::Assign, target, value)
    }

    fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Unary { op, operand })
    }

    fn call(&mut self, func: ExprId, args: Vec<ExprId>) -> ExprId {
        let args = self.arena.alloc_expr_list(args);
        self.expr(ExprKind::Call { func, args })
    }

    fn tuple(&mut self, elems: Vec<ExprId>) -> ExprId {
        let elems = self.arena.alloc_expr_list(elems);
        self.expr(ExprKind::Tuple(elems))
    }

    fn convert(&mut self, ty: ParsedType, value: ExprId) -> ExprId {
        self.expr(ExprKind::Convert { ty, value })
    }

    fn array(&mut self, size: u64, elem: ParsedType, elems: Vec<ExprId>) -> ExprId {
        let elems = self.arena.alloc_expr_list(elems);
        self.expr(ExprKind::Array {
            ty: ParsedType::array(size, elem),
            elems,
        })
    }

    fn index(&mut self, base: ExprId, index: ExprId) -> ExprId {
        self.expr(ExprKind::Index { base, index })
    }

    fn extract(&mut self, base: ExprId, index: &str) -> ExprId {
        let index = self.name(index);
        let index_span = self.span();
        self.expr(ExprKind::Extract {
            base,
            index,
            index_span,
        })
    }

    fn struct_lit(&mut self, ty: Path, fields: Vec<(&str, ExprId)>) -> ExprId {
        let fields = fields
            .into_iter()
            .map(|(name, value)| FieldInit {
                name: self.name(name),
                value,
                span: self.span(),
            })
            .collect();
        self.expr(ExprKind::StructLit { ty, fields })
    }

    fn field(&mut self, base: ExprId, name: &str) -> ExprId {
        let name = self.name(name);
        let name_span = self.span();
        self.expr(ExprKind::Field {
            base,
            name,
            name_span,
        })
    }

    fn reference(&mut self, mutable: bool, value: ExprId) -> ExprId {
        self.expr(ExprKind::Ref { mutable, value })
    }

    fn deref(&mut self, value: ExprId) -> ExprId {
        self.expr(ExprKind::Deref(value))
    }

    // ===== Statements =====

    fn stmt(&mut self, kind: StmtKind) -> Stmt {
        let span = self.span();
        Stmt::new(kind, span)
    }

    fn expr_stmt(&mut self, expr: ExprId) -> Stmt {
        self.stmt(StmtKind::Expr(expr))
    }

    fn let_(&mut self, name: &str, ty: Option<ParsedType>, value: Option<ExprId>) -> Stmt {
        let name = self.name(name);
        self.stmt(StmtKind::Let {
            mutable: false,
            name,
            ty,
            value,
        })
    }

    fn let_mut(&mut self, name: &str, ty: Option<ParsedType>, value: Option<ExprId>) -> Stmt {
        let name = self.name(name);
        self.stmt(StmtKind::Let {
            mutable: true,
            name,
            ty,
            value,
        })
    }

    fn ret(&mut self, value: Option<ExprId>) -> Stmt {
        self.stmt(StmtKind::Return(value))
    }

    fn block(&mut self, stmts: Vec<Stmt>) -> Block {
        let span = self.span();
        Block::new(stmts, span)
    }

    fn block_stmt(&mut self, stmts: Vec<Stmt>) -> Stmt {
        let block = self.block(stmts);
        self.stmt(StmtKind::Block(block))
    }

    /// `if c0 {b0} else if c1 {b1} ... [else {last}]`.
    fn if_chain(&mut self, arms: Vec<(ExprId, Vec<Stmt>)>, otherwise: Option<Vec<Stmt>>) -> Stmt {
        let mut next = match otherwise {
            Some(stmts) => {
                let body = self.block(stmts);
                let span = self.span();
                Some(Box::new(IfElse {
                    cond: None,
                    body,
                    next: None,
                    span,
                }))
            }
            None => None,
        };
        for (cond, stmts) in arms.into_iter().rev() {
            let body = self.block(stmts);
            let span = self.span();
            next = Some(Box::new(IfElse {
                cond: Some(cond),
                body,
                next,
                span,
            }));
        }
        match next {
            Some(chain) => self.stmt(StmtKind::If(*chain)),
            None => panic!("if chain without arms"),
        }
    }

    fn loop_(&mut self, stmts: Vec<Stmt>) -> Stmt {
        let body = self.block(stmts);
        self.stmt(StmtKind::Loop(body))
    }

    fn while_(&mut self, cond: ExprId, stmts: Vec<Stmt>) -> Stmt {
        let body = self.block(stmts);
        self.stmt(StmtKind::While { cond, body })
    }

    fn for_(&mut self, cursor: &str, iter: ExprId, stmts: Vec<Stmt>) -> Stmt {
        let cursor = self.name(cursor);
        let body = self.block(stmts);
        self.stmt(StmtKind::For {
            cursor_mutable: false,
            cursor,
            iter,
            body,
        })
    }

    fn brk(&mut self) -> Stmt {
        self.stmt(StmtKind::Break)
    }

    fn cont(&mut self) -> Stmt {
        self.stmt(StmtKind::Continue)
    }

    // ===== Declarations =====

    fn param(&mut self, name: &str, ty: ParsedType) -> ParamDecl {
        let span = self.span();
        ParamDecl {
            mutable: false,
            name: self.name(name),
            ty,
            span,
        }
    }

    fn func(
        &mut self,
        name: &str,
        params: Vec<ParamDecl>,
        ret: Option<ParsedType>,
        body: Vec<Stmt>,
    ) -> FunctionDecl {
        let body = self.block(body);
        let span = self.span();
        FunctionDecl {
            public: true,
            name: self.name(name),
            generics: Vec::new(),
            params,
            ret,
            body: Some(body),
            extern_name: None,
            span,
        }
    }

    fn extern_func(
        &mut self,
        name: &str,
        params: Vec<ParamDecl>,
        ret: Option<ParsedType>,
    ) -> FunctionDecl {
        let span = self.span();
        FunctionDecl {
            public: true,
            name: self.name(name),
            generics: Vec::new(),
            params,
            ret,
            body: None,
            extern_name: Some(self.name(name)),
            span,
        }
    }

    /// Struct with public, mutable fields.
    fn struct_decl(&mut self, name: &str, fields: Vec<(&str, ParsedType)>) -> StructDecl {
        let fields = fields
            .into_iter()
            .map(|(field, ty)| self.field_decl(field, true, true, ty))
            .collect();
        let span = self.span();
        StructDecl {
            public: true,
            name: self.name(name),
            fields,
            implements: Vec::new(),
            span,
        }
    }

    fn field_decl(&mut self, name: &str, public: bool, mutable: bool, ty: ParsedType) -> FieldDecl {
        let span = self.span();
        FieldDecl {
            public,
            mutable,
            name: self.name(name),
            ty,
            span,
        }
    }

    fn method(
        &mut self,
        receiver: &str,
        receiver_mutable: bool,
        name: &str,
        ret: Option<ParsedType>,
        body: Vec<Stmt>,
    ) -> MethodDecl {
        let body = self.block(body);
        let span = self.span();
        MethodDecl {
            public: true,
            receiver: self.name(receiver),
            receiver_mutable,
            name: self.name(name),
            params: Vec::new(),
            ret,
            body,
            span,
        }
    }

    fn alias(&mut self, name: &str, ty: ParsedType) -> TypeAliasDecl {
        let span = self.span();
        TypeAliasDecl {
            public: true,
            name: self.name(name),
            ty,
            span,
        }
    }

    /// Trait whose methods are `(name, params, ret)`.
    fn trait_decl(
        &mut self,
        name: &str,
        methods: Vec<(&str, Vec<ParsedType>, Option<ParsedType>)>,
    ) -> TraitDecl {
        let methods = methods
            .into_iter()
            .map(|(method, params, ret)| TraitMethodSig {
                name: self.name(method),
                params,
                ret,
                span: self.span(),
            })
            .collect();
        let span = self.span();
        TraitDecl {
            public: true,
            name: self.name(name),
            methods,
            span,
        }
    }

    fn import(&mut self, path: &str, alias: Option<&str>, linked: bool) -> Import {
        let span = self.span();
        Import {
            path: self.name(path),
            alias: alias.map(|a| self.name(a)),
            linked,
            span,
        }
    }

    fn global(&mut self, name: &str, ty: Option<ParsedType>, value: Option<ExprId>) -> GlobalDecl {
        let span = self.span();
        GlobalDecl {
            public: true,
            mutable: false,
            name: self.name(name),
            ty,
            value,
            extern_name: None,
            span,
        }
    }
}

/// Body of the single function of `package`.
fn only_body(package: &TypedPackage) -> &crate::ir::TypedBlock {
    match package.functions.as_slice() {
        [function] => function
            .body
            .as_ref()
            .unwrap_or_else(|| panic!("function without body")),
        other => panic!("expected one function, found {}", other.len()),
    }
}

/// Initializer of the `n`th `let` in the single function of `package`.
fn let_value(package: &TypedPackage, n: usize) -> &crate::ir::TypedExpr {
    only_body(package)
        .stmts
        .iter()
        .filter_map(|stmt| match stmt {
            crate::ir::TypedStmt::Let { value, .. } => Some(value),
            _ => None,
        })
        .nth(n)
        .unwrap_or_else(|| panic!("no let statement #{n}"))
}
