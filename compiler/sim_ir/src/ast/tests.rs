use super::*;
use crate::{ExprArena, ExprId, Name, Span};

#[test]
fn operator_symbols() {
    assert_eq!(BinaryOp::Assign.as_symbol(), "=");
    assert_eq!(BinaryOp::Shr.as_symbol(), ">>");
    assert_eq!(BinaryOp::Or.as_symbol(), "||");
    assert_eq!(UnaryOp::Not.as_symbol(), "!");
}

#[test]
fn else_link_has_no_condition() {
    let body = Block::new(Vec::new(), Span::new(10, 12));
    let else_link = IfElse {
        cond: None,
        body: body.clone(),
        next: None,
        span: Span::new(5, 12),
    };
    let if_link = IfElse {
        cond: Some(ExprId::new(0)),
        body,
        next: Some(Box::new(else_link)),
        span: Span::new(0, 12),
    };

    assert!(!if_link.is_else());
    assert!(if_link.next.as_deref().is_some_and(IfElse::is_else));
}

#[test]
fn expression_debug_includes_span() {
    let mut arena = ExprArena::new();
    let id = arena.alloc_expr(Expr::new(ExprKind::Bool(true), Span::new(3, 7)));
    assert_eq!(format!("{:?}", arena.get_expr(id)), "Bool(true) @ 3..7");
}

#[test]
fn path_constructors() {
    let pkg = Name::new(1, 1);
    let name = Name::new(2, 2);
    let span = Span::new(0, 4);

    assert_eq!(Path::local(name, span).package, None);
    assert_eq!(Path::qualified(pkg, name, span).package, Some(pkg));
    assert_eq!(
        ParsedType::named(name, span),
        ParsedType::Named(Path::local(name, span))
    );
}
