use pretty_assertions::assert_eq;
use sim_ir::{Module, ParsedType, Stmt};
use sim_types::Type;

use super::{only_body, Fixture};
use crate::error::SemanticError;
use crate::ir::{Exit, TypedExprKind, TypedPackage, TypedStmt};

/// Analyze `fn f() i32 { body }`.
fn analyze_i32_fn(f: &mut Fixture, body: Vec<Stmt>) -> Result<TypedPackage, SemanticError> {
    let ret = f.ty("i32");
    let func = f.func("f", Vec::new(), Some(ret), body);
    let module = Module {
        functions: vec![func],
        ..Module::default()
    };
    f.analyze("main", &module)
}

#[test]
fn return_value_takes_the_return_type() {
    let mut f = Fixture::new();
    let five = f.int("5");
    let body = vec![f.ret(Some(five))];
    let package = analyze_i32_fn(&mut f, body).unwrap();

    let body = only_body(&package);
    assert_eq!(body.exit, Exit::Return);
    match &body.stmts[0] {
        TypedStmt::Return(Some(value)) => assert_eq!(value.ty, Type::I32),
        other => panic!("expected return, found {other:?}"),
    }
}

#[test]
fn missing_return_is_reported() {
    let mut f = Fixture::new();
    let err = analyze_i32_fn(&mut f, Vec::new()).unwrap_err();
    assert!(
        matches!(&err, SemanticError::MissingReturn { name, ret: Type::I32, .. } if *name == f.name("f")),
        "{err:?}"
    );
}

#[test]
fn bare_return_in_valued_function_is_a_mismatch() {
    let mut f = Fixture::new();
    let body = vec![f.ret(None)];
    let err = analyze_i32_fn(&mut f, body).unwrap_err();
    assert!(matches!(
        err,
        SemanticError::TypeMismatch {
            expected: Type::I32,
            found: Type::Empty,
            ..
        }
    ));
}

#[test]
fn if_else_returning_on_every_branch_returns() {
    let mut f = Fixture::new();
    let (c0, c1) = (f.boolean(true), f.boolean(false));
    let (one, two, three) = (f.int("1"), f.int("2"), f.int("3"));
    let arms = vec![(c0, vec![f.ret(Some(one))]), (c1, vec![f.ret(Some(two))])];
    let otherwise = vec![f.ret(Some(three))];
    let body = vec![f.if_chain(arms, Some(otherwise))];
    let package = analyze_i32_fn(&mut f, body).unwrap();

    assert_eq!(only_body(&package).exit, Exit::Return);
}

#[test]
fn if_without_else_never_returns() {
    let mut f = Fixture::new();
    let (c0, one) = (f.boolean(true), f.int("1"));
    let arms = vec![(c0, vec![f.ret(Some(one))])];
    let body = vec![f.if_chain(arms, None)];
    let err = analyze_i32_fn(&mut f, body).unwrap_err();

    assert!(matches!(err, SemanticError::MissingReturn { .. }));
}

#[test]
fn returning_branch_with_empty_else_returns() {
    let mut f = Fixture::new();
    let cond = f.boolean(true);
    let arms = vec![(cond, vec![f.ret(None)])];
    let stmt = f.if_chain(arms, Some(Vec::new()));
    let package = f.analyze_main(vec![stmt]).unwrap();

    assert_eq!(only_body(&package).exit, Exit::Return);
}

#[test]
fn else_if_chain_without_else_never_returns() {
    let mut f = Fixture::new();
    let (c0, c1) = (f.boolean(true), f.boolean(false));
    let (one, two) = (f.int("1"), f.int("2"));
    let arms = vec![(c0, vec![f.ret(Some(one))]), (c1, vec![f.ret(Some(two))])];
    let body = vec![f.if_chain(arms, None)];
    let err = analyze_i32_fn(&mut f, body).unwrap_err();

    assert!(matches!(err, SemanticError::MissingReturn { .. }));
}

#[test]
fn if_condition_must_be_bool() {
    let mut f = Fixture::new();
    let cond = f.int("1");
    let arms = vec![(cond, Vec::new())];
    let stmt = f.if_chain(arms, None);
    let err = f.analyze_main(vec![stmt]).unwrap_err();

    assert_eq!(
        err,
        SemanticError::TypeMismatch {
            expected: Type::Bool,
            found: Type::ISIZE,
            span: f.span_of(cond),
        }
    );
}

#[test]
fn loop_absorbs_break_and_continue() {
    let mut f = Fixture::new();
    let cond = f.boolean(true);
    let arms = vec![(cond, vec![f.cont()])];
    let inner = f.if_chain(arms, Some(Vec::new()));
    let brk = f.brk();
    let stmt = f.loop_(vec![inner, brk]);
    let package = f.analyze_main(vec![stmt]).unwrap();

    let body = only_body(&package);
    assert_eq!(body.exit, Exit::None);
    match &body.stmts[0] {
        TypedStmt::Loop { id, body } => {
            assert_eq!(body.exit, Exit::BreakLoop);
            assert!(matches!(body.stmts[1], TypedStmt::Break(b) if b == *id));
        }
        other => panic!("expected loop, found {other:?}"),
    }
}

#[test]
fn loop_with_only_break_does_not_satisfy_return() {
    let mut f = Fixture::new();
    let brk = f.brk();
    let body = vec![f.loop_(vec![brk])];
    let err = analyze_i32_fn(&mut f, body).unwrap_err();
    assert!(matches!(err, SemanticError::MissingReturn { .. }));

    let mut f = Fixture::new();
    let one = f.int("1");
    let ret = f.ret(Some(one));
    let body = vec![f.loop_(vec![ret])];
    let package = analyze_i32_fn(&mut f, body).unwrap();
    assert_eq!(only_body(&package).exit, Exit::Return);
}

#[test]
fn loop_control_outside_loop_fails() {
    let mut f = Fixture::new();
    let stmt = f.cont();
    let span = stmt.span;
    let err = f.analyze_main(vec![stmt]).unwrap_err();

    assert_eq!(err, SemanticError::LoopControlOutsideLoop { span });
}

#[test]
fn nested_loops_get_distinct_ids() {
    let mut f = Fixture::new();
    let (c_outer, c_inner) = (f.boolean(true), f.boolean(true));
    let inner_brk = f.brk();
    let inner = f.while_(c_inner, vec![inner_brk]);
    let outer_cont = f.cont();
    let stmt = f.while_(c_outer, vec![inner, outer_cont]);
    let package = f.analyze_main(vec![stmt]).unwrap();

    let TypedStmt::While { id: outer, body, .. } = &only_body(&package).stmts[0] else {
        panic!("expected while");
    };
    let TypedStmt::While { id: inner, body: inner_body, .. } = &body.stmts[0] else {
        panic!("expected nested while");
    };
    assert_ne!(outer, inner);
    assert!(matches!(inner_body.stmts[0], TypedStmt::Break(b) if b == *inner));
    assert!(matches!(body.stmts[1], TypedStmt::Continue(c) if c == *outer));
}

#[test]
fn for_binds_the_element_type() {
    let mut f = Fixture::new();
    let elems = vec![f.int("1"), f.int("2")];
    let elem = f.ty("u64");
    let arr = f.array(2, elem, elems);
    let x = f.ident("x");
    let u64_ty = f.ty("u64");
    let body = vec![f.let_("y", Some(u64_ty), Some(x))];
    let stmt = f.for_("x", arr, body);
    let package = f.analyze_main(vec![stmt]).unwrap();

    let function = &package.functions[0];
    match &only_body(&package).stmts[0] {
        TypedStmt::For { cursor, .. } => {
            let cursor = function.local(*cursor);
            assert_eq!(cursor.ty, Type::U64);
            assert_eq!(cursor.origin, crate::scope::SymbolOrigin::LoopCursor);
        }
        other => panic!("expected for, found {other:?}"),
    }
}

#[test]
fn for_over_non_array_fails() {
    let mut f = Fixture::new();
    let iter = f.int("3");
    let stmt = f.for_("x", iter, Vec::new());
    let err = f.analyze_main(vec![stmt]).unwrap_err();

    assert_eq!(
        err,
        SemanticError::NotAnArray {
            found: Type::ISIZE,
            span: f.span_of(iter),
        }
    );
}

#[test]
fn block_scoped_names_end_with_the_block() {
    let mut f = Fixture::new();
    let one = f.int("1");
    let inner = vec![f.let_("y", None, Some(one))];
    let block = f.block_stmt(inner);
    let y = f.ident("y");
    let use_y = f.expr_stmt(y);
    let err = f.analyze_main(vec![block, use_y]).unwrap_err();

    assert!(matches!(err, SemanticError::UnknownIdentifier { name, .. } if name == f.name("y")));
}

#[test]
fn locals_may_shadow_but_parameters_may_not_repeat() {
    let mut f = Fixture::new();
    let (one, two) = (f.int("1"), f.int("2"));
    let stmts = vec![f.let_("x", None, Some(one)), f.let_("x", None, Some(two))];
    let package = f.analyze_main(stmts).unwrap();
    assert_eq!(package.functions[0].locals.len(), 2);

    let mut f = Fixture::new();
    let (t0, t1) = (f.ty("i32"), f.ty("bool"));
    let params = vec![f.param("a", t0), f.param("a", t1)];
    let func = f.func("g", params, None, Vec::new());
    let module = Module {
        functions: vec![func],
        ..Module::default()
    };
    let err = f.analyze("main", &module).unwrap_err();
    assert!(matches!(err, SemanticError::IdentifierDuplication { name, .. } if name == f.name("a")));
}

#[test]
fn let_without_value_is_zero() {
    let mut f = Fixture::new();
    let ty = f.ty("f32");
    let stmt = f.let_("x", Some(ty), None);
    let package = f.analyze_main(vec![stmt]).unwrap();

    let value = super::let_value(&package, 0);
    assert_eq!(value.ty, Type::F32);
    assert!(matches!(value.kind, TypedExprKind::Zero));
}

#[test]
fn no_return_call_ends_a_body() {
    let mut f = Fixture::new();
    let callee = f.ident("exit");
    let call = f.call(callee, Vec::new());
    let callee2 = f.ident("exit");
    let call2 = f.call(callee2, Vec::new());
    let i32_ty = f.ty("i32");
    let body = vec![f.let_("x", Some(i32_ty), Some(call2)), f.expr_stmt(call)];
    let ret = f.ty("i32");
    let func = f.func("f", Vec::new(), Some(ret), body);
    let exit = f.extern_func("exit", Vec::new(), Some(ParsedType::NoReturn));
    let module = Module {
        functions: vec![exit, func],
        ..Module::default()
    };
    let package = f.analyze("main", &module).unwrap();

    let func = package.function(f.name("f")).unwrap();
    let body = func.body.as_ref().unwrap();
    assert_eq!(body.exit, Exit::Return);
    match &body.stmts[0] {
        TypedStmt::Let { value, .. } => {
            assert_eq!(value.ty, Type::I32);
            assert!(matches!(value.kind, TypedExprKind::NoReturnToAny(_)));
        }
        other => panic!("expected let, found {other:?}"),
    }
    assert!(package.function(f.name("exit")).unwrap().body.is_none());
}
