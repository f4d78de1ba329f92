use std::sync::Arc;

use num_bigint::BigInt;
use proptest::prelude::*;
use sim_ir::{ExprKind, Module, UnaryOp};
use sim_types::{FuncType, GenericParam, Type};

use super::{let_value, Fixture};
use crate::config::SemaConfig;
use crate::error::SemanticError;
use crate::generic::GenericFuncDef;
use crate::ir::TypedExprKind;

const VALUE_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
    "f64", "bool", "str",
];

proptest! {
    #[test]
    fn unhinted_integer_literals_are_isize(value in any::<i64>()) {
        let mut f = Fixture::new();
        let literal = f.int(&value.unsigned_abs().to_string());
        let expr = if value < 0 { f.unary(UnaryOp::Neg, literal) } else { literal };
        let stmt = f.let_("x", None, Some(expr));
        let package = f.analyze_main(vec![stmt]).unwrap();

        let typed = let_value(&package, 0);
        prop_assert_eq!(&typed.ty, &Type::ISIZE);
        prop_assert!(matches!(&typed.kind, TypedExprKind::Int(v) if *v == BigInt::from(value)));
    }

    #[test]
    fn unhinted_char_literals_are_i32_code_points(c in any::<char>()) {
        let mut f = Fixture::new();
        let literal = f.expr(ExprKind::Char(c));
        let stmt = f.let_("c", None, Some(literal));
        let package = f.analyze_main(vec![stmt]).unwrap();

        let typed = let_value(&package, 0);
        prop_assert_eq!(&typed.ty, &Type::I32);
        prop_assert!(matches!(&typed.kind, TypedExprKind::Int(v) if *v == BigInt::from(u32::from(c))));
    }

    #[test]
    fn unhinted_float_literals_are_f64(whole in 0u32..1_000_000, frac in 0u32..1_000_000) {
        let mut f = Fixture::new();
        let literal = f.float(&format!("{whole}.{frac}"));
        let stmt = f.let_("x", None, Some(literal));
        let package = f.analyze_main(vec![stmt]).unwrap();

        prop_assert_eq!(&let_value(&package, 0).ty, &Type::F64);
    }

    #[test]
    fn assigning_immutable_local_fails_for_any_type(ty in proptest::sample::select(VALUE_TYPES)) {
        let mut f = Fixture::new();
        let parsed = f.ty(ty);
        let (target, value) = (f.ident("x"), f.ident("x"));
        let assign = f.assign(target, value);
        let stmts = vec![f.let_("x", Some(parsed), None), f.expr_stmt(assign)];
        let err = f.analyze_main(stmts).unwrap_err();

        prop_assert_eq!(err, SemanticError::NotMutable { span: f.span_of(target) });
    }

    #[test]
    fn parenthesized_expression_is_unchanged(value in 0u64..1_000_000, hint in proptest::option::of(proptest::sample::select(VALUE_TYPES))) {
        let mut f = Fixture::new();
        let text = value.to_string();
        let (bare, inner) = (f.int(&text), f.int(&text));
        let paren = f.tuple(vec![inner]);
        let stmts = match hint {
            Some(ty) => {
                let (t0, t1) = (f.ty(ty), f.ty(ty));
                vec![f.let_("a", Some(t0), Some(bare)), f.let_("b", Some(t1), Some(paren))]
            }
            None => vec![f.let_("a", None, Some(bare)), f.let_("b", None, Some(paren))],
        };

        match f.analyze_main(stmts) {
            Ok(package) => {
                let (a, b) = (let_value(&package, 0), let_value(&package, 1));
                prop_assert_eq!(&a.ty, &b.ty);
                prop_assert_eq!(format!("{:?}", a.kind), format!("{:?}", b.kind));
                prop_assert_eq!(b.span, f.span_of(inner));
            }
            // Both forms fail identically, so the first one reports.
            Err(err) => prop_assert_eq!(err.span(), f.span_of(bare)),
        }
    }

    #[test]
    fn omitted_struct_fields_are_zero(
        fields in proptest::collection::vec((proptest::sample::select(VALUE_TYPES), any::<bool>()), 1..6),
    ) {
        let mut f = Fixture::new();
        let decls: Vec<_> = fields
            .iter()
            .enumerate()
            .map(|(i, (ty, _))| {
                let ty = f.ty(ty);
                (format!("f{i}"), ty)
            })
            .collect();
        let decl = f.struct_decl("S", decls.iter().map(|(n, t)| (n.as_str(), t.clone())).collect());

        let mut params = Vec::new();
        let mut inits = Vec::new();
        for (i, (ty, given)) in fields.iter().enumerate() {
            if *given {
                let ty = f.ty(ty);
                params.push(f.param(&format!("p{i}"), ty));
                inits.push((format!("f{i}"), f.ident(&format!("p{i}"))));
            }
        }
        let path = f.path("S");
        let lit = f.struct_lit(path, inits.iter().map(|(n, v)| (n.as_str(), *v)).collect());
        let body = vec![f.let_("s", None, Some(lit))];
        let module = Module {
            structs: vec![decl],
            functions: vec![f.func("make", params, None, body)],
            ..Module::default()
        };
        let package = f.analyze("main", &module).unwrap();

        let TypedExprKind::Struct(values) = &let_value(&package, 0).kind else {
            panic!("expected struct literal");
        };
        prop_assert_eq!(values.len(), fields.len());
        for (value, (ty, given)) in values.iter().zip(&fields) {
            let declared = Type::builtin(ty);
            prop_assert_eq!(Some(&value.ty), declared.as_ref());
            if *given {
                prop_assert!(matches!(value.kind, TypedExprKind::Local(_)));
            } else {
                prop_assert!(matches!(value.kind, TypedExprKind::Zero));
                prop_assert!(value.ty.zero_value().is_some());
            }
        }
    }

    #[test]
    fn instantiation_is_cached_per_argument_list(
        first in proptest::sample::select(VALUE_TYPES),
        second in proptest::sample::select(VALUE_TYPES),
    ) {
        let interner = sim_ir::StringInterner::new();
        let params: Vec<_> = ["A", "B"]
            .iter()
            .zip(0..)
            .map(|(name, index)| GenericParam { name: interner.intern(name), index })
            .collect();
        let def = GenericFuncDef::new(
            true,
            interner.intern("main"),
            interner.intern("pair"),
            params.clone(),
            FuncType::new(params.iter().copied().map(Type::Generic).collect(), Type::Empty),
        );
        let args = [Type::builtin(first).unwrap(), Type::builtin(second).unwrap()];

        let a = def.instantiate(&args).unwrap();
        let b = def.instantiate(&args).unwrap();
        prop_assert!(Arc::ptr_eq(&a, &b));

        let swapped = def.instantiate(&[args[1].clone(), args[0].clone()]).unwrap();
        prop_assert_eq!(Arc::ptr_eq(&a, &swapped), first == second);
        prop_assert_eq!(def.instance_count(), if first == second { 1 } else { 2 });
    }

    #[test]
    fn parallel_bodies_report_the_first_error(broken in proptest::collection::vec(any::<bool>(), 1..12)) {
        let sequential = analyze_bodies(&broken, false);
        let parallel = analyze_bodies(&broken, true);
        prop_assert_eq!(sequential.clone(), parallel);
        prop_assert_eq!(sequential.is_err(), broken.contains(&true));
    }
}

/// One function per flag; a `true` flag makes its body `let x bool = 1`.
///
/// Fresh fixtures build identical trees, so results of two runs compare
/// equal, spans included.
fn analyze_bodies(broken: &[bool], parallel_bodies: bool) -> Result<usize, SemanticError> {
    let mut f = Fixture::with_config(SemaConfig {
        parallel_bodies,
        ..SemaConfig::default()
    });
    let functions = broken
        .iter()
        .enumerate()
        .map(|(i, broken)| {
            let one = f.int("1");
            let ty = if *broken { f.ty("bool") } else { f.ty("isize") };
            let body = vec![f.let_("x", Some(ty), Some(one))];
            f.func(&format!("f{i}"), Vec::new(), None, body)
        })
        .collect();
    let module = Module {
        functions,
        ..Module::default()
    };
    f.analyze("main", &module).map(|package| package.functions.len())
}
