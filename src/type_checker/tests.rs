//! Unit tests for the type checker.
//!
//! Programs are run through the lexer and parser first, so every test reads
//! as Simple source.

use std::rc::Rc;

use super::type_checker::{type_check, type_check_function, type_check_stmt, register_function_signature, TypeChecker};
use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn parse_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.simple".to_string())).unwrap();
    let (_, program) = parse(tokens, Rc::new("test.simple".to_string()));
    program.unwrap()
}

fn check(source: &str) -> Result<TypeChecker, Error> {
    type_check(&parse_source(source))
}

fn check_err(source: &str) -> ErrorImpl {
    match check(source) {
        Ok(checker) => panic!("expected an error, program checked with globals {:?}", checker.global_types()),
        Err(error) => error.kind().clone(),
    }
}

fn global(checker: &TypeChecker, name: &str) -> String {
    checker
        .global_types()
        .into_iter()
        .find(|(global, _)| global == name)
        .map(|(_, ty)| ty)
        .unwrap_or_else(|| panic!("no global named `{}`", name))
}

fn mismatch(expected: &str, received: &str) -> ErrorImpl {
    ErrorImpl::TypeMismatch {
        expected: expected.to_string(),
        received: received.to_string(),
    }
}

#[test]
fn test_explicitly_typed_program() {
    let checker = check(
        "func add(int a, int b) { return a + b; }
         int x;
         x := add(1, 2);",
    )
    .unwrap();

    assert_eq!(
        checker.global_types(),
        vec![
            ("add".to_string(), "(int, int) -> int".to_string()),
            ("x".to_string(), "int".to_string()),
        ]
    );
}

#[test]
fn test_empty_program() {
    let checker = check("").unwrap();
    assert!(checker.global_types().is_empty());
}

#[test]
fn test_var_is_inferred_from_first_use() {
    let checker = check("var x; var y; x := true; y := x && false;").unwrap();
    assert_eq!(global(&checker, "x"), "bool");
    assert_eq!(global(&checker, "y"), "bool");
}

#[test]
fn test_inferred_type_conflicts_with_later_use() {
    let error = check_err("var x; var y; x := true; y := x + 1;");
    assert_eq!(error, mismatch("int", "bool"));
}

#[test]
fn test_unconstrained_globals_stay_variables() {
    let checker = check("var x;").unwrap();
    assert_eq!(global(&checker, "x"), "t0");
}

#[test]
fn test_duplicate_in_one_block() {
    let error = check_err("{ int x; bool x; }");
    assert_eq!(error, ErrorImpl::DuplicateDeclaration { name: "x".to_string() });
}

#[test]
fn test_duplicate_untyped_declaration() {
    let error = check_err("{ var x; var x; }");
    assert_eq!(error, ErrorImpl::DuplicateDeclaration { name: "x".to_string() });
}

#[test]
fn test_duplicate_parameter() {
    let error = check_err("func f(int a, var a) return a;");
    assert_eq!(error, ErrorImpl::DuplicateDeclaration { name: "a".to_string() });
}

#[test]
fn test_function_and_global_share_a_scope() {
    let error = check_err("func f() return 1; int f;");
    assert_eq!(error, ErrorImpl::DuplicateDeclaration { name: "f".to_string() });
}

#[test]
fn test_shadowing_resolves_to_innermost_declaration() {
    let checker = check("int x; { bool x; x := true; } x := 1;").unwrap();
    assert_eq!(global(&checker, "x"), "int");
}

#[test]
fn test_block_names_are_not_visible_after_the_block() {
    let error = check_err("{ int y; y := 1; } y := 2;");
    assert_eq!(error, ErrorImpl::UndeclaredName { name: "y".to_string() });
}

#[test]
fn test_undeclared_assignment_target() {
    let error = check_err("x := 1;");
    assert_eq!(error, ErrorImpl::UndeclaredName { name: "x".to_string() });
}

#[test]
fn test_undeclared_name_in_expression() {
    let error = check_err("int x; x := y + 1;");
    assert_eq!(error, ErrorImpl::UndeclaredName { name: "y".to_string() });
}

#[test]
fn test_undeclared_function() {
    let error = check_err("int x; x := missing(1);");
    assert_eq!(error, ErrorImpl::UndeclaredName { name: "missing".to_string() });
}

#[test]
fn test_arity_mismatch() {
    let error = check_err("func f(int a) return a; int r; r := f(1, 2);");
    assert_eq!(error, ErrorImpl::ArityMismatch { expected: 1, received: 2 });
}

#[test]
fn test_calling_an_int_is_not_callable() {
    let error = check_err("int x; int y; y := x(1);");
    assert_eq!(
        error,
        ErrorImpl::NotCallable {
            name: "x".to_string(),
            found: "int".to_string(),
        }
    );
}

#[test]
fn test_argument_type_mismatch() {
    let error = check_err("func f(int a) return a; int r; r := f(true);");
    assert_eq!(error, mismatch("int", "bool"));
}

#[test]
fn test_return_outside_function() {
    let error = check_err("return 1;");
    assert_eq!(error, ErrorImpl::ReturnOutsideFunction);
}

#[test]
fn test_return_outside_function_inside_block() {
    let error = check_err("while true { return 1; }");
    assert_eq!(error, ErrorImpl::ReturnOutsideFunction);
}

#[test]
fn test_returns_must_agree() {
    let error = check_err("func f(var a) { if a return 1; else return true; }");
    assert_eq!(error, mismatch("int", "bool"));
}

#[test]
fn test_condition_must_be_bool() {
    assert_eq!(check_err("int x; if x x := 1;"), mismatch("bool", "int"));
    assert_eq!(check_err("int x; while x + 1 x := 1;"), mismatch("bool", "int"));
}

#[test]
fn test_comparison_yields_bool() {
    let checker = check("var a; var b; a := 1 < 2; b := 3 > 4 || a;").unwrap();
    assert_eq!(global(&checker, "a"), "bool");
    assert_eq!(global(&checker, "b"), "bool");
}

#[test]
fn test_function_value_is_not_an_int() {
    let error = check_err("func f() return 1; int x; x := f;");
    assert_eq!(error, mismatch("int", "() -> int"));
}

#[test]
fn test_mutual_recursion_in_any_order() {
    let checker = check(
        "func even(var n) { if n = 0 return true; else return odd(n - 1); }
         func odd(var n) { if n = 0 return false; else return even(n - 1); }
         bool r;
         r := even(10);",
    )
    .unwrap();

    assert_eq!(global(&checker, "even"), "(int) -> bool");
    assert_eq!(global(&checker, "odd"), "(int) -> bool");
}

#[test]
fn test_function_called_before_its_definition() {
    let checker = check(
        "func first() return second(1);
         func second(var x) return x * 2;",
    )
    .unwrap();

    assert_eq!(global(&checker, "first"), "() -> int");
    assert_eq!(global(&checker, "second"), "(int) -> int");
}

#[test]
fn test_identity_stays_polymorphic_in_display() {
    let checker = check("func id(var x) return x;").unwrap();
    assert_eq!(global(&checker, "id"), "(t0) -> t0");
}

#[test]
fn test_functions_are_monomorphic() {
    let error = check_err(
        "func id(var x) return x;
         int a; bool b;
         a := id(1);
         b := id(true);",
    );
    assert_eq!(error, mismatch("int", "bool"));
}

#[test]
fn test_checking_is_idempotent() {
    let program = parse_source(
        "func apply(var f, var x) { return f(x); }
         func inc(int n) { return n + 1; }
         var r;
         r := apply(inc, 41);",
    );

    let first = type_check(&program).unwrap().global_types();
    let second = type_check(&program).unwrap().global_types();
    assert_eq!(first, second);
}

#[test]
fn test_equality_unifies_both_sides() {
    let checker = check("var a; var b; bool c; c := a = b;").unwrap();
    assert_eq!(global(&checker, "a"), global(&checker, "b"));
    assert_eq!(global(&checker, "c"), "bool");
}

#[test]
fn test_equality_links_later_uses() {
    let error = check_err("var a; var b; bool c; c := a = b; a := 1; b := true;");
    assert_eq!(error, mismatch("int", "bool"));
}

#[test]
fn test_equality_of_matching_constants() {
    let checker = check("var a; var b; a := 1 = 2; b := true = false;").unwrap();
    assert_eq!(global(&checker, "a"), "bool");
    assert_eq!(global(&checker, "b"), "bool");
}

#[test]
fn test_equality_of_different_constants() {
    assert_eq!(check_err("bool c; c := 1 = true;"), mismatch("int", "bool"));
}

#[test]
fn test_higher_order_apply() {
    let checker = check(
        "func apply(var f, var x) { return f(x); }
         func inc(int n) { return n + 1; }
         int r;
         r := apply(inc, 41);",
    )
    .unwrap();

    assert_eq!(global(&checker, "apply"), "((int) -> int, int) -> int");
    assert_eq!(global(&checker, "inc"), "(int) -> int");
}

#[test]
fn test_parameter_callee_is_inferred_from_its_use() {
    let checker = check("func apply(var f, int x) { return f(x) + 1; }").unwrap();
    assert_eq!(global(&checker, "apply"), "((int) -> int, int) -> int");
}

#[test]
fn test_calling_a_parameter_infers_a_function_type() {
    let checker = check("func call(var g) return g(1, true);").unwrap();
    assert_eq!(global(&checker, "call"), "((int, bool) -> t2) -> t2");
}

#[test]
fn test_self_application_is_rejected() {
    match check_err("func f(var g) { return g(g); }") {
        ErrorImpl::TypeMismatch { expected, received } => {
            assert_eq!(expected, "t0");
            assert!(received.ends_with("(infinite type)"), "received: {}", received);
        }
        other => panic!("expected TypeMismatch, found {:?}", other),
    }
}

#[test]
fn test_error_position_points_at_value() {
    let error = check("int x;\nx := true;").unwrap_err();
    assert_eq!(error.get_position().0, 12);
}

#[test]
fn test_scope_restored_after_failing_block() {
    let program = parse_source("{ int x; x := true; }");
    let mut checker = TypeChecker::new();

    assert!(type_check_stmt(&mut checker, &program.main[0]).is_err());
    assert_eq!(checker.environment.depth(), 1);
    assert_eq!(checker.type_of("x"), None);
}

#[test]
fn test_state_restored_after_failing_function() {
    let program = parse_source("func f(int a) { return a && true; }");
    let func = &program.functions[0];
    let mut checker = TypeChecker::new();

    register_function_signature(&mut checker, func).unwrap();
    assert!(type_check_function(&mut checker, func).is_err());
    assert_eq!(checker.environment.depth(), 1);
    assert_eq!(checker.return_type, None);
    assert_eq!(checker.type_of("a"), None);
}

#[test]
fn test_sessions_do_not_share_variables() {
    let first = check("var a; var b;").unwrap();
    let second = check("var c;").unwrap();

    assert_eq!(global(&first, "b"), "t1");
    assert_eq!(global(&second, "c"), "t0");
}
