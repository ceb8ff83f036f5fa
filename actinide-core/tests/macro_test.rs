// actinide-core - Macro system integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Macros through the full pipeline: definition, expansion, use across
//! top-level forms, and the non-hygienic footguns that are part of the
//! contract.

mod common;

use common::*;

#[test]
fn test_let_one_macro() {
    let session = Session::new();
    let result = eval_all(
        &session,
        "(define-macro (let-one b body) \
           `((lambda (,(head b)) ,body) ,(head (tail b)))) \
         (let-one (x 1) (+ x 2))",
    )
    .unwrap();
    assert_eq!(result, vec![Value::int(3)]);
}

#[test]
fn test_macro_defined_in_one_form_visible_in_next() {
    let session = Session::new();
    eval_all(&session, "(define-macro (two) 2)").unwrap();
    assert_eq!(eval_all(&session, "(+ (two) (two))").unwrap(), vec![Value::int(4)]);
}

#[test]
fn test_macro_receives_unevaluated_forms() {
    let session = Session::new();
    let result = eval_all(
        &session,
        "(define-macro (quoted form) `(quote ,form)) \
         (quoted (this is never evaluated))",
    )
    .unwrap();
    assert_eq!(format!("{}", result[0]), "(this is never evaluated)");
}

#[test]
fn test_transformers_may_call_earlier_definitions() {
    // Non-hygienic: the transformer body runs against the top-level
    // environment at expansion time
    let session = Session::new();
    let result = eval_all(
        &session,
        "(define (wrap x) (list 'quote x)) \
         (define-macro (lit x) (wrap x)) \
         (lit (a b))",
    )
    .unwrap();
    assert_eq!(format!("{}", result[0]), "(a b)");
}

#[test]
fn test_macro_result_is_reexpanded() {
    let session = Session::new();
    let result = eval_all(
        &session,
        "(define-macro (one) 1) \
         (define-macro (via-one) '(+ (one) (one))) \
         (via-one)",
    )
    .unwrap();
    assert_eq!(result, vec![Value::int(2)]);
}

#[test]
fn test_macro_and_value_bindings_are_independent() {
    let session = Session::new();
    let result = eval_all(
        &session,
        "(define twice 100) \
         (define-macro (twice form) `(begin ,form ,form)) \
         (+ twice (begin (define counter (vector)) \
                         (twice (vector-add counter 1)) \
                         (vector-length counter)))",
    )
    .unwrap();
    // The symbol evaluates to 100 while the macro doubles the mutation
    assert_eq!(result, vec![Value::int(102)]);
}

#[test]
fn test_define_macro_inside_body_installs_at_call_time() {
    let session = Session::new();
    eval_all(
        &session,
        "(define (install) (define-macro m (lambda () ''installed)))",
    )
    .unwrap();

    // Before the call, (m) is an ordinary application of an unbound symbol
    assert!(eval_all(&session, "(m)").is_err());

    eval_all(&session, "(install)").unwrap();
    let result = eval_all(&session, "(m)").unwrap();
    assert_eq!(format!("{}", result[0]), "installed");
}

#[test]
fn test_quasiquote_without_unquotes_is_identity() {
    assert_eval!(
        "(= `(a (b 1.5) \"s\" (c . d)) '(a (b 1.5) \"s\" (c . d)))",
        Value::bool(true)
    );
}

#[test]
fn test_quasiquote_splicing_end_to_end() {
    let session = Session::new();
    let result = eval_all(
        &session,
        "(define xs '(2 3)) `(1 ,@xs 4)",
    )
    .unwrap();
    assert_eq!(format!("{}", result[0]), "(1 2 3 4)");
}

#[test]
fn test_quasiquote_unquote_evaluates() {
    let session = Session::new();
    let result = eval_all(&session, "(define x 5) `(a ,(+ x 1))").unwrap();
    assert_eq!(format!("{}", result[0]), "(a 6)");
}

#[test]
fn test_splicing_non_list_is_an_error() {
    let session = Session::new();
    assert!(eval_all(&session, "(define x 1) `(a ,@x)").is_err());
}

#[test]
fn test_multi_value_transformer_is_an_error() {
    let session = Session::new();
    eval_all(&session, "(define-macro m (lambda () (values 1 2)))").unwrap();
    let err = eval_all(&session, "(m)").unwrap_err();
    assert!(matches!(err, Error::Expansion(_)));
}

#[test]
fn test_unquote_outside_quasiquote_is_an_error() {
    assert!(matches!(eval_str(",x"), Err(Error::Expansion(_))));
    assert!(matches!(eval_str(",@x"), Err(Error::Expansion(_))));
}

#[test]
fn test_macro_loop_reports_instead_of_hanging() {
    let session = Session::new();
    eval_all(&session, "(define-macro (spin) '(spin))").unwrap();
    assert!(matches!(
        eval_all(&session, "(spin)"),
        Err(Error::MacroLoop { .. })
    ));
}
