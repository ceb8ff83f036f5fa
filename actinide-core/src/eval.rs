// actinide-core - Trampolined tree-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The evaluator: reduces fully expanded forms to value sequences.
//!
//! Every reduction produces an ordered *sequence* of values, usually one.
//! `values` forms and `define` produce other lengths, and a subform's
//! sequence splices into the argument list of a surrounding application.
//!
//! # Tail calls
//!
//! Reducing one form yields a [`Step`]: either a final value sequence or
//! the next form-and-environment to reduce. The outer loop in [`eval`]
//! pumps steps until done, so tail positions — the last form of a `begin`,
//! the chosen branch of an `if`, the final body form of an applied
//! procedure — cost no host stack. Non-tail positions recurse on the host
//! stack under a thread-local depth budget; exceeding the budget reports
//! [`Error::RecursionDepth`] instead of overflowing.
//!
//! Builtin procedures are opaque native code and count as one host frame.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use actinide_parser::{BuiltinProc, Formals, LambdaProc, Procedure, Value};

use crate::env::Env;
use crate::error::{AritySpec, Error, Result};

/// Type alias for the native procedure signature: a sequence of values in,
/// a sequence of values out.
pub type NativeFnImpl = dyn Fn(&[Value]) -> Result<Vec<Value>>;

/// Default budget for nested (non-tail) evaluation. Conservative enough to
/// fire before the host stack is at risk, including on test-runner threads.
const DEFAULT_MAX_EVAL_DEPTH: usize = 1_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum nested evaluation depth for this thread. Returns the
/// previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum nested evaluation depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current nested evaluation depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard for the nested evaluation depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            (current, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::RecursionDepth { depth: max })
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// One reduction step: either a final value sequence, or the next form to
/// reduce in some environment (a tail transfer).
enum Step {
    Done(Vec<Value>),
    Continue(Value, Env),
}

/// Evaluate a fully expanded form, returning its value sequence.
///
/// # Examples
///
/// ```
/// use actinide_core::{eval, register_builtins, Env};
/// use actinide_parser::{read_str, SymbolTable, Value};
///
/// let symbols = SymbolTable::new();
/// let env = Env::new();
/// register_builtins(&env, &symbols);
///
/// let form = read_str("(+ 1 2 3)", &symbols).unwrap();
/// assert_eq!(eval(&form, &env).unwrap(), vec![Value::int(6)]);
/// ```
pub fn eval(form: &Value, env: &Env) -> Result<Vec<Value>> {
    let _guard = EvalDepthGuard::new()?;
    pump(eval_step(form, env)?)
}

/// Evaluate a form that must produce exactly one value.
pub fn eval_single(form: &Value, env: &Env, context: &'static str) -> Result<Value> {
    let mut values = eval(form, env)?;
    match values.pop() {
        Some(value) if values.is_empty() => Ok(value),
        Some(_) => Err(Error::value_count(context, values.len() + 1)),
        None => Err(Error::value_count(context, 0)),
    }
}

/// Apply a procedure to already-evaluated arguments. This is the host-side
/// entry point used by `map`-style builtins, macro transformers, and
/// embedders.
pub fn apply(func: &Value, args: &[Value]) -> Result<Vec<Value>> {
    let _guard = EvalDepthGuard::new()?;
    pump(apply_step(func, args.to_vec())?)
}

/// Drive steps to completion. Tail transfers loop here instead of growing
/// the host stack.
fn pump(mut step: Step) -> Result<Vec<Value>> {
    loop {
        match step {
            Step::Done(values) => return Ok(values),
            Step::Continue(form, env) => step = eval_step(&form, &env)?,
        }
    }
}

/// Reduce one form by one step.
fn eval_step(form: &Value, env: &Env) -> Result<Step> {
    match form {
        // Symbols evaluate by environment lookup
        Value::Symbol(sym) => Ok(Step::Done(vec![env.lookup(sym)?])),

        // Lists are special forms or applications
        Value::Cons(_) => {
            let items = form
                .try_list()
                .ok_or_else(|| Error::Eval("Cannot evaluate a dotted pair".to_string()))?;
            if let Value::Symbol(sym) = &items[0] {
                match sym.text() {
                    "quote" => return eval_quote(&items[1..]),
                    "begin" => return eval_begin(&items[1..], env),
                    "if" => return eval_if(&items[1..], env),
                    "lambda" => return eval_lambda(&items[1..], env),
                    "define" => return eval_define(&items[1..], env),
                    "define-macro" => return eval_define_macro(&items[1..], env),
                    "values" => return eval_values(&items[1..], env),
                    _ => {}
                }
            }
            eval_application(&items, env)
        }

        // Everything else is self-evaluating
        other => Ok(Step::Done(vec![other.clone()])),
    }
}

// ============================================================================
// Special forms
// ============================================================================

/// (quote form) - the form itself, unevaluated
fn eval_quote(args: &[Value]) -> Result<Step> {
    if args.len() != 1 {
        return Err(Error::syntax("quote", "requires exactly 1 argument"));
    }
    Ok(Step::Done(vec![args[0].clone()]))
}

/// (begin e1 ... en) - evaluate in order, final form in tail position
fn eval_begin(args: &[Value], env: &Env) -> Result<Step> {
    match args.split_last() {
        None => Ok(Step::Done(vec![Value::Nil])),
        Some((last, init)) => {
            for form in init {
                eval(form, env)?;
            }
            Ok(Step::Continue(last.clone(), env.clone()))
        }
    }
}

/// (if cond then) or (if cond then else) - chosen branch in tail position
fn eval_if(args: &[Value], env: &Env) -> Result<Step> {
    if args.len() != 2 && args.len() != 3 {
        return Err(Error::syntax("if", "requires 2 or 3 arguments"));
    }
    let cond = eval_single(&args[0], env, "if condition")?;
    if cond.is_truthy() {
        Ok(Step::Continue(args[1].clone(), env.clone()))
    } else if args.len() == 3 {
        Ok(Step::Continue(args[2].clone(), env.clone()))
    } else {
        Ok(Step::Done(vec![Value::Nil]))
    }
}

/// (lambda formals body...) - a procedure closing over the current
/// environment
fn eval_lambda(args: &[Value], env: &Env) -> Result<Step> {
    if args.is_empty() {
        return Err(Error::syntax("lambda", "requires a formals list"));
    }
    let formals = parse_formals(&args[0])?;
    let proc = Procedure::Lambda(Rc::new(LambdaProc {
        formals,
        body: args[1..].to_vec(),
        env: Rc::new(env.clone()) as Rc<dyn Any>,
    }));
    Ok(Step::Done(vec![Value::Procedure(proc)]))
}

/// (define sym val) - bind in the innermost frame; yields no values
fn eval_define(args: &[Value], env: &Env) -> Result<Step> {
    let (sym, val) = eval_binding_form("define", args, env)?;
    env.define(sym, val);
    Ok(Step::Done(vec![]))
}

/// (define-macro sym val) - bind in the session macro table; yields no
/// values and does not affect the expansion of the current program
fn eval_define_macro(args: &[Value], env: &Env) -> Result<Step> {
    let (sym, val) = eval_binding_form("define-macro", args, env)?;
    env.macros()?.define(sym, val);
    Ok(Step::Done(vec![]))
}

fn eval_binding_form(
    form: &'static str,
    args: &[Value],
    env: &Env,
) -> Result<(actinide_parser::Symbol, Value)> {
    if args.len() != 2 {
        return Err(Error::syntax(form, "requires a symbol and a value"));
    }
    let sym = match &args[0] {
        Value::Symbol(sym) => sym.clone(),
        other => {
            return Err(Error::syntax(
                form,
                format!("binding target must be a symbol, got {}", other),
            ));
        }
    };
    let val = eval_single(&args[1], env, "binding value")?;
    Ok((sym, val))
}

/// (values e1 ... en) - the concatenation of every subform's sequence
fn eval_values(args: &[Value], env: &Env) -> Result<Step> {
    let mut out = Vec::with_capacity(args.len());
    for form in args {
        out.extend(eval(form, env)?);
    }
    Ok(Step::Done(out))
}

// ============================================================================
// Application
// ============================================================================

/// Evaluate callee and arguments left to right into one flat sequence, then
/// apply. A subform yielding several values contributes all of them, so
/// `(+ (values 1 2) 3)` sees three arguments.
fn eval_application(items: &[Value], env: &Env) -> Result<Step> {
    let mut seq = Vec::with_capacity(items.len());
    for item in items {
        seq.extend(eval(item, env)?);
    }
    if seq.is_empty() {
        return Err(Error::Eval(
            "Procedure application requires a callee".to_string(),
        ));
    }
    let func = seq.remove(0);
    apply_step(&func, seq)
}

fn apply_step(func: &Value, args: Vec<Value>) -> Result<Step> {
    match func {
        Value::Procedure(Procedure::Lambda(lambda)) => {
            let call_env = bind_formals(lambda, &args)?;
            match lambda.body.split_last() {
                None => Ok(Step::Done(vec![Value::Nil])),
                Some((last, init)) => {
                    for form in init {
                        eval(form, &call_env)?;
                    }
                    Ok(Step::Continue(last.clone(), call_env))
                }
            }
        }
        Value::Procedure(Procedure::Builtin(builtin)) => {
            Ok(Step::Done(apply_builtin(builtin, &args)?))
        }
        other => Err(Error::NotCallable(format!("{}", other))),
    }
}

/// Bind an argument sequence against a procedure's formals in a child of
/// its captured environment.
fn bind_formals(lambda: &LambdaProc, args: &[Value]) -> Result<Env> {
    let captured = lambda
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::Internal("Procedure environment has invalid type".to_string()))?;
    let call_env = captured.child();

    match &lambda.formals {
        Formals::Fixed(params) => {
            if args.len() != params.len() {
                return Err(Error::arity(params.len(), args.len()));
            }
            for (param, arg) in params.iter().zip(args.iter()) {
                call_env.define(param.clone(), arg.clone());
            }
        }
        Formals::Variadic(params, rest) => {
            if args.len() < params.len() {
                return Err(Error::Arity {
                    expected: AritySpec::AtLeast(params.len()),
                    got: args.len(),
                    name: None,
                });
            }
            for (param, arg) in params.iter().zip(args.iter()) {
                call_env.define(param.clone(), arg.clone());
            }
            call_env.define(rest.clone(), Value::list(args[params.len()..].to_vec()));
        }
        Formals::Collect(sym) => {
            call_env.define(sym.clone(), Value::list(args.to_vec()));
        }
    }
    Ok(call_env)
}

fn apply_builtin(builtin: &BuiltinProc, args: &[Value]) -> Result<Vec<Value>> {
    let func = builtin
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::Internal("Native procedure has invalid type".to_string()))?;
    func(args)
}

/// Parse a lambda's formals subform.
///
/// A proper list of symbols is fixed arity; an improper list ending in a
/// symbol binds the remainder to that symbol; a bare symbol collects the
/// whole argument sequence.
pub fn parse_formals(form: &Value) -> Result<Formals> {
    match form {
        Value::Symbol(sym) => Ok(Formals::Collect(sym.clone())),
        Value::Nil => Ok(Formals::Fixed(Vec::new())),
        Value::Cons(_) => {
            let mut params = Vec::new();
            let mut cursor = form.clone();
            loop {
                match cursor {
                    Value::Nil => return Ok(Formals::Fixed(params)),
                    Value::Symbol(rest) => return Ok(Formals::Variadic(params, rest)),
                    Value::Cons(cell) => {
                        match &cell.head {
                            Value::Symbol(sym) => params.push(sym.clone()),
                            other => {
                                return Err(Error::syntax(
                                    "lambda",
                                    format!("formal parameter must be a symbol, got {}", other),
                                ));
                            }
                        }
                        cursor = cell.tail.clone();
                    }
                    other => {
                        return Err(Error::syntax(
                            "lambda",
                            format!("formals must end in a symbol or nil, got {}", other),
                        ));
                    }
                }
            }
        }
        other => Err(Error::syntax(
            "lambda",
            format!("formals must be a list or symbol, got {}", other),
        )),
    }
}

/// Wrap a native function as a builtin procedure value.
pub fn make_native_fn(
    name: impl Into<String>,
    func: impl Fn(&[Value]) -> Result<Vec<Value>> + 'static,
) -> Procedure {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    Procedure::Builtin(BuiltinProc::new(name, func_any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actinide_parser::{SymbolTable, read_str};

    fn eval_src(src: &str) -> Result<Vec<Value>> {
        let symbols = SymbolTable::new();
        let env = Env::new();
        crate::builtins::register_builtins(&env, &symbols);
        let form = read_str(src, &symbols).unwrap();
        eval(&form, &env)
    }

    #[test]
    fn test_self_evaluating_atoms() {
        assert_eq!(eval_src("42").unwrap(), vec![Value::int(42)]);
        assert_eq!(eval_src("#t").unwrap(), vec![Value::bool(true)]);
        assert_eq!(eval_src("\"s\"").unwrap(), vec![Value::string("s")]);
        assert_eq!(eval_src("()").unwrap(), vec![Value::Nil]);
    }

    #[test]
    fn test_quote() {
        let symbols = SymbolTable::new();
        let env = Env::new();
        let form = read_str("(quote x)", &symbols).unwrap();
        assert_eq!(
            eval(&form, &env).unwrap(),
            vec![Value::symbol(symbols.intern("x"))]
        );
    }

    #[test]
    fn test_unbound_symbol() {
        assert!(matches!(
            eval_src("no-such-binding"),
            Err(Error::UnboundSymbol(_))
        ));
    }

    #[test]
    fn test_begin_sequencing() {
        assert_eq!(
            eval_src("(begin (define x 1) (define x 2) x)").unwrap(),
            vec![Value::int(2)]
        );
        assert_eq!(eval_src("(begin)").unwrap(), vec![Value::Nil]);
    }

    #[test]
    fn test_if_branches() {
        assert_eq!(eval_src("(if #t 1 2)").unwrap(), vec![Value::int(1)]);
        assert_eq!(eval_src("(if #f 1 2)").unwrap(), vec![Value::int(2)]);
        assert_eq!(eval_src("(if #f 1)").unwrap(), vec![Value::Nil]);
        assert_eq!(eval_src("(if 0 1 2)").unwrap(), vec![Value::int(2)]);
        assert_eq!(eval_src("(if \"\" 1 2)").unwrap(), vec![Value::int(2)]);
    }

    #[test]
    fn test_define_yields_nothing() {
        assert_eq!(eval_src("(define x 5)").unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn test_lambda_application() {
        assert_eq!(
            eval_src("((lambda (x y) (+ x y)) 3 4)").unwrap(),
            vec![Value::int(7)]
        );
    }

    #[test]
    fn test_variadic_formals() {
        assert_eq!(
            eval_src("((lambda (a . rest) rest) 1 2 3)").unwrap(),
            vec![Value::list(vec![Value::int(2), Value::int(3)])]
        );
        assert_eq!(
            eval_src("((lambda args args) 1 2)").unwrap(),
            vec![Value::list(vec![Value::int(1), Value::int(2)])]
        );
    }

    #[test]
    fn test_arity_mismatch() {
        assert!(matches!(
            eval_src("((lambda (x) x) 1 2)"),
            Err(Error::Arity { .. })
        ));
        assert!(matches!(
            eval_src("((lambda (x y . r) x) 1)"),
            Err(Error::Arity { .. })
        ));
    }

    #[test]
    fn test_values_splice_into_application() {
        assert_eq!(eval_src("(+ (values 1 2) 3)").unwrap(), vec![Value::int(6)]);
        assert_eq!(
            eval_src("(values 1 (values 2 3))").unwrap(),
            vec![Value::int(1), Value::int(2), Value::int(3)]
        );
    }

    #[test]
    fn test_single_value_contexts_reject_sequences() {
        assert!(matches!(
            eval_src("(define x (values 1 2))"),
            Err(Error::ValueCount { .. })
        ));
        assert!(matches!(
            eval_src("(if (values) 1 2)"),
            Err(Error::ValueCount { .. })
        ));
    }

    #[test]
    fn test_not_callable() {
        assert!(matches!(eval_src("(1 2 3)"), Err(Error::NotCallable(_))));
    }

    #[test]
    fn test_dotted_pair_is_not_evaluable() {
        assert!(eval_src("((lambda (x) x) . 1)").is_err());
    }

    #[test]
    fn test_closure_captures_definition_environment() {
        assert_eq!(
            eval_src("(begin (define x 5) ((lambda () x)))").unwrap(),
            vec![Value::int(5)]
        );
        // Later defines in the captured environment are visible
        assert_eq!(
            eval_src("(begin (define f (lambda () y)) (define y 9) (f))").unwrap(),
            vec![Value::int(9)]
        );
    }

    #[test]
    fn test_tail_recursion_does_not_grow_the_stack() {
        let src = "(begin \
                     (define loop (lambda (n) (if (= n 0) 'done (loop (- n 1))))) \
                     (loop 100000))";
        let symbols = SymbolTable::new();
        let env = Env::new();
        crate::builtins::register_builtins(&env, &symbols);
        let form = read_str(src, &symbols).unwrap();
        assert_eq!(
            eval(&form, &env).unwrap(),
            vec![Value::symbol(symbols.intern("done"))]
        );
    }

    #[test]
    fn test_non_tail_recursion_hits_depth_budget() {
        let src = "(begin \
                     (define f (lambda (n) (if (= n 0) 0 (+ 1 (f (- n 1)))))) \
                     (f 1000000))";
        assert!(matches!(
            eval_src(src),
            Err(Error::RecursionDepth { .. })
        ));
    }

    #[test]
    fn test_depth_budget_is_configurable() {
        let previous = set_max_eval_depth(64);
        let result = eval_src(
            "(begin (define f (lambda (n) (if (= n 0) 0 (+ 1 (f (- n 1)))))) (f 1000))",
        );
        set_max_eval_depth(previous);
        assert!(matches!(result, Err(Error::RecursionDepth { .. })));
    }

    #[test]
    fn test_parse_formals_shapes() {
        let symbols = SymbolTable::new();
        let fixed = read_str("(a b)", &symbols).unwrap();
        assert!(matches!(parse_formals(&fixed), Ok(Formals::Fixed(p)) if p.len() == 2));

        let variadic = read_str("(a . rest)", &symbols).unwrap();
        assert!(matches!(parse_formals(&variadic), Ok(Formals::Variadic(p, _)) if p.len() == 1));

        let collect = read_str("args", &symbols).unwrap();
        assert!(matches!(parse_formals(&collect), Ok(Formals::Collect(_))));

        let bad = read_str("(a 1)", &symbols).unwrap();
        assert!(parse_formals(&bad).is_err());
    }
}
