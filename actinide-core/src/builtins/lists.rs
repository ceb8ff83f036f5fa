// actinide-core - Pair and list builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Pairs, lists, and the higher-order list operations.
//!
//! `map`, `filter`, and `reduce` apply their procedure argument through the
//! evaluator's uniform calling convention; the procedure must produce
//! exactly one value per call. `uncons` is the one multi-value builtin
//! here, yielding head and tail as two results.

use actinide_parser::Value;

use crate::error::{Error, Result};
use crate::eval::apply;

pub fn builtin_cons(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 2 {
        return Err(Error::arity_named("cons", 2, args.len()));
    }
    Ok(vec![Value::cons(args[0].clone(), args[1].clone())])
}

pub fn builtin_head(args: &[Value]) -> Result<Vec<Value>> {
    let cell = expect_cons("head", args)?;
    Ok(vec![cell.head.clone()])
}

pub fn builtin_tail(args: &[Value]) -> Result<Vec<Value>> {
    let cell = expect_cons("tail", args)?;
    Ok(vec![cell.tail.clone()])
}

/// (uncons pair) - head and tail as a two-value result
pub fn builtin_uncons(args: &[Value]) -> Result<Vec<Value>> {
    let cell = expect_cons("uncons", args)?;
    Ok(vec![cell.head.clone(), cell.tail.clone()])
}

pub fn builtin_list(args: &[Value]) -> Result<Vec<Value>> {
    Ok(vec![Value::list(args.to_vec())])
}

/// (append l1 ... ln) - concatenation. Every argument but the last must be
/// a proper list; the last may be any value and becomes the result's tail.
pub fn builtin_append(args: &[Value]) -> Result<Vec<Value>> {
    let Some((last, init)) = args.split_last() else {
        return Ok(vec![Value::Nil]);
    };
    let mut elems = Vec::new();
    for arg in init {
        let items = arg
            .try_list()
            .ok_or_else(|| Error::type_error_in("append", "proper list", arg.type_name()))?;
        elems.extend(items);
    }
    Ok(vec![Value::list_with_tail(elems, last.clone())])
}

/// (length x) - dispatches on type: characters of a string, elements of a
/// proper list or vector.
pub fn builtin_length(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("length", 1, args.len()));
    }
    let len = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::Vector(v) => v.borrow().len(),
        list => list
            .try_list()
            .ok_or_else(|| {
                Error::type_error_in("length", "list, string, or vector", list.type_name())
            })?
            .len(),
    };
    Ok(vec![Value::int(len as i64)])
}

pub fn builtin_map(args: &[Value]) -> Result<Vec<Value>> {
    let (func, items) = expect_proc_and_list("map", args)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(apply_single("map", func, &[item])?);
    }
    Ok(vec![Value::list(out)])
}

pub fn builtin_filter(args: &[Value]) -> Result<Vec<Value>> {
    let (pred, items) = expect_proc_and_list("filter", args)?;
    let mut out = Vec::new();
    for item in items {
        if apply_single("filter", pred, &[item.clone()])?.is_truthy() {
            out.push(item);
        }
    }
    Ok(vec![Value::list(out)])
}

/// (reduce f list) - left fold. A singleton list yields its element; the
/// empty list is an error.
pub fn builtin_reduce(args: &[Value]) -> Result<Vec<Value>> {
    let (func, items) = expect_proc_and_list("reduce", args)?;
    let mut iter = items.into_iter();
    let mut acc = iter
        .next()
        .ok_or_else(|| Error::Eval("Cannot reduce an empty list".to_string()))?;
    for item in iter {
        acc = apply_single("reduce", func, &[acc, item])?;
    }
    Ok(vec![acc])
}

// ============================================================================
// Helpers
// ============================================================================

fn expect_cons<'a>(
    name: &'static str,
    args: &'a [Value],
) -> Result<&'a actinide_parser::ConsCell> {
    if args.len() != 1 {
        return Err(Error::arity_named(name, 1, args.len()));
    }
    match &args[0] {
        Value::Cons(cell) => Ok(cell.as_ref()),
        other => Err(Error::type_error_in(name, "cons", other.type_name())),
    }
}

fn expect_proc_and_list<'a>(
    name: &'static str,
    args: &'a [Value],
) -> Result<(&'a Value, Vec<Value>)> {
    if args.len() != 2 {
        return Err(Error::arity_named(name, 2, args.len()));
    }
    if !matches!(args[0], Value::Procedure(_)) {
        return Err(Error::type_error_in(name, "procedure", args[0].type_name()));
    }
    let items = args[1]
        .try_list()
        .ok_or_else(|| Error::type_error_in(name, "proper list", args[1].type_name()))?;
    Ok((&args[0], items))
}

/// Apply a procedure expecting exactly one result value.
fn apply_single(context: &'static str, func: &Value, args: &[Value]) -> Result<Value> {
    let mut values = apply(func, args)?;
    match values.pop() {
        Some(value) if values.is_empty() => Ok(value),
        Some(_) => Err(Error::value_count(context, values.len() + 1)),
        None => Err(Error::value_count(context, 0)),
    }
}
