// actinide-core - Logical builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `and`, `or`, and `not`.
//!
//! Unlike their Scheme namesakes these are ordinary procedures, not
//! short-circuiting special forms: every argument is already evaluated by
//! the time they run. Results are canonical booleans, coerced from each
//! argument's truthiness.

use actinide_parser::Value;

use crate::error::{Error, Result};

pub fn builtin_and(args: &[Value]) -> Result<Vec<Value>> {
    Ok(vec![Value::bool(args.iter().all(Value::is_truthy))])
}

pub fn builtin_or(args: &[Value]) -> Result<Vec<Value>> {
    Ok(vec![Value::bool(args.iter().any(Value::is_truthy))])
}

pub fn builtin_not(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("not", 1, args.len()));
    }
    Ok(vec![Value::bool(!args[0].is_truthy())])
}
