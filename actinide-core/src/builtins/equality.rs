// actinide-core - Equality builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Structural and identity equality.
//!
//! `=` is structural: recursive over pairs and vectors, magnitude over
//! numbers regardless of integer/decimal kind, text over strings, interned
//! identity over symbols. `eq?` is identity: same allocation for heap
//! values, same variant and exact representation for numbers.

use actinide_parser::Value;

use crate::error::{Error, Result};

pub fn builtin_eq(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 2 {
        return Err(Error::arity_named("=", 2, args.len()));
    }
    Ok(vec![Value::bool(args[0] == args[1])])
}

pub fn builtin_ne(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 2 {
        return Err(Error::arity_named("!=", 2, args.len()));
    }
    Ok(vec![Value::bool(args[0] != args[1])])
}

pub fn builtin_eq_p(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 2 {
        return Err(Error::arity_named("eq?", 2, args.len()));
    }
    Ok(vec![Value::bool(args[0].identical(&args[1]))])
}
