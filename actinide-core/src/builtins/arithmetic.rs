// actinide-core - Arithmetic and ordering builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic folds and ordering comparisons.
//!
//! All four operators fold left over at least one operand. Operations stay
//! in integers unless any operand is a decimal, in which case the whole
//! operation promotes to decimal. Integer division floors toward negative
//! infinity; decimal division inherits the decimal library's precision and
//! rounding. Zero divisors are reported, never panicked.

use std::cmp::Ordering;

use actinide_parser::{BigDecimal, BigInt, Value};
use num_integer::Integer;
use num_traits::Zero;

use crate::error::{Error, Result};

pub fn builtin_add(args: &[Value]) -> Result<Vec<Value>> {
    numeric_fold("+", args, |a, b| Ok(a + b), |a, b| Ok(a + b))
}

pub fn builtin_sub(args: &[Value]) -> Result<Vec<Value>> {
    // Unary minus negates
    if args.len() == 1 {
        return match &args[0] {
            Value::Integer(n) => Ok(vec![Value::Integer(-n.clone())]),
            Value::Decimal(d) => Ok(vec![Value::Decimal(-d.clone())]),
            other => Err(Error::type_error_in("-", "number", other.type_name())),
        };
    }
    numeric_fold("-", args, |a, b| Ok(a - b), |a, b| Ok(a - b))
}

pub fn builtin_mul(args: &[Value]) -> Result<Vec<Value>> {
    numeric_fold("*", args, |a, b| Ok(a * b), |a, b| Ok(a * b))
}

pub fn builtin_div(args: &[Value]) -> Result<Vec<Value>> {
    numeric_fold(
        "/",
        args,
        |a, b| {
            if b.is_zero() {
                Err(Error::DivisionByZero)
            } else {
                Ok(a.div_floor(b))
            }
        },
        |a, b| {
            if b.is_zero() {
                Err(Error::DivisionByZero)
            } else {
                Ok(a / b)
            }
        },
    )
}

pub fn builtin_lt(args: &[Value]) -> Result<Vec<Value>> {
    ordering("<", args, |ord| ord == Ordering::Less)
}

pub fn builtin_le(args: &[Value]) -> Result<Vec<Value>> {
    ordering("<=", args, |ord| ord != Ordering::Greater)
}

pub fn builtin_gt(args: &[Value]) -> Result<Vec<Value>> {
    ordering(">", args, |ord| ord == Ordering::Greater)
}

pub fn builtin_ge(args: &[Value]) -> Result<Vec<Value>> {
    ordering(">=", args, |ord| ord != Ordering::Less)
}

// ============================================================================
// Helpers
// ============================================================================

/// Fold an operator left over the operands, promoting to decimal when any
/// operand is a decimal.
fn numeric_fold(
    name: &'static str,
    args: &[Value],
    int_op: impl Fn(BigInt, &BigInt) -> Result<BigInt>,
    dec_op: impl Fn(BigDecimal, &BigDecimal) -> Result<BigDecimal>,
) -> Result<Vec<Value>> {
    if args.is_empty() {
        return Err(Error::arity_at_least(name, 1, 0));
    }
    if args.iter().any(|a| matches!(a, Value::Decimal(_))) {
        let mut acc = to_decimal(name, &args[0])?;
        for arg in &args[1..] {
            acc = dec_op(acc, &to_decimal(name, arg)?)?;
        }
        Ok(vec![Value::Decimal(acc)])
    } else {
        let mut acc = to_integer(name, &args[0])?;
        for arg in &args[1..] {
            acc = int_op(acc, &to_integer(name, arg)?)?;
        }
        Ok(vec![Value::Integer(acc)])
    }
}

fn to_integer(context: &'static str, val: &Value) -> Result<BigInt> {
    match val {
        Value::Integer(n) => Ok(n.clone()),
        other => Err(Error::type_error_in(context, "number", other.type_name())),
    }
}

fn to_decimal(context: &'static str, val: &Value) -> Result<BigDecimal> {
    match val {
        Value::Integer(n) => Ok(BigDecimal::from(n.clone())),
        Value::Decimal(d) => Ok(d.clone()),
        other => Err(Error::type_error_in(context, "number", other.type_name())),
    }
}

/// Order two numbers by magnitude, or two strings lexicographically.
fn ordering(
    name: &'static str,
    args: &[Value],
    accept: impl Fn(Ordering) -> bool,
) -> Result<Vec<Value>> {
    if args.len() != 2 {
        return Err(Error::arity_named(name, 2, args.len()));
    }
    let ord = match (&args[0], &args[1]) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
        (Value::Integer(a), Value::Decimal(b)) => BigDecimal::from(a.clone()).cmp(b),
        (Value::Decimal(a), Value::Integer(b)) => a.cmp(&BigDecimal::from(b.clone())),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (a, b) => {
            let bad = if matches!(a, Value::Integer(_) | Value::Decimal(_) | Value::String(_)) {
                b
            } else {
                a
            };
            return Err(Error::type_error_in(
                name,
                "two numbers or two strings",
                bad.type_name(),
            ));
        }
    };
    Ok(vec![Value::bool(accept(ord))])
}
