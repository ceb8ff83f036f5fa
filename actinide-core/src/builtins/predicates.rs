// actinide-core - Type predicate builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates. Each takes one argument and returns a boolean.
//!
//! `cons?` answers true for nil as well as for pairs; `list?` is stricter,
//! answering true only for proper lists (nil-terminated chains).
//! `integer?` is true only for integers, never for decimals with a zero
//! fractional part.

use actinide_parser::Value;

use crate::error::{Error, Result};

fn predicate(
    name: &'static str,
    args: &[Value],
    test: impl Fn(&Value) -> bool,
) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named(name, 1, args.len()));
    }
    Ok(vec![Value::bool(test(&args[0]))])
}

pub fn builtin_boolean_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("boolean?", args, |v| matches!(v, Value::Boolean(_)))
}

pub fn builtin_cons_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("cons?", args, |v| {
        matches!(v, Value::Cons(_) | Value::Nil)
    })
}

pub fn builtin_decimal_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("decimal?", args, |v| matches!(v, Value::Decimal(_)))
}

pub fn builtin_integer_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("integer?", args, |v| matches!(v, Value::Integer(_)))
}

pub fn builtin_list_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("list?", args, Value::is_proper_list)
}

pub fn builtin_nil_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("nil?", args, |v| matches!(v, Value::Nil))
}

pub fn builtin_procedure_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("procedure?", args, |v| matches!(v, Value::Procedure(_)))
}

pub fn builtin_string_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("string?", args, |v| matches!(v, Value::String(_)))
}

pub fn builtin_symbol_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("symbol?", args, |v| matches!(v, Value::Symbol(_)))
}

pub fn builtin_vector_p(args: &[Value]) -> Result<Vec<Value>> {
    predicate("vector?", args, |v| matches!(v, Value::Vector(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truthy(result: Result<Vec<Value>>) -> bool {
        result.unwrap() == vec![Value::bool(true)]
    }

    #[test]
    fn test_cons_p_includes_nil() {
        assert!(truthy(builtin_cons_p(&[Value::Nil])));
        assert!(truthy(builtin_cons_p(&[Value::cons(
            Value::int(1),
            Value::int(2)
        )])));
        assert!(!truthy(builtin_cons_p(&[Value::int(1)])));
    }

    #[test]
    fn test_list_p_proper_only() {
        assert!(truthy(builtin_list_p(&[Value::Nil])));
        assert!(truthy(builtin_list_p(&[Value::list(vec![Value::int(1)])])));
        assert!(!truthy(builtin_list_p(&[Value::cons(
            Value::int(1),
            Value::int(2)
        )])));
        assert!(!truthy(builtin_list_p(&[Value::int(1)])));
    }

    #[test]
    fn test_integer_p_excludes_decimals() {
        use std::str::FromStr;
        let d = actinide_parser::BigDecimal::from_str("1.0").unwrap();
        assert!(truthy(builtin_integer_p(&[Value::int(1)])));
        assert!(!truthy(builtin_integer_p(&[Value::decimal(d)])));
    }

    #[test]
    fn test_nil_distinct_from_false() {
        assert!(truthy(builtin_nil_p(&[Value::Nil])));
        assert!(!truthy(builtin_nil_p(&[Value::bool(false)])));
        assert!(truthy(builtin_boolean_p(&[Value::bool(false)])));
        assert!(!truthy(builtin_boolean_p(&[Value::Nil])));
    }
}
