// actinide-core - Conversion builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Conversions between value kinds.
//!
//! `integer` and `decimal` accept numbers and strings; parse failures are
//! reported as errors, not nil. `display` produces the *readable* text of a
//! value (strings quoted and escaped), which is what the reader accepts
//! back; `string` produces the unquoted text.

use std::str::FromStr;

use actinide_parser::{BigDecimal, BigInt, Value};
use num_bigint::ToBigInt;

use crate::error::{Error, Result};

/// (integer x) - from an integer, a decimal (truncating toward zero), or a
/// string in the integer grammar.
pub fn builtin_integer(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("integer", 1, args.len()));
    }
    let out = match &args[0] {
        Value::Integer(n) => n.clone(),
        Value::Decimal(d) => d
            .to_bigint()
            .ok_or_else(|| Error::number_format("integer", format!("{}", d)))?,
        Value::String(s) => parse_integer_text(s)?,
        other => {
            return Err(Error::type_error_in(
                "integer",
                "number or string",
                other.type_name(),
            ));
        }
    };
    Ok(vec![Value::Integer(out)])
}

/// (decimal x) - from a number or a string in the decimal grammar.
pub fn builtin_decimal(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("decimal", 1, args.len()));
    }
    let out = match &args[0] {
        Value::Integer(n) => BigDecimal::from(n.clone()),
        Value::Decimal(d) => d.clone(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != '_').collect();
            BigDecimal::from_str(&cleaned)
                .map_err(|_| Error::number_format("decimal", s.to_string()))?
        }
        other => {
            return Err(Error::type_error_in(
                "decimal",
                "number or string",
                other.type_name(),
            ));
        }
    };
    Ok(vec![Value::Decimal(out)])
}

/// (string x) - the unquoted text of a value
pub fn builtin_string(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("string", 1, args.len()));
    }
    Ok(vec![Value::string(args[0].to_text())])
}

/// (display x) - the readable text of a value
pub fn builtin_display(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("display", 1, args.len()));
    }
    Ok(vec![Value::string(format!("{}", args[0]))])
}

fn parse_integer_text(text: &str) -> Result<BigInt> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    BigInt::from_str(&cleaned).map_err(|_| Error::number_format("integer", text.to_string()))
}
