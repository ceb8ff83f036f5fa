// actinide-embed - Type conversion traits
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type conversion between Rust and Actinide values.
//!
//! # Built-in conversions
//!
//! | Rust type | Actinide type |
//! |-----------|---------------|
//! | `()` | nil |
//! | `bool` | boolean |
//! | `i32`, `i64`, `usize`, `BigInt` | integer |
//! | `BigDecimal` | decimal |
//! | `String`, `&str` | string |
//! | `Vec<T>` | vector |
//! | `Option<T>` | `T` or nil |
//!
//! `f64` deliberately has no conversion: NaN and the infinities have no
//! decimal representation, so an infallible conversion would have to invent
//! one. Convert through `BigDecimal` explicitly instead.
//!
//! Symbols are session-scoped, so there is no conversion producing them
//! from bare text; intern through a session.
//!
//! # Custom conversions
//!
//! ```
//! use actinide_embed::{Engine, Error, FromActinide, IntoActinide, Result, Value};
//!
//! struct Point { x: i64, y: i64 }
//!
//! impl IntoActinide for Point {
//!     fn into_actinide(self) -> Value {
//!         Value::vector(vec![Value::int(self.x), Value::int(self.y)])
//!     }
//! }
//!
//! impl FromActinide for Point {
//!     fn from_actinide(val: &Value) -> Result<Self> {
//!         match val {
//!             Value::Vector(v) if v.borrow().len() == 2 => {
//!                 let v = v.borrow();
//!                 Ok(Point {
//!                     x: i64::from_actinide(&v[0])?,
//!                     y: i64::from_actinide(&v[1])?,
//!                 })
//!             }
//!             _ => Err(Error::type_error("vector of 2 integers", val.type_name())),
//!         }
//!     }
//! }
//! ```

use actinide_core::{Error, Result};
use actinide_parser::{BigDecimal, BigInt, Value};
use num_traits::ToPrimitive;

/// Convert a Rust value into an Actinide value.
pub trait IntoActinide {
    fn into_actinide(self) -> Value;
}

/// Convert an Actinide value into a Rust value.
pub trait FromActinide: Sized {
    fn from_actinide(val: &Value) -> Result<Self>;
}

// ============================================================================
// IntoActinide implementations
// ============================================================================

impl IntoActinide for Value {
    fn into_actinide(self) -> Value {
        self
    }
}

impl IntoActinide for () {
    fn into_actinide(self) -> Value {
        Value::Nil
    }
}

impl IntoActinide for bool {
    fn into_actinide(self) -> Value {
        Value::bool(self)
    }
}

impl IntoActinide for i64 {
    fn into_actinide(self) -> Value {
        Value::int(self)
    }
}

impl IntoActinide for i32 {
    fn into_actinide(self) -> Value {
        Value::int(i64::from(self))
    }
}

impl IntoActinide for usize {
    fn into_actinide(self) -> Value {
        Value::integer(BigInt::from(self))
    }
}

impl IntoActinide for BigInt {
    fn into_actinide(self) -> Value {
        Value::integer(self)
    }
}

impl IntoActinide for BigDecimal {
    fn into_actinide(self) -> Value {
        Value::decimal(self)
    }
}

impl IntoActinide for String {
    fn into_actinide(self) -> Value {
        Value::string(self)
    }
}

impl IntoActinide for &str {
    fn into_actinide(self) -> Value {
        Value::string(self)
    }
}

impl<T: IntoActinide> IntoActinide for Vec<T> {
    fn into_actinide(self) -> Value {
        Value::vector(self.into_iter().map(IntoActinide::into_actinide).collect())
    }
}

impl<T: IntoActinide> IntoActinide for Option<T> {
    fn into_actinide(self) -> Value {
        match self {
            Some(v) => v.into_actinide(),
            None => Value::Nil,
        }
    }
}

// ============================================================================
// FromActinide implementations
// ============================================================================

impl FromActinide for Value {
    fn from_actinide(val: &Value) -> Result<Self> {
        Ok(val.clone())
    }
}

impl FromActinide for () {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::Nil => Ok(()),
            other => Err(Error::type_error("nil", other.type_name())),
        }
    }
}

impl FromActinide for bool {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::Boolean(b) => Ok(*b),
            other => Err(Error::type_error("boolean", other.type_name())),
        }
    }
}

impl FromActinide for i64 {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::Integer(n) => n
                .to_i64()
                .ok_or_else(|| Error::Eval(format!("{} does not fit in an i64", n))),
            other => Err(Error::type_error("integer", other.type_name())),
        }
    }
}

impl FromActinide for BigInt {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::Integer(n) => Ok(n.clone()),
            other => Err(Error::type_error("integer", other.type_name())),
        }
    }
}

impl FromActinide for BigDecimal {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::Decimal(d) => Ok(d.clone()),
            Value::Integer(n) => Ok(BigDecimal::from(n.clone())),
            other => Err(Error::type_error("number", other.type_name())),
        }
    }
}

impl FromActinide for String {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::String(s) => Ok(s.to_string()),
            other => Err(Error::type_error("string", other.type_name())),
        }
    }
}

impl<T: FromActinide> FromActinide for Vec<T> {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::Vector(v) => v.borrow().iter().map(T::from_actinide).collect(),
            list => list
                .try_list()
                .ok_or_else(|| Error::type_error("vector or list", list.type_name()))?
                .iter()
                .map(T::from_actinide)
                .collect(),
        }
    }
}

impl<T: FromActinide> FromActinide for Option<T> {
    fn from_actinide(val: &Value) -> Result<Self> {
        match val {
            Value::Nil => Ok(None),
            other => T::from_actinide(other).map(Some),
        }
    }
}
