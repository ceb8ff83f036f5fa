// actinide-core - Vector builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Vectors: mutable, reference-shared, indexed sequences.
//!
//! `vector-add` and `vector-set` mutate in place and return the vector so
//! updates chain. Indices are non-negative and bounds-checked.

use actinide_parser::Value;
use num_traits::{Signed, ToPrimitive};

use crate::error::{Error, Result};

pub fn builtin_vector(args: &[Value]) -> Result<Vec<Value>> {
    Ok(vec![Value::vector(args.to_vec())])
}

/// (vector-add v x ...) - mutating append; returns the vector
pub fn builtin_vector_add(args: &[Value]) -> Result<Vec<Value>> {
    if args.is_empty() {
        return Err(Error::arity_at_least("vector-add", 1, 0));
    }
    let vec = expect_vector("vector-add", &args[0])?;
    vec.borrow_mut().extend(args[1..].iter().cloned());
    Ok(vec![args[0].clone()])
}

pub fn builtin_vector_get(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 2 {
        return Err(Error::arity_named("vector-get", 2, args.len()));
    }
    let vec = expect_vector("vector-get", &args[0])?;
    let vec = vec.borrow();
    let index = expect_index("vector-get", &args[1], vec.len())?;
    Ok(vec![vec[index].clone()])
}

/// (vector-set v i x) - mutating write; returns the vector
pub fn builtin_vector_set(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 3 {
        return Err(Error::arity_named("vector-set", 3, args.len()));
    }
    let vec = expect_vector("vector-set", &args[0])?;
    {
        let mut vec = vec.borrow_mut();
        let len = vec.len();
        let index = expect_index("vector-set", &args[1], len)?;
        vec[index] = args[2].clone();
    }
    Ok(vec![args[0].clone()])
}

pub fn builtin_vector_length(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("vector-length", 1, args.len()));
    }
    let vec = expect_vector("vector-length", &args[0])?;
    let len = vec.borrow().len();
    Ok(vec![Value::int(len as i64)])
}

pub fn builtin_list_to_vector(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("list-to-vector", 1, args.len()));
    }
    let items = args[0].try_list().ok_or_else(|| {
        Error::type_error_in("list-to-vector", "proper list", args[0].type_name())
    })?;
    Ok(vec![Value::vector(items)])
}

pub fn builtin_vector_to_list(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("vector-to-list", 1, args.len()));
    }
    let vec = expect_vector("vector-to-list", &args[0])?;
    let items = vec.borrow().clone();
    Ok(vec![Value::list(items)])
}

// ============================================================================
// Helpers
// ============================================================================

fn expect_vector<'a>(
    name: &'static str,
    val: &'a Value,
) -> Result<&'a std::cell::RefCell<Vec<Value>>> {
    match val {
        Value::Vector(v) => Ok(v.as_ref()),
        other => Err(Error::type_error_in(name, "vector", other.type_name())),
    }
}

fn expect_index(name: &'static str, val: &Value, len: usize) -> Result<usize> {
    let n = match val {
        Value::Integer(n) => n,
        other => return Err(Error::type_error_in(name, "integer", other.type_name())),
    };
    match n.to_usize() {
        Some(i) if i < len => Ok(i),
        _ => Err(Error::IndexOutOfBounds {
            index: n
                .to_i64()
                .unwrap_or(if n.is_negative() { i64::MIN } else { i64::MAX }),
            length: len,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_add_mutates_in_place() {
        let v = Value::vector(vec![Value::int(1)]);
        let alias = v.clone();
        builtin_vector_add(&[v.clone(), Value::int(2), Value::int(3)]).unwrap();
        assert_eq!(
            builtin_vector_length(&[alias]).unwrap(),
            vec![Value::int(3)]
        );
    }

    #[test]
    fn test_vector_get_and_set() {
        let v = Value::vector(vec![Value::int(1), Value::int(2)]);
        assert_eq!(
            builtin_vector_get(&[v.clone(), Value::int(1)]).unwrap(),
            vec![Value::int(2)]
        );
        builtin_vector_set(&[v.clone(), Value::int(0), Value::string("x")]).unwrap();
        assert_eq!(
            builtin_vector_get(&[v, Value::int(0)]).unwrap(),
            vec![Value::string("x")]
        );
    }

    #[test]
    fn test_index_out_of_bounds() {
        let v = Value::vector(vec![Value::int(1)]);
        assert!(matches!(
            builtin_vector_get(&[v.clone(), Value::int(1)]),
            Err(Error::IndexOutOfBounds { index: 1, length: 1 })
        ));
        assert!(matches!(
            builtin_vector_get(&[v, Value::int(-1)]),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_list_vector_round_trip() {
        let list = Value::list(vec![Value::int(1), Value::int(2)]);
        let vector = builtin_list_to_vector(std::slice::from_ref(&list)).unwrap();
        let back = builtin_vector_to_list(&vector).unwrap();
        assert_eq!(back, vec![list]);
    }

    #[test]
    fn test_vector_to_list_copies() {
        let v = Value::vector(vec![Value::int(1)]);
        let list = builtin_vector_to_list(std::slice::from_ref(&v)).unwrap();
        builtin_vector_add(&[v, Value::int(2)]).unwrap();
        assert_eq!(list, vec![Value::list(vec![Value::int(1)])]);
    }
}
