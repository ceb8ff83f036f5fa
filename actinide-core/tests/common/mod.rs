// actinide-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared helpers for Actinide integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

pub use actinide_core::{Error, Session};
pub use actinide_parser::{Port, Value};

/// Evaluate every form in `src` in a fresh session, returning the last
/// form's value sequence.
#[allow(dead_code)]
pub fn eval_str(src: &str) -> Result<Vec<Value>, Error> {
    let session = Session::new();
    eval_all(&session, src)
}

/// Evaluate every form in `src` in the given session, returning the last
/// form's value sequence. Each form is expanded and evaluated as its own
/// top-level program, so macros defined by one form govern the next.
#[allow(dead_code)]
pub fn eval_all(session: &Session, src: &str) -> Result<Vec<Value>, Error> {
    let port = Port::from_string(src);
    let eof = session.eof();
    let mut result = Vec::new();
    loop {
        let form = session.read(&port)?;
        if form.identical(&eof) {
            return Ok(result);
        }
        result = session.eval(&form)?;
    }
}

/// Evaluate `src` in a fresh session, expecting exactly one result value.
#[allow(dead_code)]
pub fn eval_one(src: &str) -> Result<Value, Error> {
    let mut values = eval_str(src)?;
    match values.pop() {
        Some(value) if values.is_empty() => Ok(value),
        other => panic!(
            "expected exactly one value from '{}', got {:?} and {:?}",
            src, values, other
        ),
    }
}

/// Assert that `src` evaluates to a single expected value.
///
/// ```ignore
/// assert_eval!("(+ 1 2)", Value::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            vec![$expected],
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that `src` evaluates to an exact value sequence.
#[macro_export]
macro_rules! assert_eval_seq {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `src` produces an error.
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_str_basic() {
        assert_eq!(eval_str("42").unwrap(), vec![Value::int(42)]);
        assert_eq!(eval_str("(+ 1 2)").unwrap(), vec![Value::int(3)]);
    }

    #[test]
    fn test_eval_all_threads_state() {
        let session = Session::new();
        let result = eval_all(&session, "(define x 1) (define y 2) (+ x y)").unwrap();
        assert_eq!(result, vec![Value::int(3)]);
    }
}
