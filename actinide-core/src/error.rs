// actinide-core - Error types for the Actinide evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Actinide expansion and evaluation.
//!
//! The language offers no in-program exception handling; the first error
//! aborts the current evaluation and is surfaced to the host. Each variant
//! is the machine-readable kind; `Display` renders the human-readable
//! message.
//!
//! # Examples
//!
//! ```
//! use actinide_core::Error;
//!
//! let err = Error::arity_named("cons", 2, 3);
//! assert_eq!(
//!     err.to_string(),
//!     "Wrong number of arguments to 'cons': expected 2, got 3"
//! );
//!
//! let err = Error::type_error("integer", "string");
//! assert_eq!(err.to_string(), "Type error: expected integer, got string");
//! ```

use std::fmt;

use actinide_parser::{ReadError, Symbol};

/// Result type for Actinide expansion and evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while expanding or evaluating a program.
#[derive(Debug, Clone)]
pub enum Error {
    /// Malformed source text, from the reader.
    Read(ReadError),
    /// Macro expansion failure: misplaced unquote, malformed special form
    /// syntax, a transformer that misbehaved.
    Expansion(String),
    /// A macro kept rewriting past the expansion depth budget.
    MacroLoop { depth: usize },
    /// A symbol with no binding in the environment chain.
    UnboundSymbol(Symbol),
    /// Wrong number of arguments bound against a procedure's formals.
    Arity {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Wrong kind of value for an operation.
    Type {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Application of a value that is not a procedure.
    NotCallable(String),
    /// Division by an integer or decimal zero.
    DivisionByZero,
    /// Vector access outside the valid index range.
    IndexOutOfBounds { index: i64, length: usize },
    /// `integer`/`decimal` conversion given text neither grammar accepts.
    NumberFormat {
        target: &'static str,
        input: String,
    },
    /// A multi-value sequence arrived where exactly one value is required.
    ValueCount { context: &'static str, got: usize },
    /// Malformed special form syntax.
    InvalidSyntax { form: &'static str, message: String },
    /// Non-tail recursion exceeded the host-stack budget.
    RecursionDepth { depth: usize },
    /// General evaluation error.
    Eval(String),
    /// Internal invariant violation.
    Internal(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(err) => write!(f, "{}", err),
            Error::Expansion(msg) => write!(f, "Expansion error: {}", msg),
            Error::MacroLoop { depth } => {
                write!(f, "Macro expansion did not terminate within {} rewrites", depth)
            }
            Error::UnboundSymbol(sym) => write!(f, "Unbound symbol: {}", sym),
            Error::Arity {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            Error::Type {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            Error::NotCallable(val) => write!(f, "Cannot call value: {}", val),
            Error::DivisionByZero => write!(f, "Division by zero"),
            Error::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for vector of length {}",
                    index, length
                )
            }
            Error::NumberFormat { target, input } => {
                write!(f, "Cannot parse '{}' as {}", input, target)
            }
            Error::ValueCount { context, got } => {
                write!(f, "{} requires exactly one value, got {}", context, got)
            }
            Error::InvalidSyntax { form, message } => {
                write!(f, "Invalid '{}' syntax: {}", form, message)
            }
            Error::RecursionDepth { depth } => {
                write!(f, "Maximum recursion depth ({}) exceeded", depth)
            }
            Error::Eval(msg) => write!(f, "{}", msg),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<ReadError> for Error {
    fn from(err: ReadError) -> Self {
        Error::Read(err)
    }
}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::Arity {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with a procedure name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::Arity {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with a procedure name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::Arity {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::Type {
            expected,
            got,
            context: None,
        }
    }

    /// Create a type error with context, usually the builtin's name.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::Type {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an expansion error.
    pub fn expansion(message: impl Into<String>) -> Self {
        Error::Expansion(message.into())
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }

    /// Create a value-count error for a single-value context.
    pub fn value_count(context: &'static str, got: usize) -> Self {
        Error::ValueCount { context, got }
    }

    /// Create a numeric parse error.
    pub fn number_format(target: &'static str, input: impl Into<String>) -> Self {
        Error::NumberFormat {
            target,
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_messages() {
        assert_eq!(
            Error::arity(2, 3).to_string(),
            "Wrong number of arguments: expected 2, got 3"
        );
        assert_eq!(
            Error::arity_at_least("+", 1, 0).to_string(),
            "Wrong number of arguments to '+': expected at least 1, got 0"
        );
    }

    #[test]
    fn test_type_messages() {
        assert_eq!(
            Error::type_error_in("head", "cons", "integer").to_string(),
            "head: expected cons, got integer"
        );
    }

    #[test]
    fn test_value_count_message() {
        assert_eq!(
            Error::value_count("if condition", 2).to_string(),
            "if condition requires exactly one value, got 2"
        );
    }
}
