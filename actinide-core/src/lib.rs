// actinide-core - Expander, evaluator, and session for the Actinide language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # actinide-core
//!
//! The Actinide interpreter: environments, the macro expander, the
//! trampolined tree-walking evaluator, the built-in procedures, and the
//! [`Session`] façade that composes them.
//!
//! Actinide is sandboxed by construction. No builtin reaches the
//! filesystem, network, or process state; the only capabilities a program
//! has are the ones its host binds into the session.
//!
//! # Quick start
//!
//! ```
//! use actinide_core::Session;
//! use actinide_parser::Value;
//!
//! let session = Session::new();
//! assert_eq!(session.run("(+ 1 2 3)").unwrap(), vec![Value::int(6)]);
//!
//! session.run("(define (square x) (* x x))").unwrap();
//! assert_eq!(session.run("(square 12)").unwrap(), vec![Value::int(144)]);
//! ```

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod expander;
pub mod session;

pub use builtins::register_builtins;
pub use env::Env;
pub use error::{AritySpec, Error, Result};
pub use eval::{
    NativeFnImpl, apply, eval, eval_single, get_eval_depth, get_max_eval_depth, make_native_fn,
    parse_formals, set_max_eval_depth,
};
pub use expander::expand;
pub use session::Session;

// Re-export parser types for convenience
pub use actinide_parser::{Port, ReadError, Symbol, SymbolTable, Value};
