// actinide-embed - Embedding API for Actinide
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # actinide-embed
//!
//! A high-level embedding API for the Actinide language.
//!
//! This crate wraps the session machinery of `actinide-core` with an
//! ergonomic [`Engine`] and typed conversions between Rust and Actinide
//! values. Scripts stay sandboxed: the only capabilities they have are the
//! functions the host registers.
//!
//! ## Quick start
//!
//! ```
//! use actinide_embed::Engine;
//!
//! let engine = Engine::new();
//! let values = engine.eval("(+ 1 2 3)").unwrap();
//! assert_eq!(values[0].to_string(), "6");
//! ```
//!
//! ## Registering native functions
//!
//! ```
//! use actinide_embed::{Engine, Error, Result, Value};
//!
//! let engine = Engine::new();
//! engine.register_fn("greet", |args: &[Value]| -> Result<Value> {
//!     match args {
//!         [Value::String(name)] => Ok(Value::string(format!("Hello, {}!", name))),
//!         [other] => Err(Error::type_error("string", other.type_name())),
//!         _ => Err(Error::arity_named("greet", 1, args.len())),
//!     }
//! });
//! let values = engine.eval("(greet \"world\")").unwrap();
//! assert_eq!(values[0].to_string(), "\"Hello, world!\"");
//! ```

mod convert;
mod engine;

pub use convert::{FromActinide, IntoActinide};
pub use engine::Engine;

// Re-export core types for convenience
pub use actinide_core::{Error, Result, Session};
pub use actinide_parser::{BigDecimal, BigInt, Port, SymbolTable, Value};
