// actinide-parser - Reader and value model for the Actinide language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # actinide-parser
//!
//! The value model and reader for the Actinide language: interned symbols,
//! the `Value` sum over every runtime value, input ports, and the
//! lexer/reader pipeline that turns source text into forms.
//!
//! Forms and values are the same type; reading source text produces values
//! that the evaluator (in `actinide-core`) reduces.

pub mod lexer;
pub mod port;
pub mod reader;
pub mod symbol;
pub mod value;

pub use lexer::{Lexer, ReadError, ReadErrorKind, Token};
pub use port::Port;
pub use reader::{Reader, read, read_str};
pub use symbol::{Symbol, SymbolTable};
pub use value::{BuiltinProc, ConsCell, Formals, LambdaProc, Procedure, Value};

// Re-export the numeric backing types for convenience
pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
