// actinide-core - Built-in procedure registry
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in procedures.
//!
//! Every builtin follows the uniform native convention: a sequence of
//! already-evaluated values in, a sequence of values out. None of them
//! touches the filesystem, network, or process state; the sandbox is this
//! inventory. The session-dependent builtins (`symbol`, `read`, `eval`,
//! `expand`) are closures over a session and are installed by
//! `Session::new`, not here.

pub mod arithmetic;
pub mod conversions;
pub mod equality;
pub mod lists;
pub mod logic;
pub mod ports;
pub mod predicates;
pub mod strings;
pub mod vectors;

use actinide_parser::{SymbolTable, Value};

use crate::env::Env;
use crate::error::Result;
use crate::eval::make_native_fn;

/// Register every session-independent builtin in the given environment.
pub fn register_builtins(env: &Env, symbols: &SymbolTable) {
    // Arithmetic and comparison
    define_native(env, symbols, "+", arithmetic::builtin_add);
    define_native(env, symbols, "-", arithmetic::builtin_sub);
    define_native(env, symbols, "*", arithmetic::builtin_mul);
    define_native(env, symbols, "/", arithmetic::builtin_div);
    define_native(env, symbols, "<", arithmetic::builtin_lt);
    define_native(env, symbols, "<=", arithmetic::builtin_le);
    define_native(env, symbols, ">", arithmetic::builtin_gt);
    define_native(env, symbols, ">=", arithmetic::builtin_ge);

    // Equality
    define_native(env, symbols, "=", equality::builtin_eq);
    define_native(env, symbols, "!=", equality::builtin_ne);
    define_native(env, symbols, "eq?", equality::builtin_eq_p);

    // Logic
    define_native(env, symbols, "and", logic::builtin_and);
    define_native(env, symbols, "or", logic::builtin_or);
    define_native(env, symbols, "not", logic::builtin_not);

    // Type predicates
    define_native(env, symbols, "boolean?", predicates::builtin_boolean_p);
    define_native(env, symbols, "cons?", predicates::builtin_cons_p);
    define_native(env, symbols, "decimal?", predicates::builtin_decimal_p);
    define_native(env, symbols, "integer?", predicates::builtin_integer_p);
    define_native(env, symbols, "list?", predicates::builtin_list_p);
    define_native(env, symbols, "nil?", predicates::builtin_nil_p);
    define_native(env, symbols, "procedure?", predicates::builtin_procedure_p);
    define_native(env, symbols, "string?", predicates::builtin_string_p);
    define_native(env, symbols, "symbol?", predicates::builtin_symbol_p);
    define_native(env, symbols, "vector?", predicates::builtin_vector_p);

    // Pairs and lists
    define_native(env, symbols, "cons", lists::builtin_cons);
    define_native(env, symbols, "head", lists::builtin_head);
    define_native(env, symbols, "tail", lists::builtin_tail);
    define_native(env, symbols, "uncons", lists::builtin_uncons);
    define_native(env, symbols, "list", lists::builtin_list);
    define_native(env, symbols, "append", lists::builtin_append);
    define_native(env, symbols, "length", lists::builtin_length);
    define_native(env, symbols, "map", lists::builtin_map);
    define_native(env, symbols, "filter", lists::builtin_filter);
    define_native(env, symbols, "reduce", lists::builtin_reduce);

    // Vectors
    define_native(env, symbols, "vector", vectors::builtin_vector);
    define_native(env, symbols, "vector-add", vectors::builtin_vector_add);
    define_native(env, symbols, "vector-get", vectors::builtin_vector_get);
    define_native(env, symbols, "vector-set", vectors::builtin_vector_set);
    define_native(env, symbols, "vector-length", vectors::builtin_vector_length);
    define_native(env, symbols, "list-to-vector", vectors::builtin_list_to_vector);
    define_native(env, symbols, "vector-to-list", vectors::builtin_vector_to_list);

    // Strings
    define_native(env, symbols, "concat", strings::builtin_concat);

    // Conversions
    define_native(env, symbols, "integer", conversions::builtin_integer);
    define_native(env, symbols, "decimal", conversions::builtin_decimal);
    define_native(env, symbols, "string", conversions::builtin_string);
    define_native(env, symbols, "display", conversions::builtin_display);

    // Ports
    define_native(
        env,
        symbols,
        "string-to-input-port",
        ports::builtin_string_to_input_port,
    );
    define_native(env, symbols, "peek-port", ports::builtin_peek_port);
    define_native(env, symbols, "read-port", ports::builtin_read_port);
    define_native(env, symbols, "read-port-fully", ports::builtin_read_port_fully);
}

/// Intern `name` and bind it to a native procedure in `env`.
pub fn define_native(
    env: &Env,
    symbols: &SymbolTable,
    name: &'static str,
    func: impl Fn(&[Value]) -> Result<Vec<Value>> + 'static,
) {
    env.define(
        symbols.intern(name),
        Value::Procedure(make_native_fn(name, func)),
    );
}
