// actinide-core - String builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! String operations. `length` lives with the list builtins since it
//! dispatches across types.

use actinide_parser::Value;

use crate::error::{Error, Result};

pub fn builtin_concat(args: &[Value]) -> Result<Vec<Value>> {
    let mut out = String::new();
    for arg in args {
        match arg {
            Value::String(s) => out.push_str(s),
            other => return Err(Error::type_error_in("concat", "string", other.type_name())),
        }
    }
    Ok(vec![Value::string(out)])
}
