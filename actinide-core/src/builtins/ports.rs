// actinide-core - Port builtins
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Port operations. The only way language code obtains a port is
//! `string-to-input-port`, which is the whole of the sandbox's I/O surface:
//! no builtin opens a file, socket, or process.

use actinide_parser::{Port, Value};
use num_traits::ToPrimitive;

use crate::error::{Error, Result};

pub fn builtin_string_to_input_port(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("string-to-input-port", 1, args.len()));
    }
    match &args[0] {
        Value::String(s) => Ok(vec![Value::Port(Port::from_string(s))]),
        other => Err(Error::type_error_in(
            "string-to-input-port",
            "string",
            other.type_name(),
        )),
    }
}

/// (peek-port port n) - up to n characters of lookahead, not consumed
pub fn builtin_peek_port(args: &[Value]) -> Result<Vec<Value>> {
    let (port, n) = expect_port_and_count("peek-port", args)?;
    Ok(vec![Value::string(port.peek(n))])
}

/// (read-port port n) - up to n characters, consumed
pub fn builtin_read_port(args: &[Value]) -> Result<Vec<Value>> {
    let (port, n) = expect_port_and_count("read-port", args)?;
    Ok(vec![Value::string(port.read(n))])
}

/// (read-port-fully port) - the rest of the input, consumed
pub fn builtin_read_port_fully(args: &[Value]) -> Result<Vec<Value>> {
    if args.len() != 1 {
        return Err(Error::arity_named("read-port-fully", 1, args.len()));
    }
    let port = expect_port("read-port-fully", &args[0])?;
    Ok(vec![Value::string(port.read_fully())])
}

fn expect_port<'a>(name: &'static str, val: &'a Value) -> Result<&'a Port> {
    match val {
        Value::Port(port) => Ok(port),
        other => Err(Error::type_error_in(name, "port", other.type_name())),
    }
}

fn expect_port_and_count<'a>(name: &'static str, args: &'a [Value]) -> Result<(&'a Port, usize)> {
    if args.len() != 2 {
        return Err(Error::arity_named(name, 2, args.len()));
    }
    let port = expect_port(name, &args[0])?;
    let n = match &args[1] {
        Value::Integer(n) => n.to_usize().filter(|n| *n > 0),
        other => return Err(Error::type_error_in(name, "integer", other.type_name())),
    };
    let n = n.ok_or_else(|| {
        Error::Eval(format!("{}: length must be strictly positive", name))
    })?;
    Ok((port, n))
}
