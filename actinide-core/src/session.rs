// actinide-core - The session façade
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sessions: one symbol table, one top-level environment (carrying the
//! macro table), and the read/expand/evaluate pipeline over them.
//!
//! A session is the unit of isolation. Two sessions share no symbols, no
//! bindings, and no macros. A session is also the unit of *non*-isolation:
//! everything evaluated in it mutates its top-level state.
//!
//! # Thread safety
//!
//! Sessions are not thread-safe; they use `Rc` and `RefCell` throughout.
//! Create one session per thread.
//!
//! # Examples
//!
//! ```
//! use actinide_core::Session;
//! use actinide_parser::Value;
//!
//! let session = Session::new();
//! assert_eq!(session.run("(+ 1 2 3)").unwrap(), vec![Value::int(6)]);
//!
//! session.bind("answer", Value::int(42));
//! assert_eq!(session.run("(* answer 2)").unwrap(), vec![Value::int(84)]);
//! ```

use actinide_parser::{Port, Symbol, SymbolTable, Value, read};

use crate::builtins::register_builtins;
use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::{apply, eval, make_native_fn};
use crate::expander::expand;

/// A session: symbol table, top-level environment, and macro table.
pub struct Session {
    symbols: SymbolTable,
    env: Env,
}

impl Session {
    /// Create a session seeded with the built-in procedures and the `nil`
    /// constant.
    #[must_use]
    pub fn new() -> Self {
        let session = Session {
            symbols: SymbolTable::new(),
            env: Env::new(),
        };
        register_builtins(&session.env, &session.symbols);
        session.install_session_builtins();
        session.bind("nil", Value::Nil);
        session
    }

    /// The builtins that close over session state: `symbol` and `read`
    /// need the interner, `eval` and `expand` need the top-level
    /// environment.
    fn install_session_builtins(&self) {
        let symbols = self.symbols.clone();
        self.bind_native_fn("symbol", move |args| match args {
            [Value::String(s)] => Ok(Value::symbol(symbols.intern(s))),
            [other] => Err(Error::type_error_in("symbol", "string", other.type_name())),
            _ => Err(Error::arity_named("symbol", 1, args.len())),
        });

        let symbols = self.symbols.clone();
        self.bind_native_fn("read", move |args| match args {
            [Value::Port(port)] => Ok(read(port, &symbols)?),
            [other] => Err(Error::type_error_in("read", "port", other.type_name())),
            _ => Err(Error::arity_named("read", 1, args.len())),
        });

        let symbols = self.symbols.clone();
        let env = self.env.clone();
        self.bind_native_values("eval", move |args| match args {
            [form] => {
                let expanded = expand(form, &symbols, &env)?;
                eval(&expanded, &env)
            }
            _ => Err(Error::arity_named("eval", 1, args.len())),
        });

        let symbols = self.symbols.clone();
        let env = self.env.clone();
        self.bind_native_fn("expand", move |args| match args {
            [form] => expand(form, &symbols, &env),
            _ => Err(Error::arity_named("expand", 1, args.len())),
        });
    }

    // ========================================================================
    // The pipeline
    // ========================================================================

    /// Read one form from a port, leaving trailing input on the port.
    /// Returns the end-of-input sentinel at stream end.
    pub fn read(&self, port: &Port) -> Result<Value> {
        Ok(read(port, &self.symbols)?)
    }

    /// Read one form from a string. Trailing input is discarded.
    pub fn read_str(&self, text: &str) -> Result<Value> {
        self.read(&Port::from_string(text))
    }

    /// Expand a form against the session's macro table.
    pub fn expand(&self, form: &Value) -> Result<Value> {
        expand(form, &self.symbols, &self.env)
    }

    /// Expand and evaluate a form against the top-level environment,
    /// returning the value sequence it produces.
    pub fn eval(&self, form: &Value) -> Result<Vec<Value>> {
        let expanded = self.expand(form)?;
        eval(&expanded, &self.env)
    }

    /// Read one form from `text` and evaluate it. Anything after the first
    /// form is discarded; hosts that want every form read from a port in a
    /// loop until [`Session::eof`] comes back.
    pub fn run(&self, text: &str) -> Result<Vec<Value>> {
        let form = self.read_str(text)?;
        self.eval(&form)
    }

    // ========================================================================
    // Host bindings
    // ========================================================================

    /// Bind a value in the top-level environment.
    pub fn bind(&self, name: &str, value: Value) {
        self.env.define(self.symbols.intern(name), value);
    }

    /// Bind a native callable whose return value is ignored; the procedure
    /// yields the empty sequence.
    pub fn bind_native_void(
        &self,
        name: &str,
        func: impl Fn(&[Value]) -> Result<()> + 'static,
    ) {
        self.bind_native_values(name, move |args| func(args).map(|()| Vec::new()));
    }

    /// Bind a native callable returning a single value.
    pub fn bind_native_fn(
        &self,
        name: &str,
        func: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) {
        self.bind_native_values(name, move |args| func(args).map(|v| vec![v]));
    }

    /// Bind a native callable returning a full value sequence.
    pub fn bind_native_values(
        &self,
        name: &str,
        func: impl Fn(&[Value]) -> Result<Vec<Value>> + 'static,
    ) {
        self.bind(name, Value::Procedure(make_native_fn(name, func)));
    }

    /// Bind a transformer in the macro table.
    pub fn macro_bind(&self, name: &str, transformer: Value) -> Result<()> {
        self.env
            .macros()?
            .define(self.symbols.intern(name), transformer);
        Ok(())
    }

    /// Bind a native single-valued callable as a macro transformer.
    pub fn macro_bind_native_fn(
        &self,
        name: &str,
        func: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) -> Result<()> {
        self.macro_bind(
            name,
            Value::Procedure(make_native_fn(name, move |args| {
                func(args).map(|v| vec![v])
            })),
        )
    }

    /// Look up a top-level binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.env.lookup(&self.symbols.intern(name)).ok()
    }

    /// Apply a top-level procedure binding to host-supplied arguments.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Vec<Value>> {
        let func = self
            .get(name)
            .ok_or_else(|| Error::UnboundSymbol(self.symbols.intern(name)))?;
        apply(&func, args)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The session's symbol table.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The session's top-level environment.
    #[must_use]
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Intern a symbol in this session.
    pub fn intern(&self, text: &str) -> Symbol {
        self.symbols.intern(text)
    }

    /// The session's end-of-input sentinel, as a value.
    #[must_use]
    pub fn eof(&self) -> Value {
        Value::symbol(self.symbols.eof())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
