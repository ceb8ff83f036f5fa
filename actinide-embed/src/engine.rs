// actinide-embed - Engine implementation
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The Engine struct - the high-level entry point for embedding Actinide.

use std::path::Path;

use actinide_core::{Error, Result, Session, set_max_eval_depth};
use actinide_parser::Value;

use crate::convert::{FromActinide, IntoActinide};

/// The Actinide scripting engine.
///
/// `Engine` wraps a [`Session`] with typed conveniences: evaluating whole
/// strings of code, getting and setting bindings through the conversion
/// traits, and registering Rust functions.
///
/// # Thread safety
///
/// **`Engine` is NOT thread-safe.** Sessions use `Rc` and `RefCell`
/// internally. Create one engine per thread.
///
/// # Example
///
/// ```
/// use actinide_embed::Engine;
///
/// let engine = Engine::new();
/// let values = engine.eval("(+ 1 2 3)").unwrap();
/// assert_eq!(values[0].to_string(), "6");
/// ```
pub struct Engine {
    session: Session,
}

impl Engine {
    /// Create a new engine with the built-in procedures loaded.
    #[must_use]
    pub fn new() -> Self {
        Engine {
            session: Session::new(),
        }
    }

    /// Set the maximum nested (non-tail) recursion depth for evaluation on
    /// this thread. Returns the previous value.
    pub fn set_max_depth(&self, depth: usize) -> usize {
        set_max_eval_depth(depth)
    }

    /// Evaluate every form in a string of Actinide code, returning the
    /// last form's value sequence.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed syntax, expansion failure, or any
    /// evaluation error; forms before the failing one have already taken
    /// effect.
    ///
    /// # Example
    ///
    /// ```
    /// use actinide_embed::Engine;
    ///
    /// let engine = Engine::new();
    /// let values = engine.eval("(define x 42) (* x 2)").unwrap();
    /// assert_eq!(values[0].to_string(), "84");
    /// ```
    pub fn eval(&self, code: &str) -> Result<Vec<Value>> {
        let port = actinide_parser::Port::from_string(code);
        let eof = self.session.eof();
        let mut result = Vec::new();
        loop {
            let form = self.session.read(&port)?;
            if form.identical(&eof) {
                return Ok(result);
            }
            result = self.session.eval(&form)?;
        }
    }

    /// Evaluate a file of Actinide code, returning the last form's value
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read (not found, permission
    /// denied), the code contains syntax errors, or evaluation fails.
    pub fn eval_file(&self, path: impl AsRef<Path>) -> Result<Vec<Value>> {
        let code = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Eval(format!("Cannot read '{}': {}", path.as_ref().display(), e))
        })?;
        self.eval(&code)
    }

    /// Get a top-level binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.session.get(name)
    }

    /// Get a top-level binding converted to a Rust type. Returns `None`
    /// when the binding is missing or the conversion fails.
    #[must_use]
    pub fn get_as<T: FromActinide>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| T::from_actinide(&v).ok())
    }

    /// Get a typed top-level binding, distinguishing a missing binding
    /// (`Ok(None)`) from a failed conversion (`Err`).
    pub fn try_get_as<T: FromActinide>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            Some(v) => T::from_actinide(&v).map(Some),
            None => Ok(None),
        }
    }

    /// Bind a Rust value at top level.
    pub fn set(&self, name: &str, value: impl IntoActinide) {
        self.session.bind(name, value.into_actinide());
    }

    /// Call a bound procedure by name with already-converted arguments.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Vec<Value>> {
        self.session.call(name, args)
    }

    /// Register a native function whose return value is ignored.
    pub fn register_void(&self, name: &str, func: impl Fn(&[Value]) -> Result<()> + 'static) {
        self.session.bind_native_void(name, func);
    }

    /// Register a native function returning one value.
    pub fn register_fn(&self, name: &str, func: impl Fn(&[Value]) -> Result<Value> + 'static) {
        self.session.bind_native_fn(name, func);
    }

    /// Register a native function returning a multi-value sequence.
    pub fn register_values(
        &self,
        name: &str,
        func: impl Fn(&[Value]) -> Result<Vec<Value>> + 'static,
    ) {
        self.session.bind_native_values(name, func);
    }

    /// Register a native macro transformer.
    pub fn register_macro(
        &self,
        name: &str,
        func: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) -> Result<()> {
        self.session.macro_bind_native_fn(name, func)
    }

    /// Access the underlying session for lower-level work: reading forms
    /// one at a time, interning symbols, binding macros.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
