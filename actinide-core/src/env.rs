// actinide-core - Environments for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environments: chained frames of symbol-to-value bindings.
//!
//! Lookup walks outward from the innermost frame; `define` always targets
//! the innermost frame. The session's macro table rides on the root frame
//! and is reachable from any descendant by walking the parent chain — it is
//! itself an environment, but only the expander and the runtime
//! `define-macro` form ever consult it.
//!
//! # Examples
//!
//! ```
//! use actinide_core::Env;
//! use actinide_parser::{SymbolTable, Value};
//!
//! let symbols = SymbolTable::new();
//! let env = Env::new();
//! env.define(symbols.intern("x"), Value::int(42));
//! assert_eq!(env.lookup(&symbols.intern("x")).unwrap(), Value::int(42));
//!
//! // Children see parent bindings and may shadow them
//! let child = env.child();
//! assert_eq!(child.lookup(&symbols.intern("x")).unwrap(), Value::int(42));
//! child.define(symbols.intern("x"), Value::int(100));
//! assert_eq!(child.lookup(&symbols.intern("x")).unwrap(), Value::int(100));
//! assert_eq!(env.lookup(&symbols.intern("x")).unwrap(), Value::int(42));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use actinide_parser::{Symbol, Value};

use crate::error::{Error, Result};

/// A lexical environment frame, cheap to clone (a shared handle).
#[derive(Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

struct EnvInner {
    bindings: HashMap<Symbol, Value>,
    parent: Option<Env>,
    /// The session macro table (only set on the session root).
    macros: Option<Env>,
}

impl Env {
    /// Create a session root environment carrying a fresh macro table.
    #[must_use]
    pub fn new() -> Self {
        let env = Self::bare();
        env.inner.borrow_mut().macros = Some(Self::bare());
        env
    }

    /// Create a frame with no parent and no macro table. The macro table
    /// itself is one of these.
    fn bare() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
                macros: None,
            })),
        }
    }

    /// Create a child frame with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
                macros: None,
            })),
        }
    }

    /// Define a binding in this frame (never a parent), overwriting any
    /// existing binding for the symbol here.
    pub fn define(&self, sym: Symbol, val: Value) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Look up a symbol here or in any ancestor frame. Iterative, so deep
    /// chains do not consume host stack.
    pub fn lookup(&self, sym: &Symbol) -> Result<Value> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Ok(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return Err(Error::UnboundSymbol(sym.clone())),
            }
        }
    }

    /// Check whether a symbol is bound here or in any ancestor frame.
    #[must_use]
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if inner.bindings.contains_key(sym) {
                return true;
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    /// Fetch the session macro table by walking to the root frame.
    ///
    /// Errors if the chain was not rooted by [`Env::new`], which indicates
    /// an internal bug.
    pub fn macros(&self) -> Result<Env> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(ref macros) = inner.macros {
                return Ok(macros.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => {
                    return Err(Error::Internal(
                        "Root environment missing macro table".to_string(),
                    ));
                }
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        write!(
            f,
            "Env({} bindings{})",
            inner.bindings.len(),
            if inner.parent.is_some() { ", chained" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actinide_parser::SymbolTable;

    #[test]
    fn test_define_and_lookup() {
        let symbols = SymbolTable::new();
        let env = Env::new();
        env.define(symbols.intern("x"), Value::int(42));
        assert_eq!(env.lookup(&symbols.intern("x")).unwrap(), Value::int(42));
    }

    #[test]
    fn test_unbound_symbol() {
        let symbols = SymbolTable::new();
        let env = Env::new();
        assert!(env.lookup(&symbols.intern("x")).is_err());
    }

    #[test]
    fn test_child_inherits_parent() {
        let symbols = SymbolTable::new();
        let parent = Env::new();
        parent.define(symbols.intern("x"), Value::int(42));
        assert_eq!(
            parent.child().lookup(&symbols.intern("x")).unwrap(),
            Value::int(42)
        );
    }

    #[test]
    fn test_child_shadows_without_mutating_parent() {
        let symbols = SymbolTable::new();
        let parent = Env::new();
        parent.define(symbols.intern("x"), Value::int(42));

        let child = parent.child();
        child.define(symbols.intern("x"), Value::int(100));

        assert_eq!(child.lookup(&symbols.intern("x")).unwrap(), Value::int(100));
        assert_eq!(parent.lookup(&symbols.intern("x")).unwrap(), Value::int(42));
    }

    #[test]
    fn test_redefine_in_same_frame() {
        let symbols = SymbolTable::new();
        let env = Env::new();
        env.define(symbols.intern("x"), Value::int(1));
        env.define(symbols.intern("x"), Value::int(2));
        assert_eq!(env.lookup(&symbols.intern("x")).unwrap(), Value::int(2));
    }

    #[test]
    fn test_siblings_share_parent() {
        let symbols = SymbolTable::new();
        let parent = Env::new();
        parent.define(symbols.intern("x"), Value::int(1));

        let a = parent.child();
        let b = parent.child();
        a.define(symbols.intern("y"), Value::int(2));

        assert_eq!(b.lookup(&symbols.intern("x")).unwrap(), Value::int(1));
        assert!(b.lookup(&symbols.intern("y")).is_err());
    }

    #[test]
    fn test_macro_table_reachable_from_descendants() {
        let symbols = SymbolTable::new();
        let root = Env::new();
        let grandchild = root.child().child();

        let macros = grandchild.macros().unwrap();
        macros.define(symbols.intern("m"), Value::int(1));

        // Same table seen from the root
        assert_eq!(
            root.macros()
                .unwrap()
                .lookup(&symbols.intern("m"))
                .unwrap(),
            Value::int(1)
        );
        // Macro bindings are invisible to value lookup
        assert!(root.lookup(&symbols.intern("m")).is_err());
    }

    #[test]
    fn test_deep_chain_lookup_is_iterative() {
        let symbols = SymbolTable::new();
        let root = Env::new();
        root.define(symbols.intern("x"), Value::int(7));
        let mut env = root;
        for _ in 0..50_000 {
            env = env.child();
        }
        assert_eq!(env.lookup(&symbols.intern("x")).unwrap(), Value::int(7));
    }
}
