// actinide-parser - Symbols and the session-scoped interner
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are short identifiers interned per session.
//!
//! # Interning
//!
//! A [`SymbolTable`] maps symbol text to a unique [`Symbol`] identity. Two
//! interns of the same text in the same table return pointer-equal symbols,
//! so equality is a pointer comparison and hashing is a pointer hash.
//!
//! The table is a value, not a process-wide singleton: two sessions hold two
//! tables and never share symbol identities. Cloning a table clones the
//! handle, not the contents.
//!
//! # Memory behaviour
//!
//! Interned symbols are never deallocated while their table lives. Memory
//! grows monotonically with the number of distinct symbols seen, which is
//! bounded by the program text for typical scripts.
//!
//! # End of input
//!
//! Every table owns one *uninterned* symbol, returned by [`SymbolTable::eof`],
//! used by the reader as its end-of-input sentinel. It is unequal to every
//! symbol produced by [`SymbolTable::intern`], including an intern of its own
//! display text.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// An interned identifier.
///
/// Symbols remember their original text for display and conversion back to
/// strings, but their identity is the interned allocation, not the text.
#[derive(Clone)]
pub struct Symbol {
    inner: Rc<SymbolInner>,
}

#[derive(Debug)]
struct SymbolInner {
    text: Box<str>,
}

impl Symbol {
    /// Create a fresh, uninterned symbol. Only the symbol table calls this;
    /// uninterned symbols are never equal to interned ones.
    fn fresh(text: &str) -> Self {
        Symbol {
            inner: Rc::new(SymbolInner { text: text.into() }),
        }
    }

    /// The text this symbol was interned from.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.inner.text
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.text)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        // Interning makes pointer comparison sufficient
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.inner).hash(state);
    }
}

/// A session-scoped symbol interner.
///
/// # Examples
///
/// ```
/// use actinide_parser::SymbolTable;
///
/// let symbols = SymbolTable::new();
/// let a = symbols.intern("spin");
/// let b = symbols.intern("spin");
/// assert_eq!(a, b);
/// assert_ne!(a, symbols.intern("charge"));
/// ```
#[derive(Clone)]
pub struct SymbolTable {
    symbols: Rc<RefCell<HashMap<String, Symbol>>>,
    eof: Symbol,
}

impl SymbolTable {
    /// Create an empty table with a fresh end-of-input sentinel.
    #[must_use]
    pub fn new() -> Self {
        SymbolTable {
            symbols: Rc::new(RefCell::new(HashMap::new())),
            eof: Symbol::fresh("#<end-of-input>"),
        }
    }

    /// Intern `text`, returning the table's unique symbol for it.
    pub fn intern(&self, text: &str) -> Symbol {
        if let Some(sym) = self.symbols.borrow().get(text) {
            return sym.clone();
        }
        let sym = Symbol::fresh(text);
        self.symbols
            .borrow_mut()
            .insert(text.to_string(), sym.clone());
        sym
    }

    /// The table's end-of-input sentinel. Uninterned: no call to
    /// [`SymbolTable::intern`] can produce this identity.
    #[must_use]
    pub fn eof(&self) -> Symbol {
        self.eof.clone()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolTable({} symbols)", self.symbols.borrow().len())
    }
}

// ============================================================================
// Tests
// ============================================================================
