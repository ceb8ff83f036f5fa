// actinide-parser - Input ports
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Input ports: shared, stateful character cursors.
//!
//! A [`Port`] yields characters from a fixed source. Reads consume
//! irreversibly; peeks do not. Ports are handles: cloning a port clones the
//! cursor, so two clones observe each other's reads. Language code obtains
//! ports exclusively through `string-to-input-port`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An input port over a character sequence.
///
/// # Examples
///
/// ```
/// use actinide_parser::Port;
///
/// let port = Port::from_string("abcdef");
/// assert_eq!(port.peek(3), "abc");
/// assert_eq!(port.read(3), "abc");
/// assert_eq!(port.read_fully(), "def");
/// assert_eq!(port.read(1), "");
/// ```
#[derive(Clone)]
pub struct Port {
    inner: Rc<RefCell<PortState>>,
}

struct PortState {
    chars: Vec<char>,
    pos: usize,
}

impl Port {
    /// Create a port over the characters of `text`.
    #[must_use]
    pub fn from_string(text: &str) -> Self {
        Port {
            inner: Rc::new(RefCell::new(PortState {
                chars: text.chars().collect(),
                pos: 0,
            })),
        }
    }

    /// Look ahead up to `n` characters without consuming them. Returns fewer
    /// than `n` characters only when the source is nearly exhausted, and the
    /// empty string at end of input.
    #[must_use]
    pub fn peek(&self, n: usize) -> String {
        let state = self.inner.borrow();
        let end = (state.pos + n).min(state.chars.len());
        state.chars[state.pos..end].iter().collect()
    }

    /// Consume and return up to `n` characters. Returns the empty string at
    /// end of input.
    pub fn read(&self, n: usize) -> String {
        let mut state = self.inner.borrow_mut();
        let end = (state.pos + n).min(state.chars.len());
        let out: String = state.chars[state.pos..end].iter().collect();
        state.pos = end;
        out
    }

    /// Consume and return all remaining characters.
    pub fn read_fully(&self) -> String {
        let mut state = self.inner.borrow_mut();
        let out: String = state.chars[state.pos..].iter().collect();
        state.pos = state.chars.len();
        out
    }

    /// True when the cursor has consumed the whole source.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        let state = self.inner.borrow();
        state.pos >= state.chars.len()
    }

    /// Reference identity, used by `eq?`.
    #[must_use]
    pub fn identical(&self, other: &Port) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        write!(f, "Port({}/{})", state.pos, state.chars.len())
    }
}

// ============================================================================
// Tests
// ============================================================================
