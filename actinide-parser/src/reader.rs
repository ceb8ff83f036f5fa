// actinide-parser - Reader for Actinide forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The reader: recursive descent from tokens to forms.
//!
//! [`Reader::read`] consumes exactly one form's worth of tokens from the
//! underlying port and leaves trailing input untouched. At end of input the
//! top-level read returns the symbol table's end-of-input sentinel; end of
//! input anywhere inside a form is an error.
//!
//! Atoms classify in a fixed order: the booleans `#t`/`#f`, then the integer
//! grammar, then the decimal grammar, and everything else is an interned
//! symbol. A token that starts like a number but matches neither numeric
//! grammar is an invalid literal rather than a strange symbol.
//!
//! The quote shorthands read as their canonical list forms: `'x` is
//! `(quote x)`, `` `x `` is `(quasiquote x)`, `,x` is `(unquote x)`, and
//! `,@x` is `(unquote-splicing x)`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::lexer::{Lexer, ReadError, ReadErrorKind, Token};
use crate::port::Port;
use crate::symbol::SymbolTable;
use crate::value::Value;

/// Read a single form from a port, interning symbols in `symbols`.
///
/// # Examples
///
/// ```
/// use actinide_parser::{read, Port, SymbolTable, Value};
///
/// let symbols = SymbolTable::new();
/// let port = Port::from_string("(+ 1 2)");
/// let form = read(&port, &symbols).unwrap();
/// assert_eq!(format!("{}", form), "(+ 1 2)");
///
/// // End of input yields the sentinel
/// let eof = read(&port, &symbols).unwrap();
/// assert_eq!(eof, Value::symbol(symbols.eof()));
/// ```
pub fn read(port: &Port, symbols: &SymbolTable) -> Result<Value, ReadError> {
    Reader::new(port.clone(), symbols).read()
}

/// Read a single form from a string. Trailing input is ignored.
pub fn read_str(source: &str, symbols: &SymbolTable) -> Result<Value, ReadError> {
    read(&Port::from_string(source), symbols)
}

/// A pull reader over a port.
pub struct Reader<'a> {
    lexer: Lexer,
    symbols: &'a SymbolTable,
}

impl<'a> Reader<'a> {
    /// Create a reader over the given port.
    pub fn new(port: Port, symbols: &'a SymbolTable) -> Self {
        Reader {
            lexer: Lexer::new(port),
            symbols,
        }
    }

    /// Read one form. Returns the end-of-input sentinel symbol when the
    /// port is exhausted before any token appears.
    pub fn read(&mut self) -> Result<Value, ReadError> {
        match self.lexer.next_token()? {
            Token::Eof => Ok(Value::symbol(self.symbols.eof())),
            token => self.read_form(token),
        }
    }

    fn read_form(&mut self, token: Token) -> Result<Value, ReadError> {
        match token {
            Token::LParen => self.read_list(),
            Token::RParen => Err(self
                .lexer
                .error(ReadErrorKind::UnexpectedDelimiter, "Unexpected ')'")),
            Token::Quote => self.read_quoted("quote"),
            Token::Quasiquote => self.read_quoted("quasiquote"),
            Token::Unquote => self.read_quoted("unquote"),
            Token::UnquoteSplice => self.read_quoted("unquote-splicing"),
            Token::Str(s) => Ok(Value::string(s)),
            Token::Atom(a) if a == "." => Err(self
                .lexer
                .error(ReadErrorKind::IllegalDot, "Unexpected '.'")),
            Token::Atom(a) => self.classify_atom(&a),
            Token::Eof => Err(self
                .lexer
                .error(ReadErrorKind::UnexpectedEof, "Unexpected end of input")),
        }
    }

    /// Read the form following a quote shorthand and wrap it in the
    /// canonical two-element list.
    fn read_quoted(&mut self, name: &str) -> Result<Value, ReadError> {
        let quoted = self.read_required()?;
        Ok(Value::list(vec![
            Value::symbol(self.symbols.intern(name)),
            quoted,
        ]))
    }

    /// Read a form where one must appear; end of input is an error here.
    fn read_required(&mut self) -> Result<Value, ReadError> {
        match self.lexer.next_token()? {
            Token::Eof => Err(self
                .lexer
                .error(ReadErrorKind::UnexpectedEof, "Unexpected end of input")),
            token => self.read_form(token),
        }
    }

    /// Read list elements after an opening paren, up to the matching close.
    /// A single `.` between the head forms and one tail form builds an
    /// improper list.
    fn read_list(&mut self) -> Result<Value, ReadError> {
        let mut items = Vec::new();
        loop {
            match self.lexer.next_token()? {
                Token::Eof => {
                    return Err(self
                        .lexer
                        .error(ReadErrorKind::UnexpectedEof, "Unexpected end of input"));
                }
                Token::RParen => return Ok(Value::list(items)),
                Token::Atom(a) if a == "." => {
                    if items.is_empty() {
                        return Err(self
                            .lexer
                            .error(ReadErrorKind::IllegalDot, "'.' may not begin a list"));
                    }
                    let tail = self.read_dotted_tail()?;
                    match self.lexer.next_token()? {
                        Token::RParen => return Ok(Value::list_with_tail(items, tail)),
                        Token::Eof => {
                            return Err(self.lexer.error(
                                ReadErrorKind::UnexpectedEof,
                                "Unexpected end of input",
                            ));
                        }
                        _ => {
                            return Err(self.lexer.error(
                                ReadErrorKind::IllegalDot,
                                "Expected ')' after dotted tail",
                            ));
                        }
                    }
                }
                token => items.push(self.read_form(token)?),
            }
        }
    }

    fn read_dotted_tail(&mut self) -> Result<Value, ReadError> {
        match self.lexer.next_token()? {
            Token::Eof => Err(self
                .lexer
                .error(ReadErrorKind::UnexpectedEof, "Unexpected end of input")),
            Token::RParen => Err(self
                .lexer
                .error(ReadErrorKind::IllegalDot, "Expected a form after '.'")),
            Token::Atom(a) if a == "." => Err(self
                .lexer
                .error(ReadErrorKind::IllegalDot, "Unexpected '.'")),
            token => self.read_form(token),
        }
    }

    fn classify_atom(&self, text: &str) -> Result<Value, ReadError> {
        match text {
            "#t" => return Ok(Value::bool(true)),
            "#f" => return Ok(Value::bool(false)),
            _ => {}
        }
        if is_integer_literal(text) {
            let digits: String = text.chars().filter(|c| *c != '_').collect();
            return BigInt::from_str(&digits)
                .map(Value::integer)
                .map_err(|_| self.invalid_number(text));
        }
        if is_decimal_literal(text) {
            return BigDecimal::from_str(&normalize_decimal(text))
                .map(Value::decimal)
                .map_err(|_| self.invalid_number(text));
        }
        if looks_numeric(text) {
            return Err(self.invalid_number(text));
        }
        Ok(Value::symbol(self.symbols.intern(text)))
    }

    fn invalid_number(&self, text: &str) -> ReadError {
        self.lexer.error(
            ReadErrorKind::InvalidNumber,
            format!("Invalid numeric literal '{}'", text),
        )
    }
}

// ============================================================================
// Numeric grammars
// ============================================================================

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

fn digits_or_underscores(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || c == '_')
}

/// Optional `-`, then digits and underscores with at least one digit.
fn is_integer_literal(s: &str) -> bool {
    let t = s.strip_prefix('-').unwrap_or(s);
    digits_or_underscores(t) && has_digit(t)
}

/// Optional `-`, then either a mantissa containing a `.` with at least one
/// adjacent digit, or a plain mantissa followed by an exponent. The exponent
/// is `e`/`E`, an optional sign, and at least one digit.
fn is_decimal_literal(s: &str) -> bool {
    let t = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exponent) = match t.find(['e', 'E']) {
        Some(i) => (&t[..i], Some(&t[i + 1..])),
        None => (t, None),
    };
    if let Some(exp) = exponent {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if !(digits_or_underscores(exp) && has_digit(exp)) {
            return false;
        }
    }
    match mantissa.find('.') {
        Some(i) => {
            let int_part = &mantissa[..i];
            let frac_part = &mantissa[i + 1..];
            digits_or_underscores(int_part)
                && digits_or_underscores(frac_part)
                && (has_digit(int_part) || has_digit(frac_part))
        }
        None => exponent.is_some() && digits_or_underscores(mantissa) && has_digit(mantissa),
    }
}

/// A token that opens like a number: used to reject near-misses like
/// `1.2.3` instead of reading them as symbols.
fn looks_numeric(s: &str) -> bool {
    let t = s.strip_prefix('-').unwrap_or(s);
    let t = t.strip_prefix('.').unwrap_or(t);
    t.starts_with(|c: char| c.is_ascii_digit())
}

/// Rewrite a grammar-validated decimal token into a form the decimal
/// library accepts: underscores removed, empty integer part zero-filled.
fn normalize_decimal(s: &str) -> String {
    let cleaned: String = s.chars().filter(|c| *c != '_').collect();
    let (sign, t) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.as_str()),
    };
    let (mantissa, exponent) = match t.find(['e', 'E']) {
        Some(i) => (&t[..i], Some(&t[i + 1..])),
        None => (t, None),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, ""),
    };
    let mut out = String::new();
    out.push_str(sign);
    out.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    if let Some(exp) = exponent {
        out.push('e');
        out.push_str(exp);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
