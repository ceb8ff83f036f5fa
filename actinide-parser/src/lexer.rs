// actinide-parser - Lexer for Actinide source text
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for Actinide source text.
//!
//! Pulls characters from a [`Port`] and produces tokens on demand. The token
//! classes are small: parentheses, the four quote shorthands, string
//! literals, and atoms. Whitespace separates tokens and `;` comments run to
//! the end of the line. Quote characters and parentheses are
//! self-delimiting; every other character accumulates into an atom, so
//! `1.5`, `a.b`, and a lone `.` are all single atoms (the reader gives the
//! lone dot its pair-building meaning).

use std::fmt;

use crate::port::Port;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,         // (
    RParen,         // )
    Quote,          // '
    Quasiquote,     // `
    Unquote,        // ,
    UnquoteSplice,  // ,@
    /// A string literal, with escapes already decoded.
    Str(String),
    /// Any other token: symbols, numbers, booleans, the dot.
    Atom(String),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Quote => write!(f, "'"),
            Token::Quasiquote => write!(f, "`"),
            Token::Unquote => write!(f, ","),
            Token::UnquoteSplice => write!(f, ",@"),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Atom(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// The kind of a read failure, machine-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// Input ended inside a form (or after a quote shorthand).
    UnexpectedEof,
    /// A `)` with no matching open.
    UnexpectedDelimiter,
    /// A `.` somewhere other than between list head and a single tail.
    IllegalDot,
    /// A string literal with no closing quote.
    UnterminatedString,
    /// A string escape other than `\"` or `\\`.
    BadEscape,
    /// A token that begins like a number but matches neither numeric
    /// grammar.
    InvalidNumber,
}

/// A read error with position information.
#[derive(Debug, Clone)]
pub struct ReadError {
    pub kind: ReadErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ReadError {
    pub(crate) fn new(
        kind: ReadErrorKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        ReadError {
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    /// True when more input could turn this failure into a successful read.
    /// Interactive hosts use this to keep accumulating lines.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self.kind,
            ReadErrorKind::UnexpectedEof | ReadErrorKind::UnterminatedString
        )
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ReadError {}

/// The lexer converts port input into tokens.
pub struct Lexer {
    port: Port,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a lexer over the given port. The port's cursor is shared:
    /// characters past the last token consumed remain available to other
    /// readers of the port.
    pub fn new(port: Port) -> Self {
        Lexer {
            port,
            line: 1,
            column: 1,
        }
    }

    /// The current line number (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The current column number (1-indexed).
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Produce the next token, or [`Token::Eof`] at end of input.
    pub fn next_token(&mut self) -> Result<Token, ReadError> {
        self.skip_whitespace_and_comments();

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            '\'' => {
                self.advance();
                Ok(Token::Quote)
            }
            '`' => {
                self.advance();
                Ok(Token::Quasiquote)
            }
            ',' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::UnquoteSplice)
                } else {
                    Ok(Token::Unquote)
                }
            }
            '"' => self.read_string(),
            _ => self.read_atom(),
        }
    }

    pub(crate) fn error(&self, kind: ReadErrorKind, message: impl Into<String>) -> ReadError {
        ReadError::new(kind, message, self.line, self.column)
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.port.peek(1).chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.port.read(1).chars().next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.advance();
                }
                Some(';') => {
                    // Comment runs to end of line
                    while let Some(c) = self.advance() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    fn read_string(&mut self) -> Result<Token, ReadError> {
        self.advance(); // opening quote
        let mut out = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(self.error(
                        ReadErrorKind::UnterminatedString,
                        "Unclosed string literal",
                    ));
                }
                Some('"') => return Ok(Token::Str(out)),
                Some('\\') => match self.advance() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        return Err(self.error(
                            ReadErrorKind::BadEscape,
                            format!("Invalid string escape '\\{}'", other),
                        ));
                    }
                    None => {
                        return Err(self.error(
                            ReadErrorKind::UnterminatedString,
                            "Unclosed string literal",
                        ));
                    }
                },
                Some(other) => out.push(other),
            }
        }
    }

    fn read_atom(&mut self) -> Result<Token, ReadError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            out.push(c);
            self.advance();
        }
        Ok(Token::Atom(out))
    }
}

/// Characters that terminate an atom without being part of it.
fn is_delimiter(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '(' | ')' | ';' | '"' | '\'' | '`' | ','
    )
}

// ============================================================================
// Tests
// ============================================================================
