// actinide-core - Macro expander
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The expander: rewrites forms until no macro applications, quasiquote
//! nodes, or procedure-definition sugar remain.
//!
//! Macro transformers are ordinary procedures applied (via the evaluator)
//! to their *unexpanded* argument forms; whatever form they return is
//! expanded again, to a fixed point. The expansion is not hygienic: a
//! transformer runs against the session's top-level environment at the
//! moment of expansion, and the `cons`/`append` calls emitted for
//! quasiquote resolve through the ordinary value environment at run time.
//!
//! `define-macro` is honoured at expansion time only when it is the root of
//! the program being expanded. Anywhere deeper it is merely rewritten; the
//! runtime form installs the transformer in the session macro table without
//! affecting the expansion of the program that contains it.

use actinide_parser::{SymbolTable, Value};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::{apply, eval_single};

/// Rewrite budget. A macro that keeps producing macro forms past this many
/// rewrites of one node is reported as a loop.
const MAX_EXPANSION_DEPTH: usize = 500;

/// Expand a form against the session's macro table, evaluating any
/// transformers in `env` (the session's top-level environment).
///
/// # Examples
///
/// ```
/// use actinide_core::{expand, Env};
/// use actinide_parser::{read_str, SymbolTable};
///
/// let symbols = SymbolTable::new();
/// let env = Env::new();
/// let form = read_str("(define (id x) x)", &symbols).unwrap();
/// let expanded = expand(&form, &symbols, &env).unwrap();
/// assert_eq!(format!("{}", expanded), "(define id (lambda (x) (begin x)))");
/// ```
pub fn expand(form: &Value, symbols: &SymbolTable, env: &Env) -> Result<Value> {
    let expansion = Expansion {
        symbols,
        env,
        macros: env.macros()?,
    };
    expansion.expand_form(form, true, 0)
}

struct Expansion<'a> {
    symbols: &'a SymbolTable,
    env: &'a Env,
    macros: Env,
}

impl Expansion<'_> {
    fn sym(&self, name: &str) -> Value {
        Value::symbol(self.symbols.intern(name))
    }

    fn expand_form(&self, form: &Value, is_top: bool, depth: usize) -> Result<Value> {
        if depth > MAX_EXPANSION_DEPTH {
            return Err(Error::MacroLoop {
                depth: MAX_EXPANSION_DEPTH,
            });
        }

        let cell = match form {
            Value::Cons(cell) => cell,
            // Atoms and nil expand to themselves
            other => return Ok(other.clone()),
        };

        let Some(items) = form.try_list() else {
            // A dotted pair is not evaluable, but expand its parts so the
            // evaluator reports the error on the expanded shape
            return Ok(Value::cons(
                self.expand_form(&cell.head, false, depth)?,
                self.expand_form(&cell.tail, false, depth)?,
            ));
        };

        if let Value::Symbol(head) = &items[0] {
            match head.text() {
                "quote" => return Ok(form.clone()),
                "quasiquote" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("quasiquote", "requires exactly 1 argument"));
                    }
                    let lowered = self.lower_quasiquote(&items[1])?;
                    return self.expand_form(&lowered, false, depth + 1);
                }
                "unquote" => {
                    return Err(Error::expansion("unquote outside quasiquote"));
                }
                "unquote-splicing" => {
                    return Err(Error::expansion("unquote-splicing outside quasiquote"));
                }
                "lambda" => return self.expand_lambda(&items, depth),
                "define" => return self.expand_define(&items, depth),
                "define-macro" => return self.expand_define_macro(&items, is_top, depth),
                _ => {
                    if let Ok(transformer) = self.macros.lookup(head) {
                        return self.apply_macro(&transformer, head.text(), &items[1..], depth);
                    }
                }
            }
        }

        // Any other list: expand each subform independently
        let expanded: Result<Vec<Value>> = items
            .iter()
            .map(|item| self.expand_form(item, false, depth))
            .collect();
        Ok(Value::list(expanded?))
    }

    /// (lambda formals body...) - formals stay literal, body forms expand
    fn expand_lambda(&self, items: &[Value], depth: usize) -> Result<Value> {
        if items.len() < 2 {
            return Err(Error::syntax("lambda", "requires a formals list"));
        }
        let mut out = vec![items[0].clone(), items[1].clone()];
        for body in &items[2..] {
            out.push(self.expand_form(body, false, depth)?);
        }
        Ok(Value::list(out))
    }

    /// (define name value), with `(define (name . formals) body...)` sugar
    /// rewritten to a lambda binding first
    fn expand_define(&self, items: &[Value], depth: usize) -> Result<Value> {
        let (name, value) = self.split_definition("define", items)?;
        let expanded = self.expand_form(&value, false, depth + 1)?;
        Ok(Value::list(vec![items[0].clone(), name, expanded]))
    }

    /// (define-macro name value), with the same sugar as `define`. At the
    /// root of a program the transformer is evaluated immediately and
    /// installed in the macro table; nested occurrences only install at
    /// run time.
    fn expand_define_macro(&self, items: &[Value], is_top: bool, depth: usize) -> Result<Value> {
        let (name, value) = self.split_definition("define-macro", items)?;
        let expanded = self.expand_form(&value, false, depth + 1)?;

        if is_top {
            let sym = match &name {
                Value::Symbol(sym) => sym.clone(),
                other => {
                    return Err(Error::syntax(
                        "define-macro",
                        format!("binding target must be a symbol, got {}", other),
                    ));
                }
            };
            let transformer = eval_single(&expanded, self.env, "macro transformer")?;
            if !matches!(transformer, Value::Procedure(_)) {
                return Err(Error::expansion(format!(
                    "macro transformer must be a procedure, got {}",
                    transformer.type_name()
                )));
            }
            self.macros.define(sym, transformer);
        }

        Ok(Value::list(vec![items[0].clone(), name, expanded]))
    }

    /// Split a definition form into (name, value), rewriting the procedure
    /// sugar `(define (name . formals) body...)` into
    /// `(name, (lambda formals (begin body...)))`.
    fn split_definition(&self, form: &'static str, items: &[Value]) -> Result<(Value, Value)> {
        if items.len() < 2 {
            return Err(Error::syntax(form, "requires a symbol and a value"));
        }
        match &items[1] {
            Value::Cons(cell) => {
                let name = cell.head.clone();
                let mut body = vec![self.sym("begin")];
                body.extend(items[2..].iter().cloned());
                let lambda = Value::list(vec![
                    self.sym("lambda"),
                    cell.tail.clone(),
                    Value::list(body),
                ]);
                Ok((name, lambda))
            }
            _ => {
                if items.len() != 3 {
                    return Err(Error::syntax(form, "requires a symbol and a value"));
                }
                Ok((items[1].clone(), items[2].clone()))
            }
        }
    }

    /// Apply a macro transformer to raw argument forms and expand its
    /// result again.
    fn apply_macro(
        &self,
        transformer: &Value,
        name: &str,
        raw_args: &[Value],
        depth: usize,
    ) -> Result<Value> {
        let mut results = apply(transformer, raw_args)?;
        let replacement = match results.pop() {
            Some(form) if results.is_empty() => form,
            Some(_) => {
                return Err(Error::expansion(format!(
                    "macro '{}' returned {} values, expected exactly one form",
                    name,
                    results.len() + 1
                )));
            }
            None => {
                return Err(Error::expansion(format!(
                    "macro '{}' returned no form",
                    name
                )));
            }
        };
        self.expand_form(&replacement, false, depth + 1)
    }

    /// Lower a quasiquoted form into `cons`/`append`/`quote` constructor
    /// calls. Semantic, not textual: unquoted subforms surface as
    /// themselves and splices become `append` calls over the lowered tail.
    fn lower_quasiquote(&self, form: &Value) -> Result<Value> {
        if let Some(inner) = self.match_tagged(form, "unquote")? {
            return Ok(inner);
        }
        if self.match_tagged(form, "unquote-splicing")?.is_some() {
            return Err(Error::expansion(
                "unquote-splicing outside a list context",
            ));
        }
        match form {
            Value::Cons(cell) => {
                if let Some(spliced) = self.match_tagged(&cell.head, "unquote-splicing")? {
                    return Ok(Value::list(vec![
                        self.sym("append"),
                        spliced,
                        self.lower_quasiquote(&cell.tail)?,
                    ]));
                }
                Ok(Value::list(vec![
                    self.sym("cons"),
                    self.lower_quasiquote(&cell.head)?,
                    self.lower_quasiquote(&cell.tail)?,
                ]))
            }
            atom => Ok(Value::list(vec![self.sym("quote"), atom.clone()])),
        }
    }

    /// Match `(tag x)`, returning `x`. A tagged form with any other shape
    /// is a syntax error; anything else matches nothing.
    fn match_tagged(&self, form: &Value, tag: &'static str) -> Result<Option<Value>> {
        let Value::Cons(cell) = form else {
            return Ok(None);
        };
        let Value::Symbol(head) = &cell.head else {
            return Ok(None);
        };
        if head.text() != tag {
            return Ok(None);
        }
        match &cell.tail {
            Value::Cons(rest) if matches!(rest.tail, Value::Nil) => Ok(Some(rest.head.clone())),
            _ => Err(Error::syntax(tag, "requires exactly 1 argument")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use actinide_parser::read_str;

    fn setup() -> (SymbolTable, Env) {
        let symbols = SymbolTable::new();
        let env = Env::new();
        register_builtins(&env, &symbols);
        (symbols, env)
    }

    fn expand_src(src: &str) -> String {
        let (symbols, env) = setup();
        let form = read_str(src, &symbols).unwrap();
        format!("{}", expand(&form, &symbols, &env).unwrap())
    }

    #[test]
    fn test_atoms_pass_through() {
        assert_eq!(expand_src("42"), "42");
        assert_eq!(expand_src("x"), "x");
        assert_eq!(expand_src("()"), "()");
    }

    #[test]
    fn test_quote_stops_expansion() {
        assert_eq!(expand_src("'(define (f) 1)"), "(quote (define (f) 1))");
    }

    #[test]
    fn test_define_sugar() {
        assert_eq!(
            expand_src("(define (add a b) (+ a b))"),
            "(define add (lambda (a b) (begin (+ a b))))"
        );
        assert_eq!(
            expand_src("(define (f . args) args)"),
            "(define f (lambda args (begin args)))"
        );
    }

    #[test]
    fn test_define_sugar_nested_in_lambda_body() {
        assert_eq!(
            expand_src("(lambda () (define (g) 1) (g))"),
            "(lambda () (define g (lambda () (begin 1))) (g))"
        );
    }

    #[test]
    fn test_quasiquote_atom() {
        assert_eq!(expand_src("`x"), "(quote x)");
        assert_eq!(expand_src("`()"), "(quote ())");
    }

    #[test]
    fn test_quasiquote_list() {
        assert_eq!(
            expand_src("`(a b)"),
            "(cons (quote a) (cons (quote b) (quote ())))"
        );
    }

    #[test]
    fn test_quasiquote_unquote() {
        assert_eq!(expand_src("`,x"), "x");
        assert_eq!(
            expand_src("`(a ,x)"),
            "(cons (quote a) (cons x (quote ())))"
        );
    }

    #[test]
    fn test_quasiquote_splicing() {
        assert_eq!(
            expand_src("`(a ,@xs b)"),
            "(cons (quote a) (append xs (cons (quote b) (quote ()))))"
        );
    }

    #[test]
    fn test_quasiquote_dotted_unquote() {
        assert_eq!(expand_src("`(a . ,x)"), "(cons (quote a) x)");
    }

    #[test]
    fn test_unquote_errors() {
        let (symbols, env) = setup();
        for src in [",x", ",@x", "`,@x"] {
            let form = read_str(src, &symbols).unwrap();
            let err = expand(&form, &symbols, &env).unwrap_err();
            assert!(matches!(err, Error::Expansion(_)), "{}: {:?}", src, err);
        }
    }

    #[test]
    fn test_define_macro_installs_at_top_level() {
        let (symbols, env) = setup();
        let defn = read_str(
            "(define-macro (twice form) `(begin ,form ,form))",
            &symbols,
        )
        .unwrap();
        expand(&defn, &symbols, &env).unwrap();

        let usage = read_str("(twice (+ 1 2))", &symbols).unwrap();
        let expanded = expand(&usage, &symbols, &env).unwrap();
        assert_eq!(format!("{}", expanded), "(begin (+ 1 2) (+ 1 2))");
    }

    #[test]
    fn test_nested_define_macro_does_not_install() {
        let (symbols, env) = setup();
        let defn = read_str(
            "(lambda () (define-macro (m) ''hidden))",
            &symbols,
        )
        .unwrap();
        expand(&defn, &symbols, &env).unwrap();

        // No transformer installed: (m) stays an application
        let usage = read_str("(m)", &symbols).unwrap();
        let expanded = expand(&usage, &symbols, &env).unwrap();
        assert_eq!(format!("{}", expanded), "(m)");
    }

    #[test]
    fn test_macro_loop_is_detected() {
        let (symbols, env) = setup();
        let defn = read_str("(define-macro (spin) '(spin))", &symbols).unwrap();
        expand(&defn, &symbols, &env).unwrap();

        let usage = read_str("(spin)", &symbols).unwrap();
        let err = expand(&usage, &symbols, &env).unwrap_err();
        assert!(matches!(err, Error::MacroLoop { .. }));
    }

    #[test]
    fn test_transformer_must_be_a_procedure() {
        let (symbols, env) = setup();
        let defn = read_str("(define-macro m 42)", &symbols).unwrap();
        let err = expand(&defn, &symbols, &env).unwrap_err();
        assert!(matches!(err, Error::Expansion(_)));
    }
}
