// actinide - A sandboxed, embeddable Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use actinide_core::{Error, Session};
use actinide_parser::{Port, Value};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("Actinide v0.1.0");
        return;
    }

    let session = Session::new();

    // If files provided, evaluate them; otherwise start the REPL
    if args.len() > 1 {
        run_files(&args[1..], &session);
    } else {
        run_repl(&session);
    }
}

/// Evaluate a sequence of source files in one session
fn run_files(files: &[String], session: &Session) {
    for file_path in files {
        if let Err(e) = eval_file(file_path, session) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Evaluate a single source file, form by form
fn eval_file(file_path: &str, session: &Session) -> Result<(), String> {
    let path = Path::new(file_path);

    // Validate file extension
    match path.extension().and_then(|e| e.to_str()) {
        Some("an") => {}
        Some(ext) => {
            return Err(format!(
                "Error: unsupported file extension '.{}' for '{}'",
                ext, file_path
            ));
        }
        None => {
            return Err(format!(
                "Error: file '{}' has no extension (expected .an)",
                file_path
            ));
        }
    }

    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading '{}': {}", file_path, e))?;

    // Each form is its own top-level program
    let port = Port::from_string(&source);
    let eof = session.eof();
    loop {
        let form = session
            .read(&port)
            .map_err(|e| format!("Error in '{}': {}", file_path, e))?;
        if form.identical(&eof) {
            return Ok(());
        }
        session
            .eval(&form)
            .map_err(|e| format!("Error in '{}': {}", file_path, e))?;
    }
}

/// What a buffered chunk of REPL input turned out to contain.
enum Input {
    /// Complete forms, ready to evaluate.
    Forms(Vec<Value>),
    /// A form is still open; keep reading lines.
    Incomplete,
    /// Unreadable input.
    Failed(Error),
}

/// Read every form out of `text` without evaluating anything.
fn read_forms(session: &Session, text: &str) -> Input {
    let port = Port::from_string(text);
    let eof = session.eof();
    let mut forms = Vec::new();
    loop {
        match session.read(&port) {
            Ok(form) if form.identical(&eof) => return Input::Forms(forms),
            Ok(form) => forms.push(form),
            Err(Error::Read(e)) if e.is_incomplete() => return Input::Incomplete,
            Err(e) => return Input::Failed(e),
        }
    }
}

/// Run the interactive REPL
fn run_repl(session: &Session) {
    println!("Actinide v0.1.0");

    let mut pending = String::new();
    loop {
        let prompt = if pending.is_empty() { "an> " } else { "..> " };
        print!("{}", prompt);
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                pending.push_str(&line);
                match read_forms(session, &pending) {
                    Input::Incomplete => continue,
                    Input::Failed(e) => {
                        eprintln!("Error: {}", e);
                        pending.clear();
                    }
                    Input::Forms(forms) => {
                        pending.clear();
                        // Expansion happens per form at eval time, so a
                        // macro defined by one input is visible to the next
                        for form in forms {
                            match session.eval(&form) {
                                Ok(values) => {
                                    for value in values {
                                        println!("{}", value);
                                    }
                                }
                                Err(e) => {
                                    eprintln!("Error: {}", e);
                                    break;
                                }
                            }
                        }
                    }
                }
            }
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}
