//! Typed diagnostics for every stage of the pipeline.
//!
//! Each stage (scanner, parser, resolver, evaluator) reports through a shared
//! [`Diagnostics`] sink rather than panicking or returning early on the first
//! problem; this is what lets the scanner keep scanning past an unterminated
//! string, the parser keep parsing past a missing semicolon, and so on.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

use crate::token::{Token, Type};

/// Where a diagnostic line ends up. Production wires [`StderrSink`]; tests
/// wire a shared buffer so assertions can inspect exact diagnostic text
/// in-process, without spawning a subprocess.
pub trait DiagnosticSink {
    fn emit(&self, line: &str);
}

#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, line: &str) {
        eprintln!("{line}");
    }
}

/// An in-process sink backed by a shared buffer, for tests that want to
/// assert on diagnostic text without running the built binary.
#[derive(Clone)]
pub struct BufferSink(pub Rc<std::cell::RefCell<String>>);

impl DiagnosticSink for BufferSink {
    fn emit(&self, line: &str) {
        let mut buf = self.0.borrow_mut();
        buf.push_str(line);
        buf.push('\n');
    }
}

/// Owns the `hadError`/`hadRuntimeError` flags (spec.md §7) and the output
/// sink. Shared by reference across the scanner, parser, resolver and
/// evaluator of a single `run` so they can all report through it and the
/// driver can check it afterwards.
pub struct Diagnostics {
    had_error: Cell<bool>,
    had_runtime_error: Cell<bool>,
    sink: Box<dyn DiagnosticSink>,
}

impl Diagnostics {
    pub fn new(sink: Box<dyn DiagnosticSink>) -> Self {
        Diagnostics {
            had_error: Cell::new(false),
            had_runtime_error: Cell::new(false),
            sink,
        }
    }

    pub fn did_error(&self) -> bool {
        self.had_error.get() || self.had_runtime_error.get()
    }

    pub fn did_runtime_error(&self) -> bool {
        self.had_runtime_error.get()
    }

    /// Clears both flags. The REPL calls this between lines so one bad line
    /// doesn't poison the exit status of the whole session.
    pub fn reset(&self) {
        self.had_error.set(false);
        self.had_runtime_error.set(false);
    }

    pub fn report_scan(&self, error: &ScanError) {
        self.sink.emit(&format!("[line {}] Error: {}", error.location, error.message));
        self.had_error.set(true);
    }

    pub fn report_parse(&self, error: &ParseError) {
        self.sink.emit(&format_at_token(&error.token, &error.message));
        self.had_error.set(true);
    }

    pub fn report_resolve(&self, error: &ResolveError) {
        self.sink.emit(&format_at_token(&error.token, &error.message));
        self.had_error.set(true);
    }

    pub fn report_runtime(&self, error: &RuntimeError) {
        self.sink.emit(&format_at_token(&error.token, &error.message));
        self.had_runtime_error.set(true);
    }
}

fn format_at_token(token: &Token, message: &str) -> String {
    if token.r#type == Type::EOF {
        format!("[line {}] Error at end: {}", token.location, message)
    } else {
        format!("[line {}] Error at '{}': {}", token.location, token.lexeme, message)
    }
}

/// Malformed token; scanning continues after it is reported.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ScanError {
    pub location: crate::token::Location,
    pub message: String,
}

/// Grammar mismatch; the parser enters panic-mode recovery after reporting it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

/// Self-reference in an initializer, duplicate declaration, misplaced
/// `return`/`this`/`super`, or self-inheritance.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

/// Type mismatch, undefined variable/property, wrong arity, non-callable
/// call. Aborts the current `interpret` call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}
