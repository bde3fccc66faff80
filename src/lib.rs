//! `rocks` is a tree-walking interpreter for Lox, the language from Bob
//! Nystrom's *Crafting Interpreters*. It is dynamically typed, lexically
//! scoped, and supports first-class functions and single-inheritance classes.
//!
//! ## Pipeline
//! Source text passes through four stages, each reporting through a shared
//! [`error::Diagnostics`] sink rather than aborting on the first problem:
//!
//! - [`scanner`] turns source text into a flat token stream, recovering past
//!   bad characters and unterminated strings/comments.
//! - [`parser`] turns tokens into the [`expr::Expr`]/[`stmt::Stmt`] AST via
//!   recursive descent, recovering at statement boundaries.
//! - [`resolver`] statically determines, for every variable/`this`/`super`
//!   reference, how many enclosing scopes out it resolves — so the
//!   interpreter never has to search the environment chain at runtime.
//! - [`interpreter`] walks the resolved AST and evaluates it, maintaining the
//!   live [`environment::Environment`] chain and built-in [`object::Object`]
//!   values.
//!
//! [`Rocks`] ties the four stages together and is the entry point both the
//! CLI and the integration tests drive.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::instrument;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::{BufferSink, Diagnostics, StderrSink};
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// Drives one interpreter session: scan, parse, resolve, evaluate, repeat.
/// `stdout` is injectable so tests can assert on `print` output without
/// spawning the built binary.
pub struct Rocks {
    interpreter: Interpreter,
    diagnostics: Rc<Diagnostics>,
}

impl Rocks {
    /// Production entry point: diagnostics go to stderr, `print` output to
    /// the real stdout.
    pub fn new() -> Self {
        let stdout: Box<dyn Write> = Box::new(io::stdout());
        Self::with_sinks(Box::new(StderrSink), Rc::new(RefCell::new(stdout)))
    }

    /// Test entry point: diagnostics and `print` output both land in
    /// in-process buffers the caller already holds a handle to.
    pub fn buffered(diagnostics_buffer: Rc<RefCell<String>>, stdout: Rc<RefCell<Box<dyn Write>>>) -> Self {
        Self::with_sinks(Box::new(BufferSink(diagnostics_buffer)), stdout)
    }

    fn with_sinks(sink: Box<dyn error::DiagnosticSink>, stdout: Rc<RefCell<Box<dyn Write>>>) -> Self {
        let diagnostics = Rc::new(Diagnostics::new(sink));
        Rocks { interpreter: Interpreter::new(Rc::clone(&diagnostics), stdout), diagnostics }
    }

    pub fn did_error(&self) -> bool {
        self.diagnostics.did_error()
    }

    pub fn did_runtime_error(&self) -> bool {
        self.diagnostics.did_runtime_error()
    }

    pub fn run_file(&mut self, path: &str) -> io::Result<()> {
        let source = fs::read_to_string(path)?;
        self.run(&source);
        Ok(())
    }

    /// Runs one line of REPL input, clearing error flags first so a bad
    /// earlier line doesn't poison every line after it.
    pub fn run_line(&mut self, source: &str) {
        self.diagnostics.reset();
        self.run(source);
    }

    #[instrument(skip_all)]
    fn run(&mut self, source: &str) {
        let scanner = Scanner::new(source, Rc::clone(&self.diagnostics));
        let tokens = scanner.scan_tokens();

        if self.diagnostics.did_error() {
            return;
        }

        let mut parser = Parser::new(tokens, Rc::clone(&self.diagnostics));
        let statements = parser.parse();

        if self.diagnostics.did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter, &self.diagnostics);
        resolver.resolve(&statements);

        if self.diagnostics.did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}

impl Default for Rocks {
    fn default() -> Self {
        Self::new()
    }
}
