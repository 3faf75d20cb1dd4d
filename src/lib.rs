// ABOUTME: Library root wiring the pipeline and exposing components for testing

pub mod ast;
pub mod config;
pub mod env;
pub mod error;
pub mod highlighter;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod value;

use crate::env::Environment;
use crate::error::ErrorReporter;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use std::rc::Rc;

/// The interpreter pipeline: scan, parse, resolve, evaluate.
///
/// Owns the error sink and the interpreter state, so globals and resolution
/// data persist across `run` calls — a REPL session feeds one `Lox` value
/// line by line.
pub struct Lox {
    interpreter: Interpreter,
    reporter: ErrorReporter,
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: Interpreter::new(),
            reporter: ErrorReporter::new(),
        }
    }

    /// Runs a source text. Compile-time diagnostics halt the pipeline before
    /// the next stage; a runtime error halts the batch. Outcomes are observed
    /// through the error flags.
    pub fn run(&mut self, source: &str) {
        let tokens = Scanner::new(source).scan_tokens(&mut self.reporter);
        let statements = Parser::new(tokens, &mut self.reporter).parse();
        if self.reporter.had_error {
            return;
        }

        Resolver::new(&mut self.interpreter, &mut self.reporter).resolve(&statements);
        if self.reporter.had_error {
            return;
        }

        if let Err(error) = self.interpreter.interpret(&statements) {
            self.reporter.runtime_error(&error);
        }
    }

    pub fn had_error(&self) -> bool {
        self.reporter.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.reporter.had_runtime_error
    }

    /// Clears the compile-error flag between REPL lines.
    pub fn reset_error(&mut self) {
        self.reporter.reset();
    }

    /// The global environment, for observing program results in tests.
    pub fn globals(&self) -> Rc<Environment> {
        self.interpreter.globals()
    }
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}
