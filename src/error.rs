// ABOUTME: Error types and the diagnostic sink threaded through the pipeline

use crate::token::{Token, TokenType};
use thiserror::Error;

/// A runtime failure: carries the token that anchors the diagnostic to a
/// source line, and the message shown to the user.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError {
            token: token.clone(),
            message: message.into(),
        }
    }
}

/// Sentinel unwound through the parser's `Result` chain. The diagnostic has
/// already been reported by the time this is raised; the catcher only needs
/// to synchronize.
#[derive(Error, Debug, Clone, Copy)]
#[error("parse error")]
pub struct ParseError;

/// Collects the error state of a run and formats diagnostics.
///
/// Scanner, parser, and resolver each receive a `&mut` reference; the driver
/// owns the sink and inspects the flags between pipeline stages and when
/// choosing an exit code.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        ErrorReporter::default()
    }

    /// Reports a lexical error, which has a line but no token.
    pub fn error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }

    /// Reports a syntax or static-semantic error against a token.
    pub fn token_error(&mut self, token: &Token, message: &str) {
        if token.kind == TokenType::Eof {
            self.report(token.line, " at end", message);
        } else {
            let location = format!(" at '{}'", token.lexeme);
            self.report(token.line, &location, message);
        }
    }

    /// Runtime errors go to standard output, unlike compile diagnostics.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        println!("{}\n[line {}]", error.message, error.token.line);
        self.had_runtime_error = true;
    }

    /// Clears the compile-error flag so a REPL session survives bad lines.
    pub fn reset(&mut self) {
        self.had_error = false;
    }

    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {}] Error{}: {}", line, location, message);
        self.had_error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_sets_flag() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.had_error);
        reporter.error(3, "Unexpected character.");
        assert!(reporter.had_error);
        assert!(!reporter.had_runtime_error);
    }

    #[test]
    fn test_reset_clears_compile_flag_only() {
        let mut reporter = ErrorReporter::new();
        reporter.error(1, "boom");
        let token = Token::new(TokenType::Identifier, "x".to_string(), None, 1);
        reporter.runtime_error(&RuntimeError::new(&token, "Undefined variable 'x'."));
        reporter.reset();
        assert!(!reporter.had_error);
        assert!(reporter.had_runtime_error);
    }
}
