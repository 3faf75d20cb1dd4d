// ABOUTME: Constants for the CLI and REPL

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "Lox interpreter v0.1";
pub const WELCOME_SUBTITLE: &str = "Type a statement, or Ctrl-D to exit.";

pub const PROMPT: &str = "lox> ";
pub const HISTORY_FILE: &str = ".lox_history";

pub const USAGE: &str = "Usage: lox [script]";
