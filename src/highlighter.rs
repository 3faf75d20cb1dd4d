// ABOUTME: Syntax highlighter for the REPL with color support
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for Lox syntax elements while preserving display width

use crate::token::{keyword, TokenType};
use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;

// ANSI color codes (4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_KEYWORD: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_LITERAL: &str = "\x1b[33m"; // Yellow: numbers, true/false/nil
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)
const COLOR_BRACKET: &str = "\x1b[1;34m"; // Bold blue

/// REPL helper providing syntax-aware color highlighting for Lox.
pub struct LoxHelper;

impl LoxHelper {
    pub fn new() -> Self {
        LoxHelper
    }
}

impl Default for LoxHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for LoxHelper {}

impl Completer for LoxHelper {
    type Candidate = String;
}

impl Hinter for LoxHelper {
    type Hint = String;
}

impl Validator for LoxHelper {}

impl Highlighter for LoxHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Walks the line once and wraps recognized spans in color codes. This is a
/// display-only pass: it tolerates malformed input and never reports errors.
fn highlight_line(line: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Line comment: everything from // to end of line
            '/' if i + 1 < chars.len() && chars[i + 1] == '/' => {
                result.push_str(COLOR_COMMENT);
                while i < chars.len() {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            '"' => {
                result.push_str(COLOR_STRING);
                result.push('"');
                i += 1;
                while i < chars.len() {
                    let c = chars[i];
                    result.push(c);
                    i += 1;
                    if c == '"' {
                        break;
                    }
                }
                result.push_str(COLOR_RESET);
            }

            '0'..='9' => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                result.push_str(COLOR_LITERAL);
                result.extend(&chars[start..i]);
                result.push_str(COLOR_RESET);
            }

            c if c == '_' || c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i] == '_' || chars[i].is_ascii_alphanumeric()) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                match keyword(&word) {
                    Some(TokenType::True) | Some(TokenType::False) | Some(TokenType::Nil) => {
                        result.push_str(COLOR_LITERAL);
                        result.push_str(&word);
                        result.push_str(COLOR_RESET);
                    }
                    Some(_) => {
                        result.push_str(COLOR_KEYWORD);
                        result.push_str(&word);
                        result.push_str(COLOR_RESET);
                    }
                    None => result.push_str(&word),
                }
            }

            c @ ('(' | ')' | '{' | '}') => {
                result.push_str(COLOR_BRACKET);
                result.push(c);
                result.push_str(COLOR_RESET);
                i += 1;
            }

            c => {
                result.push(c);
                i += 1;
            }
        }
    }

    result
}
