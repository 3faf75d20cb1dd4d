// ABOUTME: Scanner module converting Lox source text into a token sequence

use crate::error::ErrorReporter;
use crate::token::{keyword, Literal, Token, TokenType};

/// Walks the source byte-by-byte and emits tokens using maximal munch.
///
/// Tracks the byte offset where the current token started, the cursor, and
/// the current 1-based line. Lexical errors are reported through the sink and
/// scanning continues, so one pass surfaces every malformed token.
pub struct Scanner<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Consumes the scanner and returns the token sequence, terminated by a
    /// synthetic end-of-file token.
    pub fn scan_tokens(mut self, reporter: &mut ErrorReporter) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(reporter);
        }

        self.tokens
            .push(Token::new(TokenType::Eof, String::new(), None, self.line));
        self.tokens
    }

    fn scan_token(&mut self, reporter: &mut ErrorReporter) {
        let c = self.advance();
        match c {
            b'(' => self.add_token(TokenType::LeftParen),
            b')' => self.add_token(TokenType::RightParen),
            b'{' => self.add_token(TokenType::LeftBrace),
            b'}' => self.add_token(TokenType::RightBrace),
            b',' => self.add_token(TokenType::Comma),
            b'.' => self.add_token(TokenType::Dot),
            b'-' => self.add_token(TokenType::Minus),
            b'+' => self.add_token(TokenType::Plus),
            b';' => self.add_token(TokenType::Semicolon),
            b'*' => self.add_token(TokenType::Star),
            b'!' => {
                let kind = if self.matches(b'=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                };
                self.add_token(kind);
            }
            b'=' => {
                let kind = if self.matches(b'=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                };
                self.add_token(kind);
            }
            b'<' => {
                let kind = if self.matches(b'=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                };
                self.add_token(kind);
            }
            b'>' => {
                let kind = if self.matches(b'=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                };
                self.add_token(kind);
            }
            b'/' => {
                if self.matches(b'/') {
                    // A line comment runs to the end of the line
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.current += 1;
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            b' ' | b'\r' | b'\t' => {}
            b'\n' => self.line += 1,
            b'"' => self.string(reporter),
            b'0'..=b'9' => self.number(),
            c if c == b'_' || c.is_ascii_alphabetic() => self.identifier(),
            _ => {
                // Skip the continuation bytes of a multi-byte character so a
                // single stray glyph produces a single diagnostic
                while !self.is_at_end() && (self.peek() & 0b1100_0000) == 0b1000_0000 {
                    self.current += 1;
                }
                reporter.error(self.line, "Unexpected character.");
            }
        }
    }

    /// Strings may span lines; embedded newlines advance the line counter.
    fn string(&mut self, reporter: &mut ErrorReporter) {
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.current += 1;
        }

        if self.is_at_end() {
            reporter.error(self.line, "Unterminated string.");
            return;
        }

        // Closing quote
        self.current += 1;

        // The stored literal is the content without the surrounding quotes
        let value = self.source[self.start + 1..self.current - 1].to_string();
        self.add_literal(TokenType::String, Some(Literal::String(value)));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.current += 1;
        }

        // A fractional part needs a digit after the dot
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.current += 1;
            while self.peek().is_ascii_digit() {
                self.current += 1;
            }
        }

        let value: f64 = self.source[self.start..self.current]
            .parse()
            .unwrap_or_default();
        self.add_literal(TokenType::Number, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while is_identifier_byte(self.peek()) {
            self.current += 1;
        }

        let text = &self.source[self.start..self.current];
        let kind = keyword(text).unwrap_or(TokenType::Identifier);
        self.add_token(kind);
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.source.as_bytes()[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn advance(&mut self) -> u8 {
        let c = self.source.as_bytes()[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            b'\0'
        } else {
            self.source.as_bytes()[self.current]
        }
    }

    fn peek_next(&self) -> u8 {
        if self.current + 1 >= self.source.len() {
            b'\0'
        } else {
            self.source.as_bytes()[self.current + 1]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn add_token(&mut self, kind: TokenType) {
        self.add_literal(kind, None);
    }

    fn add_literal(&mut self, kind: TokenType, literal: Option<Literal>) {
        let lexeme = self.source[self.start..self.current].to_string();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }
}

fn is_identifier_byte(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, ErrorReporter) {
        let mut reporter = ErrorReporter::new();
        let tokens = Scanner::new(source).scan_tokens(&mut reporter);
        (tokens, reporter)
    }

    fn kinds(source: &str) -> Vec<TokenType> {
        scan(source).0.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source_yields_eof() {
        let (tokens, reporter) = scan("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::Eof);
        assert!(!reporter.had_error);
    }

    #[test]
    fn test_punctuation_and_operators() {
        assert_eq!(
            kinds("(){},.-+;*/"),
            vec![
                TokenType::LeftParen,
                TokenType::RightParen,
                TokenType::LeftBrace,
                TokenType::RightBrace,
                TokenType::Comma,
                TokenType::Dot,
                TokenType::Minus,
                TokenType::Plus,
                TokenType::Semicolon,
                TokenType::Star,
                TokenType::Slash,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_maximal_munch_on_two_char_operators() {
        assert_eq!(
            kinds("! != = == < <= > >="),
            vec![
                TokenType::Bang,
                TokenType::BangEqual,
                TokenType::Equal,
                TokenType::EqualEqual,
                TokenType::Less,
                TokenType::LessEqual,
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_line_comment_emits_no_token() {
        let (tokens, _) = scan("// nothing here\nvar");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenType::Var);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_number_literals() {
        let (tokens, _) = scan("12 3.25");
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[0].lexeme, "12");
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.25)));
    }

    #[test]
    fn test_no_leading_or_trailing_dot_numbers() {
        // "1." lexes as the number 1 followed by a dot
        assert_eq!(
            kinds("1."),
            vec![TokenType::Number, TokenType::Dot, TokenType::Eof]
        );
        // ".5" lexes as a dot followed by the number 5
        assert_eq!(
            kinds(".5"),
            vec![TokenType::Dot, TokenType::Number, TokenType::Eof]
        );
    }

    #[test]
    fn test_string_literal_strips_quotes() {
        let (tokens, _) = scan("\"hi there\"");
        assert_eq!(tokens[0].kind, TokenType::String);
        assert_eq!(tokens[0].lexeme, "\"hi there\"");
        assert_eq!(
            tokens[0].literal,
            Some(Literal::String("hi there".to_string()))
        );
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let (tokens, reporter) = scan("\"one\ntwo\"\nvar");
        assert!(!reporter.had_error);
        assert_eq!(tokens[0].kind, TokenType::String);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_unterminated_string_reports_and_continues() {
        let (tokens, reporter) = scan("\"oops");
        assert!(reporter.had_error);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::Eof);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let (tokens, _) = scan("var language = lox;");
        assert_eq!(tokens[0].kind, TokenType::Var);
        assert_eq!(tokens[1].kind, TokenType::Identifier);
        assert_eq!(tokens[1].lexeme, "language");
        assert_eq!(tokens[3].kind, TokenType::Identifier);
        assert_eq!(tokens[3].lexeme, "lox");
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        // Maximal munch: "orchid" is one identifier, not "or" + "chid"
        let (tokens, _) = scan("orchid");
        assert_eq!(tokens[0].kind, TokenType::Identifier);
        assert_eq!(tokens[0].lexeme, "orchid");
    }

    #[test]
    fn test_underscore_leading_identifier() {
        let (tokens, _) = scan("_private_1");
        assert_eq!(tokens[0].kind, TokenType::Identifier);
        assert_eq!(tokens[0].lexeme, "_private_1");
    }

    #[test]
    fn test_unexpected_character_reports_and_continues() {
        let (tokens, reporter) = scan("var @ x");
        assert!(reporter.had_error);
        assert_eq!(tokens[0].kind, TokenType::Var);
        assert_eq!(tokens[1].kind, TokenType::Identifier);
    }

    #[test]
    fn test_multibyte_character_single_diagnostic() {
        let (tokens, reporter) = scan("§");
        assert!(reporter.had_error);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::Eof);
    }

    #[test]
    fn test_lexemes_reproduce_the_source() {
        // Concatenating lexemes recovers the source once whitespace is
        // stripped
        let source = "var x = (1 + 2.5) >= y;";
        let (tokens, _) = scan(source);
        let joined: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(joined, source.replace(' ', ""));
    }

    #[test]
    fn test_line_tracking() {
        let (tokens, _) = scan("var\nx\n=\n1;");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[2].line, 3);
        assert_eq!(tokens[3].line, 4);
    }
}
