use std::rc::Rc;
use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use tracing::trace;

use crate::error::{Diagnostics, ScanError};
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

/// Converts a source string into a finite token sequence terminated by `EOF`.
///
/// Walks the source once, character by character, through a
/// [`peekmore::PeekMoreIterator`] so `peek`/`peek_next` need no hand-rolled
/// lookahead buffer.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start_column: usize,
    current_column: usize,
    line: usize,
    diagnostics: Rc<Diagnostics>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, diagnostics: Rc<Diagnostics>) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            start_column: 0,
            current_column: 0,
            line: 0,
            diagnostics,
        }
    }

    /// Scans the whole source and returns its tokens, `EOF` last.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start_column = self.current_column;
            self.scan_token();
        }

        self.tokens.push(Token::new(
            Type::EOF,
            String::new(),
            None,
            Location::new(self.line, self.current_column),
        ));

        trace!(count = self.tokens.len(), "scan complete");
        self.tokens
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        let c = self.source.next().expect("advance past end of source");
        self.current_column += 1;
        c
    }

    /// Returns the next character without consuming it, or `'\0'` at EOF.
    fn peek(&mut self) -> char {
        self.source.peek().copied().unwrap_or('\0')
    }

    /// Returns the character after next without consuming anything.
    fn peek_next(&mut self) -> char {
        self.source.peek_next().copied().unwrap_or('\0')
    }

    /// Consumes the next character if it equals `expected`.
    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn start_location(&self) -> Location {
        Location::new(self.line, self.start_column)
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.start_location()));
    }

    fn string(&mut self) {
        let start = self.start_location();
        let mut value = String::new();

        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            value.push(self.advance());
        }

        if self.is_at_end() {
            self.diagnostics.report_scan(&ScanError {
                location: start,
                message: "Unterminated string.".to_string(),
            });
            return;
        }

        self.advance(); // closing quote

        // Literal excludes the quotes, lexeme does too (matches the book).
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    fn number(&mut self) {
        let mut value = String::new();

        while self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            value.push(self.advance()); // the '.'
            while self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        let number: f64 = value.parse().expect("scanned digits to parse as f64");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    fn identifier(&mut self) {
        let mut value = String::new();

        while self.peek().is_alphanumeric() || self.peek() == '_' {
            value.push(self.advance());
        }

        let kind = keyword(&value).unwrap_or(Type::Identifier);
        self.add_token(kind, value, None);
    }

    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            '(' => { self.advance(); self.add_token(Type::LeftParen, c.to_string(), None); }
            ')' => { self.advance(); self.add_token(Type::RightParen, c.to_string(), None); }
            '{' => { self.advance(); self.add_token(Type::LeftBrace, c.to_string(), None); }
            '}' => { self.advance(); self.add_token(Type::RightBrace, c.to_string(), None); }
            ',' => { self.advance(); self.add_token(Type::Comma, c.to_string(), None); }
            '.' => { self.advance(); self.add_token(Type::Dot, c.to_string(), None); }
            '-' => { self.advance(); self.add_token(Type::Minus, c.to_string(), None); }
            '+' => { self.advance(); self.add_token(Type::Plus, c.to_string(), None); }
            ';' => { self.advance(); self.add_token(Type::Semicolon, c.to_string(), None); }
            '*' => { self.advance(); self.add_token(Type::Star, c.to_string(), None); }

            '!' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::BangEqual, "!=".to_string(), None);
                } else {
                    self.add_token(Type::Bang, "!".to_string(), None);
                }
            }
            '=' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::EqualEqual, "==".to_string(), None);
                } else {
                    self.add_token(Type::Equal, "=".to_string(), None);
                }
            }
            '<' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::LessEqual, "<=".to_string(), None);
                } else {
                    self.add_token(Type::Less, "<".to_string(), None);
                }
            }
            '>' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::GreaterEqual, ">=".to_string(), None);
                } else {
                    self.add_token(Type::Greater, ">".to_string(), None);
                }
            }
            '/' => {
                self.advance();
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment();
                } else {
                    self.add_token(Type::Slash, "/".to_string(), None);
                }
            }

            ' ' | '\r' | '\t' => { self.advance(); }

            '\n' => {
                self.advance();
                self.line += 1;
                self.current_column = 0;
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                self.diagnostics.report_scan(&ScanError {
                    location: self.start_location(),
                    message: format!("Unexpected character '{c}'."),
                });
            }
        }
    }

    fn block_comment(&mut self) {
        // Consumes until a literal `*/`. Intentionally not nesting-aware,
        // matching the book's own block-comment semantics.
        loop {
            if self.is_at_end() {
                self.diagnostics.report_scan(&ScanError {
                    location: self.start_location(),
                    message: "Unterminated block comment.".to_string(),
                });
                return;
            }

            if self.peek() == '\n' {
                self.advance();
                self.line += 1;
                self.current_column = 0;
                continue;
            }

            if self.peek() == '*' {
                self.advance();
                if self.peek() == '/' {
                    self.advance();
                    return;
                }
            } else {
                self.advance();
            }
        }
    }
}

fn keyword(identifier: &str) -> Option<Type> {
    Some(match identifier {
        "and" => Type::And,
        "class" => Type::Class,
        "else" => Type::Else,
        "false" => Type::False,
        "for" => Type::For,
        "fun" => Type::Fun,
        "if" => Type::If,
        "nil" => Type::Nil,
        "or" => Type::Or,
        "print" => Type::Print,
        "return" => Type::Return,
        "super" => Type::Super,
        "this" => Type::This,
        "true" => Type::True,
        "var" => Type::Var,
        "while" => Type::While,
        _ => return None,
    })
}
