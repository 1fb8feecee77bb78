//! Hand-written character scanner, grounded on
//! `original_source/prolog/scanner.py`. Supports `%` line comments, `/* */`
//! block comments, `'...'`-quoted atoms, and the `spec.md` §6 list syntax
//! tokens (`[`, `]`, `|`).
//!
//! Built-in goal names (`fail`, `write`, `nl`, `tab`, `retract`, `asserta`,
//! `assertz`) are not distinct token kinds here — they scan as ordinary
//! atoms, exactly like any other functor name, and are only given meaning
//! later by `resolver::solve` matching on the functor string. `is` is the
//! one exception the parser treats specially, as the infix spelling of the
//! `Arithmetic` term.

use crate::error::EngineError;
use crate::syntax::token::{Token, TokenKind};

pub struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    /// Whether the next significant character is in "operand expected"
    /// position (start of an expression, just past an operator, `(`, `,`,
    /// or `:-`) rather than "operator expected" position (just scanned a
    /// number/variable/atom/`)`/`]`). Resolves the unary-minus ambiguity
    /// `DESIGN.md` documents: `-` only starts a negative number literal
    /// while an operand is expected and a digit follows immediately.
    expect_operand: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
            expect_operand: true,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, EngineError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> u8 {
        *self.src.get(self.pos).unwrap_or(&0)
    }

    fn peek_next(&self) -> u8 {
        *self.src.get(self.pos + 1).unwrap_or(&0)
    }

    fn advance(&mut self) -> u8 {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' => {
                    self.pos += 1;
                }
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                }
                b'%' => {
                    while self.peek() != b'\n' && self.peek() != 0 {
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_next() == b'*' => {
                    self.pos += 2;
                    while !(self.peek() == b'*' && self.peek_next() == b'/') && self.peek() != 0 {
                        if self.peek() == b'\n' {
                            self.line += 1;
                        }
                        self.pos += 1;
                    }
                    self.pos += 2;
                }
                _ => break,
            }
        }
    }

    fn make(&mut self, kind: TokenKind, operand_next: bool) -> Token {
        self.expect_operand = operand_next;
        Token {
            kind,
            line: self.line,
        }
    }

    fn next_token(&mut self) -> Result<Token, EngineError> {
        self.skip_trivia();
        let line = self.line;
        if self.peek() == 0 {
            return Ok(Token {
                kind: TokenKind::Eof,
                line,
            });
        }
        let c = self.advance();
        match c {
            b'(' => Ok(self.make(TokenKind::LeftParen, true)),
            b')' => Ok(self.make(TokenKind::RightParen, false)),
            b'[' => Ok(self.make(TokenKind::LeftBracket, true)),
            b']' => Ok(self.make(TokenKind::RightBracket, false)),
            b'|' => Ok(self.make(TokenKind::Bar, true)),
            b',' => Ok(self.make(TokenKind::Comma, true)),
            b'!' => Ok(self.make(TokenKind::Cut, false)),
            b'+' => Ok(self.make(TokenKind::Plus, true)),
            b'*' => Ok(self.make(TokenKind::Star, true)),
            b':' if self.peek() == b'-' => {
                self.pos += 1;
                Ok(self.make(TokenKind::ColonMinus, true))
            }
            b'-' => {
                if self.expect_operand && self.peek().is_ascii_digit() {
                    self.complete_number(true, line)
                } else {
                    Ok(self.make(TokenKind::Minus, true))
                }
            }
            b'/' if self.peek() == b'=' => {
                self.pos += 1;
                Ok(self.make(TokenKind::EqualSlash, true))
            }
            b'/' => Ok(self.make(TokenKind::Slash, true)),
            b'=' if self.peek() == b'=' => {
                self.pos += 1;
                Ok(self.make(TokenKind::EqualEqual, true))
            }
            b'=' if self.peek() == b'<' => {
                self.pos += 1;
                Ok(self.make(TokenKind::LessEqual, true))
            }
            b'<' => Ok(self.make(TokenKind::Less, true)),
            b'>' if self.peek() == b'=' => {
                self.pos += 1;
                Ok(self.make(TokenKind::GreaterEqual, true))
            }
            b'>' => Ok(self.make(TokenKind::Greater, true)),
            b'.' if !self.peek().is_ascii_digit() => Ok(self.make(TokenKind::Dot, true)),
            b'\'' => self.complete_quoted_atom(line),
            b'_' if !is_ident_continue(self.peek()) => {
                Ok(self.make(TokenKind::Variable("_".to_string()), false))
            }
            c if c.is_ascii_digit() => {
                self.pos -= 1;
                self.complete_number(false, line)
            }
            c if c == b'_' || c.is_ascii_uppercase() => {
                self.pos -= 1;
                self.complete_identifier(line, true)
            }
            c if c.is_ascii_lowercase() => {
                self.pos -= 1;
                self.complete_identifier(line, false)
            }
            other => Err(EngineError::Syntax(format!(
                "unexpected character `{}` on line {line}",
                other as char
            ))),
        }
    }

    fn complete_number(&mut self, negative: bool, line: usize) -> Result<Token, EngineError> {
        let start = self.pos;
        while self.peek().is_ascii_digit() {
            self.pos += 1;
        }
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.pos += 1;
            while self.peek().is_ascii_digit() {
                self.pos += 1;
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap();
        let mut value: f64 = text.parse().map_err(|_| {
            EngineError::Syntax(format!("malformed number `{text}` on line {line}"))
        })?;
        if negative {
            value = -value;
        }
        Ok(self.make(TokenKind::Number(value), false))
    }

    fn complete_identifier(&mut self, line: usize, is_variable: bool) -> Result<Token, EngineError> {
        let start = self.pos;
        while is_ident_continue(self.peek()) {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap().to_string();
        let _ = line;
        if is_variable {
            Ok(self.make(TokenKind::Variable(text), false))
        } else {
            Ok(self.make(TokenKind::Atom(text), false))
        }
    }

    fn complete_quoted_atom(&mut self, line: usize) -> Result<Token, EngineError> {
        let start = self.pos;
        while self.peek() != b'\'' {
            if self.peek() == 0 {
                return Err(EngineError::Syntax(format!(
                    "unterminated quoted atom starting on line {line}"
                )));
            }
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap().to_string();
        self.pos += 1;
        Ok(self.make(TokenKind::Atom(text), false))
    }
}

fn is_ident_continue(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}
