//! Token kinds produced by `scanner::Scanner`, grounded on
//! `original_source/prolog/token.py`'s `TokenType`.

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Atom(String),
    Variable(String),
    Number(f64),

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Bar,
    Comma,
    Dot,
    ColonMinus,

    Plus,
    Minus,
    Star,
    Slash,

    EqualEqual,
    EqualSlash,
    LessEqual,
    Less,
    GreaterEqual,
    Greater,

    Cut,

    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}
