use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("type", TokenKind::Type);
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("in", TokenKind::In);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("case", TokenKind::Case);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("Int", TokenKind::Int);
        map.insert("Bool", TokenKind::Bool);
        map.insert("Text", TokenKind::Text);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==

    Or,
    And,

    Comma,
    Colon,
    ColonColon, // ::
    Arrow,      // ->
    FatArrow,   // =>
    Backslash,

    PlusPlus,
    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Type,
    Fn,
    Let,
    In,
    If,
    Then,
    Else,
    Case,
    True,
    False,
    Int,
    Bool,
    Text,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            log::trace!("{} ({})", self.kind, self.value);
        } else {
            log::trace!("{} ()", self.kind);
        }
    }
}
