use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    // Every pattern is anchored so it can only match at the current position
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(&format!("^(?:{})", pattern)).unwrap(),
            handler,
        }
    }
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern::new("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
                RegexPattern::new("[0-9]+", number_handler),
                RegexPattern::new("\\s+", skip_handler),
                RegexPattern::new("\"(?:[^\"\\\\]|\\\\.)*\"", string_handler),
                RegexPattern::new("//.*", skip_handler),
                RegexPattern::new("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
                RegexPattern::new("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
                RegexPattern::new("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
                RegexPattern::new("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
                RegexPattern::new("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
                RegexPattern::new("=>", MK_DEFAULT_HANDLER!(TokenKind::FatArrow, "=>")),
                RegexPattern::new("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
                RegexPattern::new("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
                RegexPattern::new("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
                RegexPattern::new("::", MK_DEFAULT_HANDLER!(TokenKind::ColonColon, "::")),
                RegexPattern::new(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
                RegexPattern::new(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
                RegexPattern::new("\\\\", MK_DEFAULT_HANDLER!(TokenKind::Backslash, "\\")),
                RegexPattern::new("\\+\\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
                RegexPattern::new("->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
                RegexPattern::new("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
                RegexPattern::new("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
                RegexPattern::new("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
                RegexPattern::new("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
            ],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span from the current position covering the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = match regex.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => return,
    };

    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = regex.find(lexer.remainder()).map_or(0, |m| m.end());
    lexer.advance_n(matched);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let raw = match regex.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => return,
    };
    let span = lexer.span_of(raw.len());
    lexer.advance_n(raw.len());

    let string_literal = &raw[1..raw.len() - 1];
    let mut result = String::new();
    let mut chars = string_literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek().copied() {
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('t') => {
                result.push('\t');
                chars.next();
            }
            Some('\\') => {
                result.push('\\');
                chars.next();
            }
            Some('r') => {
                result.push('\r');
                chars.next();
            }
            Some('"') => {
                result.push('"');
                chars.next();
            }
            Some('0') => {
                result.push('\0');
                chars.next();
            }
            Some('x') => {
                let mut hex = String::new();
                chars.next();

                for _ in 0..2 {
                    match chars.peek() {
                        Some(ch) if ch.is_ascii_hexdigit() => {
                            hex.push(*ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                // Only ASCII bytes, anything above 7F is kept as written
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) if byte.is_ascii() => result.push(byte as char),
                    _ => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            // Unknown escape, keep the backslash
            _ => result.push(ch),
        }
    }

    lexer.push(MK_TOKEN!(TokenKind::String, result, span));
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = match regex.find(lexer.remainder()) {
        Some(matched) => matched.as_str().to_string(),
        None => return,
    };

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);
    let span = lexer.span_of(value.len());

    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let pattern = patterns
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    lex.position(),
                ))
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));

    log::debug!("tokenized {} tokens", lex.tokens.len());
    for token in lex.tokens.iter() {
        token.debug();
    }

    Ok(lex.tokens)
}
