#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

pub use evaluator::evaluator::evaluate;
pub use type_checker::type_checker::check;

extern crate regex;

#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexes and parses a whole source file.
pub fn parse_source(source: &str, file: Option<String>) -> Result<Program, Error> {
    let file_name = Rc::new(file.clone().unwrap_or_else(|| String::from("shell")));
    let tokens = tokenize(source.to_string(), file)?;
    parse(tokens, file_name)
}

/// Finds the line containing the byte offset `position`.
///
/// Returns the 1-based line number, the line itself and the offset inside
/// the line. An offset at the very end of the source points just past the
/// last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = "";

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
        last_line = line;
    }

    if source.is_empty() || source.ends_with('\n') {
        Some((line_number, String::new(), 0))
    } else {
        Some((line_number - 1, last_line.to_string(), last_line.len()))
    }
}

/// Renders a syntax error with the offending line and a caret under it.
///
/// ```text
/// error[UnexpectedTokenDetailed]: Unexpected token: `in`, expected an expression
/// -> main.puc
///   |
/// 3 | let a = in 4
///   | --------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "error[{}]: {}", error.get_error_name(), error);
    } else {
        let _ = writeln!(out, "error[{}]: {}", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", position.1);

    let (line, line_text, line_pos) = match get_line_at_position(source, position.0) {
        Some(found) => found,
        None => return out,
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let column = line_text
        .get(..line_pos)
        .map_or(line_pos, |before| before.chars().count());
    let arrows = column.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.len() - string.trim_start_matches(' ').len();
    (&string[start..], start)
}

#[cfg(test)]
mod tests {
    const SOURCE: &str = "Hello, world!\nfoo\n\n    Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 27).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "    Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_source() {
        assert_eq!(
            super::get_line_at_position("a\nbc", 4),
            Some((2, "bc".to_string(), 2))
        );
        assert_eq!(
            super::get_line_at_position("a\n", 2),
            Some((2, String::new(), 0))
        );
        assert_eq!(super::get_line_at_position("a", 5), None);
    }

    #[test]
    fn test_render_error() {
        let source = "let a = 1 in\n  a @ 2";
        let error = super::parse_source(source, Some("main.puc".to_string())).unwrap_err();
        let rendered = super::render_error(&error, source);

        assert_eq!(
            rendered,
            "error[UnrecognisedToken]: unrecognised token: \"@\" at 17\n\
             -> main.puc\n  \
             |\n\
             2 | a @ 2\n  \
             | --^\n"
        );
    }

    #[test]
    fn test_render_error_after_multibyte_text() {
        let source = "\"héllo\" @ 1";
        let error = super::parse_source(source, Some("main.puc".to_string())).unwrap_err();
        let rendered = super::render_error(&error, source);

        assert!(rendered.ends_with("1 | \"héllo\" @ 1\n  | --------^\n"));
    }
}
