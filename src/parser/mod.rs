//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Program`. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Type definitions and function definitions
//! - Expression parsing (binary ops, application, binding forms, case)
//! - Type parsing for type annotations
//! - Error reporting with source positions
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod program;
pub mod types;

#[cfg(test)]
mod tests;
