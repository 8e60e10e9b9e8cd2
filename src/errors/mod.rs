//! Error types and error handling for the compiler.
//!
//! This module defines the three error families of the language:
//!
//! - Syntax errors (`Error`) with source position information, fail fast
//! - Type errors (`TypeError`), accumulated by the type checker
//! - Runtime errors (`RuntimeError`), terminate evaluation
//!
//! The three families are never converted into each other.

pub mod errors;
