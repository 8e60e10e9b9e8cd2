//! Type checking and semantic analysis module.
//!
//! This module performs static analysis over a `Program`:
//!
//! - Building lookup tables for ADTs, constructors and function signatures
//! - Checking every function body against its declared signature
//! - Inferring the type of the main expression
//! - Checking constructions, patterns and exhaustiveness of `case`
//!
//! All binders carry explicit annotations, so no unification is needed.
//! Errors are accumulated rather than returned early; every rule has a
//! fallback type so that checking can carry on after a mistake.

pub mod environment;
pub mod type_checker;

#[cfg(test)]
mod tests;
