//! Evaluation module.
//!
//! Runs a `Program` with call-by-value closure semantics:
//!
//! - Values and their structural equality
//! - Persistent local environments shared between closures
//! - A continuation-stack machine that never recurses on the host stack
//!
//! The evaluator does not consult the type checker. Every inconsistency it
//! meets at runtime is reported as a `RuntimeError`.

pub mod environment;
pub mod evaluator;
pub mod value;
