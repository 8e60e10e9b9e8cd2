/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Top level definitions (program, type definitions, functions)
/// - expressions: Expressions, patterns, literals and operators
/// - types: Type annotations and the types computed by the checker
pub mod ast;
pub mod expressions;
pub mod types;
