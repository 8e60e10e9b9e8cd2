//! Type system definitions for the AST.
//!
//! This module defines the types of the language:
//!
//! - Primitive types (integers, booleans, text)
//! - Named algebraic data types
//! - Function types
//!
//! The same representation is used for annotations written in source and for
//! the types computed by the type checker. Equality is structural.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Integer,
    Text,
    /// A user defined ADT, referred to by name
    Constructor(String),
    Function(Box<Type>, Box<Type>),
    /// Placeholder produced by the type checker after an error.
    /// Never written in source.
    Unknown,
}

impl Type {
    pub fn function(argument: Type, result: Type) -> Self {
        Type::Function(Box::new(argument), Box::new(result))
    }

    pub fn adt(name: &str) -> Self {
        Type::Constructor(name.to_string())
    }

    /// Checks if the type is compatible with another type.
    ///
    /// Compatible means structurally equal, except that `Unknown` is
    /// compatible with anything (at any depth).
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Unknown, _) | (_, Type::Unknown) => true,
            (Type::Function(a1, r1), Type::Function(a2, r2)) => {
                a1.is_compatible_with(a2) && r1.is_compatible_with(r2)
            }
            (a, b) => a == b,
        }
    }

    /// Names of every ADT mentioned anywhere in the type.
    pub fn referenced_adts(&self) -> Vec<&str> {
        match self {
            Type::Constructor(name) => vec![name.as_str()],
            Type::Function(argument, result) => {
                let mut names = argument.referenced_adts();
                names.extend(result.referenced_adts());
                names
            }
            Type::Bool | Type::Integer | Type::Text | Type::Unknown => vec![],
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bool => write!(f, "Bool"),
            Type::Integer => write!(f, "Int"),
            Type::Text => write!(f, "Text"),
            Type::Constructor(name) => write!(f, "{}", name),
            Type::Function(argument, result) => {
                if let Type::Function(..) = **argument {
                    write!(f, "({}) -> {}", argument, result)
                } else {
                    write!(f, "{} -> {}", argument, result)
                }
            }
            Type::Unknown => write!(f, "?"),
        }
    }
}
