use super::{expressions::Expr, types::Type};

/// A whole compilation unit.
///
/// Built once by the parser and never mutated afterwards; both the type
/// checker and the evaluator only ever borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub type_defs: Vec<TypeDef>,
    pub fn_defs: Vec<FnDef>,
    pub main: Expr,
}

impl Program {
    pub fn new(type_defs: Vec<TypeDef>, fn_defs: Vec<FnDef>, main: Expr) -> Self {
        Program {
            type_defs,
            fn_defs,
            main,
        }
    }
}

/// Algebraic data type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub constructors: Vec<Constructor>,
}

/// A single constructor of an ADT. Fields are positional.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    pub name: String,
    pub fields: Vec<Type>,
}

/// Top level function definition
///
/// Behaves like a binding of `\param : param_type => body` with the declared
/// type `param_type -> result_type`. Every function is visible to its own body
/// and to every other function.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub name: String,
    pub param: String,
    pub param_type: Type,
    pub result_type: Type,
    pub body: Expr,
}

impl FnDef {
    /// The declared type of the function as a whole.
    pub fn signature(&self) -> Type {
        Type::function(self.param_type.clone(), self.result_type.clone())
    }
}
