use std::fmt::Display;

use super::types::Type;

/// Expression
///
/// The closed set of expression forms. Sub-expressions are boxed; the tree is
/// acyclic and owned by its `Program`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(String),
    Lit(Primitive),
    Lambda {
        param: String,
        param_type: Type,
        body: Box<Expr>,
    },
    App {
        function: Box<Expr>,
        argument: Box<Expr>,
    },
    Construction {
        type_name: String,
        constructor: String,
        fields: Vec<Expr>,
    },
    Case {
        scrutinee: Box<Expr>,
        branches: Vec<CaseBranch>,
    },
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Let {
        name: String,
        bound: Box<Expr>,
        body: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Operator,
        right: Box<Expr>,
    },
}

// Shorthand constructors, mostly used by the parser and by tests
impl Expr {
    pub fn var(name: &str) -> Self {
        Expr::Var(name.to_string())
    }

    pub fn int(value: i64) -> Self {
        Expr::Lit(Primitive::Integer(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Lit(Primitive::Bool(value))
    }

    pub fn text(value: &str) -> Self {
        Expr::Lit(Primitive::Text(value.to_string()))
    }

    pub fn lambda(param: &str, param_type: Type, body: Expr) -> Self {
        Expr::Lambda {
            param: param.to_string(),
            param_type,
            body: Box::new(body),
        }
    }

    pub fn app(function: Expr, argument: Expr) -> Self {
        Expr::App {
            function: Box::new(function),
            argument: Box::new(argument),
        }
    }

    pub fn construction(type_name: &str, constructor: &str, fields: Vec<Expr>) -> Self {
        Expr::Construction {
            type_name: type_name.to_string(),
            constructor: constructor.to_string(),
            fields,
        }
    }

    pub fn case(scrutinee: Expr, branches: Vec<CaseBranch>) -> Self {
        Expr::Case {
            scrutinee: Box::new(scrutinee),
            branches,
        }
    }

    pub fn if_(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn let_(name: &str, bound: Expr, body: Expr) -> Self {
        Expr::Let {
            name: name.to_string(),
            bound: Box::new(bound),
            body: Box::new(body),
        }
    }

    pub fn binary(left: Expr, operator: Operator, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub pattern: Pattern,
    pub body: Expr,
}

impl CaseBranch {
    pub fn new(pattern: Pattern, body: Expr) -> Self {
        CaseBranch { pattern, body }
    }
}

/// Flat constructor pattern: `Type::Constructor(a, b)`.
///
/// Patterns do not nest, every binder is a plain name.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub type_name: String,
    pub constructor: String,
    pub binders: Vec<String>,
}

impl Pattern {
    pub fn new(type_name: &str, constructor: &str, binders: &[&str]) -> Self {
        Pattern {
            type_name: type_name.to_string(),
            constructor: constructor.to_string(),
            binders: binders.iter().map(|b| b.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Integer(i64),
    Bool(bool),
    Text(String),
}

impl Primitive {
    pub fn get_type(&self) -> Type {
        match self {
            Primitive::Integer(_) => Type::Integer,
            Primitive::Bool(_) => Type::Bool,
            Primitive::Text(_) => Type::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Or,
    And,
    Concat,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Eq => "==",
            Operator::Or => "||",
            Operator::And => "&&",
            Operator::Concat => "++",
        };
        write!(f, "{}", symbol)
    }
}
