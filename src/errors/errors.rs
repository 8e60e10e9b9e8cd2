use std::fmt::Display;

use thiserror::Error;

use crate::{
    ast::{expressions::Operator, types::Type},
    Position,
};

/// A syntax error produced by the lexer or the parser, pointing into the source.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
}

/// Which namespace a duplicate definition collided in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Type,
    Constructor,
    Function,
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Namespace::Type => write!(f, "type"),
            Namespace::Constructor => write!(f, "constructor"),
            Namespace::Function => write!(f, "function"),
        }
    }
}

/// Static errors. The type checker collects these and never stops at the first one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("{namespace} `{name}` is defined more than once")]
    DuplicateDefinition { namespace: Namespace, name: String },
    #[error("variable `{name}` is not bound")]
    UnboundVariable { name: String },
    #[error("expected a function, found `{found}`")]
    NotAFunction { found: Type },
    #[error("argument type does not match: expected `{expected}`, found `{found}`")]
    ArgumentTypeMismatch { expected: Type, found: Type },
    #[error("`{type_name}::{constructor}` has {expected} fields, found {found}")]
    ArityMismatch {
        type_name: String,
        constructor: String,
        expected: usize,
        found: usize,
    },
    #[error("field {index} of `{type_name}::{constructor}` expects `{expected}`, found `{found}`")]
    FieldTypeMismatch {
        type_name: String,
        constructor: String,
        index: usize,
        expected: Type,
        found: Type,
    },
    #[error("expected a value of an ADT, found `{found}`")]
    NotAnADT { found: Type },
    #[error("pattern of type `{found}` cannot match a value of type `{expected}`")]
    PatternTypeMismatch { expected: String, found: String },
    #[error("branches have different types: `{expected}` and `{found}`")]
    BranchTypeMismatch { expected: Type, found: Type },
    #[error("`{type_name}::{constructor}` is not covered")]
    NonExhaustiveMatch {
        type_name: String,
        constructor: String,
    },
    #[error("`{type_name}::{constructor}` is matched more than once")]
    DuplicateBranch {
        type_name: String,
        constructor: String,
    },
    #[error("condition must be `Bool`, found `{found}`")]
    ConditionNotBool { found: Type },
    #[error("operator `{operator}` cannot be applied to `{left}` and `{right}`")]
    OperandTypeMismatch {
        operator: Operator,
        left: Type,
        right: Type,
    },
    #[error("unknown type `{name}`")]
    UnknownType { name: String },
    #[error("unknown constructor `{type_name}::{constructor}`")]
    UnknownConstructor {
        type_name: String,
        constructor: String,
    },
    #[error("function `{function}` should return `{expected}`, but its body has type `{found}`")]
    ReturnTypeMismatch {
        function: String,
        expected: Type,
        found: Type,
    },
}

impl TypeError {
    pub fn get_error_name(&self) -> &str {
        match self {
            TypeError::DuplicateDefinition { .. } => "DuplicateDefinition",
            TypeError::UnboundVariable { .. } => "UnboundVariable",
            TypeError::NotAFunction { .. } => "NotAFunction",
            TypeError::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            TypeError::ArityMismatch { .. } => "ArityMismatch",
            TypeError::FieldTypeMismatch { .. } => "FieldTypeMismatch",
            TypeError::NotAnADT { .. } => "NotAnADT",
            TypeError::PatternTypeMismatch { .. } => "PatternTypeMismatch",
            TypeError::BranchTypeMismatch { .. } => "BranchTypeMismatch",
            TypeError::NonExhaustiveMatch { .. } => "NonExhaustiveMatch",
            TypeError::DuplicateBranch { .. } => "DuplicateBranch",
            TypeError::ConditionNotBool { .. } => "ConditionNotBool",
            TypeError::OperandTypeMismatch { .. } => "OperandTypeMismatch",
            TypeError::UnknownType { .. } => "UnknownType",
            TypeError::UnknownConstructor { .. } => "UnknownConstructor",
            TypeError::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
        }
    }
}

/// Evaluation failures. The first one ends evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("variable `{name}` is not bound")]
    UnboundVariable { name: String },
    #[error("cannot apply {found}, it is not a function")]
    ApplyNonFunction { found: String },
    #[error("cannot match on {found}, it is not an ADT value")]
    NotAnADT { found: String },
    #[error("no branch matches `{type_name}::{constructor}`")]
    NonExhaustiveMatchAtRuntime {
        type_name: String,
        constructor: String,
    },
    #[error("pattern for `{type_name}::{constructor}` binds {expected} names, the value has {found} fields")]
    PatternArityMismatch {
        type_name: String,
        constructor: String,
        expected: usize,
        found: usize,
    },
    #[error("condition evaluated to {found}, expected a boolean")]
    ConditionNotBool { found: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("operator `{operator}` cannot be applied to {left} and {right}")]
    OperandTypeMismatch {
        operator: Operator,
        left: String,
        right: String,
    },
}

impl RuntimeError {
    pub fn get_error_name(&self) -> &str {
        match self {
            RuntimeError::UnboundVariable { .. } => "UnboundVariable",
            RuntimeError::ApplyNonFunction { .. } => "ApplyNonFunction",
            RuntimeError::NotAnADT { .. } => "NotAnADT",
            RuntimeError::NonExhaustiveMatchAtRuntime { .. } => "NonExhaustiveMatchAtRuntime",
            RuntimeError::PatternArityMismatch { .. } => "PatternArityMismatch",
            RuntimeError::ConditionNotBool { .. } => "ConditionNotBool",
            RuntimeError::DivisionByZero => "DivisionByZero",
            RuntimeError::OperandTypeMismatch { .. } => "OperandTypeMismatch",
        }
    }
}
