use std::collections::HashSet;

use crate::{
    ast::{
        ast::{FnDef, Program},
        expressions::{CaseBranch, Expr, Operator},
        types::Type,
    },
    errors::errors::TypeError,
};

use super::environment::StaticEnvironment;

/// Checks a whole program.
///
/// Returns the type of the main expression together with every error found,
/// in traversal order. Checking never stops early: after an error the
/// checker continues with a best-effort type (often `Type::Unknown`).
pub fn check(program: &Program) -> (Type, Vec<TypeError>) {
    let (statics, errors) = StaticEnvironment::build(program);
    let mut type_checker = TypeChecker::new(statics, errors);

    for fn_def in program.fn_defs.iter() {
        type_checker.check_fn_def(fn_def);
    }

    let ty = type_checker.infer(&program.main);
    log::debug!(
        "type checking finished: {} with {} errors",
        ty,
        type_checker.errors.len()
    );

    (ty, type_checker.errors)
}

#[derive(Debug)]
pub struct TypeChecker {
    pub statics: StaticEnvironment,
    pub errors: Vec<TypeError>,
    /// Local bindings, innermost last. Shadowing is resolved by searching from the back.
    locals: Vec<(String, Type)>,
}

impl TypeChecker {
    pub fn new(statics: StaticEnvironment, errors: Vec<TypeError>) -> Self {
        TypeChecker {
            statics,
            errors,
            locals: vec![],
        }
    }

    fn error(&mut self, error: TypeError) {
        log::trace!("type error: {}", error);
        self.errors.push(error);
    }

    pub fn fetch_variable_type(&self, name: &str) -> Option<Type> {
        self.locals
            .iter()
            .rev()
            .find(|(local, _)| local == name)
            .map(|(_, ty)| ty.clone())
            .or_else(|| self.statics.get_function(name).cloned())
    }

    /// Infers `body` with `bindings` in scope, then drops them again.
    fn infer_with(&mut self, bindings: Vec<(String, Type)>, body: &Expr) -> Type {
        let count = bindings.len();
        self.locals.extend(bindings);
        let ty = self.infer(body);
        self.locals.truncate(self.locals.len() - count);
        ty
    }

    pub fn check_fn_def(&mut self, fn_def: &FnDef) {
        log::debug!("checking function {} : {}", fn_def.name, fn_def.signature());

        let body_type = self.infer_with(
            vec![(fn_def.param.clone(), fn_def.param_type.clone())],
            &fn_def.body,
        );

        if !fn_def.result_type.is_compatible_with(&body_type) {
            self.error(TypeError::ReturnTypeMismatch {
                function: fn_def.name.clone(),
                expected: fn_def.result_type.clone(),
                found: body_type,
            });
        }
    }

    pub fn infer(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Var(name) => match self.fetch_variable_type(name) {
                Some(ty) => ty,
                None => {
                    self.error(TypeError::UnboundVariable { name: name.clone() });
                    Type::Unknown
                }
            },
            Expr::Lit(primitive) => primitive.get_type(),
            Expr::Lambda {
                param,
                param_type,
                body,
            } => {
                for error in self.statics.validate_type(param_type) {
                    self.error(error);
                }

                let body_type = self.infer_with(vec![(param.clone(), param_type.clone())], body);
                Type::function(param_type.clone(), body_type)
            }
            Expr::App { function, argument } => {
                let (expected, result) = match self.infer(function) {
                    Type::Function(expected, result) => (*expected, *result),
                    Type::Unknown => (Type::Unknown, Type::Unknown),
                    other => {
                        self.error(TypeError::NotAFunction { found: other });
                        (Type::Unknown, Type::Unknown)
                    }
                };

                let argument_type = self.infer(argument);
                if !expected.is_compatible_with(&argument_type) {
                    self.error(TypeError::ArgumentTypeMismatch {
                        expected,
                        found: argument_type,
                    });
                }

                // The declared result is used even for a bad argument
                result
            }
            Expr::Construction {
                type_name,
                constructor,
                fields,
            } => self.infer_construction(type_name, constructor, fields),
            Expr::Case {
                scrutinee,
                branches,
            } => self.infer_case(scrutinee, branches),
            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition_type = self.infer(condition);
                if !Type::Bool.is_compatible_with(&condition_type) {
                    self.error(TypeError::ConditionNotBool {
                        found: condition_type,
                    });
                }

                let then_type = self.infer(then_branch);
                let else_type = self.infer(else_branch);
                if !then_type.is_compatible_with(&else_type) {
                    self.error(TypeError::BranchTypeMismatch {
                        expected: then_type.clone(),
                        found: else_type,
                    });
                }

                then_type
            }
            Expr::Let { name, bound, body } => {
                let bound_type = self.infer(bound);
                self.infer_with(vec![(name.clone(), bound_type)], body)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left_type = self.infer(left);
                let right_type = self.infer(right);
                self.check_operator(*operator, left_type, right_type)
            }
        }
    }

    fn infer_construction(&mut self, type_name: &str, constructor: &str, fields: &[Expr]) -> Type {
        let declared = self.statics.get_constructor(type_name, constructor).cloned();

        let declared = match declared {
            Some(declared) => declared,
            None => {
                self.error(TypeError::UnknownConstructor {
                    type_name: type_name.to_string(),
                    constructor: constructor.to_string(),
                });
                for field in fields {
                    self.infer(field);
                }
                return Type::adt(type_name);
            }
        };

        if declared.len() != fields.len() {
            self.error(TypeError::ArityMismatch {
                type_name: type_name.to_string(),
                constructor: constructor.to_string(),
                expected: declared.len(),
                found: fields.len(),
            });
        }

        for (index, field) in fields.iter().enumerate() {
            let found = self.infer(field);
            if let Some(expected) = declared.get(index) {
                if !expected.is_compatible_with(&found) {
                    self.error(TypeError::FieldTypeMismatch {
                        type_name: type_name.to_string(),
                        constructor: constructor.to_string(),
                        index,
                        expected: expected.clone(),
                        found,
                    });
                }
            }
        }

        Type::adt(type_name)
    }

    fn infer_case(&mut self, scrutinee: &Expr, branches: &[CaseBranch]) -> Type {
        let scrutinee_type = self.infer(scrutinee);

        let scrutinee_adt = match scrutinee_type {
            Type::Constructor(name) => Some(name),
            Type::Unknown => None,
            other => {
                self.error(TypeError::NotAnADT { found: other });
                None
            }
        };
        // Fall back to what the first pattern claims to match
        let adt =
            scrutinee_adt.or_else(|| branches.first().map(|b| b.pattern.type_name.clone()));

        let mut covered: HashSet<String> = HashSet::new();
        let mut result: Option<Type> = None;

        for branch in branches.iter() {
            let pattern = &branch.pattern;
            let matches_adt = adt.as_deref() == Some(pattern.type_name.as_str());

            if let Some(expected) = &adt {
                if !matches_adt {
                    self.error(TypeError::PatternTypeMismatch {
                        expected: expected.clone(),
                        found: pattern.type_name.clone(),
                    });
                }
            }

            let declared = self
                .statics
                .get_constructor(&pattern.type_name, &pattern.constructor)
                .cloned();

            let binder_types: Vec<Type> = match &declared {
                Some(fields) => {
                    if fields.len() != pattern.binders.len() {
                        self.error(TypeError::ArityMismatch {
                            type_name: pattern.type_name.clone(),
                            constructor: pattern.constructor.clone(),
                            expected: fields.len(),
                            found: pattern.binders.len(),
                        });
                    }
                    (0..pattern.binders.len())
                        .map(|i| fields.get(i).cloned().unwrap_or(Type::Unknown))
                        .collect()
                }
                None => {
                    self.error(TypeError::UnknownConstructor {
                        type_name: pattern.type_name.clone(),
                        constructor: pattern.constructor.clone(),
                    });
                    vec![Type::Unknown; pattern.binders.len()]
                }
            };

            if matches_adt && declared.is_some() && !covered.insert(pattern.constructor.clone()) {
                self.error(TypeError::DuplicateBranch {
                    type_name: pattern.type_name.clone(),
                    constructor: pattern.constructor.clone(),
                });
            }

            let bindings: Vec<(String, Type)> =
                pattern.binders.iter().cloned().zip(binder_types).collect();
            let body_type = self.infer_with(bindings, &branch.body);

            match &result {
                None => result = Some(body_type),
                Some(expected) => {
                    if !expected.is_compatible_with(&body_type) {
                        self.error(TypeError::BranchTypeMismatch {
                            expected: expected.clone(),
                            found: body_type,
                        });
                    }
                }
            }
        }

        if let Some(adt) = &adt {
            let constructors = self.statics.get_adt(adt).cloned().unwrap_or_default();
            for constructor in constructors {
                if !covered.contains(&constructor) {
                    self.error(TypeError::NonExhaustiveMatch {
                        type_name: adt.clone(),
                        constructor,
                    });
                }
            }
        }

        result.unwrap_or(Type::Unknown)
    }

    fn check_operator(&mut self, operator: Operator, left: Type, right: Type) -> Type {
        let (operand, result) = match operator {
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div => {
                (Some(Type::Integer), Type::Integer)
            }
            // Any type, as long as both sides agree
            Operator::Eq => (None, Type::Bool),
            Operator::Or | Operator::And => (Some(Type::Bool), Type::Bool),
            Operator::Concat => (Some(Type::Text), Type::Text),
        };

        let well_typed = match &operand {
            Some(operand) => {
                operand.is_compatible_with(&left) && operand.is_compatible_with(&right)
            }
            None => left.is_compatible_with(&right),
        };

        if !well_typed {
            self.error(TypeError::OperandTypeMismatch {
                operator,
                left,
                right,
            });
        }

        result
    }
}
