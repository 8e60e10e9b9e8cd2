use std::{collections::HashMap, slice::Iter};

use crate::{
    ast::{
        ast::Program,
        expressions::{CaseBranch, Expr, Operator},
    },
    errors::errors::RuntimeError,
};

use super::{environment::Env, value::Value};

/// Evaluates the main expression of a program.
///
/// Stops at the first runtime error.
pub fn evaluate(program: &Program) -> Result<Value<'_>, RuntimeError> {
    let mut evaluator = Evaluator::new(program);
    evaluator.run(&program.main, Env::new())
}

/// What the machine does next: either reduce an expression in an
/// environment, or hand a finished value to the topmost continuation.
#[derive(Debug)]
enum State<'a> {
    Eval(&'a Expr, Env<'a>),
    Return(Value<'a>),
}

/// The rest of a computation, waiting for one value.
#[derive(Debug)]
enum Continuation<'a> {
    AppFunction {
        argument: &'a Expr,
        env: Env<'a>,
    },
    AppArgument {
        function: Value<'a>,
    },
    Construct {
        type_name: &'a str,
        constructor: &'a str,
        remaining: Iter<'a, Expr>,
        done: Vec<Value<'a>>,
        env: Env<'a>,
    },
    CaseScrutinee {
        branches: &'a [CaseBranch],
        env: Env<'a>,
    },
    IfCondition {
        then_branch: &'a Expr,
        else_branch: &'a Expr,
        env: Env<'a>,
    },
    LetBound {
        name: &'a str,
        body: &'a Expr,
        env: Env<'a>,
    },
    BinaryLeft {
        operator: Operator,
        right: &'a Expr,
        env: Env<'a>,
    },
    BinaryRight {
        operator: Operator,
        left: Value<'a>,
    },
}

/// A CEK style machine over a borrowed program.
///
/// Sub-expressions are never evaluated by a recursive call. Pending work is
/// pushed onto `continuations` instead, so the depth of the object program
/// is limited by the heap only. A call in tail position pushes nothing.
#[derive(Debug)]
pub struct Evaluator<'a> {
    /// Every top level function, bound to a closure with an empty environment.
    functions: HashMap<&'a str, Value<'a>>,
    continuations: Vec<Continuation<'a>>,
    steps: usize,
    max_depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(program: &'a Program) -> Self {
        let mut functions = HashMap::new();

        for fn_def in program.fn_defs.iter() {
            // first definition wins, like in the type checker
            functions
                .entry(fn_def.name.as_str())
                .or_insert_with(|| Value::closure(&fn_def.param, &fn_def.body, Env::new()));
        }

        log::debug!("evaluator: {} top level functions", functions.len());

        Evaluator {
            functions,
            continuations: vec![],
            steps: 0,
            max_depth: 0,
        }
    }

    /// Evaluates `expr` in `env` until a value is produced.
    pub fn run(&mut self, expr: &'a Expr, env: Env<'a>) -> Result<Value<'a>, RuntimeError> {
        let base = self.continuations.len();
        let mut state = State::Eval(expr, env);

        let result = loop {
            self.steps += 1;
            self.max_depth = self.max_depth.max(self.continuations.len());

            let next = match state {
                State::Eval(expr, env) => self.eval(expr, env),
                State::Return(value) => {
                    if self.continuations.len() == base {
                        break Ok(value);
                    }
                    match self.continuations.pop() {
                        Some(continuation) => self.resume(continuation, value),
                        None => break Ok(value),
                    }
                }
            };

            state = match next {
                Ok(state) => state,
                Err(error) => break Err(error),
            };
        };

        // Frames of an aborted run are never resumed
        self.continuations.truncate(base);

        log::debug!(
            "evaluation finished after {} steps, {} continuations at most",
            self.steps,
            self.max_depth
        );

        result
    }

    fn push(&mut self, continuation: Continuation<'a>) {
        self.continuations.push(continuation);
    }

    fn lookup(&self, name: &str, env: &Env<'a>) -> Result<Value<'a>, RuntimeError> {
        env.lookup(name)
            .or_else(|| self.functions.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UnboundVariable {
                name: name.to_string(),
            })
    }

    fn eval(&mut self, expr: &'a Expr, env: Env<'a>) -> Result<State<'a>, RuntimeError> {
        let state = match expr {
            Expr::Var(name) => State::Return(self.lookup(name, &env)?),
            Expr::Lit(primitive) => State::Return(Value::from(primitive)),
            Expr::Lambda { param, body, .. } => State::Return(Value::closure(param, body, env)),
            Expr::App { function, argument } => {
                self.push(Continuation::AppFunction {
                    argument,
                    env: env.clone(),
                });
                State::Eval(function, env)
            }
            Expr::Construction {
                type_name,
                constructor,
                fields,
            } => {
                let mut remaining = fields.iter();
                match remaining.next() {
                    Some(first) => {
                        self.push(Continuation::Construct {
                            type_name,
                            constructor,
                            remaining,
                            done: Vec::with_capacity(fields.len()),
                            env: env.clone(),
                        });
                        State::Eval(first, env)
                    }
                    None => State::Return(Value::data(type_name, constructor, vec![])),
                }
            }
            Expr::Case {
                scrutinee,
                branches,
            } => {
                self.push(Continuation::CaseScrutinee {
                    branches,
                    env: env.clone(),
                });
                State::Eval(scrutinee, env)
            }
            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.push(Continuation::IfCondition {
                    then_branch,
                    else_branch,
                    env: env.clone(),
                });
                State::Eval(condition, env)
            }
            Expr::Let { name, bound, body } => {
                self.push(Continuation::LetBound {
                    name,
                    body,
                    env: env.clone(),
                });
                State::Eval(bound, env)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                self.push(Continuation::BinaryLeft {
                    operator: *operator,
                    right,
                    env: env.clone(),
                });
                State::Eval(left, env)
            }
        };

        Ok(state)
    }

    fn resume(
        &mut self,
        continuation: Continuation<'a>,
        value: Value<'a>,
    ) -> Result<State<'a>, RuntimeError> {
        let state = match continuation {
            Continuation::AppFunction { argument, env } => {
                if !matches!(value, Value::Closure(_)) {
                    return Err(RuntimeError::ApplyNonFunction {
                        found: value.describe(),
                    });
                }

                self.push(Continuation::AppArgument { function: value });
                State::Eval(argument, env)
            }
            Continuation::AppArgument { function } => match function {
                Value::Closure(closure) => {
                    log::trace!(
                        "call `{}` = {} ({} locals, {} continuations)",
                        closure.param,
                        value,
                        closure.env.depth(),
                        self.continuations.len()
                    );
                    State::Eval(closure.body, closure.env.bind(closure.param, value))
                }
                other => {
                    return Err(RuntimeError::ApplyNonFunction {
                        found: other.describe(),
                    })
                }
            },
            Continuation::Construct {
                type_name,
                constructor,
                mut remaining,
                mut done,
                env,
            } => {
                done.push(value);
                match remaining.next() {
                    Some(next) => {
                        self.push(Continuation::Construct {
                            type_name,
                            constructor,
                            remaining,
                            done,
                            env: env.clone(),
                        });
                        State::Eval(next, env)
                    }
                    None => State::Return(Value::data(type_name, constructor, done)),
                }
            }
            Continuation::CaseScrutinee { branches, env } => {
                self.enter_branch(value, branches, env)?
            }
            Continuation::IfCondition {
                then_branch,
                else_branch,
                env,
            } => match value {
                Value::Bool(true) => State::Eval(then_branch, env),
                Value::Bool(false) => State::Eval(else_branch, env),
                other => {
                    return Err(RuntimeError::ConditionNotBool {
                        found: other.describe(),
                    })
                }
            },
            Continuation::LetBound { name, body, env } => State::Eval(body, env.bind(name, value)),
            Continuation::BinaryLeft {
                operator,
                right,
                env,
            } => {
                self.push(Continuation::BinaryRight {
                    operator,
                    left: value,
                });
                State::Eval(right, env)
            }
            Continuation::BinaryRight { operator, left } => {
                State::Return(apply_operator(operator, left, value)?)
            }
        };

        Ok(state)
    }

    /// Picks the first branch whose pattern names the constructor of
    /// `scrutinee` and binds its fields positionally.
    fn enter_branch(
        &self,
        scrutinee: Value<'a>,
        branches: &'a [CaseBranch],
        env: Env<'a>,
    ) -> Result<State<'a>, RuntimeError> {
        let (type_name, constructor, fields) = match scrutinee {
            Value::Data {
                type_name,
                constructor,
                fields,
            } => (type_name, constructor, fields),
            other => {
                return Err(RuntimeError::NotAnADT {
                    found: other.describe(),
                })
            }
        };

        let branch = branches
            .iter()
            .find(|branch| {
                branch.pattern.type_name == type_name && branch.pattern.constructor == constructor
            })
            .ok_or_else(|| RuntimeError::NonExhaustiveMatchAtRuntime {
                type_name: type_name.to_string(),
                constructor: constructor.to_string(),
            })?;

        let binders = &branch.pattern.binders;
        if binders.len() != fields.len() {
            return Err(RuntimeError::PatternArityMismatch {
                type_name: type_name.to_string(),
                constructor: constructor.to_string(),
                expected: binders.len(),
                found: fields.len(),
            });
        }

        let env = binders
            .iter()
            .zip(fields.iter())
            .fold(env, |env, (binder, field)| env.bind(binder, field.clone()));

        Ok(State::Eval(&branch.body, env))
    }
}

/// Both operands are already evaluated; `&&` and `||` do not short-circuit.
pub fn apply_operator<'a>(
    operator: Operator,
    left: Value<'a>,
    right: Value<'a>,
) -> Result<Value<'a>, RuntimeError> {
    let value = match (operator, left, right) {
        (Operator::Add, Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_add(b)),
        (Operator::Sub, Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_sub(b)),
        (Operator::Mul, Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_mul(b)),
        (Operator::Div, Value::Integer(_), Value::Integer(0)) => {
            return Err(RuntimeError::DivisionByZero)
        }
        // i64::MIN / -1 wraps to i64::MIN
        (Operator::Div, Value::Integer(a), Value::Integer(b)) => Value::Integer(a.wrapping_div(b)),
        (Operator::Eq, left, right) => Value::Bool(left == right),
        (Operator::And, Value::Bool(a), Value::Bool(b)) => Value::Bool(a && b),
        (Operator::Or, Value::Bool(a), Value::Bool(b)) => Value::Bool(a || b),
        (Operator::Concat, Value::Text(a), Value::Text(b)) => Value::Text(a + &b),
        (operator, left, right) => {
            return Err(RuntimeError::OperandTypeMismatch {
                operator,
                left: left.describe(),
                right: right.describe(),
            })
        }
    };

    Ok(value)
}
