use std::{
    fmt::{Debug, Display},
    mem,
    ops::Deref,
    rc::Rc,
};

use crate::ast::expressions::{Expr, Primitive};

use super::environment::Env;

/// A runtime value.
///
/// Values borrow names and function bodies from the `Program` they were
/// computed from, so they cannot outlive it.
///
/// Data values can nest as deep as the heap allows. Dropping, comparing and
/// printing them therefore never recurses on the host stack.
#[derive(Clone)]
pub enum Value<'a> {
    Integer(i64),
    Bool(bool),
    Text(String),
    Closure(Rc<Closure<'a>>),
    Data {
        type_name: &'a str,
        constructor: &'a str,
        fields: Rc<Fields<'a>>,
    },
}

#[derive(Debug)]
pub struct Closure<'a> {
    pub param: &'a str,
    pub body: &'a Expr,
    pub env: Env<'a>,
}

/// Positional fields of a data value.
pub struct Fields<'a>(Vec<Value<'a>>);

impl<'a> Deref for Fields<'a> {
    type Target = [Value<'a>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for Fields<'_> {
    fn drop(&mut self) {
        release(mem::take(&mut self.0));
    }
}

/// Drops `pending` one value at a time.
///
/// Children that are owned only by a value being released are moved onto
/// `pending` first, so a long chain is unlinked iteratively. Shared children
/// are left to their other owners.
pub(super) fn release(mut pending: Vec<Value<'_>>) {
    while let Some(value) = pending.pop() {
        match value {
            Value::Data { fields, .. } => {
                if let Ok(mut fields) = Rc::try_unwrap(fields) {
                    pending.append(&mut fields.0);
                }
            }
            Value::Closure(closure) => {
                if let Ok(closure) = Rc::try_unwrap(closure) {
                    closure.env.release_into(&mut pending);
                }
            }
            Value::Integer(_) | Value::Bool(_) | Value::Text(_) => {}
        }
    }
}

impl<'a> Value<'a> {
    pub fn closure(param: &'a str, body: &'a Expr, env: Env<'a>) -> Self {
        Value::Closure(Rc::new(Closure { param, body, env }))
    }

    pub fn data(type_name: &'a str, constructor: &'a str, fields: Vec<Value<'a>>) -> Self {
        Value::Data {
            type_name,
            constructor,
            fields: Rc::new(Fields(fields)),
        }
    }

    /// Short rendering used inside runtime error messages.
    pub fn describe(&self) -> String {
        format!("`{}`", self)
    }
}

impl<'a> From<&'a Primitive> for Value<'a> {
    fn from(primitive: &'a Primitive) -> Self {
        match primitive {
            Primitive::Integer(value) => Value::Integer(*value),
            Primitive::Bool(value) => Value::Bool(*value),
            Primitive::Text(value) => Value::Text(value.clone()),
        }
    }
}

/// Structural equality. Values of different kinds are unequal, and a closure
/// is never equal to anything, itself included.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (Value::Integer(a), Value::Integer(b)) if a == b => {}
                (Value::Bool(a), Value::Bool(b)) if a == b => {}
                (Value::Text(a), Value::Text(b)) if a == b => {}
                (
                    Value::Data {
                        type_name: t1,
                        constructor: c1,
                        fields: f1,
                    },
                    Value::Data {
                        type_name: t2,
                        constructor: c2,
                        fields: f2,
                    },
                ) if t1 == t2 && c1 == c2 && f1.len() == f2.len() => {
                    pending.extend(f1.iter().zip(f2.iter()));
                }
                _ => return false,
            }
        }

        true
    }
}

/// Something still to be written by `Display`.
enum Piece<'v, 'a> {
    Value(&'v Value<'a>),
    Literal(&'static str),
}

impl Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Value(self)];

        while let Some(piece) = pending.pop() {
            let value = match piece {
                Piece::Literal(literal) => {
                    f.write_str(literal)?;
                    continue;
                }
                Piece::Value(value) => value,
            };

            match value {
                Value::Integer(value) => write!(f, "{}", value)?,
                Value::Bool(value) => write!(f, "{}", value)?,
                Value::Text(value) => write!(f, "{:?}", value)?,
                Value::Closure(_) => f.write_str("<closure>")?,
                Value::Data {
                    type_name,
                    constructor,
                    fields,
                } => {
                    write!(f, "{}::{}(", type_name, constructor)?;

                    // Pushed in reverse so they pop in order
                    pending.push(Piece::Literal(")"));
                    for (i, field) in fields.iter().enumerate().rev() {
                        pending.push(Piece::Value(field));
                        if i > 0 {
                            pending.push(Piece::Literal(", "));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
