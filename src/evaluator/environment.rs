use std::{mem, rc::Rc};

use super::value::{release, Value};

/// An immutable chain of local bindings.
///
/// Extending an environment never changes it, so closures can hold on to the
/// environment they were created in while evaluation carries on with a
/// longer one. Cloning only bumps a reference count.
#[derive(Debug, Clone, Default)]
pub struct Env<'a> {
    head: Option<Rc<Frame<'a>>>,
}

#[derive(Debug)]
struct Frame<'a> {
    name: &'a str,
    value: Value<'a>,
    parent: Option<Rc<Frame<'a>>>,
}

impl<'a> Env<'a> {
    pub fn new() -> Self {
        Env { head: None }
    }

    /// A new environment with `name` bound in front of this one.
    pub fn bind(&self, name: &'a str, value: Value<'a>) -> Self {
        Env {
            head: Some(Rc::new(Frame {
                name,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    /// Innermost binding of `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&Value<'a>> {
        let mut frame = self.head.as_deref();

        while let Some(current) = frame {
            if current.name == name {
                return Some(&current.value);
            }
            frame = current.parent.as_deref();
        }

        None
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.head.as_deref();

        while let Some(current) = frame {
            depth += 1;
            frame = current.parent.as_deref();
        }

        depth
    }

    /// Unlinks the frames owned only by this environment, moving their
    /// values onto `pending` instead of dropping them in place.
    pub(super) fn release_into(mut self, pending: &mut Vec<Value<'a>>) {
        let mut next = self.head.take();

        while let Some(frame) = next {
            match Rc::try_unwrap(frame) {
                Ok(mut frame) => {
                    pending.push(frame.take_value());
                    next = frame.parent.take();
                }
                Err(_) => break,
            }
        }
    }
}

impl<'a> Frame<'a> {
    fn take_value(&mut self) -> Value<'a> {
        mem::replace(&mut self.value, Value::Bool(false))
    }
}

/// Long chains of frames are unlinked in a loop.
impl Drop for Frame<'_> {
    fn drop(&mut self) {
        let value = self.take_value();
        let parent = self.parent.take();

        if parent.is_none() && !matches!(value, Value::Data { .. } | Value::Closure(_)) {
            return;
        }

        let mut pending = vec![value];
        Env { head: parent }.release_into(&mut pending);
        release(pending);
    }
}
