use std::rc::Rc;

use crate::{ast::Function, runtime::value::next_serial_id};

/// A function value: a named function or an anonymous one captured by a
/// lambda expression.
#[derive(Debug, Clone)]
pub struct Closure {
    id:           u64,
    pub name:     Option<String>,
    pub function: Rc<Function>,
}

impl Closure {
    #[must_use]
    pub fn new(name: Option<String>, function: Rc<Function>) -> Self {
        Self { id: next_serial_id(),
               name,
               function }
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}
