use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A single link in the chain of lexical scopes. Wrapped in `Rc<RefCell<_>>`
/// because closures and bound methods capture an environment node and may
/// outlive the block/call that created it.
#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment { enclosing, values: HashMap::new() }
    }

    /// Unconditionally binds `name` in this scope, shadowing any outer
    /// binding of the same name.
    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), value);
    }

    fn ancestor(node: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut env = Rc::clone(node);
        for _ in 0..distance {
            let next = env
                .borrow()
                .enclosing
                .clone()
                .expect("resolver-computed distance to stay within the environment chain");
            env = next;
        }
        env
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(undefined(name))
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(undefined(name))
    }

    /// Looks up `name` exactly `distance` scopes out from `start`, as
    /// computed by the resolver. No bounds check: the resolver guarantees the
    /// chain is at least that deep.
    pub fn get_at(start: &Rc<RefCell<Environment>>, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let env = Self::ancestor(start, distance);
        let value = env.borrow().values.get(&name.lexeme).cloned();
        value.ok_or_else(|| undefined(name))
    }

    pub fn assign_at(
        start: &Rc<RefCell<Environment>>,
        distance: usize,
        name: &Token,
        value: Object,
    ) {
        let env = Self::ancestor(start, distance);
        env.borrow_mut().values.insert(name.lexeme.clone(), value);
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError {
        token: name.clone(),
        message: format!("Undefined variable '{}'.", name.lexeme),
    }
}
