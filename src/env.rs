// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A name→value map with an optional enclosing link, forming a chain whose
/// head is the innermost scope and whose tail is the globals.
///
/// Environments are `Rc`-shared: a closure keeps its chain alive past the
/// syntactic scope that created it, and several closures may share one
/// enclosing environment. The chain is acyclic because a new environment
/// always encloses an already-existing one.
#[derive(Debug)]
pub struct Environment {
    values: RefCell<HashMap<String, Value>>,
    enclosing: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a global environment with no enclosing scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            values: RefCell::new(HashMap::new()),
            enclosing: None,
        })
    }

    /// Creates a child environment enclosed by `enclosing`.
    pub fn with_enclosing(enclosing: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            values: RefCell::new(HashMap::new()),
            enclosing: Some(enclosing),
        })
    }

    /// Binds a name in THIS environment; re-defining is legal and shadows.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Looks a name up in this environment and its enclosing chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.lookup(name);
        }

        None
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.lookup(&name.lexeme)
            .ok_or_else(|| undefined(name))
    }

    /// Updates an existing binding, searching the enclosing chain.
    pub fn assign(&self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if self.values.borrow().contains_key(&name.lexeme) {
            self.values.borrow_mut().insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.assign(name, value);
        }

        Err(undefined(name))
    }

    /// Reads a binding exactly `distance` environments out, with no further
    /// fallback. Valid distances are guaranteed by the resolver.
    pub fn get_at(self: &Rc<Self>, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
        self.ancestor(distance)
            .values
            .borrow()
            .get(&name.lexeme)
            .cloned()
            .ok_or_else(|| undefined(name))
    }

    /// Writes a binding exactly `distance` environments out.
    pub fn assign_at(
        self: &Rc<Self>,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let target = self.ancestor(distance);
        let mut values = target.values.borrow_mut();
        if values.contains_key(&name.lexeme) {
            values.insert(name.lexeme.clone(), value);
            Ok(())
        } else {
            Err(undefined(name))
        }
    }

    fn ancestor(self: &Rc<Self>, distance: usize) -> Rc<Environment> {
        let mut environment = Rc::clone(self);
        for _ in 0..distance {
            let enclosing = match &environment.enclosing {
                Some(enclosing) => Rc::clone(enclosing),
                None => break,
            };
            environment = enclosing;
        }
        environment
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}
