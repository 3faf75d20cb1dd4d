// ABOUTME: Runtime values and callables for the Lox interpreter

use crate::ast::FunctionDecl;
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Unwind};
use std::fmt;
use std::rc::Rc;

/// A Lox runtime value. Numbers are IEEE-754 doubles; there is no integer
/// type.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Native(Rc<NativeFunction>),
    Function(Rc<LoxFunction>),
}

/// A host-provided callable, invoked with already-evaluated arguments.
#[derive(Debug)]
pub struct NativeFunction {
    pub arity: usize,
    pub call: fn(&[Value]) -> Result<Value, RuntimeError>,
}

/// A user-declared function bundled with the environment in force at its
/// declaration.
#[derive(Debug)]
pub struct LoxFunction {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Rc<Environment>,
}

impl LoxFunction {
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Runs the body in a fresh environment enclosing the captured closure.
    ///
    /// This is the one place a `Return` unwind is consumed; a body that
    /// completes without returning produces nil.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(param.lexeme.clone(), argument);
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => Ok(Value::Nil),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }
}

impl Value {
    /// `nil` and `false` are falsy; every other value is truthy, including
    /// zero and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }
}

/// Equality requires the runtime tags to match first, so a number and a
/// boolean are never equal. Callables compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            // f64 Display already prints integral values without a decimal
            // point and never uses scientific notation
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Native(_) => write!(f, "<native fn>"),
            Value::Function(function) => {
                write!(f, "<fn {}>", function.declaration.name.lexeme)
            }
        }
    }
}
