// ABOUTME: Tree-walking evaluator executing statements against an environment chain

use crate::ast::{Expr, ExprId, LiteralValue, Stmt};
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::token::{Token, TokenType};
use crate::value::{LoxFunction, NativeFunction, Value};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Non-local exit from statement execution.
///
/// `Return` carries a value out of arbitrarily nested blocks to the function
/// invocation that consumes it; `Error` aborts the whole batch. Keeping both
/// in one channel lets `?` propagate them, while the `From` impl below keeps
/// runtime errors convertible.
#[derive(Debug)]
pub enum Unwind {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

/// Evaluates the syntax tree.
///
/// Holds the globals (pre-populated with the `clock` native), the current
/// innermost environment, and the resolution table written by the resolver.
/// References with a recorded depth are read and written at that exact
/// distance; everything else falls back to the globals.
#[derive(Debug)]
pub struct Interpreter {
    globals: Rc<Environment>,
    environment: Rc<Environment>,
    locals: HashMap<ExprId, usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Environment::new();
        globals.define(
            "clock",
            Value::Native(Rc::new(NativeFunction {
                arity: 0,
                call: clock,
            })),
        );

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Executes a statement batch. The first runtime error aborts the rest.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                // The resolver rejects top-level returns, so an unwound
                // return can only end a batch quietly
                Err(Unwind::Return(_)) => return Ok(()),
                Err(Unwind::Error(error)) => return Err(error),
            }
        }
        Ok(())
    }

    /// Records the lexical depth of a variable reference. Called by the
    /// resolver.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// The global environment, for callers that want to observe program
    /// results.
    pub fn globals(&self) -> Rc<Environment> {
        Rc::clone(&self.globals)
    }

    #[cfg(test)]
    pub fn resolved_depths(&self) -> Vec<usize> {
        let mut depths: Vec<usize> = self.locals.values().copied().collect();
        depths.sort_unstable();
        depths
    }

    fn execute(&mut self, statement: &Stmt) -> Result<(), Unwind> {
        match statement {
            Stmt::Expression { expression } => {
                self.evaluate(expression)?;
                Ok(())
            }
            Stmt::Print { expression } => {
                let value = self.evaluate(expression)?;
                println!("{}", value);
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment.define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block { statements } => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, environment)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::Function { declaration } => {
                let function = LoxFunction {
                    declaration: Rc::clone(declaration),
                    closure: Rc::clone(&self.environment),
                };
                self.environment
                    .define(declaration.name.lexeme.clone(), Value::Function(Rc::new(function)));
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Nil,
                };
                Err(Unwind::Return(value))
            }
        }
    }

    /// Runs `statements` with `environment` as the innermost scope, restoring
    /// the previous scope on every exit path.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<Environment>,
    ) -> Result<(), Unwind> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expression: &Expr) -> Result<Value, Unwind> {
        match expression {
            Expr::Literal { value } => Ok(match value {
                LiteralValue::Nil => Value::Nil,
                LiteralValue::Bool(b) => Value::Bool(*b),
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::String(s) => Value::String(s.clone()),
            }),
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                match operator.kind {
                    TokenType::Bang => Ok(Value::Bool(!right.is_truthy())),
                    TokenType::Minus => {
                        let n = check_number_operand(operator, &right)?;
                        Ok(Value::Number(-n))
                    }
                    _ => Ok(Value::Nil),
                }
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(binary_op(operator, left, right)?)
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                // Short-circuiting hands back the operand itself, never a
                // coerced boolean
                if operator.kind == TokenType::Or {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate(right)
            }
            Expr::Variable { id, name } => Ok(self.look_up_variable(name, *id)?),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                match self.locals.get(id) {
                    Some(&distance) => {
                        self.environment.assign_at(distance, name, value.clone())?
                    }
                    None => self.globals.assign(name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                match callee {
                    Value::Function(function) => {
                        check_arity(paren, function.arity(), args.len())?;
                        Ok(function.call(self, args)?)
                    }
                    Value::Native(native) => {
                        check_arity(paren, native.arity, args.len())?;
                        Ok((native.call)(&args)?)
                    }
                    _ => Err(Unwind::Error(RuntimeError::new(
                        paren,
                        "Can only call functions and classes.",
                    ))),
                }
            }
        }
    }

    fn look_up_variable(&self, name: &Token, id: ExprId) -> Result<Value, RuntimeError> {
        match self.locals.get(&id) {
            Some(&distance) => self.environment.get_at(distance, name),
            None => self.globals.get(name),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn binary_op(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenType::Plus => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
            _ => Err(RuntimeError::new(
                operator,
                "Operands must be two numbers or two strings.",
            )),
        },
        TokenType::Minus => {
            let (a, b) = check_number_operands(operator, &left, &right)?;
            Ok(Value::Number(a - b))
        }
        TokenType::Star => {
            let (a, b) = check_number_operands(operator, &left, &right)?;
            Ok(Value::Number(a * b))
        }
        TokenType::Slash => {
            let (a, b) = check_number_operands(operator, &left, &right)?;
            Ok(Value::Number(a / b))
        }
        TokenType::Greater => {
            let (a, b) = check_number_operands(operator, &left, &right)?;
            Ok(Value::Bool(a > b))
        }
        TokenType::GreaterEqual => {
            let (a, b) = check_number_operands(operator, &left, &right)?;
            Ok(Value::Bool(a >= b))
        }
        TokenType::Less => {
            let (a, b) = check_number_operands(operator, &left, &right)?;
            Ok(Value::Bool(a < b))
        }
        TokenType::LessEqual => {
            let (a, b) = check_number_operands(operator, &left, &right)?;
            Ok(Value::Bool(a <= b))
        }
        TokenType::EqualEqual => Ok(Value::Bool(left == right)),
        TokenType::BangEqual => Ok(Value::Bool(left != right)),
        _ => Ok(Value::Nil),
    }
}

fn check_number_operand(operator: &Token, operand: &Value) -> Result<f64, RuntimeError> {
    match operand {
        Value::Number(n) => Ok(*n),
        _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
    }
}

fn check_number_operands(
    operator: &Token,
    left: &Value,
    right: &Value,
) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}

fn check_arity(paren: &Token, expected: usize, got: usize) -> Result<(), RuntimeError> {
    if expected != got {
        return Err(RuntimeError::new(
            paren,
            format!("Expected {} arguments but got {}.", expected, got),
        ));
    }
    Ok(())
}

/// The single built-in: wall-clock seconds as a number.
fn clock(_args: &[Value]) -> Result<Value, RuntimeError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Value::Number(elapsed.as_secs_f64()))
}
