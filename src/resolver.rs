// ABOUTME: Static resolution pass computing lexical depths for variable references

use crate::ast::{Expr, ExprId, FunctionDecl, Stmt};
use crate::error::ErrorReporter;
use crate::interpreter::Interpreter;
use crate::token::Token;
use std::collections::HashMap;

/// What kind of function body the resolver is currently inside. Guards the
/// top-level `return` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
}

/// Walks the syntax tree once, maintaining a stack of lexical scopes, and
/// tells the interpreter how many environments separate each variable
/// reference from its binding.
///
/// Each scope maps a name to an initialized flag: `false` between declare and
/// define, `true` afterwards. The global scope is not tracked; a name found
/// in no scope is left unresolved and looked up in the globals at runtime.
pub struct Resolver<'a> {
    interpreter: &'a mut Interpreter,
    reporter: &'a mut ErrorReporter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
}

impl<'a> Resolver<'a> {
    pub fn new(interpreter: &'a mut Interpreter, reporter: &'a mut ErrorReporter) -> Self {
        Resolver {
            interpreter,
            reporter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Block { statements } => {
                self.begin_scope();
                self.resolve(statements);
                self.end_scope();
            }
            Stmt::Var { name, initializer } => {
                self.declare(name);
                if let Some(initializer) = initializer {
                    self.resolve_expr(initializer);
                }
                self.define(name);
            }
            Stmt::Function { declaration } => {
                // The name is defined eagerly so the function can recurse
                self.declare(&declaration.name);
                self.define(&declaration.name);
                self.resolve_function(declaration);
            }
            Stmt::Expression { expression } | Stmt::Print { expression } => {
                self.resolve_expr(expression);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.reporter
                        .token_error(keyword, "Can't return from top-level code.");
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_expr(&mut self, expression: &Expr) {
        match expression {
            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.reporter.token_error(
                            name,
                            "Can't read local variable in its own initializer.",
                        );
                    }
                }
                self.resolve_local(*id, name);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            }
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Unary { right, .. } => self.resolve_expr(right),
            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }
            Expr::Grouping { expression } => self.resolve_expr(expression),
            Expr::Literal { .. } => {}
        }
    }

    fn resolve_function(&mut self, declaration: &FunctionDecl) {
        let enclosing_function =
            std::mem::replace(&mut self.current_function, FunctionType::Function);

        self.begin_scope();
        for param in &declaration.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&declaration.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    /// Walks scopes innermost-out; the first hit records how many scopes were
    /// skipped. No hit means the name is global (or undefined until runtime).
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (i, scope) in self.scopes.iter().enumerate().rev() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, self.scopes.len() - 1 - i);
                return;
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(&name.lexeme) {
                self.reporter
                    .token_error(name, "Already a variable with this name in this scope.");
            }
            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }
}
