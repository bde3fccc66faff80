//! Static resolution pass (spec.md §4.4): computes, for every variable
//! reference, `this` and `super` occurrence, how many scopes out the
//! binding lives, and records it in the interpreter via [`Token`] identity.
//! Runs once between parsing and evaluation and never touches the resolved
//! values themselves, only lexical structure.

use std::collections::HashMap;
use std::mem;

use crate::error::{Diagnostics, ResolveError};
use crate::expr::*;
use crate::interpreter::Interpreter;
use crate::stmt::*;
use crate::token::Token;

#[derive(PartialEq, Clone, Copy)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(PartialEq, Clone, Copy)]
enum ClassType {
    None,
    Class,
    Subclass,
}

pub struct Resolver<'a, 'b> {
    interpreter: &'a mut Interpreter,
    diagnostics: &'b Diagnostics,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'b> Resolver<'a, 'b> {
    pub fn new(interpreter: &'a mut Interpreter, diagnostics: &'b Diagnostics) -> Self {
        Resolver {
            interpreter,
            diagnostics,
            scopes: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expr),
            Stmt::Print(data) => self.resolve_expr(&data.expr),
            Stmt::Var(data) => self.resolve_var(data),
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            }
            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            }
            Stmt::Function(data) => self.resolve_function_decl(data),
            Stmt::Return(data) => self.resolve_return(data),
            Stmt::Class(data) => self.resolve_class(data),
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Grouping(data) => self.resolve_expr(&data.expr),
            Expr::Unary(data) => self.resolve_expr(&data.expr),
            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            }
            Expr::Variable(data) => self.resolve_variable(data, expr),
            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(&data.name);
            }
            Expr::Call(data) => {
                self.resolve_expr(&data.callee);
                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            }
            Expr::Get(data) => self.resolve_expr(&data.object),
            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            }
            Expr::This(data) => self.resolve_this(data),
            Expr::Super(data) => self.resolve_super(data),
        }
    }

    fn resolve_var(&mut self, data: &VarData) {
        self.declare(&data.name);
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&data.name);
    }

    fn resolve_variable(&mut self, data: &VariableData, _expr: &Expr) {
        if let Some(scope) = self.scopes.last() {
            if scope.get(&data.name.lexeme) == Some(&false) {
                self.diagnostics.report_resolve(&ResolveError {
                    token: data.name.clone(),
                    message: "Can't read local variable in its own initialiser.".to_string(),
                });
            }
        }

        self.resolve_local(&data.name);
    }

    fn resolve_this(&mut self, data: &ThisData) {
        if self.current_class == ClassType::None {
            self.diagnostics.report_resolve(&ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            });
            return;
        }

        self.resolve_local(&data.keyword);
    }

    fn resolve_super(&mut self, data: &SuperData) {
        match self.current_class {
            ClassType::Subclass => {}
            ClassType::None => self.diagnostics.report_resolve(&ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'super' outside of a class.".to_string(),
            }),
            ClassType::Class => self.diagnostics.report_resolve(&ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'super' in a class with no superclass.".to_string(),
            }),
        }

        self.resolve_local(&data.keyword);
    }

    fn resolve_function_decl(&mut self, data: &FunctionData) {
        self.declare(&data.name);
        self.define(&data.name);
        self.resolve_function(data, FunctionType::Function);
    }

    fn resolve_function(&mut self, data: &FunctionData, kind: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in &data.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&data.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn resolve_return(&mut self, data: &ReturnData) {
        if self.current_function == FunctionType::None {
            self.diagnostics.report_resolve(&ResolveError {
                token: data.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            });
        }

        if let Some(value) = &data.value {
            if self.current_function == FunctionType::Initializer {
                self.diagnostics.report_resolve(&ResolveError {
                    token: data.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                });
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn resolve_class(&mut self, data: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            let Expr::Variable(super_var) = superclass else {
                unreachable!("the parser only ever produces a Variable expr for a superclass clause")
            };

            if data.name.lexeme == super_var.name.lexeme {
                self.diagnostics.report_resolve(&ResolveError {
                    token: super_var.name.clone(),
                    message: "A class can't inherit from itself.".to_string(),
                });
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.scopes.last_mut().expect("scope stack non-empty").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("scope stack non-empty").insert("this".to_string(), true);

        for method in &data.methods {
            let Stmt::Function(method_data) = method else {
                unreachable!("class body only ever contains Function statements")
            };
            let kind = if method_data.name.lexeme == "init" { FunctionType::Initializer } else { FunctionType::Method };
            self.resolve_function(method_data, kind);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.diagnostics.report_resolve(&ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            });
        }

        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(name.lexeme.clone(), true);
    }

    fn resolve_local(&mut self, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(name, depth);
                return;
            }
        }
    }
}
