//! Executes statements and evaluates expressions against environments
//! (spec.md §4.5). Non-local `return` is threaded as a value rather than
//! thrown, per spec.md §9's "direct re-expression" option.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use tracing::{instrument, trace};

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Diagnostics, RuntimeError};
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

/// Non-local control flow produced by executing a statement: either it ran
/// to completion, hit a `return` carrying a value, or raised a runtime
/// error. All three unwind the statement stack the same way via `?`.
#[derive(Debug)]
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

pub type EvalResult = Result<Object, RuntimeError>;
pub type ExecResult = Result<(), Unwind>;

pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    diagnostics: Rc<Diagnostics>,
    stdout: Rc<RefCell<Box<dyn Write>>>,
}

impl Interpreter {
    pub fn new(diagnostics: Rc<Diagnostics>, stdout: Rc<RefCell<Box<dyn Write>>>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));

        for native in NativeFunction::globals() {
            globals.borrow_mut().define(native.name, Object::NativeFunction(Rc::new(native)));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            diagnostics,
            stdout,
        }
    }

    /// Called by the resolver for every variable/`this`/`super` reference it
    /// resolves to a local scope.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    #[instrument(skip_all)]
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                if let Unwind::Error(error) = unwind {
                    self.diagnostics.report_runtime(&error);
                }
                // A `return` escaping every enclosing function is a resolver
                // bug, not a user-facing error; either way there is nothing
                // left to execute at top level.
                return;
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression(data) => self.exec_expression(data),
            Stmt::Print(data) => self.exec_print(data),
            Stmt::Var(data) => self.exec_var(data),
            Stmt::Block(data) => {
                let scope = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                self.execute_block(&data.statements, scope)
            }
            Stmt::If(data) => self.exec_if(data),
            Stmt::While(data) => self.exec_while(data),
            Stmt::Function(data) => self.exec_function(data),
            Stmt::Return(data) => self.exec_return(data),
            Stmt::Class(data) => self.exec_class(data),
        }
    }

    /// Executes `statements` with `environment` as the current scope,
    /// restoring the caller's environment on every exit path — normal
    /// completion, an escaping `return`, or a runtime error.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                result = Err(unwind);
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn exec_expression(&mut self, data: &ExpressionData) -> ExecResult {
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn exec_print(&mut self, data: &PrintData) -> ExecResult {
        let value = self.evaluate(&data.expr)?;
        let mut out = self.stdout.borrow_mut();
        writeln!(out, "{value}").expect("writing to the print sink to succeed");
        Ok(())
    }

    fn exec_var(&mut self, data: &VarData) -> ExecResult {
        let value = match &data.initializer {
            Some(expr) => self.evaluate(expr)?,
            None => Object::from(Literal::Nil),
        };
        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn exec_if(&mut self, data: &IfData) -> ExecResult {
        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn exec_while(&mut self, data: &WhileData) -> ExecResult {
        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }
        Ok(())
    }

    fn exec_function(&mut self, data: &FunctionData) -> ExecResult {
        let function = Function::new(Rc::new(data.clone()), Rc::clone(&self.environment), false);
        self.environment
            .borrow_mut()
            .define(&data.name.lexeme, Object::Function(Rc::new(function)));
        Ok(())
    }

    fn exec_return(&mut self, data: &ReturnData) -> ExecResult {
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::from(Literal::Nil),
        };
        Err(Unwind::Return(value))
    }

    fn exec_class(&mut self, data: &ClassData) -> ExecResult {
        let superclass = match &data.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Object::Class(class) => Some(class),
                    _ => {
                        let token = match expr {
                            Expr::Variable(v) => v.name.clone(),
                            _ => unreachable!("superclass clause is always a Variable expr"),
                        };
                        return Err(RuntimeError {
                            token,
                            message: "Superclass must be a class.".to_string(),
                        }
                        .into());
                    }
                }
            }
            None => None,
        };

        self.environment
            .borrow_mut()
            .define(&data.name.lexeme, Object::from(Literal::Nil));

        // If there is a superclass, methods close over a scope that defines
        // `super`, nested one level outside the method's own `this` scope.
        let method_closure = if let Some(superclass) = &superclass {
            let mut env = Environment::new(Some(Rc::clone(&self.environment)));
            env.define("super", Object::Class(Rc::clone(superclass)));
            Rc::new(RefCell::new(env))
        } else {
            Rc::clone(&self.environment)
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(method_data) = method else {
                unreachable!("class body only ever contains Function statements")
            };
            let is_initializer = method_data.name.lexeme == "init";
            let function = Function::new(Rc::new(method_data.clone()), Rc::clone(&method_closure), is_initializer);
            methods.insert(method_data.name.lexeme.clone(), Rc::new(function));
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);
        self.environment
            .borrow_mut()
            .assign(&data.name, Object::Class(Rc::new(RefCell::new(class))))?;

        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Literal(literal) => Ok(Object::from(literal.clone())),
            Expr::Grouping(data) => self.evaluate(&data.expr),
            Expr::Unary(data) => self.eval_unary(data),
            Expr::Binary(data) => self.eval_binary(data),
            Expr::Logical(data) => self.eval_logical(data),
            Expr::Variable(data) => self.look_up_variable(&data.name, expr),
            Expr::Assign(data) => self.eval_assign(data, expr),
            Expr::Call(data) => self.eval_call(data),
            Expr::Get(data) => self.eval_get(data),
            Expr::Set(data) => self.eval_set(data),
            Expr::This(data) => self.look_up_variable(&data.keyword, expr),
            Expr::Super(data) => self.eval_super(data, expr),
        }
    }

    fn eval_unary(&mut self, data: &UnaryData) -> EvalResult {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => match right {
                Object::Literal(Literal::Number(n)) => Ok(Object::from(-n)),
                _ => Err(RuntimeError {
                    token: data.operator.clone(),
                    message: "Operand must be a number.".to_string(),
                }),
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("unary operator is always ! or -"),
        }
    }

    fn eval_binary(&mut self, data: &BinaryData) -> EvalResult {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let op = &data.operator;

        use Literal::Number;

        match op.r#type {
            Type::Greater => numbers(&left, &right, op, |l, r| Object::from(l > r)),
            Type::GreaterEqual => numbers(&left, &right, op, |l, r| Object::from(l >= r)),
            Type::Less => numbers(&left, &right, op, |l, r| Object::from(l < r)),
            Type::LessEqual => numbers(&left, &right, op, |l, r| Object::from(l <= r)),
            Type::Minus => numbers(&left, &right, op, |l, r| Object::from(l - r)),
            Type::Slash => numbers(&left, &right, op, |l, r| Object::from(l / r)),
            Type::Star => numbers(&left, &right, op, |l, r| Object::from(l * r)),
            Type::Plus => match (&left, &right) {
                (Object::Literal(Number(l)), Object::Literal(Number(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                }
                _ => Err(RuntimeError {
                    token: op.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }),
            },
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::EqualEqual => Ok(Object::from(left == right)),
            _ => unreachable!("binary operator is one of the above"),
        }
    }

    fn eval_logical(&mut self, data: &LogicalData) -> EvalResult {
        let left = self.evaluate(&data.left)?;

        let short_circuits = match data.operator.r#type {
            Type::Or => left.is_truthy(),
            Type::And => !left.is_truthy(),
            _ => unreachable!("logical operator is always `and` or `or`"),
        };

        if short_circuits {
            Ok(left)
        } else {
            self.evaluate(&data.right)
        }
    }

    fn eval_assign(&mut self, data: &AssignData, expr: &Expr) -> EvalResult {
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.name) {
            Some(&distance) => {
                Environment::assign_at(&self.environment, distance, &data.name, value.clone());
            }
            None => {
                self.globals.borrow_mut().assign(&data.name, value.clone())?;
            }
        }

        let _ = expr; // kept for symmetry with look_up_variable's signature
        Ok(value)
    }

    fn eval_call(&mut self, data: &CallData) -> EvalResult {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for arg in &data.arguments {
            arguments.push(self.evaluate(arg)?);
        }

        let arity = match &callee {
            Object::Function(f) => f.arity(),
            Object::NativeFunction(f) => f.arity(),
            Object::Class(c) => c.borrow().arity(),
            _ => {
                return Err(RuntimeError {
                    token: data.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                })
            }
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: data.paren.clone(),
                message: format!("Expected {arity} arguments but got {}.", arguments.len()),
            });
        }

        trace!(arity, "dispatching call");

        match callee {
            Object::Function(f) => f.call(self, arguments),
            Object::NativeFunction(f) => f.call(self, arguments),
            Object::Class(c) => Class::instantiate(&c, self, arguments),
            _ => unreachable!("non-callables already rejected above"),
        }
    }

    fn eval_get(&mut self, data: &GetData) -> EvalResult {
        let object = self.evaluate(&data.object)?;
        match object {
            Object::Instance(instance) => {
                let self_object = Object::Instance(Rc::clone(&instance));
                instance.borrow().get(&data.name, &self_object)
            }
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn eval_set(&mut self, data: &SetData) -> EvalResult {
        let object = self.evaluate(&data.object)?;
        match object {
            Object::Instance(instance) => {
                let value = self.evaluate(&data.value)?;
                instance.borrow_mut().set(&data.name, value.clone());
                Ok(value)
            }
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have fields.".to_string(),
            }),
        }
    }

    fn eval_super(&mut self, data: &SuperData, expr: &Expr) -> EvalResult {
        let distance = *self
            .locals
            .get(&data.keyword)
            .expect("resolver always records a distance for `super`");

        let superclass = match Environment::get_at(&self.environment, distance, &data.keyword)? {
            Object::Class(class) => class,
            _ => unreachable!("`super` always resolves to a class"),
        };

        let this_token = Token::new(Type::This, "this".to_string(), None, data.keyword.location);
        let instance = match Environment::get_at(&self.environment, distance - 1, &this_token)? {
            Object::Instance(instance) => Object::Instance(instance),
            _ => unreachable!("the scope directly inside `super` always defines `this`"),
        };

        let method = superclass.borrow().find_method(&data.method.lexeme).ok_or_else(|| RuntimeError {
            token: data.method.clone(),
            message: format!("Undefined property '{}'.", data.method.lexeme),
        })?;

        let _ = expr;
        Ok(Object::Function(Rc::new(method.bind(instance))))
    }

    fn look_up_variable(&mut self, name: &Token, _expr: &Expr) -> EvalResult {
        match self.locals.get(name) {
            Some(&distance) => Environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

fn numbers<F>(left: &Object, right: &Object, op: &Token, f: F) -> EvalResult
where
    F: Fn(f64, f64) -> Object,
{
    match (left, right) {
        (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(f(*l, *r)),
        _ => Err(RuntimeError {
            token: op.clone(),
            message: "Operands must be numbers.".to_string(),
        }),
    }
}
