use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::stmt::FunctionData;

/// A user-declared function or bound method (spec.md §3 `LoxFunction`).
///
/// `closure` is the environment active where the function was *declared*;
/// calling the function always resolves free variables against it, never
/// against the caller's environment (the closure-capture law, spec.md §8).
#[derive(Debug, Clone)]
pub struct Function {
    pub declaration: Rc<FunctionData>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: Rc<FunctionData>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { declaration, closure, is_initializer }
    }

    /// Produces a copy of this function whose closure additionally binds
    /// `this` (and, transitively through that closure, `super` if the
    /// enclosing method's class has one) to `instance`.
    pub fn bind(&self, instance: Object) -> Function {
        let mut env = Environment::new(Some(Rc::clone(&self.closure)));
        env.define("this", instance);
        Function {
            declaration: Rc::clone(&self.declaration),
            closure: Rc::new(RefCell::new(env)),
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut env = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.declaration.params.iter().zip(arguments) {
            env.define(&param.lexeme, arg);
        }

        let env = Rc::new(RefCell::new(env));
        let result = interpreter.execute_block(&self.declaration.body, env.clone());

        match result {
            // An initializer always yields `this`, regardless of how the
            // body returned otherwise (falling off the end, or an empty
            // `return;`) — but a real error still aborts the call.
            Ok(()) | Err(crate::interpreter::Unwind::Return(_)) if self.is_initializer => {
                Environment::get_at(&self.closure, 0, &this_token())
            }
            Ok(()) => Ok(Object::from(crate::literal::Literal::Nil)),
            Err(crate::interpreter::Unwind::Return(value)) => Ok(value),
            Err(crate::interpreter::Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

fn this_token() -> crate::token::Token {
    crate::token::Token::new(
        crate::token::Type::This,
        "this".to_string(),
        None,
        crate::token::Location::default(),
    )
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A function implemented in the host rather than in Lox (spec.md §4.6).
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// Natives installed into the global environment at interpreter
    /// construction. `clock` is required by spec.md §4.6; `input` is a
    /// supplemental native (not in spec.md, no conflicting Non-goal) carried
    /// over from the teacher repo for interactive scripts.
    pub fn globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: "clock",
                arity: 0,
                function: |_, _| {
                    let now = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .expect("system clock to be after the unix epoch")
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
            NativeFunction {
                name: "input",
                arity: 0,
                function: |_, _| {
                    let mut line = String::new();
                    std::io::stdin()
                        .read_line(&mut line)
                        .map_err(|error| RuntimeError {
                            token: crate::token::Token::new(
                                crate::token::Type::Identifier,
                                "input".to_string(),
                                None,
                                crate::token::Location::default(),
                            ),
                            message: format!("Failed to read stdin: {error}"),
                        })?;
                    if line.ends_with('\n') {
                        line.pop();
                        if line.ends_with('\r') {
                            line.pop();
                        }
                    }
                    Ok(Object::from(line))
                },
            },
        ]
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}
