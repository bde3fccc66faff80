//! Unambiguous, fully-parenthesized textual rendering of the AST, used by
//! tests and `--print-ast`-style debugging. Covers every `Expr`/`Stmt`
//! variant, including `return`, `class`, `this` and `super` — the book's own
//! printer only ever grew the original expression-only set.

use crate::expr::*;
use crate::stmt::*;

macro_rules! parenthesize {
    ( $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &print_expr($x);
            )*
            string += ")";
            string
        }
    };
}

pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(literal) => literal.to_string(),
        Expr::Grouping(data) => parenthesize!("group", &data.expr),
        Expr::Unary(data) => parenthesize!(&data.operator.lexeme, &data.expr),
        Expr::Binary(data) => parenthesize!(&data.operator.lexeme, &data.left, &data.right),
        Expr::Logical(data) => parenthesize!(&data.operator.lexeme, &data.left, &data.right),
        Expr::Variable(data) => data.name.lexeme.clone(),
        Expr::Assign(data) => parenthesize!(&format!("= {}", data.name.lexeme), &data.value),
        Expr::Call(data) => {
            let mut string = print_expr(&data.callee);
            string += "(";
            string += &data.arguments.iter().map(print_expr).collect::<Vec<_>>().join(" ");
            string += ")";
            string
        }
        Expr::Get(data) => parenthesize!(&format!(".{}", data.name.lexeme), &data.object),
        Expr::Set(data) => {
            parenthesize!(&format!(".{} =", data.name.lexeme), &data.object, &data.value)
        }
        Expr::This(_) => "this".to_string(),
        Expr::Super(data) => format!("(super.{})", data.method.lexeme),
    }
}

pub fn print_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Expression(data) => parenthesize!("expr", &data.expr),
        Stmt::Print(data) => parenthesize!("print", &data.expr),
        Stmt::Var(data) => {
            let mut string = format!("(var {}", data.name.lexeme);
            if let Some(initializer) = &data.initializer {
                string += " = ";
                string += &print_expr(initializer);
            }
            string += ")";
            string
        }
        Stmt::Block(data) => {
            let mut string = String::from("{");
            for stmt in &data.statements {
                string += " ";
                string += &print_stmt(stmt);
            }
            string += " }";
            string
        }
        Stmt::If(data) => {
            let mut string = format!("(if {} {}", print_expr(&data.condition), print_stmt(&data.then_branch));
            if let Some(else_branch) = &data.else_branch {
                string += " else ";
                string += &print_stmt(else_branch);
            }
            string += ")";
            string
        }
        Stmt::While(data) => {
            format!("(while {} {})", print_expr(&data.condition), print_stmt(&data.body))
        }
        Stmt::Function(data) => {
            let params = data.params.iter().map(|p| p.lexeme.as_str()).collect::<Vec<_>>().join(" ");
            let body = data.body.iter().map(print_stmt).collect::<Vec<_>>().join(" ");
            format!("(fun {}({}) {{ {} }})", data.name.lexeme, params, body)
        }
        Stmt::Return(data) => match &data.value {
            Some(value) => parenthesize!("return", value),
            None => "(return)".to_string(),
        },
        Stmt::Class(data) => {
            let mut string = format!("(class {}", data.name.lexeme);
            if let Some(superclass) = &data.superclass {
                string += " < ";
                string += &print_expr(superclass);
            }
            for method in &data.methods {
                string += " ";
                string += &print_stmt(method);
            }
            string += ")";
            string
        }
    }
}
