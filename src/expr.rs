use crate::literal::Literal;
use crate::token::Token;

/// Expression AST nodes (spec.md §3). Modeled as a tagged enum over
/// per-variant data structs so that every consumer (resolver, interpreter,
/// printer) traverses it with an exhaustive `match` rather than visitor
/// dispatch.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    Grouping(GroupingData),
    Unary(UnaryData),
    Binary(BinaryData),
    Logical(LogicalData),
    Variable(VariableData),
    Assign(AssignData),
    Call(CallData),
    Get(GetData),
    Set(SetData),
    This(ThisData),
    Super(SuperData),
}

#[derive(Debug, Clone)]
pub struct GroupingData {
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct UnaryData {
    pub operator: Token,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct LogicalData {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct VariableData {
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct AssignData {
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct CallData {
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct GetData {
    pub object: Box<Expr>,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct SetData {
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct ThisData {
    pub keyword: Token,
}

#[derive(Debug, Clone)]
pub struct SuperData {
    pub keyword: Token,
    pub method: Token,
}
