use std::{
    fmt::{self, Debug, Display},
    slice::Iter,
};

use crate::lexer::tokens::Token;

use super::{
    expressions::{
        BooleanExpr, CallExpr, FunctionExpr, IfExpr, InfixExpr, IntegerExpr, PrefixExpr, StringExpr,
        SymbolExpr,
    },
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

/// Behaviour shared by every node in the tree.
pub trait Node: Debug + Display {
    /// The token whose parse rule produced this node.
    fn token(&self) -> &Token;

    /// The source text of [`Node::token`].
    fn token_literal(&self) -> &str {
        &self.token().value
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Node for Stmt {
    fn token(&self) -> &Token {
        match self {
            Stmt::Let(stmt) => stmt.token(),
            Stmt::Return(stmt) => stmt.token(),
            Stmt::Expression(stmt) => stmt.token(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Symbol(SymbolExpr),
    Integer(IntegerExpr),
    Boolean(BooleanExpr),
    String(StringExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionExpr),
    Call(CallExpr),
}

impl Node for Expr {
    fn token(&self) -> &Token {
        match self {
            Expr::Symbol(expr) => expr.token(),
            Expr::Integer(expr) => expr.token(),
            Expr::Boolean(expr) => expr.token(),
            Expr::String(expr) => expr.token(),
            Expr::Prefix(expr) => expr.token(),
            Expr::Infix(expr) => expr.token(),
            Expr::If(expr) => expr.token(),
            Expr::Function(expr) => expr.token(),
            Expr::Call(expr) => expr.token(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr),
            Expr::Boolean(expr) => write!(f, "{}", expr),
            Expr::String(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Infix(expr) => write!(f, "{}", expr),
            Expr::If(expr) => write!(f, "{}", expr),
            Expr::Function(expr) => write!(f, "{}", expr),
            Expr::Call(expr) => write!(f, "{}", expr),
        }
    }
}

/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }

        Ok(())
    }
}
