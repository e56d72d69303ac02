use crate::token::{Token, TokenType};
use std::fmt::{self, Display};
use std::rc::Rc;
use thiserror::Error;

pub type ExprRef = Box<Expr>;

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Literal(Token),
    Grouping(ExprRef),
    Unary(Token, ExprRef),
    Binary(Token, ExprRef, ExprRef),
}

/// A runtime value. Every expression evaluates to exactly one of these.
#[derive(Debug, PartialEq, Clone)]
pub enum Val {
    Str(Rc<str>),
    Num(f64),
    Bool(bool),
    Nil,
}

impl Val {
    // Only nil and false are falsy; 0 and "" count as true.
    pub fn truthy(&self) -> bool {
        match self {
            Val::Nil => false,
            Val::Bool(b) => *b,
            _ => true,
        }
    }
}

impl Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Str(x) => write!(f, "{}", x),
            Self::Num(x) => write!(f, "{}", x),
            Self::Bool(x) => write!(f, "{}", x),
            Self::Nil => write!(f, "nil"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("operand to {operator} must be a number, got {operand}")]
    NotNumber {
        operator: Rc<str>,
        operand: Val,
        line: usize,
    },
    #[error("operands to {operator} must be numbers, got {left}, {right}")]
    NotNumbers {
        operator: Rc<str>,
        left: Val,
        right: Val,
        line: usize,
    },
    #[error("operands to + must be two numbers or two strings")]
    AddOperands { line: usize },
}

impl EvalError {
    pub fn line(&self) -> usize {
        match self {
            Self::NotNumber { line, .. }
            | Self::NotNumbers { line, .. }
            | Self::AddOperands { line } => *line,
        }
    }
}

impl Expr {
    /// Evaluates the tree to a single value. Operands are evaluated left to
    /// right, and the first error aborts everything still pending above it.
    pub fn eval(&self) -> Result<Val, EvalError> {
        match self {
            Self::Literal(tok) => Ok(literal_value(tok)),
            Self::Grouping(inner) => inner.eval(),
            Self::Unary(op, right) => {
                let r = right.eval()?;
                match &op.data {
                    TokenType::Minus => {
                        let n = check_number(op, r)?;
                        Ok(Val::Num(-n))
                    }
                    TokenType::Bang => Ok(Val::Bool(!r.truthy())),
                    _ => Ok(Val::Nil),
                }
            }
            Self::Binary(op, left, right) => {
                let l = left.eval()?;
                let r = right.eval()?;

                match &op.data {
                    TokenType::BangEqual => Ok(Val::Bool(l != r)),
                    TokenType::EqualEqual => Ok(Val::Bool(l == r)),
                    TokenType::Greater => {
                        let (a, b) = check_numbers(op, l, r)?;
                        Ok(Val::Bool(a > b))
                    }
                    TokenType::GreaterEqual => {
                        let (a, b) = check_numbers(op, l, r)?;
                        Ok(Val::Bool(a >= b))
                    }
                    TokenType::Less => {
                        let (a, b) = check_numbers(op, l, r)?;
                        Ok(Val::Bool(a < b))
                    }
                    TokenType::LessEqual => {
                        let (a, b) = check_numbers(op, l, r)?;
                        Ok(Val::Bool(a <= b))
                    }
                    TokenType::Minus => {
                        let (a, b) = check_numbers(op, l, r)?;
                        Ok(Val::Num(a - b))
                    }
                    // Division by zero keeps the IEEE result (inf or NaN).
                    TokenType::Slash => {
                        let (a, b) = check_numbers(op, l, r)?;
                        Ok(Val::Num(a / b))
                    }
                    TokenType::Star => {
                        let (a, b) = check_numbers(op, l, r)?;
                        Ok(Val::Num(a * b))
                    }
                    TokenType::Plus => match (&l, &r) {
                        (Val::Num(a), Val::Num(b)) => Ok(Val::Num(a + b)),
                        (Val::Str(a), Val::Str(b)) => Ok(Val::Str(format!("{a}{b}").into())),
                        _ => Err(EvalError::AddOperands { line: op.line }),
                    },
                    _ => Ok(Val::Nil),
                }
            }
        }
    }
}

fn literal_value(tok: &Token) -> Val {
    match &tok.data {
        TokenType::Number(n) => Val::Num(*n),
        TokenType::String(s) => Val::Str(s.clone()),
        TokenType::True => Val::Bool(true),
        TokenType::False => Val::Bool(false),
        _ => Val::Nil,
    }
}

fn check_number(op: &Token, operand: Val) -> Result<f64, EvalError> {
    match operand {
        Val::Num(n) => Ok(n),
        other => Err(EvalError::NotNumber {
            operator: op.lexeme.clone(),
            operand: other,
            line: op.line,
        }),
    }
}

fn check_numbers(op: &Token, left: Val, right: Val) -> Result<(f64, f64), EvalError> {
    match (left, right) {
        (Val::Num(a), Val::Num(b)) => Ok((a, b)),
        (l, r) => Err(EvalError::NotNumbers {
            operator: op.lexeme.clone(),
            left: l,
            right: r,
            line: op.line,
        }),
    }
}
