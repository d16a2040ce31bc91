//! Postfix evaluation for scical
//!
//! Walks a postfix token sequence with an operand stack. Domain errors
//! (division by zero, square root of a negative, logarithm of a
//! non-positive) produce NaN rather than an error; the caller decides what
//! a non-finite result means.

use crate::lexer::{Function, Operator, Token};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid expression.")]
    InvalidExpression,
    #[error("Invalid function usage: {0} needs an argument.")]
    InvalidFunctionUsage(&'static str),
    #[error("Unexpected token in postfix input: {0}")]
    UnexpectedToken(String),
}

/// Apply a binary operator to `a` (pushed first) and `b`
pub fn apply_operator(op: Operator, a: f64, b: f64) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        }
        Operator::Pow => a.powf(b),
    }
}

/// Apply a unary function; trigonometry takes degrees
pub fn apply_function(func: Function, a: f64) -> f64 {
    match func {
        Function::Sin => a.to_radians().sin(),
        Function::Cos => a.to_radians().cos(),
        Function::Tan => a.to_radians().tan(),
        Function::Sqrt => {
            if a < 0.0 {
                f64::NAN
            } else {
                a.sqrt()
            }
        }
        Function::Ln => {
            if a <= 0.0 {
                f64::NAN
            } else {
                a.ln()
            }
        }
        Function::Log => {
            if a <= 0.0 {
                f64::NAN
            } else {
                a.log10()
            }
        }
    }
}

/// Evaluate a postfix token sequence to a single number
pub fn eval_postfix(tokens: &[Token]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in tokens {
        match *token {
            Token::Number(n) => stack.push(n),
            Token::Constant(c) => stack.push(c.value()),
            Token::Operator(op) => {
                let b = stack.pop().ok_or(EvalError::InvalidExpression)?;
                let a = stack.pop().ok_or(EvalError::InvalidExpression)?;
                stack.push(apply_operator(op, a, b));
            }
            Token::Function(func) => {
                let a = stack
                    .pop()
                    .ok_or(EvalError::InvalidFunctionUsage(func.name()))?;
                stack.push(apply_function(func, a));
            }
            Token::LeftParen | Token::RightParen => {
                return Err(EvalError::UnexpectedToken(token.to_string()));
            }
        }
        log::trace!("{:>6} -> {:?}", token.to_string(), stack);
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::InvalidExpression),
    }
}
