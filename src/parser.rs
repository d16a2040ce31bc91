//! Infix to postfix conversion for scical
//!
//! Classic shunting-yard: operands go straight to the output, operators
//! and functions wait on a stack until precedence, associativity or a
//! closing parenthesis releases them.

use crate::lexer::{join_tokens, Function, Operator, Token};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Mismatched parentheses.")]
    MismatchedParentheses,
}

/// Binding strength of a binary operator
pub fn precedence(op: Operator) -> u8 {
    match op {
        Operator::Pow => 4,
        Operator::Mul | Operator::Div => 3,
        Operator::Add | Operator::Sub => 2,
    }
}

pub fn is_right_associative(op: Operator) -> bool {
    op == Operator::Pow
}

/// Entries that can wait on the operator stack
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Operator(Operator),
    Function(Function),
    LeftParen,
}

impl Pending {
    fn into_token(self) -> Token {
        match self {
            Pending::Operator(op) => Token::Operator(op),
            Pending::Function(func) => Token::Function(func),
            Pending::LeftParen => Token::LeftParen,
        }
    }
}

/// Converter state, alive for a single conversion
struct ShuntingYard {
    output: Vec<Token>,
    stack: Vec<Pending>,
}

impl ShuntingYard {
    fn new(capacity: usize) -> Self {
        ShuntingYard {
            output: Vec::with_capacity(capacity),
            stack: Vec::new(),
        }
    }

    fn push_token(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::Number(_) | Token::Constant(_) => self.output.push(token),
            Token::Function(func) => self.stack.push(Pending::Function(func)),
            Token::Operator(op) => self.push_operator(op),
            Token::LeftParen => self.stack.push(Pending::LeftParen),
            Token::RightParen => self.close_group()?,
        }
        Ok(())
    }

    /// Release everything that binds at least as tightly as `op`, then wait
    fn push_operator(&mut self, op: Operator) {
        while let Some(&top) = self.stack.last() {
            let release = match top {
                Pending::Function(_) => true,
                Pending::Operator(top_op) => {
                    if is_right_associative(op) {
                        precedence(op) < precedence(top_op)
                    } else {
                        precedence(op) <= precedence(top_op)
                    }
                }
                Pending::LeftParen => false,
            };
            if !release {
                break;
            }
            self.stack.pop();
            self.output.push(top.into_token());
        }
        self.stack.push(Pending::Operator(op));
    }

    /// Handle `)`: flush back to the matching `(` and bind a waiting function
    fn close_group(&mut self) -> Result<(), ParseError> {
        loop {
            match self.stack.pop() {
                Some(Pending::LeftParen) => break,
                Some(pending) => self.output.push(pending.into_token()),
                None => return Err(ParseError::MismatchedParentheses),
            }
        }

        if let Some(&Pending::Function(func)) = self.stack.last() {
            self.stack.pop();
            self.output.push(Token::Function(func));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(pending) = self.stack.pop() {
            if pending == Pending::LeftParen {
                return Err(ParseError::MismatchedParentheses);
            }
            self.output.push(pending.into_token());
        }
        Ok(self.output)
    }
}

/// Convert an infix token sequence to postfix (Reverse Polish) order
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut converter = ShuntingYard::new(tokens.len());
    for token in tokens {
        converter.push_token(token)?;
    }
    let postfix = converter.finish()?;
    log::debug!("postfix: {}", join_tokens(&postfix));
    Ok(postfix)
}
