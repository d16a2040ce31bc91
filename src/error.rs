//! User-facing evaluation errors
//!
//! Each stage has its own error enum; they fold into three kinds here so a
//! caller can tell a malformed expression from one that is well-formed but
//! has no finite value.

use crate::eval::EvalError;
use crate::lexer::LexError;
use crate::parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Illegal character, empty input or unbalanced parentheses
    #[error("{message}")]
    SyntaxError {
        message: String,
        position: Option<usize>,
    },
    /// Tokens that cannot be reduced to a single value
    #[error("{message}")]
    SemanticError { message: String },
    /// Valid expression whose value is NaN or infinite
    #[error("{message}")]
    NonFiniteResult { message: String },
}

impl EvaluationError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::SyntaxError { .. } => "syntax",
            EvaluationError::SemanticError { .. } => "semantic",
            EvaluationError::NonFiniteResult { .. } => "non_finite",
        }
    }

    /// Byte offset into the input, when the error points at one
    pub fn position(&self) -> Option<usize> {
        match self {
            EvaluationError::SyntaxError { position, .. } => *position,
            _ => None,
        }
    }

    pub(crate) fn non_finite() -> Self {
        EvaluationError::NonFiniteResult {
            message: "Result is not a finite number.".to_string(),
        }
    }
}

impl From<LexError> for EvaluationError {
    fn from(err: LexError) -> Self {
        let position = match &err {
            LexError::EmptyInput => None,
            LexError::UnexpectedChar { position, .. } => Some(*position),
        };
        EvaluationError::SyntaxError {
            message: err.to_string(),
            position,
        }
    }
}

impl From<ParseError> for EvaluationError {
    fn from(err: ParseError) -> Self {
        EvaluationError::SyntaxError {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<EvalError> for EvaluationError {
    fn from(err: EvalError) -> Self {
        EvaluationError::SemanticError {
            message: err.to_string(),
        }
    }
}
