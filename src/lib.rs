//! scical - scientific calculator expression evaluator
//!
//! # Overview
//!
//! scical turns a typed arithmetic expression into a number without any
//! generic code evaluation. Input flows through three stages:
//!
//! ```text
//! "2+3*4"  --lex-->  2 + 3 * 4  --shunting yard-->  2 3 4 * +  --eval-->  14
//! ```
//!
//! # Grammar
//!
//! ```text
//! 12  1.5  .5          numeric literals
//! pi  e                constants
//! sin cos tan          trigonometry, in degrees
//! sqrt ln log          square root, natural and base-10 logarithm
//! + - * / ^            binary operators (^ is right-associative)
//! ( )                  grouping
//! ```
//!
//! A leading `-` (at the start, after `(` or after another operator) is
//! read as subtraction from zero.
//!
//! # Example
//!
//! ```rust
//! use scical::{evaluate, EvaluationError};
//!
//! assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
//! assert_eq!(evaluate("3*-2").unwrap(), -6.0);
//! assert!(matches!(
//!     evaluate("1/0"),
//!     Err(EvaluationError::NonFiniteResult { .. })
//! ));
//! ```

pub mod display;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

// Re-export commonly used items
pub use display::format_result;
pub use error::EvaluationError;
pub use eval::{eval_postfix, EvalError};
pub use lexer::{normalize_unary_minus, tokenize, Constant, Function, LexError, Operator, Token};
pub use parser::{to_postfix, ParseError};

/// Evaluate an expression to a finite number
pub fn evaluate(text: &str) -> Result<f64, EvaluationError> {
    let tokens = tokenize(text)?;
    let postfix = to_postfix(tokens)?;
    let value = eval_postfix(&postfix)?;

    if !value.is_finite() {
        log::debug!("non-finite result for {:?}: {}", text, value);
        return Err(EvaluationError::non_finite());
    }
    Ok(value)
}
