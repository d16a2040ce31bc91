//! Tokenization for scical
//!
//! Tokens represent the atomic elements of a calculator expression:
//! numeric literals, the constants `pi` and `e`, the six unary functions,
//! the five binary operators and parentheses.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit0, digit1},
    combinator::{map_res, recognize, value},
    sequence::{delimited, tuple},
    IResult,
};
use std::fmt;
use thiserror::Error;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Pow, // ^
}

/// Unary math functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Ln,
    Log,
}

/// Named constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A numeric literal
    Number(f64),
    /// `pi` or `e`
    Constant(Constant),
    /// A function name, applied to the operand that follows it
    Function(Function),
    /// A binary operator
    Operator(Operator),
    /// Group start: (
    LeftParen,
    /// Group end: )
    RightParen,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Enter an expression.")]
    EmptyInput,
    #[error("Unexpected character near: \"{near}\"")]
    UnexpectedChar { position: usize, near: String },
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Sqrt => "sqrt",
            Function::Ln => "ln",
            Function::Log => "log",
        }
    }
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Constant(c) => f.write_str(c.name()),
            Token::Function(func) => f.write_str(func.name()),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Skip any run of whitespace (including non-ASCII whitespace)
fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace())(input)
}

/// Parse a numeric literal: `[0-9]*\.?[0-9]+`
///
/// `1.` is not a literal on its own: the fractional form needs at least one
/// digit after the dot, so the scan falls back to the integer `1`.
fn number(input: &str) -> IResult<&str, Token> {
    map_res(
        alt((recognize(tuple((digit0, char('.'), digit1))), digit1)),
        |s: &str| s.parse::<f64>().map(Token::Number),
    )(input)
}

/// Parse `pi` or `e`
fn constant(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Constant(Constant::Pi), tag("pi")),
        value(Token::Constant(Constant::E), tag("e")),
    ))(input)
}

/// Parse a function name
fn function(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Function(Function::Sin), tag("sin")),
        value(Token::Function(Function::Cos), tag("cos")),
        value(Token::Function(Function::Tan), tag("tan")),
        value(Token::Function(Function::Sqrt), tag("sqrt")),
        value(Token::Function(Function::Ln), tag("ln")),
        value(Token::Function(Function::Log), tag("log")),
    ))(input)
}

/// Parse a single-char operator or parenthesis
fn symbol(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Operator(Operator::Add), char('+')),
        value(Token::Operator(Operator::Sub), char('-')),
        value(Token::Operator(Operator::Mul), char('*')),
        value(Token::Operator(Operator::Div), char('/')),
        value(Token::Operator(Operator::Pow), char('^')),
        value(Token::LeftParen, char('(')),
        value(Token::RightParen, char(')')),
    ))(input)
}

/// Parse any single token with its surrounding whitespace
fn token(input: &str) -> IResult<&str, Token> {
    // Alternatives are ordered, first match wins
    delimited(
        whitespace,
        alt((number, constant, function, symbol)),
        whitespace,
    )(input)
}

/// Scan one token of `text` starting at byte offset `pos`.
///
/// Returns the token and the offset just past it (and past any trailing
/// whitespace). The scan never holds state between calls, so the same
/// `(text, pos)` always yields the same answer.
pub fn scan(text: &str, pos: usize) -> Result<(Token, usize), LexError> {
    if let Ok((rest, tok)) = token(&text[pos..]) {
        let next = text.len() - rest.len();
        if next > pos {
            return Ok((tok, next));
        }
    }

    let start = pos + whitespace(&text[pos..]).map(|(_, ws)| ws.len()).unwrap_or(0);
    Err(LexError::UnexpectedChar {
        position: start,
        near: text[start..].chars().take(10).collect(),
    })
}

/// Split `text` into raw tokens, without unary-minus normalization
pub fn scan_all(text: &str) -> Result<Vec<Token>, LexError> {
    if text.trim().is_empty() {
        return Err(LexError::EmptyInput);
    }

    let mut tokens = Vec::new();
    let mut pos = text.len() - text.trim_start().len();
    while pos < text.len() {
        let (tok, next) = scan(text, pos)?;
        tokens.push(tok);
        pos = next;
    }
    Ok(tokens)
}

/// Rewrite unary minus as a subtraction from a synthetic zero.
///
/// A `-` is unary when it is the first token or follows an operator or `(`.
/// After an operator the synthetic `0 - operand` is additionally wrapped in
/// parentheses, otherwise `3*-2` would read as `3*0-2`.
pub fn normalize_unary_minus(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() + 2);
    // Positions (in `tokens`) before which a synthetic `)` is due
    let mut closes: Vec<usize> = Vec::new();

    for (i, tok) in tokens.iter().enumerate() {
        close_groups(&mut closes, i, &mut out);

        if *tok == Token::Operator(Operator::Sub) {
            match i.checked_sub(1).map(|j| tokens[j]) {
                None | Some(Token::LeftParen) => {
                    out.push(Token::Number(0.0));
                }
                Some(Token::Operator(_)) => {
                    out.push(Token::LeftParen);
                    out.push(Token::Number(0.0));
                    closes.push(operand_end(&tokens, i + 1));
                }
                Some(_) => {}
            }
        }
        out.push(*tok);
    }
    close_groups(&mut closes, tokens.len(), &mut out);

    out
}

/// Emit a `)` for every synthetic group that ends at `pos`
fn close_groups(closes: &mut Vec<usize>, pos: usize, out: &mut Vec<Token>) {
    closes.retain(|&end| {
        if end == pos {
            out.push(Token::RightParen);
            false
        } else {
            true
        }
    });
}

/// Index just past the operand that starts at `i`.
///
/// An operand is any number of nested unary minuses, an optional function
/// name, then a literal, constant or parenthesized group, extended through
/// a following `^` chain. Malformed input stops early and is left for the
/// later stages to reject.
fn operand_end(tokens: &[Token], mut i: usize) -> usize {
    while tokens.get(i) == Some(&Token::Operator(Operator::Sub)) {
        i += 1;
    }
    if let Some(Token::Function(_)) = tokens.get(i) {
        i += 1;
    }

    match tokens.get(i) {
        Some(Token::Number(_)) | Some(Token::Constant(_)) => i += 1,
        Some(Token::LeftParen) => i = matching_paren(tokens, i),
        _ => return i,
    }

    if tokens.get(i) == Some(&Token::Operator(Operator::Pow)) {
        return operand_end(tokens, i + 1);
    }
    i
}

/// Index just past the `)` matching the `(` at `open`, or the end of input
fn matching_paren(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate().skip(open) {
        match tok {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

/// Tokenize a complete expression
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let tokens = normalize_unary_minus(scan_all(text)?);
    log::debug!("tokens: {}", join_tokens(&tokens));
    Ok(tokens)
}

/// Render a token sequence separated by spaces
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Token {
        Token::Number(n)
    }

    fn op(o: Operator) -> Token {
        Token::Operator(o)
    }

    #[test]
    fn tokenize_number() {
        assert_eq!(tokenize("42").unwrap(), vec![num(42.0)]);
    }

    #[test]
    fn tokenize_fractions() {
        assert_eq!(tokenize("1.5").unwrap(), vec![num(1.5)]);
        assert_eq!(tokenize(".25").unwrap(), vec![num(0.25)]);
    }

    #[test]
    fn tokenize_expression_with_whitespace() {
        let tokens = tokenize("  2 +\t3 * 4 ").unwrap();
        assert_eq!(
            tokens,
            vec![
                num(2.0),
                op(Operator::Add),
                num(3.0),
                op(Operator::Mul),
                num(4.0),
            ]
        );
    }

    #[test]
    fn tokenize_constants_and_functions() {
        let tokens = tokenize("sqrt(pi)+ln e").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Function(Function::Sqrt),
                Token::LeftParen,
                Token::Constant(Constant::Pi),
                Token::RightParen,
                op(Operator::Add),
                Token::Function(Function::Ln),
                Token::Constant(Constant::E),
            ]
        );
    }

    #[test]
    fn tokenize_log_and_ln() {
        let tokens = tokenize("log ln").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Function(Function::Log), Token::Function(Function::Ln)]
        );
    }

    #[test]
    fn tokenize_adjacent_identifiers() {
        // Greedy matching without any separator rule
        let tokens = tokenize("pie").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Constant(Constant::Pi), Token::Constant(Constant::E)]
        );
    }

    #[test]
    fn tokenize_trailing_dot_is_rejected() {
        let err = tokenize("1.").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar { position: 1, near: ".".to_string() }
        );
    }

    #[test]
    fn tokenize_empty_input() {
        assert_eq!(tokenize("").unwrap_err(), LexError::EmptyInput);
        assert_eq!(tokenize(" \t\n").unwrap_err(), LexError::EmptyInput);
    }

    #[test]
    fn tokenize_illegal_character_reports_position() {
        let err = tokenize("2$3").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar { position: 1, near: "$3".to_string() }
        );
    }

    #[test]
    fn tokenize_illegal_character_after_whitespace() {
        let err = tokenize("  1 + x").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedChar { position: 6, near: "x".to_string() }
        );
    }

    #[test]
    fn tokenize_snippet_is_capped() {
        match tokenize("1 + abcdefghijklmnop").unwrap_err() {
            LexError::UnexpectedChar { near, .. } => assert_eq!(near, "abcdefghij"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn scan_is_pure() {
        let text = "12 + 3";
        assert_eq!(scan(text, 0).unwrap(), (num(12.0), 3));
        assert_eq!(scan(text, 3).unwrap(), (op(Operator::Add), 5));
        assert_eq!(scan(text, 0).unwrap(), (num(12.0), 3));
    }

    #[test]
    fn unary_minus_at_start() {
        let tokens = tokenize("-5+3").unwrap();
        assert_eq!(
            tokens,
            vec![num(0.0), op(Operator::Sub), num(5.0), op(Operator::Add), num(3.0)]
        );
    }

    #[test]
    fn unary_minus_after_paren() {
        let tokens = tokenize("(-2)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                num(0.0),
                op(Operator::Sub),
                num(2.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn unary_minus_after_operator_is_grouped() {
        let tokens = tokenize("3*-2").unwrap();
        assert_eq!(
            tokens,
            vec![
                num(3.0),
                op(Operator::Mul),
                Token::LeftParen,
                num(0.0),
                op(Operator::Sub),
                num(2.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn unary_minus_group_covers_function_call() {
        let tokens = tokenize("2*-sin(30)+1").unwrap();
        assert_eq!(
            tokens,
            vec![
                num(2.0),
                op(Operator::Mul),
                Token::LeftParen,
                num(0.0),
                op(Operator::Sub),
                Token::Function(Function::Sin),
                Token::LeftParen,
                num(30.0),
                Token::RightParen,
                Token::RightParen,
                op(Operator::Add),
                num(1.0),
            ]
        );
    }

    #[test]
    fn unary_minus_group_covers_power_chain() {
        let tokens = tokenize("2*-3^2").unwrap();
        assert_eq!(
            tokens,
            vec![
                num(2.0),
                op(Operator::Mul),
                Token::LeftParen,
                num(0.0),
                op(Operator::Sub),
                num(3.0),
                op(Operator::Pow),
                num(2.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn binary_minus_untouched() {
        let tokens = tokenize("5-2").unwrap();
        assert_eq!(tokens, vec![num(5.0), op(Operator::Sub), num(2.0)]);
    }

    #[test]
    fn token_display() {
        let tokens = tokenize("sqrt(2.5)^pi").unwrap();
        assert_eq!(join_tokens(&tokens), "sqrt ( 2.5 ) ^ pi");
    }
}
