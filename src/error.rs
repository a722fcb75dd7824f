//! Errors raised while tokenizing, converting and evaluating formulae.

use thiserror::Error;

/// Every failure the engine can report.
///
/// Errors are raised by the stage that first observes them and are never
/// recovered internally; positions are zero-based token (character) indices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A character that is neither a variable, an operator nor a parenthesis.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidToken { symbol: char, position: usize },

    /// Zero-length input.
    #[error("empty expression")]
    EmptyExpression,

    /// Parenthesis nesting does not close.
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },

    /// An operator or operand in a position where it cannot be resolved.
    #[error("malformed expression at position {position}")]
    MalformedExpression { position: usize },

    /// The postfix sequence does not reduce to exactly one value.
    #[error("malformed postfix expression: {remaining} values left on the stack")]
    MalformedPostfix { remaining: usize },

    /// An operator was reached without enough operands on the stack.
    #[error("stack underflow at position {position}")]
    StackUnderflow { position: usize },

    /// The assignment does not bind a variable of the expression.
    #[error("no value assigned to variable {0}")]
    UnboundVariable(char),

    /// The assignment count does not fit in a row index.
    #[error("too many variables to enumerate ({0})")]
    TooManyVariables(usize),
}

impl ExprError {
    /// Stable name of the error kind, used when reporting batch failures.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken { .. } => "InvalidToken",
            Self::EmptyExpression => "EmptyExpression",
            Self::UnbalancedParentheses { .. } => "UnbalancedParentheses",
            Self::MalformedExpression { .. } => "MalformedExpression",
            Self::MalformedPostfix { .. } => "MalformedPostfix",
            Self::StackUnderflow { .. } => "StackUnderflow",
            Self::UnboundVariable(_) => "UnboundVariable",
            Self::TooManyVariables(_) => "TooManyVariables",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExprError>;
