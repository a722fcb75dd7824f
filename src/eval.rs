use crate::error::{ExprError, Result};
use crate::token::{Postfix, Token};
use rustc_hash::FxHashMap;

/// One boolean value per variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: FxHashMap<char, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `variables` with `values` positionally.
    pub fn from_columns(variables: &[char], values: &[bool]) -> Self {
        variables.iter().copied().zip(values.iter().copied()).collect()
    }

    pub fn get(&self, variable: char) -> Option<bool> {
        self.values.get(&variable).copied()
    }
}

impl FromIterator<(char, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (char, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Evaluates `postfix` under `assignment` with an explicit value stack.
///
/// For a binary operator the value on top of the stack is the right-hand
/// operand and the one beneath it the left-hand operand.
pub fn evaluate(postfix: &Postfix, assignment: &Assignment) -> Result<bool> {
    let mut stack: Vec<bool> = Vec::with_capacity(postfix.len());

    for (position, token) in postfix.tokens().iter().enumerate() {
        match *token {
            Token::Variable(v) => {
                let value = assignment.get(v).ok_or(ExprError::UnboundVariable(v))?;
                stack.push(value);
            }
            Token::Operator(op) => {
                let right = stack.pop().ok_or(ExprError::StackUnderflow { position })?;
                let left = if op.is_unary() {
                    None
                } else {
                    Some(stack.pop().ok_or(ExprError::StackUnderflow { position })?)
                };
                let value = op.apply(left, right).ok_or(ExprError::MalformedPostfix {
                    remaining: stack.len(),
                })?;
                stack.push(value);
            }
            Token::LeftParen => {
                return Err(ExprError::InvalidToken {
                    symbol: '(',
                    position,
                })
            }
            Token::RightParen => {
                return Err(ExprError::InvalidToken {
                    symbol: ')',
                    position,
                })
            }
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        rest => Err(ExprError::MalformedPostfix {
            remaining: rest.len(),
        }),
    }
}
