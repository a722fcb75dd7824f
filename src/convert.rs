//! Infix to postfix conversion with the shunting-yard algorithm.

use crate::error::{ExprError, Result};
use crate::precedence::OperatorTable;
use crate::token::{tokenize, OperatorKind, Postfix, Token};
use log::{debug, trace};

/// Entries of the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Operator(OperatorKind),
    Paren { position: usize },
}

/// What the next token has to be for the input to stay well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A variable, `(` or a prefix operator.
    Operand,
    /// A binary operator or `)`.
    Operator,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    table: OperatorTable,
}

impl Converter {
    pub const fn new(table: OperatorTable) -> Self {
        Self { table }
    }

    pub fn convert_str(&self, infix: &str) -> Result<Postfix> {
        let tokens = tokenize(infix)?;
        let postfix = self.convert(&tokens)?;

        debug!("converted {infix} to {postfix}");

        Ok(postfix)
    }

    pub fn convert(&self, tokens: &[Token]) -> Result<Postfix> {
        if tokens.is_empty() {
            return Err(ExprError::EmptyExpression);
        }

        let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut stack: Vec<Pending> = Vec::new();
        let mut expect = Expect::Operand;

        for (position, token) in tokens.iter().enumerate() {
            trace!("{position}: {token} (stack depth {})", stack.len());

            match (*token, expect) {
                (Token::Variable(_), Expect::Operand) => {
                    output.push(*token);
                    expect = Expect::Operator;
                }
                (Token::LeftParen, Expect::Operand) => {
                    stack.push(Pending::Paren { position });
                }
                (Token::Operator(op), Expect::Operand) if op.is_unary() => {
                    // a prefix operator has no left operand to wait for
                    stack.push(Pending::Operator(op));
                }
                (Token::Operator(op), Expect::Operator) if !op.is_unary() => {
                    while let Some(&Pending::Operator(top)) = stack.last() {
                        if !self.table.yields_to(top, op) {
                            break;
                        }
                        output.push(Token::Operator(top));
                        stack.pop();
                    }
                    stack.push(Pending::Operator(op));
                    expect = Expect::Operand;
                }
                (Token::RightParen, _) => {
                    if !stack.iter().any(|p| matches!(p, Pending::Paren { .. })) {
                        return Err(ExprError::UnbalancedParentheses { position });
                    }
                    if expect == Expect::Operand {
                        return Err(ExprError::MalformedExpression { position });
                    }
                    while let Some(pending) = stack.pop() {
                        match pending {
                            Pending::Operator(op) => output.push(Token::Operator(op)),
                            Pending::Paren { .. } => break,
                        }
                    }
                }
                _ => return Err(ExprError::MalformedExpression { position }),
            }
        }

        if let Some(position) = stack.iter().find_map(|p| match p {
            Pending::Paren { position } => Some(*position),
            Pending::Operator(_) => None,
        }) {
            return Err(ExprError::UnbalancedParentheses { position });
        }

        if expect == Expect::Operand {
            return Err(ExprError::MalformedExpression {
                position: tokens.len(),
            });
        }

        output.extend(stack.drain(..).rev().filter_map(|p| match p {
            Pending::Operator(op) => Some(Token::Operator(op)),
            Pending::Paren { .. } => None,
        }));

        Ok(Postfix::new(output))
    }
}

/// Converts with the standard operator table.
pub fn convert(tokens: &[Token]) -> Result<Postfix> {
    Converter::default().convert(tokens)
}
