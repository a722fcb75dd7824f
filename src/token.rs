use crate::error::{ExprError, Result};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

lazy_static! {
    static ref TOKENIZER: Regex = Regex::new(
        r"(?s)(?P<variable>[A-Za-z])|(?P<operator>[~&|>=])|(?P<open>\()|(?P<close>\))|(?P<other>.)"
    )
    .expect("tokenizer pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Not,
    And,
    Or,
    Implies,
    Iff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

impl OperatorKind {
    pub const ALL: [Self; 5] = [Self::Not, Self::And, Self::Or, Self::Implies, Self::Iff];

    pub const fn symbol(self) -> char {
        match self {
            Self::Not => '~',
            Self::And => '&',
            Self::Or => '|',
            Self::Implies => '>',
            Self::Iff => '=',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '~' => Some(Self::Not),
            '&' => Some(Self::And),
            '|' => Some(Self::Or),
            '>' => Some(Self::Implies),
            '=' => Some(Self::Iff),
            _ => None,
        }
    }

    /// NOT is the only prefix operator; every other operator is binary infix.
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }

    /// Applies the operator to its operands; `left` is the operand written
    /// first in the source and is absent exactly for prefix operators.
    ///
    /// Returns `None` when the operands do not match the operator's arity.
    pub const fn apply(self, left: Option<bool>, right: bool) -> Option<bool> {
        match (self, left) {
            (Self::Not, None) => Some(!right),
            (Self::And, Some(left)) => Some(left && right),
            (Self::Or, Some(left)) => Some(left || right),
            (Self::Implies, Some(left)) => Some(!left || right),
            (Self::Iff, Some(left)) => Some(left == right),
            _ => None,
        }
    }
}

impl Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Lexical unit of a formula, in either infix or postfix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Variable(char),
    Operator(OperatorKind),
    LeftParen,
    RightParen,
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(v) => write!(f, "{v}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
        }
    }
}

/// Classifies every character of `src` into a [`Token`].
///
/// Letters of either case are variables (`a` and `A` are distinct); any other
/// character outside the operator set and parentheses is rejected, whitespace
/// included.
pub fn tokenize(src: &str) -> Result<Vec<Token>> {
    if src.is_empty() {
        return Err(ExprError::EmptyExpression);
    }

    let mut result = Vec::with_capacity(src.len());

    for (position, c) in TOKENIZER.captures_iter(src).enumerate() {
        if let Some(variable) = c.name("variable") {
            result.push(Token::Variable(first_char(variable.as_str())));
        } else if let Some(operator) = c.name("operator") {
            let symbol = first_char(operator.as_str());
            match OperatorKind::from_symbol(symbol) {
                Some(op) => result.push(Token::Operator(op)),
                None => return Err(ExprError::InvalidToken { symbol, position }),
            }
        } else if c.name("open").is_some() {
            result.push(Token::LeftParen);
        } else if c.name("close").is_some() {
            result.push(Token::RightParen);
        } else {
            let symbol = c.get(0).map_or('\0', |m| first_char(m.as_str()));
            return Err(ExprError::InvalidToken { symbol, position });
        }
    }

    Ok(result)
}

fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or('\0')
}

/// A formula in reverse-Polish order.
///
/// Derived once per infix formula and reused for every assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The distinct variables of the expression in alphabetical order.
    pub fn variables(&self) -> Vec<char> {
        self.0
            .iter()
            .filter_map(|t| match t {
                Token::Variable(v) => Some(*v),
                _ => None,
            })
            .unique()
            .sorted()
            .collect()
    }
}

impl Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.iter().join(""))
    }
}

impl FromStr for Postfix {
    type Err = ExprError;

    /// Reads a string that is already in postfix order; no reordering happens.
    fn from_str(s: &str) -> Result<Self> {
        tokenize(s).map(Self)
    }
}
