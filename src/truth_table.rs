use crate::error::{ExprError, Result};
use crate::eval::{evaluate, Assignment};
use crate::token::Postfix;
use log::debug;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Order in which assignments are enumerated.
///
/// In both orders the first (alphabetically smallest) variable toggles slowest
/// and the last toggles fastest; the orders differ in which value every column
/// starts with.
///
/// [`TrueFirst`] yields `TT, TF, FT, FF` for two variables;
/// [`FalseFirst`] yields `FF, FT, TF, TT`.
///
/// [`TrueFirst`]: EnumerationOrder::TrueFirst
/// [`FalseFirst`]: EnumerationOrder::FalseFirst
pub enum EnumerationOrder {
    /// Every column starts at true
    #[default]
    TrueFirst,
    /// Every column starts at false
    FalseFirst,
}

impl EnumerationOrder {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::TrueFirst, Self::FalseFirst]
    }

    fn matches(self, s: &str) -> bool {
        match self {
            Self::TrueFirst => matches!(s, "true-first" | "true" | "t" | "T" | "1"),
            Self::FalseFirst => matches!(s, "false-first" | "false" | "f" | "F" | "0"),
        }
    }

    /// Value of column `column` (of `width`) in the `index`-th row.
    const fn value(self, index: usize, column: usize, width: usize) -> bool {
        let bit = (index >> (width - 1 - column)) & 1 == 1;
        match self {
            Self::TrueFirst => !bit,
            Self::FalseFirst => bit,
        }
    }
}

impl Display for EnumerationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::TrueFirst => "true-first",
            Self::FalseFirst => "false-first",
        })
    }
}

impl FromStr for EnumerationOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as enumeration order"))
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Values in column order.
    pub values: Vec<bool>,
    pub result: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Tautology,
    Contradiction,
    Contingent,
}

impl Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Tautology => "tautology",
            Self::Contradiction => "contradiction",
            Self::Contingent => "contingent",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    /// Column headers, sorted alphabetically.
    pub variables: Vec<char>,
    pub postfix: Postfix,
    pub rows: Vec<Row>,
}

impl TruthTable {
    pub fn classification(&self) -> Classification {
        if self.rows.iter().all(|row| row.result) {
            Classification::Tautology
        } else if self.rows.iter().all(|row| !row.result) {
            Classification::Contradiction
        } else {
            Classification::Contingent
        }
    }

    pub fn satisfying_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(|row| row.result)
    }

    /// Looks up the row with the given values, in column order.
    pub fn row(&self, values: &[bool]) -> Option<&Row> {
        self.rows.iter().find(|row| row.values == values)
    }
}

/// Builds the truth table of `postfix`, enumerating true-first.
pub fn generate(postfix: &Postfix) -> Result<TruthTable> {
    generate_with_order(postfix, EnumerationOrder::TrueFirst)
}

/// Builds the truth table of `postfix`.
///
/// Either every row evaluates or the first failure is returned; a partial
/// table is never produced. An expression without variables still yields a
/// single row.
pub fn generate_with_order(postfix: &Postfix, order: EnumerationOrder) -> Result<TruthTable> {
    if postfix.is_empty() {
        return Err(ExprError::EmptyExpression);
    }

    let variables = postfix.variables();
    let width = variables.len();

    let count = u32::try_from(width)
        .ok()
        .and_then(|w| 1usize.checked_shl(w))
        .ok_or(ExprError::TooManyVariables(width))?;

    debug!("generating {count} rows for {postfix} over {width} variables");

    let rows = (0..count)
        .map(|index| {
            let values: Vec<bool> = (0..width)
                .map(|column| order.value(index, column, width))
                .collect();
            let result = evaluate(postfix, &Assignment::from_columns(&variables, &values))?;
            Ok(Row { values, result })
        })
        .collect::<Result<Vec<Row>>>()?;

    Ok(TruthTable {
        variables,
        postfix: postfix.clone(),
        rows,
    })
}
