use crate::token::{Associativity, OperatorKind};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Binding strength and associativity of a single operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Higher binds tighter.
    pub precedence: u8,
    pub associativity: Associativity,
}

impl Binding {
    const fn left(precedence: u8) -> Self {
        Self {
            precedence,
            associativity: Associativity::Left,
        }
    }

    const fn right(precedence: u8) -> Self {
        Self {
            precedence,
            associativity: Associativity::Right,
        }
    }
}

/// Immutable precedence table handed to a [`Converter`](crate::convert::Converter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorTable {
    not: Binding,
    and: Binding,
    or: Binding,
    implies: Binding,
    iff: Binding,
}

impl OperatorTable {
    /// `~` binds tightest and chains to the right; all binary operators are
    /// left-associative, `&` over `|` over `>` over `=`.
    pub const fn standard() -> Self {
        Self {
            not: Binding::right(5),
            and: Binding::left(4),
            or: Binding::left(3),
            implies: Binding::left(2),
            iff: Binding::left(1),
        }
    }

    /// Same ladder as [`standard`](Self::standard), but `>` and `=` group to
    /// the right, so `A>B>C` reads as `A>(B>C)`.
    pub const fn right_chaining() -> Self {
        Self {
            not: Binding::right(4),
            and: Binding::left(3),
            or: Binding::left(2),
            implies: Binding::right(1),
            iff: Binding::right(0),
        }
    }

    pub const fn binding(&self, op: OperatorKind) -> Binding {
        match op {
            OperatorKind::Not => self.not,
            OperatorKind::And => self.and,
            OperatorKind::Or => self.or,
            OperatorKind::Implies => self.implies,
            OperatorKind::Iff => self.iff,
        }
    }

    pub const fn precedence(&self, op: OperatorKind) -> u8 {
        self.binding(op).precedence
    }

    pub const fn associativity(&self, op: OperatorKind) -> Associativity {
        self.binding(op).associativity
    }

    /// Whether `top`, sitting on the operator stack, must be emitted before
    /// `incoming` is pushed.
    pub fn yields_to(&self, top: OperatorKind, incoming: OperatorKind) -> bool {
        let top = self.binding(top);
        let incoming = self.binding(incoming);

        top.precedence > incoming.precedence
            || (top.precedence == incoming.precedence
                && incoming.associativity == Associativity::Left)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<Convention> for OperatorTable {
    fn from(convention: Convention) -> Self {
        match convention {
            Convention::Standard => Self::standard(),
            Convention::RightChaining => Self::right_chaining(),
        }
    }
}

/// Named choice between the supported precedence tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    #[default]
    Standard,
    RightChaining,
}

impl Convention {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::Standard, Self::RightChaining]
    }

    fn matches(self, s: &str) -> bool {
        match self {
            Self::Standard => matches!(s, "standard" | "left" | "s"),
            Self::RightChaining => matches!(s, "right-chaining" | "right" | "r"),
        }
    }
}

impl Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Standard => "standard",
            Self::RightChaining => "right-chaining",
        })
    }
}

impl FromStr for Convention {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as operator convention"))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn standard_ladder() {
        let table = OperatorTable::standard();
        let ladder = [
            OperatorKind::Not,
            OperatorKind::And,
            OperatorKind::Or,
            OperatorKind::Implies,
            OperatorKind::Iff,
        ];

        for pair in ladder.windows(2) {
            assert!(table.precedence(pair[0]) > table.precedence(pair[1]));
        }
        assert_eq!(table.associativity(OperatorKind::Not), Associativity::Right);
        assert_eq!(table.associativity(OperatorKind::Implies), Associativity::Left);
    }

    #[test]
    fn equal_precedence_left_operator_yields() {
        let table = OperatorTable::standard();
        assert!(table.yields_to(OperatorKind::Implies, OperatorKind::Implies));
        assert!(table.yields_to(OperatorKind::And, OperatorKind::Or));
        assert!(!table.yields_to(OperatorKind::Or, OperatorKind::And));
        assert!(!table.yields_to(OperatorKind::Not, OperatorKind::Not));
    }

    #[test]
    fn right_chaining_keeps_implications_stacked() {
        let table = OperatorTable::right_chaining();
        assert!(!table.yields_to(OperatorKind::Implies, OperatorKind::Implies));
        assert!(!table.yields_to(OperatorKind::Iff, OperatorKind::Iff));
        assert!(table.yields_to(OperatorKind::And, OperatorKind::And));
    }

    #[test]
    fn parse_convention() {
        assert_eq!("standard".parse::<Convention>().ok(), Some(Convention::Standard));
        assert_eq!("right".parse::<Convention>().ok(), Some(Convention::RightChaining));
        assert!("sideways".parse::<Convention>().is_err());
    }
}
