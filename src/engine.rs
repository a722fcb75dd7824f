use crate::convert::Converter;
use crate::error::Result;
use crate::precedence::OperatorTable;
use crate::token::Postfix;
use crate::truth_table::{generate_with_order, EnumerationOrder, TruthTable};

/// Converter and enumeration settings bundled for repeated use over a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    converter: Converter,
    order: EnumerationOrder,
}

impl Engine {
    pub const fn new(table: OperatorTable, order: EnumerationOrder) -> Self {
        Self {
            converter: Converter::new(table),
            order,
        }
    }

    pub fn to_postfix(&self, infix: &str) -> Result<Postfix> {
        self.converter.convert_str(infix)
    }

    pub fn table(&self, postfix: &Postfix) -> Result<TruthTable> {
        generate_with_order(postfix, self.order)
    }

    /// Converts `infix` and builds its truth table.
    pub fn truth_table(&self, infix: &str) -> Result<TruthTable> {
        let postfix = self.to_postfix(infix)?;
        self.table(&postfix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExprError;

    use test_log::test;

    #[test]
    fn right_chaining_changes_the_table() {
        let left = Engine::default().truth_table("A>B>C").expect("table");
        let right = Engine::new(OperatorTable::right_chaining(), EnumerationOrder::TrueFirst)
            .truth_table("A>B>C")
            .expect("table");

        assert_eq!(left.postfix.to_string(), "AB>C>");
        assert_eq!(right.postfix.to_string(), "ABC>>");
        // A=F, B=T, C=F separates (A>B)>C from A>(B>C)
        let row = [false, true, false];
        assert_eq!(left.row(&row).map(|r| r.result), Some(false));
        assert_eq!(right.row(&row).map(|r| r.result), Some(true));
    }

    #[test]
    fn errors_propagate() {
        assert_eq!(
            Engine::default().truth_table("(P&Q"),
            Err(ExprError::UnbalancedParentheses { position: 0 })
        );
        assert_eq!(
            Engine::default().truth_table(""),
            Err(ExprError::EmptyExpression)
        );
    }
}
