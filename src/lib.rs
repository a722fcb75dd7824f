#![warn(clippy::disallowed_types)]

pub use convert::{convert, Converter};
pub use engine::Engine;
pub use error::ExprError;
pub use eval::{evaluate, Assignment};
pub use precedence::{Convention, OperatorTable};
pub use render::ValueStyle;
pub use token::{tokenize, Associativity, OperatorKind, Postfix, Token};
pub use truth_table::{
    generate, generate_with_order, Classification, EnumerationOrder, Row, TruthTable,
};

pub mod convert;
pub mod error;
pub mod eval;
pub mod precedence;
pub mod render;
pub mod token;

mod engine;
mod truth_table;

/// Alias of [`generate`] under its interface name.
pub fn generate_table(postfix: &Postfix) -> error::Result<TruthTable> {
    generate(postfix)
}
