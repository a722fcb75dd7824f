use crate::truth_table::TruthTable;
use itertools::Itertools;
use std::{
    fmt::{self, Display},
    io::{self, Write},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How boolean cells are printed.
///
/// [`Word`] prints `True`/`False`, [`Letter`] prints `T`/`F` and [`Digit`]
/// prints `1`/`0`.
///
/// [`Word`]: ValueStyle::Word
/// [`Letter`]: ValueStyle::Letter
/// [`Digit`]: ValueStyle::Digit
pub enum ValueStyle {
    #[default]
    Word,
    Letter,
    Digit,
}

impl ValueStyle {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::Word, Self::Letter, Self::Digit]
    }

    fn matches(self, s: &str) -> bool {
        match self {
            Self::Word => matches!(s, "word" | "words" | "Word" | "w"),
            Self::Letter => matches!(s, "letter" | "letters" | "Letter" | "l"),
            Self::Digit => matches!(s, "digit" | "digits" | "Digit" | "d"),
        }
    }

    pub const fn format(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::Word, true) => "True",
            (Self::Word, false) => "False",
            (Self::Letter, true) => "T",
            (Self::Letter, false) => "F",
            (Self::Digit, true) => "1",
            (Self::Digit, false) => "0",
        }
    }

    const fn width(self) -> usize {
        match self {
            Self::Word => 5,
            Self::Letter | Self::Digit => 1,
        }
    }
}

impl Display for ValueStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Word => "word",
            Self::Letter => "letter",
            Self::Digit => "digit",
        })
    }
}

impl FromStr for ValueStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as value style"))
            .copied()
    }
}

/// Writes `table` as ` | `-separated text: a header of the variables and the
/// postfix expression, a dashed rule, then one line per row.
pub fn write_table<W: Write>(
    writer: &mut W,
    table: &TruthTable,
    style: ValueStyle,
) -> io::Result<()> {
    let headers: Vec<String> = table
        .variables
        .iter()
        .map(char::to_string)
        .chain(std::iter::once(table.postfix.to_string()))
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .map(|h| h.chars().count().max(style.width()))
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .join(" | ");

    writeln!(writer, "{}", header_line.trim_end())?;
    writeln!(writer, "{}", "-".repeat(header_line.trim_end().len()))?;

    for row in &table.rows {
        let line = row
            .values
            .iter()
            .chain(std::iter::once(&row.result))
            .zip(&widths)
            .map(|(&v, &w)| format!("{:<w$}", style.format(v)))
            .join(" | ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

/// Writes a batch of tables as one CSV document.
///
/// The header holds an `expression` column, the union of all variables in
/// alphabetical order and a `result` column, plus `classification` when
/// `classify` is set. Variables an expression does not mention stay empty.
pub fn write_csv<W: Write>(
    writer: W,
    tables: &[(&str, &TruthTable)],
    style: ValueStyle,
    classify: bool,
) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

    let columns: Vec<char> = tables
        .iter()
        .flat_map(|(_, table)| table.variables.iter().copied())
        .unique()
        .sorted()
        .collect();

    let mut header = vec!["expression".to_string()];
    header.extend(columns.iter().map(char::to_string));
    header.push("result".to_string());
    if classify {
        header.push("classification".to_string());
    }
    csv_writer.write_record(&header)?;

    for (expression, table) in tables {
        let classification = table.classification().to_string();

        for row in &table.rows {
            let mut record = vec![expression.to_string()];
            record.extend(columns.iter().map(|c| {
                table
                    .variables
                    .iter()
                    .position(|v| v == c)
                    .map_or_else(String::new, |i| style.format(row.values[i]).to_string())
            }));
            record.push(style.format(row.result).to_string());
            if classify {
                record.push(classification.clone());
            }
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Postfix;
    use crate::truth_table::generate;

    use pretty_assertions::assert_eq;
    use test_log::test;

    fn render(postfix: &str, style: ValueStyle) -> String {
        let postfix: Postfix = postfix.parse().expect("valid postfix");
        let table = generate(&postfix).expect("table");
        let mut out = Vec::new();
        write_table(&mut out, &table, style).expect("write");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn letters() {
        assert_eq!(
            render("AB>", ValueStyle::Letter),
            "A | B | AB>\n\
             -----------\n\
             T | T | T\n\
             T | F | F\n\
             F | T | T\n\
             F | F | T\n"
        );
    }

    #[test]
    fn words_are_padded() {
        assert_eq!(
            render("A~", ValueStyle::Word),
            "A     | A~\n\
             ----------\n\
             True  | False\n\
             False | True\n"
        );
    }

    fn table(postfix: &str) -> TruthTable {
        let postfix: Postfix = postfix.parse().expect("valid postfix");
        generate(&postfix).expect("table")
    }

    #[test]
    fn csv_output() {
        let and = table("AB&");
        let mut out = Vec::new();
        write_csv(&mut out, &[("A&B", &and)], ValueStyle::Digit, false).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "expression,A,B,result\nA&B,1,1,1\nA&B,1,0,0\nA&B,0,1,0\nA&B,0,0,0\n"
        );
    }

    #[test]
    fn csv_batch_shares_one_header() {
        let and = table("AB&");
        let not = table("P~");
        let mut out = Vec::new();
        write_csv(
            &mut out,
            &[("A&B", &and), ("~P", &not)],
            ValueStyle::Letter,
            true,
        )
        .expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "expression,A,B,P,result,classification\n\
             A&B,T,T,,T,contingent\n\
             A&B,T,F,,F,contingent\n\
             A&B,F,T,,F,contingent\n\
             A&B,F,F,,F,contingent\n\
             ~P,,,T,F,contingent\n\
             ~P,,,F,T,contingent\n"
        );
    }

    #[test]
    fn parse_style() {
        assert_eq!("letters".parse::<ValueStyle>().ok(), Some(ValueStyle::Letter));
        assert_eq!("d".parse::<ValueStyle>().ok(), Some(ValueStyle::Digit));
        assert!("roman".parse::<ValueStyle>().is_err());
    }
}
