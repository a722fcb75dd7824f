use anyhow::ensure;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpnlogic::{Associativity, Convention, OperatorKind, OperatorTable};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const BINARY: [OperatorKind; 4] = [
    OperatorKind::And,
    OperatorKind::Or,
    OperatorKind::Implies,
    OperatorKind::Iff,
];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short = 'n', long, default_value_t = 10, value_name = "N")]
    /// The number of formulae to generate
    count: usize,

    #[clap(short = 'k', long, default_value_t = 3, value_name = "K")]
    /// The number of distinct variables (taken from P onward, wrapping through the alphabet)
    vars: usize,

    #[clap(short, long, default_value_t = 4, value_name = "D")]
    /// Maximum nesting depth of a formula
    depth: usize,

    #[clap(short, long, value_name = "S")]
    /// Seed for reproducible output
    seed: Option<u64>,

    #[clap(long, default_value_t = Convention::Standard)]
    /// Operator table the output is parenthesised for: standard or right-chaining
    convention: Convention,

    #[clap(value_parser, short, long, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,
}

enum Formula {
    Var(char),
    Not(Box<Formula>),
    Binary(OperatorKind, Box<Formula>, Box<Formula>),
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    ensure!(
        (1..=26).contains(&args.vars),
        "the number of variables must be between 1 and 26"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let variables = variable_names(args.vars);
    let table = OperatorTable::from(args.convention);

    let mut writer = if let Some(output_file) = args.output {
        let file = File::create(output_file)?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    for _ in 0..args.count {
        let formula = random_formula(&mut rng, &variables, args.depth);
        writeln!(writer, "{}", render(&formula, &table))?;
    }

    // flush the writer before dropping it
    writer.flush()?;

    Ok(())
}

fn variable_names(count: usize) -> Vec<char> {
    (b'P'..=b'Z').chain(b'A'..b'P').take(count).map(char::from).collect()
}

fn random_formula<R: Rng>(rng: &mut R, variables: &[char], depth: usize) -> Formula {
    if depth == 0 || rng.gen_bool(0.3) {
        return Formula::Var(variables[rng.gen_range(0..variables.len())]);
    }

    if rng.gen_bool(0.2) {
        return Formula::Not(Box::new(random_formula(rng, variables, depth - 1)));
    }

    let op = BINARY[rng.gen_range(0..BINARY.len())];
    Formula::Binary(
        op,
        Box::new(random_formula(rng, variables, depth - 1)),
        Box::new(random_formula(rng, variables, depth - 1)),
    )
}

/// Prints `formula` in infix form with just enough parentheses for `table`
/// to read it back as the same tree.
fn render(formula: &Formula, table: &OperatorTable) -> String {
    match formula {
        Formula::Var(v) => v.to_string(),
        Formula::Not(f) => match f.as_ref() {
            Formula::Binary(..) => format!("~({})", render(f, table)),
            _ => format!("~{}", render(f, table)),
        },
        Formula::Binary(op, l, r) => {
            let left = render_operand(l, *op, false, table);
            let right = render_operand(r, *op, true, table);
            format!("{left}{op}{right}")
        }
    }
}

fn render_operand(
    operand: &Formula,
    parent: OperatorKind,
    is_right: bool,
    table: &OperatorTable,
) -> String {
    let inner = render(operand, table);

    match operand {
        Formula::Binary(op, _, _) => {
            let child = table.precedence(*op);
            let outer = table.precedence(parent);
            // the operand on the grouping side of an equal-precedence chain needs no parentheses
            let grouped_side = match table.associativity(parent) {
                Associativity::Left => !is_right,
                Associativity::Right => is_right,
            };
            if child < outer || (child == outer && !grouped_side) {
                format!("({inner})")
            } else {
                inner
            }
        }
        _ => inner,
    }
}
