use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};
use rpnlogic::render::{write_csv, write_table};
use rpnlogic::{
    Convention, Engine, EnumerationOrder, ExprError, OperatorTable, Postfix, TruthTable, ValueStyle,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

const DEMO_BATCH: [&str; 5] = [
    "R|(P&Q)",
    "~P|(Q&R)>R",
    "P|(R&Q)",
    "(P>Q)&(Q>R)",
    "(P|~Q)>~P=(P|(~Q))>~P",
];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPRESSION")]
    /// Infix expressions, e.g. 'R|(P&Q)'; the demonstration batch is used when none are given
    expressions: Vec<String>,

    #[clap(short, long, value_parser, value_name = "FILE")]
    /// Read expressions from a file, one per line ('#' starts a comment line)
    input: Option<PathBuf>,

    #[clap(short, long, value_parser, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,

    #[clap(short, long, default_value_t = ValueStyle::Word, env = "RPNLOGIC_STYLE")]
    /// Cell style: word (True/False), letter (T/F) or digit (1/0)
    style: ValueStyle,

    #[clap(long, default_value_t = EnumerationOrder::TrueFirst, env = "RPNLOGIC_ORDER")]
    /// Start every column at true (true-first) or at false (false-first)
    order: EnumerationOrder,

    #[clap(long, default_value_t = Convention::Standard, env = "RPNLOGIC_CONVENTION")]
    /// Operator table: standard (all binary operators left-associative) or right-chaining
    convention: Convention,

    #[clap(long)]
    /// Write tables as CSV instead of text
    csv: bool,

    #[clap(long)]
    /// The inputs are already in postfix order
    postfix: bool,

    #[clap(short, long)]
    /// Report whether each expression is a tautology, a contradiction or contingent
    classify: bool,

    #[clap(long, default_value_t = 12, value_name = "N")]
    /// Skip expressions with more than N distinct variables
    max_vars: usize,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace)
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(argfile::expand_args_from(
        wild::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?);

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let expressions = collect_expressions(&args)?;
    let engine = Engine::new(OperatorTable::from(args.convention), args.order);

    info!(
        "processing {} expressions ({} convention, {} enumeration)",
        expressions.len(),
        args.convention,
        args.order
    );

    let mut writer = if let Some(output_file) = &args.output {
        let file = File::create(output_file)
            .with_context(|| format!("cannot create {}", output_file.display()))?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    let mut failures = 0usize;
    let mut csv_tables: Vec<(&str, TruthTable)> = Vec::new();

    for expression in &expressions {
        let table = match build_table(&engine, &args, expression) {
            Ok(Some(table)) => table,
            Ok(None) => continue,
            Err(e) => {
                failures += 1;
                writer.flush()?;
                eprintln!("Expression {expression:?} failed: {} ({e})", e.kind());
                continue;
            }
        };

        if args.csv {
            csv_tables.push((expression, table));
        } else {
            write_text(&mut writer, &args, expression, &table).context("cannot write output")?;
        }
    }

    if args.csv {
        let tables: Vec<(&str, &TruthTable)> = csv_tables.iter().map(|(e, t)| (*e, t)).collect();
        write_csv(&mut writer, &tables, args.style, args.classify)
            .context("cannot write output")?;
    }

    // flush the writer before dropping it
    writer.flush().context("cannot flush output")?;

    if failures > 0 {
        bail!("{failures} of {} expressions failed", expressions.len());
    }

    Ok(())
}

/// Converts `expression` (unless it is already postfix) and builds its table;
/// `None` when it has more variables than allowed.
fn build_table(
    engine: &Engine,
    args: &Args,
    expression: &str,
) -> Result<Option<TruthTable>, ExprError> {
    let postfix: Postfix = if args.postfix {
        expression.parse()?
    } else {
        engine.to_postfix(expression)?
    };

    let variables = postfix.variables();
    if variables.len() > args.max_vars {
        warn!(
            "skipping {expression}: {} variables exceed the limit of {}",
            variables.len(),
            args.max_vars
        );
        return Ok(None);
    }

    engine.table(&postfix).map(Some)
}

fn write_text<W: Write>(
    writer: &mut W,
    args: &Args,
    expression: &str,
    table: &TruthTable,
) -> io::Result<()> {
    writeln!(writer)?;
    if !args.postfix {
        writeln!(writer, "Infix: {expression}")?;
    }
    writeln!(writer, "Postfix: {}", table.postfix)?;
    write_table(writer, table, args.style)?;

    if args.classify {
        writeln!(writer, "Classification: {}", table.classification())?;
    }

    Ok(())
}

fn collect_expressions(args: &Args) -> anyhow::Result<Vec<String>> {
    let mut expressions = args.expressions.clone();

    if let Some(path) = &args.input {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;

        for line in BufReader::new(file).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            expressions.push(line.to_string());
        }
    }

    if expressions.is_empty() && args.input.is_none() {
        expressions = DEMO_BATCH.iter().map(|e| e.to_string()).collect();
    }

    Ok(expressions)
}
