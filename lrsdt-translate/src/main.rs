//! Command-line interface for lrsdt-translate.
//!
//! ```text
//! lrsdt tac [--grammar table.csv] [--input prog.txt] [--check-declarations] [--symbols]
//! lrsdt parens [--grammar table.csv] [--input expr.txt]
//! ```
//!
//! Without `--grammar` the bundled table is used; without `--input` the
//! program is read from standard input. Set `RUST_LOG=trace` to watch the
//! automaton.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use lrsdt::GrammarTable;
use lrsdt_translate::{ARRAYS_GRAMMAR, Compiler, Options, PARENS_GRAMMAR, Simplifier};
use smartstring::alias::String;
use std::io::Read;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translates declarations and assignments to three-address code
    Tac {
        /// LALR(1) table in CSV form
        #[arg(short, long)]
        grammar: Option<String>,
        /// Program text; standard input when omitted
        #[arg(short, long)]
        input: Option<String>,
        /// Reject identifiers used before they are declared
        #[arg(long)]
        check_declarations: bool,
        /// Print the symbol table after the code
        #[arg(long)]
        symbols: bool,
    },
    /// Removes redundant parentheses from an expression
    Parens {
        /// LALR(1) table in CSV form
        #[arg(short, long)]
        grammar: Option<String>,
        /// Expression text; standard input when omitted
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn load_table(path: Option<&str>, bundled: &str) -> Result<GrammarTable> {
    let table = match path {
        Some(path) => GrammarTable::from_path(path)?,
        None => GrammarTable::from_csv(bundled)?,
    };
    Ok(table)
}

fn read_input(path: Option<&str>) -> Result<std::string::String> {
    let text = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("can't open {:?}", path))?
        }
        None => {
            let mut text = std::string::String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("can't read standard input")?;
            text
        }
    };
    Ok(text)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Tac {
            grammar,
            input,
            check_declarations,
            symbols,
        } => {
            let table = load_table(grammar.as_deref(), ARRAYS_GRAMMAR)?;
            let options = Options::new().check_declarations(check_declarations);
            let compiler = Compiler::from_table(table, options)?;
            let text = read_input(input.as_deref())?;
            let out = compiler.translate(&text)?;
            print!("{}", out.code);
            if symbols {
                println!();
                print!("{}", out.symbols);
            }
            log::info!("{:?}", out.stats);
        }
        Commands::Parens { grammar, input } => {
            let table = load_table(grammar.as_deref(), PARENS_GRAMMAR)?;
            let simplifier = Simplifier::from_table(table)?;
            let text = read_input(input.as_deref())?;
            println!("{}", simplifier.simplify(&text)?);
        }
    }
    Ok(())
}
