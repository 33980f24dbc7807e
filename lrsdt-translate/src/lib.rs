//! # lrsdt-translate
//!
//! Syntax-directed translation schemes built on **lrsdt**: a front end for a
//! small language of scalar and array declarations and assignments that
//! emits three-address code, and a rewriter that removes redundant
//! parentheses from infix expressions.
//!
//! ## Overview
//!
//! - [`tac`] — the three-address translator ([`Compiler`]).
//! - [`parens`] — the parentheses rewriter ([`Simplifier`]).
//! - [`symtab`] — the symbol table ([`SymbolTable`]) of declared names and
//!   temporaries.
//! - [`ir`] — three-address instructions.
//! - [`attr`] — synthesized attributes carried on the parse stack.
//!
//! Both translators ship with an LALR(1) table in the CSV format read by
//! [`lrsdt::GrammarTable`] ([`ARRAYS_GRAMMAR`], [`PARENS_GRAMMAR`]); any
//! table over the same productions can be used instead.
//!
//! ## Example
//!
//! ```rust
//! use lrsdt_translate::{ARRAYS_GRAMMAR, compile};
//!
//! let code = compile(ARRAYS_GRAMMAR, "int[5][4] a; x = a[i][j];").unwrap();
//! assert_eq!(
//!     code,
//!     "t0 = i * 32\nt1 = j * 8\nt2 = t0 + t1\nt3 = a [t2]\nx = t3\n"
//! );
//! ```
pub mod attr;
pub mod config;
pub mod error;
pub mod ir;
pub mod parens;
pub mod symtab;
pub mod tac;

pub use config::Options;
pub use error::TacError;
pub use ir::{BinOp, Instr};
pub use parens::Simplifier;
pub use symtab::{SymTabError, SymbolEntry, SymbolTable};
pub use tac::{Compiler, Translation};

/// LALR(1) table for declarations, assignments and array expressions.
pub const ARRAYS_GRAMMAR: &str = include_str!("../grammars/arrays.csv");

/// LALR(1) table for `+`, `-` and `*` expressions with parentheses.
pub const PARENS_GRAMMAR: &str = include_str!("../grammars/parens.csv");

/// Translates `input` to three-address code using the table in
/// `grammar_src`, without checking that identifiers are declared.
pub fn compile(grammar_src: &str, input: &str) -> Result<String, TacError> {
    compile_with(grammar_src, input, Options::default())
}

pub fn compile_with(grammar_src: &str, input: &str, options: Options) -> Result<String, TacError> {
    Ok(Compiler::new(grammar_src, options)?.translate(input)?.code)
}

/// Removes redundant parentheses from `input` using the table in
/// `grammar_src`.
///
/// ```rust
/// # use lrsdt_translate::{PARENS_GRAMMAR, simplify_parens};
/// assert_eq!(simplify_parens(PARENS_GRAMMAR, "(a*b)+(c+d)").unwrap(), "a*b+(c+d)");
/// ```
pub fn simplify_parens(grammar_src: &str, input: &str) -> Result<String, TacError> {
    Simplifier::new(grammar_src)?.simplify(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_scenarios() {
        let _ = env_logger::builder().is_test(true).try_init();
        let code = compile(
            ARRAYS_GRAMMAR,
            "int[5][4] a; int[5][4] b; int[5] c; x = a[b[i][j]][c[k]];",
        )
        .unwrap();
        assert_eq!(code.lines().count(), 11);
        assert_eq!(code.lines().last(), Some("x = t9"));

        let code = compile(ARRAYS_GRAMMAR, "int a; a = 1 + 1 * 2;").unwrap();
        assert_eq!(code, "t0 = 1 * 2\nt1 = 1 + t0\na = t1\n");
    }

    #[test]
    fn compile_with_checks_declarations() {
        let opts = Options::new().check_declarations(true);
        let err = compile_with(ARRAYS_GRAMMAR, "x = y;", opts).unwrap_err();
        assert_eq!(err.undefined_symbol(), Some("y"));
        assert!(compile_with(ARRAYS_GRAMMAR, "int y; x = y;", opts).is_ok());
    }

    #[test]
    fn bad_grammar_is_reported() {
        let err = compile("S -> a", "x = 1;").unwrap_err();
        assert_eq!(err, TacError::Grammar(lrsdt::GrammarError::MissingEndMarker));
    }
}
