//! # lrsdt
//!
//! A table-driven LALR(1) engine for syntax-directed translation.
//!
//! The crate reads a precomputed action/goto table from its CSV description,
//! splits source text into tokens with a priority-ordered regex tokenizer, and
//! runs the shift/reduce automaton. Every reduction is handed to a
//! [`Translator`], which computes the synthesized attribute of the reduced
//! nonterminal from the attributes of its children.
//!
//! ## Overview
//!
//! - [`grammar`] — grammar symbols and rules.
//! - [`table`] — the action/goto table ([`GrammarTable`]) and [`Action`].
//! - [`loader`] — reading a [`GrammarTable`] from its CSV description.
//! - [`lexer`] — the ordered regex tokenizer ([`Lexer`]).
//! - [`token`] — tokens with source spans.
//! - [`parser`] — the shift/reduce driver ([`Parser`]) and the [`Translator`]
//!   seam through which semantic actions plug in.
//! - [`error`] — source positions and the error types.
//!
//! ## Example
//!
//! ```rust
//! use lrsdt::{
//!     GrammarTable, LexRule, Lexer, ParseError, Parser, Rule, Token, TokenClass, Translator,
//! };
//!
//! // Counts the identifiers in a `+`-separated list.
//! struct Count;
//!
//! #[derive(Debug, Clone, Copy)]
//! enum Prod {
//!     Start,
//!     More,
//!     One,
//! }
//!
//! impl Translator for Count {
//!     type Production = Prod;
//!     type Value = usize;
//!     type Context = ();
//!     type Error = ParseError;
//!
//!     fn classify(&self, rule: &Rule) -> Option<Prod> {
//!         use lrsdt::SymbolPattern::*;
//!         if rule.matches("S'", &[NonTerm("S")]) {
//!             Some(Prod::Start)
//!         } else if rule.matches("S", &[NonTerm("S"), Term("+"), Term("id")]) {
//!             Some(Prod::More)
//!         } else if rule.matches("S", &[Term("id")]) {
//!             Some(Prod::One)
//!         } else {
//!             None
//!         }
//!     }
//!
//!     fn shift(&self, _token: Token) -> usize {
//!         0
//!     }
//!
//!     fn reduce(&self, _: &mut (), prod: Prod, children: Vec<usize>) -> Result<usize, ParseError> {
//!         Ok(match prod {
//!             Prod::Start => children[0],
//!             Prod::More => children[0] + 1,
//!             Prod::One => 1,
//!         })
//!     }
//! }
//!
//! let table: GrammarTable = "\
//! ,id,+,$,S',S
//!
//! S' -> S
//! S -> S + id
//! S -> id
//!
//! 0,s1,,,,2
//! 1,,r2,r2,,
//! 2,,s3,acc,,
//! 3,s4,,,,
//! 4,,r1,r1,,
//! "
//! .parse()
//! .unwrap();
//!
//! let lexer = Lexer::try_new(vec![
//!     LexRule::new(TokenClass::Identifier, "[a-z]+"),
//!     LexRule::new(TokenClass::Punct, r"\+"),
//!     LexRule::new(TokenClass::Skip, r"\s+"),
//! ])
//! .unwrap();
//!
//! let parser = Parser::try_new(table, Count).unwrap();
//! let tokens = lexer.tokenize("a + b + c").unwrap();
//! assert_eq!(parser.parse(tokens, &mut ()).unwrap(), 3);
//! ```
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod table;
pub mod token;

pub use error::{GrammarError, ParseError, Position, Span};
pub use grammar::{GrammarSymbol, Rule, SymbolPattern};
pub use lexer::{LexRule, Lexer, TokenClass};
pub use parser::{Parser, ParserStats, Translator};
pub use table::{Action, GrammarTable, RuleId, StateId};
pub use token::Token;
