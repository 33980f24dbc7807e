//! Source locations and the error types raised while loading a grammar table
//! and while driving the automaton over an input.
//!
//! Two error surfaces are defined here:
//!
//! - [`GrammarError`] covers everything that can go wrong while reading the
//!   CSV description of an LALR(1) table (see [`crate::GrammarTable`]).
//! - [`ParseError`] covers lexical failures, missing table actions and missing
//!   semantic actions. Every variant aborts the current analysis; there is no
//!   recovery and no partial result.
//!
//! # Examples
//!
//! ```rust
//! # use lrsdt::{ParseError, Position, Span};
//! let span = Span::new(Position::new(0, 4), Position::new(0, 5));
//! let err = ParseError::Lexical { text: "#".into(), span };
//! assert_eq!(
//!     err.to_string(),
//!     "lexical error: unexpected character \"#\" at span 0:4 to 0:5"
//! );
//! ```

use smartstring::alias::String;
use thiserror::Error;

/// A 0-based line/column position in source text.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Moves the position past `text`, starting a new line at every `\n`.
    pub fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }
}

/// A half-open source range: `[start, end)`.
///
/// Invariants are not enforced here, but it is conventional for `start <= end`
/// in lexicographic `(line, column)` ordering.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Pretty-print for diagnostics (human-readable).
    #[inline]
    pub fn display(&self) -> std::string::String {
        format!(
            "span {}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Errors raised while reading a grammar table description.
///
/// Line numbers are 1-based and refer to the table source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The grammar table could not be read from disk.
    #[error("unable to read grammar table {path:?}: {message}")]
    Io {
        path: std::string::String,
        message: std::string::String,
    },

    /// The source has no header line.
    #[error("grammar table has no header line")]
    MissingHeader,

    /// The header never declares the `$` end marker, so terminals and
    /// nonterminals cannot be told apart.
    #[error("grammar table header has no end marker `$`")]
    MissingEndMarker,

    /// The same symbol appears twice in the header.
    #[error("symbol {symbol:?} appears twice in the grammar table header")]
    DuplicateSymbol { symbol: String },

    /// A rule line is not of the form `<LHS> -> <symbol> ...`.
    #[error("malformed rule on line {line}: {text:?}")]
    MalformedRule { line: usize, text: String },

    /// A rule references a symbol that the header does not declare.
    #[error("unknown token in grammar: {token:?} on line {line}")]
    UnknownGrammarToken { token: String, line: usize },

    /// A table cell is neither empty, `s<N>`, `r<N>`, `acc` nor a bare state.
    #[error("malformed cell {cell:?} in state {state}, column {column}")]
    MalformedCell {
        state: usize,
        column: usize,
        cell: String,
    },

    /// A row has more non-empty cells than the header has symbols.
    #[error("state {state} has a cell in column {column}, but the header declares {columns} symbols")]
    TooManyCells {
        state: usize,
        column: usize,
        columns: usize,
    },

    /// A reduce cell names a rule index past the end of the rule list.
    #[error("state {state} reduces by rule {rule}, but only {count} rules are defined")]
    UnknownRule {
        state: usize,
        rule: usize,
        count: usize,
    },

    /// A shift or goto cell targets a state that has no row.
    #[error("state {state} moves to state {target}, but only {count} states are defined")]
    UnknownState {
        state: usize,
        target: usize,
        count: usize,
    },
}

/// Errors raised while tokenizing and parsing one input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No lexer rule matches the input at `span`.
    #[error("lexical error: unexpected character {text:?} at {}", .span.display())]
    Lexical { text: String, span: Span },

    /// The table has no action for the current state and lookahead token.
    #[error("syntax error in state {state}: unexpected {}", describe_token(.kind, .literal))]
    UnexpectedToken {
        state: usize,
        kind: String,
        literal: String,
        span: Option<Span>,
    },

    /// After a reduction the exposed state has no transition on the
    /// reduced nonterminal.
    #[error("syntax error in state {state}: no transition on nonterminal {nonterminal}")]
    MissingGoto { state: usize, nonterminal: String },

    /// The entry for a nonterminal is a reduce or accept action instead of a
    /// state transition.
    #[error("state {state} holds {action} for nonterminal {nonterminal}, expected a goto")]
    InvalidGoto {
        state: usize,
        nonterminal: String,
        action: String,
    },

    /// The table shifted the end-of-input marker and asked for more input.
    #[error("unexpected end of input in state {state}")]
    UnexpectedEnd { state: usize },

    /// A reduction needs more stack entries than the stack holds.
    #[error("state {state} reduces by {rule}, but the stack holds only {depth} symbols")]
    StackUnderflow {
        state: usize,
        rule: String,
        depth: usize,
    },

    /// A rule of the loaded table has no semantic action in the translator.
    #[error("no semantic action for production {rule}")]
    UnhandledProduction { rule: String },
}

fn describe_token(kind: &str, literal: &str) -> std::string::String {
    match (kind, literal) {
        ("", _) => "end of input".to_string(),
        (kind, "") => format!("token {kind:?}"),
        (kind, literal) => format!("token {kind:?} ({literal:?})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_advance_tracks_lines_and_columns() {
        let mut pos = Position::default();
        pos.advance("ab");
        assert_eq!(pos, Position::new(0, 2));
        pos.advance("c\nde");
        assert_eq!(pos, Position::new(1, 2));
        pos.advance("\n");
        assert_eq!(pos, Position::new(2, 0));
    }

    #[test]
    fn unexpected_token_names_state_and_token() {
        let err = ParseError::UnexpectedToken {
            state: 7,
            kind: "id".into(),
            literal: "x".into(),
            span: None,
        };
        assert_eq!(
            err.to_string(),
            "syntax error in state 7: unexpected token \"id\" (\"x\")"
        );

        let err = ParseError::UnexpectedToken {
            state: 3,
            kind: ";".into(),
            literal: "".into(),
            span: None,
        };
        assert_eq!(err.to_string(), "syntax error in state 3: unexpected token \";\"");
    }

    #[test]
    fn unexpected_end_marker_reads_as_end_of_input() {
        let err = ParseError::UnexpectedToken {
            state: 1,
            kind: "".into(),
            literal: "".into(),
            span: None,
        };
        assert_eq!(err.to_string(), "syntax error in state 1: unexpected end of input");
    }

    #[test]
    fn missing_goto_names_nonterminal() {
        let err = ParseError::MissingGoto {
            state: 12,
            nonterminal: "Expr".into(),
        };
        assert!(err.to_string().contains("state 12"));
        assert!(err.to_string().contains("Expr"));
    }

    #[test]
    fn grammar_errors_are_descriptive() {
        let err = GrammarError::UnknownGrammarToken {
            token: "Foo".into(),
            line: 4,
        };
        assert_eq!(err.to_string(), "unknown token in grammar: \"Foo\" on line 4");
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn errors_are_send_sync_static() {
        _assert_send_sync_static::<GrammarError>();
        _assert_send_sync_static::<ParseError>();
    }
}
