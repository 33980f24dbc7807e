//! # Translation Error Type
//!
//! This module defines [`TacError`], the error surface of every translation
//! in this crate. It aggregates failures from:
//!
//! - **Grammar tables** (loading the CSV description),
//! - **Lexing and parsing** (no table action, missing goto, unknown rule),
//! - **Symbol-table lookups** (names used before declaration),
//! - **Declarations** (array extents that are not sizes, overflowing sizes).
//!
//! Conversions from the underlying error types are derived with `#[from]`, so
//! `?` works at every call site.
use crate::SymTabError;
use lrsdt::{GrammarError, ParseError};
use smartstring::alias::String;
use thiserror::Error;

/// Represents all possible errors of a translation.
///
/// # Examples
/// ```rust
/// # use lrsdt_translate::{SymTabError, TacError};
/// let underlying = SymTabError::UndefinedSymbol { name: "x".into() };
/// let err: TacError = underlying.into();
/// assert!(matches!(err, TacError::SymTab(_)));
/// assert_eq!(err.to_string(), "undefined symbol \"x\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TacError {
    /// The grammar table could not be loaded.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// Lexical or syntax error, or a rule without a semantic action.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A symbol-table lookup failed.
    #[error(transparent)]
    SymTab(#[from] SymTabError),

    /// An array extent is not a valid size.
    #[error("invalid array extent {text:?}")]
    InvalidExtent { text: String },

    /// The byte size of a declared array does not fit in `usize`.
    #[error("size of {name:?} overflows")]
    SizeOverflow { name: String },

    /// A production received an attribute of the wrong kind. Only reachable
    /// with a grammar table whose rules do not fit the translator.
    #[error("attribute mismatch: expected {expected}, found {found}")]
    AttributeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl TacError {
    /// Returns the undefined name if this is an undefined-symbol error.
    pub fn undefined_symbol(&self) -> Option<&str> {
        match self {
            TacError::SymTab(SymTabError::UndefinedSymbol { name }) => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_error_trait_obj(e: &dyn std::error::Error) -> &dyn std::error::Error {
        e
    }

    #[test]
    fn grammar_error_maps_to_tac_error() {
        let err: TacError = GrammarError::MissingHeader.into();
        assert!(matches!(err, TacError::Grammar(_)));
        let _ = _assert_error_trait_obj(&err);
        assert_eq!(err.to_string(), "grammar table has no header line");
    }

    #[test]
    fn parse_error_maps_to_tac_error() {
        let err: TacError = ParseError::UnexpectedEnd { state: 4 }.into();
        assert!(matches!(err, TacError::Parse(_)));
        assert!(err.to_string().contains("state 4"));
        assert_eq!(err.undefined_symbol(), None);
    }

    #[test]
    fn undefined_symbol_name() {
        let err: TacError = SymTabError::UndefinedSymbol { name: "q".into() }.into();
        assert_eq!(err.undefined_symbol(), Some("q"));
    }

    #[test]
    fn declaration_errors_display() {
        let err = TacError::InvalidExtent { text: "99999999999999999999999".into() };
        assert!(err.to_string().starts_with("invalid array extent"));
        let err = TacError::SizeOverflow { name: "a".into() };
        assert_eq!(err.to_string(), "size of \"a\" overflows");
    }

    // If TacError ever stops being Send + Sync + 'static this will fail to compile.
    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn tac_error_is_send_sync_static() {
        _assert_send_sync_static::<TacError>();
    }
}
