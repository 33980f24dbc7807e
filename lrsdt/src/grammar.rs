//! Grammar symbols and production rules.
//!
//! A [`GrammarSymbol`] is a name tagged as terminal or nonterminal. The
//! end-of-input marker is the terminal with empty text, which is also the kind
//! of the sentinel token the driver appends after the last real token.

use smartstring::alias::String;
use std::fmt;

/// A terminal or nonterminal grammar symbol.
///
/// Symbols order by text first and then by tag, so a terminal and a
/// nonterminal sharing a name are distinct but sort next to each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GrammarSymbol {
    /// Symbol name. Empty for the end marker.
    pub text: String,
    /// `true` for nonterminals.
    pub nonterminal: bool,
}

impl GrammarSymbol {
    /// Creates a terminal symbol, e.g. `id`, `+` or `int`.
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nonterminal: false,
        }
    }

    /// Creates a nonterminal symbol, e.g. `Expr`.
    pub fn nonterminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nonterminal: true,
        }
    }

    /// The end-of-input marker (`$` in table headers).
    pub fn end() -> Self {
        Self::terminal("")
    }

    /// Returns `true` for the end-of-input marker.
    pub fn is_end(&self) -> bool {
        !self.nonterminal && self.text.is_empty()
    }
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            f.write_str("$")
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Shape used to recognise a rule without depending on its table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPattern {
    Term(&'static str),
    NonTerm(&'static str),
}

impl SymbolPattern {
    fn matches(&self, symbol: &GrammarSymbol) -> bool {
        match *self {
            SymbolPattern::Term(text) => !symbol.nonterminal && symbol.text == text,
            SymbolPattern::NonTerm(text) => symbol.nonterminal && symbol.text == text,
        }
    }
}

/// A production `lhs -> rhs`. An empty `rhs` is an epsilon rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: GrammarSymbol,
    pub rhs: Vec<GrammarSymbol>,
}

impl Rule {
    pub fn new(lhs: GrammarSymbol, rhs: Vec<GrammarSymbol>) -> Self {
        Self { lhs, rhs }
    }

    /// Returns `true` when the rule rewrites nonterminal `lhs` into exactly
    /// the symbols described by `rhs`.
    ///
    /// ```rust
    /// # use lrsdt::{GrammarSymbol, Rule, SymbolPattern::*};
    /// let rule = Rule::new(
    ///     GrammarSymbol::nonterminal("Expr"),
    ///     vec![
    ///         GrammarSymbol::nonterminal("Expr"),
    ///         GrammarSymbol::terminal("+"),
    ///         GrammarSymbol::nonterminal("Expr"),
    ///     ],
    /// );
    /// assert!(rule.matches("Expr", &[NonTerm("Expr"), Term("+"), NonTerm("Expr")]));
    /// assert!(!rule.matches("Expr", &[NonTerm("Expr"), Term("-"), NonTerm("Expr")]));
    /// assert_eq!(rule.to_string(), "Expr -> Expr + Expr");
    /// ```
    pub fn matches(&self, lhs: &str, rhs: &[SymbolPattern]) -> bool {
        self.lhs.nonterminal
            && self.lhs.text == lhs
            && self.rhs.len() == rhs.len()
            && self.rhs.iter().zip(rhs).all(|(sym, pat)| pat.matches(sym))
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_marker_is_empty_terminal() {
        let end = GrammarSymbol::end();
        assert!(end.is_end());
        assert_eq!(end, GrammarSymbol::terminal(""));
        assert_eq!(end.to_string(), "$");
        assert!(!GrammarSymbol::nonterminal("").is_end());
    }

    #[test]
    fn terminal_and_nonterminal_with_same_name_differ() {
        let t = GrammarSymbol::terminal("E");
        let n = GrammarSymbol::nonterminal("E");
        assert_ne!(t, n);
        assert!(t < n);
        assert!(GrammarSymbol::nonterminal("A") < GrammarSymbol::terminal("B"));
    }

    #[test]
    fn epsilon_rule_display() {
        let rule = Rule::new(GrammarSymbol::nonterminal("Declarations"), vec![]);
        assert!(rule.is_epsilon());
        assert_eq!(rule.to_string(), "Declarations ->");
        assert!(rule.matches("Declarations", &[]));
        assert!(!rule.matches("Assign", &[]));
    }

    #[test]
    fn pattern_checks_symbol_tag() {
        let rule = Rule::new(
            GrammarSymbol::nonterminal("Expr"),
            vec![GrammarSymbol::terminal("id")],
        );
        assert!(rule.matches("Expr", &[SymbolPattern::Term("id")]));
        assert!(!rule.matches("Expr", &[SymbolPattern::NonTerm("id")]));
        assert!(!rule.matches("Expr", &[SymbolPattern::Term("id"), SymbolPattern::Term("id")]));
    }
}
