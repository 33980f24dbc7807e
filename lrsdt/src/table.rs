//! The LALR(1) action/goto table.
//!
//! Terminal columns hold shift, reduce and accept actions; nonterminal columns
//! hold goto transitions, which are stored as [`Action::Shift`] because a goto
//! is a shift of the reduced nonterminal.

use crate::grammar::{GrammarSymbol, Rule};
use smartstring::alias::String;
use std::collections::HashMap;
use std::fmt;

pub type StateId = usize;
pub type RuleId = usize;

/// A single table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(StateId),
    Reduce(RuleId),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(rule) => write!(f, "r{}", rule),
            Action::Accept => f.write_str("acc"),
        }
    }
}

/// An immutable action/goto table together with its rule list.
///
/// Built by [`GrammarTable::from_csv`] (see [`crate::loader`]); read-only
/// afterwards, so one table can serve any number of parses.
#[derive(Debug, Clone)]
pub struct GrammarTable {
    pub(crate) symbols: Vec<GrammarSymbol>,
    pub(crate) rules: Vec<Rule>,
    /// Dense `states x symbols` matrix; column `k` belongs to `symbols[k]`.
    pub(crate) rows: Vec<Vec<Option<Action>>>,
    pub(crate) terminals: HashMap<String, usize>,
    pub(crate) nonterminals: HashMap<String, usize>,
}

impl GrammarTable {
    /// Column of `symbol`, if the table declares it.
    fn column(&self, symbol: &GrammarSymbol) -> Option<usize> {
        let index = if symbol.nonterminal {
            &self.nonterminals
        } else {
            &self.terminals
        };
        index.get(&symbol.text).copied()
    }

    /// Looks up the entry for `(state, symbol)`.
    pub fn lookup(&self, state: StateId, symbol: &GrammarSymbol) -> Option<&Action> {
        let column = self.column(symbol)?;
        self.rows.get(state)?.get(column)?.as_ref()
    }

    /// Action for `state` on a terminal of the given kind. The empty kind is
    /// the end marker.
    pub fn action(&self, state: StateId, kind: &str) -> Option<Action> {
        let column = *self.terminals.get(kind)?;
        *self.rows.get(state)?.get(column)?
    }

    /// Goto entry for `state` on nonterminal `name`.
    pub fn goto(&self, state: StateId, name: &str) -> Option<Action> {
        let column = *self.nonterminals.get(name)?;
        *self.rows.get(state)?.get(column)?
    }

    /// Resolves a terminal name to its symbol.
    pub fn terminal(&self, kind: &str) -> Option<&GrammarSymbol> {
        self.terminals.get(kind).map(|&k| &self.symbols[k])
    }

    /// Resolves a nonterminal name to its symbol.
    pub fn nonterminal(&self, name: &str) -> Option<&GrammarSymbol> {
        self.nonterminals.get(name).map(|&k| &self.symbols[k])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Header symbols in column order.
    pub fn symbols(&self) -> &[GrammarSymbol] {
        &self.symbols
    }

    pub fn state_count(&self) -> usize {
        self.rows.len()
    }
}
