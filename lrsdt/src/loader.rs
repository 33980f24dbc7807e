//! Reading a [`GrammarTable`] from its CSV description.
//!
//! The format is produced by common LALR(1) table generators:
//!
//! ```text
//! ,id,+,$,S',S          <- header: terminals up to `$`, then nonterminals
//!                       <- separator line, ignored
//! S' -> S               <- rules, one per line, numbered from 0
//! S -> S + id
//! S -> id
//!                       <- empty line ends the rule block
//! 0,s1,,,,2             <- one row per state; first cell is the label
//! ```
//!
//! Cells are empty, `s<N>` (shift), `r<N>` (reduce by rule `N`), `acc`, or a
//! bare state number (goto).

use crate::error::GrammarError;
use crate::grammar::{GrammarSymbol, Rule};
use crate::table::{Action, GrammarTable};
use once_cell::sync::Lazy;
use regex::Regex;
use smartstring::alias::String;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

static RULE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s*->\s*(.*)$").unwrap());
static CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(s|r)?([0-9]+)$").unwrap());

impl GrammarTable {
    /// Parses a table from its CSV description.
    ///
    /// # Errors
    /// Returns a [`GrammarError`] for a missing header or end marker, rules
    /// that reference undeclared symbols, unreadable cells, and cells that
    /// point at rules or states the table does not define.
    pub fn from_csv(source: &str) -> Result<Self, GrammarError> {
        let mut lines = source.lines().map(|l| l.trim_end_matches('\r')).enumerate();

        let (_, header) = lines.next().ok_or(GrammarError::MissingHeader)?;
        let names: Vec<&str> = header
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            return Err(GrammarError::MissingHeader);
        }
        let end = names
            .iter()
            .position(|&s| s == "$")
            .ok_or(GrammarError::MissingEndMarker)?;

        let mut symbols = Vec::with_capacity(names.len());
        let mut terminals = HashMap::new();
        let mut nonterminals = HashMap::new();
        for (k, &name) in names.iter().enumerate() {
            let (symbol, index) = if k < end {
                (GrammarSymbol::terminal(name), &mut terminals)
            } else if k == end {
                (GrammarSymbol::end(), &mut terminals)
            } else {
                (GrammarSymbol::nonterminal(name), &mut nonterminals)
            };
            if index.insert(symbol.text.clone(), k).is_some() {
                return Err(GrammarError::DuplicateSymbol {
                    symbol: String::from(name),
                });
            }
            symbols.push(symbol);
        }

        // separator
        lines.next();

        let mut rules = Vec::new();
        for (i, line) in lines.by_ref() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            let caps = RULE_RE
                .captures(line)
                .ok_or_else(|| GrammarError::MalformedRule {
                    line: line_no,
                    text: String::from(line),
                })?;
            let lhs = &caps[1];
            let lhs = match nonterminals.get(lhs) {
                Some(&k) => symbols[k].clone(),
                None => {
                    return Err(GrammarError::UnknownGrammarToken {
                        token: String::from(lhs),
                        line: line_no,
                    });
                }
            };
            let rhs = caps[2]
                .split_whitespace()
                .map(|token| {
                    resolve(&symbols, token)
                        .cloned()
                        .ok_or_else(|| GrammarError::UnknownGrammarToken {
                            token: String::from(token),
                            line: line_no,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rules.push(Rule::new(lhs, rhs));
        }

        let mut rows = Vec::new();
        for (_, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let state = rows.len();
            let mut row = vec![None; symbols.len()];
            for (column, cell) in line.split(',').skip(1).enumerate() {
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }
                if column >= symbols.len() {
                    return Err(GrammarError::TooManyCells {
                        state,
                        column,
                        columns: symbols.len(),
                    });
                }
                row[column] = Some(parse_cell(cell, state, column, rules.len())?);
            }
            rows.push(row);
        }

        let count = rows.len();
        for (state, row) in rows.iter().enumerate() {
            for action in row.iter().flatten() {
                if let Action::Shift(target) = *action {
                    if target >= count {
                        return Err(GrammarError::UnknownState {
                            state,
                            target,
                            count,
                        });
                    }
                }
            }
        }

        log::debug!(
            "loaded grammar table: {} terminals, {} nonterminals, {} rules, {} states",
            terminals.len(),
            nonterminals.len(),
            rules.len(),
            rows.len()
        );

        Ok(GrammarTable {
            symbols,
            rules,
            rows,
            terminals,
            nonterminals,
        })
    }

    /// Reads and parses a table from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| GrammarError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_csv(&source)
    }
}

impl FromStr for GrammarTable {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_csv(s)
    }
}

/// First header symbol named `token`; terminals precede nonterminals.
fn resolve<'a>(symbols: &'a [GrammarSymbol], token: &str) -> Option<&'a GrammarSymbol> {
    symbols.iter().find(|s| !s.is_end() && s.text == token)
}

fn parse_cell(
    cell: &str,
    state: usize,
    column: usize,
    rule_count: usize,
) -> Result<Action, GrammarError> {
    let malformed = || GrammarError::MalformedCell {
        state,
        column,
        cell: String::from(cell),
    };
    if cell == "acc" {
        return Ok(Action::Accept);
    }
    let caps = CELL_RE.captures(cell).ok_or_else(malformed)?;
    let n: usize = caps[2].parse().map_err(|_| malformed())?;
    match caps.get(1).map(|m| m.as_str()) {
        Some("r") => {
            if n >= rule_count {
                Err(GrammarError::UnknownRule {
                    state,
                    rule: n,
                    count: rule_count,
                })
            } else {
                Ok(Action::Reduce(n))
            }
        }
        _ => Ok(Action::Shift(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUM: &str = "\
,id,+,$,S',S

S' -> S
S -> S + id
S -> id

0,s1,,,,2
1,,r2,r2,,
2,,s3,acc,,
3,s4,,,,
4,,r1,r1,,
";

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn loads_header_rules_and_rows() {
        init_logger();
        let t = GrammarTable::from_csv(SUM).unwrap();
        assert_eq!(t.symbols().len(), 5);
        assert_eq!(t.rules().len(), 3);
        assert_eq!(t.state_count(), 5);
        assert_eq!(t.rule(1).unwrap().to_string(), "S -> S + id");
        assert_eq!(t.action(2, "+"), Some(Action::Shift(3)));
        assert_eq!(t.action(4, ""), Some(Action::Reduce(1)));
        assert_eq!(t.goto(0, "S"), Some(Action::Shift(2)));
    }

    #[test]
    fn end_marker_becomes_empty_terminal() {
        let t = GrammarTable::from_csv(SUM).unwrap();
        assert!(t.symbols()[2].is_end());
        assert_eq!(t.action(2, "$"), None);
        assert_eq!(t.action(2, ""), Some(Action::Accept));
    }

    #[test]
    fn epsilon_rules_and_crlf_line_endings() {
        let src = ",a,$,S',S\r\n\r\nS' -> S\r\nS ->\r\n\r\n0,,r1,,1\r\n1,,acc,,\r\n";
        let t = GrammarTable::from_csv(src).unwrap();
        assert!(t.rule(1).unwrap().is_epsilon());
        assert_eq!(t.action(0, ""), Some(Action::Reduce(1)));
        assert_eq!(t.state_count(), 2);
    }

    #[test]
    fn rules_without_rows_load() {
        let t = GrammarTable::from_csv(",a,$,S\n\nS -> a\n").unwrap();
        assert_eq!(t.rules().len(), 1);
        assert_eq!(t.state_count(), 0);
    }

    #[test]
    fn missing_header() {
        assert_eq!(
            GrammarTable::from_csv("").unwrap_err(),
            GrammarError::MissingHeader
        );
        assert_eq!(
            GrammarTable::from_csv(",,,\n").unwrap_err(),
            GrammarError::MissingHeader
        );
    }

    #[test]
    fn missing_end_marker() {
        assert_eq!(
            GrammarTable::from_csv(",a,b,S\n\n").unwrap_err(),
            GrammarError::MissingEndMarker
        );
    }

    #[test]
    fn duplicate_symbol() {
        assert_eq!(
            GrammarTable::from_csv(",a,a,$,S\n\n").unwrap_err(),
            GrammarError::DuplicateSymbol { symbol: "a".into() }
        );
    }

    #[test]
    fn unknown_grammar_token_names_line() {
        let err = GrammarTable::from_csv(",a,$,S',S\n\nS' -> S\nS -> a Foo\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::UnknownGrammarToken {
                token: "Foo".into(),
                line: 4
            }
        );
    }

    #[test]
    fn unknown_left_hand_side() {
        let err = GrammarTable::from_csv(",a,$,S\n\nT -> a\n").unwrap_err();
        assert!(matches!(err, GrammarError::UnknownGrammarToken { line: 3, .. }));
    }

    #[test]
    fn malformed_rule() {
        let err = GrammarTable::from_csv(",a,$,S\n\nS a\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::MalformedRule {
                line: 3,
                text: "S a".into()
            }
        );
    }

    #[test]
    fn malformed_cell() {
        let err = GrammarTable::from_csv(",a,$,S\n\nS -> a\n\n0,x1,,\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::MalformedCell {
                state: 0,
                column: 0,
                cell: "x1".into()
            }
        );
    }

    #[test]
    fn reduce_past_rule_list() {
        let err = GrammarTable::from_csv(",a,$,S\n\nS -> a\n\n0,,r5,\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::UnknownRule {
                state: 0,
                rule: 5,
                count: 1
            }
        );
    }

    #[test]
    fn shift_past_last_state() {
        let err = GrammarTable::from_csv(",a,$,S\n\nS -> a\n\n0,s7,,\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::UnknownState {
                state: 0,
                target: 7,
                count: 1
            }
        );
    }

    #[test]
    fn row_wider_than_header() {
        let err = GrammarTable::from_csv(",a,$,S\n\nS -> a\n\n0,,,,s0\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::TooManyCells {
                state: 0,
                column: 3,
                columns: 3
            }
        );
    }

    #[test]
    fn from_path_reports_io_errors() {
        let err = GrammarTable::from_path("/nonexistent/grammar.csv").unwrap_err();
        assert!(matches!(err, GrammarError::Io { .. }));
    }
}
