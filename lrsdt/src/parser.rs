//! The shift/reduce driver.
//!
//! [`Parser`] walks a [`GrammarTable`] over a token sequence and hands every
//! reduction to a [`Translator`], which owns the semantic actions. The stack
//! holds `(state, attribute)` pairs and starts with `(0, Value::default())`.
//! On a reduction by `A -> X1 .. Xn` the top `n` entries are popped, their
//! attributes passed to the translator in source order, and the result pushed
//! with the goto state of the exposed entry on `A`.

use crate::error::ParseError;
use crate::grammar::Rule;
use crate::table::{Action, GrammarTable, StateId};
use crate::token::Token;
use std::fmt::Debug;

/// Semantic actions attached to the rules of a grammar table.
pub trait Translator {
    /// Closed set of production shapes the translator understands.
    type Production: Copy + Debug;
    /// Synthesized attribute carried on the parse stack.
    type Value: Debug + Default;
    /// Mutable per-analysis state, e.g. a symbol table.
    type Context;
    type Error: From<ParseError>;

    /// Maps a table rule to its production shape, or `None` when the
    /// translator has no action for it.
    fn classify(&self, rule: &Rule) -> Option<Self::Production>;

    /// Attribute of a shifted terminal.
    fn shift(&self, token: Token) -> Self::Value;

    /// Attribute of the left-hand side, computed from the attributes of the
    /// right-hand side in source order.
    fn reduce(
        &self,
        ctx: &mut Self::Context,
        prod: Self::Production,
        children: Vec<Self::Value>,
    ) -> Result<Self::Value, Self::Error>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
    pub max_depth: usize,
}

/// A grammar table bound to a translator.
///
/// Every rule is classified once in [`Parser::try_new`]; parsing itself only
/// reads the parser, so one instance can serve concurrent analyses, each with
/// its own context.
pub struct Parser<T: Translator> {
    table: GrammarTable,
    translator: T,
    productions: Vec<T::Production>,
}

impl<T: Translator> Parser<T> {
    /// Binds `translator` to `table`.
    ///
    /// # Errors
    /// [`ParseError::UnhandledProduction`] for the first rule the translator
    /// cannot classify.
    pub fn try_new(table: GrammarTable, translator: T) -> Result<Self, ParseError> {
        let productions = table
            .rules()
            .iter()
            .map(|rule| {
                let prod = translator.classify(rule);
                log::trace!("Classify {} => {:?}", rule, prod);
                prod.ok_or_else(|| ParseError::UnhandledProduction {
                    rule: rule.to_string().into(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "bound {} rules over {} states",
            productions.len(),
            table.state_count()
        );
        Ok(Self {
            table,
            translator,
            productions,
        })
    }

    pub fn table(&self) -> &GrammarTable {
        &self.table
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Parses `tokens` and returns the attribute of the start symbol.
    pub fn parse(
        &self,
        tokens: Vec<Token>,
        ctx: &mut T::Context,
    ) -> Result<T::Value, T::Error> {
        self.parse_with_stats(tokens, ctx).map(|(value, _)| value)
    }

    /// Like [`Parser::parse`], also returning the counters of this run.
    pub fn parse_with_stats(
        &self,
        tokens: Vec<Token>,
        ctx: &mut T::Context,
    ) -> Result<(T::Value, ParserStats), T::Error> {
        let mut stats = ParserStats::default();
        let mut input = tokens.into_iter().chain(std::iter::once(Token::end()));
        let mut stack: Vec<(StateId, T::Value)> = vec![(0, T::Value::default())];

        stats.tokens += 1;
        let mut token = input.next().unwrap_or_default();

        loop {
            stats.max_depth = stats.max_depth.max(stack.len());
            if log::log_enabled!(log::Level::Trace) {
                dump_state(&stack, &token);
            }
            let state = top(&stack);
            match self.table.action(state, &token.kind) {
                Some(Action::Shift(next)) => {
                    log::trace!("Shift {:?}", next);
                    stack.push((next, self.translator.shift(token)));
                    stats.shifts += 1;
                    stats.tokens += 1;
                    token = match input.next() {
                        Some(t) => t,
                        None => return Err(ParseError::UnexpectedEnd { state: next }.into()),
                    };
                }

                Some(Action::Reduce(rule_id)) => {
                    let rule = &self.table.rules()[rule_id];
                    log::trace!("Reduce {}({})", rule, rule_id);
                    let n = rule.rhs.len();
                    if n >= stack.len() {
                        return Err(ParseError::StackUnderflow {
                            state,
                            rule: rule.to_string().into(),
                            depth: stack.len() - 1,
                        }
                        .into());
                    }
                    let children: Vec<T::Value> =
                        stack.drain(stack.len() - n..).map(|(_, v)| v).collect();
                    let exposed = top(&stack);
                    let next = match self.table.goto(exposed, &rule.lhs.text) {
                        Some(Action::Shift(next)) => next,
                        Some(action) => {
                            return Err(ParseError::InvalidGoto {
                                state: exposed,
                                nonterminal: rule.lhs.text.clone(),
                                action: action.to_string().into(),
                            }
                            .into());
                        }
                        None => {
                            return Err(ParseError::MissingGoto {
                                state: exposed,
                                nonterminal: rule.lhs.text.clone(),
                            }
                            .into());
                        }
                    };
                    let value = self
                        .translator
                        .reduce(ctx, self.productions[rule_id], children)?;
                    stack.push((next, value));
                    stats.reductions += 1;
                }

                Some(Action::Accept) => {
                    log::trace!("Accept");
                    log::debug!("{:?}", stats);
                    let value = stack.pop().map(|(_, v)| v).unwrap_or_default();
                    return Ok((value, stats));
                }

                None => {
                    return Err(ParseError::UnexpectedToken {
                        state,
                        kind: token.kind,
                        literal: token.literal,
                        span: token.span,
                    }
                    .into());
                }
            }
        }
    }
}

fn top<V>(stack: &[(StateId, V)]) -> StateId {
    stack.last().map_or(0, |(state, _)| *state)
}

fn dump_state<V: Debug>(stack: &[(StateId, V)], incoming: &Token) {
    let mut output = String::new();
    for (state, value) in stack {
        output.push_str(&format!("<{}> {:?}  ", state, value));
    }
    output.push_str(&format!("<-  {}", incoming));
    log::trace!("{}", output);
}
