//! Priority-ordered regex tokenizer.
//!
//! The rules are compiled into one multi-pattern
//! [`regex_automata::meta::Regex`] and matched anchored at the current
//! position with leftmost-first semantics, so when several rules match at the
//! same position the one listed first wins, whatever the match length. With a
//! keyword rule `int` listed before the identifier rule, `integer` lexes as the
//! keyword `int` followed by the identifier `eger`.

use crate::error::{ParseError, Position, Span};
use crate::token::Token;
use regex_automata::{Anchored, Input, meta::Regex};
use smartstring::alias::String;

/// How a matched lexeme becomes a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Kind is the matched text, no literal.
    Keyword,
    /// Kind `num`, literal is the matched text.
    Number,
    /// Kind `id`, literal is the matched text.
    Identifier,
    /// Kind is the matched text, no literal.
    Punct,
    /// Produces no token.
    Skip,
}

impl TokenClass {
    fn token(self, text: &str) -> Option<Token> {
        match self {
            TokenClass::Keyword | TokenClass::Punct => Some(Token::new(text, "")),
            TokenClass::Number => Some(Token::new("num", text)),
            TokenClass::Identifier => Some(Token::new("id", text)),
            TokenClass::Skip => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexRule {
    pub class: TokenClass,
    pub pattern: String,
}

impl LexRule {
    pub fn new(class: TokenClass, pattern: impl Into<String>) -> Self {
        Self {
            class,
            pattern: pattern.into(),
        }
    }
}

/// A compiled, immutable tokenizer. Safe to share between threads.
#[derive(Debug, Clone)]
pub struct Lexer {
    rules: Vec<LexRule>,
    regex: Regex,
}

impl Lexer {
    /// Compiles `rules`, earliest rule first in priority.
    pub fn try_new(rules: Vec<LexRule>) -> Result<Self, regex_automata::meta::BuildError> {
        let patterns: Vec<&str> = rules.iter().map(|r| r.pattern.as_str()).collect();
        let regex = Regex::new_many(&patterns)?;
        Ok(Self { rules, regex })
    }

    pub fn rules(&self) -> &[LexRule] {
        &self.rules
    }

    /// Splits `text` into tokens. The end sentinel is not included.
    ///
    /// # Errors
    /// [`ParseError::Lexical`] at the first position no rule matches, or where
    /// the only match is empty.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        let mut cursor = Position::default();
        while pos < text.len() {
            let input = Input::new(text).range(pos..).anchored(Anchored::Yes);
            let m = match self.regex.search(&input) {
                Some(m) if !m.is_empty() => m,
                _ => {
                    let bad: String = text[pos..].chars().take(1).collect();
                    let mut end = cursor;
                    end.advance(&bad);
                    return Err(ParseError::Lexical {
                        text: bad,
                        span: Span::new(cursor, end),
                    });
                }
            };
            let lexeme = &text[m.range()];
            let start = cursor;
            cursor.advance(lexeme);
            let rule = &self.rules[m.pattern().as_usize()];
            log::trace!("MATCHED: {:?} {:?} at {}:{}", rule.class, lexeme, start.line, start.column);
            if let Some(token) = rule.class.token(lexeme) {
                tokens.push(token.with_span(Span::new(start, cursor)));
            }
            pos = m.end();
        }
        log::debug!("tokenized {} bytes into {} tokens", text.len(), tokens.len());
        Ok(tokens)
    }
}
