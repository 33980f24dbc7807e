use crate::error::Span;
use smartstring::alias::String;
use std::fmt;

/// A lexical token.
///
/// `kind` names the grammar terminal the token is matched against (`id`,
/// `num`, `int`, `+`, ...). `literal` carries the lexeme for identifiers and
/// numbers and is empty otherwise. The end-of-input sentinel has an empty
/// kind and an empty literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: String,
    pub literal: String,
    pub span: Option<Span>,
}

impl Token {
    pub fn new(kind: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            literal: literal.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// The end-of-input sentinel.
    pub fn end() -> Self {
        Self::default()
    }

    pub fn is_end(&self) -> bool {
        self.kind.is_empty()
    }

    /// Text used when the token appears in generated output: the literal for
    /// identifiers and numbers, the kind for keywords and punctuation.
    pub fn text(&self) -> &str {
        if self.literal.is_empty() {
            &self.kind
        } else {
            &self.literal
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            f.write_str("$")
        } else if self.literal.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}({})", self.kind, self.literal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Position;

    #[test]
    fn text_prefers_literal() {
        assert_eq!(Token::new("id", "abc").text(), "abc");
        assert_eq!(Token::new("+", "").text(), "+");
    }

    #[test]
    fn end_sentinel() {
        let end = Token::end();
        assert!(end.is_end());
        assert_eq!(end.kind, "");
        assert_eq!(end.literal, "");
        assert_eq!(end.to_string(), "$");
    }

    #[test]
    fn display_and_span() {
        let span = Span::new(Position::new(0, 1), Position::new(0, 3));
        let tok = Token::new("num", "42").with_span(span);
        assert_eq!(tok.to_string(), "num(42)");
        assert_eq!(tok.span, Some(span));
        assert_eq!(Token::new("int", "").to_string(), "int");
    }
}
