//! Removing redundant parentheses from infix expressions.
//!
//! The actions are independent of the grammar's nonterminal names:
//!
//! - a three-symbol rule whose middle symbol is the terminal `+` or `-`
//!   produces a *sum*;
//! - `( X )` keeps its parentheses only when `X` is a sum;
//! - every other rule concatenates the text of its children.
//!
//! So `(a*b)+((c))` becomes `a*b+c`, while `(a+b)*c` is left alone.

use crate::TacError;
use lrsdt::{GrammarTable, LexRule, Lexer, Parser, Rule, Token, TokenClass, Translator};
use once_cell::sync::Lazy;
use smartstring::alias::String;

static LEXER: Lazy<Lexer> = Lazy::new(|| {
    Lexer::try_new(vec![
        LexRule::new(TokenClass::Identifier, "[a-zA-Z0-9]+"),
        LexRule::new(TokenClass::Punct, r"\+|-|\*|\(|\)"),
        LexRule::new(TokenClass::Skip, r"\s+"),
    ])
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Group,
    Sum,
    Concat,
}

/// Expression text, and whether it is an unparenthesized sum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Infix {
    pub text: String,
    pub sum: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Parens;

fn is_terminal(rule: &Rule, k: usize, text: &str) -> bool {
    rule.rhs
        .get(k)
        .is_some_and(|s| !s.nonterminal && s.text == text)
}

impl Translator for Parens {
    type Production = Shape;
    type Value = Infix;
    type Context = ();
    type Error = TacError;

    fn classify(&self, rule: &Rule) -> Option<Shape> {
        let shape = if rule.rhs.len() == 3
            && is_terminal(rule, 0, "(")
            && is_terminal(rule, 2, ")")
        {
            Shape::Group
        } else if rule.rhs.len() == 3 && (is_terminal(rule, 1, "+") || is_terminal(rule, 1, "-")) {
            Shape::Sum
        } else {
            Shape::Concat
        };
        Some(shape)
    }

    fn shift(&self, token: Token) -> Infix {
        Infix {
            text: String::from(token.text()),
            sum: false,
        }
    }

    fn reduce(&self, _: &mut (), shape: Shape, children: Vec<Infix>) -> Result<Infix, TacError> {
        if shape == Shape::Group && !children[1].sum {
            let mut children = children;
            return Ok(children.swap_remove(1));
        }
        let mut text = String::new();
        for child in &children {
            text.push_str(&child.text);
        }
        Ok(Infix {
            text,
            sum: shape == Shape::Sum,
        })
    }
}

/// A loaded grammar table bound to the parentheses actions.
///
/// ```rust
/// # use lrsdt_translate::{PARENS_GRAMMAR, Simplifier};
/// let s = Simplifier::new(PARENS_GRAMMAR).unwrap();
/// assert_eq!(s.simplify("((a)) * (b + c)").unwrap(), "a*(b+c)");
/// ```
pub struct Simplifier {
    parser: Parser<Parens>,
}

impl Simplifier {
    pub fn new(grammar_src: &str) -> Result<Self, TacError> {
        Self::from_table(GrammarTable::from_csv(grammar_src)?)
    }

    pub fn from_table(table: GrammarTable) -> Result<Self, TacError> {
        Ok(Self {
            parser: Parser::try_new(table, Parens)?,
        })
    }

    pub fn simplify(&self, input: &str) -> Result<std::string::String, TacError> {
        let tokens = LEXER.tokenize(input)?;
        let infix = self.parser.parse(tokens, &mut ())?;
        Ok(infix.text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PARENS_GRAMMAR;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn simplify(input: &str) -> std::string::String {
        Simplifier::new(PARENS_GRAMMAR)
            .unwrap()
            .simplify(input)
            .unwrap()
    }

    #[test]
    fn drops_parentheses_around_products() {
        init_logger();
        assert_eq!(simplify("(a*b)+c"), "a*b+c");
        assert_eq!(simplify("a+(b*c)"), "a+b*c");
        assert_eq!(simplify("(a)"), "a");
    }

    #[test]
    fn keeps_parentheses_around_sums() {
        assert_eq!(simplify("(a+b)*c"), "(a+b)*c");
        assert_eq!(simplify("a*(b+c)"), "a*(b+c)");
        assert_eq!(simplify("a+(b+c)"), "a+(b+c)");
    }

    #[test]
    fn differences_are_sums() {
        assert_eq!(simplify("a-(b+c)"), "a-(b+c)");
        assert_eq!(simplify("a-(b-c)"), "a-(b-c)");
        assert_eq!(simplify("(a-b)*c"), "(a-b)*c");
        assert_eq!(simplify("(a*b)-((c))"), "a*b-c");
    }

    #[test]
    fn division_is_not_lexed() {
        let err = Simplifier::new(PARENS_GRAMMAR)
            .unwrap()
            .simplify("a/b")
            .unwrap_err();
        assert!(matches!(
            err,
            TacError::Parse(lrsdt::ParseError::Lexical { .. })
        ));
    }

    #[test]
    fn nested_parentheses_collapse() {
        assert_eq!(simplify("((a))"), "a");
        assert_eq!(simplify("((a+b))"), "(a+b)");
        assert_eq!(simplify("(((a*b)))*c"), "a*b*c");
    }

    #[test]
    fn whitespace_is_dropped() {
        assert_eq!(simplify(" a + b * c "), "a+b*c");
    }

    #[test]
    fn simplification_is_idempotent() {
        for input in ["((a+b))*(c)", "(a*(b+(c)))", "x+(y*z)+((w))"] {
            let once = simplify(input);
            assert_eq!(simplify(&once), once);
        }
    }

    #[test]
    fn syntax_error() {
        let err = Simplifier::new(PARENS_GRAMMAR)
            .unwrap()
            .simplify("(a+b")
            .unwrap_err();
        assert!(err.to_string().contains("unexpected end of input"));
    }

    #[test]
    fn every_rule_has_a_shape() {
        let table = GrammarTable::from_csv(PARENS_GRAMMAR).unwrap();
        let shapes: Vec<_> = table
            .rules()
            .iter()
            .map(|r| Parens.classify(r).unwrap())
            .collect();
        assert_eq!(
            shapes,
            [
                Shape::Concat,
                Shape::Sum,
                Shape::Sum,
                Shape::Concat,
                Shape::Concat,
                Shape::Concat,
                Shape::Group,
                Shape::Concat,
            ]
        );
    }
}
