//! Required-integrations expressions
//!
//! Charts declare the integrations they need as a boolean expression over
//! integration names, for example `acs && (github || gitlab)`. Grammar:
//!
//! ```text
//! expr   := term ( "||" term )*
//! term   := factor ( "&&" factor )*
//! factor := "!" factor | NAME | "true" | "false" | "(" expr ")"
//! NAME   := [A-Za-z_][A-Za-z0-9_]*
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::iter::Peekable;
use std::str::CharIndices;

use tssc_integrations::IntegrationRegistry;

/// Deepest `!`/parenthesis nesting accepted.
const MAX_DEPTH: usize = 64;

/// Longest expression accepted, in tokens.
const MAX_TOKENS: usize = 512;

/// Errors raised while compiling an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("{reason}")]
    Invalid { reason: String },

    #[error("unknown integration {name:?}")]
    UnknownIntegration { name: String },
}

/// Evaluates required-integrations expressions against a configured state.
pub trait Evaluator {
    /// Evaluate `expression`; names missing from `vars` count as false.
    fn evaluate(
        &self,
        expression: &str,
        vars: &BTreeMap<String, bool>,
    ) -> Result<bool, ExpressionError>;

    /// Integration names referenced by `expression`.
    fn variables(&self, expression: &str) -> Result<BTreeSet<String>, ExpressionError>;
}

/// Parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Name(String),
    Literal(bool),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parse without checking names against a registry.
    pub fn parse(input: &str) -> Result<Self, ExpressionError> {
        let tokens = tokenize(input)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(invalid(format!("unexpected {token}"))),
        }
    }

    pub fn eval(&self, vars: &BTreeMap<String, bool>) -> bool {
        match self {
            Expr::Name(name) => vars.get(name).copied().unwrap_or(false),
            Expr::Literal(value) => *value,
            Expr::Not(inner) => !inner.eval(vars),
            Expr::And(lhs, rhs) => lhs.eval(vars) && rhs.eval(vars),
            Expr::Or(lhs, rhs) => lhs.eval(vars) || rhs.eval(vars),
        }
    }

    /// Names referenced anywhere in the expression.
    pub fn names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Name(name) => {
                names.insert(name.as_str());
            }
            Expr::Literal(_) => {}
            Expr::Not(inner) => inner.collect_names(names),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                lhs.collect_names(names);
                rhs.collect_names(names);
            }
        }
    }
}

/// [`Evaluator`] bound to a registry of valid integration names.
#[derive(Debug, Clone)]
pub struct ExpressionEngine {
    registry: IntegrationRegistry,
}

impl ExpressionEngine {
    pub fn new(registry: IntegrationRegistry) -> Self {
        Self { registry }
    }

    /// Parse and check every name is registered.
    pub fn compile(&self, expression: &str) -> Result<Expr, ExpressionError> {
        let expr = Expr::parse(expression)?;
        if let Some(name) = expr.names().into_iter().find(|n| !self.registry.contains(n)) {
            return Err(ExpressionError::UnknownIntegration {
                name: name.to_string(),
            });
        }
        Ok(expr)
    }
}

impl Evaluator for ExpressionEngine {
    fn evaluate(
        &self,
        expression: &str,
        vars: &BTreeMap<String, bool>,
    ) -> Result<bool, ExpressionError> {
        Ok(self.compile(expression)?.eval(vars))
    }

    fn variables(&self, expression: &str) -> Result<BTreeSet<String>, ExpressionError> {
        Ok(self
            .compile(expression)?
            .names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    True,
    False,
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Name(name) => write!(f, "name {name:?}"),
            Token::True => write!(f, "'true'"),
            Token::False => write!(f, "'false'"),
            Token::And => write!(f, "'&&'"),
            Token::Or => write!(f, "'||'"),
            Token::Not => write!(f, "'!'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

fn invalid(reason: impl Into<String>) -> ExpressionError {
    ExpressionError::Invalid {
        reason: reason.into(),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<CharIndices> = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '!' => tokens.push(Token::Not),
            '&' | '|' => {
                if chars.next_if(|&(_, next)| next == c).is_none() {
                    return Err(invalid(format!("expected '{c}{c}' at position {pos}")));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = pos + c.len_utf8();
                while let Some((i, next)) =
                    chars.next_if(|&(_, n)| n.is_ascii_alphanumeric() || n == '_')
                {
                    end = i + next.len_utf8();
                }
                tokens.push(match &input[pos..end] {
                    "true" => Token::True,
                    "false" => Token::False,
                    name => Token::Name(name.to_string()),
                });
            }
            other => {
                return Err(invalid(format!(
                    "unexpected character {other:?} at position {pos}"
                )));
            }
        }
    }

    if tokens.is_empty() {
        return Err(invalid("empty expression"));
    }
    if tokens.len() > MAX_TOKENS {
        return Err(invalid(format!(
            "expression too long ({} tokens, at most {MAX_TOKENS})",
            tokens.len()
        )));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn expr(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        while self.eat(&Token::Or) {
            lhs = Expr::Or(Box::new(lhs), Box::new(self.term()?));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.factor()?;
        while self.eat(&Token::And) {
            lhs = Expr::And(Box::new(lhs), Box::new(self.factor()?));
        }
        Ok(lhs)
    }

    /// Enter one nesting level of `!` or parentheses.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ExpressionError>,
    ) -> Result<T, ExpressionError> {
        if self.depth >= MAX_DEPTH {
            return Err(invalid("expression nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn factor(&mut self) -> Result<Expr, ExpressionError> {
        match self.next() {
            Some(Token::Not) => self.nested(|p| Ok(Expr::Not(Box::new(p.factor()?)))),
            Some(Token::Name(name)) => Ok(Expr::Name(name)),
            Some(Token::True) => Ok(Expr::Literal(true)),
            Some(Token::False) => Ok(Expr::Literal(false)),
            Some(Token::LParen) => {
                let inner = self.nested(Self::expr)?;
                if !self.eat(&Token::RParen) {
                    return Err(invalid("missing closing parenthesis"));
                }
                Ok(inner)
            }
            Some(token) => Err(invalid(format!("unexpected {token}"))),
            None => Err(invalid("unexpected end of expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vars(configured: &[&str]) -> BTreeMap<String, bool> {
        ["acs", "github", "gitlab", "quay"]
            .into_iter()
            .map(|n| (n.to_string(), configured.contains(&n)))
            .collect()
    }

    fn engine() -> ExpressionEngine {
        ExpressionEngine::new(IntegrationRegistry::with_builtins())
    }

    #[rstest]
    #[case("acs", &["acs"], true)]
    #[case("acs", &[], false)]
    #[case("!acs", &[], true)]
    #[case("github || gitlab", &["gitlab"], true)]
    #[case("acs && (github || gitlab)", &["acs"], false)]
    #[case("acs && (github || gitlab)", &["acs", "github"], true)]
    #[case("acs || github && gitlab", &["acs"], true)]
    #[case("!!quay", &["quay"], true)]
    #[case("true && !false", &[], true)]
    #[case("  quay  ", &["quay"], true)]
    #[case("false || acs", &["acs"], true)]
    #[case("true && quay", &[], false)]
    fn test_evaluate(#[case] expression: &str, #[case] configured: &[&str], #[case] expected: bool) {
        assert_eq!(
            engine().evaluate(expression, &vars(configured)).unwrap(),
            expected,
            "expression: {expression}"
        );
    }

    #[test]
    fn test_precedence() {
        let expr = Expr::parse("a || b && c").unwrap();
        assert_eq!(
            expr,
            Expr::Or(
                Box::new(Expr::Name("a".into())),
                Box::new(Expr::And(
                    Box::new(Expr::Name("b".into())),
                    Box::new(Expr::Name("c".into()))
                ))
            )
        );
    }

    #[rstest]
    #[case::empty("", "empty expression")]
    #[case::blank("   ", "empty expression")]
    #[case::single_ampersand("acs & quay", "expected '&&'")]
    #[case::dangling_operator("acs &&", "unexpected end")]
    #[case::unbalanced("(acs || quay", "missing closing parenthesis")]
    #[case::extra_paren("acs)", "unexpected ')'")]
    #[case::bad_char("acs == true", "unexpected character '='")]
    #[case::adjacent_names("acs quay", "unexpected name \"quay\"")]
    fn test_invalid_expressions(#[case] expression: &str, #[case] expected: &str) {
        let err = engine().evaluate(expression, &vars(&[])).unwrap_err();
        assert!(matches!(err, ExpressionError::Invalid { .. }));
        assert!(err.to_string().contains(expected), "got: {err}");
    }

    #[rstest]
    #[case::negations(format!("{}acs", "!".repeat(100)), "nested too deeply")]
    #[case::many_negations(format!("{}acs", "!".repeat(200_000)), "too long")]
    #[case::parentheses(format!("{}acs{}", "(".repeat(10_000), ")".repeat(10_000)), "too long")]
    #[case::nested_just_over(format!("{}acs{}", "(".repeat(65), ")".repeat(65)), "nested too deeply")]
    #[case::long_chain(vec!["acs"; 1_000].join(" && "), "too long")]
    fn test_oversized_expressions(#[case] expression: String, #[case] expected: &str) {
        let err = Expr::parse(&expression).unwrap_err();
        assert!(matches!(err, ExpressionError::Invalid { .. }));
        assert!(err.to_string().contains(expected), "got: {err}");
    }

    #[test]
    fn test_nesting_within_limit() {
        let expression = format!("{}acs{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(engine().evaluate(&expression, &vars(&["acs"])).unwrap());
        assert!(engine().evaluate(&format!("{}acs", "!".repeat(MAX_DEPTH)), &vars(&["acs"])).unwrap());
    }

    #[test]
    fn test_literal_with_unknown_name() {
        let err = engine().evaluate("true || konflux", &vars(&[])).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::UnknownIntegration {
                name: "konflux".into()
            }
        );
    }

    #[test]
    fn test_unknown_integration() {
        let err = engine().evaluate("acs && konflux", &vars(&[])).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::UnknownIntegration {
                name: "konflux".into()
            }
        );
    }

    #[test]
    fn test_variables() {
        let names = engine().variables("quay || (acs && !quay)").unwrap();
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["acs".to_string(), "quay".to_string()]
        );
    }

    #[test]
    fn test_missing_variable_is_false() {
        assert!(!engine().evaluate("jenkins", &BTreeMap::new()).unwrap());
    }
}
