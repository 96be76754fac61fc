//! Arithmetic and conditional evaluation.
//!
//! The expression language is deliberately tiny:
//!
//! - arithmetic is a left-to-right chain of `+`/`-` separated terms, each
//!   an integer literal or an assigned variable;
//! - a condition compares one variable against one integer literal with
//!   `>`, `<` or `==`.

use std::fmt;

use thiserror::Error;

use crate::command::is_identifier;
use crate::error::ErrorKind;
use crate::variables::Variables;

/// Characters that may form a comparison operator.
const OPERATOR_CHARS: &[char] = &['<', '>', '=', '!'];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure while evaluating an expression or condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("missing expression")]
    Empty,
    #[error("missing term after `{0}`")]
    MissingTerm(Sign),
    #[error("expected `+` or `-` before `{0}`")]
    MissingOperator(String),
    #[error("`{0}` is not an integer or a variable name")]
    InvalidTerm(String),
    #[error("variable `{0}` is not defined")]
    UndefinedVariable(String),
    #[error("integer overflow")]
    Overflow,
    #[error("unsupported comparison operator `{0}`; expected `>`, `<` or `==`")]
    InvalidOperator(String),
    #[error("malformed condition `{0}`; expected `<variable> <operator> <integer>`")]
    MalformedCondition(String),
    #[error("`{0}` is not an integer literal")]
    ExpectedInteger(String),
}

impl EvalError {
    /// The engine-level error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedVariable(_) => ErrorKind::UndefinedVariable,
            Self::Overflow => ErrorKind::ArithmeticOverflow,
            Self::InvalidOperator(_) => ErrorKind::InvalidOperator,
            Self::Empty
            | Self::MissingTerm(_)
            | Self::MissingOperator(_)
            | Self::InvalidTerm(_)
            | Self::MalformedCondition(_)
            | Self::ExpectedInteger(_) => ErrorKind::ArityOrTypeError,
        }
    }
}

// ---------------------------------------------------------------------------
// Terms
// ---------------------------------------------------------------------------

/// Additive operator in front of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            _ => None,
        }
    }

    #[must_use]
    const fn flip(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// One signed term of an additive chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term<'a> {
    pub sign: Sign,
    pub text: &'a str,
}

/// Split an additive chain into signed terms.
///
/// Whitespace around operators is optional (`a+1` and `a + 1` are the
/// same). A sign directly in front of a term is unary, so `3 - -2` has
/// two terms.
pub fn split_terms(expr: &str) -> Result<Vec<Term<'_>>, EvalError> {
    let mut terms = Vec::new();
    let mut sign = Sign::Plus;
    let mut expect_term = true;
    let mut pending_op: Option<Sign> = None;
    let mut rest = expr.trim_start();

    while let Some(c) = rest.chars().next() {
        if let Some(op) = Sign::from_char(c) {
            if expect_term {
                sign = if op == Sign::Minus { sign.flip() } else { sign };
            } else {
                sign = op;
                expect_term = true;
            }
            pending_op = Some(op);
            rest = rest[c.len_utf8()..].trim_start();
            continue;
        }

        let end = rest
            .find(|ch: char| ch.is_whitespace() || Sign::from_char(ch).is_some())
            .unwrap_or(rest.len());
        let text = &rest[..end];
        if !expect_term {
            return Err(EvalError::MissingOperator(text.to_owned()));
        }
        terms.push(Term { sign, text });
        sign = Sign::Plus;
        pending_op = None;
        expect_term = false;
        rest = rest[end..].trim_start();
    }

    match (expect_term, pending_op) {
        (true, Some(op)) => Err(EvalError::MissingTerm(op)),
        (true, None) => Err(EvalError::Empty),
        _ => Ok(terms),
    }
}

/// Value of a single unsigned term.
fn term_value(text: &str, vars: &Variables) -> Result<i32, EvalError> {
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        return match text.parse::<i64>() {
            Ok(v) => i32::try_from(v).map_err(|_| EvalError::Overflow),
            Err(_) if text.chars().all(|c| c.is_ascii_digit()) => Err(EvalError::Overflow),
            Err(_) => Err(EvalError::InvalidTerm(text.to_owned())),
        };
    }
    if is_identifier(text) {
        return vars
            .get(text)
            .ok_or_else(|| EvalError::UndefinedVariable(text.to_owned()));
    }
    Err(EvalError::InvalidTerm(text.to_owned()))
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Evaluate an additive chain left to right.
pub fn evaluate(expr: &str, vars: &Variables) -> Result<i32, EvalError> {
    let mut total: i32 = 0;
    for term in split_terms(expr)? {
        let value = term_value(term.text, vars)?;
        total = match term.sign {
            Sign::Plus => total.checked_add(value),
            Sign::Minus => total.checked_sub(value),
        }
        .ok_or(EvalError::Overflow)?;
    }
    Ok(total)
}

/// Whether `expr` is a well-formed chain of at least two terms.
///
/// Single terms are plain assignments; both are evaluated the same way.
#[must_use]
pub fn is_arithmetic(expr: &str) -> bool {
    split_terms(expr).is_ok_and(|terms| {
        terms.len() >= 2
            && terms
                .iter()
                .all(|t| is_identifier(t.text) || t.text.parse::<u32>().is_ok())
    })
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Less,
    Equal,
}

impl Comparison {
    fn from_symbol(op: &str) -> Option<Self> {
        match op {
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            "==" => Some(Self::Equal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn apply(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Self::Greater => lhs > rhs,
            Self::Less => lhs < rhs,
            Self::Equal => lhs == rhs,
        }
    }
}

/// `<variable> <op> <integer>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub variable: String,
    pub op: Comparison,
    pub value: i32,
}

impl Condition {
    /// Parse the text following `if`.
    pub fn parse(text: &str) -> Result<Self, EvalError> {
        let text = text.trim();
        let malformed = || EvalError::MalformedCondition(text.to_owned());

        let start = text.find(OPERATOR_CHARS).ok_or_else(malformed)?;
        let after = &text[start..];
        let len = after
            .find(|c: char| !OPERATOR_CHARS.contains(&c))
            .unwrap_or(after.len());
        let (lhs, op, rhs) = (text[..start].trim(), &after[..len], after[len..].trim());

        if !is_identifier(lhs) || rhs.is_empty() {
            return Err(malformed());
        }
        let op = Comparison::from_symbol(op)
            .ok_or_else(|| EvalError::InvalidOperator(op.to_owned()))?;
        let value = rhs
            .parse::<i32>()
            .map_err(|_| EvalError::ExpectedInteger(rhs.to_owned()))?;

        Ok(Self {
            variable: lhs.to_owned(),
            op,
            value,
        })
    }

    /// Compare the variable's current value against the literal.
    pub fn evaluate(&self, vars: &Variables) -> Result<bool, EvalError> {
        let lhs = vars
            .get(&self.variable)
            .ok_or_else(|| EvalError::UndefinedVariable(self.variable.clone()))?;
        Ok(self.op.apply(lhs, self.value))
    }
}

/// Parse and evaluate a condition in one step.
pub fn evaluate_condition(text: &str, vars: &Variables) -> Result<bool, EvalError> {
    Condition::parse(text)?.evaluate(vars)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
