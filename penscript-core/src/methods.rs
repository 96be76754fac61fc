//! User-defined methods.
//!
//! A method is a named block of raw script lines. Calling it substitutes
//! each formal parameter, as a whole word, with the caller's argument text
//! and then runs the resulting lines. Parameters never enter the variable
//! store.

use std::collections::HashMap;

use thiserror::Error;

use crate::error::ErrorKind;

/// Failure while expanding a method call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("method `{0}` is not defined")]
    Undefined(String),
    #[error("method `{name}` expects {expected} argument(s), found {found}")]
    ParameterCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl CallError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Undefined(_) => ErrorKind::UndefinedMethod,
            Self::ParameterCountMismatch { .. } => ErrorKind::ParameterCountMismatch,
        }
    }
}

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// A stored method definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub params: Vec<String>,
    /// Body lines exactly as written between the header and `endmethod`.
    pub body: Vec<String>,
}

impl Method {
    #[must_use]
    pub const fn new(name: String, params: Vec<String>, body: Vec<String>) -> Self {
        Self { name, params, body }
    }

    /// Body lines with every parameter replaced by its argument.
    pub fn expand(&self, args: &[String]) -> Result<Vec<String>, CallError> {
        if args.len() != self.params.len() {
            return Err(CallError::ParameterCountMismatch {
                name: self.name.clone(),
                expected: self.params.len(),
                found: args.len(),
            });
        }
        let bindings: HashMap<&str, &str> = self
            .params
            .iter()
            .map(String::as_str)
            .zip(args.iter().map(String::as_str))
            .collect();
        Ok(self
            .body
            .iter()
            .map(|line| substitute_words(line, &bindings))
            .collect())
    }
}

/// Replace whole words (maximal runs of letters) found in `bindings`.
///
/// `x` matches in `moveto x y` and `f(x,y)`, but not inside `max`.
#[must_use]
pub fn substitute_words(line: &str, bindings: &HashMap<&str, &str>) -> String {
    let mut out = String::with_capacity(line.len());
    let mut word_start: Option<usize> = None;

    let flush = |out: &mut String, word: &str| {
        out.push_str(bindings.get(word).copied().unwrap_or(word));
    };

    for (i, c) in line.char_indices() {
        if c.is_alphabetic() {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            flush(&mut out, &line[start..i]);
        }
        out.push(c);
    }
    if let Some(start) = word_start {
        flush(&mut out, &line[start..]);
    }
    out
}

// ---------------------------------------------------------------------------
// Method table
// ---------------------------------------------------------------------------

/// Name → method mapping. Redefinition replaces the old method.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: HashMap<String, Method>,
}

impl MethodTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `method`, returning the definition it replaced.
    pub fn define(&mut self, method: Method) -> Option<Method> {
        self.methods.insert(method.name.clone(), method)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Resolve `name` and expand its body for `args`.
    pub fn expand(&self, name: &str, args: &[String]) -> Result<Vec<String>, CallError> {
        self.get(name)
            .ok_or_else(|| CallError::Undefined(name.to_owned()))?
            .expand(args)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
