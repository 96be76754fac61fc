//! The variable store.
//!
//! Variables are untyped integers created on first assignment. They live
//! as long as the interpreter: loop iterations and method calls see and
//! update the same store.

use std::collections::HashMap;

/// Name → integer mapping.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: HashMap<String, i32>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `name`, if assigned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i32> {
        self.values.get(name).copied()
    }

    /// Create or overwrite `name`.
    pub fn set(&mut self, name: &str, value: i32) {
        self.values.insert(name.to_owned(), value);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace a token with the decimal value of the variable it names.
    ///
    /// Tokens that are not assigned variables come back unchanged, so
    /// color names and keywords pass through.
    #[must_use]
    pub fn substitute<'a>(&self, token: &'a str) -> std::borrow::Cow<'a, str> {
        match self.get(token) {
            Some(v) => std::borrow::Cow::Owned(v.to_string()),
            None => std::borrow::Cow::Borrowed(token),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
