//! Error types for the `PenScript` engine.

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of errors.
///
/// Every kind is recoverable: the failing line is reported and execution
/// continues with the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The first word is not a command, keyword, or defined method.
    UnknownCommand,
    /// Wrong parameter count or parameter type for a command.
    ArityOrTypeError,
    /// A variable was referenced before being assigned.
    UndefinedVariable,
    /// A method was called before being defined.
    UndefinedMethod,
    /// A method was called with the wrong number of arguments.
    ParameterCountMismatch,
    /// Stray `endif`/`endloop`/`endmethod`, nested loop or method,
    /// unterminated block, or recursive method call.
    MismatchedControlFlow,
    /// Comparison operator other than `>`, `<`, `==`.
    InvalidOperator,
    /// Integer arithmetic overflowed.
    ArithmeticOverflow,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::ArityOrTypeError => write!(f, "invalid parameters"),
            Self::UndefinedVariable => write!(f, "undefined variable"),
            Self::UndefinedMethod => write!(f, "undefined method"),
            Self::ParameterCountMismatch => write!(f, "parameter count mismatch"),
            Self::MismatchedControlFlow => write!(f, "mismatched control flow"),
            Self::InvalidOperator => write!(f, "invalid operator"),
            Self::ArithmeticOverflow => write!(f, "arithmetic overflow"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error raised while executing one script line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_no}: {message}")]
pub struct ScriptError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable reason.
    pub message: String,
    /// The offending line, after method parameter substitution.
    pub line: String,
    /// 1-based number of the top-level line being executed.
    pub line_no: usize,
}

impl ScriptError {
    /// Create a new error for `line`.
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        line: impl Into<String>,
        line_no: usize,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            line: line.into(),
            line_no,
        }
    }
}

/// Convenience type alias for results using [`ScriptError`].
pub type ScriptResult<T> = Result<T, ScriptError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
