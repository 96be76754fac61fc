//! The `PenScript` interpreter.
//!
//! This is the central module that ties together the recognizer, the
//! variable and method stores, and the drawing surface. Lines are consumed
//! one at a time by a three-state machine:
//!
//! - **Idle**: `method` and `loop` headers open a block; any other line is
//!   executed immediately.
//! - **Defining a method**: lines are buffered verbatim until `endmethod`.
//! - **Collecting a loop**: lines are buffered verbatim until `endloop`,
//!   then replayed the requested number of times.
//!
//! Immediate execution is gated by the conditional stack: a non-control
//! line only runs while every open `if` frame is true.
//!
//! Every error is local to the line that raised it. It is recorded in
//! [`Interpreter::errors`] and execution carries on with the next line.

mod control;
mod dispatch;

use penscript_graphics::types::Picture;
use tracing::debug;

use crate::config::Config;
use crate::error::{ErrorKind, ScriptError, ScriptResult};
use crate::methods::{Method, MethodTable};
use crate::recognizer::{self, MethodHeader, Statement, ValidationError};
use crate::surface::DrawingSurface;
use crate::types::{PenColor, PenState, Position};
use crate::variables::Variables;

// ---------------------------------------------------------------------------
// Block state
// ---------------------------------------------------------------------------

/// Which kind of block, if any, is currently being buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Idle,
    DefiningMethod,
    CollectingLoop,
}

/// A `method` block waiting for its `endmethod`.
#[derive(Debug)]
struct PendingMethod {
    header: MethodHeader,
    body: Vec<String>,
    /// False when the header appeared under a false `if`; the definition
    /// is then dropped at `endmethod`.
    active: bool,
}

/// A `loop` block waiting for its `endloop`.
#[derive(Debug)]
struct PendingLoop {
    count: u32,
    body: Vec<String>,
}

#[derive(Debug, Default)]
enum Mode {
    #[default]
    Idle,
    DefiningMethod(PendingMethod),
    CollectingLoop(PendingLoop),
}

// ---------------------------------------------------------------------------
// Interpreter state
// ---------------------------------------------------------------------------

/// The `PenScript` interpreter.
///
/// Owns all execution state for one run: pen, variables, methods, the
/// conditional stack, and the block buffers. Independent instances share
/// nothing.
pub struct Interpreter<S: DrawingSurface = Picture> {
    /// Where resolved primitives are sent.
    surface: S,
    /// Cursor position, color and fill mode.
    pen: PenState,
    /// Variable storage.
    variables: Variables,
    /// Defined methods.
    methods: MethodTable,
    /// One frame per open `if`, innermost last.
    conditions: Vec<bool>,
    /// Block being buffered, if any.
    mode: Mode,
    /// Methods currently being expanded, outermost first.
    call_stack: Vec<String>,
    /// Limits.
    config: Config,
    /// Error list.
    errors: Vec<ScriptError>,
    /// Number of the top-level line being executed (1-based).
    line_no: usize,
}

impl Interpreter<Picture> {
    /// Create an interpreter that records into a fresh [`Picture`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_surface(Picture::new())
    }
}

impl Default for Interpreter<Picture> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawingSurface> Interpreter<S> {
    /// Create an interpreter drawing onto `surface`.
    pub fn with_surface(surface: S) -> Self {
        Self {
            surface,
            pen: PenState::default(),
            variables: Variables::new(),
            methods: MethodTable::new(),
            conditions: Vec::new(),
            mode: Mode::Idle,
            call_stack: Vec::new(),
            config: Config::default(),
            errors: Vec::new(),
            line_no: 0,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    // =======================================================================
    // Public interface
    // =======================================================================

    /// Run a whole program.
    ///
    /// Every line is executed even if earlier ones fail. Line numbers in
    /// errors count from 1 for each run. Blocks still open at the end are
    /// reported and discarded (see [`Self::finish`]).
    /// Returns the first error raised by this run, if any; all of them are
    /// available from [`Self::errors`].
    pub fn run(&mut self, source: &str) -> ScriptResult<()> {
        let first = self.errors.len();
        self.line_no = 0;
        for line in source.lines() {
            // Errors are collected; keep going.
            let _ = self.execute_line(line);
        }
        self.finish();
        self.errors.get(first).cloned().map_or(Ok(()), Err)
    }

    /// Execute one line, as typed interactively.
    ///
    /// Returns the first error raised while processing it (a method call
    /// or loop replay can raise several).
    pub fn execute_line(&mut self, line: &str) -> ScriptResult<()> {
        self.line_no += 1;
        let first = self.errors.len();
        let line = line.trim();
        if !line.is_empty() {
            debug!(line_no = self.line_no, line, "execute");
            self.feed(line);
        }
        self.errors.get(first).cloned().map_or(Ok(()), Err)
    }

    /// Close out a run.
    ///
    /// An unterminated `method` or `loop` block is discarded and unclosed
    /// `if` frames are dropped, each reported as mismatched control flow.
    /// Variables, methods and the pen are kept.
    pub fn finish(&mut self) {
        match std::mem::take(&mut self.mode) {
            Mode::Idle => {}
            Mode::DefiningMethod(pending) => self.report(
                ErrorKind::MismatchedControlFlow,
                format!(
                    "method `{}` is missing `endmethod`; definition discarded",
                    pending.header.name
                ),
                "method",
            ),
            Mode::CollectingLoop(_) => self.report(
                ErrorKind::MismatchedControlFlow,
                "`loop` is missing `endloop`; loop discarded",
                "loop",
            ),
        }
        if !self.conditions.is_empty() {
            let open = self.conditions.len();
            self.conditions.clear();
            self.report(
                ErrorKind::MismatchedControlFlow,
                format!("{open} `if` block(s) missing `endif`"),
                "if",
            );
        }
    }

    // =======================================================================
    // Accessors
    // =======================================================================

    /// Current pen position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pen.position
    }

    /// Full pen state.
    #[must_use]
    pub const fn pen(&self) -> &PenState {
        &self.pen
    }

    #[must_use]
    pub const fn pen_color(&self) -> PenColor {
        self.pen.color
    }

    #[must_use]
    pub const fn fill_mode(&self) -> bool {
        self.pen.fill
    }

    /// Value of a variable, if assigned.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<i32> {
        self.variables.get(name)
    }

    /// Assign a variable from the host, as `name = value` would.
    pub fn set_variable(&mut self, name: &str, value: i32) -> Result<(), ValidationError> {
        match recognizer::classify(&format!("{name} = {value}")) {
            Statement::Assignment { .. } => {
                self.variables.set(name, value);
                Ok(())
            }
            Statement::Invalid(err) => Err(err),
            _ => Err(ValidationError::UnknownCommand {
                keyword: name.to_owned(),
            }),
        }
    }

    #[must_use]
    pub const fn variables(&self) -> &Variables {
        &self.variables
    }

    /// A defined method.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    #[must_use]
    pub const fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Depth of the conditional stack.
    #[must_use]
    pub fn condition_depth(&self) -> usize {
        self.conditions.len()
    }

    #[must_use]
    pub const fn block_state(&self) -> BlockState {
        match self.mode {
            Mode::Idle => BlockState::Idle,
            Mode::DefiningMethod(_) => BlockState::DefiningMethod,
            Mode::CollectingLoop(_) => BlockState::CollectingLoop,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Every error recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ScriptError] {
        &self.errors
    }

    /// Drain the error list.
    pub fn take_errors(&mut self) -> Vec<ScriptError> {
        std::mem::take(&mut self.errors)
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the interpreter, keeping what was drawn.
    pub fn into_surface(self) -> S {
        self.surface
    }

    // =======================================================================
    // Line processing
    // =======================================================================

    /// Feed one trimmed, non-empty line to the state machine.
    fn feed(&mut self, line: &str) {
        match self.mode {
            Mode::DefiningMethod(_) => self.feed_method_body(line),
            Mode::CollectingLoop(_) => self.feed_loop_body(line),
            Mode::Idle => match recognizer::classify(line) {
                Statement::MethodDef(header) => self.open_method(header),
                Statement::Loop { count } => self.open_loop(&count, line),
                stmt => self.execute_statement(stmt, line),
            },
        }
    }

    /// Whether every open `if` frame is true.
    fn gate_open(&self) -> bool {
        self.conditions.iter().all(|&frame| frame)
    }

    /// The immediate-execution path.
    fn execute_statement(&mut self, stmt: Statement, line: &str) {
        match stmt {
            Statement::If { condition } => self.push_condition(&condition, line),
            Statement::EndIf => self.pop_condition(line),
            Statement::EndLoop => self.report(
                ErrorKind::MismatchedControlFlow,
                "`endloop` without matching `loop`",
                line,
            ),
            Statement::EndMethod => self.report(
                ErrorKind::MismatchedControlFlow,
                "`endmethod` without matching `method`",
                line,
            ),
            Statement::Loop { .. } | Statement::MethodDef(_) => self.report(
                ErrorKind::MismatchedControlFlow,
                "a block cannot be opened here",
                line,
            ),
            _ if !self.gate_open() => {
                debug!(line, "skipped by false condition");
            }
            Statement::MethodCall { name, args } => self.call_method(&name, &args, line),
            Statement::Assignment { name, expr } => self.assign(&name, &expr, line),
            Statement::Primitive { command, .. } => self.execute_primitive(command, line),
            Statement::Invalid(ValidationError::UnknownCommand { keyword })
                if keyword == line && self.methods.contains(&keyword) =>
            {
                // Bare method name, called without parentheses.
                self.call_method(&keyword, &[], line);
            }
            Statement::Invalid(err) => self.report(err.kind(), err.to_string(), line),
        }
    }

    // =======================================================================
    // Error handling
    // =======================================================================

    /// Record a non-fatal error against the current top-level line.
    fn report(&mut self, kind: ErrorKind, message: impl Into<String>, line: &str) {
        let err = ScriptError::new(kind, message, line, self.line_no);
        debug!(line_no = err.line_no, %kind, line, "{}", err.message);
        self.errors.push(err);
    }
}
