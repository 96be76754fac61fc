//! Block structure: conditional frames, loop buffering and replay, method
//! definition and expansion.

use tracing::debug;

use super::{Interpreter, Mode, PendingLoop, PendingMethod};
use crate::command::Control;
use crate::error::ErrorKind;
use crate::expr;
use crate::methods::Method;
use crate::recognizer::{self, MethodHeader, Statement};
use crate::surface::DrawingSurface;

impl<S: DrawingSurface> Interpreter<S> {
    // =======================================================================
    // Conditionals
    // =======================================================================

    /// `if <condition>`.
    ///
    /// The condition is always evaluated, so a bad condition is reported
    /// even inside a skipped block. Under a false frame the pushed frame is
    /// `false` whatever the outcome.
    pub(super) fn push_condition(&mut self, condition: &str, line: &str) {
        let value = match expr::evaluate_condition(condition, &self.variables) {
            Ok(value) => value,
            Err(err) => {
                self.report(err.kind(), err.to_string(), line);
                false
            }
        };
        let frame = self.gate_open() && value;
        debug!(condition, frame, depth = self.conditions.len() + 1, "if");
        self.conditions.push(frame);
    }

    /// `endif`.
    pub(super) fn pop_condition(&mut self, line: &str) {
        if self.conditions.pop().is_none() {
            self.report(
                ErrorKind::MismatchedControlFlow,
                "`endif` without matching `if`",
                line,
            );
        }
    }

    // =======================================================================
    // Loops
    // =======================================================================

    /// `loop <count>`: evaluate the count and start collecting the body.
    ///
    /// A count that cannot be used still opens the block (with zero
    /// iterations), so its body and `endloop` are consumed rather than
    /// executed one by one.
    pub(super) fn open_loop(&mut self, count: &str, line: &str) {
        let count = if self.gate_open() {
            self.loop_count(count, line).unwrap_or(0)
        } else {
            0
        };
        debug!(count, "loop");
        self.mode = Mode::CollectingLoop(PendingLoop {
            count,
            body: Vec::new(),
        });
    }

    fn loop_count(&mut self, count: &str, line: &str) -> Option<u32> {
        let value = match expr::evaluate(count, &self.variables) {
            Ok(value) => value,
            Err(err) => {
                self.report(err.kind(), err.to_string(), line);
                return None;
            }
        };
        let Ok(value) = u32::try_from(value) else {
            self.report(
                ErrorKind::ArityOrTypeError,
                format!("loop count must not be negative, got {value}"),
                line,
            );
            return None;
        };
        if value > self.config.max_loop_count {
            self.report(
                ErrorKind::ArityOrTypeError,
                format!(
                    "loop count {value} exceeds the limit of {}",
                    self.config.max_loop_count
                ),
                line,
            );
            return None;
        }
        Some(value)
    }

    /// A line received while collecting a loop body.
    pub(super) fn feed_loop_body(&mut self, line: &str) {
        match recognizer::control_keyword(line) {
            Some(Control::EndLoop) => self.close_loop(line),
            Some(Control::Loop) => self.abandon_loop("nested `loop` is not supported", line),
            Some(Control::Method | Control::EndMethod) => {
                self.abandon_loop("methods cannot be defined inside a loop", line);
            }
            _ => {
                if let Mode::CollectingLoop(pending) = &mut self.mode {
                    pending.body.push(line.to_owned());
                }
            }
        }
    }

    fn abandon_loop(&mut self, reason: &str, line: &str) {
        self.mode = Mode::Idle;
        self.report(
            ErrorKind::MismatchedControlFlow,
            format!("{reason}; loop discarded"),
            line,
        );
    }

    /// `endloop`: replay the collected body.
    fn close_loop(&mut self, line: &str) {
        let Mode::CollectingLoop(pending) = std::mem::take(&mut self.mode) else {
            return;
        };
        if let Statement::Invalid(err) = recognizer::classify(line) {
            self.report(err.kind(), err.to_string(), line);
        }
        debug!(count = pending.count, lines = pending.body.len(), "endloop");
        for _ in 0..pending.count {
            for body_line in &pending.body {
                let stmt = recognizer::classify(body_line);
                self.execute_statement(stmt, body_line);
            }
        }
    }

    // =======================================================================
    // Methods
    // =======================================================================

    /// `method <header>`: start collecting a definition.
    pub(super) fn open_method(&mut self, header: MethodHeader) {
        let active = self.gate_open();
        debug!(name = %header.name, params = ?header.params, active, "method");
        self.mode = Mode::DefiningMethod(PendingMethod {
            header,
            body: Vec::new(),
            active,
        });
    }

    /// A line received while defining a method.
    pub(super) fn feed_method_body(&mut self, line: &str) {
        match recognizer::control_keyword(line) {
            Some(Control::EndMethod) => self.close_method(line),
            Some(Control::Method) => {
                self.mode = Mode::Idle;
                self.report(
                    ErrorKind::MismatchedControlFlow,
                    "`method` inside a method definition; definition discarded",
                    line,
                );
            }
            _ => {
                if let Mode::DefiningMethod(pending) = &mut self.mode {
                    pending.body.push(line.to_owned());
                }
            }
        }
    }

    /// `endmethod`: store the definition.
    fn close_method(&mut self, line: &str) {
        let Mode::DefiningMethod(pending) = std::mem::take(&mut self.mode) else {
            return;
        };
        if let Statement::Invalid(err) = recognizer::classify(line) {
            self.report(err.kind(), err.to_string(), line);
        }
        if !pending.active {
            debug!(name = %pending.header.name, "method skipped by false condition");
            return;
        }
        let MethodHeader { name, params } = pending.header;
        debug!(name = %name, lines = pending.body.len(), "endmethod");
        if self
            .methods
            .define(Method::new(name, params, pending.body))
            .is_some()
        {
            debug!("method redefined");
        }
    }

    /// Expand a method and feed its body through the state machine.
    pub(super) fn call_method(&mut self, name: &str, args: &[String], line: &str) {
        if self.call_stack.iter().any(|active| active == name) {
            self.report(
                ErrorKind::MismatchedControlFlow,
                format!("recursive call to method `{name}`"),
                line,
            );
            return;
        }
        let body = match self.methods.expand(name, args) {
            Ok(body) => body,
            Err(err) => {
                self.report(err.kind(), err.to_string(), line);
                return;
            }
        };

        debug!(name, ?args, depth = self.call_stack.len() + 1, "call");
        self.call_stack.push(name.to_owned());
        for body_line in &body {
            let body_line = body_line.trim();
            if !body_line.is_empty() {
                self.feed(body_line);
            }
        }
        self.call_stack.pop();

        if matches!(self.mode, Mode::CollectingLoop(_)) {
            self.mode = Mode::Idle;
            self.report(
                ErrorKind::MismatchedControlFlow,
                format!("method `{name}` leaves a `loop` open; loop discarded"),
                line,
            );
        }
    }
}
