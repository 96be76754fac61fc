//! Assignment and primitive dispatch.
//!
//! Primitives are resolved against the variable store, validated, and then
//! turned into pen updates and [`DrawingSurface`] calls. Closed shapes are
//! filled first (when fill mode is on) and outlined second, both in the
//! current pen color.

use penscript_graphics::types::{Point, Rect};
use tracing::{trace, warn};

use super::Interpreter;
use crate::command::Primitive;
use crate::expr;
use crate::recognizer::{self, Invocation};
use crate::surface::DrawingSurface;
use crate::types::Position;

impl<S: DrawingSurface> Interpreter<S> {
    /// `name = expr`.
    pub(super) fn assign(&mut self, name: &str, expr: &str, line: &str) {
        match expr::evaluate(expr, &self.variables) {
            Ok(value) => {
                trace!(
                    name,
                    value,
                    arithmetic = recognizer::is_arithmetic_assignment(line),
                    "assign"
                );
                self.variables.set(name, value);
            }
            Err(err) => self.report(err.kind(), err.to_string(), line),
        }
    }

    /// Substitute, validate and dispatch one primitive line.
    pub(super) fn execute_primitive(&mut self, command: Primitive, line: &str) {
        let substituted = recognizer::substitute_variables(line, &self.variables);
        let args: Vec<String> = substituted
            .split_whitespace()
            .skip(1)
            .map(str::to_owned)
            .collect();
        match recognizer::validate_parameters(command, &args) {
            Ok(invocation) => self.dispatch(invocation),
            Err(err) => self.report(err.kind(), err.to_string(), line),
        }
    }

    fn dispatch(&mut self, invocation: Invocation) {
        trace!(?invocation, position = %self.pen.position, "dispatch");
        let color = self.pen.color.to_color();
        let origin = Point::from(self.pen.position);

        match invocation {
            Invocation::MoveTo(target) => self.pen.position = target,
            Invocation::DrawTo(target) => {
                self.surface.draw_line(origin, target.into(), color);
                self.pen.position = target;
            }
            Invocation::Clear => {
                self.surface.clear();
                self.pen.position = Position::ORIGIN;
            }
            Invocation::Reset => self.pen.position = Position::ORIGIN,
            Invocation::Rectangle { width, height } => {
                let rect = Rect::from_origin_size(origin, (f64::from(width), f64::from(height)));
                if self.pen.fill {
                    self.surface.fill_rectangle(rect, color);
                }
                self.surface.draw_rectangle(rect, color);
            }
            Invocation::Circle { radius } => {
                let diameter = 2.0 * f64::from(radius);
                let bounds = Rect::from_origin_size(origin, (diameter, diameter));
                if self.pen.fill {
                    self.surface.fill_ellipse(bounds, color);
                }
                self.surface.draw_ellipse(bounds, color);
            }
            Invocation::Triangle(vertices) => {
                let points = vertices.map(Point::from);
                if self.pen.fill {
                    self.surface.fill_polygon(&points, color);
                }
                self.surface.draw_polygon(&points, color);
            }
            Invocation::Pen(Some(new_color)) => self.pen.color = new_color,
            Invocation::Pen(None) => warn!("unrecognized pen color; pen unchanged"),
            Invocation::Fill(Some(on)) => self.pen.fill = on,
            Invocation::Fill(None) => warn!("fill expects `on` or `off`; fill mode unchanged"),
        }
    }
}
