//! Drawing surface abstraction.
//!
//! The engine never rasterizes anything itself. Fully resolved primitives
//! are sent to a [`DrawingSurface`], so different hosts can plug in their
//! own backend:
//! - [`Picture`] records the calls as graphics objects (used by the CLI
//!   and WASM hosts, then rendered to SVG)
//! - tests provide surfaces that log every call

use penscript_graphics::picture;
use penscript_graphics::types::{Color, Picture, Point, Rect, Shape};

/// Sink for resolved drawing operations.
///
/// Each call carries the pen color in effect. Fill calls are only made
/// while fill mode is on, and always precede the matching outline call.
pub trait DrawingSurface {
    /// Stroke a straight line.
    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    /// Fill the interior of `rect`.
    fn fill_rectangle(&mut self, rect: Rect, color: Color);

    /// Outline `rect`.
    fn draw_rectangle(&mut self, rect: Rect, color: Color);

    /// Fill the ellipse inscribed in `bounds`.
    fn fill_ellipse(&mut self, bounds: Rect, color: Color);

    /// Outline the ellipse inscribed in `bounds`.
    fn draw_ellipse(&mut self, bounds: Rect, color: Color);

    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Outline a closed polygon.
    fn draw_polygon(&mut self, points: &[Point], color: Color);

    /// Erase everything drawn so far.
    fn clear(&mut self);
}

impl DrawingSurface for Picture {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        picture::addto_stroke(self, Shape::Line(kurbo::Line::new(from, to)), color);
    }

    fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        picture::addto_fill(self, Shape::Rect(rect), color);
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        picture::addto_stroke(self, Shape::Rect(rect), color);
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: Color) {
        picture::addto_fill(self, Shape::ellipse_in(bounds), color);
    }

    fn draw_ellipse(&mut self, bounds: Rect, color: Color) {
        picture::addto_stroke(self, Shape::ellipse_in(bounds), color);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        picture::addto_fill(self, Shape::Polygon(points.to_vec()), color);
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        picture::addto_stroke(self, Shape::Polygon(points.to_vec()), color);
    }

    fn clear(&mut self) {
        picture::clear(self, Color::DARK_GRAY);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
