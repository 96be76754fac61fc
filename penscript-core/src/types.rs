//! Pen state types.

use std::fmt;

use penscript_graphics::types::{Color, Point};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// An integer position on the drawing surface (Y axis pointing down).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Pen color
// ---------------------------------------------------------------------------

/// The colors a pen can be set to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenColor {
    Red,
    Green,
    Blue,
    #[default]
    Black,
}

impl PenColor {
    /// Parse a color name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            "black" => Some(Self::Black),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Black => "black",
        }
    }

    /// The RGB color used when drawing.
    #[must_use]
    pub const fn to_color(self) -> Color {
        match self {
            Self::Red => Color::RED,
            Self::Green => Color::GREEN,
            Self::Blue => Color::BLUE,
            Self::Black => Color::BLACK,
        }
    }
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Pen state
// ---------------------------------------------------------------------------

/// Cursor position, color and fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenState {
    pub position: Position,
    pub color: PenColor,
    /// Whether closed shapes are filled before being outlined.
    pub fill: bool,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            position: Position::ORIGIN,
            color: PenColor::Black,
            fill: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_defaults() {
        let pen = PenState::default();
        assert_eq!(pen.position, Position::ORIGIN);
        assert_eq!(pen.color, PenColor::Black);
        assert!(pen.fill);
    }

    #[test]
    fn color_names_ignore_case() {
        assert_eq!(PenColor::from_name("Red"), Some(PenColor::Red));
        assert_eq!(PenColor::from_name("BLUE"), Some(PenColor::Blue));
        assert_eq!(PenColor::from_name("purple"), None);
    }

    #[test]
    fn position_to_point() {
        let p: Point = Position::new(3, -4).into();
        assert_eq!(p, Point::new(3.0, -4.0));
        assert_eq!(Position::new(3, -4).to_string(), "(3,-4)");
    }
}
