//! Core types shared across the `PenScript` system.
//!
//! These define the drawing model: colors, shapes, and the fill/stroke
//! objects that make up a picture.

use kurbo::{BezPath, Ellipse, Line, Shape as _};

pub use kurbo::{Point, Rect};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Script coordinates are integers, but geometry is carried as `f64` so
/// that it plugs straight into `kurbo`.
pub type Scalar = f64;

/// Flattening tolerance used when converting curved shapes to paths.
pub const PATH_TOLERANCE: Scalar = 0.1;

/// Default outline width, in user units.
pub const DEFAULT_STROKE_WIDTH: Scalar = 1.0;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: Scalar,
    pub g: Scalar,
    pub b: Scalar,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Matches the web/.NET "Green", which is only half intensity.
    pub const GREEN: Self = Self::new(0.0, 128.0 / 255.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Background painted by `clear`.
    pub const DARK_GRAY: Self = Self::new(169.0 / 255.0, 169.0 / 255.0, 169.0 / 255.0);

    #[inline]
    pub const fn new(r: Scalar, g: Scalar, b: Scalar) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 0..=255.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// A primitive shape in user space (Y axis pointing down).
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A straight segment.
    Line(Line),
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// An ellipse inscribed in its bounding rectangle.
    Ellipse(Ellipse),
    /// A closed polygon through the given vertices.
    Polygon(Vec<Point>),
}

impl Shape {
    /// Ellipse inscribed in `bounds`.
    #[must_use]
    pub fn ellipse_in(bounds: Rect) -> Self {
        Self::Ellipse(Ellipse::from_rect(bounds.abs()))
    }

    /// Whether the shape encloses an area that can be filled.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        !matches!(self, Self::Line(_))
    }

    /// Convert to a Bézier path.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Line(line) => line.to_path(PATH_TOLERANCE),
            Self::Rect(rect) => rect.abs().to_path(PATH_TOLERANCE),
            Self::Ellipse(ellipse) => ellipse.to_path(PATH_TOLERANCE),
            Self::Polygon(points) => {
                let mut path = BezPath::new();
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    path.move_to(*first);
                    for p in iter {
                        path.line_to(*p);
                    }
                    path.close_path();
                }
                path
            }
        }
    }

    /// Tight axis-aligned bounds.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Line(line) => line.bounding_box(),
            Self::Rect(rect) => rect.abs(),
            Self::Ellipse(ellipse) => ellipse.bounding_box(),
            Self::Polygon(points) => points
                .iter()
                .map(|p| Rect::from_points(*p, *p))
                .reduce(|a, b| a.union(b))
                .unwrap_or(Rect::ZERO),
        }
    }
}

// ---------------------------------------------------------------------------
// Graphics objects
// ---------------------------------------------------------------------------

/// A filled region.
#[derive(Debug, Clone, PartialEq)]
pub struct FillObject {
    pub shape: Shape,
    pub color: Color,
}

/// An outlined shape.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeObject {
    pub shape: Shape,
    pub color: Color,
    pub width: Scalar,
}

/// A single element in a picture.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsObject {
    Fill(FillObject),
    Stroke(StrokeObject),
}

/// An ordered collection of graphical objects.
///
/// `background` is `None` until the picture is cleared; a cleared picture
/// is painted with the clear color before any objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Picture {
    pub objects: Vec<GraphicsObject>,
    pub background: Option<Color>,
}

impl Picture {
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
            background: None,
        }
    }

    pub fn push(&mut self, obj: GraphicsObject) {
        self.objects.push(obj);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
