//! SVG renderer for `PenScript` pictures.
//!
//! Converts a [`Picture`] into an SVG [`Document`] using the `svg` crate.
//!
//! - Script coordinates already have Y pointing down, like SVG, so points
//!   are written as-is.
//! - Path data is built as raw `d` strings from each shape's
//!   [`BezPath`], keeping `f64` precision (the `svg` crate's `Data` builder
//!   uses `f32`).
//! - A picture that was cleared carries a background color, which becomes
//!   a `<rect>` covering the whole view box.

use std::fmt::Write as _;

use kurbo::{BezPath, PathEl};
use svg::Document;
use svg::node::element::{Group, Path as SvgPath, Rectangle};

use penscript_graphics::picture::picture_bbox;
use penscript_graphics::types::{
    Color, FillObject, GraphicsObject, Picture, Point, Rect, Scalar, StrokeObject,
};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a [`Picture`] to an SVG [`Document`].
///
/// The `viewBox` is derived from the picture's bounding box with a small
/// margin; see [`RenderOptions::canvas`] for a fixed drawing area.
#[must_use]
pub fn render(picture: &Picture) -> Document {
    render_with_options(picture, &RenderOptions::default())
}

/// Render a [`Picture`] to an SVG string.
#[must_use]
pub fn render_to_string(picture: &Picture) -> String {
    render(picture).to_string()
}

/// Options controlling SVG output.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Extra margin around the bounding box. Default: 1.0.
    /// Ignored when a canvas is set.
    pub margin: Scalar,
    /// Maximum number of decimal places for coordinates. Default: 2.
    pub precision: usize,
    /// Fixed `(width, height)` drawing area with its origin at the top-left.
    /// When `None`, the view box hugs the drawing.
    pub canvas: Option<(Scalar, Scalar)>,
    /// Overrides every stroke's width when set.
    pub stroke_width: Option<Scalar>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 1.0,
            precision: 2,
            canvas: None,
            stroke_width: None,
        }
    }
}

/// Render a [`Picture`] to an SVG [`Document`] with custom options.
#[must_use]
pub fn render_with_options(picture: &Picture, opts: &RenderOptions) -> Document {
    let view = view_box(picture, opts);

    let mut content = Group::new();
    for object in &picture.objects {
        content = match object {
            GraphicsObject::Fill(fill) => content.add(render_fill(fill, opts)),
            GraphicsObject::Stroke(stroke) => content.add(render_stroke(stroke, opts)),
        };
    }

    build_document(view, picture.background, opts, content)
}

// ---------------------------------------------------------------------------
// Individual object renderers
// ---------------------------------------------------------------------------

/// Render a filled region to an SVG `<path>` element.
fn render_fill(fill: &FillObject, opts: &RenderOptions) -> SvgPath {
    SvgPath::new()
        .set("d", path_to_d(&fill.shape.to_path(), opts.precision))
        .set("fill", color_to_svg(fill.color))
        .set("stroke", "none")
}

/// Render an outlined shape to an SVG `<path>` element.
fn render_stroke(stroke: &StrokeObject, opts: &RenderOptions) -> SvgPath {
    let width = opts.stroke_width.unwrap_or(stroke.width);
    SvgPath::new()
        .set("d", path_to_d(&stroke.shape.to_path(), opts.precision))
        .set("fill", "none")
        .set("stroke", color_to_svg(stroke.color))
        .set("stroke-width", fmt_scalar(width, opts.precision))
        .set("stroke-linejoin", "miter")
}

// ---------------------------------------------------------------------------
// Path → SVG "d" attribute
// ---------------------------------------------------------------------------

/// Convert a [`BezPath`] to SVG path data (`M`, `L`, `Q`, `C`, `Z`).
fn path_to_d(path: &BezPath, precision: usize) -> String {
    let elements = path.elements();
    let mut d = String::with_capacity(elements.len() * 24);

    for el in elements {
        match *el {
            PathEl::MoveTo(p) => {
                d.push('M');
                write_point(&mut d, p, precision);
            }
            PathEl::LineTo(p) => {
                d.push('L');
                write_point(&mut d, p, precision);
            }
            PathEl::QuadTo(c, p) => {
                d.push('Q');
                write_point(&mut d, c, precision);
                d.push(' ');
                write_point(&mut d, p, precision);
            }
            PathEl::CurveTo(c1, c2, p) => {
                d.push('C');
                write_point(&mut d, c1, precision);
                d.push(' ');
                write_point(&mut d, c2, precision);
                d.push(' ');
                write_point(&mut d, p, precision);
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }

    d
}

/// Write "x,y" to the string.
fn write_point(d: &mut String, p: Point, precision: usize) {
    let _ = write!(
        d,
        "{},{}",
        fmt_scalar(p.x, precision),
        fmt_scalar(p.y, precision)
    );
}

// ---------------------------------------------------------------------------
// Attribute helpers
// ---------------------------------------------------------------------------

/// Convert a [`Color`] to an SVG color string.
fn color_to_svg(c: Color) -> String {
    match c.to_rgb8() {
        [0, 0, 0] => "black".to_owned(),
        [255, 255, 255] => "white".to_owned(),
        [r, g, b] => format!("#{r:02x}{g:02x}{b:02x}"),
    }
}

/// Format a scalar to the given precision, stripping trailing zeros.
///
/// Negative zero is written as `0`.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" { "0".to_owned() } else { s }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

/// The area shown by the document.
fn view_box(picture: &Picture, opts: &RenderOptions) -> Rect {
    if let Some((width, height)) = opts.canvas {
        return Rect::new(0.0, 0.0, width, height);
    }
    picture_bbox(picture).map_or_else(
        || Rect::new(0.0, 0.0, 100.0, 100.0),
        |bb| bb.inflate(opts.margin, opts.margin),
    )
}

/// Build the final SVG [`Document`] from rendered content.
fn build_document(
    view: Rect,
    background: Option<Color>,
    opts: &RenderOptions,
    content: Group,
) -> Document {
    let p = opts.precision;
    let mut doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(view.x0, p),
                fmt_scalar(view.y0, p),
                fmt_scalar(view.width(), p),
                fmt_scalar(view.height(), p),
            ),
        )
        .set("width", fmt_scalar(view.width(), p))
        .set("height", fmt_scalar(view.height(), p));

    if let Some(color) = background {
        doc = doc.add(
            Rectangle::new()
                .set("x", fmt_scalar(view.x0, p))
                .set("y", fmt_scalar(view.y0, p))
                .set("width", fmt_scalar(view.width(), p))
                .set("height", fmt_scalar(view.height(), p))
                .set("fill", color_to_svg(color)),
        );
    }

    doc.add(content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
