//! Picture assembly operations.
//!
//! Every drawing primitive ends up as one of two operations:
//!
//! - [`addto_fill`]: add a filled region
//! - [`addto_stroke`]: add an outlined shape
//!
//! plus [`clear`], which wipes the picture and paints a background.

use crate::types::{
    Color, DEFAULT_STROKE_WIDTH, FillObject, GraphicsObject, Picture, Rect, Scalar, Shape,
    StrokeObject,
};

// ---------------------------------------------------------------------------
// addto operations
// ---------------------------------------------------------------------------

/// Add a filled region to a picture.
///
/// Open shapes (lines) have no interior and are ignored.
pub fn addto_fill(pic: &mut Picture, shape: Shape, color: Color) {
    if !shape.is_closed() {
        return;
    }
    pic.push(GraphicsObject::Fill(FillObject { shape, color }));
}

/// Add an outlined shape to a picture with the default stroke width.
pub fn addto_stroke(pic: &mut Picture, shape: Shape, color: Color) {
    addto_stroke_with_width(pic, shape, color, DEFAULT_STROKE_WIDTH);
}

/// Add an outlined shape to a picture.
pub fn addto_stroke_with_width(pic: &mut Picture, shape: Shape, color: Color, width: Scalar) {
    pic.push(GraphicsObject::Stroke(StrokeObject {
        shape,
        color,
        width,
    }));
}

/// Remove every object and paint the picture with `background`.
pub fn clear(pic: &mut Picture, background: Color) {
    pic.objects.clear();
    pic.background = Some(background);
}

// ---------------------------------------------------------------------------
// Bounding box computation
// ---------------------------------------------------------------------------

/// Compute the bounding box of a picture.
///
/// Strokes are inflated by half their width. Returns `None` for an empty
/// picture.
#[must_use]
pub fn picture_bbox(pic: &Picture) -> Option<Rect> {
    pic.objects
        .iter()
        .map(|obj| match obj {
            GraphicsObject::Fill(fill) => fill.shape.bounding_box(),
            GraphicsObject::Stroke(stroke) => {
                let half = stroke.width / 2.0;
                stroke.shape.bounding_box().inflate(half, half)
            }
        })
        .reduce(|a, b| a.union(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use kurbo::Line;
    use pretty_assertions::assert_eq;

    fn square() -> Shape {
        Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn fill_then_stroke_keeps_order() {
        let mut pic = Picture::new();
        addto_fill(&mut pic, square(), Color::RED);
        addto_stroke(&mut pic, square(), Color::RED);
        assert_eq!(pic.objects.len(), 2);
        assert!(matches!(pic.objects[0], GraphicsObject::Fill(_)));
        assert!(matches!(pic.objects[1], GraphicsObject::Stroke(_)));
    }

    #[test]
    fn fill_ignores_open_shapes() {
        let mut pic = Picture::new();
        addto_fill(
            &mut pic,
            Shape::Line(Line::new((0.0, 0.0), (5.0, 5.0))),
            Color::BLACK,
        );
        assert!(pic.is_empty());
    }

    #[test]
    fn clear_removes_objects_and_sets_background() {
        let mut pic = Picture::new();
        addto_stroke(&mut pic, square(), Color::BLACK);
        clear(&mut pic, Color::DARK_GRAY);
        assert!(pic.is_empty());
        assert_eq!(pic.background, Some(Color::DARK_GRAY));
    }

    #[test]
    fn bbox_of_empty_picture() {
        assert_eq!(picture_bbox(&Picture::new()), None);
    }

    #[test]
    fn bbox_includes_stroke_width() {
        let mut pic = Picture::new();
        addto_stroke_with_width(&mut pic, square(), Color::BLACK, 2.0);
        assert_eq!(picture_bbox(&pic), Some(Rect::new(-1.0, -1.0, 11.0, 11.0)));
    }

    #[test]
    fn bbox_unions_objects() {
        let mut pic = Picture::new();
        addto_fill(&mut pic, square(), Color::BLUE);
        addto_fill(
            &mut pic,
            Shape::Polygon(vec![
                Point::new(20.0, 20.0),
                Point::new(30.0, 20.0),
                Point::new(25.0, 5.0),
            ]),
            Color::BLUE,
        );
        assert_eq!(picture_bbox(&pic), Some(Rect::new(0.0, 0.0, 30.0, 20.0)));
    }
}
