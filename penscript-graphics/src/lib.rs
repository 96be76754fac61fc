//! Picture model for `PenScript` drawings.
//!
//! Shapes are built on `kurbo` geometry and collected into a [`Picture`]
//! that renderers (SVG, WASM preview) consume.

pub mod picture;
pub mod types;

pub use types::{Color, FillObject, GraphicsObject, Picture, Point, Rect, Scalar, Shape, StrokeObject};
