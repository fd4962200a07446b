//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and the
//!   Python bindings. Breaking changes are allowed and expected.
//! - Names here follow the engine's vocabulary (AxisAligned2DLine, ...) where
//!   the Rust type names are shorter.

// 2D values
pub use crate::geom2::{
    in_range, Coord, Direction, Line as AxisAligned2DLine, Line, OrthogonalPolygon, Outline,
    Point, Polygon, Rectangle as AxisAligned2DRectangle, Rectangle, CONVEX, REFLEX,
};
// 2D algorithms
pub use crate::geom2::{merge_rectangles, split_overlapping_rectangles, split_rectangle, RectangleMerger};
// Random polygons
pub use crate::geom2::rand::{
    add_rectangle, draw_polygons, random_rectangle, GeneratorError, PolygonGenConfig,
    PolygonGenerator, PolygonReplay, PolygonSample, RandomSource, ReplayToken,
};
// 3D boxes
pub use crate::geom3::{
    boxes_intersect, boxes_intersect as do_boxes_intersect, Box3 as AxisAligned3DBox, Box3,
    Rect3 as AxisAligned3DRectangle, Rect3,
};
// Errors
pub use crate::error::{GeometryError, GeometryResult};

/// Decompose a polygon into non-overlapping rectangles, in canonical order.
pub fn decompose_polygon(polygon: &OrthogonalPolygon) -> Vec<Rectangle> {
    polygon.split().into_iter().collect()
}
