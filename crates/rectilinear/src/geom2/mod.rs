//! Axis-aligned 2D geometry on exact coordinates.
//!
//! Purpose
//! - Lines, rectangles and orthogonal polygons as canonical value types.
//! - Three algorithms on top: the rectangle-overlap splitter, the polygon
//!   decomposition (`OrthogonalPolygon::split`) and the rectangle merger.
//!
//! Why this design
//! - Exact `f64` comparisons: integer-grid callers get exact answers and
//!   boundary semantics (strict vs inclusive) are never blurred by an epsilon.
//! - Set-valued results are `BTreeSet`s keyed on canonical forms, so output
//!   order is deterministic and duplicates collapse.
//! - Scratch indexes (`SplitData`, `MergeData`) live only inside one call.
//!
//! Code cross-refs: `Line`, `Rectangle`, `OrthogonalPolygon`,
//! `RectangleMerger`, `split_overlapping_rectangles`

mod decompose;
mod line;
pub mod merge;
mod overlap;
mod polygon;
pub mod rand;
mod rect;
mod types;

pub use line::Line;
pub use merge::{merge_rectangles, RectangleMerger};
pub use overlap::{split_overlapping_rectangles, split_rectangle};
pub use polygon::{OrthogonalPolygon, Outline, Polygon, CONVEX, REFLEX};
pub use rect::Rectangle;
pub use types::{in_range, Coord, Direction, Point};

#[cfg(test)]
mod tests;
