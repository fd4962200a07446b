//! Exact axis-aligned geometry: lines, rectangles and orthogonal polygons.
//!
//! Three algorithms sit on top of the value types:
//! - the rectangle-overlap splitter (`geom2::split_overlapping_rectangles`),
//! - the polygon decomposition (`OrthogonalPolygon::split`),
//! - the rectangle merger (`geom2::RectangleMerger`), its inverse.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Callers in this workspace (CLI, Python bindings) should import from
//!   `api` or `prelude`; module paths may move.

pub mod api;
pub mod error;
pub mod geom2;
pub mod geom3;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeometryError, GeometryResult};
pub use nalgebra::{Point2 as NaPoint2, Point3 as NaPoint3};

/// Common geometry exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{GeometryError, GeometryResult};
    pub use crate::geom2::rand::{PolygonGenConfig, PolygonGenerator, ReplayToken};
    pub use crate::geom2::{
        merge_rectangles, split_overlapping_rectangles, Line, OrthogonalPolygon, Outline, Point,
        Rectangle,
    };
    pub use crate::geom3::{boxes_intersect, Box3, Rect3};
}
