//! Error taxonomy for the geometry engine.
//!
//! All failures are deterministic input-validation errors; nothing is retried
//! inside the engine. Precondition violations on internal invariants (e.g.
//! merging lines with different offsets) stay panics and are documented on the
//! functions that assert them.

use thiserror::Error;

use crate::geom2::{Line, Point, Rectangle};

/// Errors raised by geometric operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A point was passed as an endpoint of a line it does not end on.
    #[error("invalid endpoint {point} for line {line}")]
    InvalidEndpoint { point: Point, line: Line },

    /// Two points that share neither coordinate cannot form an axis-aligned line.
    #[error("points {p1} and {p2} are not axis aligned")]
    NotAxisAligned { p1: Point, p2: Point },

    /// The overlap splitter was handed rectangles with no shared interior.
    #[error("rectangles {a} and {b} do not overlap")]
    NoOverlap { a: Rectangle, b: Rectangle },

    /// Invalid/bad data given (self-intersecting boundary, too few points, ...).
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl GeometryError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidData(reason.into())
    }

    /// True for the data-validation family (`InvalidData` and `NoOverlap`).
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData(_) | Self::NoOverlap { .. })
    }
}

/// Result alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
