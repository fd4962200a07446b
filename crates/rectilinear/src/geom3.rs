//! Axis-aligned boxes and flat rectangles in 3D.
//!
//! Used by layout code to test volumes (rooms, floors) for contact. Corners may
//! be given in any order; extents are recomputed on demand.

use std::fmt;

use nalgebra::Point3;

use crate::error::{GeometryError, GeometryResult};

/// Cuboid aligned to the axes.
#[doc(alias = "AxisAligned3DBox")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box3 {
    pub p1: Point3<f64>,
    pub p2: Point3<f64>,
}

impl Box3 {
    pub fn new(p1: impl Into<Point3<f64>>, p2: impl Into<Point3<f64>>) -> Self {
        Self {
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.p1.x.min(self.p2.x)
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.p1.y.min(self.p2.y)
    }

    #[inline]
    pub fn min_z(&self) -> f64 {
        self.p1.z.min(self.p2.z)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.p1.x.max(self.p2.x)
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.p1.y.max(self.p2.y)
    }

    #[inline]
    pub fn max_z(&self) -> f64 {
        self.p1.z.max(self.p2.z)
    }

    /// Componentwise minimum corner.
    #[inline]
    pub fn min_corner(&self) -> Point3<f64> {
        Point3::new(self.min_x(), self.min_y(), self.min_z())
    }

    /// Componentwise maximum corner.
    #[inline]
    pub fn max_corner(&self) -> Point3<f64> {
        Point3::new(self.max_x(), self.max_y(), self.max_z())
    }

    pub fn volume(&self) -> f64 {
        let d = self.max_corner() - self.min_corner();
        d.x * d.y * d.z
    }
}

impl fmt::Display for Box3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AxisAligned3DBox(({}, {}, {}), ({}, {}, {}))",
            self.p1.x, self.p1.y, self.p1.z, self.p2.x, self.p2.y, self.p2.z
        )
    }
}

/// A `Box3` that is flat along at least one axis.
#[doc(alias = "AxisAligned3DRectangle")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect3(Box3);

impl Rect3 {
    pub fn new(p1: impl Into<Point3<f64>>, p2: impl Into<Point3<f64>>) -> GeometryResult<Self> {
        let b = Box3::new(p1, p2);
        let (a, c) = (b.p1, b.p2);
        if a.x == c.x || a.y == c.y || a.z == c.z {
            Ok(Self(b))
        } else {
            Err(GeometryError::invalid(format!("{b} is not flat on any axis")))
        }
    }

    #[inline]
    pub fn as_box(&self) -> &Box3 {
        &self.0
    }

    /// Area of the flat face; zero when flat on two axes.
    pub fn area(&self) -> f64 {
        let d = self.0.max_corner() - self.0.min_corner();
        d.x * d.y + d.y * d.z + d.x * d.z
    }
}

impl From<Rect3> for Box3 {
    fn from(r: Rect3) -> Self {
        r.0
    }
}

impl fmt::Display for Rect3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "AxisAligned3DRectangle(({}, {}, {}), ({}, {}, {}))",
            b.p1.x, b.p1.y, b.p1.z, b.p2.x, b.p2.y, b.p2.z
        )
    }
}

/// Do two boxes share any point? Touching faces, edges or corners count.
pub fn boxes_intersect(a: &Box3, b: &Box3) -> bool {
    if a.max_x() < b.min_x() || a.min_x() > b.max_x() {
        return false;
    }
    if a.max_y() < b.min_y() || a.min_y() > b.max_y() {
        return false;
    }
    if a.max_z() < b.min_z() || a.min_z() > b.max_z() {
        return false;
    }
    true
}
