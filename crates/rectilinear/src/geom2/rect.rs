//! Axis-aligned 2D rectangles.
//!
//! Corners may be given in any order. Equality and hashing use the canonical
//! `(top-left, bottom-right)` pair, so `Rectangle::new(a, b) == Rectangle::new(b, a)`
//! and so does any other pair of opposite corners.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::line::Line;
use super::types::Point;

/// Rectangle with edges parallel to the axes.
#[doc(alias = "AxisAligned2DRectangle")]
#[derive(Clone, Copy, Debug)]
pub struct Rectangle {
    p1: Point,
    p2: Point,
}

impl Rectangle {
    pub fn new(p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self {
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    #[inline]
    pub fn point1(&self) -> Point {
        self.p1
    }

    #[inline]
    pub fn point2(&self) -> Point {
        self.p2
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.p1.x.min(self.p2.x)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.p1.x.max(self.p2.x)
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.p1.y.min(self.p2.y)
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.p1.y.max(self.p2.y)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The four sides, built from the lexicographically smaller and larger
    /// corner, in the order: side through the small corner's x, side through
    /// its y, side through the large corner's y, side through its x.
    pub fn lines(&self) -> [Line; 4] {
        let (a, b) = if self.p1 <= self.p2 {
            (self.p1, self.p2)
        } else {
            (self.p2, self.p1)
        };
        let (x1, y1, x2, y2) = (a.x, a.y, b.x, b.y);
        [
            Line::new((x1, y1), (x1, y2)),
            Line::new((x1, y1), (x2, y1)),
            Line::new((x2, y2), (x1, y2)),
            Line::new((x2, y2), (x2, y1)),
        ]
    }

    /// Do the two rectangles share a complete side?
    ///
    /// This compares side sets; partial edge contact does not count.
    pub fn is_touching(&self, other: &Rectangle) -> bool {
        let own: HashSet<Line> = self.lines().into_iter().collect();
        other.lines().iter().any(|l| own.contains(l))
    }

    /// Strict interior containment; boundary points are outside.
    pub fn has_point(&self, point: Point) -> bool {
        self.min_x() < point.x
            && point.x < self.max_x()
            && self.min_y() < point.y
            && point.y < self.max_y()
    }

    /// Positive-area overlap test. Rectangles sharing only an edge do not overlap.
    pub fn has_overlap(&self, other: &Rectangle) -> bool {
        let (a, b) = (self, other);
        if a.max_x() <= b.min_x() || a.min_x() >= b.max_x() {
            return false;
        }
        if a.max_y() <= b.min_y() || a.min_y() >= b.max_y() {
            return false;
        }
        true
    }

    /// A rectangle is its own bounding box.
    #[inline]
    pub fn bounding_box(&self) -> Rectangle {
        *self
    }

    /// `(top-left, bottom-right)`.
    #[inline]
    pub fn canonical(&self) -> (Point, Point) {
        (
            Point::new(self.min_x(), self.max_y()),
            Point::new(self.max_x(), self.min_y()),
        )
    }
}

impl PartialEq for Rectangle {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Rectangle {}

impl Hash for Rectangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for Rectangle {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rectangle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rectangle({}, {})", self.p1, self.p2)
    }
}
