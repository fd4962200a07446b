//! Axis-aligned 2D line segments.
//!
//! A `Line` is either horizontal (`y1 == y2`) or vertical (`x1 == x2`). The
//! "offset" of a line is its fixed coordinate (y for horizontal, x for
//! vertical); its "bounds" are the sorted values of the varying coordinate.
//!
//! Equality, ordering and hashing use the canonical form `(min(p1,p2),
//! max(p1,p2))`, so a line and its reversal are the same value.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use super::types::{in_range, Point};
use crate::error::{GeometryError, GeometryResult};

/// Line segment parallel to the X or Y axis.
#[doc(alias = "AxisAligned2DLine")]
#[derive(Clone, Copy, Debug)]
pub struct Line {
    p1: Point,
    p2: Point,
}

impl Line {
    /// Build a line from two endpoints.
    ///
    /// # Panics
    /// If the endpoints share neither coordinate. Use [`Line::try_new`] for
    /// unchecked input.
    pub fn new(p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        let (p1, p2) = (p1.into(), p2.into());
        assert!(
            p1.x == p2.x || p1.y == p2.y,
            "line {p1} -> {p2} is not axis aligned"
        );
        Self { p1, p2 }
    }

    pub fn try_new(p1: impl Into<Point>, p2: impl Into<Point>) -> GeometryResult<Self> {
        let (p1, p2) = (p1.into(), p2.into());
        if p1.x == p2.x || p1.y == p2.y {
            Ok(Self { p1, p2 })
        } else {
            Err(GeometryError::NotAxisAligned { p1, p2 })
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
    pub fn endpoints(&self) -> [Point; 2] {
        [self.p1, self.p2]
    }

    /// Aligned to the X axis?
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    /// Aligned to the Y axis?
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    /// Distance from the origin along the axis this line is fixed on:
    /// y for horizontal lines, x for vertical lines.
    #[inline]
    pub fn offset(&self) -> f64 {
        if self.is_horizontal() {
            self.p1.y
        } else {
            self.p1.x
        }
    }

    /// Sorted range of the varying coordinate.
    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        let (a, b) = if self.is_horizontal() {
            (self.p1.x, self.p2.x)
        } else {
            (self.p1.y, self.p2.y)
        };
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        let (lo, hi) = self.bounds();
        hi - lo
    }

    /// Given one endpoint, return the other.
    pub fn other_endpoint(&self, endpoint: Point) -> GeometryResult<Point> {
        if endpoint == self.p1 {
            Ok(self.p2)
        } else if endpoint == self.p2 {
            Ok(self.p1)
        } else {
            Err(GeometryError::InvalidEndpoint {
                point: endpoint,
                line: *self,
            })
        }
    }

    /// Split at `offset` along the varying coordinate.
    ///
    /// Returns `None` unless `offset` lies strictly inside the bounds.
    pub fn split(&self, offset: f64) -> Option<(Line, Line)> {
        let (p1, p2) = (self.p1, self.p2);
        if self.is_horizontal() {
            if !in_range(offset, p1.x, p2.x, false) {
                return None;
            }
            let mid = Point::new(offset, p1.y);
            Some((Line { p1, p2: mid }, Line { p1: mid, p2 }))
        } else {
            if !in_range(offset, p1.y, p2.y, false) {
                return None;
            }
            let mid = Point::new(p1.x, offset);
            Some((Line { p1, p2: mid }, Line { p1: mid, p2 }))
        }
    }

    /// Line spanning the extreme endpoints of `self` and `other`.
    ///
    /// Gaps between the two lines are bridged silently; callers are expected
    /// to check adjacency or overlap first.
    ///
    /// # Panics
    /// If the lines differ in alignment or offset.
    pub fn merge(&self, other: &Line) -> Line {
        assert_colinear(self, other);
        let points = [other.p1, other.p2, self.p1, self.p2];
        let lo = points.iter().copied().min().unwrap_or(self.p1);
        let hi = points.iter().copied().max().unwrap_or(self.p2);
        Line { p1: lo, p2: hi }
    }

    /// Crossing point of two lines with different alignment (inclusive of
    /// endpoints). `None` for same-alignment pairs or disjoint lines.
    pub fn intersection_point(&self, other: &Line) -> Option<Point> {
        if other.is_horizontal() == self.is_horizontal() {
            return None;
        }
        let (sb1, sb2) = self.bounds();
        let (lb1, lb2) = other.bounds();
        let line_offset = other.offset();
        let self_offset = self.offset();

        let intersects = sb1 <= line_offset
            && line_offset <= sb2
            && lb1 <= self_offset
            && self_offset <= lb2;
        if !intersects {
            return None;
        }
        if self.is_horizontal() {
            Some(Point::new(line_offset, self_offset))
        } else {
            Some(Point::new(self_offset, line_offset))
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Line) -> bool {
        self.intersection_point(other).is_some()
    }

    /// Do two colinear lines share more than a single point?
    ///
    /// Lines with different alignment or offset never overlap.
    pub fn has_overlap(&self, other: &Line) -> bool {
        if self.is_horizontal() != other.is_horizontal() || self.offset() != other.offset() {
            return false;
        }
        let (start1, end1) = self.bounds();
        let (start2, end2) = other.bounds();

        if start1 < start2 && end1 <= start2 {
            return false;
        }
        if start1 >= end2 && end1 > end2 {
            return false;
        }
        true
    }

    /// Exactly one shared endpoint, and no overlap when colinear.
    pub fn is_adjacent(&self, other: &Line) -> bool {
        let mut points = [self.p1, self.p2, other.p1, other.p2];
        points.sort();
        let mut distinct = 1;
        for w in points.windows(2) {
            if w[0] != w[1] {
                distinct += 1;
            }
        }
        distinct == 3 && !self.has_overlap(other)
    }

    /// Parts of the two colinear lines covered by exactly one of them.
    ///
    /// Non-overlapping inputs come back unchanged. Otherwise zero, one or two
    /// new lines are returned.
    ///
    /// # Panics
    /// If the lines differ in alignment or offset.
    pub fn symmetric_difference(&self, other: &Line) -> Vec<Line> {
        assert_colinear(self, other);
        if !self.has_overlap(other) {
            return vec![*self, *other];
        }

        let (start1, end1) = self.bounds();
        let (start2, end2) = other.bounds();
        let mut spans = Vec::with_capacity(2);
        if start2 < end1 {
            if start1 != start2 {
                spans.push((start1, start2));
            }
            if end1 != end2 {
                spans.push((end1, end2));
            }
        }

        let o = self.offset();
        let horizontal = self.is_horizontal();
        spans
            .into_iter()
            .map(|(b1, b2)| {
                if horizontal {
                    Line::new((b1, o), (b2, o))
                } else {
                    Line::new((o, b1), (o, b2))
                }
            })
            .collect()
    }

    /// Does `point` lie on this line (endpoints included)?
    pub fn has_point(&self, point: Point) -> bool {
        let (b1, b2) = self.bounds();
        let offset = self.offset();
        if self.is_horizontal() {
            point.y == offset && b1 <= point.x && point.x <= b2
        } else {
            point.x == offset && b1 <= point.y && point.y <= b2
        }
    }

    /// `(left/bottom point, right/top point)`.
    #[inline]
    pub fn canonical(&self) -> (Point, Point) {
        if self.p1 <= self.p2 {
            (self.p1, self.p2)
        } else {
            (self.p2, self.p1)
        }
    }
}

#[inline]
fn assert_colinear(a: &Line, b: &Line) {
    assert!(
        a.is_horizontal() == b.is_horizontal(),
        "lines {a} and {b} differ in alignment"
    );
    assert!(
        a.offset() == b.offset(),
        "lines {a} and {b} differ in offset"
    );
}

impl Add for Line {
    type Output = Line;
    #[inline]
    fn add(self, rhs: Line) -> Self::Output {
        self.merge(&rhs)
    }
}

impl PartialEq for Line {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Line {}

impl Hash for Line {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for Line {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Line {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({}, {})", self.p1, self.p2)
    }
}
