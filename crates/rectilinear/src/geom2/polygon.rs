//! Polygons given as vertex sequences, and orthogonal polygons.
//!
//! The closing edge is implicit: the last vertex connects back to the first.
//! A trailing vertex equal to the first one is dropped on construction.
//!
//! `OrthogonalPolygon` additionally guarantees axis-aligned, non-degenerate
//! edges and a boundary that does not cross itself.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::line::Line;
use super::rect::Rectangle;
use super::types::Point;
use crate::error::{GeometryError, GeometryResult};

/// Interior angle of a reflex (concave) vertex in degrees.
pub const REFLEX: u32 = 270;
/// Interior angle of a convex corner in degrees.
pub const CONVEX: u32 = 90;

/// Shared vertex-sequence queries for polygon types.
pub trait Outline {
    fn points(&self) -> &[Point];

    /// Corners of the bounding box: `[(min_x, max_y), (min_x, min_y),
    /// (max_x, max_y), (max_x, min_y)]`.
    fn bounding_box_points(&self) -> [Point; 4] {
        let pts = self.points();
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in pts {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        [
            Point::new(min_x, max_y),
            Point::new(min_x, min_y),
            Point::new(max_x, max_y),
            Point::new(max_x, min_y),
        ]
    }

    /// Axis-aligned bounding box as `(top-left, bottom-right)`.
    fn bounding_box(&self) -> Rectangle {
        let corners = self.bounding_box_points();
        Rectangle::new(corners[0], corners[3])
    }

    /// Exactly four vertices, all of them bounding-box corners.
    fn is_axis_aligned_rectangle(&self) -> bool {
        let pts = self.points();
        if pts.len() != 4 {
            return false;
        }
        let corners = self.bounding_box_points();
        let mut hit = [false; 4];
        for p in pts {
            if let Some(i) = corners.iter().position(|c| c == p) {
                hit[i] = true;
            }
        }
        hit.iter().all(|h| *h)
    }

    /// Boundary edges in vertex order, ending with the closing edge.
    ///
    /// Fails for edges that are not axis aligned.
    fn try_lines(&self) -> GeometryResult<Vec<Line>> {
        let pts = self.points();
        let n = pts.len();
        (0..n)
            .map(|i| Line::try_new(pts[i], pts[(i + 1) % n]))
            .collect()
    }
}

fn normalize_points(mut points: Vec<Point>) -> GeometryResult<Vec<Point>> {
    if points.len() < 3 {
        return Err(GeometryError::invalid(format!(
            "polygon needs at least 3 points, got {}",
            points.len()
        )));
    }
    if points.first() == points.last() {
        points.pop();
    }
    Ok(points)
}

fn fmt_points(points: &[Point]) -> String {
    let inner: Vec<String> = points.iter().map(Point::to_string).collect();
    format!("[{}]", inner.join(", "))
}

/// A simple polygon with optional holes.
#[derive(Clone, Debug)]
pub struct Polygon {
    points: Vec<Point>,
    pub holes: Vec<Polygon>,
}

impl Polygon {
    pub fn new(points: Vec<Point>, holes: Vec<Polygon>) -> GeometryResult<Self> {
        Ok(Self {
            points: normalize_points(points)?,
            holes,
        })
    }
}

impl Outline for Polygon {
    #[inline]
    fn points(&self) -> &[Point] {
        &self.points
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Eq for Polygon {}

impl Hash for Polygon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.points.hash(state);
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Polygon(points={}, holes={})",
            fmt_points(&self.points),
            self.holes.len()
        )
    }
}

/// Polygon whose interior angles are all 90 or 270 degrees.
///
/// Invariants:
/// - Every edge is axis aligned and has positive length.
/// - No two non-adjacent edges touch or cross.
#[derive(Clone, Debug)]
pub struct OrthogonalPolygon {
    points: Vec<Point>,
    pub holes: Vec<OrthogonalPolygon>,
}

impl OrthogonalPolygon {
    pub fn new(points: Vec<Point>, holes: Vec<OrthogonalPolygon>) -> GeometryResult<Self> {
        let points = normalize_points(points)?;
        let n = points.len();
        for i in 0..n {
            let (a, b) = (points[i], points[(i + 1) % n]);
            if a == b {
                return Err(GeometryError::invalid(format!(
                    "zero-length edge at {a}: {}",
                    fmt_points(&points)
                )));
            }
            if a.x != b.x && a.y != b.y {
                return Err(GeometryError::invalid(format!(
                    "edge {a} -> {b} is not axis aligned: {}",
                    fmt_points(&points)
                )));
            }
        }
        let poly = Self { points, holes };
        if poly.do_sides_intersect() {
            return Err(GeometryError::invalid(format!(
                "sides intersect: {}",
                fmt_points(&poly.points)
            )));
        }
        Ok(poly)
    }

    /// Build from anything convertible to points, without holes.
    pub fn from_points<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> GeometryResult<Self> {
        Self::new(points.into_iter().map(Into::into).collect(), Vec::new())
    }

    /// Boundary edges in vertex order, ending with the closing edge.
    pub fn lines(&self) -> Vec<Line> {
        let n = self.points.len();
        (0..n)
            .map(|i| Line::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    fn do_sides_intersect(&self) -> bool {
        let (horizontals, verticals): (Vec<Line>, Vec<Line>) =
            self.lines().into_iter().partition(Line::is_horizontal);
        horizontals.iter().any(|h| {
            verticals
                .iter()
                .any(|v| h.intersects(v) && !h.is_adjacent(v))
        })
    }

    /// Interior angle (90, 180 or 270) at every vertex, in vertex order.
    pub fn get_internal_angles(&self) -> Vec<u32> {
        let n = self.points.len();
        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.points[(i + n - 1) % n];
            let b = self.points[i];
            let c = self.points[(i + 1) % n];
            let (l, r) = turn_angles(a, b, c);
            left.push(l);
            right.push(r);
        }
        // The interior angles always sum to less than the exterior ones.
        let sum_left: u32 = left.iter().sum();
        let sum_right: u32 = right.iter().sum();
        if (sum_left, &left) <= (sum_right, &right) {
            left
        } else {
            right
        }
    }

    /// Vertices whose interior angle equals `internal_angle`.
    pub fn get_points(&self, internal_angle: u32) -> Vec<Point> {
        self.points
            .iter()
            .zip(self.get_internal_angles())
            .filter(|(_, angle)| *angle == internal_angle)
            .map(|(p, _)| *p)
            .collect()
    }

    /// Ray-casting point-in-polygon test. Points on the boundary are outside.
    ///
    /// Holes are not consulted.
    pub fn is_point_inside(&self, point: Point) -> bool {
        let lines = self.lines();
        let bbox = self.bounding_box();

        if !bbox.has_point(point) {
            return false;
        }
        if lines.iter().any(|l| l.has_point(point)) {
            return false;
        }

        // Ray to the right, one unit past the bounding box so that it still
        // meets vertical sides at x == max_x.
        let ray = Line::new(point, Point::new(bbox.max_x() + 1.0, point.y));
        let mut crossings = 0usize;
        for line in lines.iter().filter(|l| l.is_vertical()) {
            let Some(hit) = ray.intersection_point(line) else {
                continue;
            };
            if hit == line.point1() || hit == line.point2() {
                // Count an endpoint hit only if the other end lies below the ray.
                let other = if hit == line.point1() {
                    line.point2()
                } else {
                    line.point1()
                };
                if other.y < point.y {
                    crossings += 1;
                }
            } else {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Enclosed area, with holes subtracted.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (p, q) = (self.points[i], self.points[(i + 1) % n]);
                p.x * q.y - q.x * p.y
            })
            .sum();
        let holes: f64 = self.holes.iter().map(OrthogonalPolygon::area).sum();
        twice.abs() / 2.0 - holes
    }
}

/// Left-turn and right-turn angle at `b` on the path `a -> b -> c`.
///
/// Relies on axis-aligned, non-degenerate edges.
fn turn_angles(a: Point, b: Point, c: Point) -> (u32, u32) {
    if (a.x == b.x && b.x == c.x) || (a.y == b.y && b.y == c.y) {
        return (180, 180);
    }
    if a.x == b.x {
        let up = b.y > a.y;
        let right = c.x > b.x;
        match (up, right) {
            (false, true) | (true, false) => (90, 270),
            (false, false) | (true, true) => (270, 90),
        }
    } else {
        let right = b.x > a.x;
        let up = c.y > b.y;
        match (right, up) {
            (true, true) | (false, false) => (90, 270),
            (true, false) | (false, true) => (270, 90),
        }
    }
}

impl Outline for OrthogonalPolygon {
    #[inline]
    fn points(&self) -> &[Point] {
        &self.points
    }
}

impl PartialEq for OrthogonalPolygon {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Eq for OrthogonalPolygon {}

impl Hash for OrthogonalPolygon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.points.hash(state);
    }
}

impl fmt::Display for OrthogonalPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let holes: Vec<String> = self.holes.iter().map(|h| h.to_string()).collect();
        write!(
            f,
            "OrthogonalPolygon(points={}, holes=[{}])",
            fmt_points(&self.points),
            holes.join(", ")
        )
    }
}
