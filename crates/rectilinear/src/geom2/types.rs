//! Basic 2D value types shared by lines, rectangles and polygons.
//!
//! - `Point`: exact-comparison coordinate pair with tuple-like ordering.
//! - `Coord`: a totally ordered `f64` used as a map key for offset buckets.
//! - `Direction`: the four cardinal directions used by intercept sweeps.
//!
//! Coordinates are compared exactly; no epsilon is applied anywhere. Callers
//! working on an integer grid get exact results. `-0.0` is folded into `0.0`
//! so that equality, ordering and hashing agree. NaN coordinates are not
//! supported.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use nalgebra::Point2;

#[inline]
fn fold_zero(v: f64) -> f64 {
    // -0.0 + 0.0 == +0.0
    v + 0.0
}

/// A point in the plane.
///
/// Ordering is lexicographic (`x`, then `y`), matching tuple comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite coordinate");
        Self {
            x: fold_zero(x),
            y: fold_zero(y),
        }
    }

    #[inline]
    pub fn to_na(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold_zero(self.x).to_bits().hash(state);
        fold_zero(self.y).to_bits().hash(state);
    }
}

impl PartialOrd for Point {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        Coord(self.x)
            .cmp(&Coord(other.x))
            .then_with(|| Coord(self.y).cmp(&Coord(other.y)))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(f64::from(x), f64::from(y))
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point2<f64>> for Point {
    #[inline]
    fn from(p: Point2<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Totally ordered, hashable coordinate used to key offset buckets.
#[derive(Clone, Copy, Debug)]
pub struct Coord(pub f64);

impl PartialEq for Coord {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coord {}

impl Hash for Coord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold_zero(self.0).to_bits().hash(state);
    }
}

impl PartialOrd for Coord {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        fold_zero(self.0).total_cmp(&fold_zero(other.0))
    }
}

/// Cardinal direction of an intercept ray.
///
/// Declaration order matches `PRIORITY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed probing order for intercepts. Callers depend on the resulting
    /// decomposition shape, so this order is part of the contract.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Is `value` within the range spanned by `a` and `b` (in either order)?
///
/// With `inclusive == false` the bounds themselves are excluded.
#[inline]
pub fn in_range(value: f64, a: f64, b: f64, inclusive: bool) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if inclusive {
        lo <= value && value <= hi
    } else {
        lo < value && value < hi
    }
}
