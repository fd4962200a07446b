//! Decomposition of orthogonal polygons into rectangles.
//!
//! Model
//! - Every reflex (270°) vertex of the outer boundary, and every convex (90°)
//!   corner of a hole, shoots one intercept line towards the nearest boundary
//!   line in the first free direction (`Direction::PRIORITY`). The hit line is
//!   split at the intercept, and colinear lines meeting the intercept are
//!   merged with it so that longer rectangle sides exist too.
//! - Rectangles are then read off the line graph: at each point (in sorted
//!   order) a horizontal and a vertical line closing a rectangle with two
//!   further lines yield that rectangle; the point's lines are retired after.
//! - Rectangles overlapping a hole's bounding box are dropped. Holes are
//!   expected to be rectangles.
//!
//! Index
//! - `xvalues[x]`: horizontal lines whose x-range contains `x`.
//! - `yvalues[y]`: vertical lines whose y-range contains `y`.
//! - Keys are fixed at construction (vertex coordinates); adding a line never
//!   creates new keys.

use std::collections::{BTreeMap, BTreeSet};

use super::line::Line;
use super::polygon::{OrthogonalPolygon, Outline, CONVEX, REFLEX};
use super::rect::Rectangle;
use super::types::{Coord, Direction, Point};

#[inline]
fn far_end(line: &Line, from: Point) -> Point {
    if line.point1() == from {
        line.point2()
    } else {
        line.point1()
    }
}

/// Line graph of a polygon being cut into rectangles.
#[derive(Clone, Debug, Default)]
pub(crate) struct SplitData {
    pub(crate) xvalues: BTreeMap<Coord, BTreeSet<Line>>,
    pub(crate) yvalues: BTreeMap<Coord, BTreeSet<Line>>,
    pub(crate) points: BTreeMap<Point, BTreeSet<Line>>,
    pub(crate) hole_intercept_points: Vec<Point>,
}

impl SplitData {
    pub(crate) fn new(polygon: &OrthogonalPolygon) -> Self {
        let mut data = Self::default();
        for p in polygon.points() {
            data.xvalues.entry(Coord(p.x)).or_default();
            data.yvalues.entry(Coord(p.y)).or_default();
        }
        let mut lines = polygon.lines();
        for hole in &polygon.holes {
            for p in hole.get_points(CONVEX) {
                data.xvalues.entry(Coord(p.x)).or_default();
                data.yvalues.entry(Coord(p.y)).or_default();
                data.hole_intercept_points.push(p);
            }
            lines.extend(hole.lines());
        }
        for line in lines {
            data.add_line(line);
        }
        data
    }

    pub(crate) fn add_line(&mut self, line: Line) {
        for p in line.endpoints() {
            self.points.entry(p).or_default().insert(line);
        }
        let (lo, hi) = line.bounds();
        let index = if line.is_vertical() {
            &mut self.yvalues
        } else {
            &mut self.xvalues
        };
        for (_, lines) in index.range_mut(Coord(lo)..=Coord(hi)) {
            lines.insert(line);
        }
    }

    pub(crate) fn remove_line(&mut self, line: &Line) {
        for p in line.endpoints() {
            if let Some(lines) = self.points.get_mut(&p) {
                lines.remove(line);
                if lines.is_empty() {
                    self.points.remove(&p);
                }
            }
        }
        let (lo, hi) = line.bounds();
        let index = if line.is_vertical() {
            &mut self.yvalues
        } else {
            &mut self.xvalues
        };
        for (_, lines) in index.range_mut(Coord(lo)..=Coord(hi)) {
            lines.remove(line);
        }
    }

    /// Replace `line` by its two halves. No-op unless `offset` is interior.
    pub(crate) fn split_line(&mut self, line: Line, offset: f64) {
        let Some((a, b)) = line.split(offset) else {
            return;
        };
        self.add_line(a);
        self.add_line(b);
        self.remove_line(&line);
    }

    pub(crate) fn line_with_endpoints(&self, a: Point, b: Point) -> Option<Line> {
        let (la, lb) = (self.points.get(&a)?, self.points.get(&b)?);
        la.intersection(lb).next().copied()
    }

    fn lines_at(&self, point: Point) -> Vec<Line> {
        self.points
            .get(&point)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Directions already taken by a boundary or intercept line at `point`.
    pub(crate) fn avoidable_directions(&self, point: Point) -> BTreeSet<Direction> {
        let mut taken = BTreeSet::new();
        for line in self.lines_at(point) {
            let other = far_end(&line, point);
            let dir = if line.is_horizontal() {
                if point.x > other.x {
                    Direction::Left
                } else {
                    Direction::Right
                }
            } else if point.y > other.y {
                Direction::Down
            } else {
                Direction::Up
            };
            taken.insert(dir);
        }
        taken
    }

    /// Nearest line crossed by a ray from `point` in `direction`.
    ///
    /// Returns the fixed coordinate of the ray (the split offset for the hit
    /// line) and the line. Ties go to the smaller line.
    pub(crate) fn line_intercept(&self, point: Point, direction: Direction) -> Option<(f64, Line)> {
        let (intercept, space, from) = match direction {
            Direction::Left | Direction::Right => (point.y, &self.yvalues, point.x),
            Direction::Up | Direction::Down => (point.x, &self.xvalues, point.y),
        };
        let ahead = |offset: f64| match direction {
            Direction::Right | Direction::Up => offset > from,
            Direction::Left | Direction::Down => offset < from,
        };
        space
            .get(&Coord(intercept))?
            .iter()
            .filter(|l| ahead(l.offset()))
            .min_by_key(|l| (Coord((from - l.offset()).abs()), **l))
            .map(|l| (intercept, *l))
    }

    /// Shoot an intercept line from `point`, recording it in the graph.
    pub(crate) fn intercept(&mut self, point: Point) -> Option<Line> {
        let taken = self.avoidable_directions(point);
        for direction in Direction::PRIORITY {
            if taken.contains(&direction) {
                continue;
            }
            let Some((intercept, target)) = self.line_intercept(point, direction) else {
                continue;
            };
            let end = if direction.is_horizontal() {
                Point::new(target.offset(), point.y)
            } else {
                Point::new(point.x, target.offset())
            };
            return Some(self.use_intercept_line(point, end, target, intercept));
        }
        None
    }

    fn use_intercept_line(&mut self, start: Point, end: Point, target: Line, intercept: f64) -> Line {
        self.split_line(target, intercept);
        let line = Line::new(start, end);
        self.add_line(line);
        for ext in self.extension_lines(&line) {
            self.add_line(ext);
        }
        tracing::trace!(%line, %target, "intercept");
        line
    }

    /// Lines at `point` with the same alignment as `line` and no overlap with it.
    fn adjacent_colinear_lines(&self, line: &Line, point: Point) -> Vec<Line> {
        self.lines_at(point)
            .into_iter()
            .filter(|l| l.is_horizontal() == line.is_horizontal() && !line.has_overlap(l))
            .collect()
    }

    /// `line` merged with its colinear neighbours on either end, in every
    /// combination.
    pub(crate) fn extension_lines(&self, line: &Line) -> Vec<Line> {
        let opposite: Vec<Line> = self
            .adjacent_colinear_lines(line, line.point1())
            .into_iter()
            .map(|o| o + *line)
            .collect();
        let forward = self.adjacent_colinear_lines(line, line.point2());

        let mut out = opposite.clone();
        out.extend(forward.iter().map(|f| *f + *line));
        for o in &opposite {
            for f in &forward {
                out.push(*o + *f);
            }
        }
        out
    }

    /// Rectangles having `point` as a corner, closed by lines in the graph.
    pub(crate) fn rectangles_around_point(&self, point: Point) -> Vec<Rectangle> {
        let mut horizontals = BTreeMap::new();
        let mut verticals = BTreeMap::new();
        for line in self.lines_at(point) {
            let end = far_end(&line, point);
            if line.is_horizontal() {
                horizontals.insert(end, line);
            } else {
                verticals.insert(end, line);
            }
        }

        let mut out = Vec::new();
        for h_end in horizontals.keys() {
            for v_end in verticals.keys() {
                // diagonal from `point` to `common`
                let common = Point::new(h_end.x, v_end.y);
                let top = self.line_with_endpoints(*v_end, common);
                let side = self.line_with_endpoints(*h_end, common);
                if top.is_some() && side.is_some() {
                    out.push(Rectangle::new(point.min(common), point.max(common)));
                }
            }
        }
        out
    }

    /// Read off all rectangles, retiring each point's lines once visited.
    pub(crate) fn take_rectangles(&mut self) -> BTreeSet<Rectangle> {
        let mut rectangles = BTreeSet::new();
        let snapshot: Vec<Point> = self.points.keys().copied().collect();
        for point in snapshot {
            rectangles.extend(self.rectangles_around_point(point));
            for line in self.lines_at(point) {
                self.remove_line(&line);
            }
        }
        rectangles
    }
}

impl OrthogonalPolygon {
    /// Cut this polygon into non-overlapping rectangles covering its area
    /// (minus holes).
    ///
    /// Vertices must be pairwise distinct, and holes must be rectangles.
    pub fn split(&self) -> BTreeSet<Rectangle> {
        let mut rectangles = self.candidate_rectangles();
        let hole_boxes: Vec<Rectangle> = self.holes.iter().map(|h| h.bounding_box()).collect();
        rectangles.retain(|r| !hole_boxes.iter().any(|h| r.has_overlap(h)));

        tracing::debug!(
            vertices = self.points().len(),
            holes = self.holes.len(),
            rectangles = rectangles.len(),
            "split polygon"
        );
        rectangles
    }

    /// Every rectangle closed by the intercept graph, including the ones
    /// covering (part of) a hole.
    pub(crate) fn candidate_rectangles(&self) -> BTreeSet<Rectangle> {
        let mut data = SplitData::new(self);

        let mut intercept_points = self.get_points(REFLEX);
        intercept_points.extend(data.hole_intercept_points.iter().copied());

        let mut ignore = BTreeSet::new();
        for point in intercept_points {
            if ignore.contains(&point) {
                continue;
            }
            if let Some(line) = data.intercept(point) {
                ignore.insert(far_end(&line, point));
            }
        }

        data.take_rectangles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(a: (i32, i32), b: (i32, i32)) -> Line {
        Line::new(a, b)
    }

    fn r(a: (i32, i32), b: (i32, i32)) -> Rectangle {
        Rectangle::new(a, b)
    }

    fn p(x: i32, y: i32) -> Point {
        Point::from((x, y))
    }

    fn l_shape() -> OrthogonalPolygon {
        OrthogonalPolygon::from_points([(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (0, 2)]).unwrap()
    }

    fn set<T: Ord>(items: impl IntoIterator<Item = T>) -> BTreeSet<T> {
        items.into_iter().collect()
    }

    #[test]
    fn index_covers_vertex_coordinates() {
        let data = SplitData::new(&l_shape());
        assert_eq!(data.xvalues.len(), 3);
        assert_eq!(data.xvalues[&Coord(0.0)], set([l((0, 0), (1, 0)), l((2, 2), (0, 2))]));
        assert_eq!(
            data.xvalues[&Coord(1.0)],
            set([l((0, 0), (1, 0)), l((1, 1), (2, 1)), l((2, 2), (0, 2))])
        );
        assert_eq!(data.yvalues[&Coord(2.0)], set([l((2, 1), (2, 2)), l((0, 2), (0, 0))]));
        assert_eq!(data.points.len(), 6);
        assert_eq!(data.points[&p(1, 1)], set([l((1, 1), (2, 1)), l((1, 0), (1, 1))]));
    }

    #[test]
    fn add_and_remove_lines() {
        let mut data = SplitData::new(&l_shape());
        data.add_line(l((0, 0), (10, 0)));
        assert!(data.xvalues[&Coord(0.0)].contains(&l((0, 0), (10, 0))));
        assert!(data.xvalues[&Coord(2.0)].contains(&l((0, 0), (10, 0))));
        // no new keys
        assert!(!data.xvalues.contains_key(&Coord(10.0)));

        data.remove_line(&l((0, 0), (1, 0)));
        assert!(!data.xvalues[&Coord(0.0)].contains(&l((0, 0), (1, 0))));
        assert!(data.points.contains_key(&p(1, 0)));
        data.remove_line(&l((1, 0), (1, 1)));
        assert!(!data.points.contains_key(&p(1, 0)));
        assert_eq!(data.yvalues[&Coord(0.0)], set([l((0, 2), (0, 0))]));
    }

    #[test]
    fn split_line_replaces_with_halves() {
        let mut data = SplitData::new(&l_shape());
        data.split_line(l((2, 2), (0, 2)), 1.0);
        assert_eq!(data.xvalues[&Coord(0.0)], set([l((0, 0), (1, 0)), l((1, 2), (0, 2))]));
        assert_eq!(data.line_with_endpoints(p(1, 2), p(2, 2)), Some(l((2, 2), (1, 2))));
        assert_eq!(data.line_with_endpoints(p(0, 2), p(2, 2)), None);
        // boundary offsets leave the line intact
        data.split_line(l((0, 0), (1, 0)), 1.0);
        assert_eq!(data.line_with_endpoints(p(0, 0), p(1, 0)), Some(l((0, 0), (1, 0))));
    }

    #[test]
    fn directions_and_intercepts() {
        let data = SplitData::new(&l_shape());
        assert_eq!(
            data.avoidable_directions(p(0, 0)),
            set([Direction::Right, Direction::Up])
        );
        assert_eq!(data.line_intercept(p(0, 0), Direction::Left), None);
        assert_eq!(
            data.line_intercept(p(0, 0), Direction::Up),
            Some((0.0, l((2, 2), (0, 2))))
        );
        assert_eq!(
            data.line_intercept(p(1, 1), Direction::Up),
            Some((1.0, l((2, 2), (0, 2))))
        );
    }

    #[test]
    fn intercept_adds_line_and_extension() {
        let mut data = SplitData::new(&l_shape());
        assert!(data.rectangles_around_point(p(1, 1)).is_empty());
        let line = data.intercept(p(1, 1)).unwrap();
        assert_eq!(line, l((1, 1), (1, 2)));
        assert!(data.points[&p(1, 2)].contains(&l((1, 0), (1, 2))));
        assert_eq!(data.rectangles_around_point(p(1, 1)), vec![r((1, 1), (2, 2))]);
        assert_eq!(data.take_rectangles(), set([r((0, 0), (1, 2)), r((1, 2), (2, 1))]));
    }

    #[test]
    fn no_rectangles_without_intercepts() {
        let mut data = SplitData::new(&l_shape());
        assert!(data.take_rectangles().is_empty());
    }

    #[test]
    fn split_single_rectangle() {
        let poly = OrthogonalPolygon::from_points([(0, 0), (3, 0), (3, 2), (0, 2)]).unwrap();
        assert_eq!(poly.split(), set([r((0, 0), (3, 2))]));
    }

    #[test]
    fn split_l_shape() {
        assert_eq!(l_shape().split(), set([r((0, 0), (1, 2)), r((1, 1), (2, 2))]));
    }

    #[test]
    fn split_u_shape() {
        let poly = OrthogonalPolygon::from_points([
            (0, 0),
            (3, 0),
            (3, 2),
            (2, 2),
            (2, 1),
            (1, 1),
            (1, 2),
            (0, 2),
        ])
        .unwrap();
        assert_eq!(
            poly.split(),
            set([r((0, 0), (1, 2)), r((1, 0), (2, 1)), r((2, 0), (3, 2))])
        );
    }

    #[test]
    fn split_square_with_hole() {
        let hole = OrthogonalPolygon::from_points([(1, 1), (3, 1), (3, 3), (1, 3)]).unwrap();
        let poly = OrthogonalPolygon::new(
            [(0, 0), (4, 0), (4, 4), (0, 4)].into_iter().map(Point::from).collect(),
            vec![hole],
        )
        .unwrap();
        let rects = poly.split();
        assert_eq!(
            rects,
            set([r((0, 0), (1, 4)), r((1, 0), (3, 1)), r((1, 3), (3, 4)), r((3, 0), (4, 4))])
        );
        let area: f64 = rects.iter().map(Rectangle::area).sum();
        assert_eq!(area, poly.area());
    }

    #[test]
    fn rectangles_spanning_a_hole_are_dropped() {
        let hole = OrthogonalPolygon::from_points([(1, 1), (2, 1), (2, 2), (1, 2)]).unwrap();
        let poly = OrthogonalPolygon::new(
            [(0, 0), (4, 0), (4, 2), (2, 2), (2, 4), (0, 4)]
                .into_iter()
                .map(Point::from)
                .collect(),
            vec![hole],
        )
        .unwrap();
        let spanning = r((1, 0), (2, 2));
        assert!(poly.candidate_rectangles().contains(&spanning));

        let rects = poly.split();
        assert!(!rects.contains(&spanning));
        assert_eq!(
            rects,
            set([r((0, 0), (1, 4)), r((1, 0), (2, 1)), r((1, 2), (2, 4)), r((2, 0), (4, 2))])
        );
        let area: f64 = rects.iter().map(Rectangle::area).sum();
        assert_eq!(area, poly.area());
        assert_eq!(area, 11.0);
    }
}
