//! Fusing rectangles into orthogonal polygons.
//!
//! Purpose
//! - Inverse of `OrthogonalPolygon::split`: turn a set of rectangles (touching,
//!   overlapping along edges, or disjoint) into the outlines they form,
//!   classifying nested outlines as holes.
//!
//! Model
//! - Boundary lines of all rectangles are bucketed by offset. Within a bucket,
//!   adjacent lines are merged and overlapping lines cancel to their symmetric
//!   difference, so shared internal edges disappear.
//! - Outlines are traced from a deterministic start point, alternating
//!   horizontal and vertical lines until a point repeats.
//! - An outline contained by an odd number of other outlines is a hole of the
//!   tightest container.

use std::collections::{BTreeMap, BTreeSet};

use super::line::Line;
use super::polygon::{OrthogonalPolygon, Outline};
use super::rect::Rectangle;
use super::types::{Coord, Point};
use crate::error::{GeometryError, GeometryResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Space {
    H,
    V,
}

impl Space {
    #[inline]
    fn flip(self) -> Self {
        match self {
            Space::H => Space::V,
            Space::V => Space::H,
        }
    }
}

/// The horizontal and vertical line ending at a traced point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Corner {
    pub(crate) h: Option<Line>,
    pub(crate) v: Option<Line>,
}

impl Corner {
    #[inline]
    fn get(&self, space: Space) -> Option<Line> {
        match space {
            Space::H => self.h,
            Space::V => self.v,
        }
    }
}

fn sort_by_bounds(lines: &mut [Line]) {
    lines.sort_by(|a, b| {
        let (a1, a2) = a.bounds();
        let (b1, b2) = b.bounds();
        (Coord(a1), Coord(a2), *a).cmp(&(Coord(b1), Coord(b2), *b))
    });
}

/// Boundary lines of the rectangles being merged, bucketed by offset.
#[derive(Clone, Debug, Default)]
pub(crate) struct MergeData {
    pub(crate) horizontals: BTreeMap<Coord, Vec<Line>>,
    pub(crate) verticals: BTreeMap<Coord, Vec<Line>>,
    pub(crate) points: BTreeMap<Point, Corner>,
}

impl MergeData {
    pub(crate) fn new(rectangles: &[Rectangle]) -> Self {
        let mut data = Self::default();
        for line in rectangles.iter().flat_map(Rectangle::lines) {
            let space = if line.is_horizontal() {
                &mut data.horizontals
            } else {
                &mut data.verticals
            };
            space.entry(Coord(line.offset())).or_default().push(line);
        }
        data
    }

    /// Simplify every bucket, dropping the ones left empty.
    pub(crate) fn simplify(&mut self) {
        for space in [&mut self.horizontals, &mut self.verticals] {
            for lines in space.values_mut() {
                *lines = simplify_colinear_lines(std::mem::take(lines));
            }
            space.retain(|_, lines| !lines.is_empty());
        }
    }

    /// Map each line endpoint to its horizontal and vertical line.
    /// Later lines overwrite earlier ones at the same point.
    pub(crate) fn prepare_points(&mut self) {
        self.points.clear();
        for line in self.horizontals.values().flatten() {
            for p in line.endpoints() {
                self.points.entry(p).or_default().h = Some(*line);
            }
        }
        for line in self.verticals.values().flatten() {
            for p in line.endpoints() {
                self.points.entry(p).or_default().v = Some(*line);
            }
        }
    }

    pub(crate) fn remove_points(&mut self, points: &[Point]) {
        for p in points {
            self.points.remove(p);
        }
    }

    pub(crate) fn remove_lines(&mut self, lines: &[Line]) -> GeometryResult<()> {
        for line in lines {
            let space = if line.is_horizontal() {
                &mut self.horizontals
            } else {
                &mut self.verticals
            };
            let key = Coord(line.offset());
            let bucket = space
                .get_mut(&key)
                .ok_or_else(|| GeometryError::invalid(format!("no bucket for traced {line}")))?;
            let pos = bucket
                .iter()
                .position(|l| l == line)
                .ok_or_else(|| GeometryError::invalid(format!("traced {line} is not indexed")))?;
            bucket.remove(pos);
            if bucket.is_empty() {
                space.remove(&key);
            }
        }
        Ok(())
    }

    /// Lower endpoint of the first line (by bounds) in the leftmost vertical
    /// bucket.
    pub(crate) fn choose_start_point(&self) -> GeometryResult<Point> {
        let (_, leftmost) = self
            .verticals
            .first_key_value()
            .ok_or_else(|| GeometryError::invalid("points left without vertical lines"))?;
        let mut lines = leftmost.clone();
        sort_by_bounds(&mut lines);
        let line = lines
            .first()
            .ok_or_else(|| GeometryError::invalid("empty vertical bucket"))?;
        Ok(line.point1().min(line.point2()))
    }

    /// Walk the outline through `start`, beginning with its horizontal line.
    ///
    /// Returns the polygon and the lines consumed by the walk.
    pub(crate) fn trace_polygon(&self, start: Point) -> GeometryResult<(OrthogonalPolygon, Vec<Line>)> {
        let mut space = Space::H;
        let mut cur = start;
        let mut points = vec![start];
        let mut seen = BTreeSet::from([start]);
        let mut lines = Vec::new();
        loop {
            let line = self
                .points
                .get(&cur)
                .and_then(|c| c.get(space))
                .ok_or_else(|| {
                    GeometryError::invalid(format!("outline broken at {cur} ({space:?} line missing)"))
                })?;
            let end = line.other_endpoint(cur)?;
            lines.push(line);
            if !seen.insert(end) {
                break;
            }
            points.push(end);
            cur = end;
            space = space.flip();
        }
        tracing::trace!(%start, vertices = points.len(), "traced outline");
        let polygon = OrthogonalPolygon::new(points, Vec::new())?;
        Ok((polygon, lines))
    }

    /// Trace outlines until every point is consumed.
    pub(crate) fn trace_polygons(&mut self) -> GeometryResult<Vec<OrthogonalPolygon>> {
        let mut polygons = Vec::new();
        self.prepare_points();
        while !self.points.is_empty() {
            let start = self.choose_start_point()?;
            let (polygon, lines) = self.trace_polygon(start)?;
            self.remove_points(polygon.points());
            self.remove_lines(&lines)?;
            polygons.push(polygon);
        }
        Ok(polygons)
    }
}

/// Merge adjacent lines and cancel overlapping spans within one bucket.
///
/// A single forward pass over the lines sorted by bounds.
pub(crate) fn simplify_colinear_lines(mut lines: Vec<Line>) -> Vec<Line> {
    sort_by_bounds(&mut lines);
    let mut slots: Vec<Option<Line>> = lines.into_iter().map(Some).collect();
    for i in 0..slots.len().saturating_sub(1) {
        let (Some(cur), Some(next)) = (slots[i], slots[i + 1]) else {
            continue;
        };
        if cur.is_adjacent(&next) {
            slots[i] = None;
            slots[i + 1] = Some(cur.merge(&next));
        } else if cur.has_overlap(&next) {
            let mut rest = cur.symmetric_difference(&next).into_iter();
            let (a, b) = (rest.next(), rest.next());
            // left-pad to two slots
            (slots[i], slots[i + 1]) = match (a, b) {
                (Some(a), Some(b)) => (Some(a), Some(b)),
                (Some(a), None) => (None, Some(a)),
                _ => (None, None),
            };
        }
    }
    slots.into_iter().flatten().collect()
}

/// Attach each outline contained an odd number of times to its tightest
/// container. Returns the top-level outlines in trace order.
pub(crate) fn pair_polygons_and_holes(polygons: Vec<OrthogonalPolygon>) -> Vec<OrthogonalPolygon> {
    let n = polygons.len();
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut children = vec![0usize; n];
    for (i, outer) in polygons.iter().enumerate() {
        for (j, inner) in polygons.iter().enumerate() {
            if outer.is_point_inside(inner.points()[0]) {
                parents[j].push(i);
                children[i] += 1;
            }
        }
    }

    let mut holes: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut is_hole = vec![false; n];
    for (j, ps) in parents.iter().enumerate() {
        if ps.len() % 2 == 1 {
            if let Some(&parent) = ps.iter().min_by_key(|&&i| (children[i], i)) {
                holes[parent].push(j);
                is_hole[j] = true;
            }
        }
    }

    polygons
        .iter()
        .enumerate()
        .filter(|(i, _)| !is_hole[*i])
        .map(|(i, p)| {
            let mut top = p.clone();
            top.holes.extend(holes[i].iter().map(|&j| polygons[j].clone()));
            top
        })
        .collect()
}

/// Fuses rectangles into orthogonal polygons with holes.
#[derive(Clone, Copy, Debug, Default)]
pub struct RectangleMerger;

impl RectangleMerger {
    pub fn merge(&self, rectangles: &[Rectangle]) -> GeometryResult<Vec<OrthogonalPolygon>> {
        let mut data = MergeData::new(rectangles);
        data.simplify();
        let traced = data.trace_polygons()?;
        let outlines = traced.len();
        let polygons = pair_polygons_and_holes(traced);
        tracing::debug!(
            rectangles = rectangles.len(),
            outlines,
            polygons = polygons.len(),
            "merged rectangles"
        );
        Ok(polygons)
    }
}

/// Shorthand for `RectangleMerger.merge(rectangles)`.
pub fn merge_rectangles(rectangles: &[Rectangle]) -> GeometryResult<Vec<OrthogonalPolygon>> {
    RectangleMerger.merge(rectangles)
}
