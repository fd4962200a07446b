//! Splitting two overlapping rectangles along each other's boundaries.
//!
//! Each rectangle is cut into a grid by the other rectangle's corner
//! coordinates that fall strictly inside it. Both grids contain the overlap as
//! an identical cell, which the set intersection recovers. Every other cell of
//! either grid lies entirely outside the other rectangle.

use std::collections::BTreeSet;

use super::rect::Rectangle;
use super::types::{in_range, Coord, Point};
use crate::error::{GeometryError, GeometryResult};

/// Grid of sub-rectangles of `rect`, cut by the coordinates of `by` that lie
/// strictly inside `rect`.
pub fn split_rectangle(rect: &Rectangle, by: &Rectangle) -> BTreeSet<Rectangle> {
    let (c1, c2) = (by.point1(), by.point2());

    let mut xs = vec![rect.point1().x, rect.point2().x];
    for x in [c1.x, c2.x] {
        if in_range(x, rect.min_x(), rect.max_x(), false) {
            xs.push(x);
        }
    }
    let mut ys = vec![rect.point1().y, rect.point2().y];
    for y in [c1.y, c2.y] {
        if in_range(y, rect.min_y(), rect.max_y(), false) {
            ys.push(y);
        }
    }
    xs.sort_by_key(|&v| Coord(v));
    ys.sort_by_key(|&v| Coord(v));
    ys.reverse();

    let mut cells = BTreeSet::new();
    for xw in xs.windows(2) {
        for yw in ys.windows(2) {
            cells.insert(Rectangle::new(
                Point::new(xw[0], yw[0]),
                Point::new(xw[1], yw[1]),
            ));
        }
    }
    cells
}

/// Split two overlapping rectangles into their shared cell and the leftover
/// pieces of both.
///
/// Returns `(overlap, others)` where `others` holds the non-overlapping cells
/// of both grids, sorted by canonical form. The pieces are disjoint and,
/// together with `overlap`, tile the union of the inputs.
pub fn split_overlapping_rectangles(
    a: &Rectangle,
    b: &Rectangle,
) -> GeometryResult<(Rectangle, Vec<Rectangle>)> {
    let a_splits = split_rectangle(a, b);
    let b_splits = split_rectangle(b, a);

    let overlap = a_splits
        .intersection(&b_splits)
        .next()
        .copied()
        .ok_or(GeometryError::NoOverlap { a: *a, b: *b })?;

    let others = a_splits
        .union(&b_splits)
        .filter(|r| **r != overlap)
        .copied()
        .collect();
    Ok((overlap, others))
}
