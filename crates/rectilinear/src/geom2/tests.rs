use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn r(a: (i32, i32), b: (i32, i32)) -> Rectangle {
    Rectangle::new(a, b)
}

fn p(x: i32, y: i32) -> Point {
    Point::from((x, y))
}

/// Number of rectangles covering the centre of each unit cell in `[0, n)²`.
fn coverage(rects: &[Rectangle], n: i32) -> Vec<usize> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for i in 0..n {
        for j in 0..n {
            let c = Point::new(f64::from(i) + 0.5, f64::from(j) + 0.5);
            out.push(rects.iter().filter(|rc| rc.has_point(c)).count());
        }
    }
    out
}

#[test]
fn merge_doc_scenario() {
    let polys = RectangleMerger
        .merge(&[r((0, 0), (1, 2)), r((2, 1), (1, 2))])
        .unwrap();
    assert_eq!(polys.len(), 1);
    let expected = [p(0, 0), p(1, 0), p(1, 1), p(2, 1), p(2, 2), p(0, 2)];
    assert_eq!(polys[0].points(), &expected);
    assert!(polys[0].holes.is_empty());
    assert_eq!(
        polys[0].to_string(),
        "OrthogonalPolygon(points=[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (0, 2)], holes=[])"
    );
}

#[test]
fn angle_doc_scenarios() {
    let poly = OrthogonalPolygon::from_points([(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (0, 2)])
        .unwrap();
    assert_eq!(poly.get_internal_angles(), vec![90, 90, 270, 90, 90, 90]);
    assert_eq!(poly.get_points(270), vec![p(1, 1)]);
}

#[test]
fn overlap_splitter_rejects_disjoint_input() {
    let a = r((0, 0), (1, 1));
    assert!(split_overlapping_rectangles(&a, &r((2, 2), (3, 3))).is_err());
    let (overlap, _) = split_overlapping_rectangles(&r((0, 0), (2, 2)), &r((1, 1), (3, 3))).unwrap();
    assert_eq!(overlap, r((1, 1), (2, 2)));
}

#[test]
fn split_then_merge_restores_outline() {
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
    let rects: Vec<Rectangle> = poly.split().into_iter().collect();
    let merged = merge_rectangles(&rects).unwrap();
    assert_eq!(merged, vec![poly]);
}

#[test]
fn decompose_merged_ring() {
    let mut cells = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            if !(1..3).contains(&i) || !(1..3).contains(&j) {
                cells.push(r((i, j), (i + 1, j + 1)));
            }
        }
    }
    let merged = merge_rectangles(&cells).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].holes.len(), 1);
    let rects: Vec<Rectangle> = merged[0].split().into_iter().collect();
    assert_eq!(coverage(&rects, 4), coverage(&cells, 4));
}

/// Decomposition of `poly` tiles it: pieces are disjoint, lie inside the
/// outline and outside every hole, and their areas add up.
fn assert_tiles(poly: &OrthogonalPolygon) {
    let rects: Vec<Rectangle> = poly.split().into_iter().collect();
    for (i, a) in rects.iter().enumerate() {
        assert!(a.area() > 0.0, "{a}");
        for b in &rects[i + 1..] {
            assert!(!a.has_overlap(b), "{a} overlaps {b} in {poly}");
        }
        let c = Point::new((a.min_x() + a.max_x()) / 2.0, (a.min_y() + a.max_y()) / 2.0);
        assert!(poly.is_point_inside(c), "{a} outside {poly}");
        assert!(poly.holes.iter().all(|h| !h.is_point_inside(c)), "{a} in a hole of {poly}");
    }
    let area: f64 = rects.iter().map(Rectangle::area).sum();
    assert_eq!(area, poly.area(), "{poly}");
}

#[test]
fn generated_polygons_without_holes_decompose_exactly() {
    let cfg = super::rand::PolygonGenConfig {
        min_points: 4,
        min_holes: 0,
        max_holes: 0,
        max_rectangles: 20,
        ..super::rand::PolygonGenConfig::default()
    };
    let mut gen = super::rand::PolygonGenerator::new(cfg, 11).unwrap();
    for _ in 0..40 {
        let sample = gen.generate_next().unwrap();
        assert!(sample.polygon.holes.is_empty());
        assert_tiles(&sample.polygon);
    }
}

#[test]
fn generated_polygons_with_rectangular_holes_decompose_exactly() {
    let mut gen = super::rand::PolygonGenerator::new(Default::default(), 5).unwrap();
    let mut checked = 0;
    for _ in 0..60 {
        let sample = gen.generate_next().unwrap();
        assert!(!sample.polygon.holes.is_empty());
        if sample.polygon.holes.iter().all(|h| h.is_axis_aligned_rectangle()) {
            assert_tiles(&sample.polygon);
            checked += 1;
        }
    }
    assert!(checked > 0);
}

fn line_strategy() -> impl Strategy<Value = (i32, i32, i32, bool)> {
    // (offset, a, b, horizontal) with a != b
    (-20i32..20, -20i32..20, 1i32..20, any::<bool>()).prop_map(|(o, a, len, h)| (o, a, a + len, h))
}

fn make_line(o: i32, a: i32, b: i32, horizontal: bool) -> Line {
    if horizontal {
        Line::new((a, o), (b, o))
    } else {
        Line::new((o, a), (o, b))
    }
}

fn rect_strategy() -> impl Strategy<Value = Rectangle> {
    (0i32..10, 0i32..10, 1i32..6, 1i32..6).prop_map(|(x, y, w, h)| r((x, y), (x + w, y + h)))
}

/// A rectangle and a second one whose lower-left corner lies in the first
/// (edges included, far edges excluded), so the two always overlap.
fn overlapping_pair() -> impl Strategy<Value = (Rectangle, Rectangle)> {
    rect_strategy().prop_flat_map(|a| {
        let (x, y) = (a.min_x() as i32, a.min_y() as i32);
        let (w, h) = (a.width() as i32, a.height() as i32);
        (x..x + w, y..y + h, 1i32..6, 1i32..6)
            .prop_map(move |(bx, by, bw, bh)| (a, r((bx, by), (bx + bw, by + bh))))
    })
}

proptest! {
    /// Splitting at an interior offset and merging the halves is lossless.
    #[test]
    fn split_then_merge_is_identity((o, a, b, h) in line_strategy(), t in 0.0f64..1.0) {
        let line = make_line(o, a, b, h);
        let at = (f64::from(a) + (f64::from(b) - f64::from(a)) * t).floor() + 0.5;
        prop_assert!(at > f64::from(a) && at < f64::from(b));
        let (first, second) = line.split(at).unwrap();
        prop_assert_eq!(first.merge(&second), line);
        prop_assert_eq!(first.length() + second.length(), line.length());
        prop_assert!(first.is_adjacent(&second));
    }

    /// Reversing the endpoints does not change the value.
    #[test]
    fn endpoint_swap_is_equal((o, a, b, h) in line_strategy()) {
        let line = make_line(o, a, b, h);
        let [p1, p2] = line.endpoints();
        let swapped = Line::new(p2, p1);
        prop_assert_eq!(line, swapped);
        let set: HashSet<Line> = [line, swapped].into_iter().collect();
        prop_assert_eq!(set.len(), 1);
    }

    /// The overlap is the intersection box, and the pieces tile the union.
    #[test]
    fn overlap_pieces_tile_union((a, b) in overlapping_pair()) {
        prop_assert!(a.has_overlap(&b));
        let (overlap, others) = split_overlapping_rectangles(&a, &b).unwrap();
        let expected = Rectangle::new(
            (a.min_x().max(b.min_x()), a.min_y().max(b.min_y())),
            (a.max_x().min(b.max_x()), a.max_y().min(b.max_y())),
        );
        prop_assert_eq!(overlap, expected);
        let area: f64 = others.iter().map(Rectangle::area).sum::<f64>() + overlap.area();
        prop_assert_eq!(area, a.area() + b.area() - overlap.area());

        let mut pieces = others.clone();
        pieces.push(overlap);
        for (i, x) in pieces.iter().enumerate() {
            for y in &pieces[i + 1..] {
                prop_assert!(!x.has_overlap(y), "{} overlaps {}", x, y);
            }
        }
        let covered = coverage(&pieces, 20);
        let union = coverage(&[a, b], 20);
        prop_assert!(covered.iter().all(|c| *c <= 1));
        prop_assert!(covered.iter().zip(&union).all(|(c, u)| (*c == 1) == (*u >= 1)));
    }

    /// Two rectangles on a shared baseline merge into one outline whose
    /// decomposition covers the same cells.
    #[test]
    fn l_shape_merge_then_split(w1 in 1i32..6, h1 in 1i32..6, w2 in 1i32..6, h2 in 1i32..6) {
        let inputs = [r((0, 0), (w1, h1)), r((w1, 0), (w1 + w2, h2))];
        let merged = merge_rectangles(&inputs).unwrap();
        prop_assert_eq!(merged.len(), 1);
        let poly = &merged[0];
        prop_assert!(poly.holes.is_empty());
        prop_assert_eq!(poly.area(), f64::from(w1 * h1 + w2 * h2));

        let rects: Vec<Rectangle> = poly.split().into_iter().collect();
        let area: f64 = rects.iter().map(Rectangle::area).sum();
        prop_assert_eq!(area, poly.area());
        let covered = coverage(&rects, 12);
        prop_assert!(covered.iter().all(|c| *c <= 1));
        prop_assert_eq!(
            covered.iter().map(|c| *c == 1).collect::<Vec<_>>(),
            coverage(&inputs, 12).iter().map(|c| *c == 1).collect::<Vec<_>>()
        );
    }

    /// Boundary points are outside; cell centres agree with the input cells.
    #[test]
    fn point_in_polygon_boundary_and_parity(
        w1 in 1i32..6,
        w2 in 1i32..6,
        (h1, h2) in (2i32..6).prop_flat_map(|h1| (Just(h1), 1..h1)),
    ) {
        let poly = OrthogonalPolygon::from_points([
            (0, 0), (w1 + w2, 0), (w1 + w2, h2), (w1, h2), (w1, h1), (0, h1),
        ]).unwrap();
        for line in poly.lines() {
            let (lo, hi) = line.bounds();
            let mut v = lo;
            while v <= hi {
                let q = if line.is_horizontal() {
                    Point::new(v, line.offset())
                } else {
                    Point::new(line.offset(), v)
                };
                prop_assert!(!poly.is_point_inside(q), "{} on boundary", q);
                v += 0.5;
            }
        }
        let cells = [r((0, 0), (w1, h1)), r((w1, 0), (w1 + w2, h2))];
        for i in -1..12 {
            for j in -1..8 {
                let c = Point::new(f64::from(i) + 0.5, f64::from(j) + 0.5);
                let inside = cells.iter().any(|rc| rc.has_point(c));
                prop_assert_eq!(poly.is_point_inside(c), inside, "{}", c);
            }
        }
    }
}
