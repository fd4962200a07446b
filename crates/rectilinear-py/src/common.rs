use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rectilinear::api::{GeometryError, OrthogonalPolygon, Outline, Point, Rectangle};

pub type PyPoint = (f64, f64);
pub type PyRect = (PyPoint, PyPoint);
pub type PyPolygon = (Vec<PyPoint>, Vec<Vec<PyPoint>>);

pub fn rect_from_py(r: PyRect) -> Rectangle {
    Rectangle::new(r.0, r.1)
}

pub fn rect_to_py(r: &Rectangle) -> PyRect {
    (r.point1().into(), r.point2().into())
}

fn points_from_py(points: Vec<PyPoint>) -> Vec<Point> {
    points.into_iter().map(Point::from).collect()
}

pub fn polygon_from_py(poly: PyPolygon) -> PyResult<OrthogonalPolygon> {
    let (points, holes) = poly;
    let holes = holes
        .into_iter()
        .map(|h| OrthogonalPolygon::new(points_from_py(h), Vec::new()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_geometry_err)?;
    OrthogonalPolygon::new(points_from_py(points), holes).map_err(map_geometry_err)
}

pub fn polygon_to_py(poly: &OrthogonalPolygon) -> PyPolygon {
    let pts = |o: &OrthogonalPolygon| -> Vec<PyPoint> {
        o.points().iter().map(|p| (*p).into()).collect()
    };
    (pts(poly), poly.holes.iter().map(pts).collect())
}

pub fn map_geometry_err(err: GeometryError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
