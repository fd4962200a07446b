//! Geometry bindings (kept separate so `lib.rs` stays tiny).

use crate::common::{
    map_geometry_err, polygon_from_py, polygon_to_py, rect_from_py, rect_to_py, PyPoint,
    PyPolygon, PyRect,
};
use pyo3::prelude::*;
use rectilinear::api::{self, Point};

/// Split two overlapping rectangles; returns `(overlap, others)`.
#[pyfunction]
pub fn split_overlapping_rectangles(a: PyRect, b: PyRect) -> PyResult<(PyRect, Vec<PyRect>)> {
    let (overlap, others) =
        api::split_overlapping_rectangles(&rect_from_py(a), &rect_from_py(b))
            .map_err(map_geometry_err)?;
    Ok((rect_to_py(&overlap), others.iter().map(rect_to_py).collect()))
}

/// Merge non-overlapping rectangles into polygons with holes.
#[pyfunction]
pub fn merge_rectangles(rects: Vec<PyRect>) -> PyResult<Vec<PyPolygon>> {
    let rects: Vec<_> = rects.into_iter().map(rect_from_py).collect();
    let polys = api::merge_rectangles(&rects).map_err(map_geometry_err)?;
    Ok(polys.iter().map(polygon_to_py).collect())
}

#[pyfunction]
pub fn decompose_polygon(points: Vec<PyPoint>, holes: Vec<Vec<PyPoint>>) -> PyResult<Vec<PyRect>> {
    let poly = polygon_from_py((points, holes))?;
    Ok(api::decompose_polygon(&poly).iter().map(rect_to_py).collect())
}

/// Strict containment; points on the boundary are outside. Holes are ignored.
#[pyfunction]
pub fn is_point_inside(points: Vec<PyPoint>, point: PyPoint) -> PyResult<bool> {
    let poly = polygon_from_py((points, Vec::new()))?;
    Ok(poly.is_point_inside(Point::from(point)))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(split_overlapping_rectangles, m)?)?;
    m.add_function(wrap_pyfunction!(merge_rectangles, m)?)?;
    m.add_function(wrap_pyfunction!(decompose_polygon, m)?)?;
    m.add_function(wrap_pyfunction!(is_point_inside, m)?)?;
    Ok(())
}
