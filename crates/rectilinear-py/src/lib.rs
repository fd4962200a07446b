//! PyO3 bindings for the `rectilinear` geometry engine.
//!
//! Notes
//! - Keep bindings thin and predictable: rectangles are `((x1, y1), (x2, y2))`,
//!   polygons are `(points, holes)` with plain `(x, y)` tuples.
//! - Geometry errors surface as `ValueError`.

use pyo3::prelude::*;

mod common;
mod geom;

#[pymodule]
fn rectilinear_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", rectilinear::VERSION)?;
    geom::register(m)?;
    Ok(())
}
