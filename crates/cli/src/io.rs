//! JSON shapes for geometry files.
//!
//! Rectangles: `{"p1": [x, y], "p2": [x, y]}`.
//! Polygons: `{"points": [[x, y], ...], "holes": [[[x, y], ...], ...]}`; `holes`
//! may be omitted.

use anyhow::{Context, Result};
use rectilinear::api::{GeometryResult, OrthogonalPolygon, Outline, Point, Rectangle};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectDto {
    pub p1: [f64; 2],
    pub p2: [f64; 2],
}

impl From<&Rectangle> for RectDto {
    fn from(r: &Rectangle) -> Self {
        Self {
            p1: r.point1().into(),
            p2: r.point2().into(),
        }
    }
}

impl From<&RectDto> for Rectangle {
    fn from(d: &RectDto) -> Self {
        Rectangle::new(d.p1, d.p2)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonDto {
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub holes: Vec<Vec<[f64; 2]>>,
}

fn to_points(raw: &[[f64; 2]]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

impl PolygonDto {
    pub fn to_polygon(&self) -> GeometryResult<OrthogonalPolygon> {
        let holes = self
            .holes
            .iter()
            .map(|h| OrthogonalPolygon::new(to_points(h), Vec::new()))
            .collect::<GeometryResult<Vec<_>>>()?;
        OrthogonalPolygon::new(to_points(&self.points), holes)
    }
}

impl From<&OrthogonalPolygon> for PolygonDto {
    fn from(p: &OrthogonalPolygon) -> Self {
        let raw = |o: &OrthogonalPolygon| -> Vec<[f64; 2]> {
            o.points().iter().map(|q| (*q).into()).collect()
        };
        Self {
            points: raw(p),
            holes: p.holes.iter().map(raw).collect(),
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
