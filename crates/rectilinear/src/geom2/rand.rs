//! Random orthogonal polygons built from scattered rectangles.
//!
//! Purpose
//! - Produce reproducible polygon streams (with holes) for property tests,
//!   benchmarks and the `sample` command.
//!
//! Model
//! - Drop `n` integer rectangles into `[0, max_offset]²`. Each new rectangle
//!   is cut by the overlap splitter against whatever it overlaps; overlap
//!   cells are discarded and the remaining pieces are re-inserted by the same
//!   rule. The resulting non-overlapping "space" is merged into polygons, and
//!   polygons whose vertex and hole counts fall in range are emitted.
//! - A draw whose merge fails with invalid data, or that yields no polygon in
//!   range, is a failed attempt. `max_attempts` consecutive failures end the
//!   stream with `GeneratorError::AttemptsExhausted`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG;
//!   one token is one draw.
//!
//! Code cross-refs: `RectangleMerger`, `split_overlapping_rectangles`

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::merge::RectangleMerger;
use super::overlap::split_overlapping_rectangles;
use super::overlap::split_rectangle;
use super::polygon::{OrthogonalPolygon, Outline};
use super::rect::Rectangle;
use crate::error::{GeometryError, GeometryResult};

/// Uniform choices, as used by layout generators.
///
/// Implemented for every `rand::Rng`.
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
    fn pick_int(&mut self, lo: i64, hi: i64) -> i64;

    /// Uniform element of `choices`, `None` when empty.
    fn pick<'a, T>(&mut self, choices: &'a [T]) -> Option<&'a T>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn pick_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            lo
        } else {
            self.gen_range(lo..=hi)
        }
    }

    #[inline]
    fn pick<'a, T>(&mut self, choices: &'a [T]) -> Option<&'a T> {
        choices.choose(self)
    }
}

/// Errors raised by the polygon generator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("invalid generator params: {reason}")]
    InvalidParams { reason: String },

    #[error("no polygon in range after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    /// Geometry failures other than invalid data, which only fails the attempt.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Generator configuration. All ranges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolygonGenConfig {
    /// Rectangle origins are drawn from `[0, max_offset]` on both axes.
    pub max_offset: u32,
    pub min_side: u32,
    pub max_side: u32,
    pub min_rectangles: u32,
    pub max_rectangles: u32,
    pub min_points: u32,
    pub max_points: u32,
    pub min_holes: u32,
    pub max_holes: u32,
    /// Consecutive failed draws before giving up.
    pub max_attempts: u32,
}

impl Default for PolygonGenConfig {
    fn default() -> Self {
        Self {
            max_offset: 50,
            min_side: 1,
            max_side: 5,
            min_rectangles: 3,
            max_rectangles: 50,
            min_points: 6,
            max_points: 100,
            min_holes: 1,
            max_holes: 10,
            max_attempts: 256,
        }
    }
}

impl PolygonGenConfig {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.min_side == 0 {
            return Err(GeneratorError::invalid("min_side must be > 0"));
        }
        let ranges = [
            ("side", self.min_side, self.max_side),
            ("rectangles", self.min_rectangles, self.max_rectangles),
            ("points", self.min_points, self.max_points),
            ("holes", self.min_holes, self.max_holes),
        ];
        for (name, lo, hi) in ranges {
            if lo > hi {
                return Err(GeneratorError::invalid(format!(
                    "min_{name} <= max_{name} required ({lo} > {hi})"
                )));
            }
        }
        if self.min_rectangles == 0 {
            return Err(GeneratorError::invalid("min_rectangles must be > 0"));
        }
        if self.max_points < 4 {
            return Err(GeneratorError::invalid("max_points must be >= 4"));
        }
        if self.max_attempts == 0 {
            return Err(GeneratorError::invalid("max_attempts must be > 0"));
        }
        Ok(())
    }

    #[inline]
    fn accepts(&self, polygon: &OrthogonalPolygon) -> bool {
        let points = polygon.points().len();
        let holes = polygon.holes.len();
        (self.min_points as usize..=self.max_points as usize).contains(&points)
            && (self.min_holes as usize..=self.max_holes as usize).contains(&holes)
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

/// Weyl increment of SplitMix64.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 output function: a bijective avalanche on `u64`.
#[inline]
fn splitmix64(z: u64) -> u64 {
    let z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl ReplayToken {
    /// RNG seed for this draw. Neighbouring indices under one seed land far
    /// apart.
    pub fn rng_seed(self) -> u64 {
        splitmix64(self.seed ^ splitmix64(self.index.wrapping_add(GOLDEN_GAMMA)))
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        StdRng::seed_from_u64(self.rng_seed())
    }
}

/// Locates a sample: the draw, and the position among that draw's accepted
/// polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PolygonReplay {
    pub token: ReplayToken,
    pub position: usize,
}

/// A generated polygon plus replay metadata.
#[derive(Clone, Debug)]
pub struct PolygonSample {
    pub polygon: OrthogonalPolygon,
    pub params: PolygonGenConfig,
    pub replay: PolygonReplay,
}

/// Integer rectangle with origin in `[0, max_offset]²` and sides in
/// `[min_side, max_side]`.
pub fn random_rectangle<S: RandomSource + ?Sized>(cfg: &PolygonGenConfig, src: &mut S) -> Rectangle {
    let x = src.pick_int(0, i64::from(cfg.max_offset));
    let y = src.pick_int(0, i64::from(cfg.max_offset));
    let w = src.pick_int(i64::from(cfg.min_side), i64::from(cfg.max_side));
    let h = src.pick_int(i64::from(cfg.min_side), i64::from(cfg.max_side));
    // integers well below 2^53, exact in f64
    let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
    Rectangle::new((x, y), (x + w, y + h))
}

/// Insert `rect` into a set of pairwise non-overlapping rectangles.
///
/// Overlapping parts are dropped; the rest of `rect` is added as pieces.
pub fn add_rectangle(rect: Rectangle, space: &mut Vec<Rectangle>) -> GeometryResult<()> {
    let mut splits = vec![rect];
    let mut i = 0;
    while i < splits.len() {
        let s = splits[i];
        i += 1;
        let mut pieces = Vec::new();
        let mut overlapped = false;
        for r in space.iter() {
            if !s.has_overlap(r) {
                continue;
            }
            overlapped = true;
            let (overlap, _) = split_overlapping_rectangles(&s, r)?;
            pieces.extend(split_rectangle(&s, r).into_iter().filter(|p| *p != overlap));
        }
        if !overlapped {
            space.push(s);
        }
        splits.extend(pieces);
    }
    Ok(())
}

fn draw_space(cfg: &PolygonGenConfig, src: &mut impl RandomSource) -> GeometryResult<Vec<Rectangle>> {
    let n = src.pick_int(i64::from(cfg.min_rectangles), i64::from(cfg.max_rectangles));
    let rectangles: Vec<Rectangle> = (0..n).map(|_| random_rectangle(cfg, src)).collect();
    let mut space = Vec::with_capacity(rectangles.len());
    for rect in rectangles {
        add_rectangle(rect, &mut space)?;
    }
    Ok(space)
}

/// One draw: rectangles for `token`, merged and filtered by `cfg`.
///
/// `Ok(vec![])` when nothing is in range; `Err` only for invalid data in the
/// merge or a geometry failure.
pub fn draw_polygons(cfg: &PolygonGenConfig, token: ReplayToken) -> GeometryResult<Vec<OrthogonalPolygon>> {
    let mut rng = token.to_std_rng();
    let space = draw_space(cfg, &mut rng)?;
    let polygons = RectangleMerger.merge(&space)?;
    Ok(polygons.into_iter().filter(|p| cfg.accepts(p)).collect())
}

/// Endless, reproducible stream of polygons.
pub struct PolygonGenerator {
    params: PolygonGenConfig,
    seed: u64,
    next_index: u64,
    pending: VecDeque<PolygonSample>,
}

impl PolygonGenerator {
    pub fn new(params: PolygonGenConfig, seed: u64) -> Result<Self, GeneratorError> {
        params.validate()?;
        Ok(Self {
            params,
            seed,
            next_index: 0,
            pending: VecDeque::new(),
        })
    }

    #[inline]
    pub fn params(&self) -> &PolygonGenConfig {
        &self.params
    }

    pub fn generate_next(&mut self) -> Result<PolygonSample, GeneratorError> {
        if let Some(sample) = self.pending.pop_front() {
            return Ok(sample);
        }
        for attempt in 0..self.params.max_attempts {
            let token = ReplayToken {
                seed: self.seed,
                index: self.next_index,
            };
            self.next_index = self.next_index.wrapping_add(1);
            let polygons = match draw_polygons(&self.params, token) {
                Ok(polygons) => polygons,
                Err(err) if err.is_invalid_data() => {
                    tracing::debug!(attempt, index = token.index, %err, "draw rejected");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if polygons.is_empty() {
                tracing::debug!(attempt, index = token.index, "no polygon in range");
                continue;
            }
            self.pending
                .extend(polygons.into_iter().enumerate().map(|(position, polygon)| PolygonSample {
                    polygon,
                    params: self.params,
                    replay: PolygonReplay { token, position },
                }));
            if let Some(sample) = self.pending.pop_front() {
                return Ok(sample);
            }
        }
        Err(GeneratorError::AttemptsExhausted {
            attempts: self.params.max_attempts,
        })
    }

    pub fn regenerate(&self, replay: &PolygonReplay) -> Result<OrthogonalPolygon, GeneratorError> {
        let polygons = draw_polygons(&self.params, replay.token)?;
        polygons.into_iter().nth(replay.position).ok_or_else(|| {
            GeneratorError::invalid(format!(
                "replay position {} out of range for index {}",
                replay.position, replay.token.index
            ))
        })
    }
}

impl Iterator for PolygonGenerator {
    type Item = Result<PolygonSample, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate_next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(a: (i32, i32), b: (i32, i32)) -> Rectangle {
        Rectangle::new(a, b)
    }

    fn loose() -> PolygonGenConfig {
        PolygonGenConfig {
            min_points: 4,
            min_holes: 0,
            max_rectangles: 20,
            ..PolygonGenConfig::default()
        }
    }

    #[test]
    fn pick_int_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = rng.pick_int(-3, 4);
            assert!((-3..=4).contains(&v));
        }
        assert_eq!(rng.pick_int(5, 5), 5);
        assert_eq!(rng.pick_int(5, 2), 5);
        let choices = ["a", "b", "c"];
        assert!(choices.contains(rng.pick(&choices).unwrap()));
        assert!(rng.pick::<u8>(&[]).is_none());
    }

    #[test]
    fn replay_seeds_are_stable_and_distinct() {
        let tok = |index| ReplayToken { seed: 3, index };
        assert_eq!(tok(0).rng_seed(), tok(0).rng_seed());
        let seeds: std::collections::HashSet<u64> = (0..64).map(|i| tok(i).rng_seed()).collect();
        assert_eq!(seeds.len(), 64);
        assert_ne!(tok(1).rng_seed(), ReplayToken { seed: 4, index: 1 }.rng_seed());
        assert_eq!(splitmix64(0), 0);
    }

    #[test]
    fn random_rectangle_respects_config() {
        let cfg = PolygonGenConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let rect = random_rectangle(&cfg, &mut rng);
            assert!(rect.min_x() >= 0.0 && rect.min_x() <= 50.0);
            assert!(rect.min_y() >= 0.0 && rect.min_y() <= 50.0);
            assert!((1.0..=5.0).contains(&rect.width()));
            assert!((1.0..=5.0).contains(&rect.height()));
        }
    }

    #[test]
    fn add_contained_rectangle_is_absorbed() {
        let mut space = Vec::new();
        add_rectangle(r((0, 0), (2, 2)), &mut space).unwrap();
        add_rectangle(r((2, 1), (1, 2)), &mut space).unwrap();
        assert_eq!(space, vec![r((0, 0), (2, 2))]);
    }

    #[test]
    fn add_containing_rectangle_keeps_remainder() {
        let mut space = Vec::new();
        add_rectangle(r((2, 1), (1, 2)), &mut space).unwrap();
        add_rectangle(r((0, 0), (2, 2)), &mut space).unwrap();
        space.sort();
        assert_eq!(
            space,
            vec![r((0, 1), (1, 0)), r((0, 2), (1, 1)), r((1, 1), (2, 0)), r((2, 1), (1, 2))]
        );
    }

    #[test]
    fn space_stays_disjoint() {
        let cfg = PolygonGenConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let space = draw_space(&cfg, &mut rng).unwrap();
        for (i, a) in space.iter().enumerate() {
            for b in &space[i + 1..] {
                assert!(!a.has_overlap(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let bad = PolygonGenConfig {
            min_points: 10,
            max_points: 8,
            ..PolygonGenConfig::default()
        };
        assert!(matches!(bad.validate(), Err(GeneratorError::InvalidParams { .. })));
        let bad = PolygonGenConfig {
            max_attempts: 0,
            ..PolygonGenConfig::default()
        };
        assert!(PolygonGenerator::new(bad, 0).is_err());
        assert!(PolygonGenConfig::default().validate().is_ok());
    }

    #[test]
    fn samples_are_in_range_and_replayable() {
        let cfg = loose();
        let mut gen = PolygonGenerator::new(cfg, 2024).unwrap();
        for _ in 0..5 {
            let sample = gen.generate_next().unwrap();
            let n = sample.polygon.points().len();
            assert!((4..=100).contains(&n));
            assert!(sample.polygon.holes.len() <= 10);
            let again = gen.regenerate(&sample.replay).unwrap();
            assert_eq!(again, sample.polygon);
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let a: Vec<_> = PolygonGenerator::new(loose(), 9)
            .unwrap()
            .take(4)
            .map(|s| s.unwrap().polygon)
            .collect();
        let b: Vec<_> = PolygonGenerator::new(loose(), 9)
            .unwrap()
            .take(4)
            .map(|s| s.unwrap().polygon)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_config_exhausts_attempts() {
        let cfg = PolygonGenConfig {
            min_rectangles: 1,
            max_rectangles: 1,
            min_points: 8,
            max_points: 8,
            min_holes: 0,
            max_attempts: 3,
            ..PolygonGenConfig::default()
        };
        let mut gen = PolygonGenerator::new(cfg, 0).unwrap();
        assert_eq!(
            gen.generate_next().unwrap_err(),
            GeneratorError::AttemptsExhausted { attempts: 3 }
        );
    }
}
