//! Centerline and width profile per piste shape
//!
//! Each shape is a layered sinusoidal drift plus a width modulation, evaluated
//! per row at t = (y + 0.5) / height. Phases and directions come from pure
//! seed hashes so the profile is a function of the level alone.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::consts::{CENTERLINE_SMOOTHING_ROWS, EDGE_MARGIN_TILES};
use crate::level::{Level, PisteShape};
use crate::rng::hash_unit;
use crate::smoothstep;

const SALT_PHASE: u32 = 0x5048_4153;
const SALT_DIRECTION: u32 = 0x4449_5231;
const SALT_KNEE: u32 = 0x4B4E_4545;

/// One row of the piste table, in tiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PisteRow {
    pub center_x: f32,
    pub width: f32,
}

impl PisteRow {
    #[inline]
    pub fn left(&self) -> f32 {
        self.center_x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center_x + self.width / 2.0
    }

    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }
}

/// Shape-dependent (drift, width multiplier) at height fraction `t`
fn shape_terms(shape: PisteShape, t: f32, level_width: f32, phase: f32, direction: f32, knee: f32) -> (f32, f32) {
    let w = level_width;
    match shape {
        PisteShape::GentleCurve => (
            direction * 0.10 * w * (PI * t).sin() + 0.02 * w * (3.0 * PI * t + phase).sin(),
            1.0 + 0.05 * (TAU * t + phase).sin(),
        ),
        PisteShape::Winding => (
            0.12 * w * (TAU * 1.5 * t + phase).sin() + 0.03 * w * (TAU * 4.0 * t + phase * 0.5).sin(),
            1.0 + 0.08 * (2.0 * TAU * t + phase).sin(),
        ),
        PisteShape::Dogleg => {
            let shift = smoothstep((t - (knee - 0.1)) / 0.2);
            let pinch = (-((t - knee) / 0.08).powi(2)).exp();
            (
                direction * 0.14 * w * (2.0 * shift - 1.0) + 0.02 * w * (TAU * 2.0 * t + phase).sin(),
                1.0 - 0.12 * pinch,
            )
        }
        PisteShape::Serpentine => (
            0.16 * w * (TAU * 2.5 * t + phase).sin(),
            1.0 + 0.06 * (TAU * 5.0 * t + phase).sin(),
        ),
        PisteShape::Hourglass => (
            0.03 * w * (TAU * t + phase).sin(),
            1.0 - 0.4 * (-((t - 0.5) / 0.14).powi(2)).exp(),
        ),
    }
}

/// Compute the per-row piste table for a level
pub fn piste_profile(level: &Level) -> Vec<PisteRow> {
    let height = level.height as usize;
    let level_width = level.width as f32;
    let base_width = level.piste_width * level_width;

    let phase = hash_unit(level.seed, SALT_PHASE) * TAU;
    let direction = if hash_unit(level.seed, SALT_DIRECTION) < 0.5 { -1.0 } else { 1.0 };
    let knee = 0.35 + 0.25 * hash_unit(level.seed, SALT_KNEE);

    let raw: Vec<(f32, f32)> = (0..height)
        .map(|y| {
            let t = (y as f32 + 0.5) / height as f32;
            let (drift, width_mul) = shape_terms(level.piste_shape, t, level_width, phase, direction, knee);
            (level_width / 2.0 + drift, base_width * width_mul)
        })
        .collect();

    // Moving average over the centerline only; width keeps its designed pinch
    let centers = smooth(&raw.iter().map(|(c, _)| *c).collect::<Vec<_>>(), CENTERLINE_SMOOTHING_ROWS);

    let max_width = (level_width - 2.0 * EDGE_MARGIN_TILES).max(1.0);
    centers
        .iter()
        .zip(raw.iter())
        .map(|(&center, &(_, width))| {
            let width = width.clamp(1.0, max_width);
            let lo = EDGE_MARGIN_TILES + width / 2.0;
            let hi = level_width - EDGE_MARGIN_TILES - width / 2.0;
            let center_x = if lo <= hi { center.clamp(lo, hi) } else { level_width / 2.0 };
            PisteRow { center_x, width }
        })
        .collect()
}

/// Centered moving average with clamped window at the ends
fn smooth(values: &[f32], radius: usize) -> Vec<f32> {
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(values.len());
            values[lo..hi].iter().sum::<f32>() / (hi - lo) as f32
        })
        .collect()
}
