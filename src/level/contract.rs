//! Per-rank contracts and level validation
//!
//! A contract bounds every parameter the planner draws and lists the
//! structural checks a candidate must pass before it is handed out.

use std::ops::RangeInclusive;

use super::types::{Level, PisteShape, Rank, Side, SpecialFeature, Weather};
use crate::consts::*;
use crate::geometry::PisteGeometry;
use crate::layout::slalom::{gate_rows, generate_gates};

/// Structural constraints for one rank
#[derive(Debug, Clone)]
pub struct RankContract {
    pub width: RangeInclusive<u32>,
    pub height: RangeInclusive<u32>,
    pub shapes: &'static [PisteShape],
    /// Piste width fraction range; the lower bound is the contract minimum
    pub piste_width: (f32, f32),
    pub coverage: (f32, f32),
    pub time_limit: RangeInclusive<u32>,
    pub steep_zones: RangeInclusive<u32>,
    /// Slope range in degrees
    pub slope: (f32, f32),
    /// Zero means the rank never has a winch
    pub winch_chance: f32,
    pub access_paths: RangeInclusive<u32>,
    /// Cliffs along the piste edges
    pub dangerous_boundaries: bool,
    /// Zero means no park levels for this rank
    pub park_chance: f32,
    /// Timed descents carry a slalom course
    pub slalom_gates: Option<(RangeInclusive<u32>, (f32, f32))>,
    pub weather: &'static [Weather],
    pub night_chance: f32,
    /// Narrowest usable row once road and cliff margins are reserved
    pub min_usable_tiles: f32,
    /// Off-piste tree/rock density per tile
    pub forest_density: f32,
}

const GREEN_SHAPES: &[PisteShape] = &[PisteShape::GentleCurve, PisteShape::Winding];
const BLUE_SHAPES: &[PisteShape] = &[PisteShape::GentleCurve, PisteShape::Winding, PisteShape::Dogleg];
const STEEP_SHAPES: &[PisteShape] = &[
    PisteShape::Serpentine,
    PisteShape::Hourglass,
    PisteShape::Winding,
    PisteShape::Dogleg,
];

/// Special feature combinations a park level can carry
pub const PARK_FEATURE_SETS: &[&[SpecialFeature]] = &[
    &[SpecialFeature::Kickers],
    &[SpecialFeature::Kickers, SpecialFeature::Rails],
    &[SpecialFeature::Halfpipe, SpecialFeature::Kickers],
    &[SpecialFeature::Halfpipe, SpecialFeature::Kickers, SpecialFeature::Rails],
];

impl Rank {
    pub fn contract(&self) -> RankContract {
        match self {
            Rank::Green => RankContract {
                width: 40..=48,
                height: 60..=80,
                shapes: GREEN_SHAPES,
                piste_width: (0.45, 0.60),
                coverage: (0.70, 0.80),
                time_limit: 180..=240,
                steep_zones: 0..=0,
                slope: (0.0, 0.0),
                winch_chance: 0.0,
                access_paths: 0..=1,
                dangerous_boundaries: false,
                park_chance: 0.4,
                slalom_gates: None,
                weather: &[Weather::Clear, Weather::LightSnow],
                night_chance: 0.0,
                min_usable_tiles: 10.0,
                forest_density: 0.10,
            },
            Rank::Blue => RankContract {
                width: 44..=52,
                height: 70..=90,
                shapes: BLUE_SHAPES,
                piste_width: (0.40, 0.55),
                coverage: (0.75, 0.85),
                time_limit: 210..=270,
                steep_zones: 0..=1,
                slope: (25.0, 30.0),
                winch_chance: 0.0,
                access_paths: 0..=1,
                dangerous_boundaries: false,
                park_chance: 0.0,
                slalom_gates: None,
                weather: &[Weather::Clear, Weather::LightSnow, Weather::Storm],
                night_chance: 0.15,
                min_usable_tiles: 8.0,
                forest_density: 0.12,
            },
            Rank::Red => RankContract {
                width: 48..=56,
                height: 80..=100,
                shapes: STEEP_SHAPES,
                piste_width: (0.35, 0.50),
                coverage: (0.80, 0.90),
                time_limit: 240..=330,
                steep_zones: 1..=2,
                slope: (30.0, 40.0),
                winch_chance: 0.35,
                access_paths: 1..=2,
                dangerous_boundaries: true,
                park_chance: 0.0,
                slalom_gates: Some((6..=10, (5.0, 7.0))),
                weather: &[Weather::Clear, Weather::LightSnow, Weather::Storm],
                night_chance: 0.3,
                min_usable_tiles: 6.0,
                forest_density: 0.14,
            },
            Rank::Black => RankContract {
                width: 50..=60,
                height: 90..=110,
                shapes: STEEP_SHAPES,
                piste_width: (0.30, 0.45),
                coverage: (0.85, 0.95),
                time_limit: 300..=400,
                steep_zones: 1..=3,
                slope: (35.0, 50.0),
                winch_chance: 1.0,
                access_paths: 0..=2,
                dangerous_boundaries: true,
                park_chance: 0.0,
                slalom_gates: Some((8..=12, (4.0, 6.0))),
                weather: &[Weather::LightSnow, Weather::Storm],
                night_chance: 0.4,
                min_usable_tiles: 5.0,
                forest_density: 0.16,
            },
        }
    }

    /// Whether this rank's contract declares cliffs along the piste edges
    pub fn has_dangerous_boundaries(&self) -> bool {
        self.contract().dangerous_boundaries
    }
}

/// Why a candidate level was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractViolation {
    #[error("level has zero width or height")]
    EmptyLevel,
    #[error("piste width {actual:.2} is not above the contract minimum {min:.2}")]
    PisteTooNarrow { actual: f32, min: f32 },
    #[error("steep zones are unsorted, overlapping or out of range")]
    SteepZonesInvalid,
    #[error("more than two access paths")]
    TooManyAccessPaths,
    #[error("access path {index} is malformed")]
    AccessPathInvalid { index: usize },
    #[error("access paths {a} and {b} overlap on the same side")]
    AccessPathsOverlap { a: usize, b: usize },
    #[error("access path {index} crosses a steep zone")]
    SteepZoneOnAccessPath { index: usize },
    #[error("winch anchors present without a winch, or placed out of range")]
    WinchAnchorsInvalid,
    #[error("winch anchors {spacing:.3} apart, need {min:.3}")]
    WinchAnchorsTooClose { spacing: f32, min: f32 },
    #[error("usable width {usable:.1} at row {row} is below {min:.1}")]
    UsableWidthTooSmall { row: usize, usable: f32, min: f32 },
    #[error("service road leaves the level at row {row}")]
    AccessPathOutOfBounds { row: usize },
    #[error("service road overlaps a cliff danger zone")]
    AccessPathOnCliff,
    #[error("park features do not fit the usable length")]
    FeaturesDoNotFit,
    #[error("slalom gates declared for a rank without timed descents, or missing")]
    SlalomMismatch,
    #[error("slalom gates {spacing} rows apart, need {min}")]
    SlalomGatesTooDense { spacing: u32, min: u32 },
    #[error("slalom gate {index} leaves the piste")]
    SlalomGateOffPiste { index: usize },
}

/// Check a candidate against its rank contract
pub fn validate(level: &Level, tile_size: f32, finish_buffer: u32) -> Result<(), ContractViolation> {
    let contract = level.rank.contract();

    if level.width == 0 || level.height == 0 {
        return Err(ContractViolation::EmptyLevel);
    }
    if level.piste_width <= contract.piste_width.0 {
        return Err(ContractViolation::PisteTooNarrow {
            actual: level.piste_width,
            min: contract.piste_width.0,
        });
    }

    check_steep_zones(level)?;
    check_access_paths(level)?;
    check_winch(level)?;

    let geometry = PisteGeometry::generate(level, tile_size);
    check_usable_width(level, &geometry, contract.min_usable_tiles)?;
    check_roads(level, &geometry)?;

    if level.is_park {
        let usable = level.height.saturating_sub(FEATURE_MARGIN_ROWS * 2);
        if usable / FEATURE_MIN_SPACING < 2 {
            return Err(ContractViolation::FeaturesDoNotFit);
        }
    }

    check_slalom(level, &geometry, contract.slalom_gates.is_some(), finish_buffer)
}

fn check_steep_zones(level: &Level) -> Result<(), ContractViolation> {
    let mut previous_end = 0.0_f32;
    for zone in &level.steep_zones {
        if zone.start_y < previous_end || zone.end_y <= zone.start_y || zone.end_y > 1.0 {
            return Err(ContractViolation::SteepZonesInvalid);
        }
        previous_end = zone.end_y;
    }
    Ok(())
}

fn check_access_paths(level: &Level) -> Result<(), ContractViolation> {
    if level.access_paths.len() > 2 {
        return Err(ContractViolation::TooManyAccessPaths);
    }

    for (index, path) in level.access_paths.iter().enumerate() {
        if !(0.0..1.0).contains(&path.entry_y) || path.exit_y <= path.entry_y || path.exit_y > 1.0 {
            return Err(ContractViolation::AccessPathInvalid { index });
        }
        let (lo, hi) = (path.entry_y - STEEP_ROAD_PADDING, path.exit_y + STEEP_ROAD_PADDING);
        if level.steep_zones.iter().any(|z| z.overlaps(lo, hi)) {
            return Err(ContractViolation::SteepZoneOnAccessPath { index });
        }
        for (other, path_b) in level.access_paths.iter().enumerate().skip(index + 1) {
            if path_b.side == path.side && path_b.entry_y < path.exit_y && path.entry_y < path_b.exit_y {
                return Err(ContractViolation::AccessPathsOverlap { a: index, b: other });
            }
        }
    }
    Ok(())
}

fn check_winch(level: &Level) -> Result<(), ContractViolation> {
    if !level.has_winch {
        return if level.winch_anchors.is_empty() {
            Ok(())
        } else {
            Err(ContractViolation::WinchAnchorsInvalid)
        };
    }

    if level.winch_anchors.iter().any(|y| !(0.05..=0.95).contains(y)) {
        return Err(ContractViolation::WinchAnchorsInvalid);
    }
    for pair in level.winch_anchors.windows(2) {
        let spacing = pair[1] - pair[0];
        if spacing < WINCH_MIN_SPACING {
            return Err(ContractViolation::WinchAnchorsTooClose {
                spacing,
                min: WINCH_MIN_SPACING,
            });
        }
    }
    Ok(())
}

fn check_usable_width(level: &Level, geometry: &PisteGeometry, min: f32) -> Result<(), ContractViolation> {
    for row in 0..geometry.piste_path.len() {
        let usable = geometry.usable_width(level, row);
        if usable < min {
            return Err(ContractViolation::UsableWidthTooSmall { row, usable, min });
        }
    }
    Ok(())
}

fn check_roads(level: &Level, geometry: &PisteGeometry) -> Result<(), ContractViolation> {
    let level_width = level.width as f32;
    for curve in &geometry.access_path_curves {
        let outer = match curve.side {
            Side::Left => &curve.left_edge,
            Side::Right => &curve.right_edge,
        };
        if let Some(p) = outer.iter().find(|p| p.x < 0.0 || p.x > level_width) {
            return Err(ContractViolation::AccessPathOutOfBounds { row: p.y as usize });
        }
    }

    let crosses_cliff = geometry
        .access_path_rects
        .iter()
        .any(|road| geometry.danger_zones.iter().any(|zone| zone.rect.intersects(&road.rect)));
    if crosses_cliff {
        return Err(ContractViolation::AccessPathOnCliff);
    }
    Ok(())
}

fn check_slalom(
    level: &Level,
    geometry: &PisteGeometry,
    timed_descent: bool,
    finish_buffer: u32,
) -> Result<(), ContractViolation> {
    let Some(spec) = level.slalom_gates else {
        return if timed_descent {
            Err(ContractViolation::SlalomMismatch)
        } else {
            Ok(())
        };
    };
    if !timed_descent || spec.count == 0 {
        return Err(ContractViolation::SlalomMismatch);
    }

    let (_, spacing) = gate_rows(level.height, spec.count, finish_buffer);
    if spacing < SLALOM_MIN_SPACING_ROWS {
        return Err(ContractViolation::SlalomGatesTooDense {
            spacing,
            min: SLALOM_MIN_SPACING_ROWS,
        });
    }

    for (index, gate) in generate_gates(level, geometry, finish_buffer).iter().enumerate() {
        let y = gate.y as f32 + 0.5;
        if !geometry.is_in_piste(gate.left_x, y) || !geometry.is_in_piste(gate.right_x, y) {
            return Err(ContractViolation::SlalomGateOffPiste { index });
        }
    }
    Ok(())
}
