//! Park feature layout
//!
//! `generate_feature_layout` is a pure function of the level height and seed
//! and places features on lanes relative to the centerline. Resolution against
//! the geometry happens in `place_features`, which drops any feature whose
//! footprint is invalid.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::TilePos;
use crate::consts::*;
use crate::geometry::PisteGeometry;
use crate::level::{Level, SpecialFeature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Kicker,
    Rail,
}

impl FeatureKind {
    /// Footprint (width, height) in tiles
    pub fn footprint(self) -> (u32, u32) {
        match self {
            FeatureKind::Kicker => (3, 2),
            FeatureKind::Rail => (1, 3),
        }
    }

    pub fn other(self) -> Self {
        match self {
            FeatureKind::Kicker => FeatureKind::Rail,
            FeatureKind::Rail => FeatureKind::Kicker,
        }
    }

    fn lane(self) -> i32 {
        match self {
            FeatureKind::Kicker => KICKER_LINE_X,
            FeatureKind::Rail => RAIL_LINE_X,
        }
    }

    fn offset_salt(self) -> u64 {
        match self {
            FeatureKind::Kicker => 3,
            FeatureKind::Rail => 17,
        }
    }

    fn mix_salt(self) -> u64 {
        match self {
            FeatureKind::Kicker => 7,
            FeatureKind::Rail => 23,
        }
    }
}

/// Feature on a lane, before the centerline is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDef {
    pub kind: FeatureKind,
    /// Lane offset from the centerline
    pub tile_x: i32,
    pub tile_y: u32,
    pub w: u32,
    pub h: u32,
}

/// Feature resolved to absolute tiles; `x` is the footprint's centre column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedFeature {
    pub kind: FeatureKind,
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PlacedFeature {
    /// Tiles covered by the footprint
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        let half = (self.w / 2) as i32;
        (0..self.h as i32)
            .flat_map(move |dy| (-half..=half).map(move |dx| TilePos::new(self.x + dx, self.y + dy)))
    }
}

/// Lay out one feature type along the run
pub fn generate_feature_layout(
    kind: FeatureKind,
    level_height: u32,
    seed: u32,
    in_halfpipe: bool,
    pipe_floor_half_width: i32,
) -> Vec<FeatureDef> {
    let pipe_offset = if in_halfpipe && pipe_floor_half_width > 0 {
        (pipe_floor_half_width / 3).max(2)
    } else {
        0
    };
    let lane = match (in_halfpipe, kind) {
        (true, FeatureKind::Kicker) => -pipe_offset,
        (true, FeatureKind::Rail) => pipe_offset,
        (false, _) => kind.lane(),
    };

    let margin = FEATURE_MARGIN_ROWS as i64;
    let usable = level_height as i64 - margin * 2;
    let cap = if in_halfpipe { 3 } else { 5 };
    let count = usable.div_euclid(FEATURE_MIN_SPACING as i64).clamp(2, cap);
    let spacing = usable as f64 / count as f64;

    let seed = seed as u64;
    let seed_offset = ((seed * 7 + kind.offset_salt()) % 5) as f64 - 2.0;
    let mix_types = (seed * 13 + kind.mix_salt()) % 100 < 40;

    (0..count)
        .filter_map(|i| {
            let tile_y = (margin as f64 + spacing * (i as f64 + 0.5) + seed_offset).floor() as i64;
            if tile_y < 5 || tile_y >= level_height as i64 - 5 {
                return None;
            }
            let actual = if mix_types && i % 2 == 1 { kind.other() } else { kind };
            let (w, h) = actual.footprint();
            Some(FeatureDef {
                kind: actual,
                tile_x: lane,
                tile_y: tile_y as u32,
                w,
                h,
            })
        })
        .collect()
}

/// Halfpipe wall tiles: three columns inside each piste edge
pub fn halfpipe_walls(level: &Level, geometry: &PisteGeometry) -> Vec<TilePos> {
    if !level.has_feature(SpecialFeature::Halfpipe) {
        return Vec::new();
    }
    let end = level.height.saturating_sub(HALFPIPE_END_ROWS);
    let mut walls = Vec::new();
    for y in HALFPIPE_END_ROWS..end {
        let Some(row) = geometry.piste_path.get(y as usize) else {
            continue;
        };
        for dx in 0..HALFPIPE_WALL_TILES {
            let dx = dx as f32;
            walls.push(TilePos::new((row.left() + dx).floor() as i32, y as i32));
            walls.push(TilePos::new(
                (row.right() - HALFPIPE_WALL_TILES as f32 + dx).floor() as i32,
                y as i32,
            ));
        }
    }
    walls
}

/// Resolve the park layout of a level against its geometry
pub fn place_features(level: &Level, geometry: &PisteGeometry) -> Vec<PlacedFeature> {
    if !level.is_park {
        return Vec::new();
    }

    let in_halfpipe = level.has_feature(SpecialFeature::Halfpipe);
    let pipe_floor_half_width = geometry
        .piste_path
        .get(level.height as usize / 2)
        .map_or(0, |row| (row.width / 2.0).floor() as i32 - HALFPIPE_WALL_TILES as i32);
    let both = in_halfpipe && level.has_feature(SpecialFeature::Kickers) && level.has_feature(SpecialFeature::Rails);
    let lane_half_width = if both { pipe_floor_half_width } else { 0 };

    let walls: BTreeSet<TilePos> = halfpipe_walls(level, geometry).into_iter().collect();
    let mut occupied = BTreeSet::new();
    let mut placed = Vec::new();

    for (feature, kind) in [
        (SpecialFeature::Kickers, FeatureKind::Kicker),
        (SpecialFeature::Rails, FeatureKind::Rail),
    ] {
        if !level.has_feature(feature) {
            continue;
        }
        for def in generate_feature_layout(kind, level.height, level.id, in_halfpipe, lane_half_width) {
            let Some(row) = geometry.piste_path.get(def.tile_y as usize) else {
                continue;
            };
            let candidate = PlacedFeature {
                kind: def.kind,
                x: (row.center_x + def.tile_x as f32).floor() as i32,
                y: def.tile_y as i32,
                w: def.w,
                h: def.h,
            };

            let blocked = candidate.tiles().find(|tile| {
                let (cx, cy) = tile.center();
                !geometry.is_in_piste(cx, cy)
                    || geometry.is_on_cliff(cx, cy)
                    || geometry.is_on_access_path(cx, cy)
                    || walls.contains(tile)
                    || occupied.contains(tile)
            });
            if let Some(tile) = blocked {
                log::debug!("Dropping {:?} at row {}: tile {:?} is blocked", def.kind, def.tile_y, tile);
                continue;
            }
            occupied.extend(candidate.tiles());
            placed.push(candidate);
        }
    }
    placed
}
