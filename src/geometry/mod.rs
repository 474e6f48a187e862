//! Piste geometry engine
//!
//! Turns a `Level` into the per-row piste table plus every derived collider:
//! - `profile`: centerline and width per row
//! - `cliff`: cliff segments and their danger zones
//! - `access`: service road curves and collision rectangles
//! - `boundary`: side walls
//!
//! All coordinates are tiles. `tile_size` only converts to pixels, so two
//! renderers with different tile sizes read identical geometry.

pub mod access;
pub mod boundary;
pub mod cliff;
pub mod profile;
pub mod rect;

use serde::{Deserialize, Serialize};

pub use crate::level::Side;
pub use access::{AccessPathCurve, AccessPathRect};
pub use boundary::BoundaryCollider;
pub use cliff::{CliffSegment, DangerZone};
pub use profile::PisteRow;
pub use rect::TileRect;

use crate::consts::{CLIFF_EDGE_RESERVE_TILES, ROAD_JUNCTION_RESERVE_TILES};
use crate::level::Level;

/// Geometry derived from one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PisteGeometry {
    pub tile_size: f32,
    pub piste_path: Vec<PisteRow>,
    pub cliff_segments: Vec<CliffSegment>,
    pub danger_zones: Vec<DangerZone>,
    pub access_path_rects: Vec<AccessPathRect>,
    pub access_path_curves: Vec<AccessPathCurve>,
    pub boundary_colliders: Vec<BoundaryCollider>,
}

impl PisteGeometry {
    pub fn generate(level: &Level, tile_size: f32) -> Self {
        let piste_path = profile::piste_profile(level);
        let cliff_segments = cliff::build_cliffs(level, &piste_path);
        let danger_zones = cliff_segments.iter().map(DangerZone::from).collect();
        let (access_path_curves, access_path_rects) = access::build_roads(level, &piste_path);
        let boundary_colliders = boundary::build_boundaries(
            &piste_path,
            &cliff_segments,
            level.rank.has_dangerous_boundaries(),
            level.width as f32,
            &access_path_rects,
        );

        Self {
            tile_size,
            piste_path,
            cliff_segments,
            danger_zones,
            access_path_rects,
            access_path_curves,
            boundary_colliders,
        }
    }

    /// Piste row containing height `y`, if inside the level
    pub fn row_at(&self, y: f32) -> Option<&PisteRow> {
        if y < 0.0 {
            return None;
        }
        self.piste_path.get(y.floor() as usize)
    }

    pub fn is_in_piste(&self, x: f32, y: f32) -> bool {
        self.row_at(y).is_some_and(|row| row.contains_x(x))
    }

    pub fn is_on_cliff(&self, x: f32, y: f32) -> bool {
        self.cliff_segments.iter().any(|s| s.contains(x, y))
    }

    pub fn is_on_access_path(&self, x: f32, y: f32) -> bool {
        self.access_path_rects.iter().any(|r| r.rect.contains(x, y))
    }

    /// Width left for grooming once cliff edges and road junctions are reserved
    pub fn usable_width(&self, level: &Level, row: usize) -> f32 {
        let Some(piste_row) = self.piste_path.get(row) else {
            return 0.0;
        };
        let mut usable = piste_row.width;
        if level.rank.has_dangerous_boundaries() {
            usable -= 2.0 * CLIFF_EDGE_RESERVE_TILES;
        }
        let y = row as f32 + 0.5;
        let junctions = self
            .access_path_curves
            .iter()
            .filter(|c| c.left_edge.iter().any(|p| p.y == y))
            .count();
        usable - ROAD_JUNCTION_RESERVE_TILES * junctions as f32
    }

    #[inline]
    pub fn to_pixels(&self, tiles: f32) -> f32 {
        tiles * self.tile_size
    }
}
