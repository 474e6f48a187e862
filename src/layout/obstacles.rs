//! Off-piste trees and rocks
//!
//! Each tile is decided by a pure hash of (seed, x, y), so the obstacle set
//! does not depend on iteration order or on the renderer's tile size.

use serde::{Deserialize, Serialize};

use super::TilePos;
use crate::consts::FOREST_BUFFER_TILES;
use crate::geometry::PisteGeometry;
use crate::level::Level;
use crate::rng::{hash_unit, tile_hash};

/// Fraction of obstacles that are rocks rather than trees
const ROCK_SHARE: f32 = 0.15;
const SALT_ROCK: u32 = 0x524F_434B;
/// Clearance kept around every service road
const ROAD_CLEARANCE_TILES: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Tree,
    Rock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: i32,
    pub y: i32,
}

impl Obstacle {
    pub fn tile(&self) -> TilePos {
        TilePos::new(self.x, self.y)
    }
}

/// Whether the tile is free for an obstacle
fn is_clear(geometry: &PisteGeometry, tile: TilePos) -> bool {
    let (x, y) = tile.center();
    let Some(row) = geometry.row_at(y) else {
        return false;
    };
    if x >= row.left() - FOREST_BUFFER_TILES && x <= row.right() + FOREST_BUFFER_TILES {
        return false;
    }
    if geometry.is_on_cliff(x, y) {
        return false;
    }
    let cell = tile.rect().expanded(ROAD_CLEARANCE_TILES);
    !geometry.access_path_rects.iter().any(|road| road.rect.intersects(&cell))
}

/// Scatter obstacles over the off-piste area of a level
pub fn place_obstacles(level: &Level, geometry: &PisteGeometry) -> Vec<Obstacle> {
    let density = level.rank.contract().forest_density;
    let mut obstacles = Vec::new();

    for y in 0..level.height as i32 {
        for x in 0..level.width as i32 {
            let roll = tile_hash(level.seed, x, y) as f32 / u32::MAX as f32;
            if roll >= density {
                continue;
            }
            let tile = TilePos::new(x, y);
            if !is_clear(geometry, tile) {
                continue;
            }
            let kind = if hash_unit(tile_hash(level.seed, x, y), SALT_ROCK) < ROCK_SHARE {
                ObstacleKind::Rock
            } else {
                ObstacleKind::Tree
            };
            obstacles.push(Obstacle { kind, x, y });
        }
    }

    log::trace!("Placed {} obstacles on level {}", obstacles.len(), level.id);
    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Rank, generate_valid_contract_level};

    #[test]
    fn test_obstacles_stay_off_piste() {
        for rank in Rank::ALL {
            let (level, _) = generate_valid_contract_level(2024, rank).unwrap();
            let geometry = PisteGeometry::generate(&level, 16.0);
            let obstacles = place_obstacles(&level, &geometry);
            assert!(!obstacles.is_empty());
            for o in &obstacles {
                let (x, y) = o.tile().center();
                assert!(!geometry.is_in_piste(x, y));
                assert!(!geometry.is_on_cliff(x, y));
                assert!(!geometry.is_on_access_path(x, y));
            }
        }
    }

    #[test]
    fn test_obstacles_are_deterministic() {
        let (level, _) = generate_valid_contract_level(99, Rank::Black).unwrap();
        let geometry = PisteGeometry::generate(&level, 16.0);
        assert_eq!(place_obstacles(&level, &geometry), place_obstacles(&level, &geometry));
    }

    #[test]
    fn test_rocks_and_trees_both_appear() {
        let (level, _) = generate_valid_contract_level(7, Rank::Black).unwrap();
        let geometry = PisteGeometry::generate(&level, 16.0);
        let obstacles = place_obstacles(&level, &geometry);
        assert!(obstacles.iter().any(|o| o.kind == ObstacleKind::Rock));
        assert!(obstacles.iter().any(|o| o.kind == ObstacleKind::Tree));
    }
}
