//! Placement of everything that sits on or around the piste
//!
//! - `features`: park kickers, rails and halfpipe walls
//! - `slalom`: gates for timed descents
//! - `obstacles`: off-piste trees and rocks

pub mod features;
pub mod obstacles;
pub mod slalom;

use serde::{Deserialize, Serialize};

use crate::geometry::TileRect;

pub use features::{FeatureDef, FeatureKind, PlacedFeature, generate_feature_layout, halfpipe_walls, place_features};
pub use obstacles::{Obstacle, ObstacleKind, place_obstacles};
pub use slalom::{GateColor, SlalomGate, generate_gates};

/// Integer tile coordinate; ordered row-major so sets iterate top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub y: i32,
    pub x: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Centre of the tile in tile space
    pub fn center(&self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    pub fn rect(&self) -> TileRect {
        TileRect::tile(self.x, self.y)
    }
}
