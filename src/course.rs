//! The course bundle shared by grooming, ski descents and preview tooling
//!
//! Both gameplay modes call `Course::build` on the same level; neither keeps a
//! private copy of the layout rules, so the two modes always agree on where
//! features, gates and obstacles are.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::PisteGeometry;
use crate::layout::{self, Obstacle, PlacedFeature, SlalomGate};
use crate::level::{ContractLevelGenerator, Level, Rank};
use crate::seed_codec;
use crate::settings::GeneratorSettings;

pub use crate::layout::TilePos;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub level: Level,
    pub geometry: PisteGeometry,
    pub features: Vec<PlacedFeature>,
    pub halfpipe_walls: Vec<TilePos>,
    pub gates: Vec<SlalomGate>,
    pub obstacles: Vec<Obstacle>,
}

impl Course {
    pub fn build(level: Level, settings: &GeneratorSettings) -> Self {
        let geometry = PisteGeometry::generate(&level, settings.tile_size);
        let features = layout::place_features(&level, &geometry);
        let halfpipe_walls = layout::halfpipe_walls(&level, &geometry);
        let gates = layout::generate_gates(&level, &geometry, settings.finish_buffer);
        let obstacles = layout::place_obstacles(&level, &geometry);

        log::info!(
            "Course {} \"{}\" ({}, {}): {} features, {} gates, {} obstacles",
            level.id,
            level.name,
            level.rank,
            level.piste_shape.as_str(),
            features.len(),
            gates.len(),
            obstacles.len()
        );

        Self {
            level,
            geometry,
            features,
            halfpipe_walls,
            gates,
            obstacles,
        }
    }

    /// Generate a valid contract level for `seed` and build its course
    pub fn from_seed(seed: u32, rank: Rank, settings: &GeneratorSettings) -> Result<Self> {
        let (level, _) = ContractLevelGenerator::new(settings.clone()).generate(seed, rank)?;
        Ok(Self::build(level, settings))
    }

    /// Every tile blocked by a park feature, halfpipe wall, tree or rock
    pub fn obstacle_tiles(&self) -> BTreeSet<TilePos> {
        self.features
            .iter()
            .flat_map(|f| f.tiles())
            .chain(self.halfpipe_walls.iter().copied())
            .chain(self.obstacles.iter().map(Obstacle::tile))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Course for a shared seed code, as opened from a share link
pub fn contract_course(code: &str, rank: Rank, settings: &GeneratorSettings) -> Result<Course> {
    Course::from_seed(seed_codec::decode(code), rank, settings)
}
