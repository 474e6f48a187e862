//! Piste Forge - seeded ski-piste level generation
//!
//! Core modules:
//! - `rng`: Deterministic seeded stream and pure seed hashes
//! - `seed_codec`: Shareable seed codes, share links and daily seeds
//! - `level`: Level data model, rank contracts, planner and retrying generator
//! - `geometry`: Per-row piste table, cliffs, service roads, boundary colliders
//! - `layout`: Park features, slalom gates and off-piste obstacles
//! - `course`: The single bundle both gameplay modes read
//! - `preview`: ASCII tile previews for sampling tooling
//! - `settings`: Runtime generator settings

pub mod course;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod level;
pub mod preview;
pub mod rng;
pub mod seed_codec;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use course::{Course, TilePos, contract_course};
pub use error::{GenerationError, Result};
pub use geometry::{PisteGeometry, PisteRow, Side};
pub use level::{ContractLevelGenerator, Level, PisteShape, Rank, generate_valid_contract_level};
pub use rng::SeededStream;
pub use seed_codec::{ShareLink, daily_seed, decode, encode, random_seed};
pub use settings::GeneratorSettings;

/// Generation tuning constants
pub mod consts {
    /// Default renderer tile size in pixels
    pub const TILE_SIZE: f32 = 16.0;
    /// Hard cap on contract retries (matches the preview tooling scan range)
    pub const MAX_GENERATION_ATTEMPTS: u32 = 500;
    /// Contract levels are numbered from here; campaign levels sit below
    pub const CONTRACT_LEVEL_ID_BASE: u32 = 100;
    pub const CONTRACT_LEVEL_ID_SPAN: u32 = 1_000_000;

    /// Tiles kept free on each side of the piste for roads, cliffs and forest
    pub const EDGE_MARGIN_TILES: f32 = 9.0;
    /// Centerline smoothing radius (rows on each side)
    pub const CENTERLINE_SMOOTHING_ROWS: usize = 2;

    /// Service road width
    pub const ROAD_WIDTH_TILES: f32 = 3.0;
    /// How far the road bulges away from the piste at its midpoint
    pub const ROAD_OUTSET_TILES: f32 = 4.0;
    /// Rows covered by one access-path collision rectangle
    pub const ROAD_RECT_ROWS: usize = 4;
    /// Width reserved inside the piste where a road joins it
    pub const ROAD_JUNCTION_RESERVE_TILES: f32 = 1.5;

    /// Cliff band placement (tiles beyond the piste edge)
    pub const CLIFF_OFFSET_MIN: f32 = 1.5;
    pub const CLIFF_OFFSET_MAX: f32 = 3.0;
    pub const CLIFF_EXTENT_MIN: f32 = 3.0;
    pub const CLIFF_EXTENT_MAX: f32 = 5.0;
    /// Rows kept clear of cliffs around a service road on the same side
    pub const CLIFF_ROAD_PADDING_ROWS: usize = 3;
    /// Rows left without cliffs at the top and bottom of the level
    pub const CLIFF_END_ROWS: usize = 2;
    pub const CLIFF_SEGMENT_MIN_ROWS: usize = 6;
    pub const CLIFF_SEGMENT_MAX_ROWS: usize = 12;
    /// Width reserved inside the piste along a cliff edge
    pub const CLIFF_EDGE_RESERVE_TILES: f32 = 1.0;

    /// Boundary wall thickness and chunk height
    pub const BOUNDARY_WALL_TILES: f32 = 1.0;
    pub const BOUNDARY_CHUNK_ROWS: usize = 4;
    /// Gap between the outer side of a cliff band and the wall behind it
    pub const BOUNDARY_CLIFF_CLEARANCE_TILES: f32 = 1.0;

    /// Park feature layout
    pub const FEATURE_MARGIN_ROWS: u32 = 8;
    pub const FEATURE_MIN_SPACING: u32 = 10;
    pub const KICKER_LINE_X: i32 = -5;
    pub const RAIL_LINE_X: i32 = 5;
    pub const HALFPIPE_WALL_TILES: u32 = 3;
    pub const HALFPIPE_END_ROWS: u32 = 3;

    /// Rows between the last slalom gate and the finish line
    pub const SKI_FINISH_BUFFER: u32 = 3;
    /// Largest finish buffer a host may configure
    pub const MAX_FINISH_BUFFER_ROWS: u32 = 20;
    pub const SLALOM_MIN_SPACING_ROWS: u32 = 4;

    /// Minimum vertical spacing between winch anchors (fraction of height)
    pub const WINCH_MIN_SPACING: f32 = 0.1;
    /// Padding between steep zones and service roads (fraction of height)
    pub const STEEP_ROAD_PADDING: f32 = 0.02;

    /// Clear strip between the piste edge and the first trees
    pub const FOREST_BUFFER_TILES: f32 = 1.5;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep on [0, 1]
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Convert a level fraction (0..1) to a row index, clamped to the level
#[inline]
pub fn fraction_to_row(fraction: f32, height: u32) -> usize {
    let row = (fraction * height as f32).floor().max(0.0) as usize;
    row.min(height.saturating_sub(1) as usize)
}
