//! Generator settings
//!
//! Runtime knobs supplied by the host. Tuning that must never vary between
//! hosts (road width, cliff ranges, feature spacing) lives in `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FINISH_BUFFER_ROWS, MAX_GENERATION_ATTEMPTS, SKI_FINISH_BUFFER, TILE_SIZE};

/// Settings for contract generation and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorSettings {
    /// Renderer tile size in pixels (only converts tile space to pixels)
    pub tile_size: f32,
    /// Hard cap on contract retries
    pub max_attempts: u32,
    /// Rows between the last slalom gate and the finish line
    pub finish_buffer: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            max_attempts: MAX_GENERATION_ATTEMPTS,
            finish_buffer: SKI_FINISH_BUFFER,
        }
    }
}

impl GeneratorSettings {
    /// Settings with a different tile size
    pub fn with_tile_size(tile_size: f32) -> Self {
        let mut settings = Self {
            tile_size,
            ..Self::default()
        };
        settings.sanitize();
        settings
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace values no generator can work with
    pub(crate) fn sanitize(&mut self) {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            log::warn!("Invalid tile size {}, using {}", self.tile_size, TILE_SIZE);
            self.tile_size = TILE_SIZE;
        }
        if self.max_attempts == 0 {
            log::warn!("max_attempts must be positive, using {}", MAX_GENERATION_ATTEMPTS);
            self.max_attempts = MAX_GENERATION_ATTEMPTS;
        }
        if self.finish_buffer > MAX_FINISH_BUFFER_ROWS {
            log::warn!("finish_buffer {} too large, using {}", self.finish_buffer, MAX_FINISH_BUFFER_ROWS);
            self.finish_buffer = MAX_FINISH_BUFFER_ROWS;
        }
    }
}
