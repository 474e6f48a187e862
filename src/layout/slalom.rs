//! Slalom gate layout for timed descents

use serde::{Deserialize, Serialize};

use crate::geometry::PisteGeometry;
use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateColor {
    Red,
    Blue,
}

/// Gate poles in tile space at row `y`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlalomGate {
    pub y: u32,
    pub left_x: f32,
    pub right_x: f32,
    pub color: GateColor,
}

impl SlalomGate {
    pub fn center_x(&self) -> f32 {
        (self.left_x + self.right_x) / 2.0
    }
}

/// First usable row and the row spacing between `count` gates
pub fn gate_rows(height: u32, count: u32, finish_buffer: u32) -> (u32, u32) {
    let start = (height as f32 * 0.05).round() as u32 + 3;
    let end = height.saturating_sub(finish_buffer.saturating_add(1));
    let spacing = end.saturating_sub(start) / (count + 1);
    (start, spacing)
}

/// Gates alternate around the centerline, red on even indices
pub fn generate_gates(level: &Level, geometry: &PisteGeometry, finish_buffer: u32) -> Vec<SlalomGate> {
    let Some(spec) = level.slalom_gates else {
        return Vec::new();
    };
    let (start, spacing) = gate_rows(level.height, spec.count, finish_buffer);
    let half = spec.width / 2.0;

    (0..spec.count)
        .filter_map(|i| {
            let y = start + spacing * (i + 1);
            let row = geometry.piste_path.get(y as usize)?;
            let even = i % 2 == 0;
            let direction = if even { -1.0 } else { 1.0 };
            let shift = (spec.width * 0.3).min(row.width * 0.15);
            let cx = row.center_x + direction * shift;
            Some(SlalomGate {
                y,
                left_x: cx - half,
                right_x: cx + half,
                color: if even { GateColor::Red } else { GateColor::Blue },
            })
        })
        .collect()
}
