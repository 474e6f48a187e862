//! Cliff bands along the piste edges of dangerous ranks

use serde::{Deserialize, Serialize};

use super::profile::PisteRow;
use super::rect::TileRect;
use crate::consts::*;
use crate::level::{Level, Side};
use crate::lerp;
use crate::rng::{hash32, hash_unit};

const SALT_LENGTH: u32 = 0x434C_454E;
const SALT_OFFSET: u32 = 0x434C_4F46;
const SALT_EXTENT: u32 = 0x434C_4558;

/// A straight cliff band between two rows.
///
/// `start_x` and `end_x` are the inner edge of the band at `start_y` and
/// `end_y`. They are plain values owned by the segment, so evaluating one
/// segment never depends on any other segment or on later geometry work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliffSegment {
    pub side: Side,
    pub start_y: f32,
    pub end_y: f32,
    pub start_x: f32,
    pub end_x: f32,
    /// Gap between the piste edge and the band, in tiles
    pub offset: f32,
    /// Band thickness away from the piste, in tiles
    pub extent: f32,
}

impl CliffSegment {
    /// Inner edge of the band at height `y` (tile space)
    pub fn get_x(&self, y: f32) -> f32 {
        let span = self.end_y - self.start_y;
        if span <= 0.0 {
            return self.start_x;
        }
        let t = ((y - self.start_y) / span).clamp(0.0, 1.0);
        lerp(self.start_x, self.end_x, t)
    }

    /// Inner edge in pixels for a pixel-space `y`
    pub fn get_x_px(&self, y_px: f32, tile_size: f32) -> f32 {
        self.get_x(y_px / tile_size) * tile_size
    }

    /// (min, max) x of the band at height `y`
    pub fn band(&self, y: f32) -> (f32, f32) {
        let inner = self.get_x(y);
        let outer = inner + self.side.sign() * self.extent;
        (inner.min(outer), inner.max(outer))
    }

    pub fn covers_row(&self, y: f32) -> bool {
        y >= self.start_y && y < self.end_y
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        if !self.covers_row(y) {
            return false;
        }
        let (lo, hi) = self.band(y);
        x >= lo && x <= hi
    }

    /// Bounding rectangle of the whole band
    pub fn bounds(&self) -> TileRect {
        let (a_lo, a_hi) = self.band(self.start_y);
        let (b_lo, b_hi) = self.band(self.end_y);
        TileRect::new(a_lo.min(b_lo), a_hi.max(b_hi), self.start_y, self.end_y)
    }
}

/// Hazard area mirroring one cliff segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerZone {
    pub side: Side,
    pub rect: TileRect,
}

impl From<&CliffSegment> for DangerZone {
    fn from(segment: &CliffSegment) -> Self {
        Self {
            side: segment.side,
            rect: segment.bounds(),
        }
    }
}

/// Rows of one side that may carry a cliff
fn cliff_rows(level: &Level, side: Side) -> Vec<bool> {
    let height = level.height as usize;
    let mut allowed: Vec<bool> = (0..height)
        .map(|y| y >= CLIFF_END_ROWS && y + CLIFF_END_ROWS < height)
        .collect();

    for path in level.access_paths_on(side) {
        let entry = crate::fraction_to_row(path.entry_y, level.height);
        let exit = crate::fraction_to_row(path.exit_y, level.height);
        let lo = entry.saturating_sub(CLIFF_ROAD_PADDING_ROWS);
        let hi = (exit + CLIFF_ROAD_PADDING_ROWS).min(height.saturating_sub(1));
        for row in allowed.iter_mut().take(hi + 1).skip(lo) {
            *row = false;
        }
    }
    allowed
}

/// Split the allowed rows of one side into segments of 6-12 rows
fn segment_spans(level: &Level, side: Side, allowed: &[bool]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut y = 0;
    while y < allowed.len() {
        if !allowed[y] {
            y += 1;
            continue;
        }
        let run_end = allowed[y..].iter().position(|a| !a).map_or(allowed.len(), |p| y + p);

        let mut start = y;
        while start < run_end {
            let salt = SALT_LENGTH ^ ((start as u32) << 1) ^ side as u32;
            let spread = (CLIFF_SEGMENT_MAX_ROWS - CLIFF_SEGMENT_MIN_ROWS + 1) as u32;
            let len = CLIFF_SEGMENT_MIN_ROWS + (hash32(level.seed, salt) % spread) as usize;
            let mut end = (start + len).min(run_end);
            // Fold a short tail into the current segment
            if run_end - end < CLIFF_SEGMENT_MIN_ROWS / 2 {
                end = run_end;
            }
            spans.push((start, end));
            start = end;
        }
        y = run_end;
    }
    spans
}

/// Build cliff segments for both sides; empty for safe ranks
pub fn build_cliffs(level: &Level, path: &[PisteRow]) -> Vec<CliffSegment> {
    if !level.rank.has_dangerous_boundaries() || path.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for side in Side::BOTH {
        let allowed = cliff_rows(level, side);
        for (index, (first, end)) in segment_spans(level, side, &allowed).into_iter().enumerate() {
            let salt = ((index as u32) << 2) ^ side as u32;
            let offset = lerp(CLIFF_OFFSET_MIN, CLIFF_OFFSET_MAX, hash_unit(level.seed, SALT_OFFSET ^ salt));
            let extent = lerp(CLIFF_EXTENT_MIN, CLIFF_EXTENT_MAX, hash_unit(level.seed, SALT_EXTENT ^ salt));
            segments.push(capture_segment(side, &path[first..end], first, offset, extent));
        }
    }

    log::trace!("Built {} cliff segments for level {}", segments.len(), level.seed);
    segments
}

/// Freeze the band endpoints for rows `first..first + rows.len()`
fn capture_segment(side: Side, rows: &[PisteRow], first: usize, offset: f32, extent: f32) -> CliffSegment {
    let edge = |row: &PisteRow| match side {
        Side::Left => row.left(),
        Side::Right => row.right(),
    };
    let start_y = first as f32;
    let end_y = (first + rows.len()) as f32;
    let mut start_x = rows.first().map_or(0.0, edge) + side.sign() * offset;
    let mut end_x = rows.last().map_or(0.0, edge) + side.sign() * offset;

    // Push the straight band outward until no row's edge comes within `offset`
    let span = (rows.len().max(1)) as f32;
    let intrusion = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let t = (i as f32 + 0.5) / span;
            let line = lerp(start_x, end_x, t);
            (edge(row) + side.sign() * offset - line) * side.sign()
        })
        .fold(0.0_f32, f32::max);
    start_x += side.sign() * intrusion;
    end_x += side.sign() * intrusion;

    CliffSegment {
        side,
        start_y,
        end_y,
        start_x,
        end_x,
        offset,
        extent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start_x: f32, end_x: f32) -> CliffSegment {
        CliffSegment {
            side: Side::Right,
            start_y: 10.0,
            end_y: 20.0,
            start_x,
            end_x,
            offset: 2.0,
            extent: 4.0,
        }
    }

    #[test]
    fn test_get_x_interpolates_and_clamps() {
        let s = segment(30.0, 40.0);
        assert_eq!(s.get_x(10.0), 30.0);
        assert_eq!(s.get_x(15.0), 35.0);
        assert_eq!(s.get_x(20.0), 40.0);
        assert_eq!(s.get_x(0.0), 30.0);
        assert_eq!(s.get_x(99.0), 40.0);
    }

    #[test]
    fn test_segments_keep_their_own_endpoints() {
        let segments: Vec<CliffSegment> = (0..5).map(|i| segment(i as f32, 10.0 + i as f32)).collect();
        for (i, s) in segments.iter().enumerate() {
            assert_eq!(s.get_x(10.0), i as f32);
            assert_eq!(s.get_x(20.0), 10.0 + i as f32);
        }
    }

    #[test]
    fn test_band_extends_away_from_piste() {
        let right = segment(30.0, 30.0);
        assert_eq!(right.band(15.0), (30.0, 34.0));
        let left = CliffSegment {
            side: Side::Left,
            ..right
        };
        assert_eq!(left.band(15.0), (26.0, 30.0));
        assert!(left.contains(27.0, 12.0));
        assert!(!left.contains(27.0, 20.0));
    }

    #[test]
    fn test_danger_zone_matches_bounds() {
        let s = segment(30.0, 36.0);
        let zone = DangerZone::from(&s);
        assert_eq!(zone.rect, TileRect::new(30.0, 40.0, 10.0, 20.0));
        assert_eq!(zone.side, Side::Right);
    }

    #[test]
    fn test_pixel_conversion() {
        let s = segment(30.0, 40.0);
        assert_eq!(s.get_x_px(15.0 * 16.0, 16.0), 35.0 * 16.0);
    }

    #[test]
    fn test_capture_clears_bulging_edge() {
        let rows: Vec<PisteRow> = [20.0, 24.0, 20.0]
            .iter()
            .map(|&c| PisteRow {
                center_x: c,
                width: 10.0,
            })
            .collect();
        let s = capture_segment(Side::Right, &rows, 0, 2.0, 3.0);
        for (i, row) in rows.iter().enumerate() {
            assert!(s.get_x(i as f32 + 0.5) >= row.right() + 2.0 - 1e-4);
        }
    }
}
