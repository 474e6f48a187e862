//! Service roads leaving and rejoining the piste

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::profile::PisteRow;
use super::rect::TileRect;
use crate::consts::{ROAD_OUTSET_TILES, ROAD_RECT_ROWS, ROAD_WIDTH_TILES};
use crate::fraction_to_row;
use crate::level::{AccessPath, Level, Side};

/// Collision rectangle covering a short run of one road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessPathRect {
    pub side: Side,
    pub rect: TileRect,
}

/// Road edges sampled at every row centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPathCurve {
    pub side: Side,
    pub left_edge: Vec<Vec2>,
    pub right_edge: Vec<Vec2>,
}

/// Row range of a path, clamped to the level
pub fn path_rows(path: &AccessPath, height: u32) -> (usize, usize) {
    let entry = fraction_to_row(path.entry_y, height);
    let exit = fraction_to_row(path.exit_y, height).max(entry);
    (entry, exit)
}

/// Build the curve of one road over the piste table
pub fn road_curve(path: &AccessPath, height: u32, piste: &[PisteRow]) -> AccessPathCurve {
    let (entry, exit) = path_rows(path, height);
    let span = (exit - entry).max(1) as f32;
    let sign = path.side.sign();

    let (left_edge, right_edge) = (entry..=exit)
        .filter_map(|y| piste.get(y).map(|row| (y, row)))
        .map(|(y, row)| {
            let u = (y - entry) as f32 / span;
            let edge = match path.side {
                Side::Left => row.left(),
                Side::Right => row.right(),
            };
            let center = edge + sign * (ROAD_WIDTH_TILES / 2.0 + ROAD_OUTSET_TILES * (PI * u).sin());
            let yc = y as f32 + 0.5;
            (
                Vec2::new(center - ROAD_WIDTH_TILES / 2.0, yc),
                Vec2::new(center + ROAD_WIDTH_TILES / 2.0, yc),
            )
        })
        .unzip();

    AccessPathCurve {
        side: path.side,
        left_edge,
        right_edge,
    }
}

/// Chunk a curve into collision rectangles of a few rows each
pub fn road_rects(curve: &AccessPathCurve) -> Vec<AccessPathRect> {
    curve
        .left_edge
        .chunks(ROAD_RECT_ROWS)
        .zip(curve.right_edge.chunks(ROAD_RECT_ROWS))
        .filter_map(|(lefts, rights)| {
            let left = lefts.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
            let right = rights.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
            let top = lefts.first()?.y.floor();
            let bottom = lefts.last()?.y.floor() + 1.0;
            Some(AccessPathRect {
                side: curve.side,
                rect: TileRect::new(left, right, top, bottom),
            })
        })
        .collect()
}

/// Curves and rectangles for every declared access path
pub fn build_roads(level: &Level, piste: &[PisteRow]) -> (Vec<AccessPathCurve>, Vec<AccessPathRect>) {
    let curves: Vec<AccessPathCurve> = level
        .access_paths
        .iter()
        .map(|path| road_curve(path, level.height, piste))
        .collect();
    let rects = curves.iter().flat_map(road_rects).collect();
    (curves, rects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_piste(rows: usize) -> Vec<PisteRow> {
        vec![
            PisteRow {
                center_x: 25.0,
                width: 20.0,
            };
            rows
        ]
    }

    #[test]
    fn test_curve_bulges_outward_midway() {
        let path = AccessPath {
            side: Side::Left,
            entry_y: 0.2,
            exit_y: 0.4,
        };
        let curve = road_curve(&path, 50, &straight_piste(50));
        assert_eq!(curve.left_edge.len(), 11);
        // Ends touch the piste edge, middle sits further out
        assert_eq!(curve.right_edge[0].x, 15.0);
        assert!((curve.right_edge[5].x - 11.0).abs() < 1e-4);
        assert!(curve.left_edge.iter().all(|p| p.x >= 0.0));
    }

    #[test]
    fn test_right_side_mirrors() {
        let path = AccessPath {
            side: Side::Right,
            entry_y: 0.2,
            exit_y: 0.4,
        };
        let curve = road_curve(&path, 50, &straight_piste(50));
        assert_eq!(curve.left_edge[0].x, 35.0);
        assert!((curve.left_edge[5].x - 39.0).abs() < 1e-4);
    }

    #[test]
    fn test_rects_cover_every_row() {
        let path = AccessPath {
            side: Side::Left,
            entry_y: 0.2,
            exit_y: 0.4,
        };
        let curve = road_curve(&path, 50, &straight_piste(50));
        let rects = road_rects(&curve);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].rect.top, 10.0);
        assert_eq!(rects[2].rect.bottom, 21.0);
        for p in curve.left_edge.iter().chain(curve.right_edge.iter()) {
            assert!(rects.iter().any(|r| r.rect.contains(p.x, p.y)));
        }
    }
}
