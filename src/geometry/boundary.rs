//! Boundary walls that keep vehicles inside the playable area

use serde::{Deserialize, Serialize};

use super::access::AccessPathRect;
use super::cliff::CliffSegment;
use super::profile::PisteRow;
use super::rect::TileRect;
use crate::consts::{
    BOUNDARY_CHUNK_ROWS, BOUNDARY_CLIFF_CLEARANCE_TILES, BOUNDARY_WALL_TILES, CLIFF_EXTENT_MAX, CLIFF_OFFSET_MAX,
};
use crate::level::Side;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCollider {
    pub side: Side,
    pub rect: TileRect,
}

/// Outermost reach of the same-side cliff bands over rows [top, bottom).
///
/// Bands are straight, so the extremes sit at the ends of each overlap.
fn cliff_reach(cliffs: &[CliffSegment], side: Side, top: f32, bottom: f32) -> Option<f32> {
    cliffs
        .iter()
        .filter(|s| s.side == side && s.start_y < bottom && s.end_y > top)
        .flat_map(|s| [s.band(top.max(s.start_y)), s.band(bottom.min(s.end_y))])
        .map(|(lo, hi)| match side {
            Side::Left => lo,
            Side::Right => hi,
        })
        .reduce(|a, b| match side {
            Side::Left => a.min(b),
            Side::Right => a.max(b),
        })
}

/// Whether any same-side band over rows [top, bottom) reaches into `rect`
fn touches_cliff(cliffs: &[CliffSegment], side: Side, rect: &TileRect) -> bool {
    cliffs
        .iter()
        .filter(|s| s.side == side && s.start_y < rect.bottom && s.end_y > rect.top)
        .any(|s| {
            [s.band(rect.top.max(s.start_y)), s.band(rect.bottom.min(s.end_y))]
                .iter()
                .any(|&(lo, hi)| match side {
                    Side::Left => lo < rect.right,
                    Side::Right => hi > rect.left,
                })
        })
}

/// Wall rectangles along both sides, one per chunk of rows.
///
/// On safe ranks the wall hugs the piste edge. On dangerous ranks it sits past
/// the cliff bands of its rows (or the largest possible band where there is no
/// cliff), so falling off the edge stays possible. Chunks that would block a
/// service road, or that have no room left between a band and the level edge,
/// are left open.
pub fn build_boundaries(
    piste: &[PisteRow],
    cliffs: &[CliffSegment],
    dangerous: bool,
    level_width: f32,
    roads: &[AccessPathRect],
) -> Vec<BoundaryCollider> {
    let reach = if dangerous { CLIFF_OFFSET_MAX + CLIFF_EXTENT_MAX } else { 0.0 };
    let mut colliders = Vec::new();

    for (chunk_index, chunk) in piste.chunks(BOUNDARY_CHUNK_ROWS).enumerate() {
        let top = (chunk_index * BOUNDARY_CHUNK_ROWS) as f32;
        let bottom = top + chunk.len() as f32;

        for side in Side::BOTH {
            let band = cliff_reach(cliffs, side, top, bottom);
            let rect = match side {
                Side::Left => {
                    let mut edge = chunk.iter().map(PisteRow::left).fold(f32::INFINITY, f32::min) - reach;
                    if let Some(band) = band {
                        edge = edge.min(band - BOUNDARY_CLIFF_CLEARANCE_TILES);
                    }
                    let inner = edge.max(BOUNDARY_WALL_TILES);
                    TileRect::new(inner - BOUNDARY_WALL_TILES, inner, top, bottom)
                }
                Side::Right => {
                    let mut edge = chunk.iter().map(PisteRow::right).fold(f32::NEG_INFINITY, f32::max) + reach;
                    if let Some(band) = band {
                        edge = edge.max(band + BOUNDARY_CLIFF_CLEARANCE_TILES);
                    }
                    let inner = edge.min(level_width - BOUNDARY_WALL_TILES);
                    TileRect::new(inner, inner + BOUNDARY_WALL_TILES, top, bottom)
                }
            };

            if roads.iter().any(|road| road.rect.intersects(&rect)) || touches_cliff(cliffs, side, &rect) {
                continue;
            }
            colliders.push(BoundaryCollider { side, rect });
        }
    }
    colliders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PisteGeometry;
    use crate::level::{Rank, generate_valid_contract_level};

    fn piste(rows: usize) -> Vec<PisteRow> {
        vec![
            PisteRow {
                center_x: 25.0,
                width: 20.0,
            };
            rows
        ]
    }

    fn cliff(side: Side, start_x: f32, end_x: f32, extent: f32) -> CliffSegment {
        CliffSegment {
            side,
            start_y: 0.0,
            end_y: 8.0,
            start_x,
            end_x,
            offset: 2.0,
            extent,
        }
    }

    #[test]
    fn test_safe_walls_hug_edges() {
        let walls = build_boundaries(&piste(8), &[], false, 50.0, &[]);
        assert_eq!(walls.len(), 4);
        assert_eq!(walls[0].rect, TileRect::new(14.0, 15.0, 0.0, 4.0));
        assert_eq!(walls[1].rect, TileRect::new(35.0, 36.0, 0.0, 4.0));
    }

    #[test]
    fn test_dangerous_walls_sit_past_cliffs() {
        let walls = build_boundaries(&piste(4), &[], true, 50.0, &[]);
        assert_eq!(walls[0].rect.right, 15.0 - CLIFF_OFFSET_MAX - CLIFF_EXTENT_MAX);
        assert_eq!(walls[1].rect.left, 35.0 + CLIFF_OFFSET_MAX + CLIFF_EXTENT_MAX);
    }

    #[test]
    fn test_walls_follow_pushed_out_bands() {
        // Right band starts 2 tiles out and slants to 6 tiles out, 5 thick
        let band = cliff(Side::Right, 37.0, 41.0, 5.0);
        let walls = build_boundaries(&piste(8), &[band], true, 60.0, &[]);
        let right: Vec<_> = walls.iter().filter(|w| w.side == Side::Right).collect();
        assert_eq!(right.len(), 2);
        assert_eq!(right[0].rect.left, 44.0 + BOUNDARY_CLIFF_CLEARANCE_TILES);
        assert_eq!(right[1].rect.left, 46.0 + BOUNDARY_CLIFF_CLEARANCE_TILES);
    }

    #[test]
    fn test_wall_without_room_is_dropped() {
        let band = cliff(Side::Left, 6.0, 6.0, 5.5);
        let walls = build_boundaries(&piste(4), &[band], true, 50.0, &[]);
        assert!(walls.iter().all(|w| w.side == Side::Right));
    }

    #[test]
    fn test_walls_leave_roads_open() {
        let road = AccessPathRect {
            side: Side::Left,
            rect: TileRect::new(9.0, 15.0, 4.0, 8.0),
        };
        let walls = build_boundaries(&piste(12), &[], false, 50.0, &[road]);
        assert_eq!(walls.len(), 5);
        assert!(walls.iter().all(|w| !w.rect.intersects(&road.rect)));
    }

    #[test]
    fn test_no_band_reaches_a_wall() {
        for seed in 1..=120 {
            for rank in [Rank::Red, Rank::Black] {
                let (level, _) = generate_valid_contract_level(seed, rank).unwrap();
                let geometry = PisteGeometry::generate(&level, 16.0);
                for s in &geometry.cliff_segments {
                    let mut y = s.start_y + 0.5;
                    while y < s.end_y {
                        let (lo, hi) = s.band(y);
                        for wall in geometry.boundary_colliders.iter().filter(|w| w.side == s.side) {
                            let r = &wall.rect;
                            if y >= r.top && y < r.bottom {
                                assert!(
                                    hi <= r.left || lo >= r.right,
                                    "seed {seed} {rank} y={y}: band {lo}..{hi} reaches wall {r:?}"
                                );
                            }
                        }
                        y += 1.0;
                    }
                }
            }
        }
    }
}
