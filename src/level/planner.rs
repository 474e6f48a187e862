//! Piste shape planner
//!
//! Draws every per-level parameter from a `SeededStream` in a fixed order, so
//! a (seed, rank) pair always reproduces the same candidate. The planner does
//! not validate; `generator` decides whether a candidate is kept.

use std::collections::BTreeSet;

use super::contract::{PARK_FEATURE_SETS, RankContract};
use super::names::{contract_level_id, piste_name};
use super::types::*;
use crate::consts::*;
use crate::rng::SeededStream;

/// Steep zones are spread over this band of the level height
const STEEP_BAND: (f32, f32) = (0.15, 0.85);
const STEEP_LENGTH: (f32, f32) = (0.06, 0.14);
/// Winch anchors sit just above the zone they serve
const WINCH_LEAD: f32 = 0.03;
/// Service roads stay inside this band of the level height
const ROAD_BAND: (f32, f32) = (0.1, 0.9);
const ROAD_LENGTH: (f32, f32) = (0.12, 0.22);

const SPEAKERS: &[&str] = &["speaker_chief", "speaker_patroller", "speaker_mechanic", "speaker_liftop"];
const INTRO_VARIANTS: u32 = 4;

/// Draw a candidate level for `seed` and `rank`
pub fn plan_level(seed: u32, rank: Rank) -> Level {
    let contract = rank.contract();
    let mut rng = SeededStream::new(seed);

    // 1. Dimensions
    let width = rng.range_u32(*contract.width.start(), *contract.width.end());
    let height = rng.range_u32(*contract.height.start(), *contract.height.end());

    // 2. Shape
    let piste_shape = rng.pick(contract.shapes);

    // 3. Park
    let is_park = contract.park_chance > 0.0 && rng.chance(contract.park_chance);
    let special_features: BTreeSet<SpecialFeature> = if is_park {
        rng.pick(PARK_FEATURE_SETS).iter().copied().collect()
    } else {
        BTreeSet::new()
    };

    // 4. Targets. The width never sits exactly on the contract minimum.
    let (pw_lo, pw_hi) = contract.piste_width;
    let piste_width = rng.range_f32(pw_lo + 0.01, pw_hi);
    let target_coverage = round2(rng.range_f32(contract.coverage.0, contract.coverage.1));
    let time_limit = round_to(
        rng.range_u32(*contract.time_limit.start(), *contract.time_limit.end()),
        5,
    );

    // 5. Steep zones
    let steep_zones = plan_steep_zones(&mut rng, &contract);

    // 6. Winch
    let has_winch = contract.winch_chance > 0.0 && !steep_zones.is_empty() && rng.chance(contract.winch_chance);
    let winch_anchors = if has_winch {
        steep_zones
            .iter()
            .map(|z| round3((z.start_y - WINCH_LEAD).max(0.05)))
            .collect()
    } else {
        Vec::new()
    };

    // 7. Access paths
    let access_paths = plan_access_paths(&mut rng, &contract, &steep_zones);

    // 8. Slalom
    let slalom_gates = contract.slalom_gates.as_ref().map(|(count, (w_lo, w_hi))| SlalomSpec {
        count: rng.range_u32(*count.start(), *count.end()),
        width: rng.range_f32(*w_lo, *w_hi).round(),
    });

    // 9. Weather
    let weather = rng.pick(contract.weather);
    let is_night = contract.night_chance > 0.0 && rng.chance(contract.night_chance);

    // 10. Briefing and bonus objectives
    let intro_dialogue_key = format!("contract_intro_{}_{}", rank, rng.range_u32(0, INTRO_VARIANTS - 1));
    let intro_speaker_key = rng.pick(SPEAKERS).to_string();
    let bonus_objectives = plan_bonus_objectives(&mut rng, time_limit, has_winch);

    Level {
        id: contract_level_id(seed),
        seed,
        rank,
        name: piste_name(seed),
        piste_shape,
        is_park,
        special_features,
        width,
        height,
        piste_width,
        target_coverage,
        time_limit,
        steep_zones,
        winch_anchors,
        access_paths,
        slalom_gates,
        weather,
        is_night,
        has_winch,
        intro_dialogue_key,
        intro_speaker_key,
        bonus_objectives,
    }
}

/// One zone per equal band, so zones come out sorted and disjoint
fn plan_steep_zones(rng: &mut SeededStream, contract: &RankContract) -> Vec<SteepZone> {
    let count = rng.range_u32(*contract.steep_zones.start(), *contract.steep_zones.end());
    if count == 0 {
        return Vec::new();
    }

    let band = (STEEP_BAND.1 - STEEP_BAND.0) / count as f32;
    (0..count)
        .map(|i| {
            let band_start = STEEP_BAND.0 + band * i as f32;
            let length = rng.range_f32(STEEP_LENGTH.0, STEEP_LENGTH.1).min(band * 0.8);
            let start_y = band_start + rng.range_f32(0.0, band - length);
            let slope = rng.range_f32(contract.slope.0, contract.slope.1).round();
            SteepZone {
                start_y: round3(start_y),
                end_y: round3(start_y + length),
                slope,
            }
        })
        .collect()
}

/// Free vertical intervals between padded steep zones
fn free_intervals(steep_zones: &[SteepZone]) -> Vec<(f32, f32)> {
    let mut intervals = Vec::new();
    let mut cursor = ROAD_BAND.0;
    for zone in steep_zones {
        let lo = zone.start_y - STEEP_ROAD_PADDING * 2.0;
        if lo > cursor {
            intervals.push((cursor, lo));
        }
        cursor = cursor.max(zone.end_y + STEEP_ROAD_PADDING * 2.0);
    }
    if ROAD_BAND.1 > cursor {
        intervals.push((cursor, ROAD_BAND.1));
    }
    intervals
}

fn plan_access_paths(rng: &mut SeededStream, contract: &RankContract, steep_zones: &[SteepZone]) -> Vec<AccessPath> {
    let count = rng.range_u32(*contract.access_paths.start(), *contract.access_paths.end()).min(2);
    if count == 0 {
        return Vec::new();
    }

    let first_side = if rng.chance(0.5) { Side::Left } else { Side::Right };
    let gaps = free_intervals(steep_zones);

    (0..count)
        .map(|i| {
            let side = if i == 0 { first_side } else { first_side.opposite() };
            let length = rng.range_f32(ROAD_LENGTH.0, ROAD_LENGTH.1);
            let roomy: Vec<(f32, f32)> = gaps.iter().copied().filter(|(lo, hi)| hi - lo >= length).collect();
            // The draw happens either way to keep the stream aligned
            let slot = rng.next_f32();
            let entry_y = if roomy.is_empty() {
                ROAD_BAND.0 + slot * (ROAD_BAND.1 - ROAD_BAND.0 - length)
            } else {
                let (lo, hi) = roomy[((slot * roomy.len() as f32) as usize).min(roomy.len() - 1)];
                lo + rng.range_f32(0.0, hi - lo - length)
            };
            AccessPath {
                side,
                entry_y: round3(entry_y),
                exit_y: round3(entry_y + length),
            }
        })
        .collect()
}

fn plan_bonus_objectives(rng: &mut SeededStream, time_limit: u32, has_winch: bool) -> Vec<BonusObjective> {
    let mut candidates = vec![
        BonusObjective {
            kind: BonusKind::FuelEfficiency,
            target: rng.range_u32(60, 80),
        },
        BonusObjective {
            kind: BonusKind::NoTumble,
            target: 0,
        },
        BonusObjective {
            kind: BonusKind::SpeedRun,
            target: round_to(time_limit * 3 / 4, 5),
        },
    ];
    if has_winch {
        candidates.push(BonusObjective {
            kind: BonusKind::WinchMastery,
            target: rng.range_u32(1, 3),
        });
    }

    let keep = rng.range_u32(0, 2) as usize;
    let mut chosen = Vec::with_capacity(keep);
    for _ in 0..keep {
        let idx = rng.range_u32(0, candidates.len() as u32 - 1) as usize;
        chosen.push(candidates.remove(idx));
    }
    chosen
}

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

fn round_to(v: u32, step: u32) -> u32 {
    (v + step / 2) / step * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_is_reproducible() {
        for rank in Rank::ALL {
            assert_eq!(plan_level(777, rank), plan_level(777, rank));
        }
    }

    #[test]
    fn test_shape_palette_per_rank() {
        for seed in 1..200 {
            let blue = plan_level(seed, Rank::Blue);
            assert!(matches!(
                blue.piste_shape,
                PisteShape::GentleCurve | PisteShape::Winding | PisteShape::Dogleg
            ));
            let black = plan_level(seed, Rank::Black);
            assert_ne!(black.piste_shape, PisteShape::GentleCurve);
        }
    }

    #[test]
    fn test_park_only_on_green() {
        let mut parks = 0;
        for seed in 1..200 {
            let green = plan_level(seed, Rank::Green);
            if green.is_park {
                parks += 1;
                assert!(green.has_feature(SpecialFeature::Kickers));
            } else {
                assert!(green.special_features.is_empty());
            }
            assert!(!plan_level(seed, Rank::Blue).is_park);
            assert!(!plan_level(seed, Rank::Red).is_park);
        }
        assert!(parks > 0);
    }

    #[test]
    fn test_steep_zones_sorted_and_disjoint() {
        for seed in 1..300 {
            let level = plan_level(seed, Rank::Black);
            assert!(!level.steep_zones.is_empty());
            for pair in level.steep_zones.windows(2) {
                assert!(pair[0].end_y <= pair[1].start_y);
            }
            for zone in &level.steep_zones {
                assert!(zone.start_y < zone.end_y);
                assert!((35.0..=50.0).contains(&zone.slope));
            }
        }
    }

    #[test]
    fn test_winch_anchors_only_with_winch() {
        for seed in 1..200 {
            for rank in Rank::ALL {
                let level = plan_level(seed, rank);
                assert_eq!(level.has_winch, !level.winch_anchors.is_empty());
            }
            assert!(!plan_level(seed, Rank::Green).has_winch);
            assert!(plan_level(seed, Rank::Black).has_winch);
        }
    }

    #[test]
    fn test_two_access_paths_take_both_sides() {
        for seed in 1..200 {
            let level = plan_level(seed, Rank::Red);
            assert!((1..=2).contains(&level.access_paths.len()));
            if level.access_paths.len() == 2 {
                assert_ne!(level.access_paths[0].side, level.access_paths[1].side);
            }
        }
    }

    #[test]
    fn test_free_intervals_skip_zones() {
        let zones = [SteepZone {
            start_y: 0.4,
            end_y: 0.5,
            slope: 40.0,
        }];
        let gaps = free_intervals(&zones);
        assert_eq!(gaps.len(), 2);
        assert!(gaps[0].1 <= 0.4 && gaps[1].0 >= 0.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(183, 5), 185);
        assert_eq!(round_to(182, 5), 180);
    }
}
