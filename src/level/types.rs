//! Level description types
//!
//! A `Level` is produced once per (seed, rank) and never mutated afterwards.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    #[default]
    Green,
    Blue,
    Red,
    Black,
}

impl Rank {
    pub const ALL: [Rank; 4] = [Rank::Green, Rank::Blue, Rank::Red, Rank::Black];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Green => "green",
            Rank::Blue => "blue",
            Rank::Red => "red",
            Rank::Black => "black",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "green" => Some(Rank::Green),
            "blue" => Some(Rank::Blue),
            "red" => Some(Rank::Red),
            "black" => Some(Rank::Black),
            _ => None,
        }
    }

    /// Lenient parse used for share links: unknown ranks fall back to green
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::debug!("Unknown rank {:?}, defaulting to green", s);
            Rank::default()
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| GenerationError::InvalidRank(s.to_string()))
    }
}

/// Centerline shape family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PisteShape {
    GentleCurve,
    Winding,
    Dogleg,
    Serpentine,
    Hourglass,
}

impl PisteShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            PisteShape::GentleCurve => "gentle_curve",
            PisteShape::Winding => "winding",
            PisteShape::Dogleg => "dogleg",
            PisteShape::Serpentine => "serpentine",
            PisteShape::Hourglass => "hourglass",
        }
    }
}

/// Trick features of a park level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialFeature {
    Halfpipe,
    Kickers,
    Rails,
}

impl SpecialFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialFeature::Halfpipe => "halfpipe",
            SpecialFeature::Kickers => "kickers",
            SpecialFeature::Rails => "rails",
        }
    }
}

/// Left or right of the piste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// -1 for left, +1 for right (outward direction along x)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Clear,
    LightSnow,
    Storm,
}

/// A steep section, as fractions of the level height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteepZone {
    pub start_y: f32,
    pub end_y: f32,
    /// Slope in degrees
    pub slope: f32,
}

impl SteepZone {
    pub fn overlaps(&self, start_y: f32, end_y: f32) -> bool {
        self.start_y < end_y && start_y < self.end_y
    }
}

/// Service road leaving the piste at `entry_y` and rejoining at `exit_y`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPath {
    pub side: Side,
    pub entry_y: f32,
    pub exit_y: f32,
}

/// Declared slalom course for timed descents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlalomSpec {
    pub count: u32,
    /// Gate width in tiles
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Finish using at most `target` percent of the fuel tank
    FuelEfficiency,
    /// Finish without tumbling
    NoTumble,
    /// Finish within `target` seconds
    SpeedRun,
    /// Use the winch at least `target` times
    WinchMastery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusObjective {
    pub kind: BonusKind,
    pub target: u32,
}

/// Immutable level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: u32,
    /// Seed that actually produced this level
    pub seed: u32,
    pub rank: Rank,
    /// Display name of the piste
    pub name: String,
    pub piste_shape: PisteShape,
    pub is_park: bool,
    pub special_features: BTreeSet<SpecialFeature>,
    /// Level size in tiles
    pub width: u32,
    pub height: u32,
    /// Piste width as a fraction of the level width
    pub piste_width: f32,
    pub target_coverage: f32,
    /// Seconds
    pub time_limit: u32,
    pub steep_zones: Vec<SteepZone>,
    /// Anchor heights as fractions; empty unless `has_winch`
    pub winch_anchors: Vec<f32>,
    pub access_paths: Vec<AccessPath>,
    pub slalom_gates: Option<SlalomSpec>,
    pub weather: Weather,
    pub is_night: bool,
    pub has_winch: bool,
    pub intro_dialogue_key: String,
    pub intro_speaker_key: String,
    pub bonus_objectives: Vec<BonusObjective>,
}

impl Level {
    pub fn has_feature(&self, feature: SpecialFeature) -> bool {
        self.special_features.contains(&feature)
    }

    /// Access paths on one side of the piste
    pub fn access_paths_on(&self, side: Side) -> impl Iterator<Item = &AccessPath> {
        self.access_paths.iter().filter(move |p| p.side == side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_parsing() {
        assert_eq!(Rank::from_name("Red"), Some(Rank::Red));
        assert_eq!(Rank::from_name(" black "), Some(Rank::Black));
        assert_eq!(Rank::from_name("purple"), None);
        assert_eq!(Rank::parse_or_default("purple"), Rank::Green);
        assert_eq!(Rank::parse_or_default(""), Rank::Green);
        assert!("purple".parse::<Rank>().is_err());
        assert_eq!("blue".parse::<Rank>(), Ok(Rank::Blue));
    }

    #[test]
    fn test_rank_serializes_lowercase() {
        let json = serde_json::to_string(&Rank::Black).unwrap();
        assert_eq!(json, "\"black\"");
        let shape = serde_json::to_string(&PisteShape::GentleCurve).unwrap();
        assert_eq!(shape, "\"gentle_curve\"");
    }

    #[test]
    fn test_steep_zone_overlap() {
        let zone = SteepZone {
            start_y: 0.3,
            end_y: 0.4,
            slope: 35.0,
        };
        assert!(zone.overlaps(0.35, 0.5));
        assert!(zone.overlaps(0.1, 0.31));
        assert!(!zone.overlaps(0.4, 0.5));
        assert!(!zone.overlaps(0.0, 0.3));
    }
}
