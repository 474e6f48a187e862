//! Shareable seed codes
//!
//! Seeds travel between players as short base-36 codes (`0-9A-Z`). Decoding is
//! lenient: case is ignored and characters outside the alphabet are skipped, so
//! a code pasted with stray punctuation still opens the same level.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::level::Rank;
use crate::rng::hash32;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SALT_DAILY: u32 = 0x4441_4931;

fn digit_value(c: char) -> Option<u32> {
    c.to_ascii_uppercase().to_digit(36)
}

/// Encode a seed as an uppercase base-36 code
pub fn encode(seed: u32) -> String {
    if seed == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    let mut n = seed;
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

/// Decode a code, ignoring case and skipping unknown characters.
///
/// Accumulation wraps in 32 bits, so over-long codes still map to a seed.
pub fn decode(code: &str) -> u32 {
    code.chars().fold(0u32, |acc, c| match digit_value(c) {
        Some(d) => acc.wrapping_mul(36).wrapping_add(d),
        None => {
            log::debug!("Skipping {:?} in seed code {:?}", c, code);
            acc
        }
    })
}

/// Decode for tooling: rejects empty codes and unknown characters
pub fn decode_strict(code: &str) -> Result<u32> {
    let trimmed = code.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| digit_value(c).is_some()) {
        return Err(GenerationError::MalformedSeedCode(code.to_string()));
    }
    Ok(decode(trimmed))
}

/// Seed of the daily run for a calendar date
pub fn daily_seed(year: u32, month: u32, day: u32) -> u32 {
    let date = year.wrapping_mul(10_000).wrapping_add(month.wrapping_mul(100)).wrapping_add(day);
    hash32(date, SALT_DAILY)
}

/// Fresh seed for ad-hoc runs
pub fn random_seed() -> u32 {
    rand::random()
}

/// A seed and rank as carried in a share link (`?seed=CODE&rank=RANK`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub seed: u32,
    pub rank: Rank,
}

impl ShareLink {
    pub fn new(seed: u32, rank: Rank) -> Self {
        Self { seed, rank }
    }

    pub fn code(&self) -> String {
        encode(self.seed)
    }

    pub fn to_query(&self) -> String {
        format!("?seed={}&rank={}", self.code(), self.rank)
    }

    /// Parse a query string; `None` without a seed, green for a bad rank
    pub fn from_query(query: &str) -> Option<Self> {
        let mut seed = None;
        let mut rank = Rank::default();
        for pair in query.trim_start_matches('?').split('&') {
            match pair.split_once('=') {
                Some(("seed", code)) if !code.is_empty() => seed = Some(decode(code)),
                Some(("rank", name)) => rank = Rank::parse_or_default(name),
                _ => {}
            }
        }
        seed.map(|seed| Self { seed, rank })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(35), "Z");
        assert_eq!(encode(36), "10");
        assert_eq!(encode(u32::MAX), "1Z141Z3");
    }

    #[test]
    fn test_decode_ignores_case() {
        assert_eq!(decode("abc123"), decode("ABC123"));
        assert_eq!(decode("ZZZZZ"), 60_466_175);
    }

    #[test]
    fn test_decode_skips_unknown_characters() {
        assert_eq!(decode("AB-C1_23"), decode("ABC123"));
        assert_eq!(decode(""), 0);
        assert_eq!(decode("!!"), 0);
    }

    #[test]
    fn test_decode_wraps_long_codes() {
        // 17UK8P6 exceeds u32; accumulation wraps
        let expected = [1u32, 7, 30, 20, 8, 25, 6]
            .iter()
            .fold(0u32, |acc, &d| acc.wrapping_mul(36).wrapping_add(d));
        assert_eq!(decode("17UK8P6"), expected);
    }

    #[test]
    fn test_round_trip() {
        for seed in [0, 1, 35, 36, 1295, 123_456_789, u32::MAX] {
            assert_eq!(decode(&encode(seed)), seed);
        }
    }

    #[test]
    fn test_decode_strict() {
        assert_eq!(decode_strict("zz"), Ok(1295));
        assert!(matches!(decode_strict("A-B"), Err(GenerationError::MalformedSeedCode(_))));
        assert!(decode_strict("  ").is_err());
    }

    #[test]
    fn test_daily_seed_is_stable_per_date() {
        assert_eq!(daily_seed(2026, 1, 15), daily_seed(2026, 1, 15));
        assert_ne!(daily_seed(2026, 1, 15), daily_seed(2026, 1, 16));
    }

    #[test]
    fn test_daily_seed_far_future_year() {
        assert_ne!(daily_seed(500_000, 1, 1), daily_seed(500_000, 1, 2));
        assert_eq!(daily_seed(u32::MAX, 12, 31), daily_seed(u32::MAX, 12, 31));
    }

    #[test]
    fn test_share_link() {
        let link = ShareLink::new(decode("ABC123"), Rank::Blue);
        assert_eq!(link.to_query(), "?seed=ABC123&rank=blue");
        assert_eq!(ShareLink::from_query(&link.to_query()), Some(link));

        let fallback = ShareLink::from_query("?seed=TEST01&rank=purple").unwrap();
        assert_eq!(fallback.rank, Rank::Green);
        assert_eq!(fallback.seed, decode("TEST01"));

        let lower = ShareLink::from_query("seed=abc123&rank=red").unwrap();
        assert_eq!(lower.seed, link.seed);
        assert_eq!(lower.rank, Rank::Red);

        assert_eq!(ShareLink::from_query("?rank=blue"), None);
    }
}
