//! Generation errors
//!
//! Only `Exhausted` can escape a generation call. Rank and seed-code problems
//! are normally recovered where they occur; the strict parsers return them
//! for tooling that wants to report bad input.

use crate::level::Rank;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No candidate satisfied the rank contract within the attempt cap.
    /// Indicates a contract tuning defect, not a runtime condition.
    #[error("no valid {rank} level for seed {seed} after {attempts} attempts")]
    Exhausted { seed: u32, rank: Rank, attempts: u32 },

    #[error("unknown rank: {0:?}")]
    InvalidRank(String),

    #[error("malformed seed code: {0:?}")]
    MalformedSeedCode(String),
}

pub type Result<T> = std::result::Result<T, GenerationError>;
