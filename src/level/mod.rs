//! Level description, rank contracts and contract level generation
//!
//! Everything here is a pure function of (seed, rank):
//! - Planner draws in a fixed order from a seeded stream
//! - Validation is side-effect free
//! - Retries use derived sub-seeds, never a shared cursor

pub mod contract;
pub mod generator;
pub mod names;
pub mod planner;
pub mod types;

pub use contract::{ContractViolation, RankContract, validate};
pub use generator::{ContractLevelGenerator, generate_valid_contract_level};
pub use names::{contract_level_id, piste_name};
pub use planner::plan_level;
pub use types::{
    AccessPath, BonusKind, BonusObjective, Level, PisteShape, Rank, Side, SlalomSpec, SpecialFeature, SteepZone,
    Weather,
};
