//! Contract level identity: ids and display names

use crate::consts::{CONTRACT_LEVEL_ID_BASE, CONTRACT_LEVEL_ID_SPAN};
use crate::rng::hash32;

const TERRAIN: &[&str] = &[
    "Combe", "Couloir", "Crête", "Col", "Vallon", "Face", "Plan", "Pas", "Dôme", "Cirque",
];

const LANDMARK: &[&str] = &[
    "des Marmottes",
    "de l'Aigle",
    "du Loup",
    "des Chamois",
    "du Glacier",
    "de la Verticale",
    "des Sapins",
    "du Lac",
    "des Bouquetins",
    "du Chardon",
    "de la Dame",
    "du Vieux Moulin",
];

const SALT_TERRAIN: u32 = 0x4E41_4D45;
const SALT_LANDMARK: u32 = 0x4C4D_524B;

/// Level id for a contract run; always at or above `CONTRACT_LEVEL_ID_BASE`
pub fn contract_level_id(seed: u32) -> u32 {
    CONTRACT_LEVEL_ID_BASE + seed % CONTRACT_LEVEL_ID_SPAN
}

/// Display name for the piste generated from `seed`
pub fn piste_name(seed: u32) -> String {
    let terrain = TERRAIN[hash32(seed, SALT_TERRAIN) as usize % TERRAIN.len()];
    let landmark = LANDMARK[hash32(seed, SALT_LANDMARK) as usize % LANDMARK.len()];
    format!("{terrain} {landmark}")
}
