//! Browser bindings
//!
//! The game calls these from TypeScript; courses cross the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::course::contract_course;
use crate::level::Rank;
use crate::seed_codec;
use crate::settings::GeneratorSettings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Piste generator ready");
}

/// Course for a seed code and rank name as JSON; unknown ranks fall back to green
#[wasm_bindgen(js_name = generateCourse)]
pub fn generate_course(code: &str, rank: &str, tile_size: f32) -> Result<String, JsValue> {
    let settings = GeneratorSettings::with_tile_size(tile_size);
    let course = contract_course(code, Rank::parse_or_default(rank), &settings)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    course.to_json().map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = encodeSeed)]
pub fn encode_seed(seed: u32) -> String {
    seed_codec::encode(seed)
}

#[wasm_bindgen(js_name = decodeSeed)]
pub fn decode_seed(code: &str) -> u32 {
    seed_codec::decode(code)
}

/// Code of the daily run for a date
#[wasm_bindgen(js_name = dailySeedCode)]
pub fn daily_seed_code(year: u32, month: u32, day: u32) -> String {
    seed_codec::encode(seed_codec::daily_seed(year, month, day))
}
