use wasm_bindgen::prelude::*;

use crate::cell::Solution;
use crate::model::build;
use crate::parse::{parse_structure, parse_words};
use crate::solver::solve;

fn js_error(reason: impl std::fmt::Debug) -> JsValue {
    js_sys::Error::new(&format!("{:?}", reason)).into()
}

/// Fill the structure drawn in `structure` with words from the newline separated `words`.
///
/// Resolves to the filled grid as text, `undefined` when no fill exists, or throws on malformed input.
#[wasm_bindgen]
pub fn generate(structure: &str, words: &str) -> Result<Option<String>, JsValue> {
    let structure = parse_structure(structure).map_err(js_error)?;
    let words = parse_words(words).map_err(js_error)?;
    let model = build(structure, words).map_err(js_error)?;

    Ok(solve(&model).map(|assignment| Solution::new(model.structure(), &assignment).to_string()))
}
