/* src/engine/wasm/src/lib.rs */

use formfill::FillOptions;
use serde_json::Value;
use wasm_bindgen::prelude::*;

fn parse(json: &str) -> Result<Value, JsValue> {
  if json.trim().is_empty() {
    return Ok(Value::Null);
  }
  serde_json::from_str(json).map_err(|err| JsValue::from_str(&format!("invalid JSON: {err}")))
}

/// Fill `html` with the field map in `data_json` (`{"name": "v" | ["v", ...]}`)
/// using the camelCase options object in `options_json`.
#[wasm_bindgen]
pub fn fill(html: &str, data_json: &str, options_json: &str) -> Result<String, JsValue> {
  let data = parse(data_json)?;
  let options = FillOptions::from_json(&parse(options_json)?)
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
  formfill::fill_str(html, &data, &options).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Fill with default options.
#[wasm_bindgen]
pub fn fill_default(html: &str, data_json: &str) -> Result<String, JsValue> {
  fill(html, data_json, "")
}
