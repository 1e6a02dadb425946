//! JS options object → [`ZoomConfig`] and callbacks

use js_sys::{Array, Function, Reflect, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::ZoomConfig;
use crate::error::{ZoomError, ZoomResult};
use crate::host::SrcSet;

/// Parse the JSON-able part of an options object
///
/// `undefined` and `null` give the defaults. Functions are dropped by
/// `JSON.stringify`, so `onShow` / `onHide` never reach serde.
pub(crate) fn config(options: &JsValue) -> ZoomResult<ZoomConfig> {
    if options.is_undefined() || options.is_null() {
        return Ok(ZoomConfig::default());
    }
    let json = JSON::stringify(options)
        .map_err(|_| ZoomError::InvalidConfig("options are not serializable".to_string()))?;
    ZoomConfig::from_json(&String::from(json))
}

/// Function stored under `key`, if any
pub(crate) fn callback(options: &JsValue, key: &str) -> Option<Function> {
    if !options.is_object() {
        return None;
    }
    Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

/// A `srcset` given either as a string or as an array of candidates
pub(crate) fn srcset(value: &JsValue) -> Option<SrcSet> {
    if let Some(raw) = value.as_string() {
        return Some(SrcSet::Raw(raw));
    }
    if Array::is_array(value) {
        let candidates = Array::from(value)
            .iter()
            .filter_map(|candidate| candidate.as_string())
            .collect();
        return Some(SrcSet::List(candidates));
    }
    None
}
