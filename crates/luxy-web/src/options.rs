//! Adapts the JS options object to [`Options::read`].

use luxy_core::{LuxyError, OptionValue, Options, Result};
use wasm_bindgen::JsValue;

pub fn parse(value: &JsValue) -> Result<Options> {
    Options::read(classify(value), |key| {
        js_sys::Reflect::get(value, &JsValue::from_str(key))
            .map(|v| classify(&v))
            .map_err(|e| LuxyError::InvalidOption {
                key: key.to_owned(),
                reason: format!("{:?}", e),
            })
    })
}

fn classify(v: &JsValue) -> OptionValue {
    if v.is_undefined() || v.is_null() {
        OptionValue::Missing
    } else if let Some(s) = v.as_string() {
        OptionValue::Str(s)
    } else if let Some(n) = v.as_f64() {
        OptionValue::Number(n)
    } else if let Some(b) = v.as_bool() {
        OptionValue::Bool(b)
    } else if v.is_object() {
        OptionValue::Object
    } else {
        OptionValue::Other
    }
}
