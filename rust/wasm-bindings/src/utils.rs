use wasm_bindgen::JsValue;

/// Set panic hook for better error messages in the browser
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Convert a viewer or geometry error into a JS exception value
pub(crate) fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Report a recoverable failure on the browser console
pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&format!("[SceneView] {}", message).into());
}

/// Read a `[x, y, z]` triple from a JS number array
pub(crate) fn vec3(values: &[f64], what: &str) -> Result<[f64; 3], JsValue> {
    match values {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(JsValue::from_str(&format!(
            "{} must have 3 components, got {}",
            what,
            values.len()
        ))),
    }
}
