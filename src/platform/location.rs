//! Page URL access for share links

/// Current query string including the leading `?` (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn query() -> Option<String> {
    web_sys::window()?.location().search().ok()
}

/// Replace the query string without navigating (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn replace_query(query: &str) {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_default();
    if let Ok(history) = window.history() {
        let url = format!("{}{}", path, query);
        if history
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
            .is_err()
        {
            log::warn!("Could not update URL to {}", url);
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn query() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn replace_query(_query: &str) {
    // No URL bar natively
}
