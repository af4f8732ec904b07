//! Key-value record storage
//!
//! LocalStorage in the browser. Native builds have no persistence.

/// Read a record (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load(key: &str) -> Option<String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;
    storage.get_item(key).ok().flatten()
}

/// Write a record (WASM only). Returns true if stored.
#[cfg(target_arch = "wasm32")]
pub fn save(key: &str, value: &str) -> bool {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    match storage {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => {
            log::warn!("LocalStorage unavailable, {} not saved", key);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_key: &str, _value: &str) -> bool {
    // No-op for native
    false
}
