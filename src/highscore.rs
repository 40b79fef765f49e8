//! Best-score persistence
//!
//! One number in LocalStorage. Reads and writes are best-effort: any
//! storage failure is treated as "no stored value" / "write skipped".

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "lane_rush_high_score";

/// Load the stored high score, or 0 when absent or unreadable (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u64 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            if let Ok(score) = raw.parse::<u64>() {
                log::info!("Loaded high score: {}", score);
                return score;
            }
            log::warn!("Ignoring unparseable high score value");
        }
    }

    0
}

/// Persist a new high score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn store(score: u64) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if storage.set_item(STORAGE_KEY, &score.to_string()).is_ok() {
            log::info!("High score saved: {}", score);
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u64 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn store(_score: u64) {
    // No-op for native
}
