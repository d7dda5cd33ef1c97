//! Clocks for the editor. The editor clock only has to be monotonic within a
//! session; stored preferences carry a wall-clock timestamp.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::OnceLock;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Instant, SystemTime, UNIX_EPOCH};

#[cfg(not(target_arch = "wasm32"))]
static CLOCK_START: OnceLock<Instant> = OnceLock::new();

/// Seconds since the first call in this process.
#[cfg(not(target_arch = "wasm32"))]
pub fn editor_clock_secs() -> f64 {
    CLOCK_START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Seconds since page load.
#[cfg(target_arch = "wasm32")]
pub fn editor_clock_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map_or(0.0, |performance| performance.now() / 1000.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

#[cfg(target_arch = "wasm32")]
pub fn timestamp_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn editor_clock_never_goes_back() {
        let first = editor_clock_secs();
        let second = editor_clock_secs();
        assert!(second >= first);
    }
}
