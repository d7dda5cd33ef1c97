//! Tunables for the editor. Every field has a default, so a stored override
//! only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::geometry::hit_testing::{HANDLE_RADIUS, MIN_HIT_TOLERANCE};
use crate::state::persistence::KeyValueStore;
use crate::style::StyleInputs;

/// Store key of an optional JSON override for [`EditorConfig`].
pub const CONFIG_KEY: &str = "editor-svg-config-v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Key the serialized drawing is written under.
    pub drawing_key: String,
    /// Key the style preferences are written under.
    pub prefs_key: String,
    /// Quiet period before a scheduled save fires, in milliseconds.
    pub save_debounce_ms: u64,
    /// Drawing surface size in pixels; also the raster export size.
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub hit_tolerance: f64,
    pub handle_radius: f64,
    /// Extent of the hover preview drawn under the pointer.
    pub preview_size: f64,
    pub notice_duration_secs: f64,
    pub default_style: StyleInputs,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drawing_key: "editor-svg-drawing-v1".to_owned(),
            prefs_key: "editor-svg-prefs-v1".to_owned(),
            save_debounce_ms: 700,
            canvas_width: 800.0,
            canvas_height: 600.0,
            hit_tolerance: MIN_HIT_TOLERANCE,
            handle_radius: HANDLE_RADIUS,
            preview_size: 40.0,
            notice_duration_secs: 3.0,
            default_style: StyleInputs::default(),
        }
    }
}

impl EditorConfig {
    pub fn save_debounce_secs(&self) -> f64 {
        self.save_debounce_ms as f64 / 1000.0
    }

    /// Reads the override stored under [`CONFIG_KEY`]. A missing or unreadable
    /// override falls back to the defaults.
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Self {
        let Some(raw) = store.get(CONFIG_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<EditorConfig>(&raw) {
            Ok(config) => {
                log::info!("Loaded editor config override");
                config
            }
            Err(err) => {
                log::warn!("Ignoring invalid editor config: {}", err);
                Self::default()
            }
        }
    }
}
