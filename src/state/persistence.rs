use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::error::EditorError;
use crate::shape::Shape;
use crate::style::StyleInputs;
use crate::svg::{parse_document, write_document};
use crate::util::time;

/// Errors reported by a [`KeyValueStore`] write.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("storage quota exceeded ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to write to storage: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to serialize preferences: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Synchronous, best-effort string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str);

    /// Pushes buffered writes to the backing medium.
    fn flush(&mut self) {}
}

// eframe has no removal, so an empty string stands for an absent key.
impl<'a> KeyValueStore for dyn eframe::Storage + 'a {
    fn get(&self, key: &str) -> Option<String> {
        self.get_string(key).filter(|value| !value.is_empty())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_string(key, value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.set_string(key, String::new());
    }

    fn flush(&mut self) {
        eframe::Storage::flush(self);
    }
}

/// In-memory store with an optional byte quota across all entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn used_except(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let needed = self.used_except(key) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Style defaults as written to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorPrefs {
    pub style: StyleInputs,
    /// Timestamp of when the prefs were written
    pub timestamp: u64,
    /// Version of the application that wrote them
    pub version: String,
}

impl EditorPrefs {
    pub fn new(style: &StyleInputs) -> Self {
        Self {
            style: style.clone(),
            timestamp: time::timestamp_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A single pending deadline. Scheduling again replaces the old deadline, so
/// at most one save is ever outstanding.
#[derive(Debug, Clone, PartialEq)]
pub struct DebouncedSave {
    delay: f64,
    deadline: Option<f64>,
}

impl DebouncedSave {
    pub fn new(delay_secs: f64) -> Self {
        Self {
            delay: delay_secs,
            deadline: None,
        }
    }

    /// Cancels any pending deadline and arms a new one `delay` after `now`.
    pub fn schedule(&mut self, now: f64) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn time_until_due(&self, now: f64) -> Option<f64> {
        self.deadline.map(|deadline| (deadline - now).max(0.0))
    }

    /// True exactly once when the deadline has passed.
    pub fn take_due(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Writes the drawing and style defaults to a store, debounced or on demand,
/// and reads them back on startup.
#[derive(Debug, Clone)]
pub struct PersistenceCoordinator {
    drawing_key: String,
    prefs_key: String,
    debounce: DebouncedSave,
}

impl PersistenceCoordinator {
    pub fn new(drawing_key: impl Into<String>, prefs_key: impl Into<String>, delay_secs: f64) -> Self {
        Self {
            drawing_key: drawing_key.into(),
            prefs_key: prefs_key.into(),
            debounce: DebouncedSave::new(delay_secs),
        }
    }

    pub fn debounce(&self) -> &DebouncedSave {
        &self.debounce
    }

    pub fn schedule(&mut self, now: f64) {
        self.debounce.schedule(now);
    }

    /// True once the pending save's deadline has passed; the deadline is
    /// consumed.
    pub fn take_due(&mut self, now: f64) -> bool {
        self.debounce.take_due(now)
    }

    /// Drops the pending save without writing anything.
    pub fn discard_pending(&mut self) {
        self.debounce.cancel();
    }

    /// Writes the scene and style right away, cancelling any pending
    /// debounced save.
    pub fn save<'a, K: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut K,
        shapes: impl IntoIterator<Item = &'a Shape>,
        size: (f64, f64),
        style: &StyleInputs,
    ) -> PersistenceResult<()> {
        self.debounce.cancel();
        let drawing = write_document(shapes, size.0, size.1);
        store.set(&self.drawing_key, &drawing)?;
        let prefs = serde_json::to_string(&EditorPrefs::new(style))?;
        store.set(&self.prefs_key, &prefs)?;
        store.flush();
        log::info!("Saved drawing ({} bytes)", drawing.len());
        Ok(())
    }

    /// Parses a stored drawing.
    pub fn decode_drawing(raw: &str) -> Result<Vec<Shape>, EditorError> {
        let parsed = parse_document(raw).map_err(|err| EditorError::MalformedPersistedData(err.to_string()))?;
        if parsed.skipped > 0 {
            log::warn!("Dropped {} unreadable shapes from the saved drawing", parsed.skipped);
        }
        Ok(parsed.shapes)
    }

    /// Shapes of the stored drawing. Missing or malformed data yields an
    /// empty drawing.
    pub fn load_scene<K: KeyValueStore + ?Sized>(&self, store: &K) -> Vec<Shape> {
        let Some(raw) = store.get(&self.drawing_key) else {
            log::debug!("No saved drawing under '{}'", self.drawing_key);
            return Vec::new();
        };
        match Self::decode_drawing(&raw) {
            Ok(shapes) => shapes,
            Err(err) => {
                log::info!("Starting with an empty drawing: {}", err);
                Vec::new()
            }
        }
    }

    pub fn load_prefs<K: KeyValueStore + ?Sized>(&self, store: &K) -> Option<StyleInputs> {
        let raw = store.get(&self.prefs_key)?;
        let prefs: EditorPrefs = match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!("Ignoring unreadable style preferences: {}", err);
                return None;
            }
        };
        if prefs.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Preferences version {} differs from current version {}",
                prefs.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Some(prefs.style)
    }
}
