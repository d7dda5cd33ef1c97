mod editor_state;
pub mod context;
pub mod persistence;

pub use editor_state::{EditorState, Gesture};
pub use context::EditorContext;
pub use persistence::{
    DebouncedSave,
    EditorPrefs,
    KeyValueStore,
    MemoryStore,
    PersistenceCoordinator,
    PersistenceError,
    PersistenceResult,
    StoreError,
};
