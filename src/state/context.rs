//! The main context for the editor, owning every piece of editing state and
//! routing input to the tool handlers.
//!
//! `EditorContext` is the only mutator of the scene, the render surface and
//! the selection. All transitions run to completion inside
//! [`EditorContext::handle_event`] or [`EditorContext::execute`]; errors raised
//! along the way are reported (as a notice or a log line) and never leave the
//! state machine half-updated.
//!
//! # Example
//!
//! ```rust
//! use eframe_sketch::{Command, EditorContext, InputEvent, ToolMode};
//!
//! let mut editor = EditorContext::headless();
//! editor.execute(Command::SelectTool(ToolMode::Rect));
//! editor.handle_event(InputEvent::pointer_down(10.0, 10.0));
//! editor.handle_event(InputEvent::pointer_move(50.0, 40.0));
//! editor.handle_event(InputEvent::pointer_up(50.0, 40.0));
//! assert_eq!(editor.scene().len(), 1);
//! ```

use egui::{Key, Modifiers};

use super::editor_state::{EditorState, Gesture};
use super::persistence::{KeyValueStore, PersistenceCoordinator};
use crate::command::Command;
use crate::config::EditorConfig;
use crate::document::Scene;
use crate::error::EditorError;
use crate::export::{ExportArtifact, ExportFormat, SceneSnapshot};
use crate::geometry::Point;
use crate::input::InputEvent;
use crate::notification::{NoticeLevel, Notifications};
use crate::renderer::{DisplayList, RenderSurface};
use crate::shape::Shape;
use crate::style::StyleInputs;
use crate::tools::ToolMode;

pub struct EditorContext<S: RenderSurface = DisplayList> {
    pub(crate) state: EditorState,
    pub(crate) scene: Scene,
    pub(crate) surface: S,
    pub(crate) persistence: PersistenceCoordinator,
    pub(crate) notices: Notifications,
    pub(crate) config: EditorConfig,
    /// Editor clock in seconds, advanced by the host.
    pub(crate) now: f64,
}

impl EditorContext<DisplayList> {
    /// An editor over a fresh display list with the default configuration.
    pub fn headless() -> Self {
        let config = EditorConfig::default();
        let surface = DisplayList::new(config.canvas_width, config.canvas_height);
        Self::new(config, surface)
    }
}

impl<S: RenderSurface> EditorContext<S> {
    pub fn new(config: EditorConfig, mut surface: S) -> Self {
        surface.set_size(config.canvas_width, config.canvas_height);
        Self {
            state: EditorState::new(config.default_style.clone()),
            scene: Scene::new(),
            surface,
            persistence: PersistenceCoordinator::new(
                config.drawing_key.clone(),
                config.prefs_key.clone(),
                config.save_debounce_secs(),
            ),
            notices: Notifications::new(config.notice_duration_secs),
            config,
            now: 0.0,
        }
    }

    pub fn set_now(&mut self, now: f64) {
        self.now = now;
        self.notices.prune(now);
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool(&self) -> ToolMode {
        self.state.tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.state.gesture
    }

    pub fn selection(&self) -> Option<&Shape> {
        self.state.selection.and_then(|id| self.scene.get(id))
    }

    pub fn style(&self) -> &StyleInputs {
        &self.state.style
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn notices(&self) -> &Notifications {
        &self.notices
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn save_pending(&self) -> bool {
        self.persistence.debounce().is_pending()
    }

    /// Seconds until the editor next needs attention (a save or a notice
    /// expiring), so the host can schedule a repaint.
    pub fn next_wakeup(&self) -> Option<f64> {
        let save = self.persistence.debounce().time_until_due(self.now);
        let notice = self.notices.next_expiry().map(|at| (at - self.now).max(0.0));
        match (save, notice) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Feeds one input event through the state machine.
    pub fn handle_event(&mut self, event: InputEvent) {
        let before = self.state.gesture.name();
        let result = match event {
            InputEvent::PointerDown { location } => self.pointer_down(location.position),
            InputEvent::PointerMove { location } => self.pointer_move(location.position),
            InputEvent::PointerUp { location } => self.pointer_up(location.position),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::DoubleClick { .. } => self.double_click(),
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
        };
        if let Err(err) = result {
            self.report(err);
        }
        let after = self.state.gesture.name();
        if before != after {
            log::debug!("Gesture {} -> {}", before, after);
        }
    }

    /// Runs a user command. Returns the artifact of a successful export.
    pub fn execute(&mut self, command: Command) -> Option<ExportArtifact> {
        let result = match command {
            Command::SelectTool(tool) => {
                self.select_tool(tool);
                Ok(())
            }
            Command::SetStrokeColor(color) => {
                self.set_stroke_color(color);
                Ok(())
            }
            Command::SetFillColor(color) => {
                self.set_fill_color(color);
                Ok(())
            }
            Command::SetFillEnabled(enabled) => {
                self.set_fill_enabled(enabled);
                Ok(())
            }
            Command::SetStrokeWidth(width) => self.set_stroke_width(width),
            Command::DeleteSelected => {
                self.delete_selected();
                Ok(())
            }
            Command::Undo => {
                self.undo();
                Ok(())
            }
            Command::Export(format) => match self.export(format) {
                Ok(artifact) => return Some(artifact),
                Err(err) => Err(err),
            },
        };
        if let Err(err) = result {
            self.report(err);
        }
        None
    }

    /// Turns an error into the matching user notice or log line.
    pub fn report(&mut self, err: EditorError) {
        match &err {
            EditorError::InvalidGesture(message) => {
                log::debug!("Rejected gesture: {}", message);
                self.notices.push(NoticeLevel::Warning, message.clone(), self.now);
            }
            EditorError::PersistenceFailure(_) => {
                log::warn!("{}; continuing without saving", err);
            }
            EditorError::MalformedPersistedData(_) => {
                log::info!("{}", err);
            }
            EditorError::ExportFailure(_) => {
                log::error!("{}", err);
                self.notices.push(NoticeLevel::Alert, err.to_string(), self.now);
            }
            EditorError::HandleIndexOutOfRange { .. } => {
                log::warn!("Ignoring handle drag: {}", err);
            }
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(level, message, self.now);
    }

    fn pointer_down(&mut self, pos: Point) -> Result<(), EditorError> {
        match self.state.tool {
            ToolMode::None => Err(EditorError::invalid_gesture("Select a tool before drawing")),
            ToolMode::Line | ToolMode::Rect | ToolMode::Ellipse => self.begin_shape(pos),
            ToolMode::Path => self.add_path_point(pos),
            ToolMode::Select => self.select_at(pos),
        }
    }

    fn pointer_move(&mut self, pos: Point) -> Result<(), EditorError> {
        match &self.state.gesture {
            Gesture::Idle => {
                self.update_preview(pos);
                Ok(())
            }
            Gesture::DrawingShape { .. } => {
                self.resize_shape(pos);
                Ok(())
            }
            Gesture::DrawingPath { .. } => {
                self.preview_path_segment(Some(pos));
                Ok(())
            }
            Gesture::DraggingSelection { .. } => {
                self.drag_selection(pos);
                Ok(())
            }
            Gesture::DraggingPathHandle { .. } => self.drag_handle(pos),
        }
    }

    fn pointer_up(&mut self, _pos: Point) -> Result<(), EditorError> {
        self.surface.set_preview(None);
        match std::mem::take(&mut self.state.gesture) {
            Gesture::DrawingShape { shape, .. } => self.commit_shape(shape),
            // Paths are built by clicks, so releasing keeps the gesture.
            gesture @ Gesture::DrawingPath { .. } => self.state.gesture = gesture,
            Gesture::DraggingSelection { .. } | Gesture::DraggingPathHandle { .. } | Gesture::Idle => {}
        }
        Ok(())
    }

    fn pointer_leave(&mut self) -> Result<(), EditorError> {
        self.surface.set_preview(None);
        match std::mem::take(&mut self.state.gesture) {
            Gesture::DrawingShape { shape, .. } => {
                self.surface.remove(shape.id);
                log::debug!("Abandoned {} drawn off the canvas", shape.tag().name());
            }
            gesture @ Gesture::DrawingPath { .. } => {
                self.state.gesture = gesture;
                self.preview_path_segment(None);
            }
            Gesture::DraggingSelection { .. } | Gesture::DraggingPathHandle { .. } | Gesture::Idle => {}
        }
        Ok(())
    }

    fn double_click(&mut self) -> Result<(), EditorError> {
        if matches!(self.state.gesture, Gesture::DrawingPath { .. }) {
            self.finalize_path()?;
        }
        Ok(())
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers) -> Result<(), EditorError> {
        let drawing_path = matches!(self.state.gesture, Gesture::DrawingPath { .. });
        match key {
            Key::Enter if drawing_path => self.finalize_path()?,
            Key::Escape if drawing_path => self.cancel_path(),
            Key::Z if modifiers.command || modifiers.ctrl || modifiers.mac_cmd => self.undo(),
            Key::Delete => self.delete_selected(),
            _ => {}
        }
        Ok(())
    }

    /// Switches tools. Any draw in progress is discarded, and leaving the
    /// select tool drops the selection.
    pub fn select_tool(&mut self, tool: ToolMode) {
        let previous = self.state.tool;
        match std::mem::take(&mut self.state.gesture) {
            Gesture::DrawingShape { shape, .. } | Gesture::DrawingPath { path: shape } => {
                self.surface.remove(shape.id);
                log::debug!("Discarded unfinished {}", shape.tag().name());
            }
            _ => {}
        }
        if previous == ToolMode::Select && tool != ToolMode::Select {
            self.clear_selection();
        }
        self.surface.set_preview(None);
        self.state.tool = tool;
        if previous != tool {
            log::info!("Tool changed: {} -> {}", previous.name(), tool.name());
        }
    }

    /// Pops the most recent surviving shape off the scene.
    pub fn undo(&mut self) {
        let Some(shape) = self.scene.pop_last() else {
            log::debug!("Nothing to undo");
            return;
        };
        self.surface.remove(shape.id);
        if self.state.selection == Some(shape.id) {
            self.clear_selection();
        }
        log::info!("Undid {} {}", shape.tag().name(), shape.id);
        self.schedule_save();
    }

    /// Commits a finished shape: appended to the scene and kept on display.
    pub(crate) fn commit_shape(&mut self, shape: Shape) {
        if !self.surface.update(&shape) {
            self.surface.add(&shape);
        }
        log::info!("Committed {} {}", shape.tag().name(), shape.id);
        self.scene.append(shape);
        self.schedule_save();
    }

    pub(crate) fn schedule_save(&mut self) {
        self.persistence.schedule(self.now);
    }

    /// Fires the debounced save if its deadline has passed. Returns true when
    /// a save was attempted.
    pub fn tick<K: KeyValueStore + ?Sized>(&mut self, store: &mut K) -> bool {
        if !self.persistence.take_due(self.now) {
            return false;
        }
        self.flush(store);
        true
    }

    /// Drops a pending debounced save. Hosts without a store call this so the
    /// deadline does not keep waking them.
    pub fn discard_pending_save(&mut self) {
        if self.persistence.debounce().is_pending() {
            log::debug!("No store available; dropping the pending save");
        }
        self.persistence.discard_pending();
    }

    /// Saves immediately, e.g. when the page is closing.
    pub fn flush<K: KeyValueStore + ?Sized>(&mut self, store: &mut K) {
        let size = self.surface.size();
        if let Err(err) = self
            .persistence
            .save(store, self.scene.iter(), size, &self.state.style)
        {
            self.report(err.into());
        }
    }

    /// Replaces the drawing and style defaults with what `store` holds.
    pub fn restore<K: KeyValueStore + ?Sized>(&mut self, store: &K) {
        if let Some(style) = self.persistence.load_prefs(store) {
            self.state.style = StyleInputs {
                fill_editable: true,
                ..style
            };
        }

        let shapes = self.persistence.load_scene(store);
        self.state.gesture = Gesture::Idle;
        self.state.selection = None;
        self.surface.clear();
        for shape in &shapes {
            self.surface.add(shape);
        }
        log::info!("Restored {} shapes", shapes.len());
        self.scene.replace_all(shapes);
    }

    /// Copy of the committed drawing for export.
    pub fn snapshot(&self) -> SceneSnapshot {
        let (width, height) = self.surface.size();
        SceneSnapshot::new(self.scene.shapes().to_vec(), width, height)
    }

    /// Exports the current drawing synchronously.
    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, EditorError> {
        let artifact = self.snapshot().export(format)?;
        log::info!("Exported {} ({} bytes)", artifact.file_name, artifact.bytes.len());
        Ok(artifact)
    }
}
