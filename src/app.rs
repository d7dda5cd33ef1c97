use std::time::Duration;

use crate::command::Command;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::export::{ExportArtifact, ExportFormat};
use crate::file_handler::{Delivery, FileHandler};
use crate::input::InputHandler;
use crate::notification::NoticeLevel;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::DisplayList;
use crate::state::EditorContext;
use crate::util::time::editor_clock_secs;

#[cfg(not(target_arch = "wasm32"))]
use crate::export::ExportError;
#[cfg(not(target_arch = "wasm32"))]
use futures::channel::oneshot;

/// A raster export running on a worker thread.
#[cfg(not(target_arch = "wasm32"))]
struct ExportJob {
    format: ExportFormat,
    receiver: oneshot::Receiver<Result<ExportArtifact, ExportError>>,
}

pub struct SketchApp {
    editor: EditorContext<DisplayList>,
    input: InputHandler,
    #[cfg(not(target_arch = "wasm32"))]
    export_jobs: Vec<ExportJob>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_editor(EditorContext::headless())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let Some(storage) = cc.storage else {
            log::warn!("No persistent storage available; the drawing will not be saved");
            return Self::default();
        };
        let config = EditorConfig::load(storage);
        let surface = DisplayList::new(config.canvas_width, config.canvas_height);
        let mut editor = EditorContext::new(config, surface);
        editor.set_now(editor_clock_secs());
        editor.restore(storage);
        Self::with_editor(editor)
    }

    fn with_editor(editor: EditorContext<DisplayList>) -> Self {
        Self {
            editor,
            input: InputHandler::new(),
            #[cfg(not(target_arch = "wasm32"))]
            export_jobs: Vec::new(),
        }
    }

    pub fn editor(&self) -> &EditorContext<DisplayList> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext<DisplayList> {
        &mut self.editor
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    /// Runs a toolbar command. Exports go through [`Self::request_export`].
    pub fn run(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::Export(format) => self.request_export(ctx, format),
            command => {
                self.editor.execute(command);
            }
        }
    }

    pub fn exports_in_flight(&self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.export_jobs.len()
        }
        #[cfg(target_arch = "wasm32")]
        {
            0
        }
    }

    /// Starts an export. SVG is cheap and always written inline; raster
    /// formats render on a worker thread where threads are available.
    pub fn request_export(&mut self, ctx: &egui::Context, format: ExportFormat) {
        if format != ExportFormat::Svg && self.spawn_export(ctx, format) {
            return;
        }
        if let Some(artifact) = self.editor.execute(Command::Export(format)) {
            self.deliver(&artifact);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn_export(&mut self, ctx: &egui::Context, format: ExportFormat) -> bool {
        let snapshot = self.editor.snapshot();
        let (sender, receiver) = oneshot::channel();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            if sender.send(snapshot.export(format)).is_err() {
                log::debug!("{} export finished after the editor went away", format.label());
            }
            ctx.request_repaint();
        });
        log::info!("Started {} export", format.label());
        self.export_jobs.push(ExportJob { format, receiver });
        true
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn_export(&mut self, _ctx: &egui::Context, _format: ExportFormat) -> bool {
        false
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn poll_exports(&mut self) {
        let mut finished = Vec::new();
        self.export_jobs.retain_mut(|job| match job.receiver.try_recv() {
            Ok(Some(result)) => {
                finished.push(result);
                false
            }
            Ok(None) => true,
            Err(oneshot::Canceled) => {
                log::error!("{} export worker stopped without a result", job.format.label());
                false
            }
        });

        for result in finished {
            match result {
                Ok(artifact) => {
                    log::info!("Exported {} ({} bytes)", artifact.file_name, artifact.bytes.len());
                    self.deliver(&artifact);
                }
                Err(err) => self.editor.report(EditorError::ExportFailure(err)),
            }
        }
    }

    fn deliver(&mut self, artifact: &ExportArtifact) {
        match FileHandler::deliver(artifact) {
            Ok(Delivery::Saved) => {}
            Ok(Delivery::Cancelled) => log::debug!("Export of {} cancelled", artifact.file_name),
            Err(err) => {
                log::error!("Could not deliver {}: {}", artifact.file_name, err);
                self.editor.notify(NoticeLevel::Alert, format!("Export failed: {err}"));
            }
        }
    }
}

impl eframe::App for SketchApp {
    /// Page exit (or window close): save right away instead of waiting for
    /// the debounce.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.editor.flush(storage);
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.editor.set_now(editor_clock_secs());

        tools_panel(self, ctx);
        central_panel(self, ctx);

        #[cfg(not(target_arch = "wasm32"))]
        self.poll_exports();

        match frame.storage_mut() {
            Some(storage) => {
                self.editor.tick(storage);
            }
            None => self.editor.discard_pending_save(),
        }

        if let Some(wait) = self.editor.next_wakeup() {
            ctx.request_repaint_after(Duration::from_secs_f64(wait.max(0.0)));
        }
    }
}
