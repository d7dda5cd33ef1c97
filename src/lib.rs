#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod notification;
pub mod panels;
pub mod renderer;
pub mod selection;
pub mod shape;
pub mod state;
pub mod style;
pub mod svg;
pub mod tools;
pub mod util;

pub use app::SketchApp;
pub use command::Command;
pub use config::EditorConfig;
pub use document::Scene;
pub use error::EditorError;
pub use export::{ExportArtifact, ExportFormat, SceneSnapshot};
pub use geometry::Point;
pub use id_generator::ShapeId;
pub use input::{InputEvent, InputLocation};
pub use renderer::{DisplayList, RenderSurface};
pub use shape::{Shape, ShapeKind, ShapeTag};
pub use state::{EditorContext, EditorState, Gesture, MemoryStore};
pub use style::{Paint, ShapeStyle, StyleInputs};
pub use tools::ToolMode;
