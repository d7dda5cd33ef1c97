use eframe_sketch::config::{CONFIG_KEY, EditorConfig};
use eframe_sketch::renderer::RenderSurface;
use eframe_sketch::shape::ShapeKind;
use eframe_sketch::state::KeyValueStore;
use eframe_sketch::{Command, EditorContext, InputEvent, MemoryStore, Paint, ToolMode};
use egui::{Color32, Key};

fn drag(editor: &mut EditorContext, from: (f64, f64), to: (f64, f64)) {
    editor.handle_event(InputEvent::pointer_down(from.0, from.1));
    editor.handle_event(InputEvent::pointer_move(to.0, to.1));
    editor.handle_event(InputEvent::pointer_up(to.0, to.1));
}

fn click(editor: &mut EditorContext, x: f64, y: f64) {
    editor.handle_event(InputEvent::pointer_down(x, y));
    editor.handle_event(InputEvent::pointer_up(x, y));
}

fn sample_drawing() -> EditorContext {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SelectTool(ToolMode::Line));
    drag(&mut editor, (0.0, 0.0), (100.0, 50.0));

    editor.execute(Command::SetFillColor(Color32::from_rgb(0x33, 0x66, 0x99)));
    editor.execute(Command::SetFillEnabled(true));
    editor.execute(Command::SelectTool(ToolMode::Rect));
    drag(&mut editor, (10.0, 10.0), (50.0, 40.0));

    editor.execute(Command::SetStrokeWidth(4.0));
    editor.execute(Command::SelectTool(ToolMode::Ellipse));
    drag(&mut editor, (200.0, 200.0), (260.0, 240.0));

    editor.execute(Command::SelectTool(ToolMode::Path));
    click(&mut editor, 300.0, 300.0);
    click(&mut editor, 350.0, 310.0);
    click(&mut editor, 320.0, 380.0);
    editor.handle_event(InputEvent::key(Key::Enter));
    editor
}

#[test]
fn test_save_and_restore_round_trip() {
    let mut editor = sample_drawing();
    let mut store = MemoryStore::new();
    editor.flush(&mut store);

    let mut restored = EditorContext::headless();
    restored.restore(&store);

    let original = editor.scene().shapes();
    let loaded = restored.scene().shapes();
    assert_eq!(loaded.len(), original.len());
    for (a, b) in original.iter().zip(loaded) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.style, b.style);
        assert_ne!(a.id, b.id, "restored shapes get fresh identities");
    }
    assert_eq!(restored.surface().shapes().len(), original.len());
    assert_eq!(restored.style().stroke_width, 4.0);
    assert!(restored.style().fill_enabled);
}

#[test]
fn test_restored_shapes_are_undoable() {
    let mut editor = sample_drawing();
    let mut store = MemoryStore::new();
    editor.flush(&mut store);

    let mut restored = EditorContext::headless();
    restored.restore(&store);
    restored.execute(Command::Undo);
    assert_eq!(restored.scene().len(), 3);
    assert!(matches!(restored.scene().shapes()[2].kind, ShapeKind::Ellipse(_)));
}

#[test]
fn test_malformed_drawing_restores_empty() {
    let mut store = MemoryStore::new();
    let key = EditorConfig::default().drawing_key;
    store.set(&key, "<<< definitely not svg").unwrap();

    let mut editor = EditorContext::headless();
    editor.restore(&store);
    assert!(editor.scene().is_empty());
    assert!(editor.surface().shapes().is_empty());
}

#[test]
fn test_missing_drawing_restores_empty() {
    let mut editor = EditorContext::headless();
    editor.restore(&MemoryStore::new());
    assert!(editor.scene().is_empty());
}

#[test]
fn test_unsupported_elements_are_skipped() {
    let mut store = MemoryStore::new();
    let key = EditorConfig::default().drawing_key;
    store
        .set(
            &key,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600">
                <!-- handles left over from an editing session -->
                <circle cx="5" cy="5" r="5"/>
                <path d="M 0 0 C 10 10 20 20 30 30" stroke="black"/>
                <g><line x1="0" y1="0" x2="10" y2="10" stroke="red" stroke-width="3"/></g>
            </svg>"#,
        )
        .unwrap();

    let mut editor = EditorContext::headless();
    editor.restore(&store);
    assert_eq!(editor.scene().len(), 1);
    let line = &editor.scene().shapes()[0];
    assert_eq!(line.style.stroke_color, Color32::RED);
    assert_eq!(line.style.stroke_width, 3.0);
    assert_eq!(line.style.fill, Paint::None);
}

#[test]
fn test_saves_are_debounced() {
    let mut editor = EditorContext::headless();
    let mut store = MemoryStore::new();
    editor.execute(Command::SelectTool(ToolMode::Rect));

    editor.set_now(10.0);
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
    assert!(editor.save_pending());
    editor.set_now(10.3);
    drag(&mut editor, (20.0, 20.0), (30.0, 30.0));

    editor.set_now(10.9);
    assert!(!editor.tick(&mut store));
    assert_eq!(store.writes(), 0);

    editor.set_now(11.01);
    assert!(editor.tick(&mut store));
    assert!(!editor.save_pending());
    // One drawing write and one preferences write.
    assert_eq!(store.writes(), 2);

    editor.set_now(20.0);
    assert!(!editor.tick(&mut store));
    assert_eq!(store.writes(), 2);
}

#[test]
fn test_next_wakeup_tracks_debounce() {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SelectTool(ToolMode::Rect));
    editor.set_now(5.0);
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));

    let wait = editor.next_wakeup().unwrap();
    assert!((wait - 0.7).abs() < 1e-9);
}

#[test]
fn test_editing_without_store_stops_waking() {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SelectTool(ToolMode::Rect));
    editor.set_now(1.0);
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));

    editor.set_now(2.0);
    assert_eq!(editor.next_wakeup(), Some(0.0));

    editor.discard_pending_save();
    assert!(!editor.save_pending());
    assert_eq!(editor.next_wakeup(), None);

    editor.set_now(3600.0);
    assert_eq!(editor.next_wakeup(), None);
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn test_tick_consumes_deadline_once() {
    let mut editor = EditorContext::headless();
    let mut store = MemoryStore::new();
    editor.execute(Command::SelectTool(ToolMode::Line));
    editor.set_now(0.0);
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));

    editor.set_now(1.0);
    assert!(editor.tick(&mut store));
    assert_eq!(editor.next_wakeup(), None);
    assert!(!editor.tick(&mut store));
}

#[test]
fn test_quota_failure_does_not_block_editing() {
    let mut editor = EditorContext::headless();
    let mut store = MemoryStore::with_quota(16);
    editor.execute(Command::SelectTool(ToolMode::Rect));
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));

    editor.flush(&mut store);
    assert_eq!(store.writes(), 0);

    drag(&mut editor, (20.0, 20.0), (30.0, 30.0));
    assert_eq!(editor.scene().len(), 2);
}

#[test]
fn test_config_override_changes_keys() {
    let mut store = MemoryStore::new();
    store
        .set(CONFIG_KEY, r#"{ "drawing_key": "custom-drawing", "save_debounce_ms": 100 }"#)
        .unwrap();

    let config = EditorConfig::load(&store);
    assert_eq!(config.drawing_key, "custom-drawing");
    assert_eq!(config.save_debounce_ms, 100);
    assert_eq!(config.prefs_key, EditorConfig::default().prefs_key);

    let mut editor = EditorContext::new(
        config,
        eframe_sketch::DisplayList::new(800.0, 600.0),
    );
    editor.execute(Command::SelectTool(ToolMode::Line));
    drag(&mut editor, (0.0, 0.0), (5.0, 5.0));
    editor.flush(&mut store);
    assert!(store.get("custom-drawing").is_some());
}
