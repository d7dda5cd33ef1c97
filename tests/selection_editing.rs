use eframe_sketch::geometry::Point;
use eframe_sketch::notification::NoticeLevel;
use eframe_sketch::renderer::RenderSurface;
use eframe_sketch::shape::ShapeKind;
use eframe_sketch::state::KeyValueStore;
use eframe_sketch::{Command, EditorContext, Gesture, InputEvent, MemoryStore, Paint, ToolMode};
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

/// Editor holding one filled rect at (10,10) 40x30, with the select tool on.
fn editor_with_filled_rect() -> EditorContext {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SetFillColor(Color32::RED));
    editor.execute(Command::SetFillEnabled(true));
    editor.execute(Command::SelectTool(ToolMode::Rect));
    drag(&mut editor, (10.0, 10.0), (50.0, 40.0));
    editor.execute(Command::SelectTool(ToolMode::Select));
    editor
}

/// Editor holding the path (0,0) (100,0) (100,100), with the select tool on.
fn editor_with_path() -> EditorContext {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SelectTool(ToolMode::Path));
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 100.0, 0.0);
    click(&mut editor, 100.0, 100.0);
    editor.handle_event(InputEvent::key(Key::Enter));
    editor.execute(Command::SelectTool(ToolMode::Select));
    editor
}

#[test]
fn test_dragging_moves_origin_keeps_extents() {
    let mut editor = editor_with_filled_rect();
    editor.handle_event(InputEvent::pointer_down(30.0, 25.0));
    assert!(matches!(editor.gesture(), Gesture::DraggingSelection { .. }));
    editor.handle_event(InputEvent::pointer_move(35.0, 30.0));
    editor.handle_event(InputEvent::pointer_move(40.0, 45.0));
    editor.handle_event(InputEvent::pointer_up(40.0, 45.0));

    let ShapeKind::Rect(rect) = &editor.scene().shapes()[0].kind else {
        panic!("expected a rect");
    };
    assert_eq!(rect.origin, Point::new(20.0, 30.0));
    assert_eq!((rect.width, rect.height), (40.0, 30.0));
    assert!(editor.gesture().is_idle());
    assert!(editor.selection().is_some());
    assert!(editor.save_pending());
}

#[test]
fn test_selection_reflects_shape_style() {
    let mut editor = editor_with_filled_rect();
    editor.execute(Command::SetFillEnabled(false));
    editor.execute(Command::SetStrokeColor(Color32::BLUE));
    assert_eq!(editor.style().stroke_color, Color32::BLUE);

    click(&mut editor, 30.0, 25.0);
    let style = editor.style();
    assert_eq!(style.stroke_color, Color32::BLACK);
    assert!(style.fill_enabled);
    assert_eq!(style.fill_color, Color32::RED);
}

#[test]
fn test_background_click_clears_selection() {
    let mut editor = editor_with_path();
    click(&mut editor, 50.0, 0.0);
    assert!(editor.selection().is_some());
    assert_eq!(editor.surface().handles().len(), 3);

    click(&mut editor, 400.0, 400.0);
    assert!(editor.selection().is_none());
    assert!(editor.surface().handles().is_empty());
    assert_eq!(editor.surface().highlight(), None);
}

#[test]
fn test_leaving_select_tool_clears_selection() {
    let mut editor = editor_with_filled_rect();
    click(&mut editor, 30.0, 25.0);
    editor.execute(Command::SelectTool(ToolMode::Line));
    assert!(editor.selection().is_none());
}

#[test]
fn test_fill_toggle_restores_stored_color() {
    let mut editor = editor_with_filled_rect();
    click(&mut editor, 30.0, 25.0);

    editor.execute(Command::SetFillEnabled(false));
    assert!(editor.scene().shapes()[0].style.fill.is_none());

    editor.execute(Command::SetFillEnabled(true));
    assert_eq!(editor.scene().shapes()[0].style.fill, Paint::Color(Color32::RED));
}

#[test]
fn test_fill_color_ignored_while_disabled() {
    let mut editor = editor_with_filled_rect();
    click(&mut editor, 30.0, 25.0);
    editor.execute(Command::SetFillEnabled(false));
    editor.execute(Command::SetFillColor(Color32::GREEN));

    assert!(editor.scene().shapes()[0].style.fill.is_none());
    assert_eq!(editor.style().fill_color, Color32::GREEN);
}

#[test]
fn test_lines_ignore_fill_changes() {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SelectTool(ToolMode::Line));
    drag(&mut editor, (0.0, 0.0), (100.0, 0.0));
    editor.execute(Command::SelectTool(ToolMode::Select));
    click(&mut editor, 50.0, 1.0);
    assert!(editor.selection().is_some());

    editor.execute(Command::SetFillEnabled(true));
    editor.execute(Command::SetFillColor(Color32::RED));
    assert!(editor.scene().shapes()[0].style.fill.is_none());
}

#[test]
fn test_invalid_stroke_width_rejected() {
    let mut editor = editor_with_filled_rect();
    click(&mut editor, 30.0, 25.0);
    editor.execute(Command::SetStrokeWidth(-3.0));
    editor.execute(Command::SetStrokeWidth(f64::NAN));

    assert_eq!(editor.scene().shapes()[0].style.stroke_width, 2.0);
    assert_eq!(editor.style().stroke_width, 2.0);
    assert!(
        editor
            .notices()
            .visible(editor.now())
            .any(|notice| notice.level == NoticeLevel::Warning)
    );
}

#[test]
fn test_delete_mid_drag() {
    let mut editor = editor_with_filled_rect();
    editor.handle_event(InputEvent::pointer_down(30.0, 25.0));
    editor.handle_event(InputEvent::pointer_move(35.0, 25.0));
    editor.handle_event(InputEvent::key(Key::Delete));

    assert!(editor.scene().is_empty());
    assert!(editor.surface().shapes().is_empty());
    assert!(editor.selection().is_none());
    assert!(editor.gesture().is_idle());

    editor.handle_event(InputEvent::pointer_move(60.0, 60.0));
    editor.handle_event(InputEvent::pointer_up(60.0, 60.0));
    assert!(editor.scene().is_empty());
}

#[test]
fn test_undo_after_delete_does_not_resurrect() {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SelectTool(ToolMode::Rect));
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
    drag(&mut editor, (100.0, 100.0), (120.0, 120.0));
    let first = editor.scene().shapes()[0].id;

    editor.execute(Command::SelectTool(ToolMode::Select));
    click(&mut editor, 100.0, 110.0);
    editor.execute(Command::DeleteSelected);
    assert_eq!(editor.scene().len(), 1);

    editor.execute(Command::Undo);
    assert!(editor.scene().is_empty());
    assert!(!editor.surface().contains(first));

    editor.execute(Command::Undo);
    assert!(editor.scene().is_empty());
}

#[test]
fn test_dragging_path_moves_points_and_handles() {
    let mut editor = editor_with_path();
    drag(&mut editor, (50.0, 0.0), (60.0, 10.0));

    let path = editor.scene().shapes()[0].as_path().unwrap();
    assert_eq!(
        path.points,
        vec![Point::new(10.0, 10.0), Point::new(110.0, 10.0), Point::new(110.0, 110.0)]
    );
    assert_eq!(editor.surface().handles(), path.points.as_slice());
}

#[test]
fn test_handle_drag_moves_one_point() {
    let mut editor = editor_with_path();
    click(&mut editor, 50.0, 0.0);

    editor.handle_event(InputEvent::pointer_down(100.0, 0.0));
    assert!(matches!(editor.gesture(), Gesture::DraggingPathHandle { index: 1, .. }));
    editor.handle_event(InputEvent::pointer_move(120.0, 10.0));
    editor.handle_event(InputEvent::pointer_up(120.0, 10.0));

    let path = editor.scene().shapes()[0].as_path().unwrap();
    assert_eq!(
        path.points,
        vec![Point::new(0.0, 0.0), Point::new(120.0, 10.0), Point::new(100.0, 100.0)]
    );
    assert_eq!(path.description(), "M 0 0 L 120 10 L 100 100");
    assert_eq!(editor.surface().handles()[1], Point::new(120.0, 10.0));
}

#[test]
fn test_desynchronized_handle_is_ignored() {
    let mut editor = editor_with_path();
    click(&mut editor, 50.0, 0.0);
    let before = editor.scene().shapes()[0].clone();

    let mut handles = editor.surface().handles().to_vec();
    handles.push(Point::new(200.0, 200.0));
    editor.surface_mut().set_handles(handles);

    editor.handle_event(InputEvent::pointer_down(200.0, 200.0));
    assert!(editor.gesture().is_idle());
    editor.handle_event(InputEvent::pointer_move(250.0, 250.0));
    editor.handle_event(InputEvent::pointer_up(250.0, 250.0));

    assert_eq!(editor.scene().shapes()[0], before);
}

#[test]
fn test_unrecognized_fill_is_reported_not_editable() {
    let mut store = MemoryStore::new();
    store
        .set(
            &EditorContext::headless().config().drawing_key,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600">
                <rect x="10" y="10" width="40" height="30" stroke="#000000" stroke-width="2" fill="url(#grad)"/>
            </svg>"##,
        )
        .unwrap();

    let mut editor = EditorContext::headless();
    editor.restore(&store);
    editor.execute(Command::SelectTool(ToolMode::Select));
    click(&mut editor, 30.0, 25.0);

    assert!(editor.selection().is_some());
    assert!(!editor.style().fill_editable);
    assert_eq!(editor.style().fill_color, Color32::WHITE);
    assert!(
        editor
            .notices()
            .visible(editor.now())
            .any(|notice| notice.level == NoticeLevel::Info)
    );
    assert!(editor.surface().serialize().contains(r##"fill="url(#grad)""##));
}
