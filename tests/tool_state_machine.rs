use eframe_sketch::geometry::Point;
use eframe_sketch::notification::NoticeLevel;
use eframe_sketch::renderer::RenderSurface;
use eframe_sketch::shape::ShapeKind;
use eframe_sketch::{Command, EditorContext, Gesture, InputEvent, ToolMode};
use egui::Key;

fn editor_with(tool: ToolMode) -> EditorContext {
    let mut editor = EditorContext::headless();
    editor.execute(Command::SelectTool(tool));
    editor
}

fn drag(editor: &mut EditorContext, from: (f64, f64), to: (f64, f64)) {
    editor.handle_event(InputEvent::pointer_down(from.0, from.1));
    editor.handle_event(InputEvent::pointer_move(to.0, to.1));
    editor.handle_event(InputEvent::pointer_up(to.0, to.1));
}

fn click(editor: &mut EditorContext, x: f64, y: f64) {
    editor.handle_event(InputEvent::pointer_down(x, y));
    editor.handle_event(InputEvent::pointer_up(x, y));
}

fn has_notice(editor: &EditorContext, level: NoticeLevel, text: &str) -> bool {
    editor
        .notices()
        .visible(editor.now())
        .any(|notice| notice.level == level && notice.message.contains(text))
}

#[test]
fn test_rect_select_restyle_undo_scenario() {
    let mut editor = editor_with(ToolMode::Rect);
    drag(&mut editor, (10.0, 10.0), (50.0, 40.0));

    assert_eq!(editor.scene().len(), 1);
    let ShapeKind::Rect(rect) = &editor.scene().shapes()[0].kind else {
        panic!("expected a rect");
    };
    assert_eq!(rect.origin, Point::new(10.0, 10.0));
    assert_eq!((rect.width, rect.height), (40.0, 30.0));

    editor.execute(Command::SelectTool(ToolMode::Select));
    click(&mut editor, 11.0, 25.0);
    assert!(editor.selection().is_some());

    editor.execute(Command::SetStrokeWidth(5.0));
    assert_eq!(editor.scene().shapes()[0].style.stroke_width, 5.0);
    assert_eq!(editor.style().stroke_width, 5.0);

    editor.handle_event(InputEvent::command_key(Key::Z));
    assert!(editor.scene().is_empty());
    assert!(editor.selection().is_none());
    assert!(editor.surface().shapes().is_empty());
}

#[test]
fn test_new_shapes_use_latest_width() {
    let mut editor = editor_with(ToolMode::Rect);
    editor.execute(Command::SetStrokeWidth(5.0));
    editor.execute(Command::SelectTool(ToolMode::Ellipse));
    drag(&mut editor, (0.0, 0.0), (20.0, 20.0));
    assert_eq!(editor.scene().shapes()[0].style.stroke_width, 5.0);
}

#[test]
fn test_pointer_down_without_tool_warns() {
    let mut editor = EditorContext::headless();
    drag(&mut editor, (10.0, 10.0), (50.0, 40.0));
    assert!(editor.scene().is_empty());
    assert!(editor.gesture().is_idle());
    assert!(has_notice(&editor, NoticeLevel::Warning, "Select a tool"));
}

#[test]
fn test_shape_follows_pointer_until_release() {
    let mut editor = editor_with(ToolMode::Line);
    editor.handle_event(InputEvent::pointer_down(0.0, 0.0));
    editor.handle_event(InputEvent::pointer_move(30.0, 10.0));
    editor.handle_event(InputEvent::pointer_move(60.0, 20.0));

    assert!(matches!(editor.gesture(), Gesture::DrawingShape { .. }));
    assert!(editor.gesture().in_progress_shape().is_some());
    assert!(editor.scene().is_empty());
    let Some(ShapeKind::Line(line)) = editor.surface().shapes().first().map(|shape| &shape.kind) else {
        panic!("expected the line on display");
    };
    assert_eq!(line.p2, Point::new(60.0, 20.0));

    editor.handle_event(InputEvent::pointer_up(60.0, 20.0));
    assert!(editor.gesture().is_idle());
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn test_leaving_canvas_abandons_drawing_shape() {
    let mut editor = editor_with(ToolMode::Rect);
    editor.handle_event(InputEvent::pointer_down(10.0, 10.0));
    editor.handle_event(InputEvent::pointer_move(40.0, 40.0));
    editor.handle_event(InputEvent::PointerLeave);

    assert!(editor.gesture().is_idle());
    assert!(editor.scene().is_empty());
    assert!(editor.surface().shapes().is_empty());
}

#[test]
fn test_hover_preview_only_while_idle() {
    let mut editor = editor_with(ToolMode::Ellipse);
    editor.handle_event(InputEvent::pointer_move(100.0, 100.0));
    assert!(editor.surface().preview().is_some());

    editor.handle_event(InputEvent::pointer_down(100.0, 100.0));
    assert!(editor.surface().preview().is_none());
    editor.handle_event(InputEvent::pointer_up(120.0, 120.0));

    // The preview never takes part in hit testing.
    editor.handle_event(InputEvent::pointer_move(300.0, 300.0));
    assert!(editor.surface().preview().is_some());
    assert_eq!(editor.surface().hit_test(Point::new(300.0, 280.0), 4.0), None);
}

#[test]
fn test_path_tool_has_no_hover_preview() {
    let mut editor = editor_with(ToolMode::Path);
    editor.handle_event(InputEvent::pointer_move(50.0, 50.0));
    assert!(editor.surface().preview().is_none());
}

#[test]
fn test_path_clicks_then_enter_commits() {
    let mut editor = editor_with(ToolMode::Path);
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 10.0, 0.0);
    click(&mut editor, 10.0, 10.0);
    assert!(matches!(editor.gesture(), Gesture::DrawingPath { .. }));
    assert!(editor.scene().is_empty());

    editor.handle_event(InputEvent::key(Key::Enter));
    assert!(editor.gesture().is_idle());
    let path = editor.scene().shapes()[0].as_path().unwrap();
    assert_eq!(path.points.len(), 3);
    assert_eq!(path.description(), "M 0 0 L 10 0 L 10 10");
}

#[test]
fn test_path_trailing_point_is_not_committed() {
    let mut editor = editor_with(ToolMode::Path);
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 10.0, 0.0);
    editor.handle_event(InputEvent::pointer_move(30.0, 30.0));

    let shown = editor.surface().shapes()[0].as_path().unwrap();
    assert_eq!(shown.points.len(), 3);

    editor.handle_event(InputEvent::key(Key::Enter));
    assert_eq!(editor.scene().shapes()[0].as_path().unwrap().points.len(), 2);
}

#[test]
fn test_double_click_dedupes_final_point() {
    let mut editor = editor_with(ToolMode::Path);
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 20.0, 5.0);
    click(&mut editor, 20.0, 5.0);
    editor.handle_event(InputEvent::double_click(20.0, 5.0));

    let path = editor.scene().shapes()[0].as_path().unwrap();
    assert_eq!(path.points, vec![Point::new(0.0, 0.0), Point::new(20.0, 5.0)]);
}

#[test]
fn test_single_point_path_is_discarded() {
    let mut editor = editor_with(ToolMode::Path);
    click(&mut editor, 5.0, 5.0);
    editor.handle_event(InputEvent::key(Key::Enter));

    assert!(editor.scene().is_empty());
    assert!(editor.surface().shapes().is_empty());
    assert!(editor.gesture().is_idle());
    assert!(has_notice(&editor, NoticeLevel::Warning, "at least two"));
}

#[test]
fn test_escape_cancels_path_after_three_points() {
    let mut editor = editor_with(ToolMode::Path);
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 10.0, 0.0);
    click(&mut editor, 10.0, 10.0);
    editor.handle_event(InputEvent::key(Key::Escape));

    assert!(editor.gesture().is_idle());
    assert!(editor.scene().is_empty());
    assert!(editor.surface().shapes().is_empty());
}

#[test]
fn test_filled_path_takes_current_fill() {
    let mut editor = editor_with(ToolMode::Path);
    editor.execute(Command::SetFillColor(egui::Color32::RED));
    editor.execute(Command::SetFillEnabled(true));
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 10.0, 0.0);
    click(&mut editor, 10.0, 10.0);
    editor.handle_event(InputEvent::key(Key::Enter));

    assert_eq!(editor.scene().shapes()[0].style.fill.color(), Some(egui::Color32::RED));
}

#[test]
fn test_tool_switch_discards_unfinished_path() {
    let mut editor = editor_with(ToolMode::Path);
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 10.0, 0.0);
    editor.execute(Command::SelectTool(ToolMode::Rect));

    assert!(editor.gesture().is_idle());
    assert!(editor.scene().is_empty());
    assert!(editor.surface().shapes().is_empty());
}

#[test]
fn test_undo_pops_in_reverse_order() {
    let mut editor = editor_with(ToolMode::Rect);
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
    editor.execute(Command::SelectTool(ToolMode::Line));
    drag(&mut editor, (20.0, 20.0), (30.0, 30.0));

    editor.execute(Command::Undo);
    assert_eq!(editor.scene().len(), 1);
    assert!(matches!(editor.scene().shapes()[0].kind, ShapeKind::Rect(_)));

    editor.execute(Command::Undo);
    editor.execute(Command::Undo);
    assert!(editor.scene().is_empty());
}

#[test]
fn test_plain_z_does_not_undo() {
    let mut editor = editor_with(ToolMode::Rect);
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
    editor.handle_event(InputEvent::key(Key::Z));
    assert_eq!(editor.scene().len(), 1);
}
