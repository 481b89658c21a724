use saltfish_editor::tools::{NullTool, Prompt};
use saltfish_editor::{
    Editor, EditorConfig, EditorContext, InputEvent, Key, Level, LevelStore, Line, PointerButton,
    Tool, ToolBehavior, Vertex,
};
use std::cell::Cell;
use std::rc::Rc;
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    store: LevelStore,
    level: Level,
    editor: Editor,
    exited: Rc<Cell<bool>>,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = LevelStore::new(dir.path().join("level"));
        let exited = Rc::new(Cell::new(false));
        let flag = Rc::clone(&exited);
        let editor = Editor::new(EditorConfig::default(), move || flag.set(true));
        Self {
            _dir: dir,
            store,
            level: Level::new(),
            editor,
            exited,
        }
    }

    fn send(&mut self, event: InputEvent) {
        let mut ctx = EditorContext::new(&mut self.level, &self.store);
        self.editor.handle_event(&event, &mut ctx);
    }

    fn key(&mut self, c: char) {
        self.send(InputEvent::char(c));
    }

    fn type_line(&mut self, text: &str) {
        self.send(InputEvent::text(text));
        self.send(InputEvent::key(Key::Enter));
    }

    fn command(&mut self, line: &str) {
        let mut ctx = EditorContext::new(&mut self.level, &self.store);
        self.editor.submit_command(line, &mut ctx);
    }

    fn click(&mut self, x: f64, y: f64) {
        self.send(InputEvent::pointer_down(PointerButton::Left, x, y));
        self.send(InputEvent::pointer_up(PointerButton::Left, x, y));
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_starts_idle() {
    let h = Harness::new();
    assert!(h.editor.tool().is_null());
    assert_eq!(h.editor.status(), NullTool::new().initial_status());
    assert!(!h.editor.changed());
    assert!(!h.editor.wants_text_input());
}

#[test]
fn test_quit_requires_confirmation() {
    let mut h = Harness::new();

    h.key('q');
    assert_eq!(h.editor.status(), "Quit editor? (y/N)");
    h.key('n');
    assert!(!h.exited.get());
    assert_eq!(h.editor.status(), "Editor: ");

    h.key('q');
    h.key('y');
    assert!(h.exited.get());
}

#[test]
fn test_window_close_asks_to_quit() {
    let mut h = Harness::new();
    h.key('v');

    h.send(InputEvent::Quit);
    assert!(matches!(h.editor.tool(), Tool::Null(tool) if tool.prompt() == Some(Prompt::Quit)));

    h.send(InputEvent::key(Key::Escape));
    assert!(matches!(h.editor.tool(), Tool::Null(tool) if tool.prompt().is_none()));
    assert!(!h.exited.get());
}

#[test]
fn test_new_level_without_changes() {
    let mut h = Harness::new();
    h.key('n');
    assert_eq!(h.editor.message(), "New level");
    assert!(h.editor.tool().is_null());
}

#[test]
fn test_new_level_with_changes_asks_first() {
    let mut h = Harness::new();
    h.command("v 1 2");
    assert!(h.editor.changed());
    assert_eq!(h.editor.message(), "add vertex 0 (1, 2)");

    h.key('n');
    assert_eq!(h.editor.status(), "Discard unsaved changes? (y/N)");
    h.key('n');
    assert_eq!(h.level.vertices().len(), 1);

    h.key('n');
    h.key('y');
    assert!(h.level.is_empty());
    assert!(!h.editor.changed());
    assert!(h.editor.history().is_empty());
}

#[test]
fn test_vertex_tool_click_and_undo_redo_keys() {
    let mut h = Harness::new();

    h.key('u');
    assert_eq!(h.editor.message(), "Already at oldest change");

    h.key('v');
    assert!(matches!(h.editor.tool(), Tool::Vertex(_)));
    h.click(200.0, 400.0);
    assert_eq!(h.level.vertices().len(), 1);
    let vertex = h.level.vertices()[0];
    assert!(approx(vertex.x, 1.0) && approx(vertex.y, 2.0));
    assert!(h.editor.changed());

    h.key('u');
    assert_eq!(h.editor.message(), "Undo one operation");
    assert!(h.editor.tool().is_null());
    assert!(h.level.vertices().is_empty());

    h.key('r');
    assert_eq!(h.editor.message(), "Redo one operation");
    assert_eq!(h.level.vertices().len(), 1);

    h.key('r');
    assert_eq!(h.editor.message(), "Already at newest change");
}

#[test]
fn test_line_tool_joins_picked_vertices() {
    let mut h = Harness::new();
    h.key('v');
    h.click(0.0, 0.0);
    h.click(100.0, 0.0);
    h.send(InputEvent::key(Key::Escape));

    h.key('l');
    h.click(101.0, 1.0);
    assert!(matches!(h.editor.tool(), Tool::Line(tool) if tool.first() == Some(1)));
    h.click(300.0, 300.0);
    assert_eq!(h.editor.message(), "No vertex here");
    h.click(0.0, 1.0);

    assert_eq!(h.level.lines(), &[Line { v0: 0, v1: 1 }]);
    assert_eq!(h.editor.history().len(), 3);

    // the same pair again is rejected and not recorded
    h.click(0.0, 0.0);
    h.click(100.0, 0.0);
    assert!(h.editor.message().starts_with("Error:"));
    assert_eq!(h.editor.history().len(), 3);
}

#[test]
fn test_delete_tool_removes_vertex_with_lines() {
    let mut h = Harness::new();
    h.command("v 0 0");
    h.command("v 1 0");
    h.command("v 1 1");
    h.command("l 0 1");
    h.command("l 1 2");

    h.key('d');
    // vertex 1 sits at screen (200, 0)
    h.click(200.0, 0.0);
    assert_eq!(h.level.vertices().len(), 2);
    assert!(h.level.lines().is_empty());
    assert_eq!(h.editor.message(), "delete vertex 1 and 2 lines");

    h.click(500.0, 500.0);
    assert_eq!(h.editor.message(), "Error: nothing to delete here");

    h.key('u');
    assert_eq!(h.level.vertices().len(), 3);
    assert!(h.level.contains_line(0, 1));
    assert!(h.level.contains_line(1, 2));
}

#[test]
fn test_delete_tool_removes_line() {
    let mut h = Harness::new();
    h.command("v 0 0");
    h.command("v 2 0");
    h.command("l 1 0");

    h.key('d');
    h.click(200.0, 0.0);
    assert!(h.level.lines().is_empty());
    assert_eq!(h.level.vertices().len(), 2);
}

#[test]
fn test_command_line_errors() {
    let mut h = Harness::new();

    h.command("frobnicate");
    assert_eq!(h.editor.message(), "Error: Command does not exist: frobnicate");
    assert!(h.editor.tool().is_null());

    h.command("l 0 1");
    assert!(h.editor.message().starts_with("Error:"));

    h.command("v 1");
    assert!(h.editor.message().starts_with("Error:"));

    h.command("d v 3");
    assert!(h.editor.message().starts_with("Error:"));
    assert!(h.editor.history().is_empty());
}

#[test]
fn test_command_line_undo_redo() {
    let mut h = Harness::new();
    h.command("vertex 1 1");
    h.command("undo");
    assert!(h.level.vertices().is_empty());
    h.command("redo");
    assert_eq!(h.level.vertices().len(), 1);
}

#[test]
fn test_save_and_open_by_typing() {
    let mut h = Harness::new();
    h.command("v 1 2");
    h.command("v 3 4");
    h.command("l 0 1");

    h.key('s');
    assert!(h.editor.wants_text_input());
    h.type_line("map");
    assert_eq!(h.editor.message(), "Saved \"map\"");
    assert!(!h.editor.changed());
    let saved = h.level.clone();

    h.key('n');
    assert!(h.level.is_empty());

    h.key('o');
    h.type_line("map");
    assert_eq!(h.editor.message(), "Opened \"map\"");
    assert_eq!(h.level, saved);
    assert!(h.editor.history().is_empty());
    assert!(h.editor.tool().is_null());
}

#[test]
fn test_open_with_changes_asks_first() {
    let mut h = Harness::new();
    h.command("s map");
    h.command("v 5 5");

    h.key('o');
    h.type_line("map");
    assert_eq!(h.editor.status(), "Discard unsaved changes? (y/N)");
    assert_eq!(h.level.vertices().len(), 1);

    h.key('y');
    assert!(h.level.is_empty());
    assert!(!h.editor.changed());
}

#[test]
fn test_open_missing_file_keeps_level() {
    let mut h = Harness::new();
    h.command("v 5 5");
    h.command("s map");

    h.key('o');
    h.type_line("missing");
    assert!(h.editor.message().starts_with("Error: cannot open \"missing\""));
    assert_eq!(h.level.vertices().len(), 1);
}

#[test]
fn test_typed_letters_stay_in_text_field() {
    let mut h = Harness::new();
    h.command("v 1 1");

    h.key('o');
    h.key('u');
    h.send(InputEvent::text("ur"));
    assert_eq!(h.level.vertices().len(), 1);
    assert_eq!(h.editor.history().cursor(), 1);
    assert!(matches!(h.editor.tool(), Tool::Open(tool) if tool.file_name() == "ur"));

    h.send(InputEvent::key(Key::Escape));
    assert!(h.editor.tool().is_null());
}

#[test]
fn test_axis_locks_toggle_while_typing() {
    let mut h = Harness::new();

    h.key('s');
    h.send(InputEvent::text("map"));
    h.send(InputEvent::key(Key::LeftShift));
    assert!(h.editor.is_horizontal_locked());
    assert_eq!(h.editor.message(), "Horizontal locked");
    assert!(matches!(h.editor.tool(), Tool::Save(_)));
    h.send(InputEvent::key(Key::Escape));

    h.key(':');
    h.send(InputEvent::key(Key::LeftAlt));
    assert!(h.editor.is_vertical_locked());
    assert!(matches!(h.editor.tool(), Tool::Command(_)));
}

#[test]
fn test_undo_during_quit_prompt() {
    let mut h = Harness::new();
    h.command("v 1 1");

    h.key('q');
    h.key('u');
    assert!(h.level.vertices().is_empty());
    assert_eq!(h.editor.message(), "Undo one operation");
    assert!(matches!(h.editor.tool(), Tool::Null(tool) if tool.prompt().is_none()));

    // the question is gone, so 'y' no longer quits
    h.key('y');
    assert!(!h.exited.get());
}

#[test]
fn test_lock_during_quit_prompt_keeps_question() {
    let mut h = Harness::new();
    h.key('q');
    h.send(InputEvent::key(Key::LeftAlt));
    assert!(h.editor.is_vertical_locked());

    h.key('y');
    assert!(h.exited.get());
}

#[test]
fn test_drag_pans_view_without_clicking() {
    let mut h = Harness::new();
    h.key('v');

    h.send(InputEvent::pointer_move(10.0, 10.0));
    h.send(InputEvent::pointer_down(PointerButton::Left, 10.0, 10.0));
    h.send(InputEvent::pointer_move(20.0, 30.0));
    assert_eq!(h.editor.message(), "Dragging");
    h.send(InputEvent::pointer_up(PointerButton::Left, 20.0, 30.0));

    let origin = h.editor.view().origin;
    assert!(approx(origin.x, -0.05));
    assert!(approx(origin.y, -0.1));
    assert!(h.level.vertices().is_empty());
}

#[test]
fn test_wheel_zoom_is_clamped_and_anchored() {
    let mut h = Harness::new();
    let config = EditorConfig::default();

    h.send(InputEvent::pointer_move(100.0, 50.0));
    let anchor = h.editor.view().screen_to_world(saltfish_editor::ScreenPos::new(100.0, 50.0));

    h.send(InputEvent::Wheel {
        delta: 1.0,
        flipped: false,
    });
    assert!(approx(h.editor.view().scale, config.initial_scale + config.zoom_coeff));
    let after = h.editor.view().screen_to_world(saltfish_editor::ScreenPos::new(100.0, 50.0));
    assert!(approx(after.x, anchor.x) && approx(after.y, anchor.y));

    h.send(InputEvent::Wheel {
        delta: 1000.0,
        flipped: false,
    });
    assert_eq!(h.editor.view().scale, config.zoom_max);

    h.send(InputEvent::Wheel {
        delta: 1000.0,
        flipped: true,
    });
    assert_eq!(h.editor.view().scale, config.zoom_min);
}

#[test]
fn test_axis_locks() {
    let mut h = Harness::new();

    h.send(InputEvent::key(Key::LeftAlt));
    assert_eq!(h.editor.message(), "Vertical locked");
    assert!(h.editor.is_vertical_locked());

    h.send(InputEvent::key(Key::LeftShift));
    assert_eq!(h.editor.message(), "Horizontal locked");
    assert!(h.editor.is_horizontal_locked());
    assert!(!h.editor.is_vertical_locked());

    h.send(InputEvent::key(Key::LeftShift));
    assert_eq!(h.editor.message(), "Horizontal unlocked");
    assert!(!h.editor.is_horizontal_locked());
}

#[test]
fn test_horizontal_lock_keeps_row() {
    let mut h = Harness::new();
    h.key('v');
    h.send(InputEvent::pointer_move(100.0, 100.0));
    h.send(InputEvent::key(Key::LeftShift));

    h.send(InputEvent::pointer_move(300.0, 500.0));
    h.click(300.0, 500.0);

    let vertex: Vertex = h.level.vertices()[0];
    assert!(approx(vertex.x, 1.5));
    assert!(approx(vertex.y, 0.5));
}

#[test]
fn test_command_quit_exits_immediately() {
    let mut h = Harness::new();
    h.command("q");
    assert!(h.exited.get());
}

#[test]
fn test_command_open_replaces_changed_level() {
    let mut h = Harness::new();
    h.command("s map");
    h.command("v 5 5");
    assert!(h.editor.changed());

    h.command("o map");
    assert_eq!(h.editor.message(), "Opened \"map\"");
    assert!(h.level.is_empty());
    assert!(!h.editor.changed());
    assert!(h.editor.history().is_empty());
    assert!(h.editor.tool().is_null());
}
